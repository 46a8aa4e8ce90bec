//! config.tanzu.vmware.com API group

pub mod v1alpha1;

/// API group for config resources
pub const API_GROUP: &str = "config.tanzu.vmware.com";
