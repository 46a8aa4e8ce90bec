//! app.tanzu.vmware.com API group

pub mod v1alpha1;

/// API group for app resources
pub const API_GROUP: &str = "app.tanzu.vmware.com";
