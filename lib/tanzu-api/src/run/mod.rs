//! run.tanzu.vmware.com API group

pub mod v1alpha3;

/// API group for run resources
pub const API_GROUP: &str = "run.tanzu.vmware.com";
