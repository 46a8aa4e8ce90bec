/// API version v1alpha1 for app.tanzu.vmware.com CRDs

pub mod lookup;

pub use lookup::{Lookup, LookupSpec, LookupStatus};

/// API version for app resources
pub const API_VERSION: &str = "v1alpha1";
