/// API version v1alpha1 for config.tanzu.vmware.com CRDs

pub mod feature_gate;

pub use feature_gate::{
    FeatureGate, FeatureGateSpec, FeatureGateStatus, FeatureReference, FeatureState,
};

/// API version for config resources
pub const API_VERSION: &str = "v1alpha1";
