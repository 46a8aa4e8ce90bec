//! Tanzu API types and CRDs for Kubernetes integration
//!
//! This library defines the custom resources used by the Tanzu controllers:
//! - Lookup: Demo resource reconciled only while its feature is activated
//! - FeatureGate: Activates or deactivates named features per namespace
//! - ClusterBootstrap / ClusterBootstrapTemplate: Packages installed into new clusters
//! - TanzuKubernetesRelease / OSImage: Kubernetes distributions and their images
//! - KappControllerConfig: kapp-controller settings for workload clusters

pub mod app;
pub mod config;
pub mod run;
pub mod condition;

pub use app::v1alpha1::Lookup;
pub use condition::Condition;
pub use config::v1alpha1::FeatureGate;
pub use run::v1alpha3::{
    ClusterBootstrap, ClusterBootstrapTemplate, KappControllerConfig, OSImage,
    TanzuKubernetesRelease,
};
