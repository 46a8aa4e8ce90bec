//! Core reconciliation functionality for Tanzu controllers
//!
//! This library provides:
//! - Feature activation lookups against FeatureGate resources
//! - The feature-gated reconciler and its fan-out request mapper
//! - An explicit scheme of the resource kinds a process serves

pub mod error;
pub mod featuregate;
pub mod reconciler;
pub mod request;
pub mod scheme;

pub use error::{CoreError, Result};
pub use featuregate::{FeatureActivation, KubeFeatureGates};
pub use reconciler::{
    Decision, FeatureGatedReconciler, NoopBody, PrimaryLister, ReconcileBody,
};
pub use request::ReconcileRequest;
pub use scheme::Scheme;
