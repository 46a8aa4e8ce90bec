//! Feature-gated reconciliation
//!
//! `FeatureGatedReconciler` re-evaluates a named feature on every request and
//! only runs its reconcile body while the feature is activated in the control
//! namespace. Changes to any FeatureGate fan out into one request per known
//! primary resource, so flipping a feature re-evaluates every instance.

use crate::featuregate::FeatureActivation;
use crate::{ReconcileRequest, Result};
use async_trait::async_trait;
use kube::Resource;
use kube_runtime::controller::Action;
use kube_runtime::reflector::Store;
use std::hash::Hash;
use std::sync::Arc;
use tanzu_api::FeatureGate;
use tracing::{debug, error, info};

/// Outcome of the feature check for one invocation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Decision {
    FeatureInactive,
    FeatureActive,
}

/// Work performed for a request while the feature is active
#[async_trait]
pub trait ReconcileBody: Send + Sync {
    async fn reconcile(&self, request: &ReconcileRequest) -> Result<()>;
}

/// Body that changes nothing
#[derive(Clone, Copy, Debug, Default)]
pub struct NoopBody;

#[async_trait]
impl ReconcileBody for NoopBody {
    async fn reconcile(&self, _request: &ReconcileRequest) -> Result<()> {
        Ok(())
    }
}

/// Lists every known primary resource across all namespaces
pub trait PrimaryLister: Send + Sync {
    fn list(&self) -> Result<Vec<ReconcileRequest>>;
}

impl<K> PrimaryLister for Store<K>
where
    K: Resource + Clone + Send + Sync + 'static,
    K::DynamicType: Eq + Hash + Clone + Send + Sync,
{
    fn list(&self) -> Result<Vec<ReconcileRequest>> {
        Ok(self
            .state()
            .iter()
            .map(|obj| ReconcileRequest::from_resource(obj.as_ref()))
            .collect())
    }
}

pub struct FeatureGatedReconciler {
    features: Arc<dyn FeatureActivation>,
    lister: Arc<dyn PrimaryLister>,
    body: Arc<dyn ReconcileBody>,
    control_namespace: String,
    feature: String,
}

impl FeatureGatedReconciler {
    pub fn new(
        features: Arc<dyn FeatureActivation>,
        lister: Arc<dyn PrimaryLister>,
        control_namespace: impl Into<String>,
        feature: impl Into<String>,
    ) -> Self {
        Self {
            features,
            lister,
            body: Arc::new(NoopBody),
            control_namespace: control_namespace.into(),
            feature: feature.into(),
        }
    }

    /// Replace the reconcile body run while the feature is active
    pub fn with_body(mut self, body: Arc<dyn ReconcileBody>) -> Self {
        self.body = body;
        self
    }

    pub fn feature(&self) -> &str {
        &self.feature
    }

    pub fn control_namespace(&self) -> &str {
        &self.control_namespace
    }

    /// Look up the feature state. Lookup errors are returned to the caller.
    pub async fn decide(&self) -> Result<Decision> {
        let active = self
            .features
            .is_feature_active(&self.control_namespace, &self.feature)
            .await?;

        Ok(if active {
            Decision::FeatureActive
        } else {
            Decision::FeatureInactive
        })
    }

    /// Reconcile one primary resource. The resource itself is never fetched,
    /// so requests for deleted instances succeed like any other.
    pub async fn reconcile(&self, request: &ReconcileRequest) -> Result<Action> {
        match self.decide().await? {
            Decision::FeatureInactive => {
                info!(lookup = %request, "Feature '{}' deactivated", self.feature);
                info!(lookup = %request, "Skipping reconcile");
            }
            Decision::FeatureActive => {
                info!(lookup = %request, "Using '{}' feature", self.feature);
                self.body.reconcile(request).await?;
                info!(lookup = %request, "Successfully reconciled");
            }
        }

        Ok(Action::await_change())
    }

    /// Fan a FeatureGate change out into one request per primary resource.
    ///
    /// The gate's content is ignored. Listing failures are logged and yield
    /// no requests.
    pub fn map_feature_gate_to_requests(&self, gate: &FeatureGate) -> Vec<ReconcileRequest> {
        let requests = match self.lister.list() {
            Ok(requests) => requests,
            Err(e) => {
                error!(error = %e, "failed to list lookups in event handler");
                return Vec::new();
            }
        };

        debug!(
            "FeatureGate {} changed, enqueueing {} requests",
            gate.metadata.name.as_deref().unwrap_or("unknown"),
            requests.len()
        );
        requests
    }
}
