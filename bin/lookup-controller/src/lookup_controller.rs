//! Lookup controller for reconciling Lookup resources behind the `tinycache` feature

use crate::config::ControllerConfig;
use crate::probes::Readiness;
use futures::StreamExt;
use kube::{Api, Client};
use kube_runtime::controller::{self, Action};
use kube_runtime::{watcher, Controller};
use std::sync::Arc;
use tanzu_api::{FeatureGate, Lookup};
use tanzu_core::{CoreError, FeatureGatedReconciler, KubeFeatureGates, ReconcileRequest, Scheme};
use thiserror::Error;
use tracing::{debug, error, info, warn};

#[derive(Error, Debug)]
#[error("Reconciliation error: {0}")]
pub struct ReconcileError(#[from] pub CoreError);

/// Shared state handed to every reconcile
pub struct Context {
    reconciler: Arc<FeatureGatedReconciler>,
    config: ControllerConfig,
}

pub struct LookupController {
    client: Client,
    config: ControllerConfig,
    scheme: Scheme,
}

impl LookupController {
    pub fn new(client: Client, config: ControllerConfig, scheme: Scheme) -> Self {
        Self {
            client,
            config,
            scheme,
        }
    }

    pub async fn run(&self, readiness: Readiness) -> anyhow::Result<()> {
        self.scheme.require::<Lookup>()?;
        self.scheme.require::<FeatureGate>()?;

        info!(
            feature = %self.config.feature_name,
            namespace = %self.config.control_namespace,
            "Starting Lookup reconciliation"
        );

        let lookups: Api<Lookup> = Api::all(self.client.clone());
        let feature_gates: Api<FeatureGate> = Api::all(self.client.clone());

        let controller = Controller::new(lookups, watcher::Config::default()).with_config(
            controller::Config::default().concurrency(self.config.concurrency),
        );

        // The Lookup reflector doubles as the lister for FeatureGate fan-out
        let store = controller.store();
        let features = Arc::new(KubeFeatureGates::new(
            self.client.clone(),
            self.config.lookup_timeout,
        ));
        let reconciler = Arc::new(FeatureGatedReconciler::new(
            features,
            Arc::new(store),
            self.config.control_namespace.clone(),
            self.config.feature_name.clone(),
        ));

        let mapper = reconciler.clone();
        let ctx = Arc::new(Context {
            reconciler,
            config: self.config.clone(),
        });

        readiness.set_ready();

        controller
            .watches(feature_gates, watcher::Config::default(), move |gate| {
                mapper
                    .map_feature_gate_to_requests(&gate)
                    .iter()
                    .map(ReconcileRequest::to_object_ref::<Lookup>)
                    .collect::<Vec<_>>()
            })
            .shutdown_on_signal()
            .run(reconcile, error_policy, ctx)
            .for_each(|result| async move {
                match result {
                    Ok((lookup, _)) => debug!("Reconciled Lookup {}", lookup),
                    Err(e) => error!("Error in reconciliation stream: {}", e),
                }
            })
            .await;

        info!("Lookup reconciliation stopped");
        Ok(())
    }
}

async fn reconcile(lookup: Arc<Lookup>, ctx: Arc<Context>) -> Result<Action, ReconcileError> {
    let request = ReconcileRequest::from_resource(lookup.as_ref());
    Ok(ctx.reconciler.reconcile(&request).await?)
}

fn error_policy(lookup: Arc<Lookup>, error: &ReconcileError, ctx: Arc<Context>) -> Action {
    let request = ReconcileRequest::from_resource(lookup.as_ref());
    let delay = requeue_delay(&error.0, &ctx.config);
    warn!(lookup = %request, "{}, requeueing in {:?}", error, delay);
    Action::requeue(delay)
}

/// Transient errors retry after the configured delay; permanent ones back
/// off five times longer
fn requeue_delay(error: &CoreError, config: &ControllerConfig) -> std::time::Duration {
    if error.is_retryable() {
        config.error_requeue
    } else {
        config.error_requeue * 5
    }
}
