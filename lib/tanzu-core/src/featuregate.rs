//! Feature activation lookups against FeatureGate resources

use crate::{CoreError, Result};
use async_trait::async_trait;
use kube::api::ListParams;
use kube::{Api, Client};
use std::time::Duration;
use tanzu_api::FeatureGate;
use tracing::debug;

/// Answers whether a named feature is active in a namespace.
///
/// Implementations must be side-effect free and safe to call repeatedly.
#[async_trait]
pub trait FeatureActivation: Send + Sync {
    async fn is_feature_active(&self, namespace: &str, feature: &str) -> Result<bool>;
}

/// Feature lookups served by the FeatureGate resources of a cluster
#[derive(Clone)]
pub struct KubeFeatureGates {
    client: Client,
    timeout: Duration,
}

impl KubeFeatureGates {
    pub fn new(client: Client, timeout: Duration) -> Self {
        Self { client, timeout }
    }

    async fn list_gates(&self) -> Result<Vec<FeatureGate>> {
        let gates: Api<FeatureGate> = Api::all(self.client.clone());
        let list = gates.list(&ListParams::default()).await?;
        Ok(list.items)
    }
}

#[async_trait]
impl FeatureActivation for KubeFeatureGates {
    async fn is_feature_active(&self, namespace: &str, feature: &str) -> Result<bool> {
        let gates = tokio::time::timeout(self.timeout, self.list_gates())
            .await
            .map_err(|_| CoreError::Timeout {
                namespace: namespace.to_string(),
                timeout: self.timeout,
            })??;

        debug!("Found {} FeatureGates", gates.len());
        Ok(activated_in(&gates, namespace, feature))
    }
}

/// Whether `feature` is activated in `namespace`.
///
/// The first gate governing the namespace decides; when no gate governs it
/// the feature is inactive.
pub fn activated_in(gates: &[FeatureGate], namespace: &str, feature: &str) -> bool {
    gates
        .iter()
        .find(|gate| gate.governs(namespace))
        .map(|gate| gate.is_activated(feature))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanzu_api::config::v1alpha1::{FeatureGateSpec, FeatureGateStatus};
    use tokio::net::TcpListener;

    fn gate(name: &str, namespaces: &[&str], activated: &[&str]) -> FeatureGate {
        let mut gate = FeatureGate::new(name, FeatureGateSpec::default());
        gate.status = Some(FeatureGateStatus {
            namespaces: namespaces.iter().map(|s| s.to_string()).collect(),
            activated_features: activated.iter().map(|s| s.to_string()).collect(),
            ..Default::default()
        });
        gate
    }

    #[test]
    fn test_activated_in_governing_gate() {
        let gates = vec![
            gate("other", &["default"], &["tinycache"]),
            gate("tkg-system", &["tkg-system"], &["tinycache"]),
        ];
        assert!(activated_in(&gates, "tkg-system", "tinycache"));
        assert!(!activated_in(&gates, "tkg-system", "bigcache"));
    }

    #[test]
    fn test_no_governing_gate_is_inactive() {
        let gates = vec![gate("other", &["default"], &["tinycache"])];
        assert!(!activated_in(&gates, "tkg-system", "tinycache"));
        assert!(!activated_in(&[], "tkg-system", "tinycache"));
    }

    #[test]
    fn test_first_governing_gate_decides() {
        let gates = vec![
            gate("first", &["tkg-system"], &[]),
            gate("second", &["tkg-system"], &["tinycache"]),
        ];
        assert!(!activated_in(&gates, "tkg-system", "tinycache"));
    }

    /// Client for an API server that accepts connections and never answers
    async fn stalled_client() -> Client {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((socket, _)) = listener.accept().await {
                held.push(socket);
            }
        });

        let config = kube::Config::new(format!("http://{}", addr).parse().unwrap());
        Client::try_from(config).unwrap()
    }

    #[tokio::test]
    async fn test_lookup_times_out_as_retryable_error() {
        let timeout = Duration::from_millis(200);
        let features = KubeFeatureGates::new(stalled_client().await, timeout);

        let started = std::time::Instant::now();
        let err = features
            .is_feature_active("tkg-system", "tinycache")
            .await
            .unwrap_err();

        assert!(started.elapsed() < Duration::from_secs(5));
        assert!(err.is_retryable());
        match err {
            CoreError::Timeout { namespace, timeout: elapsed } => {
                assert_eq!(namespace, "tkg-system");
                assert_eq!(elapsed, timeout);
            }
            other => panic!("expected timeout, got {}", other),
        }
    }
}
