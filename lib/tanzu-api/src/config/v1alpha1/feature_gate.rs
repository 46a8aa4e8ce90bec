use k8s_openapi::apimachinery::pkg::apis::meta::v1::LabelSelector;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// FeatureGate activates or deactivates named features in the namespaces
/// matched by its selector
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "config.tanzu.vmware.com",
    version = "v1alpha1",
    kind = "FeatureGate",
    plural = "featuregates",
    derive = "Default",
    status = "FeatureGateStatus",
    printcolumn = r#"{"name":"Activated","type":"string","jsonPath":".status.activatedFeatures"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct FeatureGateSpec {
    /// Namespaces this gate applies to
    #[serde(default)]
    pub namespace_selector: LabelSelector,

    /// Features and their requested activation state
    #[serde(default)]
    pub features: Vec<FeatureReference>,
}

/// Reference to a Feature and whether it should be activated
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct FeatureReference {
    /// Name of the Feature resource
    pub name: String,

    /// Requested activation state
    #[serde(default)]
    pub activate: bool,
}

/// Status of a FeatureGate as resolved by the feature gate controller
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeatureGateStatus {
    /// Namespaces currently governed by this gate
    #[serde(default)]
    pub namespaces: Vec<String>,

    #[serde(default)]
    pub activated_features: Vec<String>,

    #[serde(default)]
    pub deactivated_features: Vec<String>,

    /// Features referenced by the spec that do not exist or cannot be toggled
    #[serde(default)]
    pub unavailable_features: Vec<String>,
}

/// Resolved state of a single feature within a gate
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FeatureState {
    Activated,
    Deactivated,
    Unavailable,
    /// The gate does not mention the feature
    Unknown,
}

impl FeatureGate {
    /// Whether this gate's status lists the namespace
    pub fn governs(&self, namespace: &str) -> bool {
        self.status
            .as_ref()
            .map(|s| s.namespaces.iter().any(|ns| ns == namespace))
            .unwrap_or(false)
    }

    pub fn activation(&self, feature: &str) -> FeatureState {
        let Some(status) = self.status.as_ref() else {
            return FeatureState::Unknown;
        };

        let listed = |features: &[String]| features.iter().any(|f| f == feature);
        if listed(&status.activated_features) {
            FeatureState::Activated
        } else if listed(&status.deactivated_features) {
            FeatureState::Deactivated
        } else if listed(&status.unavailable_features) {
            FeatureState::Unavailable
        } else {
            FeatureState::Unknown
        }
    }

    pub fn is_activated(&self, feature: &str) -> bool {
        self.activation(feature) == FeatureState::Activated
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::CustomResourceExt;

    fn gate(namespaces: &[&str], activated: &[&str], deactivated: &[&str]) -> FeatureGate {
        let mut gate = FeatureGate::new("tkg-system", FeatureGateSpec::default());
        gate.status = Some(FeatureGateStatus {
            namespaces: namespaces.iter().map(|s| s.to_string()).collect(),
            activated_features: activated.iter().map(|s| s.to_string()).collect(),
            deactivated_features: deactivated.iter().map(|s| s.to_string()).collect(),
            unavailable_features: vec!["ghost".to_string()],
        });
        gate
    }

    #[test]
    fn test_feature_gate_is_cluster_scoped() {
        let crd = FeatureGate::crd();
        assert_eq!(crd.spec.scope, "Cluster");
        assert_eq!(crd.spec.names.plural, "featuregates");
    }

    #[test]
    fn test_governs() {
        let gate = gate(&["tkg-system", "default"], &[], &[]);
        assert!(gate.governs("tkg-system"));
        assert!(!gate.governs("kube-system"));

        let unresolved = FeatureGate::new("empty", FeatureGateSpec::default());
        assert!(!unresolved.governs("tkg-system"));
    }

    #[test]
    fn test_activation() {
        let gate = gate(&["tkg-system"], &["tinycache"], &["bigcache"]);
        assert_eq!(gate.activation("tinycache"), FeatureState::Activated);
        assert_eq!(gate.activation("bigcache"), FeatureState::Deactivated);
        assert_eq!(gate.activation("ghost"), FeatureState::Unavailable);
        assert_eq!(gate.activation("other"), FeatureState::Unknown);
        assert!(gate.is_activated("tinycache"));
        assert!(!gate.is_activated("bigcache"));
    }

    #[test]
    fn test_spec_deserialization() {
        let spec: FeatureGateSpec = serde_json::from_value(serde_json::json!({
            "namespaceSelector": {
                "matchExpressions": [
                    {"key": "kubernetes.io/metadata.name", "operator": "In", "values": ["tkg-system"]}
                ]
            },
            "features": [{"name": "tinycache", "activate": true}, {"name": "bigcache"}]
        }))
        .unwrap();

        assert_eq!(spec.features.len(), 2);
        assert!(spec.features[0].activate);
        assert!(!spec.features[1].activate);
        assert_eq!(spec.namespace_selector.match_expressions.unwrap().len(), 1);
    }
}
