use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Condition;

/// Lookup is a demo resource whose reconciliation is gated by the
/// `tinycache` feature
#[derive(CustomResource, Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "app.tanzu.vmware.com",
    version = "v1alpha1",
    kind = "Lookup",
    plural = "lookups",
    namespaced,
    derive = "Default",
    status = "LookupStatus",
)]
#[serde(rename_all = "camelCase")]
pub struct LookupSpec {
    /// Free-form description of what is being looked up
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Status of a Lookup
#[derive(Clone, Debug, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LookupStatus {
    /// Generation last handled by the controller
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,

    /// Conditions describing the status
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::{CustomResourceExt, Resource};

    #[test]
    fn test_lookup_is_namespaced() {
        let crd = Lookup::crd();
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(crd.spec.group, "app.tanzu.vmware.com");
        assert_eq!(crd.spec.names.plural, "lookups");
    }

    #[test]
    fn test_lookup_identity() {
        let mut lookup = Lookup::new("x", LookupSpec::default());
        lookup.metadata.namespace = Some("default".to_string());

        assert_eq!(lookup.meta().name.as_deref(), Some("x"));
        assert_eq!(lookup.meta().namespace.as_deref(), Some("default"));
        assert_eq!(Lookup::kind(&()), "Lookup");
    }
}
