use std::collections::BTreeMap;

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// KappControllerConfig carries the kapp-controller settings applied to a
/// workload cluster
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "run.tanzu.vmware.com",
    version = "v1alpha3",
    kind = "KappControllerConfig",
    plural = "kappcontrollerconfigs",
    namespaced,
    derive = "Default",
    derive = "PartialEq",
    status = "KappControllerConfigStatus",
    printcolumn = r#"{"name":"Namespace","type":"string","jsonPath":".spec.namespace"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct KappControllerConfigSpec {
    /// Namespace kapp-controller is installed into
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default)]
    pub kapp_controller: KappController,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KappController {
    #[serde(default)]
    pub create_namespace: bool,

    /// Namespace holding resources shared by all namespaces
    #[serde(default = "default_global_namespace")]
    pub global_namespace: String,

    #[serde(default)]
    pub deployment: KappDeployment,

    #[serde(default)]
    pub config: KappConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KappDeployment {
    #[serde(default)]
    pub host_network: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority_class_name: Option<String>,

    /// Number of reconciliations kapp-controller runs in parallel
    #[serde(default = "default_concurrency")]
    pub concurrency: u32,

    #[serde(default)]
    pub tolerations: Vec<BTreeMap<String, String>>,

    #[serde(default = "default_api_port")]
    pub api_port: u16,

    #[serde(default = "default_metrics_bind_address")]
    pub metrics_bind_address: String,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KappConfig {
    /// Comma separated hosts for which TLS verification is skipped
    #[serde(default, rename = "dangerousSkipTLSVerify", skip_serializing_if = "Option::is_none")]
    pub dangerous_skip_tls_verify: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KappControllerConfigStatus {
    /// Secret holding the rendered data values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<String>,
}

fn default_namespace() -> String {
    "tkg-system".to_string()
}

fn default_global_namespace() -> String {
    "tanzu-package-repo-global".to_string()
}

fn default_concurrency() -> u32 {
    4
}

fn default_api_port() -> u16 {
    10100
}

fn default_metrics_bind_address() -> String {
    ":8080".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_spec() {
        let spec: KappControllerConfigSpec =
            serde_json::from_value(serde_json::json!({ "kappController": {"deployment": {}} }))
                .unwrap();

        assert_eq!(spec.namespace, "tkg-system");
        assert_eq!(spec.kapp_controller.global_namespace, "tanzu-package-repo-global");
        assert_eq!(spec.kapp_controller.deployment.concurrency, 4);
        assert_eq!(spec.kapp_controller.deployment.api_port, 10100);
        assert_eq!(spec.kapp_controller.deployment.metrics_bind_address, ":8080");
    }

    #[test]
    fn test_clone_copies_tolerations() {
        let mut toleration = BTreeMap::new();
        toleration.insert("key".to_string(), "node-role.kubernetes.io/master".to_string());
        toleration.insert("effect".to_string(), "NoSchedule".to_string());

        let config = KappControllerConfig::new(
            "workload-1-kapp-controller-config",
            KappControllerConfigSpec {
                namespace: "tkg-system".to_string(),
                kapp_controller: KappController {
                    deployment: KappDeployment {
                        tolerations: vec![toleration],
                        ..Default::default()
                    },
                    ..Default::default()
                },
            },
        );

        let mut copy = config.clone();
        copy.spec.kapp_controller.deployment.tolerations[0]
            .insert("effect".to_string(), "NoExecute".to_string());

        assert_eq!(
            config.spec.kapp_controller.deployment.tolerations[0]["effect"],
            "NoSchedule"
        );
    }

    #[test]
    fn test_skip_tls_verify_wire_name() {
        let config = KappConfig {
            dangerous_skip_tls_verify: Some("registry.local".to_string()),
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["dangerousSkipTLSVerify"], "registry.local");
    }
}
