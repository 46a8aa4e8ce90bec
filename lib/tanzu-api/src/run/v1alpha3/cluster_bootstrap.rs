use k8s_openapi::api::core::v1::TypedLocalObjectReference;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// ClusterBootstrap lists the packages installed into a workload cluster
/// when it is created
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "run.tanzu.vmware.com",
    version = "v1alpha3",
    kind = "ClusterBootstrap",
    plural = "clusterbootstraps",
    namespaced,
    derive = "Default",
    derive = "PartialEq",
    status = "ClusterBootstrapStatus",
    printcolumn = r#"{"name":"TKR","type":"string","jsonPath":".status.resolvedTKR"}"#,
)]
pub struct ClusterBootstrapSpec {
    /// Packages to install. A bootstrap without any of these fields set
    /// installs nothing
    #[serde(flatten)]
    pub template: ClusterBootstrapTemplateSpec,
}

/// Status of a ClusterBootstrap
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ClusterBootstrapStatus {
    /// Name of the TanzuKubernetesRelease the bootstrap was resolved against
    #[serde(rename = "resolvedTKR", default, skip_serializing_if = "Option::is_none")]
    pub resolved_tkr: Option<String>,
}

/// ClusterBootstrapTemplate is the per-TKR default that ClusterBootstraps
/// are created from
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "run.tanzu.vmware.com",
    version = "v1alpha3",
    kind = "ClusterBootstrapTemplate",
    plural = "clusterbootstraptemplates",
    namespaced,
    derive = "Default",
    derive = "PartialEq",
)]
#[serde(rename_all = "camelCase")]
pub struct ClusterBootstrapTemplateSpec {
    /// Pause reconciliation of the bootstrap
    #[serde(default)]
    pub paused: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cni: Option<ClusterBootstrapPackage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub csi: Option<ClusterBootstrapPackage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpi: Option<ClusterBootstrapPackage>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kapp: Option<ClusterBootstrapPackage>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub additional_packages: Vec<ClusterBootstrapPackage>,
}

impl From<ClusterBootstrapTemplateSpec> for ClusterBootstrapSpec {
    fn from(template: ClusterBootstrapTemplateSpec) -> Self {
        Self { template }
    }
}

/// Reference to a package and where its values come from
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClusterBootstrapPackage {
    /// Name of the Package resource
    pub ref_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_from: Option<ValuesFrom>,
}

/// Source of a package's values. At most one field is expected to be set
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ValuesFrom {
    /// Inline values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,

    /// Name of a Secret holding the values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret_ref: Option<String>,

    /// Provider resource holding the values
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub provider_ref: Option<TypedLocalObjectReference>,
}

impl ClusterBootstrapTemplateSpec {
    /// Iterate over every package in install order
    pub fn packages(&self) -> impl Iterator<Item = &ClusterBootstrapPackage> {
        [&self.cni, &self.csi, &self.cpi, &self.kapp]
            .into_iter()
            .flatten()
            .chain(self.additional_packages.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn package(name: &str) -> ClusterBootstrapPackage {
        ClusterBootstrapPackage {
            ref_name: name.to_string(),
            values_from: Some(ValuesFrom {
                provider_ref: Some(TypedLocalObjectReference {
                    api_group: Some("cni.tanzu.vmware.com".to_string()),
                    kind: "AntreaConfig".to_string(),
                    name: format!("{}-config", name),
                }),
                ..Default::default()
            }),
        }
    }

    #[test]
    fn test_clone_is_independent() {
        let mut bootstrap = ClusterBootstrap::new(
            "workload-1",
            ClusterBootstrapSpec::from(ClusterBootstrapTemplateSpec {
                cni: Some(package("antrea.tanzu.vmware.com.1.2.3")),
                additional_packages: vec![package("metrics-server.tanzu.vmware.com.0.4.0")],
                ..Default::default()
            }),
        );
        bootstrap.metadata.namespace = Some("default".to_string());

        let mut copy = bootstrap.clone();
        assert_eq!(copy, bootstrap);

        copy.spec.template.cni.as_mut().unwrap().ref_name = "calico.tanzu.vmware.com.3.0.0".to_string();
        copy.spec.template.additional_packages.clear();
        copy.metadata.namespace = Some("other".to_string());

        assert_eq!(
            bootstrap.spec.template.cni.as_ref().unwrap().ref_name,
            "antrea.tanzu.vmware.com.1.2.3"
        );
        assert_eq!(bootstrap.spec.template.additional_packages.len(), 1);
        assert_eq!(bootstrap.metadata.namespace.as_deref(), Some("default"));
    }

    #[test]
    fn test_bootstrap_from_template() {
        let template = ClusterBootstrapTemplateSpec {
            cni: Some(package("cni")),
            kapp: Some(package("kapp")),
            additional_packages: vec![package("extra")],
            ..Default::default()
        };

        let spec = ClusterBootstrapSpec::from(template.clone());
        assert_eq!(spec.template, template);
        let names: Vec<_> = spec.template.packages().map(|p| p.ref_name.as_str()).collect();
        assert_eq!(names, vec!["cni", "kapp", "extra"]);
    }

    #[test]
    fn test_bootstrap_spec_shares_template_wire_format() {
        let spec = ClusterBootstrapSpec::from(ClusterBootstrapTemplateSpec {
            kapp: Some(package("kapp-controller")),
            ..Default::default()
        });
        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(value["kapp"]["refName"], "kapp-controller");
        assert!(value.get("template").is_none());

        let empty: ClusterBootstrapSpec = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(empty, ClusterBootstrapSpec::default());
        assert_eq!(empty.template.packages().count(), 0);
    }

    #[test]
    fn test_wire_format() {
        let spec: ClusterBootstrapTemplateSpec = serde_json::from_value(serde_json::json!({
            "cni": {"refName": "antrea", "valuesFrom": {"secretRef": "antrea-values"}},
            "additionalPackages": [{"refName": "pinniped"}]
        }))
        .unwrap();

        assert_eq!(spec.cni.unwrap().values_from.unwrap().secret_ref.as_deref(), Some("antrea-values"));
        assert_eq!(spec.additional_packages[0].ref_name, "pinniped");
        assert!(!spec.paused);
    }
}
