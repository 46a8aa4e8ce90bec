use k8s_openapi::api::core::v1::LocalObjectReference;
use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::Condition;

/// TanzuKubernetesRelease describes a Kubernetes distribution: its version,
/// core component images, OS images and bootstrap packages
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "run.tanzu.vmware.com",
    version = "v1alpha3",
    kind = "TanzuKubernetesRelease",
    plural = "tanzukubernetesreleases",
    shortname = "tkr",
    derive = "Default",
    derive = "PartialEq",
    status = "TanzuKubernetesReleaseStatus",
    printcolumn = r#"{"name":"Version","type":"string","jsonPath":".spec.version"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct TanzuKubernetesReleaseSpec {
    /// Fully qualified semantic version of the release
    pub version: String,

    pub kubernetes: KubernetesSpec,

    /// OSImages shipped with this release
    #[serde(default, rename = "osImages")]
    pub os_images: Vec<LocalObjectReference>,

    /// Packages installed when bootstrapping clusters of this release
    #[serde(default)]
    pub bootstrap_packages: Vec<LocalObjectReference>,
}

/// Kubernetes version and core component images
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesSpec {
    pub version: String,

    /// Repository the Kubernetes images are pulled from
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_repository: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub etcd: Option<ContainerImageInfo>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pause: Option<ContainerImageInfo>,

    #[serde(default, rename = "coredns", skip_serializing_if = "Option::is_none")]
    pub core_dns: Option<ContainerImageInfo>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ContainerImageInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_repository: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_tag: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TanzuKubernetesReleaseStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

impl TanzuKubernetesRelease {
    /// Whether the release has a "Ready" condition set to "True"
    pub fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| crate::condition::find(&s.conditions, "Ready"))
            .map(Condition::is_true)
            .unwrap_or(false)
    }
}
