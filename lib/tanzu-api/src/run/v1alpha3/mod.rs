/// API version v1alpha3 for run.tanzu.vmware.com CRDs

pub mod cluster_bootstrap;
pub mod kapp_controller_config;
pub mod os_image;
pub mod tanzu_kubernetes_release;

pub use cluster_bootstrap::{
    ClusterBootstrap, ClusterBootstrapPackage, ClusterBootstrapStatus, ClusterBootstrapTemplate,
    ClusterBootstrapTemplateSpec, ValuesFrom,
};
pub use kapp_controller_config::{
    KappConfig, KappController, KappControllerConfig, KappControllerConfigSpec,
    KappControllerConfigStatus, KappDeployment,
};
pub use os_image::{OSImage, OSImageSpec, OSImageStatus, OSInfo, MachineImageInfo};
pub use tanzu_kubernetes_release::{
    ContainerImageInfo, KubernetesSpec, TanzuKubernetesRelease, TanzuKubernetesReleaseSpec,
    TanzuKubernetesReleaseStatus,
};

/// API version for run resources
pub const API_VERSION: &str = "v1alpha3";
