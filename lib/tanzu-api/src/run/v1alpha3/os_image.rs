use kube::CustomResource;
use schemars::gen::SchemaGenerator;
use schemars::schema::{InstanceType, Schema, SchemaObject};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Condition;

/// OSImage describes a machine image usable with a TanzuKubernetesRelease
#[derive(CustomResource, Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[kube(
    group = "run.tanzu.vmware.com",
    version = "v1alpha3",
    kind = "OSImage",
    plural = "osimages",
    derive = "Default",
    derive = "PartialEq",
    status = "OSImageStatus",
    printcolumn = r#"{"name":"K8s Version","type":"string","jsonPath":".spec.kubernetesVersion"}"#,
    printcolumn = r#"{"name":"OS Name","type":"string","jsonPath":".spec.os.name"}"#,
)]
#[serde(rename_all = "camelCase")]
pub struct OSImageSpec {
    pub kubernetes_version: String,

    pub os: OSInfo,

    pub image: MachineImageInfo,
}

/// Operating system of an image
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct OSInfo {
    /// OS family, e.g. "linux"
    #[serde(rename = "type")]
    pub os_type: String,
    pub name: String,
    pub version: String,
    pub arch: String,
}

/// Infrastructure specific reference to the machine image
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct MachineImageInfo {
    /// Image kind, e.g. "ami", "ova", "azure"
    #[serde(rename = "type")]
    pub image_type: String,

    /// Provider specific fields locating the image
    #[serde(default, rename = "ref")]
    #[schemars(schema_with = "preserve_unknown_fields")]
    pub reference: Map<String, Value>,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OSImageStatus {
    #[serde(default)]
    pub conditions: Vec<Condition>,
}

fn preserve_unknown_fields(_: &mut SchemaGenerator) -> Schema {
    let mut schema = SchemaObject {
        instance_type: Some(InstanceType::Object.into()),
        ..Default::default()
    };
    schema
        .extensions
        .insert("x-kubernetes-preserve-unknown-fields".to_string(), Value::Bool(true));
    Schema::Object(schema)
}
