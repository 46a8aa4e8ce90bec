use k8s_openapi::apimachinery::pkg::apis::meta::v1::Time;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Observation of a resource's state, in the cluster-api condition shape
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// Type of condition in CamelCase
    #[serde(rename = "type")]
    pub condition_type: String,

    /// Status: "True", "False", "Unknown"
    pub status: String,

    /// Severity when status is "False": "Error", "Warning", "Info"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// Last time the condition transitioned from one status to another
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_transition_time: Option<Time>,

    /// Reason for the condition's last transition
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Human-readable message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Condition {
    pub fn is_true(&self) -> bool {
        self.status == "True"
    }
}

/// Find a condition by type
pub fn find<'a>(conditions: &'a [Condition], condition_type: &str) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.condition_type == condition_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_condition_wire_names() {
        let condition = Condition {
            condition_type: "Ready".to_string(),
            status: "True".to_string(),
            last_transition_time: Some(Time(Utc.with_ymd_and_hms(2022, 3, 1, 12, 0, 0).unwrap())),
            ..Default::default()
        };

        let value = serde_json::to_value(&condition).unwrap();
        assert_eq!(value["type"], "Ready");
        assert_eq!(value["lastTransitionTime"], "2022-03-01T12:00:00Z");
        assert!(value.get("severity").is_none());
    }

    #[test]
    fn test_find_condition() {
        let conditions = vec![
            Condition {
                condition_type: "Ready".to_string(),
                status: "False".to_string(),
                ..Default::default()
            },
            Condition {
                condition_type: "ValidTKR".to_string(),
                status: "True".to_string(),
                ..Default::default()
            },
        ];

        assert!(!find(&conditions, "Ready").unwrap().is_true());
        assert!(find(&conditions, "ValidTKR").unwrap().is_true());
        assert!(find(&conditions, "Missing").is_none());
    }
}
