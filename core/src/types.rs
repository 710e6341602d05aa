//! Domain DTOs for the work-order API.
//!
//! # Design
//! These types mirror the server's JSON schema but are defined independently
//! of the mock-server crate. Integration tests catch any schema drift between
//! the two. Field names follow the server's camelCase wire format; the
//! external reference keeps its historical `libre311ServiceRequestId` name on
//! the wire.

use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumString};

/// Lifecycle state of a work order. Transition rules live on the server.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Pending,
    Assigned,
    InProgress,
    Completed,
    Cancelled,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderPriority {
    Low,
    Medium,
    High,
    Urgent,
}

/// A single work order returned by the API.
///
/// `id`, `created_at` and `updated_at` are assigned by the server and never
/// written by the client.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WorkOrder {
    pub id: i64,
    #[serde(rename = "libre311ServiceRequestId", alias = "externalReferenceId")]
    pub external_reference_id: String,
    pub title: String,
    /// Nullable on the server; a missing value reads as empty.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    pub status: WorkOrderStatus,
    pub assigned_to: Option<String>,
    pub priority: WorkOrderPriority,
    pub created_at: String,
    pub updated_at: String,
}

/// Request payload for creating a new work order. Status and assignment are
/// chosen by the server.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateWorkOrder {
    #[serde(rename = "libre311ServiceRequestId", alias = "externalReferenceId")]
    pub external_reference_id: String,
    pub title: String,
    pub description: String,
    pub priority: WorkOrderPriority,
}

/// Request payload for updating an existing work order. Only the fields
/// present in the JSON are applied; omitted fields remain unchanged on the
/// server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkOrder {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<WorkOrderStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<WorkOrderPriority>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_uses_screaming_snake_case_on_the_wire() {
        let json = serde_json::to_string(&WorkOrderStatus::InProgress).unwrap();
        assert_eq!(json, r#""IN_PROGRESS""#);
        assert_eq!(WorkOrderStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(
            "CANCELLED".parse::<WorkOrderStatus>().unwrap(),
            WorkOrderStatus::Cancelled
        );
    }

    #[test]
    fn priority_rejects_unknown_values() {
        assert!(serde_json::from_str::<WorkOrderPriority>(r#""CRITICAL""#).is_err());
        assert!("critical".parse::<WorkOrderPriority>().is_err());
    }

    #[test]
    fn work_order_reads_server_json() {
        let json = r#"{
            "id": 7,
            "libre311ServiceRequestId": "LIBRE-7",
            "title": "Streetlight out",
            "description": null,
            "status": "ASSIGNED",
            "assignedTo": "alice",
            "priority": "URGENT",
            "createdAt": "2024-03-01T08:00:00",
            "updatedAt": "2024-03-01T09:30:00"
        }"#;
        let order: WorkOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.id, 7);
        assert_eq!(order.external_reference_id, "LIBRE-7");
        assert_eq!(order.description, "");
        assert_eq!(order.status, WorkOrderStatus::Assigned);
        assert_eq!(order.assigned_to.as_deref(), Some("alice"));
        assert_eq!(order.priority, WorkOrderPriority::Urgent);
    }

    #[test]
    fn work_order_with_missing_required_field_is_rejected() {
        let json = r#"{"id": 1, "title": "No status"}"#;
        assert!(serde_json::from_str::<WorkOrder>(json).is_err());
    }

    #[test]
    fn create_work_order_uses_wire_names() {
        let input = CreateWorkOrder {
            external_reference_id: "LIBRE-1".to_string(),
            title: "Pothole".to_string(),
            description: "Large pothole on Main St".to_string(),
            priority: WorkOrderPriority::High,
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json["libre311ServiceRequestId"], "LIBRE-1");
        assert_eq!(json["priority"], "HIGH");
        assert!(json.get("status").is_none());
        assert!(json.get("assignedTo").is_none());
    }

    #[test]
    fn create_work_order_accepts_external_reference_alias() {
        let input: CreateWorkOrder = serde_json::from_str(
            r#"{"externalReferenceId":"X-1","title":"t","description":"d","priority":"LOW"}"#,
        )
        .unwrap();
        assert_eq!(input.external_reference_id, "X-1");
    }

    #[test]
    fn update_work_order_omits_absent_fields() {
        let input = UpdateWorkOrder {
            status: Some(WorkOrderStatus::Completed),
            assigned_to: Some("bob".to_string()),
            ..Default::default()
        };
        let json = serde_json::to_value(&input).unwrap();
        assert_eq!(json, serde_json::json!({"status": "COMPLETED", "assignedTo": "bob"}));
    }
}
