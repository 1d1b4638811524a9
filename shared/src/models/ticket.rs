//! Ticket Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticket priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

/// Contract situation of the call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CallType {
    UnderMaintenanceContract,
    NotUnderContract,
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::Low => write!(f, "LOW"),
            Priority::Medium => write!(f, "MEDIUM"),
            Priority::High => write!(f, "HIGH"),
            Priority::Critical => write!(f, "CRITICAL"),
        }
    }
}

/// Create ticket payload
///
/// `zone_id` is always a concrete zone; the all-zones filter is resolved
/// before this is built.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub call_type: CallType,
    pub customer_id: i64,
    pub contact_id: i64,
    pub asset_id: i64,
    pub zone_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub related_machine_ids: Option<Vec<String>>,
}

/// Created ticket as returned by the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ticket {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub zone_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Split a comma separated machine id field into trimmed ids.
///
/// Returns `None` when nothing is left after trimming so the field can be
/// omitted from the payload.
pub fn parse_related_machine_ids(raw: Option<&str>) -> Option<Vec<String>> {
    let ids: Vec<String> = raw?
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if ids.is_empty() { None } else { Some(ids) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_related_machine_ids() {
        assert_eq!(
            parse_related_machine_ids(Some(" M-1, M-2 ,,M-3 ")),
            Some(vec!["M-1".to_string(), "M-2".to_string(), "M-3".to_string()])
        );
        assert_eq!(parse_related_machine_ids(Some("  ")), None);
        assert_eq!(parse_related_machine_ids(Some(" , ")), None);
        assert_eq!(parse_related_machine_ids(None), None);
    }

    #[test]
    fn test_create_ticket_request_serialize() {
        let req = CreateTicketRequest {
            title: "Printer jam".into(),
            description: "Paper jams on every job".into(),
            priority: Priority::High,
            call_type: CallType::UnderMaintenanceContract,
            customer_id: 10,
            contact_id: 100,
            asset_id: 55,
            zone_id: 7,
            error_details: None,
            related_machine_ids: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert_eq!(json["zoneId"], 7);
        assert_eq!(json["priority"], "HIGH");
        assert_eq!(json["callType"], "UNDER_MAINTENANCE_CONTRACT");
        assert!(json.get("errorDetails").is_none());
        assert!(json.get("relatedMachineIds").is_none());
    }

    #[test]
    fn test_ticket_deserialize_minimal() {
        let ticket: Ticket = serde_json::from_str(r#"{"id":42,"status":"OPEN"}"#).unwrap();
        assert_eq!(ticket.id, 42);
        assert_eq!(ticket.status.as_deref(), Some("OPEN"));
        assert!(ticket.created_at.is_none());
    }
}
