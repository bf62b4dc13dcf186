use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub data_as_of: DateTime<Utc>,
    pub confidence: f64,
    pub vehicle: VehicleInfo,
    pub service_events: Vec<ServiceEvent>,
    pub current_users: Vec<CurrentUser>,
    pub warnings: Vec<String>,
    pub warning_details: Vec<WarningDetail>,
}

/// Vehicle identity. Everything except the masked plate is optional so the
/// same shape can describe a plate we know nothing about.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VehicleInfo {
    pub plate_masked: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuel: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceEvent {
    pub practice_number: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub km: u64,
    #[serde(rename = "where")]
    pub location: String,
    pub when: NaiveDate,
    pub backoffice_id: String,
    pub technician_id: String,
    pub parts: Vec<PartUsed>,
    pub parts_total_cost: Decimal,
    pub labor: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartUsed {
    pub code: String,
    pub description: String,
    pub cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_unit: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub since: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarningDetail {
    pub code: String,
    pub message: String,
    pub severity: Severity,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Medium,
    High,
}

impl Severity {
    /// How much a warning of this severity lowers the snapshot confidence.
    pub fn confidence_penalty(self) -> f64 {
        match self {
            Severity::High => 0.25,
            Severity::Medium => 0.12,
            Severity::Info => 0.05,
        }
    }
}
