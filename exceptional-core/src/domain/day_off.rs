//! Day-off request domain model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Lifecycle state of a day-off request
///
/// A request starts pending. A superuser moves it to approved or refused;
/// the owner may delete it while it is still pending, and a superuser may
/// delete it once approved. Refused and deleted requests are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DayOffStatus {
    Pending,
    Approved,
    Refused,
}

impl DayOffStatus {
    /// True while the request occupies a slot of the allowance
    pub fn counts_against_quota(self) -> bool {
        matches!(self, DayOffStatus::Pending | DayOffStatus::Approved)
    }
}

impl fmt::Display for DayOffStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DayOffStatus::Pending => "pending",
            DayOffStatus::Approved => "approved",
            DayOffStatus::Refused => "refused",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for DayOffStatus {
    type Err = String;

    /// Only the canonical spellings are accepted. Some older backends sent
    /// "accepted" for approved requests; that spelling is rejected so a
    /// contract drift surfaces as a decode error instead of silently
    /// mapping to the wrong state.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(DayOffStatus::Pending),
            "approved" => Ok(DayOffStatus::Approved),
            "refused" => Ok(DayOffStatus::Refused),
            other => Err(format!("invalid day-off status: {}", other)),
        }
    }
}

/// An employee's claim on one calendar day as an exceptional day off
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayOffRequest {
    /// Server-assigned opaque identifier
    pub id: String,
    pub user_id: String,
    /// Day precision; the wire may carry a full datetime but the client
    /// truncates to the calendar day
    pub date: NaiveDate,
    pub status: DayOffStatus,
    pub created_at: DateTime<Utc>,
}

impl DayOffRequest {
    /// Create a new pending request
    pub fn new(id: impl Into<String>, user_id: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: id.into(),
            user_id: user_id.into(),
            date,
            status: DayOffStatus::Pending,
            created_at: Utc::now(),
        }
    }
}
