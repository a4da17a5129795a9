use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;

/// Key prefix under which booking records are stored in the KV store.
/// The full key (prefix included) doubles as the public booking id.
pub const BOOKING_KEY_PREFIX: &str = "booking:";

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    #[default]
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Completed => "completed",
            BookingStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

/// A consultation request submitted through the public booking form.
///
/// Field names serialize in camelCase because the SPA consumes the records
/// verbatim. `date` is the requested consultation date carried as the
/// ISO-8601 string the client sent; presence is the only guarantee.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub project_type: String,
    pub budget: String,
    pub message: String,
    pub date: String,
    pub created_at: DateTime<Utc>,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Submission payload: no id/createdAt/status, those are server-generated.
/// Optional contact details are normalized to empty strings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub project_type: String,
    #[serde(default)]
    pub budget: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub date: String,
}

impl BookingInput {
    /// Required-field presence check; reports every missing field at once.
    pub fn validate(&self) -> Result<(), ModelError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.email.trim().is_empty() {
            missing.push("email");
        }
        if self.message.trim().is_empty() {
            missing.push("message");
        }
        if self.date.trim().is_empty() {
            missing.push("date");
        }
        if !missing.is_empty() {
            return Err(ModelError::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}
