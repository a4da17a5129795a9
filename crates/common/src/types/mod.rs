use chrono::{DateTime, Utc};
use serde::Serialize;

/// Liveness probe body: `{"status":"ok","timestamp":"<rfc3339>"}`.
#[derive(Serialize, Debug)]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Utc>,
}
