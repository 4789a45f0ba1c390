use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One persisted contact-form record. Never updated after insert.
#[derive(Debug, Clone, sqlx::FromRow, Serialize, Deserialize)]
pub struct Contact {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub message: String,
    pub created_at: DateTime<Utc>,
}
