//! Discussion thread data models.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A discussion thread; the only labelable kind so far
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thread {
    pub id: i64,
    pub title: String,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}
