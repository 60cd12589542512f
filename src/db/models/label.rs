//! Label data models.
//!
//! A label belongs to exactly one organization and can be linked to any
//! number of discussion threads through `labels_objects`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A label owned by an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Label {
    pub id: i64,
    pub owner_org_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating a label
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLabel {
    pub owner_org_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub color: String,
}

/// Fields to change on an existing label. `None` leaves the column as is.
///
/// No owner field: a label stays with the organization it was created in.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
}

/// One thread-label link row
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LabelObject {
    pub label_id: i64,
    pub thread_id: i64,
}
