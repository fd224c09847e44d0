use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct JobRow {
    pub id: i32,
    pub user_id: String,
    pub company: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub application_date: NaiveDate,
    pub status: Option<String>,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Wire format of `application_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Create/edit form as submitted by the client.
///
/// Text fields are bound loosely so that a malformed value surfaces as a
/// field error instead of a decoding failure.
///
/// `id` and `version` only matter on edit. The owner is never bound from the
/// body; it always comes from the authenticated session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct JobForm {
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub application_date: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub version: Option<i32>,
}

impl From<&JobRow> for JobForm {
    fn from(row: &JobRow) -> Self {
        JobForm {
            id: Some(row.id),
            company: Some(row.company.clone()),
            description: row.description.clone(),
            link: row.link.clone(),
            application_date: Some(row.application_date.format(DATE_FORMAT).to_string()),
            status: row.status.clone(),
            version: Some(row.version),
        }
    }
}

/// Validated, normalised job fields ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct JobInput {
    pub company: String,
    pub description: Option<String>,
    pub link: Option<String>,
    pub application_date: NaiveDate,
    pub status: Option<String>,
}
