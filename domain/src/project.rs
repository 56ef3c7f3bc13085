//! Projects and the workspaces nested inside them, as returned by `GET projects`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// The two kinds of object that carry notification preferences and settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Project,
    Workspace,
}

impl ObjectKind {
    /// The collection segment used in API paths.
    pub fn as_path(&self) -> &'static str {
        match self {
            ObjectKind::Project => "projects",
            ObjectKind::Workspace => "workspaces",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ObjectKind::Project => write!(f, "project"),
            ObjectKind::Workspace => write!(f, "workspace"),
        }
    }
}

/// Decode an explicit `null` the same as a missing key.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: i64,
    pub account_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub private: bool,
    #[serde(default)]
    pub priority_format: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub triage: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvotes: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sources: Vec<Source>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub workspaces: Vec<Workspace>,
}

/// A source repository linked to a project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Source {
    pub id: i64,
    #[serde(default)]
    pub github_owner_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub full_name: String,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub html_url: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub private: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub webhook_verified_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub initial_import_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workspace {
    pub id: i64,
    pub project_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub private: bool,
    #[serde(default)]
    pub priority_format: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub priority: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub points: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub upvotes: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub archive_merged_prs: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub use_category_labels: bool,
}
