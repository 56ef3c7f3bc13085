use crate::project::null_as_default;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's subscription setting on a project or workspace.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSetting {
    pub id: i64,
    /// The owning project or workspace.
    #[serde(
        rename = "project_id",
        alias = "workspace_id",
        default,
        deserialize_with = "null_as_default"
    )]
    pub parent_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub user_id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subscription_level: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decodes_project_setting() {
        let setting: UserSetting = serde_json::from_value(json!({
            "id": 4,
            "project_id": 1,
            "user_id": 77,
            "subscription_level": "participating",
            "created_at": "2021-06-01T00:00:00Z"
        }))
        .unwrap();
        assert_eq!(setting.parent_id, 1);
        assert_eq!(setting.subscription_level, "participating");
    }

    #[test]
    fn test_decodes_workspace_setting() {
        let setting: UserSetting = serde_json::from_value(json!({
            "id": 5,
            "workspace_id": 10,
            "user_id": 77,
            "subscription_level": "watching"
        }))
        .unwrap();
        assert_eq!(setting.parent_id, 10);
        assert!(setting.created_at.is_none());
    }

    #[test]
    fn test_null_subscription_level_decodes_as_empty() {
        let setting: UserSetting = serde_json::from_value(json!({
            "id": 6,
            "project_id": null,
            "user_id": null,
            "subscription_level": null
        }))
        .unwrap();
        assert_eq!(setting.parent_id, 0);
        assert_eq!(setting.subscription_level, "");
    }
}
