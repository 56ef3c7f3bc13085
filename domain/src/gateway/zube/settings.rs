use super::{ApiClient, Page};
use crate::error::Error;
use crate::project::ObjectKind;
use crate::user_setting::UserSetting;

impl ApiClient {
    /// The caller's subscription setting on a project or workspace.
    ///
    /// With `triage` set, the project's triage setting is read instead.
    pub async fn user_settings(
        &self,
        kind: ObjectKind,
        object_id: i64,
        triage: bool,
    ) -> Result<UserSetting, Error> {
        let (resource, operation) = if triage {
            ("triage_user_settings", format!("{kind} triage user settings"))
        } else {
            ("user_settings", format!("{kind} user settings"))
        };

        let page: Page<UserSetting> = self
            .get(
                &format!("{}/{}/{}", kind.as_path(), object_id, resource),
                &operation,
            )
            .await?;
        page.into_single(&operation)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::*;
    use crate::error::{DomainErrorKind, InternalErrorKind};
    use crate::project::ObjectKind;
    use serde_json::json;

    #[tokio::test]
    async fn test_triage_flag_selects_path() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token_exchange(&mut server).await;
        let plain = server
            .mock("GET", "/projects/1/user_settings")
            .with_status(200)
            .with_body(
                json!({"data": [{"id": 1, "project_id": 1, "user_id": 2, "subscription_level": "participating"}]})
                    .to_string(),
            )
            .create_async()
            .await;
        let triage = server
            .mock("GET", "/projects/1/triage_user_settings")
            .with_status(200)
            .with_body(
                json!({"data": [{"id": 2, "project_id": 1, "user_id": 2, "subscription_level": "watching"}]})
                    .to_string(),
            )
            .create_async()
            .await;

        let client = api_client(&server.url());
        let setting = client.user_settings(ObjectKind::Project, 1, false).await.unwrap();
        let triage_setting = client.user_settings(ObjectKind::Project, 1, true).await.unwrap();

        assert_eq!(setting.subscription_level, "participating");
        assert_eq!(triage_setting.subscription_level, "watching");
        plain.assert_async().await;
        triage.assert_async().await;
    }

    #[tokio::test]
    async fn test_multiple_settings_use_first() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token_exchange(&mut server).await;
        let _mock = server
            .mock("GET", "/workspaces/10/user_settings")
            .with_status(200)
            .with_body(
                json!({"data": [
                    {"id": 1, "workspace_id": 10, "subscription_level": "all"},
                    {"id": 2, "workspace_id": 10, "subscription_level": "none"}
                ]})
                .to_string(),
            )
            .create_async()
            .await;

        let setting = api_client(&server.url())
            .user_settings(ObjectKind::Workspace, 10, false)
            .await
            .unwrap();

        assert_eq!(setting.id, 1);
        assert_eq!(setting.parent_id, 10);
    }

    #[tokio::test]
    async fn test_empty_settings_is_out_of_range() {
        let mut server = mockito::Server::new_async().await;
        let _token = mock_token_exchange(&mut server).await;
        let _mock = server
            .mock("GET", "/workspaces/10/user_settings")
            .with_status(200)
            .with_body(r#"{"pagination":{"total_pages":1},"data":[]}"#)
            .create_async()
            .await;

        let err = api_client(&server.url())
            .user_settings(ObjectKind::Workspace, 10, false)
            .await
            .unwrap_err();

        assert!(matches!(
            err.error_kind,
            DomainErrorKind::Internal(InternalErrorKind::OutOfRange(_))
        ));
    }
}
