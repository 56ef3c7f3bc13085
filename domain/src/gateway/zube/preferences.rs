use super::{ApiClient, Page};
use crate::error::{DomainErrorKind, Error, ExternalErrorKind};
use crate::notification_preference::{NotificationPreference, PreferenceKind};
use crate::project::ObjectKind;
use log::*;
use reqwest::Method;
use serde_json::Value;

impl ApiClient {
    /// The caller's email or in-app notification preferences for one object.
    pub async fn notification_preferences(
        &self,
        kind: ObjectKind,
        object_id: i64,
        preference: PreferenceKind,
    ) -> Result<NotificationPreference, Error> {
        let operation = format!("{kind} {preference} preferences");
        let page: Page<NotificationPreference> = self
            .get(
                &format!("{}/{}/{}", kind.as_path(), object_id, preference.as_path()),
                &operation,
            )
            .await?;
        page.into_single(&operation)
    }

    /// Write a prepared preference map back to its record.
    ///
    /// A successful status whose body carries an `error` key is still a failure.
    pub async fn disable_notifications(
        &self,
        kind: ObjectKind,
        object_id: i64,
        preference_id: i64,
        preference: PreferenceKind,
        body: &NotificationPreference,
    ) -> Result<(), Error> {
        let path = format!(
            "{}/{}/{}/{}",
            kind.as_path(),
            object_id,
            preference.as_path(),
            preference_id
        );
        let request = self.request(Method::PUT, &path, Some(serde_json::to_vec(body)?))?;
        let url = request.url().to_string();

        let operation = format!("disable {kind} {preference} notifications");
        let response = self.dispatch(request, &operation).await?;
        let decoded: Value = Self::decode(response, &operation).await?;

        if let Some(error) = decoded.as_object().and_then(|object| object.get("error")) {
            let message = match error {
                Value::String(message) => message.clone(),
                other => other.to_string(),
            };
            warn!("Zube API rejected {url}: {message}");
            return Err(Error {
                source: None,
                error_kind: DomainErrorKind::External(ExternalErrorKind::Api(format!(
                    "error disabling notifications for {url}: {message}"
                ))),
            });
        }

        info!("Disabled {preference} notifications for {kind} {object_id}");
        Ok(())
    }
}
