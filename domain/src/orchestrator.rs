//! Drives a full run: list projects, then review (and optionally mute) each
//! project followed by all of its workspaces.
//!
//! Projects are handled one after another in listing order. The workspaces of a
//! project are reviewed concurrently, one task each, and all of them are joined
//! before the next project starts. When a workspace task fails, its siblings
//! still run to completion and the first failure is returned afterwards.

use crate::error::{DomainErrorKind, Error, InternalErrorKind};
use crate::gateway::zube::ApiClient;
use crate::notification_preference::{NotificationPreference, PreferenceKind};
use crate::project::{ObjectKind, Project};
use log::*;
use service::config::Config;
use std::fmt;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Which preference collections to switch off.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunOptions {
    pub disable_email: bool,
    pub disable_in_app: bool,
}

impl From<&Config> for RunOptions {
    fn from(config: &Config) -> Self {
        Self {
            disable_email: config.disable_email,
            disable_in_app: config.disable_in_app,
        }
    }
}

/// What a run touched.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunReport {
    pub projects: usize,
    pub workspaces: usize,
    pub preferences_disabled: usize,
}

/// One line of human-readable output for a project or workspace.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub kind: ObjectKind,
    pub name: String,
    pub email: String,
    pub subscription_level: String,
    /// Only projects have a triage setting.
    pub triage_level: Option<String>,
    pub email_enabled: usize,
    pub in_app_enabled: usize,
}

impl Summary {
    pub fn notifying(&self) -> usize {
        self.email_enabled + self.in_app_enabled
    }
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.kind {
            ObjectKind::Project => write!(
                f,
                "*** {} email: {} project: {} triage: {}, notifying: {} (email: {} in-app: {})",
                self.name,
                self.email,
                self.subscription_level,
                self.triage_level.as_deref().unwrap_or("-"),
                self.notifying(),
                self.email_enabled,
                self.in_app_enabled,
            ),
            ObjectKind::Workspace => write!(
                f,
                "\t{} email: {} subscription: {}, notifying: {} (email: {}, in-app: {})",
                self.name,
                self.email,
                self.subscription_level,
                self.notifying(),
                self.email_enabled,
                self.in_app_enabled,
            ),
        }
    }
}

pub async fn run(client: Arc<ApiClient>, options: RunOptions) -> Result<RunReport, Error> {
    let projects = client.list_projects().await?;
    info!("Found {} projects", projects.len());

    let mut report = RunReport::default();
    for project in &projects {
        let disabled = review(&client, ObjectKind::Project, project.id, &project.name, options).await?;
        report.projects += 1;
        report.preferences_disabled += disabled;

        let disabled = review_workspaces(&client, project, options).await?;
        report.workspaces += project.workspaces.len();
        report.preferences_disabled += disabled;
    }

    Ok(report)
}

/// Review every workspace of `project` concurrently and join them all.
async fn review_workspaces(
    client: &Arc<ApiClient>,
    project: &Project,
    options: RunOptions,
) -> Result<usize, Error> {
    let mut tasks = JoinSet::new();
    for workspace in &project.workspaces {
        let client = Arc::clone(client);
        let (id, name) = (workspace.id, workspace.name.clone());
        tasks.spawn(async move { review(&client, ObjectKind::Workspace, id, &name, options).await });
    }

    let mut disabled = 0;
    let mut first_error = None;
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(count)) => disabled += count,
            Ok(Err(err)) => {
                error!("Workspace review in project {} failed: {err}", project.name);
                first_error.get_or_insert(err);
            }
            Err(join_err) => {
                error!("Workspace task in project {} aborted: {join_err}", project.name);
                first_error.get_or_insert(Error {
                    source: Some(join_err.to_string().into()),
                    error_kind: DomainErrorKind::Internal(InternalErrorKind::Task),
                });
            }
        }
    }

    match first_error {
        Some(err) => Err(err),
        None => Ok(disabled),
    }
}

/// Fetch preferences and settings for one object, print its summary and apply
/// the requested disables. Returns how many writes were made.
async fn review(
    client: &ApiClient,
    kind: ObjectKind,
    object_id: i64,
    name: &str,
    options: RunOptions,
) -> Result<usize, Error> {
    let email = client
        .notification_preferences(kind, object_id, PreferenceKind::Email)
        .await?;
    let in_app = client
        .notification_preferences(kind, object_id, PreferenceKind::InApp)
        .await?;
    let setting = client.user_settings(kind, object_id, false).await?;
    let triage = match kind {
        ObjectKind::Project => Some(client.user_settings(kind, object_id, true).await?),
        ObjectKind::Workspace => None,
    };

    let summary = Summary {
        kind,
        name: name.to_string(),
        email: email.email(),
        subscription_level: setting.subscription_level,
        triage_level: triage.map(|t| t.subscription_level),
        email_enabled: email.enabled_channels().len(),
        in_app_enabled: in_app.enabled_channels().len(),
    };
    match kind {
        ObjectKind::Project => println!("\n{summary}"),
        ObjectKind::Workspace => println!("{summary}"),
    }

    let mut disabled = 0;
    if options.disable_email {
        disable(client, kind, object_id, PreferenceKind::Email, email).await?;
        disabled += 1;
    }
    if options.disable_in_app {
        disable(client, kind, object_id, PreferenceKind::InApp, in_app).await?;
        disabled += 1;
    }

    Ok(disabled)
}

async fn disable(
    client: &ApiClient,
    kind: ObjectKind,
    object_id: i64,
    preference: PreferenceKind,
    mut prefs: NotificationPreference,
) -> Result<(), Error> {
    let preference_id = prefs.id().ok_or_else(|| {
        warn!("{kind} {object_id} {preference} preferences have no usable id");
        Error {
            source: None,
            error_kind: DomainErrorKind::Internal(InternalErrorKind::Other(format!(
                "{kind} {object_id} {preference} preferences have no id"
            ))),
        }
    })?;

    let flipped = prefs.disable_all();
    debug!("Switching off {flipped} {preference} channels on {kind} {object_id}");
    client
        .disable_notifications(kind, object_id, preference_id, preference, &prefs)
        .await
}
