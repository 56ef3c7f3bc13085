//! Zube notification review and muting.
//!
//! The `gateway::zube` module talks to the Zube REST API; `orchestrator` drives a
//! full run across every project and workspace visible to the API key.
pub use gateway::zube::ApiClient;
pub use notification_preference::{NotificationPreference, PreferenceKind};
pub use project::{ObjectKind, Project, Workspace};
pub use user_setting::UserSetting;

pub mod error;
pub mod gateway;
pub mod notification_preference;
pub mod orchestrator;
pub mod project;
pub mod user_setting;
