//! Debug event logging.
//!
//! When `debug_logging` is enabled in the config, every account and task
//! operation is appended as a JSONL line to `todo-events.jsonl`. Passwords
//! and digests never appear in the log.
//!
//! Errors are silently ignored; logging should never break an operation.

use crate::config::AppConfig;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Event names written to the log.
pub mod events {
    /// Program started and schema ensured.
    pub const STARTUP: &str = "startup";
    /// Account registered.
    pub const REGISTER: &str = "register";
    /// Registration rejected because the username exists.
    pub const REGISTER_DUPLICATE: &str = "register_duplicate";
    /// Successful login.
    pub const LOGIN: &str = "login";
    /// Failed login (unknown user or wrong password, not distinguished).
    pub const LOGIN_FAILED: &str = "login_failed";
    /// Logout from the task menu.
    pub const LOGOUT: &str = "logout";
    /// Task inserted.
    pub const TASK_ADD: &str = "task_add";
    /// Tasks listed.
    pub const TASK_LIST: &str = "task_list";
    /// Complete issued (affected count in details).
    pub const TASK_COMPLETE: &str = "task_complete";
    /// Delete issued (affected count in details).
    pub const TASK_DELETE: &str = "task_delete";
    /// An operation failed in the store.
    pub const STORAGE_FAULT: &str = "storage_fault";
}

/// Append-only JSONL event sink. Disabled sinks drop every event.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    path: Option<PathBuf>,
}

impl EventLog {
    /// A log that records nothing.
    #[must_use]
    pub const fn disabled() -> Self {
        Self { path: None }
    }

    /// A log writing to the given file.
    #[must_use]
    pub fn to_file(path: impl Into<PathBuf>) -> Self {
        Self { path: Some(path.into()) }
    }

    /// Build the log described by a config, relative to `base_dir`.
    #[must_use]
    pub fn from_config(config: &AppConfig, base_dir: &Path) -> Self {
        if config.debug_logging {
            Self::to_file(config.resolved_event_log_path(base_dir))
        } else {
            Self::disabled()
        }
    }

    /// Record an event with structured details.
    pub fn record(&self, event: &str, details: &serde_json::Value) {
        let Some(path) = &self.path else {
            return;
        };

        if let Some(parent) = path.parent() {
            if std::fs::create_dir_all(parent).is_err() {
                return;
            }
        }

        let entry = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "event": event,
            "details": details,
        });

        let Ok(mut file) = OpenOptions::new().create(true).append(true).open(path) else {
            return;
        };

        let _ = writeln!(file, "{entry}");
    }
}
