//! # `todo_accounts`
//!
//! A multi-account to-do list manager backed by a local `SQLite` file.
//!
//! Each account owns a private set of tasks. The [`accounts::AccountService`]
//! and [`tasks::TaskService`] traits are implemented by
//! [`store::SqliteStore`], and [`menu::run_menu`] drives them from an
//! interactive text menu.

pub mod accounts;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod error;
pub mod event_log;
pub mod hasher;
pub mod menu;
pub mod models;
pub mod store;
pub mod tasks;
#[cfg(test)]
pub(crate) mod testing;

pub use accounts::AccountService;
pub use error::{Error, Result};
pub use models::{Task, TaskId, TaskStatus, UserId};
pub use store::SqliteStore;
pub use tasks::TaskService;

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
