//! Testing utilities and mock implementations.
//!
//! These types are provided for use in tests. They may appear unused in
//! the library itself but are consumed by unit tests.

#![allow(dead_code)]

use crate::accounts::AccountService;
use crate::error::{Error, Result};
use crate::models::{Task, TaskId, UserId};
use crate::tasks::TaskService;
use std::cell::RefCell;

/// A backend whose every operation fails with a storage error.
///
/// Records the operations it was asked to perform.
#[derive(Debug, Default)]
pub struct FailingBackend {
    calls: RefCell<Vec<&'static str>>,
}

impl FailingBackend {
    /// Create a new failing backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the operations called so far, in order.
    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.borrow().clone()
    }

    fn fail<T>(&self, operation: &'static str) -> Result<T> {
        self.calls.borrow_mut().push(operation);
        Err(Error::Database(rusqlite::Error::SqliteFailure(
            rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_IOERR),
            Some("disk I/O error".to_string()),
        )))
    }
}

impl AccountService for FailingBackend {
    fn register(&self, _username: &str, _password: &str) -> Result<UserId> {
        self.fail("register")
    }

    fn authenticate(&self, _username: &str, _password: &str) -> Result<Option<UserId>> {
        self.fail("authenticate")
    }
}

impl TaskService for FailingBackend {
    fn add_task(&self, _owner: UserId, _title: &str) -> Result<TaskId> {
        self.fail("add_task")
    }

    fn list_tasks(&self, _owner: UserId) -> Result<Vec<Task>> {
        self.fail("list_tasks")
    }

    fn complete_task(&self, _owner: UserId, _task_id: TaskId) -> Result<usize> {
        self.fail("complete_task")
    }

    fn delete_task(&self, _owner: UserId, _task_id: TaskId) -> Result<usize> {
        self.fail("delete_task")
    }
}

/// A backend that authenticates one fixed account and then fails every
/// task operation. Used to reach the task menu without a working store.
#[derive(Debug, Default)]
pub struct FailingTasksBackend {
    inner: FailingBackend,
}

impl FailingTasksBackend {
    /// The id handed out by `authenticate`.
    pub const USER: UserId = UserId::new(1);

    /// Create a new backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Names of the task operations called so far.
    pub fn calls(&self) -> Vec<&'static str> {
        self.inner.calls()
    }
}

impl AccountService for FailingTasksBackend {
    fn register(&self, username: &str, password: &str) -> Result<UserId> {
        self.inner.register(username, password)
    }

    fn authenticate(&self, _username: &str, _password: &str) -> Result<Option<UserId>> {
        Ok(Some(Self::USER))
    }
}

impl TaskService for FailingTasksBackend {
    fn add_task(&self, owner: UserId, title: &str) -> Result<TaskId> {
        self.inner.add_task(owner, title)
    }

    fn list_tasks(&self, owner: UserId) -> Result<Vec<Task>> {
        self.inner.list_tasks(owner)
    }

    fn complete_task(&self, owner: UserId, task_id: TaskId) -> Result<usize> {
        self.inner.complete_task(owner, task_id)
    }

    fn delete_task(&self, owner: UserId, task_id: TaskId) -> Result<usize> {
        self.inner.delete_task(owner, task_id)
    }
}
