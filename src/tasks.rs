//! Owner-scoped task operations.
//!
//! Every statement filters on the caller's [`UserId`]. A task belonging to
//! another account is indistinguishable from a task that does not exist:
//! mutations against it affect zero rows.

use crate::error::Result;
use crate::models::{Task, TaskId, UserId};
use crate::store::SqliteStore;
use rusqlite::params;

/// Trait for task storage operations.
///
/// All methods return a `Result` and may fail with database errors.
#[allow(clippy::missing_errors_doc)]
pub trait TaskService {
    /// Insert a new open task. The title is stored verbatim.
    fn add_task(&self, owner: UserId, title: &str) -> Result<TaskId>;

    /// All tasks of `owner`, in insertion order.
    fn list_tasks(&self, owner: UserId) -> Result<Vec<Task>>;

    /// Mark a task complete. Returns the number of rows affected.
    fn complete_task(&self, owner: UserId, task_id: TaskId) -> Result<usize>;

    /// Remove a task. Returns the number of rows affected.
    fn delete_task(&self, owner: UserId, task_id: TaskId) -> Result<usize>;
}

impl SqliteStore {
    /// Parse a task from a row.
    fn parse_task(row: &rusqlite::Row) -> rusqlite::Result<Task> {
        Ok(Task {
            id: TaskId::new(row.get(0)?),
            title: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
            completed: row.get::<_, Option<i64>>(2)?.unwrap_or(0) != 0,
        })
    }
}

impl TaskService for SqliteStore {
    fn add_task(&self, owner: UserId, title: &str) -> Result<TaskId> {
        self.with_transaction(|conn| {
            conn.execute(
                "INSERT INTO tasks (user_id, title) VALUES (?1, ?2)",
                params![owner.get(), title],
            )?;
            Ok(TaskId::new(conn.last_insert_rowid()))
        })
    }

    fn list_tasks(&self, owner: UserId) -> Result<Vec<Task>> {
        self.with_transaction(|conn| {
            let mut stmt = conn.prepare(
                "SELECT id, title, completed FROM tasks WHERE user_id = ?1 ORDER BY id ASC",
            )?;
            let tasks = stmt
                .query_map(params![owner.get()], Self::parse_task)?
                .collect::<rusqlite::Result<_>>()?;
            Ok(tasks)
        })
    }

    fn complete_task(&self, owner: UserId, task_id: TaskId) -> Result<usize> {
        self.with_transaction(|conn| {
            Ok(conn.execute(
                "UPDATE tasks SET completed = 1 WHERE id = ?1 AND user_id = ?2",
                params![task_id.get(), owner.get()],
            )?)
        })
    }

    fn delete_task(&self, owner: UserId, task_id: TaskId) -> Result<usize> {
        self.with_transaction(|conn| {
            Ok(conn.execute(
                "DELETE FROM tasks WHERE id = ?1 AND user_id = ?2",
                params![task_id.get(), owner.get()],
            )?)
        })
    }
}
