//! Model types shared by the account and task services.

use crate::error::Error;
use std::fmt;
use std::str::FromStr;

/// Identity of a registered account.
///
/// Only the account service can produce a `UserId` (from a successful
/// registration or authentication), so every owner-scoped task operation
/// is guaranteed to receive an id the store itself handed out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(i64);

impl UserId {
    pub(crate) const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw `users.id` value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identity of a task row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(i64);

impl TaskId {
    /// Wrap a raw `tasks.id` value.
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The raw `tasks.id` value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl FromStr for TaskId {
    type Err = Error;

    /// Parse a task id typed at a prompt. Surrounding whitespace is ignored;
    /// anything that is not a positive integer is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.parse::<i64>() {
            Ok(id) if id > 0 => Ok(Self(id)),
            _ => Err(Error::InvalidInput(format!("not a task id: '{trimmed}'"))),
        }
    }
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Completion state of a task as shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskStatus {
    /// Not yet completed.
    Open,
    /// Marked complete.
    Done,
}

impl TaskStatus {
    /// Get the display label of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Done => "DONE",
        }
    }
}

impl fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A task owned by one account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    /// Task id.
    pub id: TaskId,
    /// Title, stored verbatim.
    pub title: String,
    /// Whether the task has been completed.
    pub completed: bool,
}

impl Task {
    /// The user-facing status of this task.
    #[must_use]
    pub const fn status(&self) -> TaskStatus {
        if self.completed {
            TaskStatus::Done
        } else {
            TaskStatus::Open
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} [{}]", self.id, self.title, self.status())
    }
}
