//! Interactive menu loop.
//!
//! The loop is a two-state machine. In [`Session::Anonymous`] the user can
//! register, log in or exit; a successful login moves to
//! [`Session::Authenticated`], where the task commands operate on the
//! logged-in account until logout. Input that matches no command re-prompts
//! without changing state, and end of input ends the session like `exit`.
//!
//! The loop is generic over its input, output and backend so it can be
//! driven by scripted input in tests.

mod command;


pub use command::{TaskCommand, TopCommand};

use crate::accounts::AccountService;
use crate::error::{Error, Result};
use crate::event_log::{events, EventLog};
use crate::models::{TaskId, UserId};
use crate::tasks::TaskService;
use serde_json::json;
use std::io::{BufRead, Write};

/// Where the menu loop currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    /// Nobody is logged in.
    Anonymous,
    /// An account is logged in.
    Authenticated(UserId),
}

/// Message shown when a complete/delete matched no owned task.
const NOTHING_CHANGED: &str = "No matching task; nothing changed.";

/// Run the menu until the user exits or input ends.
///
/// Failures of individual operations are reported to `output` and the loop
/// continues.
///
/// # Errors
///
/// Returns an error only if reading `input` or writing `output` fails.
pub fn run_menu<S, R, W>(backend: &S, input: R, output: W, log: &EventLog) -> Result<()>
where
    S: AccountService + TaskService,
    R: BufRead,
    W: Write,
{
    Menu { backend, input, output, log }.run()
}

struct Menu<'a, S, R, W> {
    backend: &'a S,
    input: R,
    output: W,
    log: &'a EventLog,
}

impl<S, R, W> Menu<'_, S, R, W>
where
    S: AccountService + TaskService,
    R: BufRead,
    W: Write,
{
    fn run(&mut self) -> Result<()> {
        let mut session = Session::Anonymous;
        loop {
            let next = match session {
                Session::Anonymous => self.top_step()?,
                Session::Authenticated(user) => self.task_step(user)?,
            };
            match next {
                Some(state) => session = state,
                None => return Ok(()),
            }
        }
    }

    /// One pass of the top menu. Returns the next state, or None to exit.
    fn top_step(&mut self) -> Result<Option<Session>> {
        writeln!(self.output, "\n--- To-Do App ---")?;
        for cmd in TopCommand::ALL {
            writeln!(self.output, "{} - {}", cmd.key(), cmd.label())?;
        }
        let Some(choice) = self.prompt("Choice: ")? else {
            return Ok(None);
        };

        match TopCommand::parse(&choice) {
            Some(TopCommand::Register) => {
                self.register()?;
                Ok(Some(Session::Anonymous))
            }
            Some(TopCommand::Login) => self.login(),
            Some(TopCommand::Exit) => {
                writeln!(self.output, "Goodbye.")?;
                Ok(None)
            }
            None => {
                writeln!(self.output, "Invalid choice.")?;
                Ok(Some(Session::Anonymous))
            }
        }
    }

    /// One pass of the task menu for `user`.
    fn task_step(&mut self, user: UserId) -> Result<Option<Session>> {
        writeln!(self.output, "\n--- Task Menu ---")?;
        for cmd in TaskCommand::ALL {
            writeln!(self.output, "{} - {}", cmd.key(), cmd.label())?;
        }
        let Some(choice) = self.prompt("Choice: ")? else {
            return Ok(None);
        };

        let stay = Some(Session::Authenticated(user));
        match TaskCommand::parse(&choice) {
            Some(TaskCommand::Add) => self.add_task(user).map(|()| stay),
            Some(TaskCommand::View) => self.view_tasks(user).map(|()| stay),
            Some(TaskCommand::Complete) => self.complete_task(user).map(|()| stay),
            Some(TaskCommand::Delete) => self.delete_task(user).map(|()| stay),
            Some(TaskCommand::Logout) => {
                self.log.record(events::LOGOUT, &json!({ "user_id": user.get() }));
                writeln!(self.output, "Logged out.")?;
                Ok(Some(Session::Anonymous))
            }
            None => {
                writeln!(self.output, "Invalid choice.")?;
                Ok(stay)
            }
        }
    }

    fn register(&mut self) -> Result<()> {
        let Some((username, password)) = self.prompt_credentials()? else {
            return Ok(());
        };

        match self.backend.register(&username, &password) {
            Ok(user) => {
                self.log.record(
                    events::REGISTER,
                    &json!({ "user_id": user.get(), "username": username }),
                );
                writeln!(self.output, "Registration successful!")?;
            }
            Err(Error::DuplicateUsername(_)) => {
                self.log.record(events::REGISTER_DUPLICATE, &json!({ "username": username }));
                writeln!(self.output, "This username already exists.")?;
            }
            Err(e) => self.report(&e, "register")?,
        }
        Ok(())
    }

    fn login(&mut self) -> Result<Option<Session>> {
        let Some((username, password)) = self.prompt_credentials()? else {
            return Ok(None);
        };

        match self.backend.authenticate(&username, &password) {
            Ok(Some(user)) => {
                self.log
                    .record(events::LOGIN, &json!({ "user_id": user.get(), "username": username }));
                writeln!(self.output, "Login successful!")?;
                Ok(Some(Session::Authenticated(user)))
            }
            Ok(None) => {
                self.log.record(events::LOGIN_FAILED, &json!({ "username": username }));
                writeln!(self.output, "Invalid username or password.")?;
                Ok(Some(Session::Anonymous))
            }
            Err(e) => {
                self.report(&e, "login")?;
                Ok(Some(Session::Anonymous))
            }
        }
    }

    fn add_task(&mut self, user: UserId) -> Result<()> {
        let Some(title) = self.prompt("New task: ")? else {
            return Ok(());
        };

        match self.backend.add_task(user, &title) {
            Ok(task_id) => {
                self.log.record(
                    events::TASK_ADD,
                    &json!({ "user_id": user.get(), "task_id": task_id.get() }),
                );
                writeln!(self.output, "Task added.")?;
            }
            Err(e) => self.report(&e, "add_task")?,
        }
        Ok(())
    }

    fn view_tasks(&mut self, user: UserId) -> Result<()> {
        match self.backend.list_tasks(user) {
            Ok(tasks) => {
                self.log.record(
                    events::TASK_LIST,
                    &json!({ "user_id": user.get(), "count": tasks.len() }),
                );
                if tasks.is_empty() {
                    writeln!(self.output, "No tasks.")?;
                }
                for task in &tasks {
                    writeln!(self.output, "{task}")?;
                }
            }
            Err(e) => self.report(&e, "list_tasks")?,
        }
        Ok(())
    }

    fn complete_task(&mut self, user: UserId) -> Result<()> {
        let Some(task_id) = self.prompt_task_id("Task id to complete: ")? else {
            return Ok(());
        };

        match self.backend.complete_task(user, task_id) {
            Ok(affected) => {
                self.log.record(
                    events::TASK_COMPLETE,
                    &json!({ "user_id": user.get(), "task_id": task_id.get(), "affected": affected }),
                );
                if affected == 0 {
                    writeln!(self.output, "{NOTHING_CHANGED}")?;
                } else {
                    writeln!(self.output, "Task marked as done.")?;
                }
            }
            Err(e) => self.report(&e, "complete_task")?,
        }
        Ok(())
    }

    fn delete_task(&mut self, user: UserId) -> Result<()> {
        let Some(task_id) = self.prompt_task_id("Task id to delete: ")? else {
            return Ok(());
        };

        match self.backend.delete_task(user, task_id) {
            Ok(affected) => {
                self.log.record(
                    events::TASK_DELETE,
                    &json!({ "user_id": user.get(), "task_id": task_id.get(), "affected": affected }),
                );
                if affected == 0 {
                    writeln!(self.output, "{NOTHING_CHANGED}")?;
                } else {
                    writeln!(self.output, "Task deleted.")?;
                }
            }
            Err(e) => self.report(&e, "delete_task")?,
        }
        Ok(())
    }

    /// Print an operation failure and keep the loop alive.
    fn report(&mut self, err: &Error, operation: &str) -> Result<()> {
        if err.is_storage_fault() {
            self.log.record(
                events::STORAGE_FAULT,
                &json!({ "operation": operation, "error": err.to_string() }),
            );
        }
        writeln!(self.output, "Error: {err}")?;
        Ok(())
    }

    fn prompt_credentials(&mut self) -> Result<Option<(String, String)>> {
        let Some(username) = self.prompt("Username: ")? else {
            return Ok(None);
        };
        let Some(password) = self.prompt("Password: ")? else {
            return Ok(None);
        };
        Ok(Some((username, password)))
    }

    /// Prompt for a task id. Malformed input is reported here and never
    /// reaches the backend.
    fn prompt_task_id(&mut self, message: &str) -> Result<Option<TaskId>> {
        let Some(raw) = self.prompt(message)? else {
            return Ok(None);
        };
        match raw.parse::<TaskId>() {
            Ok(id) => Ok(Some(id)),
            Err(_) => {
                writeln!(self.output, "Invalid task id: {}", raw.trim())?;
                Ok(None)
            }
        }
    }

    /// Print `message` and read one line. Returns None at end of input.
    ///
    /// Only the line terminator is stripped; task titles are kept verbatim.
    /// Bytes that are not valid UTF-8 become U+FFFD, so a garbled line is
    /// rejected like any other unrecognized input.
    fn prompt(&mut self, message: &str) -> Result<Option<String>> {
        write!(self.output, "{message}")?;
        self.output.flush()?;

        let mut buf = Vec::new();
        if self.input.read_until(b'\n', &mut buf)? == 0 {
            return Ok(None);
        }
        let mut line = String::from_utf8_lossy(&buf).into_owned();
        if line.ends_with('\n') {
            line.pop();
            if line.ends_with('\r') {
                line.pop();
            }
        }
        Ok(Some(line))
    }
}
