//! Closed sets of menu commands, one per session state.

/// Commands available before login.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopCommand {
    /// Create a new account.
    Register,
    /// Authenticate and open the task menu.
    Login,
    /// End the program.
    Exit,
}

impl TopCommand {
    /// All commands in menu order.
    pub const ALL: [Self; 3] = [Self::Register, Self::Login, Self::Exit];

    /// The key the user types to select this command.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Register => "1",
            Self::Login => "2",
            Self::Exit => "3",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Register => "Register",
            Self::Login => "Login",
            Self::Exit => "Exit",
        }
    }

    /// Look up the command for a typed choice.
    #[must_use]
    pub fn parse(choice: &str) -> Option<Self> {
        let choice = choice.trim();
        Self::ALL.into_iter().find(|cmd| cmd.key() == choice)
    }
}

/// Commands available to an authenticated account.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskCommand {
    /// Add a task.
    Add,
    /// Show all tasks.
    View,
    /// Mark a task done.
    Complete,
    /// Delete a task.
    Delete,
    /// Return to the top menu.
    Logout,
}

impl TaskCommand {
    /// All commands in menu order.
    pub const ALL: [Self; 5] = [Self::Add, Self::View, Self::Complete, Self::Delete, Self::Logout];

    /// The key the user types to select this command.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Add => "1",
            Self::View => "2",
            Self::Complete => "3",
            Self::Delete => "4",
            Self::Logout => "5",
        }
    }

    /// Menu label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Add => "Add task",
            Self::View => "View tasks",
            Self::Complete => "Complete task",
            Self::Delete => "Delete task",
            Self::Logout => "Logout",
        }
    }

    /// Look up the command for a typed choice.
    #[must_use]
    pub fn parse(choice: &str) -> Option<Self> {
        let choice = choice.trim();
        Self::ALL.into_iter().find(|cmd| cmd.key() == choice)
    }
}
