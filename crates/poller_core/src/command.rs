use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Start,
    Stop,
    Preview,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Start => write!(f, "start"),
            Command::Stop => write!(f, "stop"),
            Command::Preview => write!(f, "preview"),
        }
    }
}

/// A rejected command call. Scoped to that one call: it never becomes a run
/// error and never changes the run state.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CommandFailure {
    #[error("Failed to start: {0}")]
    Start(String),
    #[error("Failed to stop: {0}")]
    Stop(String),
    #[error("Preview failed: {0}")]
    Preview(String),
}

impl CommandFailure {
    pub fn new(command: Command, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        match command {
            Command::Start => CommandFailure::Start(reason),
            Command::Stop => CommandFailure::Stop(reason),
            Command::Preview => CommandFailure::Preview(reason),
        }
    }

    pub fn command(&self) -> Command {
        match self {
            CommandFailure::Start(_) => Command::Start,
            CommandFailure::Stop(_) => Command::Stop,
            CommandFailure::Preview(_) => Command::Preview,
        }
    }

    pub fn reason(&self) -> &str {
        match self {
            CommandFailure::Start(reason)
            | CommandFailure::Stop(reason)
            | CommandFailure::Preview(reason) => reason,
        }
    }
}

/// Completion of a command call as reported back to the aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Succeeded(Command),
    Failed(CommandFailure),
}

impl CommandOutcome {
    pub fn command(&self) -> Command {
        match self {
            CommandOutcome::Succeeded(command) => *command,
            CommandOutcome::Failed(failure) => failure.command(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Succeeded(_))
    }
}
