use std::sync::Arc;

use poller_core::{Command, CommandFailure, CommandOutcome, Config, PreviewResult};
use poller_logging::{poller_info, poller_warn};

/// Rejection reported by the backend command interface.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct BackendError {
    message: String,
}

impl BackendError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

/// The backend's request/response command surface.
#[async_trait::async_trait]
pub trait CommandBackend: Send + Sync {
    async fn start(&self, config: &Config) -> Result<(), BackendError>;

    async fn stop(&self) -> Result<(), BackendError>;

    async fn preview(&self, config: &Config) -> Result<PreviewResult, BackendError>;
}

/// Issues commands and turns backend rejections into [`CommandFailure`]s.
///
/// The gateway holds no reference to the aggregator; callers feed the
/// returned outcome back as a message.
pub struct CommandGateway<B: ?Sized> {
    backend: Arc<B>,
}

impl<B: ?Sized> Clone for CommandGateway<B> {
    fn clone(&self) -> Self {
        Self {
            backend: self.backend.clone(),
        }
    }
}

impl<B: CommandBackend + ?Sized> CommandGateway<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn start(&self, config: &Config) -> CommandOutcome {
        poller_info!("Starting scraper urls={}", config.link_count());
        outcome(Command::Start, self.backend.start(config).await)
    }

    pub async fn stop(&self) -> CommandOutcome {
        poller_info!("Stopping scraper");
        outcome(Command::Stop, self.backend.stop().await)
    }

    /// The result goes straight back to the caller and is never folded into
    /// live state.
    pub async fn preview(&self, config: &Config) -> Result<PreviewResult, CommandFailure> {
        poller_info!("Preview requested urls={}", config.link_count());
        self.backend
            .preview(config)
            .await
            .map_err(|err| failure(Command::Preview, err))
    }
}

fn outcome(command: Command, result: Result<(), BackendError>) -> CommandOutcome {
    match result {
        Ok(()) => CommandOutcome::Succeeded(command),
        Err(err) => CommandOutcome::Failed(failure(command, err)),
    }
}

fn failure(command: Command, err: BackendError) -> CommandFailure {
    let failure = CommandFailure::new(command, err.message);
    poller_warn!("{}", failure);
    failure
}
