//! Poller core: pure status-reconciliation state machine and view-model helpers.
mod command;
mod config;
mod effect;
mod error_history;
mod event;
mod log_buffer;
mod msg;
mod registry;
mod state;
mod status;
mod update;
mod view_model;

pub use command::{Command, CommandFailure, CommandOutcome};
pub use config::{AddLine, Config, ConfigError, DEFAULT_PORT, DEFAULT_UPDATE_INTERVAL_MS};
pub use effect::Effect;
pub use error_history::ErrorHistory;
pub use event::{
    DataEntry, DataSnapshot, ErrorRecord, Event, LogEntry, PreviewResult, PreviewStatus,
    RunState, UrlStatus,
};
pub use log_buffer::{LogBuffer, DEFAULT_LOG_CAPACITY};
pub use msg::Msg;
pub use registry::{UrlHealth, UrlHealthRegistry, UrlSummary};
pub use state::AppState;
pub use status::{resolve, EffectiveStatus, Indicator};
pub use update::update;
pub use view_model::{AppViewModel, DataPanel, UrlRowView};
