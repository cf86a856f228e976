use crate::{DataSnapshot, EffectiveStatus, ErrorRecord, LogEntry, RunState, UrlHealth, UrlSummary};

/// What the data area should show.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DataPanel {
    /// Not running and nothing received yet.
    #[default]
    Stopped,
    /// Running, first snapshot not yet in.
    Waiting,
    /// Effective status is `error`; the message is absent when only the run
    /// state signalled it.
    Failed { message: Option<String> },
    Grid,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub run_state: RunState,
    pub effective_status: EffectiveStatus,
    pub url_rows: Vec<UrlRowView>,
    pub url_summary: UrlSummary,
    pub current_error: Option<ErrorRecord>,
    /// Last snapshot received; stays visible underneath an error.
    pub data: Option<DataSnapshot>,
    pub logs: Vec<LogEntry>,
    pub configured_url_count: usize,
    pub update_interval_ms: u64,
    /// Transient text of the last failed command.
    pub command_notice: Option<String>,
    pub data_panel: DataPanel,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlRowView {
    pub url: String,
    pub health: UrlHealth,
    pub line_count: Option<u32>,
}
