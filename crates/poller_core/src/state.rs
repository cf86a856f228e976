use poller_logging::{poller_debug, poller_info, poller_warn};

use crate::view_model::{AppViewModel, DataPanel, UrlRowView};
use crate::{
    resolve, CommandFailure, CommandOutcome, Config, DataSnapshot, EffectiveStatus, ErrorHistory,
    ErrorRecord, Event, LogBuffer, LogEntry, RunState, UrlHealth, UrlHealthRegistry, UrlStatus,
};

/// The state aggregator. Every mutable field of the monitor lives here and is
/// only changed through the transition methods driven by `update`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    config: Config,
    run_state: RunState,
    errors: ErrorHistory,
    urls: UrlHealthRegistry,
    data: Option<DataSnapshot>,
    logs: LogBuffer,
    command_notice: Option<CommandFailure>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_config(Config::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: Config) -> Self {
        let urls = UrlHealthRegistry::with_links(config.links.iter().cloned());
        Self {
            config,
            run_state: RunState::Idle,
            errors: ErrorHistory::new(),
            urls,
            data: None,
            logs: LogBuffer::default(),
            command_notice: None,
            dirty: false,
        }
    }

    /// Keeps at most `capacity` log lines (minimum one).
    pub fn with_log_capacity(mut self, capacity: usize) -> Self {
        self.logs = LogBuffer::with_capacity(capacity);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    pub fn current_error(&self) -> Option<&ErrorRecord> {
        self.errors.current()
    }

    pub fn url_registry(&self) -> &UrlHealthRegistry {
        &self.urls
    }

    pub fn effective_status(&self) -> EffectiveStatus {
        resolve(self.run_state, self.errors.is_present())
    }

    /// Builds a fresh snapshot; derived fields are recomputed on every call.
    pub fn view(&self) -> AppViewModel {
        let effective_status = self.effective_status();
        let url_rows = self
            .urls
            .entries()
            .map(|(url, record)| UrlRowView {
                url: url.to_string(),
                health: UrlHealth::of(record),
                line_count: record.map(|status| status.line_count),
            })
            .collect();

        AppViewModel {
            run_state: self.run_state,
            effective_status,
            url_rows,
            url_summary: self.urls.summarize(),
            current_error: self.errors.current().cloned(),
            data: self.data.clone(),
            logs: self.logs.iter().cloned().collect(),
            configured_url_count: self.config.link_count(),
            update_interval_ms: self.config.update_interval,
            command_notice: self.command_notice.as_ref().map(ToString::to_string),
            data_panel: self.data_panel(effective_status),
            dirty: self.dirty,
        }
    }

    /// Returns whether anything visible changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn apply_event(&mut self, event: Event) {
        match event {
            Event::State(next) => self.apply_run_state(next),
            Event::Data(snapshot) => self.apply_data(snapshot),
            Event::UrlStatus(statuses) => self.apply_url_statuses(statuses),
            Event::Error(record) => self.apply_error(record),
            Event::Log(entry) => self.apply_log(entry),
        }
    }

    /// `scraping` begins a fresh run: the previous run's error and URL health
    /// are dropped even when the run state was already `scraping`.
    fn apply_run_state(&mut self, next: RunState) {
        let previous = self.run_state;
        if next == RunState::Scraping && (self.errors.is_present() || self.urls.has_records()) {
            poller_debug!("Run (re)started, clearing error and url health");
            self.errors.clear();
            self.urls.reset();
            self.mark_dirty();
        }
        if previous != next {
            poller_info!("Run state {} -> {}", previous, next);
            self.run_state = next;
            self.mark_dirty();
        }
    }

    fn apply_data(&mut self, snapshot: DataSnapshot) {
        if self.data.as_ref() == Some(&snapshot) {
            poller_debug!("Duplicate data snapshot at {}", snapshot.timestamp);
            return;
        }
        self.data = Some(snapshot);
        self.mark_dirty();
    }

    fn apply_url_statuses(&mut self, statuses: Vec<UrlStatus>) {
        let mut changed = false;
        for status in statuses {
            changed |= self.urls.upsert(status);
        }
        if changed {
            self.mark_dirty();
        }
    }

    fn apply_error(&mut self, record: ErrorRecord) {
        if self.errors.current() == Some(&record) {
            return;
        }
        poller_warn!("Run error reported: {}", record.message);
        self.errors.record(record);
        self.mark_dirty();
    }

    fn apply_log(&mut self, entry: LogEntry) {
        self.logs.push(entry);
        self.mark_dirty();
    }

    /// A new command attempt retires the previous command's failure notice.
    pub(crate) fn begin_command(&mut self) {
        if self.command_notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn apply_command_outcome(&mut self, outcome: CommandOutcome) {
        // Run state and errors follow backend events only.
        match outcome {
            CommandOutcome::Succeeded(command) => {
                poller_debug!("Command {} acknowledged", command);
            }
            CommandOutcome::Failed(failure) => {
                poller_debug!("Command notice set: {}", failure);
                self.command_notice = Some(failure);
                self.mark_dirty();
            }
        }
    }

    pub(crate) fn dismiss_notice(&mut self) {
        if self.command_notice.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn replace_config(&mut self, config: Config) {
        if self.config == config {
            return;
        }
        self.urls.configure(config.links.iter().cloned());
        self.config = config;
        self.mark_dirty();
    }

    fn data_panel(&self, status: EffectiveStatus) -> DataPanel {
        if status == EffectiveStatus::Error {
            return DataPanel::Failed {
                message: self.errors.current().map(|record| record.message.clone()),
            };
        }
        match (&self.data, status) {
            (Some(_), _) => DataPanel::Grid,
            (None, EffectiveStatus::Ok) => DataPanel::Waiting,
            (None, _) => DataPanel::Stopped,
        }
    }

    fn mark_dirty(&mut self) {
        self.dirty = true;
    }
}
