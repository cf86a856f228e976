use std::fmt;

/// Backend-reported lifecycle phase of a scrape run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Scraping,
    Error,
    Stopped,
}

impl RunState {
    pub fn as_str(self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Scraping => "scraping",
            RunState::Error => "error",
            RunState::Stopped => "stopped",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "idle" => Some(RunState::Idle),
            "scraping" => Some(RunState::Scraping),
            "error" => Some(RunState::Error),
            "stopped" => Some(RunState::Stopped),
            _ => None,
        }
    }
}

impl fmt::Display for RunState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Latest known health of one configured URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlStatus {
    pub url: String,
    pub has_data: bool,
    pub line_count: u32,
    pub error: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorRecord {
    pub message: String,
    /// Backend clock, kept opaque.
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataEntry {
    pub name: String,
    pub value: String,
}

impl DataEntry {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// One complete poll result. Replaced wholesale, never merged.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DataSnapshot {
    /// Filtered and post-processed lines.
    pub entries: Vec<DataEntry>,
    /// Lines exactly as scraped.
    pub raw_entries: Vec<DataEntry>,
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub level: String,
    pub message: String,
    pub time: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewStatus {
    pub url: String,
    pub has_data: bool,
    pub line_count: u32,
}

/// Result of a one-shot preview scrape.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PreviewResult {
    pub raw_data: Vec<DataEntry>,
    pub data: Vec<DataEntry>,
    pub statuses: Vec<PreviewStatus>,
}

/// A validated backend notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    State(RunState),
    Data(DataSnapshot),
    /// The backend reports either a single URL or a whole poll cycle at once.
    UrlStatus(Vec<UrlStatus>),
    Error(ErrorRecord),
    Log(LogEntry),
}
