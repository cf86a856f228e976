use crate::ErrorRecord;

/// Holds the latest run error until a run (re)start clears it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ErrorHistory {
    current: Option<ErrorRecord>,
}

impl ErrorHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Latest error always wins, whatever its timestamp says.
    pub fn record(&mut self, error: ErrorRecord) {
        self.current = Some(error);
    }

    pub fn clear(&mut self) {
        self.current = None;
    }

    pub fn current(&self) -> Option<&ErrorRecord> {
        self.current.as_ref()
    }

    pub fn is_present(&self) -> bool {
        self.current.is_some()
    }
}
