use std::collections::VecDeque;

use crate::LogEntry;

pub const DEFAULT_LOG_CAPACITY: usize = 500;

/// Append-only log tail; the oldest lines fall off past `capacity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogBuffer {
    entries: VecDeque<LogEntry>,
    capacity: usize,
}

impl Default for LogBuffer {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_LOG_CAPACITY)
    }
}

impl LogBuffer {
    /// A zero capacity is bumped to one so the latest line is always visible.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity.min(DEFAULT_LOG_CAPACITY)),
            capacity,
        }
    }

    pub fn push(&mut self, entry: LogEntry) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    pub fn iter(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::LogBuffer;
    use crate::LogEntry;

    fn entry(message: &str) -> LogEntry {
        LogEntry {
            level: "INFO".to_string(),
            message: message.to_string(),
            time: "12:00:00".to_string(),
        }
    }

    #[test]
    fn drops_oldest_past_capacity() {
        let mut buffer = LogBuffer::with_capacity(2);
        buffer.push(entry("a"));
        buffer.push(entry("b"));
        buffer.push(entry("c"));

        let messages: Vec<_> = buffer.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["b", "c"]);
    }

    #[test]
    fn zero_capacity_keeps_latest() {
        let mut buffer = LogBuffer::with_capacity(0);
        buffer.push(entry("a"));
        buffer.push(entry("b"));
        assert_eq!(buffer.len(), 1);
        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.iter().next().map(|e| e.message.as_str()), Some("b"));
    }
}
