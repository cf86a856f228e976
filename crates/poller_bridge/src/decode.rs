//! Payload validation at the channel boundary.
//!
//! Every backend payload is parsed into the closed [`Event`] union here, so
//! nothing downstream has to guess a shape from field presence.

use poller_core::{DataEntry, DataSnapshot, ErrorRecord, Event, LogEntry, RunState, UrlStatus};
use serde::Deserialize;
use serde_json::Value;

use crate::Channel;

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("unknown channel {0:?}")]
    UnknownChannel(String),
    #[error("unknown run state {0:?}")]
    UnknownRunState(String),
    #[error("malformed {channel} payload: {source}")]
    Malformed {
        channel: Channel,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Deserialize)]
struct WireEntry {
    name: String,
    value: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireData {
    data: Option<Vec<WireEntry>>,
    #[serde(default)]
    raw_data: Option<Vec<WireEntry>>,
    #[serde(default)]
    timestamp: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireUrlStatus {
    url: String,
    #[serde(default)]
    has_data: bool,
    #[serde(default)]
    line_count: u32,
    #[serde(default)]
    error: bool,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireUrlStatuses {
    One(WireUrlStatus),
    Many(Vec<WireUrlStatus>),
}

/// Error timestamps arrive either as text or as unix seconds.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WireTimestamp {
    Text(String),
    Unix(i64),
}

#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
    #[serde(default)]
    timestamp: Option<WireTimestamp>,
}

#[derive(Debug, Deserialize)]
struct WireLog {
    level: String,
    message: String,
    #[serde(default)]
    time: String,
}

/// Validates `payload` as a notification on `channel`.
pub fn decode_event(channel: Channel, payload: Value) -> Result<Event, DecodeError> {
    let malformed = |source: serde_json::Error| DecodeError::Malformed { channel, source };
    match channel {
        Channel::State => {
            let raw: String = serde_json::from_value(payload).map_err(malformed)?;
            RunState::parse(&raw)
                .map(Event::State)
                .ok_or(DecodeError::UnknownRunState(raw))
        }
        Channel::Data => {
            let wire: WireData = serde_json::from_value(payload).map_err(malformed)?;
            Ok(Event::Data(DataSnapshot {
                entries: entries(wire.data),
                raw_entries: entries(wire.raw_data),
                timestamp: wire.timestamp,
            }))
        }
        Channel::UrlStatus => {
            let wire: WireUrlStatuses = serde_json::from_value(payload).map_err(malformed)?;
            let statuses = match wire {
                WireUrlStatuses::One(status) => vec![status],
                WireUrlStatuses::Many(statuses) => statuses,
            };
            Ok(Event::UrlStatus(
                statuses
                    .into_iter()
                    .map(|status| UrlStatus {
                        url: status.url,
                        has_data: status.has_data,
                        line_count: status.line_count,
                        error: status.error,
                    })
                    .collect(),
            ))
        }
        Channel::Error => {
            let wire: WireError = serde_json::from_value(payload).map_err(malformed)?;
            let timestamp = match wire.timestamp {
                Some(WireTimestamp::Text(text)) => text,
                Some(WireTimestamp::Unix(seconds)) => seconds.to_string(),
                None => String::new(),
            };
            Ok(Event::Error(ErrorRecord {
                message: wire.message,
                timestamp,
            }))
        }
        Channel::Log => {
            let wire: WireLog = serde_json::from_value(payload).map_err(malformed)?;
            Ok(Event::Log(LogEntry {
                level: wire.level,
                message: wire.message,
                time: wire.time,
            }))
        }
    }
}

fn entries(wire: Option<Vec<WireEntry>>) -> Vec<DataEntry> {
    wire.unwrap_or_default()
        .into_iter()
        .map(|entry| DataEntry {
            name: entry.name,
            value: entry.value,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::{decode_event, DecodeError};
    use crate::Channel;
    use poller_core::{DataEntry, Event, RunState, UrlStatus};
    use serde_json::json;

    #[test]
    fn state_accepts_known_literals() {
        let event = decode_event(Channel::State, json!("scraping")).unwrap();
        assert_eq!(event, Event::State(RunState::Scraping));
    }

    #[test]
    fn state_rejects_unknown_literal() {
        let err = decode_event(Channel::State, json!("paused")).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownRunState(raw) if raw == "paused"));
    }

    #[test]
    fn state_rejects_non_string() {
        let err = decode_event(Channel::State, json!({ "state": "idle" })).unwrap_err();
        assert!(matches!(
            err,
            DecodeError::Malformed {
                channel: Channel::State,
                ..
            }
        ));
    }

    #[test]
    fn url_status_accepts_single_object() {
        let event = decode_event(
            Channel::UrlStatus,
            json!({ "url": "http://a", "hasData": true, "lineCount": 5, "error": false }),
        )
        .unwrap();
        assert_eq!(
            event,
            Event::UrlStatus(vec![UrlStatus {
                url: "http://a".to_string(),
                has_data: true,
                line_count: 5,
                error: false,
            }])
        );
    }

    #[test]
    fn url_status_accepts_array_with_sparse_fields() {
        let event = decode_event(
            Channel::UrlStatus,
            json!([{ "url": "http://a", "hasData": true }, { "url": "http://b" }]),
        )
        .unwrap();
        let Event::UrlStatus(statuses) = event else {
            panic!("expected url status event");
        };
        assert_eq!(statuses.len(), 2);
        assert_eq!(statuses[0].line_count, 0);
        assert!(!statuses[1].has_data);
        assert!(!statuses[1].error);
    }

    #[test]
    fn error_timestamp_may_be_unix_seconds() {
        let event = decode_event(
            Channel::Error,
            json!({ "message": "line count changed", "timestamp": 1700000000 }),
        )
        .unwrap();
        let Event::Error(record) = event else {
            panic!("expected error event");
        };
        assert_eq!(record.timestamp, "1700000000");
    }

    #[test]
    fn data_tolerates_null_and_missing_raw_data() {
        let event = decode_event(
            Channel::Data,
            json!({ "data": [{ "name": "Score", "value": "42" }], "rawData": null, "timestamp": "t" }),
        )
        .unwrap();
        let Event::Data(snapshot) = event else {
            panic!("expected data event");
        };
        assert_eq!(snapshot.entries, vec![DataEntry::new("Score", "42")]);
        assert!(snapshot.raw_entries.is_empty());

        let event = decode_event(Channel::Data, json!({ "data": [] })).unwrap();
        assert!(matches!(event, Event::Data(snapshot) if snapshot.raw_entries.is_empty()));
    }

    #[test]
    fn log_requires_message() {
        let err = decode_event(Channel::Log, json!({ "level": "INFO" })).unwrap_err();
        assert!(err.to_string().starts_with("malformed log payload"));
    }
}
