use std::io::BufRead;
use std::sync::mpsc;

use anyhow::Context;
use poller_bridge::{EventChannels, ViewBinding};
use poller_core::{update, AppState, AppViewModel, Config, Msg};
use poller_logging::{poller_debug, poller_info, poller_warn};

use crate::transport::parse_frame;

/// Feeds every frame from `input` through the channels into the aggregator
/// until the stream ends, logging a summary whenever the view changes.
pub fn run<R: BufRead>(config: Config, input: R) -> anyhow::Result<AppState> {
    let channels = EventChannels::new();
    let (msg_tx, msg_rx) = mpsc::channel::<Msg>();
    let mut binding = ViewBinding::new();
    binding.mount(&channels, msg_tx);

    let mut state = AppState::with_config(config);
    for (index, line) in input.lines().enumerate() {
        let line = line.with_context(|| format!("failed to read event line {}", index + 1))?;
        let frame = match parse_frame(&line) {
            Ok(Some(frame)) => frame,
            Ok(None) => continue,
            Err(err) => {
                poller_warn!("Skipping unreadable frame on line {}: {}", index + 1, err);
                continue;
            }
        };
        // Rejected payloads are already logged by the adapter.
        if channels.dispatch(&frame.topic, frame.payload).is_err() {
            continue;
        }

        while let Ok(msg) = msg_rx.try_recv() {
            let (next, effects) = update(state, msg);
            state = next;
            if !effects.is_empty() {
                poller_debug!("Ignoring {} effect(s) without a command backend", effects.len());
            }
        }
        if state.consume_dirty() {
            poller_info!("{}", summary(&state.view()));
        }
    }

    binding.unmount();
    Ok(state)
}

fn summary(view: &AppViewModel) -> String {
    let mut line = format!(
        "status={} run={} urls ok={} fail={} pending={}",
        view.effective_status.label(),
        view.run_state,
        view.url_summary.ok,
        view.url_summary.fail,
        view.url_summary.pending,
    );
    if let Some(data) = &view.data {
        line.push_str(&format!(" lines={} at={}", data.entries.len(), data.timestamp));
    }
    if let Some(error) = &view.current_error {
        line.push_str(&format!(" error={:?}", error.message));
    }
    line
}
