use std::sync::Once;

use poller_core::{
    update, AppState, Command, CommandFailure, CommandOutcome, Config, EffectiveStatus, Effect,
    ErrorRecord, Event, Msg, RunState,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(poller_logging::initialize_for_tests);
}

fn configured_state() -> AppState {
    AppState::with_config(Config {
        links: vec!["http://example.com".to_string()],
        ..Config::default()
    })
}

fn failed(command: Command, reason: &str) -> Msg {
    Msg::CommandResolved(CommandOutcome::Failed(CommandFailure::new(command, reason)))
}

fn run_error(message: &str) -> Msg {
    Msg::Backend(Event::Error(ErrorRecord {
        message: message.to_string(),
        timestamp: "1700000000".to_string(),
    }))
}

#[test]
fn start_click_emits_start_with_config() {
    init_logging();
    let state = configured_state();
    let expected = state.config().clone();

    let (next, effects) = update(state, Msg::StartClicked);

    assert_eq!(effects, vec![Effect::Start { config: expected }]);
    assert_eq!(next.run_state(), RunState::Idle);
}

#[test]
fn start_is_passed_through_while_scraping() {
    init_logging();
    let (state, _) = update(configured_state(), Msg::Backend(Event::State(RunState::Scraping)));
    let (state, effects) = update(state, Msg::StartClicked);

    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].command(), Command::Start);
    assert_eq!(state.run_state(), RunState::Scraping);
}

#[test]
fn stop_and_preview_emit_effects() {
    init_logging();
    let state = configured_state();
    let config = state.config().clone();

    let (state, effects) = update(state, Msg::StopClicked);
    assert_eq!(effects, vec![Effect::Stop]);

    let (_state, effects) = update(state, Msg::PreviewClicked);
    assert_eq!(effects, vec![Effect::Preview { config }]);
}

#[test]
fn failed_start_leaves_run_state_and_history_alone() {
    init_logging();
    let state = configured_state();
    let before = state.view();

    let (state, _) = update(state, Msg::StartClicked);
    let (state, effects) = update(state, failed(Command::Start, "network error"));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.run_state, before.run_state);
    assert_eq!(view.effective_status, EffectiveStatus::Stopped);
    assert!(view.current_error.is_none());
    assert_eq!(
        view.command_notice.as_deref(),
        Some("Failed to start: network error")
    );
}

#[test]
fn failed_preview_is_separate_from_run_error() {
    init_logging();
    let (state, _) = update(configured_state(), run_error("line count changed"));
    let error_before = state.current_error().cloned();

    let (state, _) = update(state, Msg::PreviewClicked);
    let (state, _) = update(state, failed(Command::Preview, "timeout"));

    let view = state.view();
    assert_eq!(view.command_notice.as_deref(), Some("Preview failed: timeout"));
    assert_eq!(state.current_error().cloned(), error_before);
}

#[test]
fn next_command_clears_notice() {
    init_logging();
    let (state, _) = update(configured_state(), failed(Command::Stop, "closed"));
    assert_eq!(
        state.view().command_notice.as_deref(),
        Some("Failed to stop: closed")
    );

    let (state, _) = update(state, Msg::StartClicked);
    assert!(state.view().command_notice.is_none());
}

#[test]
fn dismiss_notice_clears_it() {
    init_logging();
    let (state, _) = update(configured_state(), failed(Command::Start, "busy"));
    let (mut state, effects) = update(state, Msg::DismissNotice);

    assert!(effects.is_empty());
    assert!(state.view().command_notice.is_none());
    assert!(state.consume_dirty());
}

#[test]
fn late_start_reply_keeps_new_run_error() {
    init_logging();
    let (state, _) = update(configured_state(), Msg::StartClicked);
    let (state, _) = update(state, Msg::Backend(Event::State(RunState::Scraping)));
    let (state, _) = update(state, run_error("line count changed"));
    assert_eq!(state.effective_status(), EffectiveStatus::Error);

    let (mut state, effects) = update(
        state,
        Msg::CommandResolved(CommandOutcome::Succeeded(Command::Start)),
    );

    assert!(effects.is_empty());
    assert_eq!(state.effective_status(), EffectiveStatus::Error);
    assert_eq!(
        state.current_error().map(|record| record.message.as_str()),
        Some("line count changed")
    );
    assert_eq!(state.run_state(), RunState::Scraping);
    state.consume_dirty();
    let (mut state, _) = update(
        state,
        Msg::CommandResolved(CommandOutcome::Succeeded(Command::Start)),
    );
    assert!(!state.consume_dirty());
}

#[test]
fn successful_start_leaves_old_error_until_scraping() {
    init_logging();
    let (state, _) = update(configured_state(), run_error("line count changed"));
    let (state, _) = update(
        state,
        Msg::CommandResolved(CommandOutcome::Succeeded(Command::Start)),
    );
    assert_eq!(state.effective_status(), EffectiveStatus::Error);

    let (state, _) = update(state, Msg::Backend(Event::State(RunState::Scraping)));

    assert!(state.current_error().is_none());
    assert_eq!(state.effective_status(), EffectiveStatus::Ok);
}

#[test]
fn successful_stop_keeps_run_error() {
    init_logging();
    let (state, _) = update(configured_state(), run_error("line count changed"));
    let (state, _) = update(
        state,
        Msg::CommandResolved(CommandOutcome::Succeeded(Command::Stop)),
    );
    let (state, _) = update(state, Msg::Backend(Event::State(RunState::Stopped)));

    assert_eq!(state.run_state(), RunState::Stopped);
    assert_eq!(state.effective_status(), EffectiveStatus::Error);
}
