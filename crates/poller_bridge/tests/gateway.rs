use std::sync::{mpsc, Arc, Mutex, Once};
use std::time::Duration;

use poller_bridge::{BackendError, CommandBackend, CommandGateway, EffectRunner, PreviewSink};
use poller_core::{
    update, AppState, Command, CommandFailure, CommandOutcome, Config, DataEntry, Effect,
    ErrorRecord, Event, Msg, PreviewResult, PreviewStatus, RunState,
};
use pretty_assertions::assert_eq;

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(poller_logging::initialize_for_tests);
}

#[derive(Default)]
struct ScriptedBackend {
    start_error: Option<String>,
    stop_error: Option<String>,
    preview: Option<Result<PreviewResult, String>>,
    calls: Mutex<Vec<&'static str>>,
}

#[async_trait::async_trait]
impl CommandBackend for ScriptedBackend {
    async fn start(&self, _config: &Config) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push("start");
        match &self.start_error {
            Some(reason) => Err(BackendError::new(reason.clone())),
            None => Ok(()),
        }
    }

    async fn stop(&self) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push("stop");
        match &self.stop_error {
            Some(reason) => Err(BackendError::new(reason.clone())),
            None => Ok(()),
        }
    }

    async fn preview(&self, _config: &Config) -> Result<PreviewResult, BackendError> {
        self.calls.lock().unwrap().push("preview");
        match &self.preview {
            Some(Ok(result)) => Ok(result.clone()),
            Some(Err(reason)) => Err(BackendError::new(reason.clone())),
            None => Ok(PreviewResult::default()),
        }
    }
}

fn sample_preview() -> PreviewResult {
    PreviewResult {
        raw_data: vec![DataEntry::new("A", "1"), DataEntry::new("B", "2")],
        data: vec![DataEntry::new("A", "1")],
        statuses: vec![PreviewStatus {
            url: "http://a".to_string(),
            has_data: true,
            line_count: 2,
        }],
    }
}

#[tokio::test]
async fn start_failure_becomes_command_failure() {
    init_logging();
    let backend = Arc::new(ScriptedBackend {
        start_error: Some("network error".to_string()),
        ..ScriptedBackend::default()
    });
    let gateway = CommandGateway::new(backend.clone());

    let outcome = gateway.start(&Config::default()).await;

    assert_eq!(
        outcome,
        CommandOutcome::Failed(CommandFailure::new(Command::Start, "network error"))
    );
    assert_eq!(*backend.calls.lock().unwrap(), vec!["start"]);
}

#[tokio::test]
async fn stop_success_is_reported() {
    init_logging();
    let gateway = CommandGateway::new(Arc::new(ScriptedBackend::default()));

    assert_eq!(gateway.stop().await, CommandOutcome::Succeeded(Command::Stop));
}

#[tokio::test]
async fn preview_returns_result_to_caller() {
    init_logging();
    let gateway = CommandGateway::new(Arc::new(ScriptedBackend {
        preview: Some(Ok(sample_preview())),
        ..ScriptedBackend::default()
    }));

    let result = gateway.preview(&Config::default()).await.unwrap();
    assert_eq!(result, sample_preview());
}

#[tokio::test]
async fn preview_timeout_leaves_error_history_untouched() {
    init_logging();
    let gateway = CommandGateway::new(Arc::new(ScriptedBackend {
        preview: Some(Err("timeout".to_string())),
        ..ScriptedBackend::default()
    }));
    let (state, _) = update(
        AppState::new(),
        Msg::Backend(Event::Error(ErrorRecord {
            message: "line count changed".to_string(),
            timestamp: "1".to_string(),
        })),
    );
    let error_before = state.current_error().cloned();

    let failure = gateway.preview(&Config::default()).await.unwrap_err();
    assert_eq!(failure.to_string(), "Preview failed: timeout");

    let (state, _) = update(state, Msg::CommandResolved(CommandOutcome::Failed(failure)));
    assert_eq!(state.current_error().cloned(), error_before);
    assert_eq!(
        state.view().command_notice.as_deref(),
        Some("Preview failed: timeout")
    );
}

#[test]
fn runner_reports_outcomes_and_hands_preview_to_sink() {
    init_logging();
    let backend = Arc::new(ScriptedBackend {
        stop_error: Some("not running".to_string()),
        preview: Some(Ok(sample_preview())),
        ..ScriptedBackend::default()
    });
    let previews: Arc<Mutex<Vec<PreviewResult>>> = Arc::new(Mutex::new(Vec::new()));
    let captured = previews.clone();
    let sink: Arc<dyn PreviewSink> = Arc::new(move |result: PreviewResult| {
        captured.lock().unwrap().push(result);
    });
    let (msg_tx, msg_rx) = mpsc::channel();
    let runner = EffectRunner::spawn(CommandGateway::new(backend), msg_tx, sink).unwrap();

    let state = AppState::with_config(Config {
        links: vec!["http://a".to_string()],
        ..Config::default()
    });
    let (state, _) = update(state, Msg::Backend(Event::State(RunState::Scraping)));
    let view_before = state.view();

    runner.enqueue(vec![Effect::Preview {
        config: state.config().clone(),
    }]);
    let msg = msg_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(
        msg,
        Msg::CommandResolved(CommandOutcome::Succeeded(Command::Preview))
    );
    assert_eq!(*previews.lock().unwrap(), vec![sample_preview()]);

    let (state, _) = update(state, msg);
    assert_eq!(state.view(), view_before);

    runner.enqueue(vec![Effect::Stop]);
    let msg = msg_rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(
        msg,
        Msg::CommandResolved(CommandOutcome::Failed(CommandFailure::new(
            Command::Stop,
            "not running"
        )))
    );

    let (state, _) = update(state, msg);
    assert_eq!(state.run_state(), RunState::Scraping);
    assert_eq!(
        state.view().command_notice.as_deref(),
        Some("Failed to stop: not running")
    );
}
