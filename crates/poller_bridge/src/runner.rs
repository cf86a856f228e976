use std::io;
use std::sync::{mpsc, Arc};
use std::thread;

use poller_core::{Command, CommandOutcome, Effect, Msg, PreviewResult};
use poller_logging::{poller_debug, poller_warn};

use crate::{CommandBackend, CommandGateway};

/// Receives successful preview results; they never pass through `update`.
pub trait PreviewSink: Send + Sync {
    fn deliver(&self, result: PreviewResult);
}

impl<F> PreviewSink for F
where
    F: Fn(PreviewResult) + Send + Sync,
{
    fn deliver(&self, result: PreviewResult) {
        self(result)
    }
}

/// Executes effects on a background tokio runtime and reports each command's
/// outcome back to the aggregator as `Msg::CommandResolved`.
///
/// Commands are not serialised against each other; the backend decides what
/// overlapping calls mean.
pub struct EffectRunner {
    effect_tx: mpsc::Sender<Effect>,
}

impl EffectRunner {
    pub fn spawn<B>(
        gateway: CommandGateway<B>,
        msg_tx: mpsc::Sender<Msg>,
        preview_sink: Arc<dyn PreviewSink>,
    ) -> io::Result<Self>
    where
        B: CommandBackend + ?Sized + 'static,
    {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(2)
            .thread_name("poller-commands")
            .build()?;
        let (effect_tx, effect_rx) = mpsc::channel::<Effect>();

        thread::Builder::new()
            .name("poller-effects".to_string())
            .spawn(move || {
                while let Ok(effect) = effect_rx.recv() {
                    let gateway = gateway.clone();
                    let msg_tx = msg_tx.clone();
                    let preview_sink = preview_sink.clone();
                    runtime.spawn(async move {
                        let outcome = execute(&gateway, effect, preview_sink.as_ref()).await;
                        if msg_tx.send(Msg::CommandResolved(outcome)).is_err() {
                            poller_debug!("Aggregator gone, dropping command outcome");
                        }
                    });
                }
                poller_debug!("Effect runner shutting down");
            })?;

        Ok(Self { effect_tx })
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            let command = effect.command();
            poller_debug!("Enqueue command={}", command);
            if self.effect_tx.send(effect).is_err() {
                poller_warn!("Effect runner stopped, dropping command={}", command);
            }
        }
    }
}

async fn execute<B>(
    gateway: &CommandGateway<B>,
    effect: Effect,
    preview_sink: &dyn PreviewSink,
) -> CommandOutcome
where
    B: CommandBackend + ?Sized,
{
    match effect {
        Effect::Start { config } => gateway.start(&config).await,
        Effect::Stop => gateway.stop().await,
        Effect::Preview { config } => match gateway.preview(&config).await {
            Ok(result) => {
                preview_sink.deliver(result);
                CommandOutcome::Succeeded(Command::Preview)
            }
            Err(failure) => CommandOutcome::Failed(failure),
        },
    }
}
