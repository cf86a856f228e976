use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::Backend(event) => {
            state.apply_event(event);
            Vec::new()
        }
        // Commands are passed through whatever the run state; the backend
        // decides whether a start while scraping is valid.
        Msg::StartClicked => {
            state.begin_command();
            vec![Effect::Start {
                config: state.config().clone(),
            }]
        }
        Msg::StopClicked => {
            state.begin_command();
            vec![Effect::Stop]
        }
        Msg::PreviewClicked => {
            state.begin_command();
            vec![Effect::Preview {
                config: state.config().clone(),
            }]
        }
        Msg::CommandResolved(outcome) => {
            state.apply_command_outcome(outcome);
            Vec::new()
        }
        Msg::ConfigReplaced(config) => {
            state.replace_config(config);
            Vec::new()
        }
        Msg::DismissNotice => {
            state.dismiss_notice();
            Vec::new()
        }
        Msg::Tick => Vec::new(),
    };

    (state, effects)
}
