use crate::RunState;

/// Three-valued status driving the status indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EffectiveStatus {
    Ok,
    Error,
    #[default]
    Stopped,
}

/// Colour class of a status dot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indicator {
    Green,
    Red,
    Gray,
}

impl EffectiveStatus {
    pub fn label(self) -> &'static str {
        match self {
            EffectiveStatus::Ok => "Scraping",
            EffectiveStatus::Error => "Error",
            EffectiveStatus::Stopped => "Stopped",
        }
    }

    pub fn indicator(self) -> Indicator {
        match self {
            EffectiveStatus::Ok => Indicator::Green,
            EffectiveStatus::Error => Indicator::Red,
            EffectiveStatus::Stopped => Indicator::Gray,
        }
    }
}

/// Derives the display status. An outstanding error record and an explicit
/// `error` run state are each sufficient on their own.
pub fn resolve(run_state: RunState, has_error: bool) -> EffectiveStatus {
    if has_error {
        return EffectiveStatus::Error;
    }
    match run_state {
        RunState::Error => EffectiveStatus::Error,
        RunState::Idle | RunState::Stopped => EffectiveStatus::Stopped,
        RunState::Scraping => EffectiveStatus::Ok,
    }
}
