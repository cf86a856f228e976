use crate::Config;

/// Backend command requested by `update`, executed outside the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    Start { config: Config },
    Stop,
    Preview { config: Config },
}

impl Effect {
    pub fn command(&self) -> crate::Command {
        match self {
            Effect::Start { .. } => crate::Command::Start,
            Effect::Stop => crate::Command::Stop,
            Effect::Preview { .. } => crate::Command::Preview,
        }
    }
}
