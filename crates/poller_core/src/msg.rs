#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// Validated notification from one of the backend channels.
    Backend(crate::Event),
    /// User clicked Start.
    StartClicked,
    /// User clicked Stop.
    StopClicked,
    /// User clicked Preview.
    PreviewClicked,
    /// A start/stop/preview call returned.
    CommandResolved(crate::CommandOutcome),
    /// The config owner supplied a new configuration.
    ConfigReplaced(crate::Config),
    /// User dismissed the command failure notice.
    DismissNotice,
    /// UI/render tick to coalesce rendering.
    Tick,
}
