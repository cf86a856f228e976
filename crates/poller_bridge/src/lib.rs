//! Poller bridge: backend channel adapter, command gateway and effect execution.
mod binding;
mod channel;
mod decode;
mod gateway;
mod runner;

pub use binding::ViewBinding;
pub use channel::{Channel, EventChannels, Subscription, TOPIC_PREFIX};
pub use decode::{decode_event, DecodeError};
pub use gateway::{BackendError, CommandBackend, CommandGateway};
pub use runner::{EffectRunner, PreviewSink};
