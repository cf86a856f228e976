use std::sync::mpsc;

use poller_core::Msg;
use poller_logging::poller_debug;

use crate::{Channel, EventChannels, Subscription};

/// The set of channel subscriptions held by one mounted view.
///
/// Mounting again releases the previous set first, so a remount never
/// doubles delivery.
#[derive(Debug, Default)]
pub struct ViewBinding {
    subscriptions: Vec<Subscription>,
}

impl ViewBinding {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forwards every channel into `sink` as `Msg::Backend`.
    pub fn mount(&mut self, channels: &EventChannels, sink: mpsc::Sender<Msg>) {
        self.unmount();
        for channel in Channel::ALL {
            let sink = sink.clone();
            self.subscriptions
                .push(channels.subscribe(channel, move |event| {
                    if sink.send(Msg::Backend(event)).is_err() {
                        poller_debug!("View gone, dropping {} event", channel);
                    }
                }));
        }
    }

    pub fn unmount(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            subscription.unsubscribe();
        }
    }

    pub fn is_mounted(&self) -> bool {
        !self.subscriptions.is_empty()
    }
}

impl Drop for ViewBinding {
    fn drop(&mut self) {
        self.unmount();
    }
}
