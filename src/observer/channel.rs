use super::TableObserver;
use crate::domain::TableEvent;
use tokio::sync::mpsc;

/// Forwards events into an unbounded channel.
///
/// Sending never waits, so a slow consumer grows the buffer instead of stalling a
/// philosopher. Events are silently dropped once the receiver is gone.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: mpsc::UnboundedSender<TableEvent>,
}

impl ChannelObserver {
    /// Creates the observer and the receiving end for the consumer.
    pub fn new() -> (Self, mpsc::UnboundedReceiver<TableEvent>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl TableObserver for ChannelObserver {
    fn notify(&self, event: &TableEvent) {
        let _ = self.sender.send(*event);
    }
}
