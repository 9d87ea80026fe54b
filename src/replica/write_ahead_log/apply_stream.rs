use crate::commitlog::Index;
use crate::replica::write_ahead_log::Command;
use tokio::sync::mpsc;

pub(super) struct ApplyStreamPublisher {
    sender: mpsc::UnboundedSender<ReplicatedEntry>,
}

/// ApplyStream yields entries received from the leader, in log order, for the application to
/// apply to its state machine. Entries that originated on this node never show up here.
pub(crate) struct ApplyStream {
    receiver: mpsc::UnboundedReceiver<ReplicatedEntry>,
}

#[derive(Debug)]
pub(crate) struct ReplicatedEntry {
    pub(crate) index: Index,
    pub(crate) command: Command,
}

pub(super) fn new() -> (ApplyStreamPublisher, ApplyStream) {
    let (tx, rx) = mpsc::unbounded_channel();

    (ApplyStreamPublisher { sender: tx }, ApplyStream { receiver: rx })
}

impl ApplyStreamPublisher {
    pub(super) fn publish(&self, logger: &slog::Logger, index: Index, command: Command) {
        if self.sender.send(ReplicatedEntry { index, command }).is_err() {
            slog::warn!(logger, "ApplyStream has disconnected.");
        }
    }
}

impl ApplyStream {
    pub(crate) async fn recv(&mut self) -> Option<ReplicatedEntry> {
        self.receiver.recv().await
    }
}
