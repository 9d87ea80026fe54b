use crate::replica::ReplicaId;
use tokio::sync::watch;

/// ElectionStateSnapshot is a point-in-time view of a node's role.
#[derive(Clone, Debug, PartialEq)]
pub enum ElectionStateSnapshot {
    Leader,
    Candidate,
    Follower(ReplicaId),
    FollowerNoLeader,
}

pub(super) fn new(initial_state: ElectionStateSnapshot) -> (ElectionStateChangeNotifier, ElectionStateChangeListener) {
    let (snd, rcv) = watch::channel(initial_state);

    (ElectionStateChangeNotifier { snd }, ElectionStateChangeListener { rcv })
}

pub(super) struct ElectionStateChangeNotifier {
    snd: watch::Sender<ElectionStateSnapshot>,
}

impl ElectionStateChangeNotifier {
    pub(super) fn notify_new_state(&self, new_state: ElectionStateSnapshot) {
        // Nobody listening is fine.
        let _ = self.snd.send(new_state);
    }
}

/// ElectionStateChangeListener observes role changes of one node. Intermediate states may be
/// skipped if the listener falls behind; `next()` always returns the latest one.
#[derive(Clone)]
pub struct ElectionStateChangeListener {
    rcv: watch::Receiver<ElectionStateSnapshot>,
}

impl ElectionStateChangeListener {
    /// Waits for the next change. Returns None once the node has shut down.
    pub async fn next(&mut self) -> Option<ElectionStateSnapshot> {
        match self.rcv.changed().await {
            Ok(_) => Some(self.rcv.borrow().clone()),
            Err(_) => None,
        }
    }

    pub fn current(&self) -> ElectionStateSnapshot {
        self.rcv.borrow().clone()
    }
}
