use crate::commitlog::Index;
use crate::replica::ReplicaId;
use std::collections::{HashMap, HashSet};

/// LeaderStateTracker is the leader's view of its followers for a single term.
pub(crate) struct LeaderStateTracker {
    peer_state: HashMap<ReplicaId, PeerState>,

    // SeqNo is a logical clock over heartbeat rounds. Only one round is in flight at a time; a
    // result for any other round is dropped.
    last_sent_seq_no: u64,
    last_received_seq_no: u64,
}

impl LeaderStateTracker {
    pub(super) fn new(peer_ids: HashSet<ReplicaId>, latest_log_index: Option<Index>) -> Self {
        let peer_state = peer_ids
            .into_iter()
            .map(|id| (id, PeerState::new(latest_log_index)))
            .collect();

        LeaderStateTracker {
            peer_state,
            last_sent_seq_no: 0,
            last_received_seq_no: 0,
        }
    }

    pub(crate) fn peer_state_mut(&mut self, peer_id: &ReplicaId) -> Option<&mut PeerState> {
        self.peer_state.get_mut(peer_id)
    }

    pub(crate) fn peers_iter(&self) -> impl Iterator<Item = (&ReplicaId, &PeerState)> {
        self.peer_state.iter()
    }

    /// Returns the new round's seq-no, or None while the previous round is still outstanding.
    pub(crate) fn start_round(&mut self) -> Option<u64> {
        if self.last_received_seq_no < self.last_sent_seq_no {
            return None;
        }

        self.last_sent_seq_no += 1;
        Some(self.last_sent_seq_no)
    }

    /// Returns true if `seq_no` is the outstanding round, which is now finished.
    pub(crate) fn finish_round(&mut self, seq_no: u64) -> bool {
        if self.last_received_seq_no < seq_no && seq_no <= self.last_sent_seq_no {
            self.last_received_seq_no = seq_no;
            true
        } else {
            false
        }
    }
}

#[derive(Debug, PartialEq)]
pub(crate) struct PeerState {
    // > index of the next log entry to send to that server
    // > (initialized to leader last log index + 1)
    next: Index,
    // > index of highest log entry known to be replicated on server
    matched: Option<Index>,
}

impl PeerState {
    fn new(latest_log_index: Option<Index>) -> Self {
        PeerState {
            next: latest_log_index
                .map(|i| i.plus(1))
                .unwrap_or_else(Index::start_index),
            matched: None,
        }
    }

    pub(crate) fn next_and_previous_log_index(&self) -> (Index, Option<Index>) {
        (self.next, self.next.checked_minus(1))
    }

    pub(crate) fn matched(&self) -> Option<Index> {
        self.matched
    }

    /// The peer accepted `num_entries` entries that followed `previous_log_index`.
    pub(crate) fn record_success(&mut self, previous_log_index: Option<Index>, num_entries: usize) {
        let new_matched = match (previous_log_index, num_entries) {
            (prev, 0) => prev,
            (None, n) => Some(Index::new(n as u64 - 1)),
            (Some(prev), n) => Some(prev.plus(n as u64)),
        };

        if new_matched > self.matched {
            self.matched = new_matched;
        }
        if let Some(matched) = self.matched {
            if matched.plus(1) > self.next {
                self.next = matched.plus(1);
            }
        }
    }

    /// The peer doesn't hold our previous entry. Step back one entry; returns false if we were
    /// already at the start of the log.
    pub(crate) fn rewind(&mut self) -> bool {
        match self.next.checked_minus(1) {
            Some(new_next) => {
                self.next = new_next;
                if self.matched >= Some(new_next) {
                    self.matched = new_next.checked_minus(1);
                }
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker(latest: Option<Index>) -> LeaderStateTracker {
        let mut peers = HashSet::new();
        peers.insert(ReplicaId::new("127.0.0.1:1"));
        LeaderStateTracker::new(peers, latest)
    }

    #[test]
    fn one_round_outstanding_at_a_time() {
        let mut tracker = tracker(None);

        assert_eq!(tracker.start_round(), Some(1));
        assert_eq!(tracker.start_round(), None);
        assert!(!tracker.finish_round(2));
        assert!(tracker.finish_round(1));
        assert!(!tracker.finish_round(1));
        assert_eq!(tracker.start_round(), Some(2));
    }

    #[test]
    fn peer_starts_after_leader_log() {
        let empty = PeerState::new(None);
        assert_eq!(empty.next_and_previous_log_index(), (Index::new(0), None));

        let caught_up = PeerState::new(Some(Index::new(4)));
        assert_eq!(caught_up.next_and_previous_log_index(), (Index::new(5), Some(Index::new(4))));
        assert_eq!(caught_up.matched(), None);
    }

    #[test]
    fn success_moves_next_and_matched_forward() {
        let mut peer = PeerState::new(Some(Index::new(1)));

        peer.record_success(Some(Index::new(1)), 0);
        assert_eq!(peer.matched(), Some(Index::new(1)));
        assert_eq!(peer.next_and_previous_log_index().0, Index::new(2));

        peer.record_success(Some(Index::new(1)), 3);
        assert_eq!(peer.matched(), Some(Index::new(4)));
        assert_eq!(peer.next_and_previous_log_index().0, Index::new(5));

        let mut fresh = PeerState::new(None);
        fresh.record_success(None, 2);
        assert_eq!(fresh.matched(), Some(Index::new(1)));
        assert_eq!(fresh.next_and_previous_log_index().0, Index::new(2));
    }

    #[test]
    fn rewind_steps_back_until_start() {
        let mut peer = PeerState::new(Some(Index::new(1)));

        assert!(peer.rewind());
        assert_eq!(peer.next_and_previous_log_index(), (Index::new(1), Some(Index::new(0))));
        assert!(peer.rewind());
        assert_eq!(peer.next_and_previous_log_index(), (Index::new(0), None));
        assert!(!peer.rewind());
    }
}
