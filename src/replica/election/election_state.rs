use crate::actor::WeakActorClient;
use crate::commitlog::Index;
use crate::replica::election::state_change_listener::{self, ElectionStateChangeNotifier};
use crate::replica::election::timers::{ElectionTimerHandle, HeartbeatTimerHandle};
use crate::replica::election::{ElectionStateChangeListener, ElectionStateSnapshot, LeaderStateTracker};
use crate::replica::{ReplicaId, Term};
use std::collections::HashSet;
use std::fmt;
use std::time::Duration;

#[derive(Clone)]
pub(crate) struct ElectionConfig {
    pub my_replica_id: ReplicaId,
    pub leader_heartbeat_duration: Duration,
    pub follower_min_timeout: Duration,
    pub follower_max_timeout: Duration,
}

/// ElectionState holds what is specific to a node's role and owns the role's timer. Its methods
/// are "what" to do. Validating terms and logs, and knowing "when", is up to the caller.
pub(crate) struct ElectionState {
    state: State,
    config: ElectionConfig,
    actor_client: WeakActorClient,
    state_change_notifier: ElectionStateChangeNotifier,
}

pub(crate) enum CurrentLeader {
    Me,
    Other(ReplicaId),
    Unknown,
}

impl ElectionState {
    /// Every node starts out as a follower that doesn't know the leader.
    pub(crate) fn new_follower(
        config: ElectionConfig,
        actor_client: WeakActorClient,
    ) -> (Self, ElectionStateChangeListener) {
        let initial_state = State::Follower(FollowerState::new(None, &config, actor_client.clone()));
        let (notifier, listener) = state_change_listener::new(Self::current_state_impl(&initial_state));

        let election_state = Self {
            state: initial_state,
            config,
            actor_client,
            state_change_notifier: notifier,
        };

        (election_state, listener)
    }

    pub(crate) fn transition_to_follower(&mut self, new_leader: Option<ReplicaId>) {
        self.state = State::Follower(FollowerState::new(new_leader, &self.config, self.actor_client.clone()));
        self.notify_new_state();
    }

    /// Returns the number of votes we hold, which is our own.
    pub(crate) fn transition_to_candidate_and_vote_for_self(&mut self) -> usize {
        let mut cs = CandidateState::new(&self.config, self.actor_client.clone());
        let votes = cs.add_received_vote(self.config.my_replica_id.clone());

        self.state = State::Candidate(cs);
        self.notify_new_state();

        votes
    }

    pub(crate) fn transition_to_leader(
        &mut self,
        term: Term,
        peer_ids: HashSet<ReplicaId>,
        latest_log_index: Option<Index>,
    ) {
        self.state = State::Leader(LeaderState {
            tracker: LeaderStateTracker::new(peer_ids, latest_log_index),
            _heartbeat_timer: HeartbeatTimerHandle::spawn_timer_task(
                self.config.leader_heartbeat_duration,
                self.actor_client.clone(),
                term,
            ),
        });
        self.notify_new_state();
    }

    pub(crate) fn current_state(&self) -> ElectionStateSnapshot {
        Self::current_state_impl(&self.state)
    }

    fn current_state_impl(state: &State) -> ElectionStateSnapshot {
        match state {
            State::Leader(_) => ElectionStateSnapshot::Leader,
            State::Candidate(_) => ElectionStateSnapshot::Candidate,
            State::Follower(FollowerState { leader: None, .. }) => ElectionStateSnapshot::FollowerNoLeader,
            State::Follower(FollowerState { leader: Some(leader), .. }) => {
                ElectionStateSnapshot::Follower(leader.clone())
            }
        }
    }

    fn notify_new_state(&self) {
        self.state_change_notifier.notify_new_state(self.current_state());
    }

    pub(crate) fn current_leader(&self) -> CurrentLeader {
        match &self.state {
            State::Leader(_) => CurrentLeader::Me,
            State::Follower(FollowerState { leader: Some(leader), .. }) => CurrentLeader::Other(leader.clone()),
            State::Follower(FollowerState { leader: None, .. }) | State::Candidate(_) => CurrentLeader::Unknown,
        }
    }

    pub(crate) fn is_leader(&self) -> bool {
        matches!(self.state, State::Leader(_))
    }

    pub(crate) fn is_follower_of(&self, leader_id: &ReplicaId) -> bool {
        matches!(&self.state, State::Follower(FollowerState { leader: Some(leader), .. }) if leader == leader_id)
    }

    pub(crate) fn reset_timeout_if_follower(&self) {
        if let State::Follower(fs) = &self.state {
            fs.election_timer.reset_timeout();
        }
    }

    /// Return number of votes received if candidate, or None if no longer Candidate.
    pub(crate) fn add_vote_if_candidate(&mut self, vote_from: ReplicaId) -> Option<usize> {
        if let State::Candidate(cs) = &mut self.state {
            Some(cs.add_received_vote(vote_from))
        } else {
            None
        }
    }

    pub(crate) fn leader_state_mut(&mut self) -> Option<&mut LeaderStateTracker> {
        if let State::Leader(ls) = &mut self.state {
            Some(&mut ls.tracker)
        } else {
            None
        }
    }
}

impl fmt::Debug for ElectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.state {
            State::Leader(_) => write!(f, "Leader"),
            State::Candidate(cs) => write!(f, "Candidate(Votes={})", cs.received_votes_from.len()),
            State::Follower(FollowerState { leader: Some(leader), .. }) => write!(f, "Follower(Leader={:?})", leader),
            State::Follower(FollowerState { leader: None, .. }) => write!(f, "Follower(Leader=None)"),
        }
    }
}

enum State {
    Leader(LeaderState),
    Candidate(CandidateState),
    Follower(FollowerState),
}

struct LeaderState {
    tracker: LeaderStateTracker,
    _heartbeat_timer: HeartbeatTimerHandle,
}

struct CandidateState {
    received_votes_from: HashSet<ReplicaId>,
    _election_timer: ElectionTimerHandle,
}

struct FollowerState {
    leader: Option<ReplicaId>,
    election_timer: ElectionTimerHandle,
}

impl CandidateState {
    fn new(config: &ElectionConfig, actor_client: WeakActorClient) -> Self {
        Self {
            received_votes_from: HashSet::with_capacity(3),
            _election_timer: ElectionTimerHandle::spawn_timer_task(
                config.follower_min_timeout,
                config.follower_max_timeout,
                actor_client,
            ),
        }
    }

    /// Returns the number of unique votes after adding `vote_from`.
    fn add_received_vote(&mut self, vote_from: ReplicaId) -> usize {
        self.received_votes_from.insert(vote_from);
        self.received_votes_from.len()
    }
}

impl FollowerState {
    fn new(leader: Option<ReplicaId>, config: &ElectionConfig, actor_client: WeakActorClient) -> Self {
        Self {
            leader,
            election_timer: ElectionTimerHandle::spawn_timer_task(
                config.follower_min_timeout,
                config.follower_max_timeout,
                actor_client,
            ),
        }
    }
}
