use crate::actor::WeakActorClient;
use crate::commitlog::{Index, Log};
use crate::grpc::{ProtoAppendEntriesReq, ProtoLogEntry, ProtoVoteReq};
use crate::replica::election::{CurrentLeader, ElectionState};
use crate::replica::local_state::{PersistentLocalState, Term};
use crate::replica::peer_calls::{self, PeerAppendEntriesCall};
use crate::replica::peers::{ClusterTracker, ReplicaId};
use crate::replica::replica_api::{
    AppendCommandInput, AppendCommandOutput, AppendEntriesError, AppendEntriesInput, AppendEntriesOutput,
    AppendEntriesReplyFromPeerDescriptor, AppendEntriesReplyFromPeerError, HeartbeatRoundResult, HeartbeatTick,
    VoteInput, VoteOutput, VoteReplyFromPeer, VoteResult,
};
use crate::replica::write_ahead_log::{LogEntry, WriteAheadLog};
use crate::server::RpcServerShutdownHandle;
use std::cmp;
use std::time::Duration;

/// Replica is the raft state of one node. It is only ever touched from the actor's event loop, so
/// every method is synchronous and anything slow is spawned and comes back as a new event.
pub(crate) struct Replica<L>
where
    L: Log<LogEntry>,
{
    logger: slog::Logger,
    my_replica_id: ReplicaId,
    cluster_tracker: ClusterTracker,
    local_state: Box<dyn PersistentLocalState + Send>,
    election_state: ElectionState,
    write_ahead_log: WriteAheadLog<L>,
    actor_client: WeakActorClient,
    peer_rpc_timeout: Duration,
    // Dropped along with the replica, which stops our RPC server.
    _server_shutdown_handle: RpcServerShutdownHandle,
}

impl<L> Replica<L>
where
    L: Log<LogEntry>,
{
    #[allow(clippy::too_many_arguments)]
    pub(super) fn new(
        logger: slog::Logger,
        my_replica_id: ReplicaId,
        cluster_tracker: ClusterTracker,
        local_state: Box<dyn PersistentLocalState + Send>,
        election_state: ElectionState,
        write_ahead_log: WriteAheadLog<L>,
        actor_client: WeakActorClient,
        peer_rpc_timeout: Duration,
        server_shutdown_handle: RpcServerShutdownHandle,
    ) -> Self {
        Replica {
            logger,
            my_replica_id,
            cluster_tracker,
            local_state,
            election_state,
            write_ahead_log,
            actor_client,
            peer_rpc_timeout,
            _server_shutdown_handle: server_shutdown_handle,
        }
    }

    /// Appends a command that this node accepted and has already applied. Any node appends, not
    /// only the leader. The leader's log wins when they disagree.
    pub(crate) fn handle_append_command(&mut self, input: AppendCommandInput) -> AppendCommandOutput {
        let term = self.local_state.current_term();
        let index = self.write_ahead_log.append_applied(term, input.command);
        slog::debug!(self.logger, "Appended local command at {:?} in term {:?}", index, term);

        AppendCommandOutput { term, index }
    }

    pub(crate) fn handle_vote(&mut self, input: VoteInput) -> VoteOutput {
        if !self.cluster_tracker.contains_member(&input.candidate_id) {
            let term = self.local_state.current_term();
            slog::warn!(self.logger, "Not granting vote to non-member {:?}", input.candidate_id);
            return VoteOutput { term, granted: false };
        }

        let current_term = self.local_state.current_term();
        if input.candidate_term < current_term {
            slog::info!(
                self.logger,
                "Not granting vote to {:?}. Candidate term {:?} is behind ours {:?}.",
                input.candidate_id,
                input.candidate_term,
                current_term
            );
            return VoteOutput {
                term: current_term,
                granted: false,
            };
        }

        // > If RPC request or response contains term T > currentTerm:
        // > set currentTerm = T, convert to follower (§5.1)
        if self.local_state.store_term_if_increased(input.candidate_term) {
            self.election_state.transition_to_follower(None);
            slog::info!(
                self.logger,
                "Observed term {:?} in Vote call. Election state: {:?}",
                input.candidate_term,
                self.election_state
            );
        }

        let (current_term, voted_for) = self.local_state.voted_for_current_term();
        let granted = match voted_for {
            Some(voted_for) => *voted_for == input.candidate_id,
            None => self
                .local_state
                .store_vote_for_term_if_unvoted(current_term, input.candidate_id.clone()),
        };

        if granted {
            slog::info!(self.logger, "Voting for {:?} in term {:?}", input.candidate_id, current_term);
            self.election_state.reset_timeout_if_follower();
        } else {
            slog::info!(
                self.logger,
                "Not granting vote to {:?}. Already voted in term {:?}.",
                input.candidate_id,
                current_term
            );
        }

        VoteOutput {
            term: current_term,
            granted,
        }
    }

    pub(crate) fn handle_vote_reply_from_peer(&mut self, reply: VoteReplyFromPeer) {
        let current_term = self.local_state.current_term();

        if let VoteResult::NotGranted { peer_term } = &reply.result {
            if self.local_state.store_term_if_increased(*peer_term) {
                self.election_state.transition_to_follower(None);
                slog::info!(
                    self.logger,
                    "Peer {:?} is on newer term {:?}. Transitioned to follower.",
                    reply.peer_id,
                    peer_term
                );
                return;
            }
        }

        if current_term != reply.term {
            slog::debug!(
                self.logger,
                "Received vote reply for outdated term {:?}, current term: {:?}.",
                reply.term,
                current_term,
            );
            return;
        }

        match reply.result {
            VoteResult::Granted => {
                let num_votes_received = match self.election_state.add_vote_if_candidate(reply.peer_id) {
                    Some(v) => v,
                    None => {
                        slog::debug!(
                            self.logger,
                            "Received vote for term {:?} as {:?}",
                            reply.term,
                            self.election_state,
                        );
                        return;
                    }
                };

                let num_voting_replicas = self.cluster_tracker.num_voting_replicas();
                slog::info!(
                    self.logger,
                    "Received {}/{} votes for term {:?}",
                    num_votes_received,
                    num_voting_replicas,
                    reply.term,
                );

                if is_majority(num_votes_received, num_voting_replicas) {
                    self.become_leader(reply.term);
                }
            }
            VoteResult::NotGranted { .. } => {
                slog::info!(self.logger, "Vote not granted from {:?} for term {:?}", reply.peer_id, reply.term);
            }
            VoteResult::Unreachable(e) => {
                // No retry. The next election timeout starts a fresh round.
                slog::debug!(self.logger, "Vote call to {:?} failed: {}", reply.peer_id, e);
            }
        }
    }

    fn become_leader(&mut self, term: Term) {
        self.election_state.transition_to_leader(
            term,
            self.cluster_tracker.peer_ids(),
            self.write_ahead_log.latest_entry().map(|(_, index)| index),
        );
        slog::info!(self.logger, "Became leader for term {:?}", term);
    }

    pub(crate) fn handle_append_entries(
        &mut self,
        input: AppendEntriesInput,
    ) -> Result<AppendEntriesOutput, AppendEntriesError> {
        if !self.cluster_tracker.contains_member(&input.leader_id) || input.leader_id == self.my_replica_id {
            return Err(AppendEntriesError::ClientNotInCluster);
        }
        let current_term = self.local_state.current_term();

        // 1. Reply false if term < currentTerm (§5.1)
        if input.leader_term < current_term {
            return Err(AppendEntriesError::ClientTermOutOfDate { current_term });
        }

        let increased = self.local_state.store_term_if_increased(input.leader_term);
        if increased || !self.election_state.is_follower_of(&input.leader_id) {
            self.election_state.transition_to_follower(Some(input.leader_id.clone()));
            slog::info!(
                self.logger,
                "Following {:?} for term {:?}",
                input.leader_id,
                input.leader_term
            );
        } else {
            self.election_state.reset_timeout_if_follower();
        }
        let current_term = input.leader_term;

        // 2. Reply false if log doesn't contain an entry at prevLogIndex whose term matches
        // prevLogTerm (§5.3)
        // The command has to match too. Entries we appended locally can share a term with the
        // leader's while holding something else.
        if let Some(leader_prev_entry) = &input.leader_previous_log_entry {
            match self.write_ahead_log.read(leader_prev_entry.index) {
                Some(entry) if !entry.conflicts_with(leader_prev_entry) => {}
                _ => return Err(AppendEntriesError::ServerMissingPreviousLogEntry { current_term }),
            }
        }

        // 3. If an existing entry conflicts with a new one, delete it and all that follow (§5.3)
        // 4. Append any new entries not already in the log
        let mut next_index = input
            .leader_previous_log_entry
            .as_ref()
            .map(|entry| entry.index.plus(1))
            .unwrap_or_else(Index::start_index);
        for new_entry in input.new_entries {
            if let Some(existing) = self.write_ahead_log.read(next_index) {
                if !existing.conflicts_with(&new_entry) {
                    next_index = next_index.plus(1);
                    continue;
                }
                slog::info!(self.logger, "Replacing conflicting entries from {:?}", next_index);
                self.write_ahead_log.truncate(next_index);
            }

            let appended_index = self
                .write_ahead_log
                .append_replicated(new_entry.term, new_entry.command);
            debug_assert_eq!(appended_index, next_index);
            next_index = next_index.plus(1);
        }

        // 5. If leaderCommit > commitIndex, set commitIndex = min(leaderCommit, index of last new entry)
        if let (Some(leader_commit_index), Some(last_new_index)) =
            (input.leader_commit_index, next_index.checked_minus(1))
        {
            self.write_ahead_log
                .ratchet_fwd_commit_index(cmp::min(leader_commit_index, last_new_index));
        }

        self.write_ahead_log.apply_all_unapplied_entries();

        Ok(AppendEntriesOutput { term: current_term })
    }

    pub(crate) fn handle_heartbeat_tick(&mut self, tick: HeartbeatTick) {
        let current_term = self.local_state.current_term();
        if tick.term != current_term {
            slog::debug!(self.logger, "Dropping heartbeat tick for old term {:?}", tick.term);
            return;
        }

        let leader_state = match self.election_state.leader_state_mut() {
            Some(leader_state) => leader_state,
            None => return,
        };
        let seq_no = match leader_state.start_round() {
            Some(seq_no) => seq_no,
            None => {
                slog::debug!(self.logger, "Previous heartbeat round is still outstanding");
                return;
            }
        };

        let commit_index = Index::to_wire(self.write_ahead_log.commit_index());
        let last_log_index = self.write_ahead_log.latest_entry().map(|(_, index)| index);

        let mut calls = Vec::new();
        for (peer_id, peer_state) in leader_state.peers_iter() {
            let peer = match self.cluster_tracker.peer(peer_id) {
                Some(peer) => peer,
                None => continue,
            };

            let (next_index, previous_index) = peer_state.next_and_previous_log_index();
            let previous_entry = match previous_index {
                None => None,
                Some(index) => match self.write_ahead_log.read(index) {
                    Some(entry) => Some(entry),
                    None => {
                        slog::error!(
                            self.logger,
                            "Peer {:?} is ahead of our log at {:?}. Skipping it this round.",
                            peer_id,
                            index
                        );
                        continue;
                    }
                },
            };
            let entries = self.write_ahead_log.entries_from(next_index);

            calls.push(PeerAppendEntriesCall {
                client: peer.client.clone(),
                request: ProtoAppendEntriesReq {
                    leader_address: self.my_replica_id.as_str().to_string(),
                    term: current_term.as_u64(),
                    prev_log_index: Index::to_wire(previous_index),
                    prev_log_term: previous_entry.as_ref().map(|entry| entry.term.as_u64()).unwrap_or(0),
                    entries: entries.iter().map(ProtoLogEntry::from).collect(),
                    commit_index,
                    prev_log_entry: previous_entry.as_ref().map(ProtoLogEntry::from),
                },
                descriptor: AppendEntriesReplyFromPeerDescriptor {
                    peer_id: peer_id.clone(),
                    previous_log_entry_index: previous_index,
                    num_log_entries: entries.len(),
                },
            });
        }

        tokio::task::spawn(peer_calls::run_heartbeat_round(
            self.logger.clone(),
            calls,
            self.actor_client.clone(),
            current_term,
            seq_no,
            last_log_index,
            self.peer_rpc_timeout,
        ));
    }

    pub(crate) fn handle_heartbeat_round_result(&mut self, round: HeartbeatRoundResult) {
        let logger = self.logger.new(slog::o!("SeqNo" => round.seq_no));
        let current_term = self.local_state.current_term();
        if round.term != current_term {
            slog::debug!(logger, "Dropping round result for old term {:?}", round.term);
            return;
        }

        let num_voting_replicas = self.cluster_tracker.num_voting_replicas();
        let leader_state = match self.election_state.leader_state_mut() {
            Some(leader_state) => leader_state,
            None => return,
        };
        if !leader_state.finish_round(round.seq_no) {
            slog::warn!(logger, "Dropping round result that isn't outstanding");
            return;
        }

        // We count toward both.
        let mut acknowledged = 1;
        let mut replicated = 1;
        let mut newer_term = None;
        for reply in round.replies {
            let peer_id = &reply.descriptor.peer_id;
            match reply.result {
                Ok(()) => {
                    acknowledged += 1;
                    replicated += 1;
                    if let Some(peer_state) = leader_state.peer_state_mut(peer_id) {
                        peer_state.record_success(
                            reply.descriptor.previous_log_entry_index,
                            reply.descriptor.num_log_entries,
                        );
                        slog::debug!(logger, "Peer {:?} matches up to {:?}", peer_id, peer_state.matched());
                    }
                }
                Err(AppendEntriesReplyFromPeerError::PeerMissingPreviousLogEntry) => {
                    acknowledged += 1;
                    slog::info!(logger, "Peer {:?} is missing previous log entry", peer_id);
                    if let Some(peer_state) = leader_state.peer_state_mut(peer_id) {
                        if !peer_state.rewind() {
                            slog::warn!(logger, "Can't rewind peer {:?}, already at start of log", peer_id);
                        }
                    }
                }
                Err(AppendEntriesReplyFromPeerError::StaleTerm { new_term }) => {
                    newer_term = cmp::max(newer_term, Some(new_term));
                }
                Err(AppendEntriesReplyFromPeerError::Unreachable(e)) => {
                    slog::debug!(logger, "AppendEntries to {:?} failed: {}", peer_id, e);
                }
            }
        }

        if let Some(new_term) = newer_term {
            if self.local_state.store_term_if_increased(new_term) {
                self.election_state.transition_to_follower(None);
                slog::info!(logger, "Peer is on newer term {:?}. Transitioned to follower.", new_term);
                return;
            }
        }

        if !is_majority(acknowledged, num_voting_replicas) {
            slog::warn!(
                logger,
                "Only {}/{} nodes acknowledged term {:?}. Stepping down.",
                acknowledged,
                num_voting_replicas,
                current_term
            );
            self.election_state.transition_to_follower(None);
            return;
        }

        if is_majority(replicated, num_voting_replicas) {
            if let Some(last_log_index) = round.last_log_index {
                self.write_ahead_log.ratchet_fwd_commit_index(last_log_index);
            }
        }
    }

    pub(crate) fn handle_election_timeout(&mut self) {
        if self.election_state.is_leader() {
            // Late event from a timer we've already dropped.
            return;
        }

        let new_term = self.local_state.increment_term_and_vote_for_self();
        let num_votes = self.election_state.transition_to_candidate_and_vote_for_self();
        slog::info!(self.logger, "Election timeout. Starting election for term {:?}", new_term);

        if is_majority(num_votes, self.cluster_tracker.num_voting_replicas()) {
            self.become_leader(new_term);
            return;
        }

        let request = self.new_vote_request(new_term);
        for peer in self.cluster_tracker.iter_peers() {
            tokio::task::spawn(peer_calls::call_peer_vote(
                self.logger.clone(),
                peer.client.clone(),
                peer.id.clone(),
                request.clone(),
                self.actor_client.clone(),
                new_term,
                self.peer_rpc_timeout,
            ));
        }
    }

    fn new_vote_request(&self, term: Term) -> ProtoVoteReq {
        let last_log_entry = self.write_ahead_log.latest_entry();

        ProtoVoteReq {
            candidate_id: self.my_replica_id.as_str().to_string(),
            candidate_term: term.as_u64(),
            last_log_index: Index::to_wire(last_log_entry.map(|(_, index)| index)),
            last_log_term: last_log_entry.map(|(term, _)| term.as_u64()).unwrap_or(0),
        }
    }

    pub(crate) fn current_leader(&self) -> Option<ReplicaId> {
        match self.election_state.current_leader() {
            CurrentLeader::Me => Some(self.my_replica_id.clone()),
            CurrentLeader::Other(leader_id) => Some(leader_id),
            CurrentLeader::Unknown => None,
        }
    }
}

/// A strict majority of the cluster, counting ourselves.
fn is_majority(count: usize, num_voting_replicas: usize) -> bool {
    count * 2 > num_voting_replicas
}
