use crate::commitlog::Index;
use crate::replica::local_state::Term;
use crate::replica::peers::ReplicaId;
use crate::replica::write_ahead_log::{Command, LogEntry};

#[derive(Debug)]
pub(crate) struct AppendCommandOutput {
    pub(crate) term: Term,
    pub(crate) index: Index,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum AppendCommandError {
    #[error("Replica actor is dead RIP")]
    ActorExited,
}

#[derive(Debug)]
pub(crate) struct VoteInput {
    pub(crate) candidate_id: ReplicaId,
    pub(crate) candidate_term: Term,
    pub(crate) candidate_last_log_entry: Option<(Term, Index)>,
}

#[derive(Debug, PartialEq)]
pub(crate) struct VoteOutput {
    pub(crate) term: Term,
    pub(crate) granted: bool,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum VoteError {
    #[error("We (server) are unavailable because actor is dead RIP")]
    ActorExited,
}

#[derive(Debug)]
pub(crate) struct AppendEntriesInput {
    pub(crate) leader_id: ReplicaId,
    pub(crate) leader_term: Term,
    // "Previous log entry" is the log entry immediately preceding the new ones in AppendEntriesInput.
    pub(crate) leader_previous_log_entry: Option<LogEntry>,
    pub(crate) leader_commit_index: Option<Index>,
    pub(crate) new_entries: Vec<LogEntry>,
}

#[derive(Debug, PartialEq)]
pub(crate) struct AppendEntriesOutput {
    pub(crate) term: Term,
}

#[derive(Debug, thiserror::Error, PartialEq)]
pub(crate) enum AppendEntriesError {
    #[error("Client is not in cluster")]
    ClientNotInCluster,
    #[error("Client's term is out of date")]
    ClientTermOutOfDate { current_term: Term },
    #[error("We (server) are missing previous log entry")]
    ServerMissingPreviousLogEntry { current_term: Term },
    #[error("We (server) are unavailable because actor is dead RIP")]
    ActorExited,
}

impl AppendEntriesError {
    /// The term to put on the wire alongside `success=false`. None for rejections that aren't
    /// about the log, which go out as RPC errors instead.
    pub(crate) fn current_term(&self) -> Option<Term> {
        match self {
            AppendEntriesError::ClientTermOutOfDate { current_term }
            | AppendEntriesError::ServerMissingPreviousLogEntry { current_term } => Some(*current_term),
            AppendEntriesError::ClientNotInCluster | AppendEntriesError::ActorExited => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum GetLeaderError {
    #[error("Replica actor is dead RIP")]
    ActorExited,
}

#[derive(Debug)]
pub(crate) struct VoteReplyFromPeer {
    pub(crate) peer_id: ReplicaId,
    pub(crate) term: Term,
    pub(crate) result: VoteResult,
}

#[derive(Debug)]
pub(crate) enum VoteResult {
    Granted,
    NotGranted { peer_term: Term },
    Unreachable(String),
}

/// HeartbeatTick is a single tick of the leader's heartbeat timer for `term`.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct HeartbeatTick {
    pub(crate) term: Term,
}

/// HeartbeatRoundResult carries every peer's reply to one round of AppendEntries.
#[derive(Debug)]
pub(crate) struct HeartbeatRoundResult {
    pub(crate) term: Term,
    pub(crate) seq_no: u64,
    // Leader's last log index when the round started.
    pub(crate) last_log_index: Option<Index>,
    pub(crate) replies: Vec<AppendEntriesReplyFromPeer>,
}

#[derive(Debug)]
pub(crate) struct AppendEntriesReplyFromPeer {
    pub(crate) descriptor: AppendEntriesReplyFromPeerDescriptor,
    pub(crate) result: Result<(), AppendEntriesReplyFromPeerError>,
}

// This is basically info about the original request
#[derive(Debug, Clone)]
pub(crate) struct AppendEntriesReplyFromPeerDescriptor {
    pub(crate) peer_id: ReplicaId,
    pub(crate) previous_log_entry_index: Option<Index>,
    pub(crate) num_log_entries: usize,
}

#[derive(Debug)]
pub(crate) enum AppendEntriesReplyFromPeerError {
    PeerMissingPreviousLogEntry,
    StaleTerm { new_term: Term },
    Unreachable(String),
}

/// A command that originated on this node. The caller applies it to the state machine itself.
#[derive(Debug)]
pub(crate) struct AppendCommandInput {
    pub(crate) command: Command,
}
