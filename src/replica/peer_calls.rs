//! Outbound peer RPCs. Each call runs in its own task and reports back to the actor as an event,
//! so the actor never waits on the network.

use crate::actor::WeakActorClient;
use crate::grpc::{ProtoAppendEntriesReq, ProtoVoteReq};
use crate::replica::local_state::Term;
use crate::replica::peer_client::PeerClient;
use crate::replica::peers::ReplicaId;
use crate::replica::replica_api::{
    AppendEntriesReplyFromPeer, AppendEntriesReplyFromPeerDescriptor, AppendEntriesReplyFromPeerError,
    HeartbeatRoundResult, VoteReplyFromPeer, VoteResult,
};
use crate::commitlog::Index;
use std::time::Duration;

pub(super) async fn call_peer_vote(
    logger: slog::Logger,
    mut client: PeerClient,
    peer_id: ReplicaId,
    request: ProtoVoteReq,
    actor_client: WeakActorClient,
    term: Term,
    timeout: Duration,
) {
    slog::debug!(logger, "ClientWire - {:?}", request);
    let result = match client.vote(request, timeout).await {
        Ok(reply) => {
            slog::debug!(logger, "ClientWire - {:?}", reply);
            if reply.granted {
                VoteResult::Granted
            } else {
                VoteResult::NotGranted {
                    peer_term: Term::new(reply.term),
                }
            }
        }
        Err(e) => VoteResult::Unreachable(e.to_string()),
    };

    let _ = actor_client
        .vote_reply_from_peer(VoteReplyFromPeer { peer_id, term, result })
        .await;
}

/// One peer's share of a heartbeat round.
pub(super) struct PeerAppendEntriesCall {
    pub(super) client: PeerClient,
    pub(super) request: ProtoAppendEntriesReq,
    pub(super) descriptor: AppendEntriesReplyFromPeerDescriptor,
}

/// Sends every call of the round in parallel and reports all replies to the actor at once.
pub(super) async fn run_heartbeat_round(
    logger: slog::Logger,
    calls: Vec<PeerAppendEntriesCall>,
    actor_client: WeakActorClient,
    term: Term,
    seq_no: u64,
    last_log_index: Option<Index>,
    timeout: Duration,
) {
    let handles: Vec<_> = calls
        .into_iter()
        .map(|call| tokio::task::spawn(call_peer_append_entries(logger.clone(), call, term, timeout)))
        .collect();

    let mut replies = Vec::with_capacity(handles.len());
    for handle in handles {
        match handle.await {
            Ok(reply) => replies.push(reply),
            Err(e) => slog::error!(logger, "AppendEntries task failed: {:?}", e),
        }
    }

    let _ = actor_client
        .heartbeat_round_result(HeartbeatRoundResult {
            term,
            seq_no,
            last_log_index,
            replies,
        })
        .await;
}

async fn call_peer_append_entries(
    logger: slog::Logger,
    mut call: PeerAppendEntriesCall,
    term: Term,
    timeout: Duration,
) -> AppendEntriesReplyFromPeer {
    let logger = logger.new(slog::o!("Peer" => format!("{:?}", call.descriptor.peer_id)));
    slog::debug!(
        logger,
        "ClientWire - AppendEntries(term={}, prev_log_index={}, entries={}, commit_index={})",
        call.request.term,
        call.request.prev_log_index,
        call.request.entries.len(),
        call.request.commit_index
    );

    let result = match call.client.append_entries(call.request, timeout).await {
        Ok(reply) => {
            slog::debug!(logger, "ClientWire - {:?}", reply);
            if reply.success {
                Ok(())
            } else if reply.term > term.as_u64() {
                Err(AppendEntriesReplyFromPeerError::StaleTerm {
                    new_term: Term::new(reply.term),
                })
            } else {
                // Peers refuse non-members with an RPC error, so this is a log mismatch.
                Err(AppendEntriesReplyFromPeerError::PeerMissingPreviousLogEntry)
            }
        }
        Err(e) => Err(AppendEntriesReplyFromPeerError::Unreachable(e.to_string())),
    };

    AppendEntriesReplyFromPeer {
        descriptor: call.descriptor,
        result,
    }
}
