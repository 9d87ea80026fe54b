use crate::actor::WeakActorClient;
use crate::commitlog::Index;
use crate::grpc::grpc_raft_server::GrpcRaft;
use crate::grpc::{
    ProtoAppendEntriesReply, ProtoAppendEntriesReq, ProtoGetLeaderReply, ProtoGetLeaderReq, ProtoVoteReply,
    ProtoVoteReq,
};
use crate::replica::{
    AppendEntriesError, AppendEntriesInput, AppendEntriesOutput, LogEntry, ReplicaId, Term, VoteError, VoteInput,
    VoteOutput,
};
use std::convert::TryFrom;
use tonic::{Request, Response, Status};

/// RaftRpcServer is the type that implements the peer-to-peer consensus gRPC interface.
pub(crate) struct RaftRpcServer {
    logger: slog::Logger,
    local_replica: WeakActorClient,
}

impl RaftRpcServer {
    pub(crate) fn new(logger: slog::Logger, local_replica: WeakActorClient) -> Self {
        RaftRpcServer { logger, local_replica }
    }

    async fn handle_vote(&self, rpc_request: ProtoVoteReq) -> Result<ProtoVoteReply, Status> {
        let app_input = Self::convert_vote_input(rpc_request);
        let app_result = self.local_replica.vote(app_input).await;
        Self::convert_vote_result(app_result)
    }

    fn convert_vote_input(rpc_request: ProtoVoteReq) -> VoteInput {
        let candidate_last_log_entry = Index::from_wire(rpc_request.last_log_index)
            .map(|index| (Term::new(rpc_request.last_log_term), index));

        VoteInput {
            candidate_id: ReplicaId::new(rpc_request.candidate_id),
            candidate_term: Term::new(rpc_request.candidate_term),
            candidate_last_log_entry,
        }
    }

    fn convert_vote_result(app_result: Result<VoteOutput, VoteError>) -> Result<ProtoVoteReply, Status> {
        match app_result {
            Ok(output) => Ok(ProtoVoteReply {
                term: output.term.as_u64(),
                granted: output.granted,
            }),
            Err(VoteError::ActorExited) => Err(Status::unavailable("Server internal replica task has exited")),
        }
    }

    async fn handle_append_entries(&self, rpc_request: ProtoAppendEntriesReq) -> Result<ProtoAppendEntriesReply, Status> {
        let app_input = Self::convert_append_entries_input(rpc_request)?;
        let app_result = self.local_replica.append_entries(app_input).await;
        Self::convert_append_entries_result(app_result)
    }

    fn convert_append_entries_input(rpc_request: ProtoAppendEntriesReq) -> Result<AppendEntriesInput, Status> {
        let leader_previous_log_entry = match Index::from_wire(rpc_request.prev_log_index) {
            None => None,
            Some(index) => {
                let proto_entry = rpc_request
                    .prev_log_entry
                    .ok_or_else(|| Status::invalid_argument("prev_log_entry is required with prev_log_index"))?;
                let entry = LogEntry::try_from(proto_entry).map_err(|e| Status::invalid_argument(e.to_string()))?;
                if entry.index != index || entry.term.as_u64() != rpc_request.prev_log_term {
                    return Err(Status::invalid_argument("prev_log_entry doesn't match prev_log_index/term"));
                }
                Some(entry)
            }
        };

        let mut new_entries = Vec::with_capacity(rpc_request.entries.len());
        for proto_entry in rpc_request.entries {
            let entry = LogEntry::try_from(proto_entry).map_err(|e| Status::invalid_argument(e.to_string()))?;
            new_entries.push(entry);
        }

        Ok(AppendEntriesInput {
            leader_id: ReplicaId::new(rpc_request.leader_address),
            leader_term: Term::new(rpc_request.term),
            leader_previous_log_entry,
            leader_commit_index: Index::from_wire(rpc_request.commit_index),
            new_entries,
        })
    }

    fn convert_append_entries_result(
        app_result: Result<AppendEntriesOutput, AppendEntriesError>,
    ) -> Result<ProtoAppendEntriesReply, Status> {
        match app_result {
            Ok(output) => Ok(ProtoAppendEntriesReply {
                term: output.term.as_u64(),
                success: true,
            }),
            // Not a reply in any term, so the leader mustn't count it or rewind on it.
            Err(e @ AppendEntriesError::ClientNotInCluster) => Err(Status::permission_denied(e.to_string())),
            Err(e) => match e.current_term() {
                Some(term) => Ok(ProtoAppendEntriesReply {
                    term: term.as_u64(),
                    success: false,
                }),
                None => Err(Status::unavailable(e.to_string())),
            },
        }
    }

    async fn handle_get_leader(&self) -> Result<ProtoGetLeaderReply, Status> {
        match self.local_replica.get_leader().await {
            Ok(leader) => Ok(ProtoGetLeaderReply {
                leader_address: leader.map(ReplicaId::into_inner).unwrap_or_default(),
            }),
            Err(e) => Err(Status::unavailable(e.to_string())),
        }
    }
}

#[async_trait::async_trait]
impl GrpcRaft for RaftRpcServer {
    async fn vote(&self, rpc_request_wrapped: Request<ProtoVoteReq>) -> Result<Response<ProtoVoteReply>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(self.logger, "ServerWire - {:?}", rpc_request);
        let rpc_result = self.handle_vote(rpc_request).await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn append_entries(
        &self,
        rpc_request_wrapped: Request<ProtoAppendEntriesReq>,
    ) -> Result<Response<ProtoAppendEntriesReply>, Status> {
        let rpc_request = rpc_request_wrapped.into_inner();

        slog::debug!(
            self.logger,
            "ServerWire - AppendEntries(leader={}, term={}, prev_log_index={}, entries={}, commit_index={})",
            rpc_request.leader_address,
            rpc_request.term,
            rpc_request.prev_log_index,
            rpc_request.entries.len(),
            rpc_request.commit_index
        );
        let rpc_result = self.handle_append_entries(rpc_request).await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }

    async fn get_leader(
        &self,
        _rpc_request_wrapped: Request<ProtoGetLeaderReq>,
    ) -> Result<Response<ProtoGetLeaderReply>, Status> {
        let rpc_result = self.handle_get_leader().await;
        slog::debug!(self.logger, "ServerWire - {:?}", rpc_result);

        rpc_result.map(Response::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grpc::ProtoLogEntry;
    use crate::replica::Command;

    fn proto_entry(term: u64, index: u64, username: &str) -> ProtoLogEntry {
        ProtoLogEntry::from(&LogEntry {
            term: Term::new(term),
            index: Index::new(index),
            command: Command::Ending {
                username: username.to_string(),
            },
        })
    }

    #[test]
    fn absent_previous_entry_is_minus_one() {
        let input = RaftRpcServer::convert_append_entries_input(ProtoAppendEntriesReq {
            leader_address: "127.0.0.1:9000".into(),
            term: 3,
            prev_log_index: -1,
            prev_log_term: 0,
            entries: vec![],
            commit_index: -1,
            prev_log_entry: None,
        })
        .unwrap();

        assert_eq!(input.leader_id, ReplicaId::new("127.0.0.1:9000"));
        assert_eq!(input.leader_term, Term::new(3));
        assert_eq!(input.leader_previous_log_entry, None);
        assert_eq!(input.leader_commit_index, None);
    }

    #[test]
    fn entry_without_command_is_rejected() {
        let result = RaftRpcServer::convert_append_entries_input(ProtoAppendEntriesReq {
            leader_address: "127.0.0.1:9000".into(),
            term: 3,
            prev_log_index: 0,
            prev_log_term: 2,
            entries: vec![ProtoLogEntry {
                term: 3,
                index: 1,
                command: None,
            }],
            commit_index: 0,
            prev_log_entry: Some(proto_entry(2, 0, "amy")),
        });

        assert_eq!(result.unwrap_err().code(), tonic::Code::InvalidArgument);
    }

    #[test]
    fn previous_entry_carries_its_command() {
        let request = |prev_log_term, prev_log_entry| ProtoAppendEntriesReq {
            leader_address: "127.0.0.1:9000".into(),
            term: 3,
            prev_log_index: 0,
            prev_log_term,
            entries: vec![],
            commit_index: 0,
            prev_log_entry,
        };

        let input = RaftRpcServer::convert_append_entries_input(request(2, Some(proto_entry(2, 0, "amy")))).unwrap();
        let previous = input.leader_previous_log_entry.unwrap();
        assert_eq!((previous.term, previous.index), (Term::new(2), Index::new(0)));
        assert_eq!(
            previous.command,
            Command::Ending {
                username: "amy".to_string()
            }
        );

        for bad in vec![request(2, None), request(1, Some(proto_entry(2, 0, "amy")))] {
            let status = RaftRpcServer::convert_append_entries_input(bad).unwrap_err();
            assert_eq!(status.code(), tonic::Code::InvalidArgument);
        }
    }

    #[test]
    fn rejection_carries_current_term() {
        let reply = RaftRpcServer::convert_append_entries_result(Err(AppendEntriesError::ClientTermOutOfDate {
            current_term: Term::new(7),
        }))
        .unwrap();
        assert_eq!(reply, ProtoAppendEntriesReply { term: 7, success: false });

        let status = RaftRpcServer::convert_append_entries_result(Err(AppendEntriesError::ActorExited)).unwrap_err();
        assert_eq!(status.code(), tonic::Code::Unavailable);
    }

    #[test]
    fn non_member_rejection_is_not_a_log_reply() {
        let status =
            RaftRpcServer::convert_append_entries_result(Err(AppendEntriesError::ClientNotInCluster)).unwrap_err();
        assert_eq!(status.code(), tonic::Code::PermissionDenied);
    }

    #[test]
    fn vote_input_decodes_last_entry() {
        let input = RaftRpcServer::convert_vote_input(ProtoVoteReq {
            candidate_id: "127.0.0.1:9001".into(),
            candidate_term: 4,
            last_log_index: 5,
            last_log_term: 2,
        });

        assert_eq!(input.candidate_last_log_entry, Some((Term::new(2), Index::new(5))));
    }
}
