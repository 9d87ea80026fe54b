use crate::grpc::grpc_raft_client::GrpcRaftClient;
use crate::grpc::{ProtoAppendEntriesReply, ProtoAppendEntriesReq, ProtoVoteReply, ProtoVoteReq};
use std::net::SocketAddr;
use std::time::Duration;
use tonic::codegen::http::uri;
use tonic::transport::{Channel, Endpoint};

/// PeerClient talks to one other node of the cluster. The channel connects on first use and
/// reconnects on its own, so an unreachable peer only ever shows up as a failed call.
#[derive(Clone)]
pub(crate) struct PeerClient {
    inner: GrpcRaftClient<Channel>,
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum PeerConnectError {
    #[error("invalid uri: {0}")]
    InvalidUri(#[from] uri::InvalidUri),
    #[error("transport error: {0}")]
    Transport(#[from] tonic::transport::Error),
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum PeerCallError {
    #[error("peer didn't reply within {0:?}")]
    Timeout(Duration),
    #[error("peer replied with {0}")]
    Status(#[from] tonic::Status),
}

impl PeerClient {
    pub(crate) fn new_lazy(addr: SocketAddr) -> Result<Self, PeerConnectError> {
        let endpoint = Endpoint::from_shared(format!("http://{}", addr))?;
        let channel = endpoint.connect_lazy()?;

        Ok(PeerClient {
            inner: GrpcRaftClient::new(channel),
        })
    }

    pub(crate) async fn vote(
        &mut self,
        request: ProtoVoteReq,
        timeout: Duration,
    ) -> Result<ProtoVoteReply, PeerCallError> {
        match tokio::time::timeout(timeout, self.inner.vote(request)).await {
            Ok(result) => Ok(result?.into_inner()),
            Err(_) => Err(PeerCallError::Timeout(timeout)),
        }
    }

    pub(crate) async fn append_entries(
        &mut self,
        request: ProtoAppendEntriesReq,
        timeout: Duration,
    ) -> Result<ProtoAppendEntriesReply, PeerCallError> {
        match tokio::time::timeout(timeout, self.inner.append_entries(request)).await {
            Ok(result) => Ok(result?.into_inner()),
            Err(_) => Err(PeerCallError::Timeout(timeout)),
        }
    }
}
