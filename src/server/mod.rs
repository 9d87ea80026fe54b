mod chat;
mod raft;
mod shutdown;

pub(crate) use chat::ChatRpcServer;
pub(crate) use raft::RaftRpcServer;
pub(crate) use shutdown::shutdown_signal;
pub(crate) use shutdown::RpcServerShutdownHandle;
pub(crate) use shutdown::RpcServerShutdownSignal;

use crate::grpc::grpc_chat_server::GrpcChatServer;
use crate::grpc::grpc_raft_server::GrpcRaftServer;
use std::net::SocketAddr;
use tonic::transport::Server;

/// Serves both gRPC services on one address until `shutdown_signal` fires.
pub(crate) async fn run(
    logger: slog::Logger,
    socket_addr: SocketAddr,
    raft: RaftRpcServer,
    chat: ChatRpcServer,
    shutdown_signal: RpcServerShutdownSignal,
) {
    slog::info!(logger, "Listening on '{:?}'", socket_addr);

    let result = Server::builder()
        .add_service(GrpcRaftServer::new(raft))
        .add_service(GrpcChatServer::new(chat))
        .serve_with_shutdown(socket_addr, shutdown_signal)
        .await;

    match result {
        Ok(()) => slog::info!(logger, "Server run() has exited"),
        Err(e) => slog::error!(logger, "Server run() has exited: {:?}", e),
    }
}
