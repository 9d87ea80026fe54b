use crate::actor::WeakActorClient;
use crate::gateway::{ClientGateway, StatusCode};
use crate::grpc::grpc_chat_server::GrpcChat;
use crate::grpc::{
    ProtoAccount, ProtoAccountExistsReply, ProtoAccountExistsReq, ProtoCreateAccountReq, ProtoDeleteAccountReq,
    ProtoDeleteMessageReq, ProtoEndingReq, ProtoFetchHomepageReq, ProtoFetchMessageReadReq,
    ProtoFetchMessageUnreadReq, ProtoListAccountReply, ProtoListAccountReq, ProtoLoginAccountReq, ProtoMailboxReply,
    ProtoMessage, ProtoMessagesReply, ProtoReceiveMessageReply, ProtoReceiveMessageReq, ProtoSendMessageReq,
    ProtoStartingReq, ProtoStatusReply,
};
use crate::store::{Account, ChatMessage, MailboxView};
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio::sync::mpsc;
use tonic::{Request, Response, Status, Streaming};

/// ChatRpcServer is the type that implements the client-facing gRPC interface. Domain failures are
/// reported in each reply's `status`, never as a gRPC error.
pub(crate) struct ChatRpcServer {
    logger: slog::Logger,
    gateway: ClientGateway<WeakActorClient>,
}

impl ChatRpcServer {
    pub(crate) fn new(logger: slog::Logger, gateway: ClientGateway<WeakActorClient>) -> Self {
        ChatRpcServer { logger, gateway }
    }

    fn convert_status(status: StatusCode) -> ProtoStatusReply {
        ProtoStatusReply { status: status.code() }
    }

    fn convert_mailbox_result(app_result: Result<MailboxView, StatusCode>) -> ProtoMailboxReply {
        match app_result {
            Ok(mailbox) => ProtoMailboxReply {
                status: StatusCode::Success.code(),
                unread_count: mailbox.unread_count,
                messages: mailbox.messages.into_iter().map(Self::convert_message).collect(),
            },
            Err(status) => ProtoMailboxReply {
                status: status.code(),
                unread_count: 0,
                messages: vec![],
            },
        }
    }

    fn convert_messages_result(app_result: Result<Vec<ChatMessage>, StatusCode>) -> ProtoMessagesReply {
        match app_result {
            Ok(messages) => ProtoMessagesReply {
                status: StatusCode::Success.code(),
                messages: messages.into_iter().map(Self::convert_message).collect(),
            },
            Err(status) => ProtoMessagesReply {
                status: status.code(),
                messages: vec![],
            },
        }
    }

    fn convert_accounts_result(app_result: Result<Vec<Account>, StatusCode>) -> ProtoListAccountReply {
        match app_result {
            Ok(accounts) => ProtoListAccountReply {
                status: StatusCode::Success.code(),
                accounts: accounts
                    .into_iter()
                    .map(|account| ProtoAccount {
                        id: account.id,
                        username: account.username,
                        bio: account.bio,
                    })
                    .collect(),
            },
            Err(status) => ProtoListAccountReply {
                status: status.code(),
                accounts: vec![],
            },
        }
    }

    fn convert_message(message: ChatMessage) -> ProtoMessage {
        ProtoMessage {
            id: message.id,
            sender: message.sender,
            receiver: message.receiver,
            content: message.content,
            timestamp: message.timestamp,
            delivered: message.delivered,
        }
    }

    fn convert_pattern(pattern: String) -> Option<String> {
        if pattern.is_empty() {
            None
        } else {
            Some(pattern)
        }
    }

    /// Sends every message in the stream, in order. The first failure is the call's status; a
    /// broken request stream is `MessageSendFailure`.
    async fn handle_send_message(&self, mut stream: Streaming<ProtoSendMessageReq>) -> StatusCode {
        let mut first_failure = None;
        loop {
            match stream.message().await {
                Ok(Some(req)) => {
                    slog::debug!(self.logger, "ServerWire - {:?}", req);
                    let status = self.gateway.send_message(req.sender, req.receiver, req.content).await;
                    if status != StatusCode::Success && first_failure.is_none() {
                        first_failure = Some(status);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    slog::warn!(self.logger, "SendMessage stream broke: {:?}", e);
                    return first_failure.unwrap_or(StatusCode::MessageSendFailure);
                }
            }
        }

        first_failure.unwrap_or(StatusCode::Success)
    }
}

/// ReplyStream turns the gateway's batches into ReceiveMessage replies. Dropping it (client went
/// away) closes the channel, which ends the forwarding task.
pub struct ReplyStream {
    receiver: mpsc::Receiver<Vec<ChatMessage>>,
}

impl futures::Stream for ReplyStream {
    type Item = Result<ProtoReceiveMessageReply, Status>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        match self.receiver.poll_recv(cx) {
            Poll::Pending => Poll::Pending,
            Poll::Ready(None) => Poll::Ready(None),
            Poll::Ready(Some(batch)) => Poll::Ready(Some(Ok(ProtoReceiveMessageReply {
                messages: batch.into_iter().map(ChatRpcServer::convert_message).collect(),
            }))),
        }
    }
}

#[async_trait::async_trait]
impl GrpcChat for ChatRpcServer {
    async fn starting(&self, _request: Request<ProtoStartingReq>) -> Result<Response<ProtoStatusReply>, Status> {
        let status = self.gateway.starting().await;
        Ok(Response::new(Self::convert_status(status)))
    }

    async fn check_account_exists(
        &self,
        request: Request<ProtoAccountExistsReq>,
    ) -> Result<Response<ProtoAccountExistsReply>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", req);

        let (status, exists) = self.gateway.check_account_exists(req.username).await;
        Ok(Response::new(ProtoAccountExistsReply {
            status: status.code(),
            exists,
        }))
    }

    async fn create_account(&self, request: Request<ProtoCreateAccountReq>) -> Result<Response<ProtoStatusReply>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - CreateAccount(username={})", req.username);

        let status = self.gateway.create_account(req.username, req.password_hash, req.bio).await;
        Ok(Response::new(Self::convert_status(status)))
    }

    async fn login_account(&self, request: Request<ProtoLoginAccountReq>) -> Result<Response<ProtoMailboxReply>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - LoginAccount(username={})", req.username);

        let result = self.gateway.login_account(req.username, req.password_hash).await;
        Ok(Response::new(Self::convert_mailbox_result(result)))
    }

    async fn list_account(
        &self,
        request: Request<ProtoListAccountReq>,
    ) -> Result<Response<ProtoListAccountReply>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", req);

        let result = self.gateway.list_accounts(Self::convert_pattern(req.pattern)).await;
        Ok(Response::new(Self::convert_accounts_result(result)))
    }

    async fn delete_account(&self, request: Request<ProtoDeleteAccountReq>) -> Result<Response<ProtoStatusReply>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - DeleteAccount(username={})", req.username);

        let status = self.gateway.delete_account(req.username, req.password_hash).await;
        Ok(Response::new(Self::convert_status(status)))
    }

    async fn fetch_homepage(&self, request: Request<ProtoFetchHomepageReq>) -> Result<Response<ProtoMailboxReply>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", req);

        let result = self.gateway.fetch_homepage(req.username).await;
        Ok(Response::new(Self::convert_mailbox_result(result)))
    }

    async fn fetch_message_read(
        &self,
        request: Request<ProtoFetchMessageReadReq>,
    ) -> Result<Response<ProtoMessagesReply>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", req);

        let result = self.gateway.fetch_message_read(req.username, req.num).await;
        Ok(Response::new(Self::convert_messages_result(result)))
    }

    async fn fetch_message_unread(
        &self,
        request: Request<ProtoFetchMessageUnreadReq>,
    ) -> Result<Response<ProtoMailboxReply>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", req);

        let result = self.gateway.fetch_message_unread(req.username, req.num).await;
        Ok(Response::new(Self::convert_mailbox_result(result)))
    }

    async fn delete_message(&self, request: Request<ProtoDeleteMessageReq>) -> Result<Response<ProtoMailboxReply>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", req);

        let result = self.gateway.delete_messages(req.username, req.message_ids).await;
        Ok(Response::new(Self::convert_mailbox_result(result)))
    }

    async fn send_message(
        &self,
        request: Request<Streaming<ProtoSendMessageReq>>,
    ) -> Result<Response<ProtoStatusReply>, Status> {
        let status = self.handle_send_message(request.into_inner()).await;
        slog::debug!(self.logger, "ServerWire - SendMessage -> {:?}", status);

        Ok(Response::new(Self::convert_status(status)))
    }

    type ReceiveMessageStream = ReplyStream;

    async fn receive_message(
        &self,
        request: Request<ProtoReceiveMessageReq>,
    ) -> Result<Response<Self::ReceiveMessageStream>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", req);

        let receiver = self.gateway.receive_message(req.username).await;
        Ok(Response::new(ReplyStream { receiver }))
    }

    async fn ending(&self, request: Request<ProtoEndingReq>) -> Result<Response<ProtoStatusReply>, Status> {
        let req = request.into_inner();
        slog::debug!(self.logger, "ServerWire - {:?}", req);

        let status = self.gateway.ending(req.username).await;
        Ok(Response::new(Self::convert_status(status)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: i64) -> ChatMessage {
        ChatMessage {
            id,
            sender: "amy".into(),
            receiver: "bob".into(),
            content: format!("message {}", id),
            timestamp: 1_700_000_000,
            delivered: false,
        }
    }

    #[test]
    fn failure_replies_carry_only_status() {
        let reply = ChatRpcServer::convert_mailbox_result(Err(StatusCode::AccountNotFound));
        assert_eq!(reply.status, 4041);
        assert_eq!(reply.unread_count, 0);
        assert!(reply.messages.is_empty());

        let reply = ChatRpcServer::convert_messages_result(Err(StatusCode::DatabaseError));
        assert_eq!(reply.status, 5000);
    }

    #[test]
    fn mailbox_keeps_message_order() {
        let reply = ChatRpcServer::convert_mailbox_result(Ok(MailboxView {
            unread_count: 3,
            messages: vec![message(2), message(1)],
        }));

        assert_eq!(reply.status, 200);
        assert_eq!(reply.unread_count, 3);
        assert_eq!(reply.messages.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 1]);
        assert_eq!(reply.messages[0].content, "message 2");
    }

    #[test]
    fn empty_pattern_lists_everything() {
        assert_eq!(ChatRpcServer::convert_pattern(String::new()), None);
        assert_eq!(ChatRpcServer::convert_pattern("a%".into()), Some("a%".to_string()));
    }

    #[tokio::test]
    async fn reply_stream_ends_with_its_channel() {
        use futures::StreamExt;

        let (tx, rx) = mpsc::channel(2);
        let mut stream = ReplyStream { receiver: rx };

        tx.send(vec![message(1), message(2)]).await.unwrap();
        drop(tx);

        let reply = stream.next().await.unwrap().unwrap();
        assert_eq!(reply.messages.len(), 2);
        assert!(stream.next().await.is_none());
    }
}
