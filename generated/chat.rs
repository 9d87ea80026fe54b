// ---- Consensus ----

/// Log indexes are 0-based. A value of -1 means "no entry".
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoVoteReq {
    #[prost(string, tag = "1")]
    pub candidate_id: ::prost::alloc::string::String,
    #[prost(uint64, tag = "2")]
    pub candidate_term: u64,
    #[prost(int64, tag = "3")]
    pub last_log_index: i64,
    #[prost(uint64, tag = "4")]
    pub last_log_term: u64,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoVoteReply {
    #[prost(uint64, tag = "1")]
    pub term: u64,
    #[prost(bool, tag = "2")]
    pub granted: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAppendEntriesReq {
    #[prost(string, tag = "1")]
    pub leader_address: ::prost::alloc::string::String,
    #[prost(uint64, tag = "2")]
    pub term: u64,
    #[prost(int64, tag = "3")]
    pub prev_log_index: i64,
    #[prost(uint64, tag = "4")]
    pub prev_log_term: u64,
    #[prost(message, repeated, tag = "5")]
    pub entries: ::prost::alloc::vec::Vec<ProtoLogEntry>,
    #[prost(int64, tag = "6")]
    pub commit_index: i64,
    /// The entry at prev_log_index. Followers match it on term and command, since optimistic local
    /// appends can put different commands at the same term and index.
    #[prost(message, optional, tag = "7")]
    pub prev_log_entry: ::core::option::Option<ProtoLogEntry>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAppendEntriesReply {
    #[prost(uint64, tag = "1")]
    pub term: u64,
    #[prost(bool, tag = "2")]
    pub success: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetLeaderReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoGetLeaderReply {
    /// Empty when no leader is known.
    #[prost(string, tag = "1")]
    pub leader_address: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLogEntry {
    #[prost(uint64, tag = "1")]
    pub term: u64,
    #[prost(uint64, tag = "2")]
    pub index: u64,
    #[prost(
        oneof = "proto_log_entry::Command",
        tags = "3, 4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14"
    )]
    pub command: ::core::option::Option<proto_log_entry::Command>,
}
/// Nested message and enum types in `ProtoLogEntry`.
pub mod proto_log_entry {
    #[derive(Clone, PartialEq, ::prost::Oneof)]
    pub enum Command {
        #[prost(message, tag = "3")]
        CheckAccountExists(super::ProtoAccountExistsReq),
        #[prost(message, tag = "4")]
        CreateAccount(super::ProtoCreateAccountReq),
        #[prost(message, tag = "5")]
        LoginAccount(super::ProtoLoginAccountReq),
        #[prost(message, tag = "6")]
        ListAccount(super::ProtoListAccountReq),
        #[prost(message, tag = "7")]
        DeleteAccount(super::ProtoDeleteAccountReq),
        #[prost(message, tag = "8")]
        FetchHomepage(super::ProtoFetchHomepageReq),
        #[prost(message, tag = "9")]
        FetchMessageRead(super::ProtoFetchMessageReadReq),
        #[prost(message, tag = "10")]
        FetchMessageUnread(super::ProtoFetchMessageUnreadReq),
        #[prost(message, tag = "11")]
        DeleteMessage(super::ProtoDeleteMessageReq),
        #[prost(message, tag = "12")]
        SendMessage(super::ProtoSendMessageCommand),
        #[prost(message, tag = "13")]
        ReceiveMessage(super::ProtoReceiveMessageReq),
        #[prost(message, tag = "14")]
        Ending(super::ProtoEndingReq),
    }
}
/// SendMessage as recorded in the log, with the timestamp picked by the node that accepted it.
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSendMessageCommand {
    #[prost(string, tag = "1")]
    pub sender: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub receiver: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub content: ::prost::alloc::string::String,
    #[prost(int64, tag = "4")]
    pub timestamp: i64,
}
// ---- Chat requests ----

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStartingReq {}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAccountExistsReq {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoCreateAccountReq {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub password_hash: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub bio: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoLoginAccountReq {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub password_hash: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoListAccountReq {
    /// Empty matches every account.
    #[prost(string, tag = "1")]
    pub pattern: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeleteAccountReq {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub password_hash: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoFetchHomepageReq {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoFetchMessageReadReq {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub num: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoFetchMessageUnreadReq {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
    #[prost(uint32, tag = "2")]
    pub num: u32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoDeleteMessageReq {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
    #[prost(int64, repeated, tag = "2")]
    pub message_ids: ::prost::alloc::vec::Vec<i64>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoSendMessageReq {
    #[prost(string, tag = "1")]
    pub sender: ::prost::alloc::string::String,
    #[prost(string, tag = "2")]
    pub receiver: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub content: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReceiveMessageReq {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoEndingReq {
    #[prost(string, tag = "1")]
    pub username: ::prost::alloc::string::String,
}
// ---- Chat replies ----

#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoStatusReply {
    #[prost(int32, tag = "1")]
    pub status: i32,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAccountExistsReply {
    #[prost(int32, tag = "1")]
    pub status: i32,
    #[prost(bool, tag = "2")]
    pub exists: bool,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMailboxReply {
    #[prost(int32, tag = "1")]
    pub status: i32,
    #[prost(uint64, tag = "2")]
    pub unread_count: u64,
    #[prost(message, repeated, tag = "3")]
    pub messages: ::prost::alloc::vec::Vec<ProtoMessage>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMessagesReply {
    #[prost(int32, tag = "1")]
    pub status: i32,
    #[prost(message, repeated, tag = "2")]
    pub messages: ::prost::alloc::vec::Vec<ProtoMessage>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoListAccountReply {
    #[prost(int32, tag = "1")]
    pub status: i32,
    #[prost(message, repeated, tag = "2")]
    pub accounts: ::prost::alloc::vec::Vec<ProtoAccount>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoReceiveMessageReply {
    #[prost(message, repeated, tag = "1")]
    pub messages: ::prost::alloc::vec::Vec<ProtoMessage>,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoAccount {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub username: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub bio: ::prost::alloc::string::String,
}
#[derive(Clone, PartialEq, ::prost::Message)]
pub struct ProtoMessage {
    #[prost(int64, tag = "1")]
    pub id: i64,
    #[prost(string, tag = "2")]
    pub sender: ::prost::alloc::string::String,
    #[prost(string, tag = "3")]
    pub receiver: ::prost::alloc::string::String,
    #[prost(string, tag = "4")]
    pub content: ::prost::alloc::string::String,
    #[prost(int64, tag = "5")]
    pub timestamp: i64,
    #[prost(bool, tag = "6")]
    pub delivered: bool,
}
#[doc = r" Generated client implementations."]
pub mod grpc_raft_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Peer-to-peer consensus service."]
    pub struct GrpcRaftClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcRaftClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcRaftClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn vote(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoVoteReq>,
        ) -> Result<tonic::Response<super::ProtoVoteReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcRaft/Vote");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn append_entries(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoAppendEntriesReq>,
        ) -> Result<tonic::Response<super::ProtoAppendEntriesReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcRaft/AppendEntries");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn get_leader(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoGetLeaderReq>,
        ) -> Result<tonic::Response<super::ProtoGetLeaderReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcRaft/GetLeader");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcRaftClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcRaftClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcRaftClient {{ ... }}")
        }
    }
}
#[doc = r" Generated client implementations."]
pub mod grpc_chat_client {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = " Client-facing chat service."]
    pub struct GrpcChatClient<T> {
        inner: tonic::client::Grpc<T>,
    }
    impl GrpcChatClient<tonic::transport::Channel> {
        #[doc = r" Attempt to create a new client by connecting to a given endpoint."]
        pub async fn connect<D>(dst: D) -> Result<Self, tonic::transport::Error>
        where
            D: std::convert::TryInto<tonic::transport::Endpoint>,
            D::Error: Into<StdError>,
        {
            let conn = tonic::transport::Endpoint::new(dst)?.connect().await?;
            Ok(Self::new(conn))
        }
    }
    impl<T> GrpcChatClient<T>
    where
        T: tonic::client::GrpcService<tonic::body::BoxBody>,
        T::ResponseBody: Body + HttpBody + Send + 'static,
        T::Error: Into<StdError>,
        <T::ResponseBody as HttpBody>::Error: Into<StdError> + Send,
    {
        pub fn new(inner: T) -> Self {
            let inner = tonic::client::Grpc::new(inner);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = tonic::client::Grpc::with_interceptor(inner, interceptor);
            Self { inner }
        }
        pub async fn starting(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoStartingReq>,
        ) -> Result<tonic::Response<super::ProtoStatusReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/Starting");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn check_account_exists(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoAccountExistsReq>,
        ) -> Result<tonic::Response<super::ProtoAccountExistsReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/CheckAccountExists");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn create_account(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoCreateAccountReq>,
        ) -> Result<tonic::Response<super::ProtoStatusReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/CreateAccount");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn login_account(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoLoginAccountReq>,
        ) -> Result<tonic::Response<super::ProtoMailboxReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/LoginAccount");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn list_account(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoListAccountReq>,
        ) -> Result<tonic::Response<super::ProtoListAccountReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/ListAccount");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn delete_account(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoDeleteAccountReq>,
        ) -> Result<tonic::Response<super::ProtoStatusReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/DeleteAccount");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn fetch_homepage(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoFetchHomepageReq>,
        ) -> Result<tonic::Response<super::ProtoMailboxReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/FetchHomepage");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn fetch_message_read(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoFetchMessageReadReq>,
        ) -> Result<tonic::Response<super::ProtoMessagesReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/FetchMessageRead");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn fetch_message_unread(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoFetchMessageUnreadReq>,
        ) -> Result<tonic::Response<super::ProtoMailboxReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/FetchMessageUnread");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn delete_message(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoDeleteMessageReq>,
        ) -> Result<tonic::Response<super::ProtoMailboxReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/DeleteMessage");
            self.inner.unary(request.into_request(), path, codec).await
        }
        pub async fn send_message(
            &mut self,
            request: impl tonic::IntoStreamingRequest<Message = super::ProtoSendMessageReq>,
        ) -> Result<tonic::Response<super::ProtoStatusReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/SendMessage");
            self.inner
                .client_streaming(request.into_streaming_request(), path, codec)
                .await
        }
        pub async fn receive_message(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoReceiveMessageReq>,
        ) -> Result<
            tonic::Response<tonic::codec::Streaming<super::ProtoReceiveMessageReply>>,
            tonic::Status,
        > {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/ReceiveMessage");
            self.inner
                .server_streaming(request.into_request(), path, codec)
                .await
        }
        pub async fn ending(
            &mut self,
            request: impl tonic::IntoRequest<super::ProtoEndingReq>,
        ) -> Result<tonic::Response<super::ProtoStatusReply>, tonic::Status> {
            self.inner.ready().await.map_err(|e| {
                tonic::Status::new(
                    tonic::Code::Unknown,
                    format!("Service was not ready: {}", e.into()),
                )
            })?;
            let codec = tonic::codec::ProstCodec::default();
            let path = http::uri::PathAndQuery::from_static("/chat.GrpcChat/Ending");
            self.inner.unary(request.into_request(), path, codec).await
        }
    }
    impl<T: Clone> Clone for GrpcChatClient<T> {
        fn clone(&self) -> Self {
            Self {
                inner: self.inner.clone(),
            }
        }
    }
    impl<T> std::fmt::Debug for GrpcChatClient<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "GrpcChatClient {{ ... }}")
        }
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_raft_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcRaftServer."]
    #[async_trait]
    pub trait GrpcRaft: Send + Sync + 'static {
        async fn vote(
            &self,
            request: tonic::Request<super::ProtoVoteReq>,
        ) -> Result<tonic::Response<super::ProtoVoteReply>, tonic::Status>;
        async fn append_entries(
            &self,
            request: tonic::Request<super::ProtoAppendEntriesReq>,
        ) -> Result<tonic::Response<super::ProtoAppendEntriesReply>, tonic::Status>;
        async fn get_leader(
            &self,
            request: tonic::Request<super::ProtoGetLeaderReq>,
        ) -> Result<tonic::Response<super::ProtoGetLeaderReply>, tonic::Status>;
    }
    #[doc = " Peer-to-peer consensus service."]
    #[derive(Debug)]
    pub struct GrpcRaftServer<T: GrpcRaft> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcRaft> GrpcRaftServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcRaftServer<T>
    where
        T: GrpcRaft,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/chat.GrpcRaft/Vote" => {
                    #[allow(non_camel_case_types)]
                    struct VoteSvc<T: GrpcRaft>(pub Arc<T>);
                    impl<T: GrpcRaft> tonic::server::UnaryService<super::ProtoVoteReq> for VoteSvc<T> {
                        type Response = super::ProtoVoteReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoVoteReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).vote(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = VoteSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcRaft/AppendEntries" => {
                    #[allow(non_camel_case_types)]
                    struct AppendEntriesSvc<T: GrpcRaft>(pub Arc<T>);
                    impl<T: GrpcRaft> tonic::server::UnaryService<super::ProtoAppendEntriesReq>
                        for AppendEntriesSvc<T>
                    {
                        type Response = super::ProtoAppendEntriesReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoAppendEntriesReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).append_entries(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = AppendEntriesSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcRaft/GetLeader" => {
                    #[allow(non_camel_case_types)]
                    struct GetLeaderSvc<T: GrpcRaft>(pub Arc<T>);
                    impl<T: GrpcRaft> tonic::server::UnaryService<super::ProtoGetLeaderReq> for GetLeaderSvc<T> {
                        type Response = super::ProtoGetLeaderReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoGetLeaderReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).get_leader(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = GetLeaderSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcRaft> Clone for GrpcRaftServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcRaft> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcRaft> tonic::transport::NamedService for GrpcRaftServer<T> {
        const NAME: &'static str = "chat.GrpcRaft";
    }
}
#[doc = r" Generated server implementations."]
pub mod grpc_chat_server {
    #![allow(unused_variables, dead_code, missing_docs)]
    use tonic::codegen::*;
    #[doc = "Generated trait containing gRPC methods that should be implemented for use with GrpcChatServer."]
    #[async_trait]
    pub trait GrpcChat: Send + Sync + 'static {
        async fn starting(
            &self,
            request: tonic::Request<super::ProtoStartingReq>,
        ) -> Result<tonic::Response<super::ProtoStatusReply>, tonic::Status>;
        async fn check_account_exists(
            &self,
            request: tonic::Request<super::ProtoAccountExistsReq>,
        ) -> Result<tonic::Response<super::ProtoAccountExistsReply>, tonic::Status>;
        async fn create_account(
            &self,
            request: tonic::Request<super::ProtoCreateAccountReq>,
        ) -> Result<tonic::Response<super::ProtoStatusReply>, tonic::Status>;
        async fn login_account(
            &self,
            request: tonic::Request<super::ProtoLoginAccountReq>,
        ) -> Result<tonic::Response<super::ProtoMailboxReply>, tonic::Status>;
        async fn list_account(
            &self,
            request: tonic::Request<super::ProtoListAccountReq>,
        ) -> Result<tonic::Response<super::ProtoListAccountReply>, tonic::Status>;
        async fn delete_account(
            &self,
            request: tonic::Request<super::ProtoDeleteAccountReq>,
        ) -> Result<tonic::Response<super::ProtoStatusReply>, tonic::Status>;
        async fn fetch_homepage(
            &self,
            request: tonic::Request<super::ProtoFetchHomepageReq>,
        ) -> Result<tonic::Response<super::ProtoMailboxReply>, tonic::Status>;
        async fn fetch_message_read(
            &self,
            request: tonic::Request<super::ProtoFetchMessageReadReq>,
        ) -> Result<tonic::Response<super::ProtoMessagesReply>, tonic::Status>;
        async fn fetch_message_unread(
            &self,
            request: tonic::Request<super::ProtoFetchMessageUnreadReq>,
        ) -> Result<tonic::Response<super::ProtoMailboxReply>, tonic::Status>;
        async fn delete_message(
            &self,
            request: tonic::Request<super::ProtoDeleteMessageReq>,
        ) -> Result<tonic::Response<super::ProtoMailboxReply>, tonic::Status>;
        async fn send_message(
            &self,
            request: tonic::Request<tonic::Streaming<super::ProtoSendMessageReq>>,
        ) -> Result<tonic::Response<super::ProtoStatusReply>, tonic::Status>;
        #[doc = "Server streaming response type for the ReceiveMessage method."]
        type ReceiveMessageStream: futures_core::Stream<Item = Result<super::ProtoReceiveMessageReply, tonic::Status>>
            + Send
            + Sync
            + 'static;
        async fn receive_message(
            &self,
            request: tonic::Request<super::ProtoReceiveMessageReq>,
        ) -> Result<tonic::Response<Self::ReceiveMessageStream>, tonic::Status>;
        async fn ending(
            &self,
            request: tonic::Request<super::ProtoEndingReq>,
        ) -> Result<tonic::Response<super::ProtoStatusReply>, tonic::Status>;
    }
    #[doc = " Client-facing chat service."]
    #[derive(Debug)]
    pub struct GrpcChatServer<T: GrpcChat> {
        inner: _Inner<T>,
    }
    struct _Inner<T>(Arc<T>, Option<tonic::Interceptor>);
    impl<T: GrpcChat> GrpcChatServer<T> {
        pub fn new(inner: T) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, None);
            Self { inner }
        }
        pub fn with_interceptor(inner: T, interceptor: impl Into<tonic::Interceptor>) -> Self {
            let inner = Arc::new(inner);
            let inner = _Inner(inner, Some(interceptor.into()));
            Self { inner }
        }
    }
    impl<T, B> Service<http::Request<B>> for GrpcChatServer<T>
    where
        T: GrpcChat,
        B: HttpBody + Send + Sync + 'static,
        B::Error: Into<StdError> + Send + 'static,
    {
        type Response = http::Response<tonic::body::BoxBody>;
        type Error = Never;
        type Future = BoxFuture<Self::Response, Self::Error>;
        fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
            Poll::Ready(Ok(()))
        }
        fn call(&mut self, req: http::Request<B>) -> Self::Future {
            let inner = self.inner.clone();
            match req.uri().path() {
                "/chat.GrpcChat/Starting" => {
                    #[allow(non_camel_case_types)]
                    struct StartingSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoStartingReq> for StartingSvc<T> {
                        type Response = super::ProtoStatusReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoStartingReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).starting(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = StartingSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/CheckAccountExists" => {
                    #[allow(non_camel_case_types)]
                    struct CheckAccountExistsSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoAccountExistsReq>
                        for CheckAccountExistsSvc<T>
                    {
                        type Response = super::ProtoAccountExistsReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoAccountExistsReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).check_account_exists(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = CheckAccountExistsSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/CreateAccount" => {
                    #[allow(non_camel_case_types)]
                    struct CreateAccountSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoCreateAccountReq>
                        for CreateAccountSvc<T>
                    {
                        type Response = super::ProtoStatusReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoCreateAccountReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).create_account(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = CreateAccountSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/LoginAccount" => {
                    #[allow(non_camel_case_types)]
                    struct LoginAccountSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoLoginAccountReq> for LoginAccountSvc<T> {
                        type Response = super::ProtoMailboxReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoLoginAccountReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).login_account(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = LoginAccountSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/ListAccount" => {
                    #[allow(non_camel_case_types)]
                    struct ListAccountSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoListAccountReq> for ListAccountSvc<T> {
                        type Response = super::ProtoListAccountReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoListAccountReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).list_account(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = ListAccountSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/DeleteAccount" => {
                    #[allow(non_camel_case_types)]
                    struct DeleteAccountSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoDeleteAccountReq>
                        for DeleteAccountSvc<T>
                    {
                        type Response = super::ProtoStatusReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoDeleteAccountReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).delete_account(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = DeleteAccountSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/FetchHomepage" => {
                    #[allow(non_camel_case_types)]
                    struct FetchHomepageSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoFetchHomepageReq>
                        for FetchHomepageSvc<T>
                    {
                        type Response = super::ProtoMailboxReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoFetchHomepageReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).fetch_homepage(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = FetchHomepageSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/FetchMessageRead" => {
                    #[allow(non_camel_case_types)]
                    struct FetchMessageReadSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoFetchMessageReadReq>
                        for FetchMessageReadSvc<T>
                    {
                        type Response = super::ProtoMessagesReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoFetchMessageReadReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).fetch_message_read(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = FetchMessageReadSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/FetchMessageUnread" => {
                    #[allow(non_camel_case_types)]
                    struct FetchMessageUnreadSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoFetchMessageUnreadReq>
                        for FetchMessageUnreadSvc<T>
                    {
                        type Response = super::ProtoMailboxReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoFetchMessageUnreadReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).fetch_message_unread(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = FetchMessageUnreadSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/DeleteMessage" => {
                    #[allow(non_camel_case_types)]
                    struct DeleteMessageSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoDeleteMessageReq>
                        for DeleteMessageSvc<T>
                    {
                        type Response = super::ProtoMailboxReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoDeleteMessageReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).delete_message(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = DeleteMessageSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/SendMessage" => {
                    #[allow(non_camel_case_types)]
                    struct SendMessageSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat>
                        tonic::server::ClientStreamingService<super::ProtoSendMessageReq>
                        for SendMessageSvc<T>
                    {
                        type Response = super::ProtoStatusReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<tonic::Streaming<super::ProtoSendMessageReq>>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).send_message(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1;
                        let inner = inner.0;
                        let method = SendMessageSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.client_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/ReceiveMessage" => {
                    #[allow(non_camel_case_types)]
                    struct ReceiveMessageSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat>
                        tonic::server::ServerStreamingService<super::ProtoReceiveMessageReq>
                        for ReceiveMessageSvc<T>
                    {
                        type Response = super::ProtoReceiveMessageReply;
                        type ResponseStream = T::ReceiveMessageStream;
                        type Future =
                            BoxFuture<tonic::Response<Self::ResponseStream>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoReceiveMessageReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).receive_message(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1;
                        let inner = inner.0;
                        let method = ReceiveMessageSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.server_streaming(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                "/chat.GrpcChat/Ending" => {
                    #[allow(non_camel_case_types)]
                    struct EndingSvc<T: GrpcChat>(pub Arc<T>);
                    impl<T: GrpcChat> tonic::server::UnaryService<super::ProtoEndingReq> for EndingSvc<T> {
                        type Response = super::ProtoStatusReply;
                        type Future = BoxFuture<tonic::Response<Self::Response>, tonic::Status>;
                        fn call(
                            &mut self,
                            request: tonic::Request<super::ProtoEndingReq>,
                        ) -> Self::Future {
                            let inner = self.0.clone();
                            let fut = async move { (*inner).ending(request).await };
                            Box::pin(fut)
                        }
                    }
                    let inner = self.inner.clone();
                    let fut = async move {
                        let interceptor = inner.1.clone();
                        let inner = inner.0;
                        let method = EndingSvc(inner);
                        let codec = tonic::codec::ProstCodec::default();
                        let mut grpc = if let Some(interceptor) = interceptor {
                            tonic::server::Grpc::with_interceptor(codec, interceptor)
                        } else {
                            tonic::server::Grpc::new(codec)
                        };
                        let res = grpc.unary(method, req).await;
                        Ok(res)
                    };
                    Box::pin(fut)
                }
                _ => Box::pin(async move {
                    Ok(http::Response::builder()
                        .status(200)
                        .header("grpc-status", "12")
                        .header("content-type", "application/grpc")
                        .body(tonic::body::BoxBody::empty())
                        .unwrap())
                }),
            }
        }
    }
    impl<T: GrpcChat> Clone for GrpcChatServer<T> {
        fn clone(&self) -> Self {
            let inner = self.inner.clone();
            Self { inner }
        }
    }
    impl<T: GrpcChat> Clone for _Inner<T> {
        fn clone(&self) -> Self {
            Self(self.0.clone(), self.1.clone())
        }
    }
    impl<T: std::fmt::Debug> std::fmt::Debug for _Inner<T> {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self.0)
        }
    }
    impl<T: GrpcChat> tonic::transport::NamedService for GrpcChatServer<T> {
        const NAME: &'static str = "chat.GrpcChat";
    }
}
