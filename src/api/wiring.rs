use crate::actor::{ActorClient, ReplicaActor};
use crate::api::options::{ChatNodeOptions, ChatNodeOptionsValidated};
use crate::commitlog::InMemoryLog;
use crate::gateway::{ClientGateway, CommandApplier};
use crate::registry::ActiveClientRegistry;
use crate::replica::{self, ClusterTracker, ElectionStateChangeListener, ReplicaId, ReplicaTimings};
use crate::server::{self, ChatRpcServer, RaftRpcServer};
use crate::store::{StateStore, StoreLimits};
use std::convert::TryFrom;
use std::error::Error;
use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

pub struct ChatNodeConfig {
    /// Every node of the cluster, in the same order on every node.
    pub cluster_members: Vec<SocketAddr>,
    /// Which of `cluster_members` this node is. The node serves on that address.
    pub my_node_index: usize,
    /// Directory for the node's database file. None keeps the database in memory.
    pub db_directory: Option<PathBuf>,
    pub logger: slog::Logger,
    pub options: ChatNodeOptions,
    pub limits: StoreLimits,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatNodeCreationError {
    #[error("Invalid cluster info: {0}")]
    InvalidClusterInfo(Box<dyn Error + Send + Sync>),
    #[error("Illegal options for configuring node: {0}")]
    IllegalOptions(String),
    #[error("Can't create database directory: {0}")]
    DbDirectory(io::Error),
    #[error("Store initialization failure: {0}")]
    StoreInitialization(Box<dyn Error + Send + Sync>),
}

/// ChatNode is a running member of the cluster. Dropping it shuts the node down.
pub struct ChatNode {
    replica_id: ReplicaId,
    election_state: ElectionStateChangeListener,
    // Only strong handle to the actor queue.
    _actor_client: ActorClient,
}

impl ChatNode {
    pub fn replica_id(&self) -> &ReplicaId {
        &self.replica_id
    }

    pub fn election_state(&self) -> ElectionStateChangeListener {
        self.election_state.clone()
    }
}

pub async fn try_create_chat_node(config: ChatNodeConfig) -> Result<ChatNode, ChatNodeCreationError> {
    let options = ChatNodeOptionsValidated::try_from(config.options)
        .map_err(|e| ChatNodeCreationError::IllegalOptions(e.to_string()))?;
    config
        .limits
        .validate()
        .map_err(|e| ChatNodeCreationError::IllegalOptions(e.to_string()))?;

    let cluster_tracker = ClusterTracker::create_valid_cluster(&config.cluster_members, config.my_node_index)
        .map_err(|e| ChatNodeCreationError::InvalidClusterInfo(e.into()))?;
    let replica_id = cluster_tracker.my_replica_id().clone();
    let my_server_addr = config.cluster_members[config.my_node_index];

    let root_logger = config.logger.new(slog::o!("Node" => replica_id.as_str().to_string()));

    let store = open_store(&root_logger, config.db_directory, config.my_node_index, config.limits)?;

    let (actor_client, actor_queue_rx) = ActorClient::new(64);
    let (server_shutdown_handle, server_shutdown_signal) = server::shutdown_signal();

    let (replica, apply_stream, election_state_change_listener) = replica::create_replica(
        root_logger.clone(),
        cluster_tracker,
        InMemoryLog::new(),
        server_shutdown_handle,
        actor_client.weak(),
        ReplicaTimings {
            leader_heartbeat_duration: options.leader_heartbeat_duration,
            follower_min_timeout: options.follower_min_timeout,
            follower_max_timeout: options.follower_max_timeout,
            append_entries_timeout: options.append_entries_timeout,
        },
    );

    let replica_actor = ReplicaActor::new(root_logger.clone(), actor_queue_rx, replica);
    tokio::spawn(replica_actor.run_event_loop());

    let registry = ActiveClientRegistry::new(root_logger.new(slog::o!("Component" => "Registry")));
    let applier = CommandApplier::new(root_logger.new(slog::o!("Component" => "Applier")), store, registry);
    tokio::spawn(applier.clone().run(apply_stream));

    let gateway = ClientGateway::new(
        root_logger.new(slog::o!("Component" => "Gateway")),
        actor_client.weak(),
        applier,
    );

    let raft_server = RaftRpcServer::new(root_logger.clone(), actor_client.weak());
    let chat_server = ChatRpcServer::new(root_logger.clone(), gateway);
    tokio::spawn(server::run(
        root_logger,
        my_server_addr,
        raft_server,
        chat_server,
        server_shutdown_signal,
    ));

    Ok(ChatNode {
        replica_id,
        election_state: election_state_change_listener,
        _actor_client: actor_client,
    })
}

fn open_store(
    logger: &slog::Logger,
    db_directory: Option<PathBuf>,
    my_node_index: usize,
    limits: StoreLimits,
) -> Result<StateStore, ChatNodeCreationError> {
    let store = match db_directory {
        Some(directory) => {
            std::fs::create_dir_all(&directory).map_err(ChatNodeCreationError::DbDirectory)?;
            let path = directory.join(format!("chat-node-{}.sqlite3", my_node_index));
            StateStore::open_at(logger, &path, limits)
        }
        None => StateStore::open_in_memory(logger, limits),
    };

    store.map_err(|e| ChatNodeCreationError::StoreInitialization(e.into()))
}
