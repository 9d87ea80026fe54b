use crate::actor::WeakActorClient;
use crate::commitlog::Log;
use crate::replica::election::{ElectionConfig, ElectionState, ElectionStateChangeListener};
use crate::replica::local_state::VolatileLocalState;
use crate::replica::peers::ClusterTracker;
use crate::replica::replica::Replica;
use crate::replica::write_ahead_log::{self, ApplyStream, LogEntry};
use crate::server::RpcServerShutdownHandle;
use std::time::Duration;

pub(crate) struct ReplicaTimings {
    pub(crate) leader_heartbeat_duration: Duration,
    pub(crate) follower_min_timeout: Duration,
    pub(crate) follower_max_timeout: Duration,
    pub(crate) append_entries_timeout: Duration,
}

/// Builds a replica that starts out as a follower of nobody.
pub(crate) fn create_replica<L>(
    logger: slog::Logger,
    cluster_tracker: ClusterTracker,
    log: L,
    server_shutdown_handle: RpcServerShutdownHandle,
    actor_client: WeakActorClient,
    timings: ReplicaTimings,
) -> (Replica<L>, ApplyStream, ElectionStateChangeListener)
where
    L: Log<LogEntry>,
{
    let my_replica_id = cluster_tracker.my_replica_id().clone();
    let (election_state, election_state_change_listener) = ElectionState::new_follower(
        ElectionConfig {
            my_replica_id: my_replica_id.clone(),
            leader_heartbeat_duration: timings.leader_heartbeat_duration,
            follower_min_timeout: timings.follower_min_timeout,
            follower_max_timeout: timings.follower_max_timeout,
        },
        actor_client.clone(),
    );

    let (write_ahead_log, apply_stream) = write_ahead_log::wired(logger.clone(), log);

    let local_state = Box::new(VolatileLocalState::new(my_replica_id.clone()));

    let replica = Replica::new(
        logger,
        my_replica_id,
        cluster_tracker,
        local_state,
        election_state,
        write_ahead_log,
        actor_client,
        timings.append_entries_timeout,
        server_shutdown_handle,
    );

    (replica, apply_stream, election_state_change_listener)
}
