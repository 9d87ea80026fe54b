mod election;
mod local_state;
mod peer_calls;
mod peer_client;
mod peers;
mod replica;
mod replica_api;
mod replica_wiring;
mod write_ahead_log;

pub use election::ElectionStateChangeListener;
pub use election::ElectionStateSnapshot;
pub(crate) use local_state::Term;
pub(crate) use peers::ClusterTracker;
pub use peers::ReplicaId;
pub(crate) use replica::Replica;
pub(crate) use replica_api::*;
pub(crate) use replica_wiring::create_replica;
pub(crate) use replica_wiring::ReplicaTimings;
pub(crate) use write_ahead_log::ApplyStream;
pub(crate) use write_ahead_log::Command;
pub(crate) use write_ahead_log::LogEntry;
pub(crate) use write_ahead_log::ReplicatedEntry;
