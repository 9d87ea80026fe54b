//! Client-facing operations. Each call is recorded in the replicated log, then applied to the
//! local store right away.
mod applier;
mod command_log;
mod gateway;
mod status;

pub(crate) use applier::CommandApplier;
pub(crate) use command_log::CommandLog;
pub(crate) use gateway::ClientGateway;
pub use status::StatusCode;
