mod actor;
mod api;
mod commitlog;
mod gateway;
mod registry;
mod replica;
mod server;
mod store;
// Exception to learning 2: generated client stubs are part of the public surface.
pub mod grpc {
    include!("../generated/chat.rs");
}

pub use api::try_create_chat_node;
pub use api::ChatNode;
pub use api::ChatNodeConfig;
pub use api::ChatNodeCreationError;
pub use api::ChatNodeOptions;
pub use api::ConfigError;
pub use api::RaftTimingsConfig;
pub use api::ServerConfig;
pub use gateway::StatusCode;
pub use grpc as proto;
pub use replica::ElectionStateChangeListener;
pub use replica::ElectionStateSnapshot;
pub use replica::ReplicaId;
pub use store::StoreLimits;

// Learning 1: `create::{root_mod}` should not have any code. Just `mod` and `pub use` statements.
// Learning 2: All `mod` statements, anywhere, should not be `pub`. Only export `pub` via individual
//             use statements.
