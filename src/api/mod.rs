//! This mod is meant to hold most of the code for the library's client-facing API.
mod config_file;
mod options;
mod wiring;

pub use config_file::ConfigError;
pub use config_file::RaftTimingsConfig;
pub use config_file::ServerConfig;
pub use options::ChatNodeOptions;
pub use wiring::try_create_chat_node;
pub use wiring::ChatNode;
pub use wiring::ChatNodeConfig;
pub use wiring::ChatNodeCreationError;
