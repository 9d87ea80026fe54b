use clap::Parser;
use raft_chat::{try_create_chat_node, ServerConfig};
use slog::Drain;
use std::error::Error;
use std::path::PathBuf;

/// One node of a replicated chat cluster.
#[derive(Parser, Debug)]
#[command(name = "raft-chat", version)]
struct Cli {
    /// Path to the cluster config file.
    #[arg(short, long, default_value = "config.yaml")]
    config: PathBuf,

    /// This node's index into the config's `servers` list.
    #[arg(short, long)]
    node: usize,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let server_config = ServerConfig::load(&cli.config)?;
    let node_config = server_config.node_config(cli.node, create_root_logger())?;
    let logger = node_config.logger.clone();

    let node = try_create_chat_node(node_config).await?;
    slog::info!(logger, "Node {:?} is up", node.replica_id());

    tokio::signal::ctrl_c().await?;
    slog::info!(logger, "Shutting down");
    drop(node);

    Ok(())
}

fn create_root_logger() -> slog::Logger {
    let decorator = slog_term::TermDecorator::new().build();
    let drain = slog_term::FullFormat::new(decorator).build().fuse();
    let drain = slog_async::Async::new(drain).build().fuse();

    slog::Logger::root(drain, slog::o!())
}
