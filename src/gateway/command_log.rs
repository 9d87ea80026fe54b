use crate::actor::WeakActorClient;
use crate::replica::{AppendCommandError, AppendCommandInput, Command};

/// CommandLog is where the gateway records each client command before applying it.
#[async_trait::async_trait]
pub(crate) trait CommandLog: Send + Sync + 'static {
    async fn append(&self, command: Command) -> Result<(), AppendCommandError>;
}

#[async_trait::async_trait]
impl CommandLog for WeakActorClient {
    async fn append(&self, command: Command) -> Result<(), AppendCommandError> {
        self.append_command(AppendCommandInput { command }).await.map(|_| ())
    }
}
