use crate::gateway::{CommandApplier, CommandLog, StatusCode};
use crate::replica::Command;
use crate::store::{self, Account, ChatMessage, MailboxView, StoreError};
use tokio::sync::mpsc;

/// ClientGateway runs the chat operations of one node.
#[derive(Clone)]
pub(crate) struct ClientGateway<C: CommandLog> {
    logger: slog::Logger,
    log: C,
    applier: CommandApplier,
}

impl<C: CommandLog> ClientGateway<C> {
    pub(crate) fn new(logger: slog::Logger, log: C, applier: CommandApplier) -> Self {
        ClientGateway { logger, log, applier }
    }

    pub(crate) async fn starting(&self) -> StatusCode {
        StatusCode::Success
    }

    pub(crate) async fn check_account_exists(&self, username: String) -> (StatusCode, bool) {
        let command = Command::CheckAccountExists {
            username: username.clone(),
        };
        if let Err(status) = self.append(command).await {
            return (status, false);
        }

        match self.applier.store().account_exists(&username) {
            Ok(true) => (StatusCode::AccountExists, true),
            Ok(false) => (StatusCode::AccountNotFound, false),
            Err(e) => (self.status_of(&e), false),
        }
    }

    pub(crate) async fn create_account(&self, username: String, password_hash: String, bio: String) -> StatusCode {
        let command = Command::CreateAccount {
            username: username.clone(),
            password_hash: password_hash.clone(),
            bio: bio.clone(),
        };
        if let Err(status) = self.append(command).await {
            return status;
        }

        self.to_status(self.applier.store().create_account(&username, &password_hash, &bio))
    }

    /// On success the user is online on this node until `ending`.
    pub(crate) async fn login_account(
        &self,
        username: String,
        password_hash: String,
    ) -> Result<MailboxView, StatusCode> {
        let command = Command::LoginAccount {
            username: username.clone(),
            password_hash: password_hash.clone(),
        };
        self.append(command).await?;

        let mailbox = self
            .applier
            .store()
            .login_account(&username, &password_hash)
            .map_err(|e| self.status_of(&e))?;
        self.applier.registry().register(&username);
        slog::info!(self.logger, "User {} logged in", username);

        Ok(mailbox)
    }

    pub(crate) async fn list_accounts(&self, pattern: Option<String>) -> Result<Vec<Account>, StatusCode> {
        let command = Command::ListAccount {
            pattern: pattern.clone(),
        };
        self.append(command).await?;

        self.applier
            .store()
            .list_accounts(pattern.as_deref())
            .map_err(|e| self.status_of(&e))
    }

    pub(crate) async fn delete_account(&self, username: String, password_hash: String) -> StatusCode {
        let command = Command::DeleteAccount {
            username: username.clone(),
            password_hash: password_hash.clone(),
        };
        if let Err(status) = self.append(command).await {
            return status;
        }

        let result = self.applier.store().delete_account(&username, &password_hash);
        if result.is_ok() {
            self.applier.registry().unregister(&username);
        }
        self.to_status(result)
    }

    pub(crate) async fn fetch_homepage(&self, username: String) -> Result<MailboxView, StatusCode> {
        let command = Command::FetchHomepage {
            username: username.clone(),
        };
        self.append(command).await?;

        self.applier
            .store()
            .fetch_homepage(&username)
            .map_err(|e| self.status_of(&e))
    }

    pub(crate) async fn fetch_message_read(&self, username: String, num: u32) -> Result<Vec<ChatMessage>, StatusCode> {
        let command = Command::FetchMessageRead {
            username: username.clone(),
            num,
        };
        self.append(command).await?;

        self.applier
            .store()
            .fetch_messages_delivered(&username, num)
            .map_err(|e| self.status_of(&e))
    }

    pub(crate) async fn fetch_message_unread(&self, username: String, num: u32) -> Result<MailboxView, StatusCode> {
        let command = Command::FetchMessageUnread {
            username: username.clone(),
            num,
        };
        self.append(command).await?;

        self.applier
            .store()
            .fetch_messages_undelivered(&username, num)
            .map_err(|e| self.status_of(&e))
    }

    pub(crate) async fn delete_messages(&self, username: String, message_ids: Vec<i64>) -> Result<MailboxView, StatusCode> {
        let command = Command::DeleteMessage {
            username: username.clone(),
            message_ids: message_ids.clone(),
        };
        self.append(command).await?;

        self.applier
            .store()
            .delete_messages(&username, &message_ids)
            .map_err(|e| self.status_of(&e))
    }

    pub(crate) async fn send_message(&self, sender: String, receiver: String, content: String) -> StatusCode {
        let timestamp = chrono::Utc::now().timestamp();
        let command = Command::SendMessage {
            sender: sender.clone(),
            receiver: receiver.clone(),
            content: content.clone(),
            timestamp,
        };
        if let Err(status) = self.append(command).await {
            return status;
        }

        let result = self.applier.send_message(&sender, &receiver, &content, timestamp);
        self.to_status(result.map(|_| ()))
    }

    /// Streams batches of pushed messages until the returned receiver is dropped. While the
    /// stream is open the user counts as online. The stream is empty if the user isn't logged in
    /// on this node.
    pub(crate) async fn receive_message(&self, username: String) -> mpsc::Receiver<Vec<ChatMessage>> {
        let (tx, rx) = mpsc::channel(16);

        let command = Command::ReceiveMessage {
            username: username.clone(),
        };
        if self.append(command).await.is_err() {
            return rx;
        }

        let registry = self.applier.registry().clone();
        let inbox = match registry.attach(&username) {
            Some(inbox) => inbox,
            None => {
                slog::debug!(self.logger, "ReceiveMessage for {} who is not logged in", username);
                return rx;
            }
        };

        let logger = self.logger.clone();
        let applier = self.applier.clone();
        tokio::task::spawn(async move {
            loop {
                tokio::select! {
                    batch = inbox.drain(true) => match batch {
                        Some(batch) => {
                            if let Err(unsent) = tx.send(batch).await {
                                applier.return_to_unread(&unsent.0);
                                break;
                            }
                        }
                        // Logged out or replaced by a newer login.
                        None => break,
                    },
                    _ = tx.closed() => break,
                }
            }

            registry.unregister_inbox(&username, &inbox);
            // Pushed after the client went away.
            if let Some(leftover) = inbox.drain(false).await {
                applier.return_to_unread(&leftover);
            }
            slog::info!(logger, "Receive stream for {} ended", username);
        });

        rx
    }

    pub(crate) async fn ending(&self, username: String) -> StatusCode {
        let command = Command::Ending {
            username: username.clone(),
        };
        if let Err(status) = self.append(command).await {
            return status;
        }

        self.applier.registry().unregister(&username);
        StatusCode::Success
    }

    async fn append(&self, command: Command) -> Result<(), StatusCode> {
        self.log.append(command).await.map_err(|e| {
            slog::error!(self.logger, "Failed to append command to log: {:?}", e);
            StatusCode::DatabaseError
        })
    }

    fn to_status(&self, result: store::Result<()>) -> StatusCode {
        match result {
            Ok(()) => StatusCode::Success,
            Err(e) => self.status_of(&e),
        }
    }

    fn status_of(&self, e: &StoreError) -> StatusCode {
        let status = StatusCode::from(e);
        if status == StatusCode::DatabaseError {
            slog::error!(self.logger, "Store failure: {}", e);
        }
        status
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::ActiveClientRegistry;
    use crate::replica::AppendCommandError;
    use crate::store::test_utils::{in_memory_store, test_logger};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    #[derive(Clone, Default)]
    struct RecordingLog {
        commands: Arc<Mutex<Vec<Command>>>,
        broken: bool,
    }

    #[async_trait::async_trait]
    impl CommandLog for RecordingLog {
        async fn append(&self, command: Command) -> Result<(), AppendCommandError> {
            if self.broken {
                return Err(AppendCommandError::ActorExited);
            }
            self.commands.lock().unwrap().push(command);
            Ok(())
        }
    }

    fn gateway_with(log: RecordingLog) -> ClientGateway<RecordingLog> {
        let logger = test_logger();
        let applier = CommandApplier::new(
            logger.clone(),
            in_memory_store(),
            ActiveClientRegistry::new(logger.clone()),
        );
        ClientGateway::new(logger, log, applier)
    }

    async fn with_amy_and_bob(gateway: &ClientGateway<RecordingLog>) {
        assert_eq!(
            gateway.create_account("amy".into(), "pw-amy".into(), "hi".into()).await,
            StatusCode::Success
        );
        assert_eq!(
            gateway.create_account("bob".into(), "pw-bob".into(), "yo".into()).await,
            StatusCode::Success
        );
    }

    #[tokio::test]
    async fn every_call_is_logged_before_it_is_applied() {
        let log = RecordingLog::default();
        let gateway = gateway_with(log.clone());

        with_amy_and_bob(&gateway).await;
        assert_eq!(
            gateway.create_account("amy".into(), "other".into(), "".into()).await,
            StatusCode::AccountExists
        );
        assert_eq!(gateway.check_account_exists("amy".into()).await, (StatusCode::AccountExists, true));
        assert_eq!(
            gateway.check_account_exists("carl".into()).await,
            (StatusCode::AccountNotFound, false)
        );

        let commands = log.commands.lock().unwrap();
        assert_eq!(commands.len(), 5);
        assert_eq!(
            commands[4],
            Command::CheckAccountExists {
                username: "carl".into()
            }
        );
    }

    #[tokio::test]
    async fn broken_log_reads_as_database_error() {
        let gateway = gateway_with(RecordingLog {
            broken: true,
            ..Default::default()
        });

        assert_eq!(
            gateway.create_account("amy".into(), "pw".into(), "".into()).await,
            StatusCode::DatabaseError
        );
        assert_eq!(gateway.check_account_exists("amy".into()).await, (StatusCode::DatabaseError, false));
        assert_eq!(gateway.ending("amy".into()).await, StatusCode::DatabaseError);
    }

    #[tokio::test]
    async fn offline_receiver_reads_messages_as_unread() {
        let gateway = gateway_with(RecordingLog::default());
        with_amy_and_bob(&gateway).await;

        assert_eq!(
            gateway.send_message("amy".into(), "bob".into(), "hello".into()).await,
            StatusCode::Success
        );

        let mailbox = gateway.login_account("bob".into(), "pw-bob".into()).await.unwrap();
        assert_eq!(mailbox.unread_count, 1);

        let unread = gateway.fetch_message_unread("bob".into(), 10).await.unwrap();
        assert_eq!(unread.unread_count, 0);
        assert_eq!(unread.messages.len(), 1);
        assert_eq!(unread.messages[0].content, "hello");

        let read = gateway.fetch_message_read("bob".into(), 10).await.unwrap();
        assert_eq!(read.len(), 1);
    }

    #[tokio::test]
    async fn online_receiver_gets_message_pushed() {
        let gateway = gateway_with(RecordingLog::default());
        with_amy_and_bob(&gateway).await;

        gateway.login_account("bob".into(), "pw-bob".into()).await.unwrap();
        let mut stream = gateway.receive_message("bob".into()).await;

        assert_eq!(
            gateway.send_message("amy".into(), "bob".into(), "hi bob".into()).await,
            StatusCode::Success
        );

        let batch = tokio::time::timeout(Duration::from_secs(5), stream.recv())
            .await
            .expect("no push within timeout")
            .expect("stream ended");
        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].sender, "amy");
        assert!(batch[0].delivered);

        // Pushed messages are stored as already delivered.
        let unread = gateway.fetch_message_unread("bob".into(), 10).await.unwrap();
        assert!(unread.messages.is_empty());
    }

    #[tokio::test]
    async fn logged_in_user_without_stream_reads_message_as_unread() {
        let gateway = gateway_with(RecordingLog::default());

        assert_eq!(
            gateway.create_account("amy".into(), "h(pw)".into(), "bio".into()).await,
            StatusCode::Success
        );
        assert_eq!(
            gateway.create_account("amy".into(), "h(pw)".into(), "bio".into()).await,
            StatusCode::AccountExists
        );
        let mailbox = gateway.login_account("amy".into(), "h(pw)".into()).await.unwrap();
        assert_eq!(mailbox.unread_count, 0);

        assert_eq!(
            gateway.send_message("bob".into(), "amy".into(), "hi".into()).await,
            StatusCode::AccountNotFound
        );
        assert_eq!(
            gateway.create_account("bob".into(), "h(pw2)".into(), "".into()).await,
            StatusCode::Success
        );
        assert_eq!(
            gateway.send_message("bob".into(), "amy".into(), "hi".into()).await,
            StatusCode::Success
        );

        let first = gateway.fetch_message_unread("amy".into(), 5).await.unwrap();
        assert_eq!(first.messages.len(), 1);
        assert_eq!(first.messages[0].content, "hi");

        let second = gateway.fetch_message_unread("amy".into(), 5).await.unwrap();
        assert_eq!(second.unread_count, 0);
        assert!(second.messages.is_empty());
    }

    #[tokio::test]
    async fn message_pushed_to_a_closed_stream_stays_unread() {
        let gateway = gateway_with(RecordingLog::default());
        with_amy_and_bob(&gateway).await;

        gateway.login_account("bob".into(), "pw-bob".into()).await.unwrap();
        let stream = gateway.receive_message("bob".into()).await;
        // Client goes away before the forwarding task gets to run.
        drop(stream);
        assert_eq!(
            gateway.send_message("amy".into(), "bob".into(), "missed".into()).await,
            StatusCode::Success
        );

        let deadline = tokio::time::Instant::now() + Duration::from_secs(5);
        loop {
            tokio::time::sleep(Duration::from_millis(10)).await;
            let unread = gateway.fetch_message_unread("bob".into(), 10).await.unwrap();
            if !unread.messages.is_empty() {
                assert_eq!(unread.messages[0].content, "missed");
                break;
            }
            assert!(tokio::time::Instant::now() < deadline, "message never returned to unread");
        }
        assert!(!gateway.applier.registry().is_online("bob"));
    }

    #[tokio::test]
    async fn receive_stream_ends_for_logged_out_user() {
        let gateway = gateway_with(RecordingLog::default());
        with_amy_and_bob(&gateway).await;

        let mut stream = gateway.receive_message("bob".into()).await;
        assert_eq!(stream.recv().await, None);

        gateway.login_account("bob".into(), "pw-bob".into()).await.unwrap();
        let mut stream = gateway.receive_message("bob".into()).await;
        assert_eq!(gateway.ending("bob".into()).await, StatusCode::Success);
        let ended = tokio::time::timeout(Duration::from_secs(5), stream.recv()).await;
        assert_eq!(ended, Ok(None));
    }

    #[tokio::test]
    async fn domain_failures_map_to_status() {
        let gateway = gateway_with(RecordingLog::default());
        with_amy_and_bob(&gateway).await;

        assert_eq!(
            gateway.login_account("amy".into(), "wrong".into()).await,
            Err(StatusCode::InvalidCredentials)
        );
        assert_eq!(
            gateway.send_message("amy".into(), "nobody".into(), "hi".into()).await,
            StatusCode::AccountNotFound
        );
        assert_eq!(gateway.delete_account("bob".into(), "pw-bob".into()).await, StatusCode::Success);

        let accounts = gateway.list_accounts(None).await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].username, "amy");
    }
}
