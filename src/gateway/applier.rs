use crate::registry::ActiveClientRegistry;
use crate::replica::{ApplyStream, Command, ReplicatedEntry};
use crate::store::{self, ChatMessage, StateStore, StoreError};

/// CommandApplier runs commands against this node's store and pushes new messages to receivers
/// that are online here.
#[derive(Clone)]
pub(crate) struct CommandApplier {
    logger: slog::Logger,
    store: StateStore,
    registry: ActiveClientRegistry,
}

impl CommandApplier {
    pub(crate) fn new(logger: slog::Logger, store: StateStore, registry: ActiveClientRegistry) -> Self {
        CommandApplier {
            logger,
            store,
            registry,
        }
    }

    pub(crate) fn store(&self) -> &StateStore {
        &self.store
    }

    pub(crate) fn registry(&self) -> &ActiveClientRegistry {
        &self.registry
    }

    /// Stores the message as delivered iff the receiver is online, then pushes it to them.
    pub(crate) fn send_message(&self, sender: &str, receiver: &str, content: &str, timestamp: i64) -> store::Result<i64> {
        let online = self.registry.is_online(receiver);
        let id = self.store.insert_message(sender, receiver, content, timestamp, online)?;

        if online {
            self.push_delivered(ChatMessage {
                id,
                sender: sender.to_string(),
                receiver: receiver.to_string(),
                content: content.to_string(),
                timestamp,
                delivered: true,
            })?;
        }

        Ok(id)
    }

    /// Pushes a message already stored as delivered. If the receiver logged out since the online
    /// check, the message goes back to unread.
    fn push_delivered(&self, message: ChatMessage) -> store::Result<()> {
        let id = message.id;
        let receiver = message.receiver.clone();
        if !self.registry.push(&receiver, message) {
            slog::debug!(self.logger, "{} went offline before message {} was pushed", receiver, id);
            self.store.mark_undelivered(id)?;
        }
        Ok(())
    }

    /// Puts messages that were taken off a receive queue but never reached the client back into
    /// the unread set.
    pub(crate) fn return_to_unread(&self, messages: &[ChatMessage]) {
        for message in messages {
            if let Err(e) = self.store.mark_undelivered(message.id) {
                slog::error!(self.logger, "Failed to mark message {} unread: {}", message.id, e);
            }
        }
    }

    /// Applies an entry received from the leader. Reads have nothing to apply.
    pub(crate) fn apply_replicated(&self, entry: &ReplicatedEntry) {
        if !entry.command.is_mutation() {
            return;
        }

        let result = match &entry.command {
            Command::CreateAccount {
                username,
                password_hash,
                bio,
            } => self.store.create_account(username, password_hash, bio),
            Command::DeleteAccount {
                username,
                password_hash,
            } => self
                .store
                .delete_account(username, password_hash)
                .map(|()| self.registry.unregister(username)),
            Command::FetchMessageUnread { username, num } => {
                self.store.fetch_messages_undelivered(username, *num).map(|_| ())
            }
            Command::DeleteMessage { username, message_ids } => {
                self.store.delete_messages(username, message_ids).map(|_| ())
            }
            Command::SendMessage {
                sender,
                receiver,
                content,
                timestamp,
            } => self.send_message(sender, receiver, content, *timestamp).map(|_| ()),
            _ => Ok(()),
        };

        match result {
            Ok(()) => slog::debug!(self.logger, "Applied replicated entry {:?}", entry.index),
            // Same outcome the accepting node already reported to its client.
            Err(StoreError::BadRequest(_))
            | Err(StoreError::AccountExists)
            | Err(StoreError::AccountNotFound)
            | Err(StoreError::InvalidCredentials) => {
                slog::debug!(self.logger, "Replicated entry {:?} was a no-op", entry.index)
            }
            Err(e) => slog::error!(self.logger, "Failed to apply replicated entry {:?}: {}", entry.index, e),
        }
    }

    /// Applies entries from the leader until the replica shuts down.
    pub(crate) async fn run(self, mut stream: ApplyStream) {
        while let Some(entry) = stream.recv().await {
            self.apply_replicated(&entry);
        }
        slog::debug!(self.logger, "Apply stream closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitlog::Index;
    use crate::store::test_utils::{in_memory_store, test_logger};

    fn applier_with_amy_and_bob() -> CommandApplier {
        let logger = test_logger();
        let store = in_memory_store();
        store.create_account("amy", "pw-amy", "hi").unwrap();
        store.create_account("bob", "pw-bob", "yo").unwrap();
        CommandApplier::new(logger.clone(), store, ActiveClientRegistry::new(logger))
    }

    fn replicated(index: u64, command: Command) -> ReplicatedEntry {
        ReplicatedEntry {
            index: Index::new(index),
            command,
        }
    }

    fn bob_to_amy(content: &str) -> Command {
        Command::SendMessage {
            sender: "bob".into(),
            receiver: "amy".into(),
            content: content.into(),
            timestamp: 1_700_000_000,
        }
    }

    fn unread(applier: &CommandApplier, username: &str) -> u64 {
        applier.store().count_messages(username, false).unwrap()
    }

    fn read(applier: &CommandApplier, username: &str) -> u64 {
        applier.store().count_messages(username, true).unwrap()
    }

    #[test]
    fn replicated_message_to_offline_receiver_is_unread() {
        let applier = applier_with_amy_and_bob();

        // Logged in but not streaming is still offline.
        applier.registry().register("amy");
        applier.apply_replicated(&replicated(0, bob_to_amy("hi")));

        assert_eq!((unread(&applier, "amy"), read(&applier, "amy")), (1, 0));
    }

    #[tokio::test]
    async fn replicated_message_to_streaming_receiver_is_pushed() {
        let applier = applier_with_amy_and_bob();
        applier.registry().register("amy");
        let inbox = applier.registry().attach("amy").unwrap();

        applier.apply_replicated(&replicated(0, bob_to_amy("hi")));

        let pushed = inbox.drain(false).await.unwrap();
        assert_eq!(pushed.len(), 1);
        assert_eq!(pushed[0].content, "hi");
        assert!(pushed[0].delivered);
        assert_eq!((unread(&applier, "amy"), read(&applier, "amy")), (0, 1));
    }

    #[test]
    fn replicated_account_deletion_removes_messages_and_session() {
        let applier = applier_with_amy_and_bob();
        applier.apply_replicated(&replicated(0, bob_to_amy("hi")));
        applier.registry().register("amy");

        // Wrong password changes nothing.
        applier.apply_replicated(&replicated(
            1,
            Command::DeleteAccount {
                username: "amy".into(),
                password_hash: "wrong".into(),
            },
        ));
        assert!(applier.store().account_exists("amy").unwrap());
        assert_eq!(unread(&applier, "amy"), 1);

        applier.apply_replicated(&replicated(
            2,
            Command::DeleteAccount {
                username: "amy".into(),
                password_hash: "pw-amy".into(),
            },
        ));
        assert!(!applier.store().account_exists("amy").unwrap());
        assert_eq!(unread(&applier, "amy"), 0);
        assert!(applier.registry().attach("amy").is_none());
    }

    #[test]
    fn replicated_unread_fetch_marks_messages_delivered() {
        let applier = applier_with_amy_and_bob();
        applier.apply_replicated(&replicated(0, bob_to_amy("one")));
        applier.apply_replicated(&replicated(1, bob_to_amy("two")));

        applier.apply_replicated(&replicated(
            2,
            Command::FetchMessageUnread {
                username: "amy".into(),
                num: 1,
            },
        ));

        assert_eq!((unread(&applier, "amy"), read(&applier, "amy")), (1, 1));
    }

    #[test]
    fn replicated_message_deletion_only_touches_own_messages() {
        let applier = applier_with_amy_and_bob();
        let id = applier.send_message("bob", "amy", "hi", 1_700_000_000).unwrap();

        applier.apply_replicated(&replicated(
            1,
            Command::DeleteMessage {
                username: "bob".into(),
                message_ids: vec![id],
            },
        ));
        assert_eq!(unread(&applier, "amy"), 1);

        applier.apply_replicated(&replicated(
            2,
            Command::DeleteMessage {
                username: "amy".into(),
                message_ids: vec![id],
            },
        ));
        assert_eq!(unread(&applier, "amy"), 0);
    }

    #[test]
    fn replicated_reads_change_nothing() {
        let applier = applier_with_amy_and_bob();
        applier.apply_replicated(&replicated(0, bob_to_amy("hi")));

        let reads = vec![
            Command::LoginAccount {
                username: "amy".into(),
                password_hash: "pw-amy".into(),
            },
            Command::ReceiveMessage { username: "amy".into() },
            Command::FetchHomepage { username: "amy".into() },
            Command::FetchMessageRead {
                username: "amy".into(),
                num: 5,
            },
            Command::ListAccount { pattern: None },
            Command::CheckAccountExists { username: "carl".into() },
            Command::Ending { username: "amy".into() },
        ];
        for (i, command) in reads.into_iter().enumerate() {
            applier.apply_replicated(&replicated(i as u64 + 1, command));
        }

        assert_eq!((unread(&applier, "amy"), read(&applier, "amy")), (1, 0));
        assert!(applier.registry().attach("amy").is_none());
    }

    #[test]
    fn push_to_departed_receiver_leaves_message_unread() {
        let applier = applier_with_amy_and_bob();
        // Stored as delivered while amy was online, then amy logged out before the push.
        let id = applier
            .store()
            .insert_message("bob", "amy", "hi", 1_700_000_000, true)
            .unwrap();

        applier
            .push_delivered(ChatMessage {
                id,
                sender: "bob".into(),
                receiver: "amy".into(),
                content: "hi".into(),
                timestamp: 1_700_000_000,
                delivered: true,
            })
            .unwrap();

        assert_eq!((unread(&applier, "amy"), read(&applier, "amy")), (1, 0));
    }
}
