use crate::store::ChatMessage;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::mpsc;

/// ActiveClientRegistry maps each logged-in username to the queue feeding that user's receive
/// stream. A user counts as online once a receive stream is attached to their session; until
/// then new messages stay unread in the store. Clones share the same map.
#[derive(Clone)]
pub(crate) struct ActiveClientRegistry {
    logger: slog::Logger,
    clients: Arc<Mutex<HashMap<String, Registration>>>,
}

struct Registration {
    sender: mpsc::UnboundedSender<ChatMessage>,
    inbox: Inbox,
    attached: bool,
}

/// Inbox is the consuming end of one login session's queue.
#[derive(Clone)]
pub(crate) struct Inbox {
    receiver: Arc<tokio::sync::Mutex<mpsc::UnboundedReceiver<ChatMessage>>>,
}

impl Inbox {
    fn same_session(&self, other: &Inbox) -> bool {
        Arc::ptr_eq(&self.receiver, &other.receiver)
    }

    /// Drains the session's queue. With `blocking`, waits until at least one message is queued
    /// and returns None once the session has been unregistered and its queue is empty.
    pub(crate) async fn drain(&self, blocking: bool) -> Option<Vec<ChatMessage>> {
        let mut receiver = self.receiver.lock().await;
        let mut batch = Vec::new();
        if blocking {
            batch.push(receiver.recv().await?);
        }
        while let Ok(message) = receiver.try_recv() {
            batch.push(message);
        }
        Some(batch)
    }
}

impl ActiveClientRegistry {
    pub(crate) fn new(logger: slog::Logger) -> Self {
        ActiveClientRegistry {
            logger,
            clients: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn clients(&self) -> MutexGuard<'_, HashMap<String, Registration>> {
        // Nothing panics while holding this lock, but don't take the registry down with a
        // poisoned lock either.
        match self.clients.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Starts a new session for `username`. A previous session for the same user is replaced,
    /// which ends that session's stream.
    pub(crate) fn register(&self, username: &str) -> Inbox {
        let (sender, receiver) = mpsc::unbounded_channel();
        let inbox = Inbox {
            receiver: Arc::new(tokio::sync::Mutex::new(receiver)),
        };
        let replaced = self.clients().insert(
            username.to_string(),
            Registration {
                sender,
                inbox: inbox.clone(),
                attached: false,
            },
        );

        if replaced.is_some() {
            slog::info!(self.logger, "Replaced existing session for {:?}", username);
        } else {
            slog::info!(self.logger, "{:?} logged in", username);
        }
        inbox
    }

    pub(crate) fn unregister(&self, username: &str) {
        if self.clients().remove(username).is_some() {
            slog::info!(self.logger, "{:?} is offline", username);
        }
    }

    /// Unregisters `username` only if `inbox` still belongs to the current session.
    pub(crate) fn unregister_inbox(&self, username: &str, inbox: &Inbox) {
        let mut clients = self.clients();
        let is_current = matches!(clients.get(username), Some(reg) if reg.inbox.same_session(inbox));
        if is_current {
            clients.remove(username);
            slog::info!(self.logger, "{:?} disconnected", username);
        }
    }

    /// Marks the current session of `username` as streaming and returns its inbox. None if the
    /// user isn't logged in.
    pub(crate) fn attach(&self, username: &str) -> Option<Inbox> {
        let mut clients = self.clients();
        let reg = clients.get_mut(username)?;
        reg.attached = true;
        slog::info!(self.logger, "{:?} is online", username);
        Some(reg.inbox.clone())
    }

    pub(crate) fn is_online(&self, username: &str) -> bool {
        matches!(self.clients().get(username), Some(reg) if reg.attached)
    }

    /// Queues `message` for `username`. Returns false, and drops the message, if the user is
    /// not logged in.
    pub(crate) fn push(&self, username: &str, message: ChatMessage) -> bool {
        match self.clients().get(username) {
            Some(reg) => reg.sender.send(message).is_ok(),
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn registry() -> ActiveClientRegistry {
        ActiveClientRegistry::new(slog::Logger::root(slog::Discard, slog::o!()))
    }

    fn message(id: i64, receiver: &str) -> ChatMessage {
        ChatMessage {
            id,
            sender: "bob".into(),
            receiver: receiver.into(),
            content: format!("message {}", id),
            timestamp: id,
            delivered: true,
        }
    }

    #[tokio::test]
    async fn push_only_reaches_registered_users() {
        let registry = registry();
        assert!(!registry.is_online("amy"));
        assert!(!registry.push("amy", message(1, "amy")));
        assert!(registry.attach("amy").is_none());

        registry.register("amy");
        assert!(!registry.is_online("amy"));
        let inbox = registry.attach("amy").unwrap();
        assert!(registry.is_online("amy"));
        assert!(registry.push("amy", message(2, "amy")));
        assert!(registry.push("amy", message(3, "amy")));

        let drained = inbox.drain(false).await.unwrap();
        assert_eq!(drained.iter().map(|m| m.id).collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(inbox.drain(false).await, Some(vec![]));
    }

    #[tokio::test]
    async fn blocking_drain_waits_for_push() {
        let registry = registry();
        let inbox = registry.register("amy");

        let pusher = registry.clone();
        tokio::spawn(async move {
            tokio::time::sleep(Duration::from_millis(20)).await;
            pusher.push("amy", message(7, "amy"));
        });

        let drained = tokio::time::timeout(Duration::from_secs(5), inbox.drain(true))
            .await
            .expect("drain should wake up on push")
            .unwrap();
        assert_eq!(drained, vec![message(7, "amy")]);
    }

    #[tokio::test]
    async fn unregister_ends_blocking_drain() {
        let registry = registry();
        registry.register("amy");
        let inbox = registry.attach("amy").unwrap();

        let waiter = tokio::spawn(async move { inbox.drain(true).await });
        tokio::time::sleep(Duration::from_millis(10)).await;
        registry.unregister("amy");

        let result = tokio::time::timeout(Duration::from_secs(5), waiter)
            .await
            .expect("drain should end once unregistered")
            .unwrap();
        assert_eq!(result, None);
        assert!(!registry.is_online("amy"));
        assert!(registry.attach("amy").is_none());
    }

    #[tokio::test]
    async fn stale_session_does_not_unregister_new_one() {
        let registry = registry();
        let old_inbox = registry.register("amy");
        let new_inbox = registry.register("amy");
        registry.attach("amy");

        registry.unregister_inbox("amy", &old_inbox);
        assert!(registry.is_online("amy"));

        // The replaced session's queue is closed.
        assert_eq!(old_inbox.drain(true).await, None);

        registry.unregister_inbox("amy", &new_inbox);
        assert!(!registry.is_online("amy"));
    }

    #[tokio::test]
    async fn concurrent_pushes_are_all_delivered() {
        let registry = registry();
        let inbox = registry.register("amy");

        let mut handles = Vec::new();
        for i in 0..20 {
            let registry = registry.clone();
            handles.push(tokio::spawn(async move { registry.push("amy", message(i, "amy")) }));
        }
        for handle in handles {
            assert!(handle.await.unwrap());
        }

        let mut ids: Vec<_> = inbox
            .drain(false)
            .await
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();
        ids.sort();
        assert_eq!(ids, (0..20).collect::<Vec<_>>());
    }
}
