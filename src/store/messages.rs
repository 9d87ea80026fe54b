use crate::store::accounts::account_exists;
use crate::store::error::{Result, StoreError};
use crate::store::models::{ChatMessage, MailboxView};
use crate::store::state_store::StateStore;
use rusqlite::{params, Connection, Row};

impl StateStore {
    /// Stores a new message and returns its id. Both parties must have an account.
    pub(crate) fn insert_message(
        &self,
        sender: &str,
        receiver: &str,
        content: &str,
        timestamp: i64,
        delivered: bool,
    ) -> Result<i64> {
        self.limits.check_message(content)?;

        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            if !account_exists(&tx, sender)? || !account_exists(&tx, receiver)? {
                return Err(StoreError::AccountNotFound);
            }
            tx.execute(
                "INSERT INTO messages (sender, receiver, content, timestamp, delivered) VALUES (?1, ?2, ?3, ?4, ?5)",
                params![sender, receiver, content, timestamp, delivered],
            )?;
            let id = tx.last_insert_rowid();
            tx.commit()?;
            Ok(id)
        })
    }

    /// Deletes the listed messages that were addressed to `username`. Ids that don't exist or
    /// belong to someone else are skipped. Returns the refreshed homepage.
    pub(crate) fn delete_messages(&self, username: &str, message_ids: &[i64]) -> Result<MailboxView> {
        let homepage_size = self.limits.homepage_message_count;
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            {
                let mut stmt = tx.prepare("DELETE FROM messages WHERE id = ?1 AND receiver = ?2")?;
                for id in message_ids {
                    stmt.execute(params![id, username])?;
                }
            }
            let view = homepage(&tx, username, homepage_size)?;
            tx.commit()?;
            Ok(view)
        })
    }

    pub(crate) fn fetch_homepage(&self, username: &str) -> Result<MailboxView> {
        let homepage_size = self.limits.homepage_message_count;
        self.with_conn(|conn| homepage(conn, username, homepage_size))
    }

    /// The `n` most recent delivered messages, newest first.
    pub(crate) fn fetch_messages_delivered(&self, username: &str, n: u32) -> Result<Vec<ChatMessage>> {
        self.with_conn(|conn| fetch_messages(conn, username, true, n))
    }

    /// The `n` most recent undelivered messages, newest first. They are marked delivered in the
    /// same transaction, so no later fetch returns them again. The returned unread count is what
    /// remains after marking.
    pub(crate) fn fetch_messages_undelivered(&self, username: &str, n: u32) -> Result<MailboxView> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            let mut messages = fetch_messages(&tx, username, false, n)?;
            {
                let mut stmt = tx.prepare("UPDATE messages SET delivered = 1 WHERE id = ?1")?;
                for message in messages.iter_mut() {
                    stmt.execute(params![message.id])?;
                    message.delivered = true;
                }
            }
            let unread_count = count_messages(&tx, username, false)?;
            tx.commit()?;

            Ok(MailboxView {
                unread_count,
                messages,
            })
        })
    }

    #[cfg(test)]
    pub(crate) fn count_messages(&self, username: &str, delivered: bool) -> Result<u64> {
        self.with_conn(|conn| count_messages(conn, username, delivered))
    }

    /// Used when a push to an online receiver raced with that receiver going offline.
    pub(crate) fn mark_undelivered(&self, message_id: i64) -> Result<()> {
        self.with_conn(|conn| {
            conn.execute("UPDATE messages SET delivered = 0 WHERE id = ?1", params![message_id])?;
            Ok(())
        })
    }
}

pub(super) fn homepage(conn: &Connection, username: &str, homepage_size: u32) -> Result<MailboxView> {
    Ok(MailboxView {
        unread_count: count_messages(conn, username, false)?,
        messages: fetch_messages(conn, username, true, homepage_size)?,
    })
}

fn fetch_messages(conn: &Connection, username: &str, delivered: bool, n: u32) -> Result<Vec<ChatMessage>> {
    let mut stmt = conn.prepare(
        "SELECT id, sender, receiver, content, timestamp, delivered FROM messages
         WHERE receiver = ?1 AND delivered = ?2
         ORDER BY timestamp DESC, id DESC
         LIMIT ?3",
    )?;
    let rows = stmt.query_map(params![username, delivered, n], row_to_message)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

fn count_messages(conn: &Connection, username: &str, delivered: bool) -> Result<u64> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM messages WHERE receiver = ?1 AND delivered = ?2",
        params![username, delivered],
        |row| row.get(0),
    )?;
    Ok(count as u64)
}

fn row_to_message(row: &Row<'_>) -> rusqlite::Result<ChatMessage> {
    Ok(ChatMessage {
        id: row.get(0)?,
        sender: row.get(1)?,
        receiver: row.get(2)?,
        content: row.get(3)?,
        timestamp: row.get(4)?,
        delivered: row.get(5)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::store::state_store::test_utils::in_memory_store;
    use crate::store::{StateStore, StoreError};
    use std::collections::HashSet;

    fn store_with_amy_and_bob() -> StateStore {
        let store = in_memory_store();
        store.create_account("amy", "h(pw)", "").unwrap();
        store.create_account("bob", "h(pw)", "").unwrap();
        store
    }

    #[test]
    fn insert_requires_both_accounts() {
        let store = in_memory_store();
        store.create_account("amy", "h(pw)", "").unwrap();

        assert!(matches!(
            store.insert_message("bob", "amy", "hi", 1, false),
            Err(StoreError::AccountNotFound)
        ));
        assert!(matches!(
            store.insert_message("amy", "bob", "hi", 1, false),
            Err(StoreError::AccountNotFound)
        ));
        assert_eq!(store.count_messages("amy", false).unwrap(), 0);
    }

    #[test]
    fn insert_checks_content_bounds() {
        let store = store_with_amy_and_bob();
        assert!(matches!(
            store.insert_message("bob", "amy", "", 1, false),
            Err(StoreError::BadRequest(_))
        ));
        let too_long = "x".repeat(1025);
        assert!(matches!(
            store.insert_message("bob", "amy", &too_long, 1, false),
            Err(StoreError::BadRequest(_))
        ));
    }

    #[test]
    fn message_ids_increase() {
        let store = store_with_amy_and_bob();
        let first = store.insert_message("bob", "amy", "one", 1, false).unwrap();
        let second = store.insert_message("bob", "amy", "two", 1, false).unwrap();
        assert!(second > first);
    }

    #[test]
    fn fetch_undelivered_never_returns_a_message_twice() {
        let store = store_with_amy_and_bob();
        for i in 0..7 {
            store
                .insert_message("bob", "amy", &format!("msg {}", i), 100 + i, false)
                .unwrap();
        }

        let first = store.fetch_messages_undelivered("amy", 3).unwrap();
        assert_eq!(first.messages.len(), 3);
        assert_eq!(first.unread_count, 4);
        // Newest first
        assert_eq!(first.messages[0].content, "msg 6");
        assert!(first.messages.iter().all(|m| m.delivered));

        let second = store.fetch_messages_undelivered("amy", 3).unwrap();
        let third = store.fetch_messages_undelivered("amy", 3).unwrap();
        assert_eq!(third.messages.len(), 1);
        assert_eq!(third.unread_count, 0);

        let mut seen = HashSet::new();
        for m in first
            .messages
            .iter()
            .chain(second.messages.iter())
            .chain(third.messages.iter())
        {
            assert!(seen.insert(m.id), "message {} returned twice", m.id);
        }
        assert_eq!(seen.len(), 7);

        let fourth = store.fetch_messages_undelivered("amy", 3).unwrap();
        assert!(fourth.messages.is_empty());
        assert_eq!(store.count_messages("amy", true).unwrap(), 7);
    }

    #[test]
    fn homepage_shows_unread_count_and_latest_delivered() {
        let store = store_with_amy_and_bob();
        for i in 0..8 {
            store
                .insert_message("bob", "amy", &format!("read {}", i), 10 + i, true)
                .unwrap();
        }
        store.insert_message("bob", "amy", "unread", 50, false).unwrap();

        let homepage = store.fetch_homepage("amy").unwrap();
        assert_eq!(homepage.unread_count, 1);
        assert_eq!(homepage.messages.len(), 5);
        assert_eq!(homepage.messages[0].content, "read 7");
        assert_eq!(homepage.messages[4].content, "read 3");

        let delivered = store.fetch_messages_delivered("amy", 2).unwrap();
        assert_eq!(
            delivered.iter().map(|m| m.content.as_str()).collect::<Vec<_>>(),
            vec!["read 7", "read 6"]
        );
    }

    #[test]
    fn delete_messages_is_scoped_to_receiver() {
        let store = store_with_amy_and_bob();
        let to_amy = store.insert_message("bob", "amy", "for amy", 1, true).unwrap();
        let to_bob = store.insert_message("amy", "bob", "for bob", 2, true).unwrap();

        // amy cannot delete bob's message, and unknown ids are ignored.
        let homepage = store.delete_messages("amy", &[to_amy, to_bob, 9999]).unwrap();
        assert!(homepage.messages.is_empty());

        assert_eq!(store.count_messages("amy", true).unwrap(), 0);
        assert_eq!(store.count_messages("bob", true).unwrap(), 1);
    }

    #[test]
    fn mark_undelivered_returns_message_to_unread() {
        let store = store_with_amy_and_bob();
        let id = store.insert_message("bob", "amy", "hi", 1, true).unwrap();
        store.mark_undelivered(id).unwrap();

        let unread = store.fetch_messages_undelivered("amy", 5).unwrap();
        assert_eq!(unread.messages.len(), 1);
        assert_eq!(unread.messages[0].id, id);
    }
}
