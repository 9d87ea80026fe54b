use crate::store::error::{Result, StoreError};
use crate::store::messages;
use crate::store::models::{Account, MailboxView};
use crate::store::state_store::StateStore;
use rusqlite::{params, Connection, OptionalExtension, Row};

impl StateStore {
    pub(crate) fn create_account(&self, username: &str, password_hash: &str, bio: &str) -> Result<()> {
        self.limits.check_username(username)?;
        self.limits.check_password(password_hash)?;

        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            if account_exists(&tx, username)? {
                return Err(StoreError::AccountExists);
            }
            tx.execute(
                "INSERT INTO accounts (username, password_hash, bio) VALUES (?1, ?2, ?3)",
                params![username, password_hash, bio],
            )?;
            tx.commit()?;
            Ok(())
        })
    }

    pub(crate) fn account_exists(&self, username: &str) -> Result<bool> {
        self.with_conn(|conn| account_exists(conn, username))
    }

    /// Checks credentials, then returns the user's homepage.
    pub(crate) fn login_account(&self, username: &str, password_hash: &str) -> Result<MailboxView> {
        let homepage_size = self.limits.homepage_message_count;
        self.with_conn(|conn| {
            match stored_password_hash(conn, username)? {
                Some(stored) if stored == password_hash => {}
                _ => return Err(StoreError::InvalidCredentials),
            }
            messages::homepage(conn, username, homepage_size)
        })
    }

    /// Deletes the account and every message addressed to it.
    pub(crate) fn delete_account(&self, username: &str, password_hash: &str) -> Result<()> {
        self.with_conn(|conn| {
            let tx = conn.transaction()?;
            match stored_password_hash(&tx, username)? {
                None => return Err(StoreError::AccountNotFound),
                Some(stored) if stored != password_hash => return Err(StoreError::InvalidCredentials),
                Some(_) => {}
            }
            tx.execute("DELETE FROM messages WHERE receiver = ?1", params![username])?;
            tx.execute("DELETE FROM accounts WHERE username = ?1", params![username])?;
            tx.commit()?;
            Ok(())
        })
    }

    /// Accounts whose username contains `pattern` (case-sensitive), or all accounts when the
    /// pattern is absent or empty.
    pub(crate) fn list_accounts(&self, pattern: Option<&str>) -> Result<Vec<Account>> {
        self.with_conn(|conn| match pattern.filter(|p| !p.is_empty()) {
            None => {
                let mut stmt = conn.prepare("SELECT id, username, bio FROM accounts ORDER BY id")?;
                let rows = stmt.query_map([], row_to_account)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            }
            Some(pattern) => {
                // instr() is case-sensitive, unlike LIKE.
                let mut stmt =
                    conn.prepare("SELECT id, username, bio FROM accounts WHERE instr(username, ?1) > 0 ORDER BY id")?;
                let rows = stmt.query_map(params![pattern], row_to_account)?;
                Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
            }
        })
    }
}

pub(super) fn account_exists(conn: &Connection, username: &str) -> Result<bool> {
    let exists: bool = conn.query_row(
        "SELECT EXISTS(SELECT 1 FROM accounts WHERE username = ?1)",
        params![username],
        |row| row.get(0),
    )?;
    Ok(exists)
}

fn stored_password_hash(conn: &Connection, username: &str) -> Result<Option<String>> {
    let hash = conn
        .query_row(
            "SELECT password_hash FROM accounts WHERE username = ?1",
            params![username],
            |row| row.get(0),
        )
        .optional()?;
    Ok(hash)
}

fn row_to_account(row: &Row<'_>) -> rusqlite::Result<Account> {
    Ok(Account {
        id: row.get(0)?,
        username: row.get(1)?,
        bio: row.get(2)?,
    })
}

#[cfg(test)]
mod tests {
    use crate::store::state_store::test_utils::in_memory_store;
    use crate::store::StoreError;

    #[test]
    fn usernames_are_unique() {
        let store = in_memory_store();
        store.create_account("amy", "h(pw)", "bio").unwrap();

        let second = store.create_account("amy", "other", "other bio");
        assert!(matches!(second, Err(StoreError::AccountExists)));
        assert_eq!(store.list_accounts(None).unwrap().len(), 1);
    }

    #[test]
    fn create_account_checks_bounds() {
        let store = in_memory_store();
        assert!(matches!(
            store.create_account("", "h(pw)", "bio"),
            Err(StoreError::BadRequest(_))
        ));
        assert!(matches!(
            store.create_account("amy", "", "bio"),
            Err(StoreError::BadRequest(_))
        ));
        let long_name = "x".repeat(33);
        assert!(matches!(
            store.create_account(&long_name, "h(pw)", "bio"),
            Err(StoreError::BadRequest(_))
        ));
        assert!(!store.account_exists("amy").unwrap());
    }

    #[test]
    fn login_checks_password() {
        let store = in_memory_store();
        store.create_account("amy", "h(pw)", "bio").unwrap();

        let homepage = store.login_account("amy", "h(pw)").unwrap();
        assert_eq!(homepage.unread_count, 0);
        assert!(homepage.messages.is_empty());

        assert!(matches!(
            store.login_account("amy", "wrong"),
            Err(StoreError::InvalidCredentials)
        ));
        assert!(matches!(
            store.login_account("nobody", "h(pw)"),
            Err(StoreError::InvalidCredentials)
        ));
    }

    #[test]
    fn delete_account_cascades_to_received_messages() {
        let store = in_memory_store();
        store.create_account("amy", "h(pw)", "").unwrap();
        store.create_account("bob", "h(pw)", "").unwrap();
        store.insert_message("bob", "amy", "hi amy", 10, false).unwrap();
        store.insert_message("bob", "amy", "again", 11, true).unwrap();
        store.insert_message("amy", "bob", "hi bob", 12, false).unwrap();

        assert!(matches!(
            store.delete_account("amy", "wrong"),
            Err(StoreError::InvalidCredentials)
        ));
        store.delete_account("amy", "h(pw)").unwrap();

        assert!(!store.account_exists("amy").unwrap());
        assert_eq!(store.count_messages("amy", false).unwrap(), 0);
        assert_eq!(store.count_messages("amy", true).unwrap(), 0);
        assert!(store.fetch_messages_delivered("amy", 10).unwrap().is_empty());
        // Messages amy sent are not hers to take with her.
        assert_eq!(store.count_messages("bob", false).unwrap(), 1);

        assert!(matches!(
            store.delete_account("amy", "h(pw)"),
            Err(StoreError::AccountNotFound)
        ));
    }

    #[test]
    fn list_accounts_substring_is_case_sensitive() {
        let store = in_memory_store();
        store.create_account("amy", "h", "likes tea").unwrap();
        store.create_account("Amelia", "h", "").unwrap();
        store.create_account("bob", "h", "").unwrap();

        let all: Vec<_> = store
            .list_accounts(None)
            .unwrap()
            .into_iter()
            .map(|a| a.username)
            .collect();
        assert_eq!(all, vec!["amy", "Amelia", "bob"]);

        let empty_pattern = store.list_accounts(Some("")).unwrap();
        assert_eq!(empty_pattern.len(), 3);

        let matched = store.list_accounts(Some("m")).unwrap();
        assert_eq!(matched.len(), 2);

        let matched = store.list_accounts(Some("am")).unwrap();
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].username, "amy");
        assert_eq!(matched[0].bio, "likes tea");

        assert!(store.list_accounts(Some("zed")).unwrap().is_empty());
    }
}
