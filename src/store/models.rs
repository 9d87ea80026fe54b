#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Account {
    pub(crate) id: i64,
    pub(crate) username: String,
    pub(crate) bio: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ChatMessage {
    pub(crate) id: i64,
    pub(crate) sender: String,
    pub(crate) receiver: String,
    pub(crate) content: String,
    /// Seconds since the unix epoch.
    pub(crate) timestamp: i64,
    pub(crate) delivered: bool,
}

/// MailboxView is what a user sees of their mailbox: how many messages are still unread, plus a
/// page of messages, newest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct MailboxView {
    pub(crate) unread_count: u64,
    pub(crate) messages: Vec<ChatMessage>,
}
