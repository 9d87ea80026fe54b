use crate::grpc::proto_log_entry;
use crate::grpc::{
    ProtoAccountExistsReq, ProtoCreateAccountReq, ProtoDeleteAccountReq, ProtoDeleteMessageReq, ProtoEndingReq,
    ProtoFetchHomepageReq, ProtoFetchMessageReadReq, ProtoFetchMessageUnreadReq, ProtoListAccountReq,
    ProtoLoginAccountReq, ProtoReceiveMessageReq, ProtoSendMessageCommand,
};

/// Command is one client operation as recorded in the replicated log.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum Command {
    CheckAccountExists {
        username: String,
    },
    CreateAccount {
        username: String,
        password_hash: String,
        bio: String,
    },
    LoginAccount {
        username: String,
        password_hash: String,
    },
    ListAccount {
        pattern: Option<String>,
    },
    DeleteAccount {
        username: String,
        password_hash: String,
    },
    FetchHomepage {
        username: String,
    },
    FetchMessageRead {
        username: String,
        num: u32,
    },
    FetchMessageUnread {
        username: String,
        num: u32,
    },
    DeleteMessage {
        username: String,
        message_ids: Vec<i64>,
    },
    // Timestamp is picked once by the accepting node so every replica stores the same value.
    SendMessage {
        sender: String,
        receiver: String,
        content: String,
        timestamp: i64,
    },
    ReceiveMessage {
        username: String,
    },
    Ending {
        username: String,
    },
}

impl Command {
    /// Whether applying the command changes the store.
    pub(crate) fn is_mutation(&self) -> bool {
        match self {
            Command::CreateAccount { .. }
            | Command::DeleteAccount { .. }
            | Command::FetchMessageUnread { .. }
            | Command::DeleteMessage { .. }
            | Command::SendMessage { .. } => true,
            Command::CheckAccountExists { .. }
            | Command::LoginAccount { .. }
            | Command::ListAccount { .. }
            | Command::FetchHomepage { .. }
            | Command::FetchMessageRead { .. }
            | Command::ReceiveMessage { .. }
            | Command::Ending { .. } => false,
        }
    }
}

impl From<&Command> for proto_log_entry::Command {
    fn from(command: &Command) -> Self {
        use proto_log_entry::Command as Proto;

        match command.clone() {
            Command::CheckAccountExists { username } => Proto::CheckAccountExists(ProtoAccountExistsReq { username }),
            Command::CreateAccount {
                username,
                password_hash,
                bio,
            } => Proto::CreateAccount(ProtoCreateAccountReq {
                username,
                password_hash,
                bio,
            }),
            Command::LoginAccount {
                username,
                password_hash,
            } => Proto::LoginAccount(ProtoLoginAccountReq {
                username,
                password_hash,
            }),
            Command::ListAccount { pattern } => Proto::ListAccount(ProtoListAccountReq {
                pattern: pattern.unwrap_or_default(),
            }),
            Command::DeleteAccount {
                username,
                password_hash,
            } => Proto::DeleteAccount(ProtoDeleteAccountReq {
                username,
                password_hash,
            }),
            Command::FetchHomepage { username } => Proto::FetchHomepage(ProtoFetchHomepageReq { username }),
            Command::FetchMessageRead { username, num } => {
                Proto::FetchMessageRead(ProtoFetchMessageReadReq { username, num })
            }
            Command::FetchMessageUnread { username, num } => {
                Proto::FetchMessageUnread(ProtoFetchMessageUnreadReq { username, num })
            }
            Command::DeleteMessage { username, message_ids } => {
                Proto::DeleteMessage(ProtoDeleteMessageReq { username, message_ids })
            }
            Command::SendMessage {
                sender,
                receiver,
                content,
                timestamp,
            } => Proto::SendMessage(ProtoSendMessageCommand {
                sender,
                receiver,
                content,
                timestamp,
            }),
            Command::ReceiveMessage { username } => Proto::ReceiveMessage(ProtoReceiveMessageReq { username }),
            Command::Ending { username } => Proto::Ending(ProtoEndingReq { username }),
        }
    }
}

impl From<proto_log_entry::Command> for Command {
    fn from(proto: proto_log_entry::Command) -> Self {
        use proto_log_entry::Command as Proto;

        match proto {
            Proto::CheckAccountExists(req) => Command::CheckAccountExists { username: req.username },
            Proto::CreateAccount(req) => Command::CreateAccount {
                username: req.username,
                password_hash: req.password_hash,
                bio: req.bio,
            },
            Proto::LoginAccount(req) => Command::LoginAccount {
                username: req.username,
                password_hash: req.password_hash,
            },
            Proto::ListAccount(req) => Command::ListAccount {
                pattern: Some(req.pattern).filter(|p| !p.is_empty()),
            },
            Proto::DeleteAccount(req) => Command::DeleteAccount {
                username: req.username,
                password_hash: req.password_hash,
            },
            Proto::FetchHomepage(req) => Command::FetchHomepage { username: req.username },
            Proto::FetchMessageRead(req) => Command::FetchMessageRead {
                username: req.username,
                num: req.num,
            },
            Proto::FetchMessageUnread(req) => Command::FetchMessageUnread {
                username: req.username,
                num: req.num,
            },
            Proto::DeleteMessage(req) => Command::DeleteMessage {
                username: req.username,
                message_ids: req.message_ids,
            },
            Proto::SendMessage(cmd) => Command::SendMessage {
                sender: cmd.sender,
                receiver: cmd.receiver,
                content: cmd.content,
                timestamp: cmd.timestamp,
            },
            Proto::ReceiveMessage(req) => Command::ReceiveMessage { username: req.username },
            Proto::Ending(req) => Command::Ending { username: req.username },
        }
    }
}
