use crate::commitlog::Index;
use crate::grpc::ProtoLogEntry;
use crate::replica::local_state::Term;
use crate::replica::write_ahead_log::Command;
use std::convert::TryFrom;

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct LogEntry {
    pub(crate) term: Term,
    pub(crate) index: Index,
    pub(crate) command: Command,
}

impl LogEntry {
    /// Two entries at the same position conflict if they differ in term or in command.
    pub(crate) fn conflicts_with(&self, other: &LogEntry) -> bool {
        self.term != other.term || self.command != other.command
    }
}

impl From<&LogEntry> for ProtoLogEntry {
    fn from(entry: &LogEntry) -> Self {
        ProtoLogEntry {
            term: entry.term.as_u64(),
            index: entry.index.as_u64(),
            command: Some((&entry.command).into()),
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("log entry at index {0} has no command")]
pub(crate) struct MissingCommand(pub(crate) u64);

impl TryFrom<ProtoLogEntry> for LogEntry {
    type Error = MissingCommand;

    fn try_from(proto: ProtoLogEntry) -> Result<Self, Self::Error> {
        let command = proto.command.ok_or(MissingCommand(proto.index))?;

        Ok(LogEntry {
            term: Term::new(proto.term),
            index: Index::new(proto.index),
            command: command.into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_conversion_keeps_every_field() {
        let entry = LogEntry {
            term: Term::new(4),
            index: Index::new(17),
            command: Command::SendMessage {
                sender: "amy".into(),
                receiver: "bob".into(),
                content: "hi".into(),
                timestamp: 1_700_000_000,
            },
        };

        let proto = ProtoLogEntry::from(&entry);
        assert_eq!(proto.term, 4);
        assert_eq!(proto.index, 17);
        assert_eq!(LogEntry::try_from(proto).unwrap(), entry);
    }

    #[test]
    fn entry_without_command_is_rejected() {
        let proto = ProtoLogEntry {
            term: 1,
            index: 2,
            command: None,
        };

        assert!(matches!(LogEntry::try_from(proto), Err(MissingCommand(2))));
    }

    #[test]
    fn empty_list_pattern_means_all_accounts() {
        let entry = LogEntry {
            term: Term::new(1),
            index: Index::new(0),
            command: Command::ListAccount { pattern: None },
        };

        let back = LogEntry::try_from(ProtoLogEntry::from(&entry)).unwrap();
        assert_eq!(back.command, Command::ListAccount { pattern: None });
    }

    #[test]
    fn conflict_detection_compares_term_and_command() {
        let base = LogEntry {
            term: Term::new(1),
            index: Index::new(0),
            command: Command::FetchHomepage { username: "amy".into() },
        };
        let mut other_term = base.clone();
        other_term.term = Term::new(2);
        let mut other_command = base.clone();
        other_command.command = Command::FetchHomepage { username: "bob".into() };

        assert!(!base.conflicts_with(&base.clone()));
        assert!(base.conflicts_with(&other_term));
        assert!(base.conflicts_with(&other_command));
    }
}
