use crate::commitlog;
use crate::commitlog::Index;
use crate::replica::local_state::Term;
use crate::replica::write_ahead_log::apply_stream::ApplyStreamPublisher;
use crate::replica::write_ahead_log::{Command, LogEntry};
use std::cmp;

/// WriteAheadLog is the raft-specific log facade.
///
/// A log entry goes through these states, each tracked per replica:
/// 1. Appended - present in the local log
/// 2. Applied - handed to the state machine
/// 3. Committed - known to be on a majority of replicas
///
/// Entries are applied as soon as they're appended, not when they're committed. Entries created
/// on this node are applied by the caller before they reach the log. Entries received from the
/// leader are published on the apply stream.
pub(in super::super) struct WriteAheadLog<L>
where
    L: commitlog::Log<LogEntry>,
{
    // Application's info/debug log.
    logger: slog::Logger,

    // This is the log that we're replicating.
    log: L,
    // Metadata about the highest log entry that we've locally written.
    latest_entry_metadata: Option<(Term, Index)>,

    apply_stream: ApplyStreamPublisher,
    // Index of highest log entry known to be committed. None if nothing is committed.
    commit_index: Option<Index>,
    // Index of highest log entry applied to state machine. None if nothing is applied.
    last_applied_index: Option<Index>,
}

impl<L> WriteAheadLog<L>
where
    L: commitlog::Log<LogEntry>,
{
    pub(super) fn new(logger: slog::Logger, log: L, apply_stream: ApplyStreamPublisher) -> Self {
        let latest_entry_metadata = log
            .next_index()
            .checked_minus(1)
            .and_then(|index| log.read(index))
            .map(|entry| (entry.term, entry.index));

        WriteAheadLog {
            logger,
            log,
            latest_entry_metadata,
            apply_stream,
            commit_index: None,
            // Anything already in the log was applied by whoever wrote it.
            last_applied_index: latest_entry_metadata.map(|(_, index)| index),
        }
    }

    pub(crate) fn latest_entry(&self) -> Option<(Term, Index)> {
        self.latest_entry_metadata
    }

    pub(crate) fn read(&self, index: Index) -> Option<LogEntry> {
        self.log.read(index)
    }

    pub(crate) fn entries_from(&self, index: Index) -> Vec<LogEntry> {
        self.log.read_from(index)
    }

    /// Append an entry that the caller has already applied to the state machine.
    pub(crate) fn append_applied(&mut self, term: Term, command: Command) -> Index {
        self.apply_all_unapplied_entries();

        let index = self.append(term, command);
        self.last_applied_index.replace(index);

        index
    }

    /// Append an entry received from the leader. It's applied on the next
    /// `apply_all_unapplied_entries()`.
    pub(crate) fn append_replicated(&mut self, term: Term, command: Command) -> Index {
        self.append(term, command)
    }

    fn append(&mut self, term: Term, command: Command) -> Index {
        let index = self.log.next_index();
        let appended_index = self.log.append(LogEntry { term, index, command });
        debug_assert_eq!(index, appended_index);
        self.latest_entry_metadata = Some((term, appended_index));

        appended_index
    }

    /// Remove anything starting at `index` and later.
    pub(crate) fn truncate(&mut self, index: Index) {
        let new_latest = index.checked_minus(1);
        self.latest_entry_metadata = new_latest
            .and_then(|i| self.log.read(i))
            .map(|entry| (entry.term, entry.index));
        self.log.truncate(index);

        if self.last_applied_index >= Some(index) {
            // Effects of the removed entries stay in the state machine. Only the bookkeeping
            // moves back, so the replacement entries get applied.
            self.last_applied_index = new_latest;
        }
        if self.commit_index >= Some(index) {
            slog::warn!(
                self.logger,
                "Truncating committed entries from {:?}. CommitIndex={:?}",
                index,
                self.commit_index
            );
            self.commit_index = new_latest;
        }
    }

    pub(crate) fn commit_index(&self) -> Option<Index> {
        self.commit_index
    }

    /// Move the commit index forward to `new_commit_index`, capped at our latest entry. Never
    /// moves it backwards.
    pub(crate) fn ratchet_fwd_commit_index(&mut self, new_commit_index: Index) {
        let latest_index = match self.latest_entry_metadata {
            Some((_, index)) => index,
            None => return,
        };
        let new_commit_index = cmp::min(new_commit_index, latest_index);

        if self.commit_index < Some(new_commit_index) {
            slog::debug!(self.logger, "CommitIndex {:?} -> {:?}", self.commit_index, new_commit_index);
            self.commit_index.replace(new_commit_index);
        }
    }

    /// apply_all_unapplied_entries publishes every appended but unapplied entry in order.
    pub(crate) fn apply_all_unapplied_entries(&mut self) {
        let next_to_apply = match self.last_applied_index {
            Some(index) => index.plus(1),
            None => Index::start_index(),
        };

        for entry in self.log.read_from(next_to_apply) {
            self.apply_stream.publish(&self.logger, entry.index, entry.command);
            self.last_applied_index.replace(entry.index);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commitlog::InMemoryLog;
    use crate::replica::write_ahead_log::{apply_stream, ApplyStream};

    fn new_wal() -> (WriteAheadLog<InMemoryLog<LogEntry>>, ApplyStream) {
        let logger = slog::Logger::root(slog::Discard, slog::o!());
        let (publisher, stream) = apply_stream::new();

        (WriteAheadLog::new(logger, InMemoryLog::new(), publisher), stream)
    }

    fn ending(username: &str) -> Command {
        Command::Ending {
            username: username.to_string(),
        }
    }

    async fn assert_applied(stream: &mut ApplyStream, index: u64, command: Command) {
        let entry = stream.recv().await.unwrap();
        assert_eq!(entry.index, Index::new(index));
        assert_eq!(entry.command, command);
    }

    #[tokio::test]
    async fn local_entries_are_not_published() {
        let (mut wal, mut stream) = new_wal();

        let index = wal.append_applied(Term::new(1), ending("amy"));
        wal.apply_all_unapplied_entries();

        assert_eq!(index, Index::new(0));
        assert_eq!(wal.latest_entry(), Some((Term::new(1), Index::new(0))));
        drop(wal);
        assert!(stream.recv().await.is_none());
    }

    #[tokio::test]
    async fn replicated_entries_are_published_in_order() {
        let (mut wal, mut stream) = new_wal();

        wal.append_replicated(Term::new(1), ending("amy"));
        wal.append_replicated(Term::new(1), ending("bob"));
        wal.apply_all_unapplied_entries();
        wal.apply_all_unapplied_entries();

        assert_applied(&mut stream, 0, ending("amy")).await;
        assert_applied(&mut stream, 1, ending("bob")).await;
        drop(wal);
        assert!(stream.recv().await.is_none());
    }

    #[tokio::test]
    async fn truncate_rewinds_bookkeeping() {
        let (mut wal, mut stream) = new_wal();
        wal.append_applied(Term::new(1), ending("a"));
        wal.append_applied(Term::new(1), ending("b"));
        wal.append_applied(Term::new(1), ending("c"));
        wal.ratchet_fwd_commit_index(Index::new(2));

        wal.truncate(Index::new(1));
        assert_eq!(wal.latest_entry(), Some((Term::new(1), Index::new(0))));
        assert_eq!(wal.commit_index(), Some(Index::new(0)));

        wal.append_replicated(Term::new(2), ending("x"));
        wal.apply_all_unapplied_entries();
        assert_applied(&mut stream, 1, ending("x")).await;
        assert_eq!(wal.read(Index::new(1)).unwrap().term, Term::new(2));
        assert_eq!(wal.read(Index::new(2)), None);
    }

    #[test]
    fn commit_index_only_moves_forward_and_stays_within_log() {
        let (mut wal, _stream) = new_wal();

        wal.ratchet_fwd_commit_index(Index::new(0));
        assert_eq!(wal.commit_index(), None);

        wal.append_applied(Term::new(1), ending("a"));
        wal.append_applied(Term::new(1), ending("b"));
        wal.ratchet_fwd_commit_index(Index::new(10));
        assert_eq!(wal.commit_index(), Some(Index::new(1)));

        wal.ratchet_fwd_commit_index(Index::new(0));
        assert_eq!(wal.commit_index(), Some(Index::new(1)));
    }
}
