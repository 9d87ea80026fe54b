use crate::commitlog;
use crate::replica::write_ahead_log::{apply_stream, ApplyStream, LogEntry, WriteAheadLog};

pub(in super::super) fn wired<L>(logger: slog::Logger, log: L) -> (WriteAheadLog<L>, ApplyStream)
where
    L: commitlog::Log<LogEntry>,
{
    let (publisher, stream) = apply_stream::new();

    let wal = WriteAheadLog::new(logger, log, publisher);

    (wal, stream)
}
