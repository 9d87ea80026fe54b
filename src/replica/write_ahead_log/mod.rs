mod apply_stream;
mod command;
mod log;
mod log_entry;
mod wiring;

pub(crate) use apply_stream::ApplyStream;
pub(crate) use apply_stream::ReplicatedEntry;
pub(crate) use command::Command;
pub(crate) use log_entry::LogEntry;

pub(super) use log::WriteAheadLog;
pub(super) use wiring::wired;
