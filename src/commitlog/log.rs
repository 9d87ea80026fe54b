use std::convert::TryFrom;
use std::fmt;

/// Index is the position of an entry in the log. The first entry lives at index 0.
#[derive(Copy, Clone, PartialOrd, PartialEq, Ord, Eq, Hash)]
pub(crate) struct Index(u64);

impl Index {
    pub(crate) fn new(index: u64) -> Self {
        Index(index)
    }

    pub(crate) fn start_index() -> Self {
        Index(0)
    }

    pub(crate) fn as_u64(&self) -> u64 {
        self.0
    }

    pub(crate) fn plus(&self, delta: u64) -> Index {
        Index(self.0 + delta)
    }

    pub(crate) fn checked_minus(&self, delta: u64) -> Option<Index> {
        self.0.checked_sub(delta).map(Index)
    }

    /// Wire form of an optional index. Absent is encoded as -1.
    pub(crate) fn to_wire(index: Option<Index>) -> i64 {
        match index {
            None => -1,
            Some(i) => i.0 as i64,
        }
    }

    /// Inverse of `to_wire()`. Any negative value decodes as absent.
    pub(crate) fn from_wire(value: i64) -> Option<Index> {
        u64::try_from(value).ok().map(Index)
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Log is an append-only sequence of entries that supports truncating a suffix, which is all a
/// raft follower needs to reconcile its log with the leader's.
pub(crate) trait Log<E: Clone> {
    /// Appends `entry` at `next_index()` and returns the index that was used.
    fn append(&mut self, entry: E) -> Index;

    fn read(&self, index: Index) -> Option<E>;

    /// Read every entry starting at `index`, in order. Empty if `index` is past the end.
    fn read_from(&self, index: Index) -> Vec<E>;

    /// Removes the entry at `index` and everything after it.
    fn truncate(&mut self, index: Index);

    fn next_index(&self) -> Index;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_encoding() {
        assert_eq!(Index::to_wire(None), -1);
        assert_eq!(Index::to_wire(Some(Index::new(0))), 0);
        assert_eq!(Index::to_wire(Some(Index::new(41))), 41);

        assert_eq!(Index::from_wire(-1), None);
        assert_eq!(Index::from_wire(-7), None);
        assert_eq!(Index::from_wire(0), Some(Index::start_index()));
        assert_eq!(Index::from_wire(9), Some(Index::new(9)));
    }

    #[test]
    fn arithmetic() {
        let i = Index::new(3);
        assert_eq!(i.plus(2), Index::new(5));
        assert_eq!(i.checked_minus(3), Some(Index::start_index()));
        assert_eq!(i.checked_minus(4), None);
    }
}
