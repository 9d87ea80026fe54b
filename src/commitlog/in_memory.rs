use crate::commitlog::{Index, Log};

/// InMemoryLog keeps every entry in a Vec. Nothing survives a process restart, which matches the
/// rest of the node's raft state.
pub(crate) struct InMemoryLog<E> {
    entries: Vec<E>,
}

impl<E> InMemoryLog<E> {
    pub(crate) fn new() -> Self {
        InMemoryLog { entries: Vec::new() }
    }

    fn vec_index(index: Index) -> usize {
        index.as_u64() as usize
    }
}

impl<E: Clone> Log<E> for InMemoryLog<E> {
    fn append(&mut self, entry: E) -> Index {
        self.entries.push(entry);
        Index::new(self.entries.len() as u64 - 1)
    }

    fn read(&self, index: Index) -> Option<E> {
        self.entries.get(Self::vec_index(index)).cloned()
    }

    fn read_from(&self, index: Index) -> Vec<E> {
        match self.entries.get(Self::vec_index(index)..) {
            Some(tail) => tail.to_vec(),
            None => Vec::new(),
        }
    }

    fn truncate(&mut self, index: Index) {
        self.entries.truncate(Self::vec_index(index));
    }

    fn next_index(&self) -> Index {
        Index::new(self.entries.len() as u64)
    }
}
