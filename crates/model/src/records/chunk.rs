use crate::records::record::Record;

/// An ordered, bounded buffer of records awaiting a single transactional
/// flush. Owned solely by the chunk executor during accumulation.
#[derive(Debug)]
pub struct Chunk {
    capacity: usize,
    items: Vec<Record>,
}

impl Chunk {
    pub fn new(capacity: usize) -> Self {
        Chunk {
            capacity,
            items: Vec::with_capacity(capacity),
        }
    }

    /// Appends a record. The executor flushes exactly at capacity, so
    /// pushing past it is a logic error.
    pub fn push(&mut self, record: Record) {
        debug_assert!(self.items.len() < self.capacity, "chunk over capacity");
        self.items.push(record);
    }

    pub fn is_full(&self) -> bool {
        self.items.len() >= self.capacity
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Drains the buffer for a flush, leaving the chunk empty and reusable.
    pub fn take(&mut self) -> Vec<Record> {
        std::mem::replace(&mut self.items, Vec::with_capacity(self.capacity))
    }
}
