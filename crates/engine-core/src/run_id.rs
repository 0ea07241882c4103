use std::sync::atomic::{AtomicU64, Ordering};

/// Process-wide monotonic run-id source. The sequence is the single
/// designated owner of run-id state: ids are assigned synchronously before
/// execution starts, so two sequential launches of the same job never
/// collide. Seeding is explicit (e.g. from a persisted last-run-id at
/// startup); the increment is thread-safe should concurrent launches ever
/// be supported.
#[derive(Debug)]
pub struct RunIdSequence {
    last_id: AtomicU64,
}

impl RunIdSequence {
    /// Starts issuing ids strictly greater than `last_id`.
    pub fn starting_at(last_id: u64) -> Self {
        RunIdSequence {
            last_id: AtomicU64::new(last_id),
        }
    }

    pub fn next(&self) -> u64 {
        self.last_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

impl Default for RunIdSequence {
    fn default() -> Self {
        Self::starting_at(0)
    }
}
