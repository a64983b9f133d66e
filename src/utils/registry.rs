#![forbid(unsafe_code)]

use parking_lot::Mutex;

// ***************************************************************************
//                               WorkerRegistry
// ***************************************************************************
/** The ordered record of every worker id received since process start.
 *
 * All appends and reads go through a single mutex so concurrent handlers
 * never lose an update and never observe a partially written sequence.
 * The sequence is append-only and is never exposed directly; callers get
 * a copy through snapshot().
 */
#[derive(Debug, Default)]
pub struct WorkerRegistry {
    seen_ids: Mutex<Vec<i64>>,
}

impl WorkerRegistry {
    pub fn new() -> Self {
        WorkerRegistry::default()
    }

    // ---------------------------------------------------------------------------
    // record:
    // ---------------------------------------------------------------------------
    /** Append a worker id and return the registry length after the append. */
    pub fn record(&self, worker_id: i64) -> usize {
        let mut ids = self.seen_ids.lock();
        ids.push(worker_id);
        ids.len()
    }

    // ---------------------------------------------------------------------------
    // snapshot:
    // ---------------------------------------------------------------------------
    /** Return a consistent copy of all recorded ids in insertion order. */
    pub fn snapshot(&self) -> Vec<i64> {
        self.seen_ids.lock().clone()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.seen_ids.lock().len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.seen_ids.lock().is_empty()
    }
}
