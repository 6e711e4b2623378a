use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out one ticket per load; issuing a new ticket supersedes every
/// older one.
#[derive(Debug, Clone, Default)]
pub struct LoadGeneration {
    current: Arc<AtomicU64>,
}

impl LoadGeneration {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_ticket(&self) -> LoadTicket {
        let generation = self.current.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            generation,
            current: Arc::clone(&self.current),
        }
    }
}

#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LoadTicket {
    /// A ticket that is never superseded, for one-shot loads.
    pub fn detached() -> Self {
        LoadGeneration::new().next_ticket()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_canceled(&self) -> bool {
        self.current.load(Ordering::SeqCst) != self.generation
    }
}
