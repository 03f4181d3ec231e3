use std::sync::atomic::{AtomicU64, Ordering};

use pcalg_core::{PcError, PcResult};

/// Counts oracle calls across worker threads and enforces `max_tests`.
#[derive(Debug)]
pub(crate) struct TestBudget {
    used: AtomicU64,
    limit: Option<u64>,
}

impl TestBudget {
    pub(crate) fn new(limit: Option<u64>) -> Self {
        Self {
            used: AtomicU64::new(0),
            limit,
        }
    }

    /// Reserve one test. Fails once the limit has been reached.
    pub(crate) fn charge(&self) -> PcResult<()> {
        let previous = self.used.fetch_add(1, Ordering::Relaxed);
        match self.limit {
            Some(limit) if previous >= limit => Err(PcError::BudgetExhausted { limit }),
            _ => Ok(()),
        }
    }

    pub(crate) fn used(&self) -> u64 {
        let used = self.used.load(Ordering::Relaxed);
        self.limit.map_or(used, |limit| used.min(limit))
    }
}
