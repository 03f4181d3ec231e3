//! Run cancellation shared between a caller and the skeleton search.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::errors::{PcError, PcResult};

/// Anything a long run can poll for a stop request.
pub trait Cancellable {
    fn is_cancelled(&self) -> bool;

    fn cancel(&self);

    /// `Err(PcError::Cancelled)` once a stop has been requested.
    fn check(&self) -> PcResult<()> {
        if self.is_cancelled() {
            Err(PcError::Cancelled)
        } else {
            Ok(())
        }
    }
}

/// Clones share one flag: the caller keeps a handle while the engine polls
/// another between levels and between edges. A cancelled run returns no graph.
#[derive(Debug, Clone, Default)]
pub struct CancellationToken {
    requested: Arc<AtomicBool>,
}

impl CancellationToken {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Cancellable for CancellationToken {
    fn is_cancelled(&self) -> bool {
        self.requested.load(Ordering::Acquire)
    }

    fn cancel(&self) {
        self.requested.store(true, Ordering::Release);
    }
}
