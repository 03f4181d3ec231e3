pub mod cancellation;
pub mod oracle;

pub use cancellation::{Cancellable, CancellationToken};
pub use oracle::IndependenceOracle;
