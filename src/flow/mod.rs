//! End-to-end flows: a single address lookup and a batch file lookup.

pub mod batch;
pub mod single;

pub use batch::{run_batch, BatchSummary, DEFAULT_INPUT_FILE, DEFAULT_OUTPUT_FILE};
pub use single::{run_single, DEFAULT_ADDRESS};
