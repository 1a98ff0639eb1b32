//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod compare;
pub mod models;
pub mod pair;
pub mod retry;
pub mod utils;

// Re-export main command functions
pub use compare::execute_compare;
pub use models::{CompareArgs, PairArgs, RetryArgs};
pub use pair::execute_pair;
pub use retry::execute_retry;
pub use utils::display_version;
