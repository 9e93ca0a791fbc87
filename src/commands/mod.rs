//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod batch;
pub mod models;
pub mod parse;
pub mod utils;
pub mod window;

// Re-export main command functions
pub use batch::execute_batch;
pub use models::{BatchArgs, BatchSummary, ParseArgs, ParseOutcome, WindowArgs, WindowOutcome};
pub use parse::{execute_parse, validate_parse_args};
pub use utils::{display_version, sanitize_test_name};
pub use window::finish_window;
