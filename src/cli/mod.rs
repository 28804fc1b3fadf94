//! CLI operation handlers.
//!
//! - [`list_runs`]: Retrieve and print the workflow runs of a repository
//! - [`progress`]: Terminal progress indicator for long retrievals
//!
//! Output formatting utilities are in [`output`].

pub mod list_runs;
pub mod output;
pub mod progress;
