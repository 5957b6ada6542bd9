//! Output module for console output and progress.
//!
//! Provides:
//! - Colored console output
//! - The run-wide progress bar
//! - Statistics reporting

pub mod console;
pub mod progress;
pub mod stats;

pub use console::{print_banner, print_config_summary, print_error, print_info, print_warning};
pub use progress::create_item_bar;
pub use stats::{print_profile_report, print_run_report};
