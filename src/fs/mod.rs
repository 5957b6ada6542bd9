//! Filesystem module.
//!
//! Provides:
//! - Path and file name templates
//! - Target path of each item

pub mod naming;
pub mod paths;

pub use naming::{render_filename, render_path, render_template, sanitize_component};
pub use paths::Layout;
