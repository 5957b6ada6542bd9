//! Progress bar utilities.

use indicatif::{ProgressBar, ProgressStyle};

/// Create the run-wide item counter.
///
/// Starts empty; profiles grow its length as their listings arrive.
pub fn create_item_bar(message: &str, visible: bool) -> ProgressBar {
    if !visible {
        return ProgressBar::hidden();
    }

    let bar = ProgressBar::new(0);
    let style = ProgressStyle::default_bar()
        .template(&format!(
            "{{spinner:.green}} {} [{{bar:40.cyan/blue}}] {{pos}}/{{len}}",
            message
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    bar.set_style(style);
    bar
}
