//! Console output utilities.

use console::style;

/// Print an info message.
pub fn print_info(message: &str) {
    println!("{} {}", style("INFO").cyan().bold(), message);
}

/// Print a warning message.
pub fn print_warning(message: &str) {
    println!("{} {}", style("WARN").yellow().bold(), message);
}

/// Print an error message.
pub fn print_error(message: &str) {
    eprintln!("{} {}", style("ERROR").red().bold(), message);
}

/// Print the application banner.
pub fn print_banner() {
    let banner = r#"
╔═══════════════════════════════════════════════════════╗
║     kurek                                             ║
║     zbiornik.com photo and video downloader           ║
╚═══════════════════════════════════════════════════════╝
"#;
    println!("{}", style(banner).cyan());
}

/// Print configuration summary.
pub fn print_config_summary(profiles: &[String], download_mode: &str, download_dir: &str) {
    println!();
    println!("{}", style("Configuration:").bold());
    println!("  Profiles:  {}", profiles.join(", "));
    println!("  Mode:      {}", download_mode);
    println!("  Directory: {}", download_dir);
    println!();
}
