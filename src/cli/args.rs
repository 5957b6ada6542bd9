//! Command-line argument definitions using clap.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

use crate::config::{Config, DownloadMode};

/// zbiornik.com profile downloader CLI.
#[derive(Parser, Debug)]
#[command(
    name = "kurek",
    version,
    about = "Download photos and videos from zbiornik.com profiles",
    long_about = "A CLI tool to download every accessible photo and video of the given \
                  zbiornik.com profiles.\n\n\
                  Files that already exist are skipped, so a run can simply be repeated."
)]
pub struct Args {
    /// Profile handle(s) to download from.
    #[arg(value_name = "PROFILE")]
    pub profiles: Vec<String>,

    /// Account email.
    #[arg(short = 'u', long, env = "KUREK_EMAIL")]
    pub email: Option<String>,

    /// Account password.
    #[arg(short, long, env = "KUREK_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Which media to download.
    #[arg(long, value_enum)]
    pub mode: Option<DownloadModeArg>,

    /// Root directory for downloads (`%d` in the path template).
    #[arg(short = 'd', long = "directory")]
    pub root_dir: Option<PathBuf>,

    /// Directory template: %d root, %p profile, %t media type.
    #[arg(long)]
    pub path_template: Option<String>,

    /// File name template: %t title, %h id, %e extension, %o owner, %d description.
    #[arg(long)]
    pub name_template: Option<String>,

    /// Maximum concurrent API calls.
    #[arg(long)]
    pub api_limit: Option<usize>,

    /// Maximum concurrent file downloads.
    #[arg(long)]
    pub download_limit: Option<usize>,

    /// Path to configuration file.
    /// Defaults to ./kurek.toml, then the user config directory.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Hide download progress information.
    #[arg(long, short)]
    pub quiet: bool,

    /// Show information about skipped downloads.
    #[arg(long)]
    pub show_skipped: bool,

    /// Enable debug logging.
    #[arg(long)]
    pub debug: bool,
}

/// CLI download mode argument.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DownloadModeArg {
    /// Download photos and videos.
    Both,
    /// Download only photos.
    Photos,
    /// Download only videos.
    Videos,
}

impl From<DownloadModeArg> for DownloadMode {
    fn from(arg: DownloadModeArg) -> Self {
        match arg {
            DownloadModeArg::Both => DownloadMode::Both,
            DownloadModeArg::Photos => DownloadMode::PhotosOnly,
            DownloadModeArg::Videos => DownloadMode::VideosOnly,
        }
    }
}

impl Args {
    /// Merge CLI arguments into an existing config, overriding where specified.
    pub fn merge_into_config(self, config: &mut Config) {
        if !self.profiles.is_empty() {
            config.targets.profiles = self.profiles;
        }

        // Override account settings if provided
        if let Some(email) = self.email {
            config.account.email = email;
        }

        if let Some(password) = self.password {
            config.account.password = password;
        }

        // Override options if provided
        if let Some(mode) = self.mode {
            config.options.mode = mode.into();
        }

        if let Some(dir) = self.root_dir {
            config.options.root_dir = Some(dir);
        }

        if let Some(template) = self.path_template {
            config.options.path_template = template;
        }

        if let Some(template) = self.name_template {
            config.options.name_template = template;
        }

        if let Some(limit) = self.api_limit {
            config.options.api_limit = limit;
        }

        if let Some(limit) = self.download_limit {
            config.options.download_limit = limit;
        }

        // Boolean flags (only override if set to non-default)
        if self.quiet {
            config.options.show_progress = false;
            config.options.show_skipped = false;
        }

        if self.show_skipped {
            config.options.show_skipped = true;
        }
    }
}
