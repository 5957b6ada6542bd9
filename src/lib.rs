//! kurek - download photos and videos from zbiornik.com profiles.
//!
//! # Features
//!
//! - Login with email, password and the home page login token
//! - Round-robin over the site's API mirrors
//! - Separate concurrency limits for API calls and file transfers
//! - Photo and video listings per profile, filtered by access
//! - Configurable path and file name templates
//! - Files that already exist are never downloaded again
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use indicatif::ProgressBar;
//! use kurek::{api::HomePageToken, download::run, Config};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load(Path::new("kurek.toml"))?;
//!     let token_source = HomePageToken::new(
//!         config.network.home_url()?,
//!         config.network.login_token_id.clone(),
//!     );
//!
//!     let report = run(&config, &token_source, &ProgressBar::hidden()).await?;
//!     println!("{} files downloaded", report.total_downloaded());
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod fs;
pub mod media;
pub mod output;

#[cfg(test)]
mod test_support;

// Re-exports for convenience
pub use api::{Client, Session};
pub use config::{Config, DownloadMode};
pub use download::{download_profiles, run, ProfileReport, RunReport};
pub use error::{Error, Result};
pub use media::{MediaItem, MediaKind};
