//! Configuration structures and loading logic.

use crate::config::modes::DownloadMode;
use crate::error::{Error, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use url::Url;

/// Config file looked up in the working directory when none is given.
pub const LOCAL_CONFIG_FILE: &str = "kurek.toml";

/// Main configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub account: AccountConfig,

    #[serde(default)]
    pub targets: TargetConfig,

    #[serde(default)]
    pub options: OptionsConfig,

    #[serde(default)]
    pub network: NetworkConfig,
}

/// Account credentials configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountConfig {
    /// Login email.
    #[serde(default)]
    pub email: String,

    /// Login password.
    #[serde(default)]
    pub password: String,
}

/// Profiles to download from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TargetConfig {
    #[serde(default)]
    pub profiles: Vec<String>,
}

/// Download options configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionsConfig {
    /// Download mode (both, photos-only, videos-only).
    #[serde(default)]
    pub mode: DownloadMode,

    /// Root directory substituted for `%d` in the path template.
    #[serde(default)]
    pub root_dir: Option<PathBuf>,

    /// Directory template: `%d` root, `%p` profile, `%t` media type.
    #[serde(default = "default_path_template")]
    pub path_template: String,

    /// File name template: `%t` title, `%h` id, `%e` extension, `%o` owner, `%d` description.
    #[serde(default = "default_name_template")]
    pub name_template: String,

    /// Maximum concurrent API calls.
    #[serde(default = "default_api_limit")]
    pub api_limit: usize,

    /// Maximum concurrent binary transfers.
    #[serde(default = "default_download_limit")]
    pub download_limit: usize,

    /// Whether to show the progress bar.
    #[serde(default = "default_true")]
    pub show_progress: bool,

    /// Whether to log files skipped because they already exist.
    #[serde(default = "default_true")]
    pub show_skipped: bool,
}

impl Default for OptionsConfig {
    fn default() -> Self {
        Self {
            mode: DownloadMode::default(),
            root_dir: None,
            path_template: default_path_template(),
            name_template: default_name_template(),
            api_limit: default_api_limit(),
            download_limit: default_download_limit(),
            show_progress: true,
            show_skipped: true,
        }
    }
}

/// Site and transport configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    #[serde(default = "default_scheme")]
    pub scheme: String,

    #[serde(default = "default_domain")]
    pub domain: String,

    /// Path of the AJAX endpoint on every mirror.
    #[serde(default = "default_api_root")]
    pub api_root: String,

    /// Mirror subdomains serving the AJAX API.
    #[serde(default = "default_mirrors")]
    pub mirrors: Vec<String>,

    /// Requests sent to one mirror before moving to the next.
    #[serde(default = "default_requests_per_mirror")]
    pub requests_per_mirror: usize,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    /// `id` of the home page element carrying the login token.
    #[serde(default = "default_login_token_id")]
    pub login_token_id: String,

    /// Connect and read timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Proxy URL; environment proxies are ignored when unset.
    #[serde(default)]
    pub proxy: Option<String>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            scheme: default_scheme(),
            domain: default_domain(),
            api_root: default_api_root(),
            mirrors: default_mirrors(),
            requests_per_mirror: default_requests_per_mirror(),
            user_agent: default_user_agent(),
            login_token_id: default_login_token_id(),
            timeout_secs: default_timeout_secs(),
            proxy: None,
        }
    }
}

impl NetworkConfig {
    /// AJAX endpoint of every mirror, in rotation order.
    ///
    /// A mirror given as an absolute URL is used as-is; anything else is a
    /// subdomain of `domain`.
    pub fn mirror_urls(&self) -> Result<Vec<Url>> {
        self.mirrors
            .iter()
            .map(|mirror| {
                if let Ok(url) = Url::parse(mirror) {
                    return Ok(url);
                }
                let url = format!(
                    "{}://{}.{}{}",
                    self.scheme, mirror, self.domain, self.api_root
                );
                Ok(Url::parse(&url)?)
            })
            .collect()
    }

    /// Home page holding the login token.
    pub fn home_url(&self) -> Result<Url> {
        Ok(Url::parse(&format!("{}://{}/", self.scheme, self.domain))?)
    }
}

fn default_path_template() -> String {
    "%d/%p/%t".to_string()
}

fn default_name_template() -> String {
    "%t_%h.%e".to_string()
}

fn default_api_limit() -> usize {
    8
}

fn default_download_limit() -> usize {
    4
}

fn default_scheme() -> String {
    "https".to_string()
}

fn default_domain() -> String {
    "zbiornik.com".to_string()
}

fn default_api_root() -> String {
    "/ajax/".to_string()
}

fn default_mirrors() -> Vec<String> {
    ["dzesika", "brajanek", "vaneska", "denisek"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_requests_per_mirror() -> usize {
    5
}

fn default_user_agent() -> String {
    "Mozilla/5.0".to_string()
}

fn default_login_token_id() -> String {
    "zbiornik-ltoken".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                Error::Config(format!("Configuration file not found: {}", path.display()))
            } else {
                Error::filesystem(path, e)
            }
        })?;

        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Find the config file to use: `./kurek.toml`, then the platform config directory.
    pub fn locate() -> Option<PathBuf> {
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            return Some(local);
        }

        ProjectDirs::from("", "", "kurek")
            .map(|dirs| dirs.config_dir().join("config.toml"))
            .filter(|path| path.exists())
    }

    /// Get the effective root download directory.
    pub fn root_dir(&self) -> PathBuf {
        self.options
            .root_dir
            .clone()
            .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.options.mode, DownloadMode::Both);
        assert_eq!(config.options.path_template, "%d/%p/%t");
        assert_eq!(config.network.mirrors.len(), 4);
        assert_eq!(config.network.requests_per_mirror, 5);
    }

    #[test]
    fn test_parse_full_file() {
        let config: Config = toml::from_str(
            r#"
            [account]
            email = "me@example.com"
            password = "secret"

            [targets]
            profiles = ["alice", "Bob"]

            [options]
            mode = "videos-only"
            root_dir = "/data"
            api_limit = 2

            [network]
            mirrors = ["one"]
            "#,
        )
        .unwrap();

        assert_eq!(config.account.email, "me@example.com");
        assert_eq!(config.targets.profiles, vec!["alice", "Bob"]);
        assert_eq!(config.options.mode, DownloadMode::VideosOnly);
        assert_eq!(config.options.api_limit, 2);
        assert_eq!(config.options.download_limit, 4);
        assert_eq!(config.root_dir(), PathBuf::from("/data"));
        assert_eq!(config.network.mirrors, vec!["one"]);
    }

    #[test]
    fn test_mirror_urls() {
        let network = NetworkConfig::default();
        let urls = network.mirror_urls().unwrap();
        assert_eq!(urls[0].as_str(), "https://dzesika.zbiornik.com/ajax/");
        assert_eq!(urls[3].as_str(), "https://denisek.zbiornik.com/ajax/");
        assert_eq!(network.home_url().unwrap().as_str(), "https://zbiornik.com/");
    }

    #[test]
    fn test_mirror_urls_absolute() {
        let network = NetworkConfig {
            mirrors: vec!["http://127.0.0.1:8080/ajax/".to_string(), "m2".to_string()],
            ..Default::default()
        };
        let urls = network.mirror_urls().unwrap();
        assert_eq!(urls[0].as_str(), "http://127.0.0.1:8080/ajax/");
        assert_eq!(urls[1].as_str(), "https://m2.zbiornik.com/ajax/");
    }

    #[test]
    fn test_load_missing_file() {
        let err = Config::load(Path::new("/nonexistent/kurek.toml")).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
