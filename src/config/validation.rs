//! Configuration validation logic.

use crate::config::loader::Config;
use crate::error::{Error, Result};
use regex::Regex;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_email(&config.account.email)?;
    validate_password(&config.account.password)?;
    validate_profiles(&config.targets.profiles)?;
    validate_limit("api_limit", config.options.api_limit)?;
    validate_limit("download_limit", config.options.download_limit)?;
    validate_template("path_template", &config.options.path_template)?;
    validate_template("name_template", &config.options.name_template)?;
    validate_network(config)?;

    Ok(())
}

/// Validate the login email.
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(Error::MissingConfig("email".to_string()));
    }

    let email_pattern = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$")
        .map_err(|e| Error::Config(e.to_string()))?;
    if !email_pattern.is_match(email) {
        return Err(Error::ConfigValidation {
            field: "email".to_string(),
            message: format!("'{}' is not a valid email address", email),
        });
    }

    Ok(())
}

/// Validate the login password.
pub fn validate_password(password: &str) -> Result<()> {
    if password.is_empty() {
        return Err(Error::MissingConfig("password".to_string()));
    }

    Ok(())
}

/// Validate profile handles.
pub fn validate_profiles<S: AsRef<str>, I: IntoIterator<Item = S>>(profiles: I) -> Result<()> {
    let profiles: Vec<_> = profiles.into_iter().collect();

    if profiles.is_empty() {
        return Err(Error::MissingConfig(
            "profiles (at least one profile handle required)".to_string(),
        ));
    }

    let nick_pattern =
        Regex::new(r"^[\w.-]{1,64}$").map_err(|e| Error::Config(e.to_string()))?;

    for nick in profiles {
        let nick = nick.as_ref();
        if !nick_pattern.is_match(nick) || nick == "." || nick == ".." {
            return Err(Error::ConfigValidation {
                field: "profiles".to_string(),
                message: format!(
                    "Profile '{}' is not a valid handle. Only letters, digits, '.', '-' and '_' allowed.",
                    nick
                ),
            });
        }
    }

    Ok(())
}

fn validate_limit(field: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(Error::ConfigValidation {
            field: field.to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    Ok(())
}

fn validate_template(field: &str, template: &str) -> Result<()> {
    if template.trim().is_empty() {
        return Err(Error::MissingConfig(field.to_string()));
    }
    Ok(())
}

fn validate_network(config: &Config) -> Result<()> {
    if config.network.mirrors.is_empty() {
        return Err(Error::MissingConfig("network.mirrors".to_string()));
    }
    validate_limit(
        "network.requests_per_mirror",
        config.network.requests_per_mirror,
    )?;
    config.network.mirror_urls()?;
    config.network.home_url()?;
    Ok(())
}

/// Deduplicate profile handles case-insensitively and sort them the same way.
///
/// The first spelling of a handle wins.
pub fn normalize_profiles<S: AsRef<str>, I: IntoIterator<Item = S>>(profiles: I) -> Vec<String> {
    let mut seen = std::collections::HashSet::new();
    let mut unique: Vec<String> = profiles
        .into_iter()
        .map(|p| p.as_ref().trim().trim_start_matches('@').to_string())
        .filter(|p| !p.is_empty())
        .filter(|p| seen.insert(p.to_lowercase()))
        .collect();
    unique.sort_by_key(|p| p.to_lowercase());
    unique
}
