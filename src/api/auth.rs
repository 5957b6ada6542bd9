//! Login flow.

use std::sync::Arc;

use async_trait::async_trait;
use regex::Regex;
use url::Url;

use crate::api::balancer::Balancer;
use crate::api::client::Client;
use crate::api::command::Command;
use crate::api::session::Session;
use crate::api::types::LoginResponse;
use crate::error::{Error, Result};

/// Account credentials.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

/// Source of the one-time login token (`ltoken`).
#[async_trait]
pub trait LoginTokenSource: Send + Sync {
    async fn login_token(&self, http: &reqwest::Client) -> Result<String>;
}

/// Scrapes the login token from the site's home page.
#[derive(Debug, Clone)]
pub struct HomePageToken {
    url: Url,
    element_id: String,
}

impl HomePageToken {
    pub fn new(url: Url, element_id: impl Into<String>) -> Self {
        Self {
            url,
            element_id: element_id.into(),
        }
    }
}

#[async_trait]
impl LoginTokenSource for HomePageToken {
    async fn login_token(&self, http: &reqwest::Client) -> Result<String> {
        tracing::debug!("Fetching login token from {}", self.url);

        let response = http.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Http {
                status,
                url: self.url.to_string(),
            });
        }
        let html = response.text().await?;

        extract_login_token(&html, &self.element_id)
    }
}

/// `value` attribute of the element with the given `id`.
pub fn extract_login_token(html: &str, element_id: &str) -> Result<String> {
    let tag_pattern = Regex::new(&format!(
        r#"<[^>]*\bid\s*=\s*["']{}["'][^>]*>"#,
        regex::escape(element_id)
    ))
    .map_err(|e| Error::Authentication(e.to_string()))?;
    let value_pattern = Regex::new(r#"\bvalue\s*=\s*(?:"([^"]*)"|'([^']*)')"#)
        .map_err(|e| Error::Authentication(e.to_string()))?;

    let tag = tag_pattern.find(html).ok_or_else(|| {
        Error::Authentication(format!("login token element '{}' not found", element_id))
    })?;

    value_pattern
        .captures(tag.as_str())
        .and_then(|c| c.get(1).or_else(|| c.get(2)))
        .map(|m| m.as_str().to_string())
        .filter(|token| !token.is_empty())
        .ok_or_else(|| {
            Error::Authentication(format!("login token element '{}' has no value", element_id))
        })
}

/// Log in and return the session used by every later call.
pub async fn login(
    client: Arc<Client>,
    balancer: Arc<Balancer>,
    credentials: &Credentials,
    token_source: &dyn LoginTokenSource,
) -> Result<Session> {
    let ltoken = token_source.login_token(client.http()).await?;

    let url = Command::Login {
        email: &credentials.email,
        password: &credentials.password,
        ltoken: &ltoken,
    }
    .to_url(balancer.next());
    let response: LoginResponse = client.get(&url).await?;

    let token = response
        .token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| Error::Authentication("login response has no token".to_string()))?;
    let nick = response
        .logged_user
        .and_then(|user| user.nick)
        .filter(|n| !n.is_empty())
        .ok_or_else(|| {
            Error::Authentication("login response has no loggedUser.nick".to_string())
        })?;

    tracing::info!("User {} logged in", nick);

    Ok(Session::new(client, balancer, token, nick))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NetworkConfig;
    use crate::test_support::{FakeResponse, FakeServer};

    struct FixedToken(&'static str);

    #[async_trait]
    impl LoginTokenSource for FixedToken {
        async fn login_token(&self, _http: &reqwest::Client) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    fn credentials() -> Credentials {
        Credentials {
            email: "me@example.com".to_string(),
            password: "secret".to_string(),
        }
    }

    fn parts(server: &FakeServer) -> (Arc<Client>, Arc<Balancer>) {
        let client = Client::new(&NetworkConfig::default(), 2, 2).unwrap();
        let balancer = Balancer::new(vec![server.url("/ajax/")], 5).unwrap();
        (Arc::new(client), Arc::new(balancer))
    }

    #[test]
    fn test_extract_login_token() {
        let html = r#"<form><input type="hidden" id="zbiornik-ltoken" value="abc123"></form>"#;
        assert_eq!(extract_login_token(html, "zbiornik-ltoken").unwrap(), "abc123");

        let reordered = r#"<input value='xyz' name="l" id='zbiornik-ltoken' />"#;
        assert_eq!(extract_login_token(reordered, "zbiornik-ltoken").unwrap(), "xyz");
    }

    #[test]
    fn test_extract_login_token_missing() {
        let html = r#"<input id="other" value="nope">"#;
        assert!(matches!(
            extract_login_token(html, "zbiornik-ltoken"),
            Err(Error::Authentication(_))
        ));

        let no_value = r#"<input id="zbiornik-ltoken">"#;
        assert!(extract_login_token(no_value, "zbiornik-ltoken").is_err());
    }

    #[tokio::test]
    async fn test_home_page_token() {
        let server = FakeServer::start(|_| {
            FakeResponse::ok(r#"<html><input id="zbiornik-ltoken" value="lt-1"></html>"#)
                .content_type("text/html")
        })
        .await;
        let source = HomePageToken::new(server.url("/"), "zbiornik-ltoken");
        let http = reqwest::Client::builder().no_proxy().build().unwrap();

        assert_eq!(source.login_token(&http).await.unwrap(), "lt-1");
    }

    #[tokio::test]
    async fn test_login_success() {
        let server = FakeServer::start(|_| {
            FakeResponse::ok(r#"{"token": "sess-1", "loggedUser": {"nick": "me"}}"#)
        })
        .await;
        let (client, balancer) = parts(&server);

        let session = login(client, balancer, &credentials(), &FixedToken("lt"))
            .await
            .unwrap();
        assert_eq!(session.token(), "sess-1");
        assert_eq!(session.nick(), "me");

        let request = &server.requests()[0];
        assert_eq!(request.path, "/ajax/");
        assert_eq!(request.param("command"), "login");
        assert_eq!(request.param("email"), "me@example.com");
        assert_eq!(request.param("password"), "secret");
        assert_eq!(request.param("ltoken"), "lt");
    }

    #[tokio::test]
    async fn test_login_missing_nick() {
        let server = FakeServer::start(|_| FakeResponse::ok(r#"{"token": "sess-1"}"#)).await;
        let (client, balancer) = parts(&server);

        let err = login(client, balancer, &credentials(), &FixedToken("lt"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }

    #[tokio::test]
    async fn test_login_missing_token() {
        let server =
            FakeServer::start(|_| FakeResponse::ok(r#"{"loggedUser": {"nick": "me"}}"#)).await;
        let (client, balancer) = parts(&server);

        let err = login(client, balancer, &credentials(), &FixedToken("lt"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Authentication(_)));
    }
}
