//! HTTP client with separate API and download concurrency limits.

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::StreamExt;
use reqwest::{header, Response};
use serde::de::DeserializeOwned;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Semaphore;
use url::Url;

use crate::api::command::redact;
use crate::config::NetworkConfig;
use crate::error::{Error, Result};

/// Shared HTTP connection pool plus the two concurrency limiters.
///
/// Metadata calls and binary transfers never share a permit pool, so a batch
/// of long video downloads cannot starve listing or detail requests.
#[derive(Debug)]
pub struct Client {
    http: reqwest::Client,
    api_limiter: Semaphore,
    download_limiter: Semaphore,
}

impl Client {
    /// Build the client from network settings and the two limits.
    pub fn new(network: &NetworkConfig, api_limit: usize, download_limit: usize) -> Result<Self> {
        let timeout = Duration::from_secs(network.timeout_secs);
        let mut builder = reqwest::Client::builder()
            .user_agent(&network.user_agent)
            .cookie_store(true)
            .connect_timeout(timeout)
            .read_timeout(timeout);

        builder = match &network.proxy {
            Some(proxy) => builder.proxy(reqwest::Proxy::all(proxy.as_str())?),
            None => builder.no_proxy(),
        };

        let http = builder.build()?;

        Ok(Self::with_http(http, api_limit, download_limit))
    }

    /// Wrap an existing reqwest client.
    pub fn with_http(http: reqwest::Client, api_limit: usize, download_limit: usize) -> Self {
        Self {
            http,
            api_limiter: Semaphore::new(api_limit),
            download_limiter: Semaphore::new(download_limit),
        }
    }

    /// Underlying connection pool.
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// Issue an API GET and decode the body as JSON.
    ///
    /// The body is decoded whatever `Content-Type` the server declares.
    pub async fn get<T: DeserializeOwned>(&self, url: &Url) -> Result<T> {
        let _permit = self
            .api_limiter
            .acquire()
            .await
            .map_err(|_| Error::LimiterClosed)?;

        tracing::debug!("GET {}", redact(url));

        let response = self.http.get(url.clone()).send().await?;
        let response = check_status(response, url)?;
        let body = response.bytes().await?;

        Ok(serde_json::from_slice(&body)?)
    }

    /// Stream `url` into `path`, creating parent directories as needed.
    ///
    /// Bytes go to `<path>.<tag>.part` first and are moved onto `path` once
    /// the whole body has been written. Returns the number of bytes written.
    pub async fn download(&self, url: &str, path: &Path, tag: &str) -> Result<u64> {
        let _permit = self
            .download_limiter
            .acquire()
            .await
            .map_err(|_| Error::LimiterClosed)?;

        tracing::debug!("Downloading {} -> {}", url, path.display());

        let parsed = Url::parse(url)?;
        let response = self
            .http
            .get(parsed.clone())
            .header(header::ACCEPT, "*/*")
            .send()
            .await?;
        let response = check_status(response, &parsed)?;

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| Error::filesystem(parent, e))?;
        }

        let partial = partial_path(path, tag);
        match stream_to_file(response, &partial).await {
            Ok(written) => {
                tokio::fs::rename(&partial, path)
                    .await
                    .map_err(|e| Error::filesystem(path, e))?;
                Ok(written)
            }
            Err(e) => {
                let _ = tokio::fs::remove_file(&partial).await;
                Err(e)
            }
        }
    }
}

/// Turn non-2xx statuses into [`Error::Http`].
fn check_status(response: Response, url: &Url) -> Result<Response> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::Http {
            status,
            url: redact(url),
        });
    }
    Ok(response)
}

/// Write the response body chunk by chunk.
async fn stream_to_file(response: Response, path: &Path) -> Result<u64> {
    let mut file = File::create(path)
        .await
        .map_err(|e| Error::filesystem(path, e))?;
    let mut stream = response.bytes_stream();
    let mut written: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk)
            .await
            .map_err(|e| Error::filesystem(path, e))?;
        written += chunk.len() as u64;
    }

    file.flush().await.map_err(|e| Error::filesystem(path, e))?;

    Ok(written)
}

/// Temporary path a transfer tagged `tag` is written to.
pub fn partial_path(path: &Path, tag: &str) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(format!(".{}.part", tag));
    PathBuf::from(name)
}
