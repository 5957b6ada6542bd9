//! Top-level run: log in once, then process every profile concurrently.

use std::sync::Arc;

use futures::future::join_all;
use indicatif::ProgressBar;

use crate::api::{login, Balancer, Client, Credentials, LoginTokenSource, Session};
use crate::config::Config;
use crate::download::profile::{DownloadOptions, Profile};
use crate::download::state::{RunReport, TargetClaims};
use crate::error::Result;

/// Download every profile with one shared session.
///
/// Profiles run concurrently; their reports come back in input order.
pub async fn download_profiles(
    session: &Session,
    options: &DownloadOptions,
    profiles: &[String],
    progress: &ProgressBar,
) -> RunReport {
    let claims = TargetClaims::new();
    let claims = &claims;
    let reports = join_all(profiles.iter().map(|nick| async move {
        tracing::info!("Processing profile {}", nick);
        Profile::new(nick.as_str())
            .download(session, options, claims, progress)
            .await
    }))
    .await;

    RunReport { profiles: reports }
}

/// Build the client and mirror pool, log in and download every configured profile.
///
/// Only setup and login errors are returned; item failures land in the report.
pub async fn run(
    config: &Config,
    token_source: &dyn LoginTokenSource,
    progress: &ProgressBar,
) -> Result<RunReport> {
    let client = Client::new(
        &config.network,
        config.options.api_limit,
        config.options.download_limit,
    )?;
    let balancer = Balancer::new(
        config.network.mirror_urls()?,
        config.network.requests_per_mirror,
    )?;
    let credentials = Credentials {
        email: config.account.email.clone(),
        password: config.account.password.clone(),
    };

    let session = login(
        Arc::new(client),
        Arc::new(balancer),
        &credentials,
        token_source,
    )
    .await?;

    let options = DownloadOptions::from_config(config);
    let report = download_profiles(&session, &options, &config.targets.profiles, progress).await;
    progress.finish_and_clear();

    Ok(report)
}
