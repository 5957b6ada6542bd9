//! kurek - CLI entry point.

use std::future::Future;
use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use kurek::{
    api::HomePageToken,
    cli::Args,
    config::{normalize_profiles, validate_config, Config},
    download::{run, RunReport},
    error::{exit_codes, Error, Result},
    output::{
        create_item_bar, print_banner, print_config_summary, print_error, print_info,
        print_run_report, print_warning,
    },
};

#[tokio::main]
async fn main() -> ExitCode {
    let outcome = tokio::select! {
        result = run_cli() => result,
        _ = interrupted(tokio::signal::ctrl_c()) => Err(Error::Interrupted),
    };

    match outcome {
        Ok(report) if report.has_failures() => {
            print_warning(&format!(
                "{} item(s) could not be downloaded",
                report.failed_count()
            ));
            ExitCode::from(exit_codes::SOME_ITEMS_FAILED as u8)
        }
        Ok(_) => ExitCode::from(exit_codes::SUCCESS as u8),
        Err(e) => {
            print_error(&format!("{}", e));
            ExitCode::from(e.exit_code() as u8)
        }
    }
}

/// Resolves when `signal` fires; never resolves if the handler could not be installed.
async fn interrupted(signal: impl Future<Output = std::io::Result<()>>) {
    if let Err(e) = signal.await {
        tracing::warn!("Cannot listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
}

async fn run_cli() -> Result<RunReport> {
    // Parse CLI arguments
    let args = Args::parse();

    // Set up logging
    let log_level = if args.debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));

    fmt().with_env_filter(filter).with_target(false).init();

    // Print banner
    print_banner();

    // Load configuration
    let config_path = args.config.clone().or_else(Config::locate);
    let mut config = match &config_path {
        Some(path) => Config::load(path)?,
        None => {
            print_info("No configuration file found, using defaults with CLI arguments");
            Config::default()
        }
    };

    // Merge CLI arguments into config
    args.merge_into_config(&mut config);
    config.targets.profiles = normalize_profiles(&config.targets.profiles);

    // Validate configuration
    validate_config(&config)?;

    print_config_summary(
        &config.targets.profiles,
        &config.options.mode.to_string(),
        &config.root_dir().display().to_string(),
    );

    let token_source = HomePageToken::new(
        config.network.home_url()?,
        config.network.login_token_id.clone(),
    );
    let progress = create_item_bar("Downloading", config.options.show_progress);

    print_info("Logging in...");
    let report = run(&config, &token_source, &progress).await?;

    print_run_report(&report);

    Ok(report)
}
