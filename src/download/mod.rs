//! Download module for content downloading.
//!
//! This module provides:
//! - Single item downloads with an "already exists" check
//! - The per-profile orchestrator
//! - The top-level run over all profiles
//! - Outcome and report tracking

pub mod media;
pub mod profile;
pub mod run;
pub mod state;

pub use media::download_item;
pub use profile::{DownloadOptions, Profile};
pub use run::{download_profiles, run};
pub use state::{FailedItem, ItemOutcome, ProfileReport, RunReport, TargetClaims};
