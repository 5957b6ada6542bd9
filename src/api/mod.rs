//! Site API module.
//!
//! This module provides:
//! - Mirror rotation for the AJAX endpoint
//! - Command URL building
//! - HTTP client with API and download limits
//! - Login and the authenticated session
//! - API response types

pub mod auth;
pub mod balancer;
pub mod client;
pub mod command;
pub mod session;
pub mod types;

pub use auth::{login, Credentials, HomePageToken, LoginTokenSource};
pub use balancer::Balancer;
pub use client::Client;
pub use command::Command;
pub use session::Session;
pub use types::*;
