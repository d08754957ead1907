//! Client for the virtualization management endpoint
//!
//! Speaks the endpoint's JSON binding over HTTPS: property reads are GETs,
//! method invocations are POSTs, and a session id header carries the login.
//! [`VimClient`] implements [`dvs_nic_core::ManagementClient`].

pub mod client;
pub mod config;
pub mod error;

pub use client::VimClient;
pub use config::{ConfigError, VimConfig};
pub use error::VimApiError;
