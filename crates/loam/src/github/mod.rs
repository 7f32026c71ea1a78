//! GitHub implementation of the remote tree client.
//!
//! This module is only available when the `github` feature is enabled.

mod client;

pub use client::{TreeClient, GITHUB_API_BASE};
