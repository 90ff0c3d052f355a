//! Core components of the `hkipo-rs` crate.
//!
//! - The market-data [`YfClient`] and its builder.
//! - The crate-wide [`IpoError`] type.

/// The market-data client (`YfClient`) and its builder.
pub mod client;
/// The primary error type (`IpoError`) for the crate.
pub mod error;

pub use client::{YfClient, YfClientBuilder};
pub use error::IpoError;
