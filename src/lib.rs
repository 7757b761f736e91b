//! # snare-client
//!
//! Client for the SNARE (Scam Network Anomaly Recognition Engine) rental-listing
//! detection service.
//!
//! ## Overview
//!
//! The detection models run in an external service. This crate is the boundary to it:
//! it builds requests against a configurable base URL, bounds every call with a
//! deadline, and turns transport failures into a small set of typed errors that a
//! front end can present without looking inside them.
//!
//! ## Key Features
//!
//! - **Explicit configuration**: [`AppConfig`] is loaded once and passed to the client
//! - **Classified failures**: [`Error::Timeout`], [`Error::Unreachable`],
//!   [`Error::HttpStatus`] and [`Error::Other`]
//! - **Form validation**: per-field checks and markup stripping in [`validation`]
//! - **Page controller**: loading guard, connectivity flag and result rendering in [`controller`]
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snare_client::{ApiClient, AppConfig};
//!
//! #[tokio::main]
//! async fn main() -> snare_client::Result<()> {
//!     let client = ApiClient::new(AppConfig::from_env()?)?;
//!
//!     let result = client.check_listing("http://example.com/listing/1").await?;
//!     println!("suspicious: {}", result.is_suspicious);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Environment-backed application configuration |
//! | [`client`] | API client and builder |
//! | [`transport`] | HTTP transport with deadline and failure classification |
//! | [`types`] | Listing queries and analysis results |
//! | [`validation`] | Manual-entry field validation and sanitization |
//! | [`controller`] | Page state machine over a [`DetectionService`] |

pub mod client;
pub mod config;
pub mod controller;
pub mod transport;
pub mod types;
pub mod validation;

// Re-export main types for convenience
pub use client::{ApiClient, ApiClientBuilder};
pub use config::{AppConfig, Environment};
pub use controller::{DetectionService, PageController, PageState, SubmitOutcome};
pub use types::{AnalysisResult, ListingQuery, ListingSubmission, ManualListing};
pub use validation::ListingField;

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext, FailureCategory};
