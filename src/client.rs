//! Client for the SNARE detection service.
//!
//! Keep the public surface small: one client value, built once and passed to
//! whatever needs it.

pub mod builder;
pub mod core;

pub use builder::ApiClientBuilder;
pub use core::ApiClient;
