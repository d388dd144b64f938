//! # ESA Common Library
//!
//! Shared code for the Elite Status Assessment services:
//! - Error type used across crates
//! - TOML configuration loading and config file resolution
//! - Tracing subscriber initialisation

pub mod config;
pub mod error;
pub mod logging;

pub use error::{Error, Result};
