//! Application layer - Request framing and validation services
//!
//! This module turns raw requests into framed commands and runs them
//! through the domain validation engine under the configured limits.

pub mod services;

pub use services::*;
