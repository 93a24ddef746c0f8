//! FCFG CLI library.
//!
//! Exposes the command implementations so they can be exercised by
//! integration tests; the binary lives in `main.rs`.

pub mod commands;
pub mod config;
pub mod error;
pub mod loader;

pub use config::Config;
pub use error::{AppError, Result};
