//! Domain layer for the cinesearch plugin.
//!
//! Core types independent of Zellij APIs: the movie record with its display
//! fallbacks, and the crate-wide error type.
//!
//! - [`error`]: Error types and result aliases
//! - [`movie`]: Movie record, image host and placeholder constants

pub mod error;
pub mod movie;

pub use error::{CinesearchError, Result};
pub use movie::{ImageHost, Movie};
