//! Error types for polyglotas-nav
//!
//! The resolver never fails; these cover context loading, session
//! replacement during navigation, and route parsing.

use thiserror::Error;

/// Main error type for the navigation engine
#[derive(Error, Debug)]
pub enum Error {
    /// Curriculum source, configuration or I/O failure
    #[error(transparent)]
    Common(#[from] polyglotas_common::Error),

    /// Path is not a lesson route
    #[error("Invalid route: {0}")]
    InvalidRoute(String),

    /// Session cannot be replaced while a navigation is committing
    #[error("Navigation in progress")]
    Busy,
}

/// Convenience Result type using polyglotas-nav Error
pub type Result<T> = std::result::Result<T, Error>;
