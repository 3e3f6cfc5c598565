//! Result type alias for cadex operations

use crate::domain::errors::CadexError;

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, CadexError>;
