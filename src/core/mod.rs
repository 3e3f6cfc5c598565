//! Business logic
//!
//! The export engine and the link-closure walker.

pub mod export;
pub mod links;
