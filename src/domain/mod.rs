//! Core domain types
//!
//! Object categories, the error hierarchy, and the shared [`Result`] alias.

pub mod category;
pub mod errors;
pub mod result;

pub use category::{classify, Category};
pub use errors::CadexError;
pub use result::Result;
