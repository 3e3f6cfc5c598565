//! External integrations
//!
//! Trait seams to the CAD toolkit plus the in-memory implementations used
//! by tests.

pub mod memory;
pub mod runtime;
