//! In-memory collaborator implementations
//!
//! Fixture-driven implementations of every runtime trait. They back the
//! crate's tests and double as the wiring reference for a real CAD backend:
//! documents are built from plain descriptions, the encoder and renderer
//! record their calls (optionally writing placeholder files), and the GUI
//! state is scriptable.

pub mod encoder;
pub mod fixture;
pub mod object;
pub mod renderer;
pub mod runtime;

pub use encoder::{EncodeCall, RecordingEncoder};
pub use fixture::load_runtime;
pub use object::{MemoryDocument, MemoryObject};
pub use renderer::{MemoryGui, RecordingRenderer};
pub use runtime::MemoryRuntime;
