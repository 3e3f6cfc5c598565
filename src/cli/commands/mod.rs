//! Command implementations

pub mod check_links;
pub mod export;
pub mod export_object;

use crate::adapters::memory::{MemoryGui, RecordingEncoder, RecordingRenderer};
use crate::adapters::runtime::RenderingContext;
use crate::config::WaitConfig;
use std::sync::Arc;

/// Collaborators bundled for one command invocation
///
/// The reference backend records every encoder and renderer call and writes
/// placeholder output files; a production deployment wires the CAD
/// toolkit's implementations of the same traits here instead.
pub struct Backend {
    /// Shape encoder
    pub encoder: RecordingEncoder,
    /// Rendering capability
    pub rendering: RenderingContext,
}

impl Backend {
    /// Build the reference backend with the given wait bounds
    pub fn reference(wait: WaitConfig) -> Self {
        Self {
            encoder: RecordingEncoder::writing(),
            rendering: RenderingContext::new(
                Arc::new(MemoryGui::active()),
                Arc::new(RecordingRenderer::writing()),
                wait,
            ),
        }
    }
}
