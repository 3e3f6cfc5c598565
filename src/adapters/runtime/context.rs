//! Rendering capability context
//!
//! Drawing-page export needs the external GUI fully initialized and the
//! owning document recomputed before a page can be rasterized. Instead of
//! reaching for ambient global state, the renderer, the GUI runtime, and the
//! wait bounds travel together in one explicitly constructed capability
//! object that is passed down to whatever needs it.

use crate::adapters::runtime::traits::{Document, GuiRuntime, PageRenderer};
use crate::config::WaitConfig;
use crate::domain::{CadexError, Result};
use std::sync::Arc;
use std::time::Duration;

/// Capability object for page rendering
///
/// Constructed once per process and passed down; owns the GUI handle, the
/// page renderer, and the bounded readiness-wait configuration.
pub struct RenderingContext {
    gui: Arc<dyn GuiRuntime>,
    renderer: Arc<dyn PageRenderer>,
    wait: WaitConfig,
}

impl RenderingContext {
    /// Create a new rendering context
    pub fn new(
        gui: Arc<dyn GuiRuntime>,
        renderer: Arc<dyn PageRenderer>,
        wait: WaitConfig,
    ) -> Self {
        Self {
            gui,
            renderer,
            wait,
        }
    }

    /// The page renderer
    pub fn renderer(&self) -> &dyn PageRenderer {
        self.renderer.as_ref()
    }

    /// Block until the GUI reports an active, recomputed document and the
    /// pending event queue has drained.
    ///
    /// Polls at `wait.poll_interval_ms`, giving up after `wait.max_attempts`
    /// iterations for each of the two phases, then sleeps the final settle
    /// delay. Both bounds come from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`CadexError::Timeout`] when either bound is exceeded, and
    /// propagates recompute failures.
    pub fn wait_until_ready(&self, document: &dyn Document) -> Result<()> {
        let interval = Duration::from_millis(self.wait.poll_interval_ms);

        let mut attempts = 0;
        while !self.gui.document_active() {
            attempts += 1;
            if attempts > self.wait.max_attempts {
                return Err(CadexError::Timeout(format!(
                    "no active document after {} poll(s)",
                    self.wait.max_attempts
                )));
            }
            self.gui.pump_events();
            std::thread::sleep(interval);
        }

        let mut attempts = 0;
        while self.gui.pump_events() {
            attempts += 1;
            if attempts > self.wait.max_attempts {
                return Err(CadexError::Timeout(format!(
                    "GUI event queue still pending after {} drain(s)",
                    self.wait.max_attempts
                )));
            }
            std::thread::sleep(interval);
        }

        document.recompute()?;
        self.gui.pump_events();
        self.gui.repaint();

        std::thread::sleep(Duration::from_millis(self.wait.settle_ms));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{MemoryGui, RecordingRenderer};

    fn fast_wait(max_attempts: u32) -> WaitConfig {
        WaitConfig {
            poll_interval_ms: 0,
            max_attempts,
            settle_ms: 0,
        }
    }

    #[test]
    fn test_wait_times_out_when_no_document_activates() {
        let gui = Arc::new(MemoryGui::inactive());
        let ctx = RenderingContext::new(gui, Arc::new(RecordingRenderer::new()), fast_wait(3));

        let doc = crate::adapters::memory::MemoryDocument::empty("/tmp/never.fcstd");
        let err = ctx.wait_until_ready(&doc).unwrap_err();
        assert!(matches!(err, CadexError::Timeout(_)));
    }

    #[test]
    fn test_wait_succeeds_once_events_drain() {
        // Active document with three rounds of queued events
        let gui = Arc::new(MemoryGui::active_with_pending_events(3));
        let ctx = RenderingContext::new(
            gui.clone(),
            Arc::new(RecordingRenderer::new()),
            fast_wait(10),
        );

        let doc = crate::adapters::memory::MemoryDocument::empty("/tmp/demo.fcstd");
        ctx.wait_until_ready(&doc).unwrap();
        assert!(gui.repainted());
    }

    #[test]
    fn test_wait_times_out_when_events_never_drain() {
        let gui = Arc::new(MemoryGui::active_with_pending_events(u32::MAX));
        let ctx = RenderingContext::new(gui, Arc::new(RecordingRenderer::new()), fast_wait(5));

        let doc = crate::adapters::memory::MemoryDocument::empty("/tmp/busy.fcstd");
        let err = ctx.wait_until_ready(&doc).unwrap_err();
        assert!(matches!(err, CadexError::Timeout(_)));
    }
}
