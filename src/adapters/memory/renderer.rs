//! Recording page renderer and in-memory GUI state

use crate::adapters::runtime::traits::{DocumentObject, GuiRuntime, PageRenderer};
use crate::config::TemplateFields;
use crate::domain::Result;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Mutex;

/// Page renderer that records rendered pages and applied templates,
/// optionally writing placeholder PDF files
pub struct RecordingRenderer {
    rendered: Mutex<Vec<(String, PathBuf)>>,
    templates: Mutex<Vec<(String, PathBuf, TemplateFields)>>,
    write_files: bool,
}

impl RecordingRenderer {
    /// Record calls without touching the filesystem
    pub fn new() -> Self {
        Self {
            rendered: Mutex::new(Vec::new()),
            templates: Mutex::new(Vec::new()),
            write_files: false,
        }
    }

    /// Record calls and write a placeholder file for each rendered page
    pub fn writing() -> Self {
        Self {
            write_files: true,
            ..Self::new()
        }
    }

    /// Rendered pages as `(identity, output)` pairs in invocation order
    pub fn rendered_pages(&self) -> Vec<(String, PathBuf)> {
        self.rendered.lock().expect("rendered lock").clone()
    }

    /// Applied templates as `(identity, sheet, fields)` in invocation order
    pub fn applied_templates(&self) -> Vec<(String, PathBuf, TemplateFields)> {
        self.templates.lock().expect("template lock").clone()
    }
}

impl Default for RecordingRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl PageRenderer for RecordingRenderer {
    fn render_page(&self, page: &dyn DocumentObject, output: &Path) -> Result<()> {
        if self.write_files {
            std::fs::write(output, format!("%PDF stub for {}\n", page.identity()))?;
        }
        self.rendered
            .lock()
            .expect("rendered lock")
            .push((page.identity().to_string(), output.to_path_buf()));
        Ok(())
    }

    fn apply_template(
        &self,
        page: &dyn DocumentObject,
        template: &Path,
        fields: &TemplateFields,
    ) -> Result<()> {
        self.templates.lock().expect("template lock").push((
            page.identity().to_string(),
            template.to_path_buf(),
            fields.clone(),
        ));
        Ok(())
    }
}

/// In-memory GUI state with scriptable activation and event queue depth
pub struct MemoryGui {
    active: AtomicBool,
    pending_events: AtomicU32,
    repainted: AtomicBool,
}

impl MemoryGui {
    /// Active document, empty event queue
    pub fn active() -> Self {
        Self {
            active: AtomicBool::new(true),
            pending_events: AtomicU32::new(0),
            repainted: AtomicBool::new(false),
        }
    }

    /// No document ever becomes active
    pub fn inactive() -> Self {
        Self {
            active: AtomicBool::new(false),
            pending_events: AtomicU32::new(0),
            repainted: AtomicBool::new(false),
        }
    }

    /// Active document with `rounds` rounds of queued events to drain
    pub fn active_with_pending_events(rounds: u32) -> Self {
        Self {
            active: AtomicBool::new(true),
            pending_events: AtomicU32::new(rounds),
            repainted: AtomicBool::new(false),
        }
    }

    /// Whether `repaint` was called
    pub fn repainted(&self) -> bool {
        self.repainted.load(Ordering::SeqCst)
    }
}

impl GuiRuntime for MemoryGui {
    fn document_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    fn pump_events(&self) -> bool {
        let remaining = self.pending_events.load(Ordering::SeqCst);
        if remaining == 0 {
            return false;
        }
        // A saturated queue never drains; lets tests exercise the timeout.
        if remaining != u32::MAX {
            self.pending_events.store(remaining - 1, Ordering::SeqCst);
        }
        remaining - 1 > 0 || remaining == u32::MAX
    }

    fn repaint(&self) {
        self.repainted.store(true, Ordering::SeqCst);
    }
}
