//! Export engine
//!
//! Naming, exportability guard, the object dispatcher, file-level
//! orchestrators, and the batch controller.

pub mod batch;
pub mod dispatcher;
pub mod exportable;
pub mod naming;
pub mod orchestrator;
pub mod summary;

pub use batch::{run_export, ExportMode, ExportOptions};
pub use dispatcher::{export_object, ExportContext};
pub use exportable::is_exportable;
pub use naming::build_base_name;
pub use orchestrator::{export_file, export_file_links_only, export_file_object, export_file_pages};
pub use summary::{ExportError, ExportErrorType, ExportSummary, ObjectOutcome};
