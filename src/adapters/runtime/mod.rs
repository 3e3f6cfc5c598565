//! CAD runtime abstraction
//!
//! Traits the core uses to talk to the external CAD toolkit, plus the
//! rendering capability context.

pub mod context;
pub mod traits;

pub use context::RenderingContext;
pub use traits::{
    CadRuntime, Document, DocumentObject, DocumentRef, GuiRuntime, ObjectRef, PageRenderer,
    ShapeEncoder,
};
