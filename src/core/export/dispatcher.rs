//! Object dispatcher
//!
//! The central recursive export function: classifies a document object and
//! performs or delegates its export, recursing into children for container
//! categories. Categories are handled by a single total match, so an object
//! takes exactly one export path per visit.

use crate::adapters::runtime::traits::{Document, DocumentObject, ObjectRef, ShapeEncoder};
use crate::adapters::runtime::RenderingContext;
use crate::config::TemplateConfig;
use crate::core::export::exportable::is_exportable;
use crate::core::export::naming::build_base_name;
use crate::core::export::summary::{ExportError, ExportErrorType, ExportSummary, ObjectOutcome};
use crate::domain::category::classify;
use crate::domain::Category;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Collaborators and settings shared by one export run
pub struct ExportContext<'a> {
    /// Solid-geometry interchange encoder
    pub encoder: &'a dyn ShapeEncoder,

    /// Rendering capability for drawing pages
    pub rendering: &'a RenderingContext,

    /// Drawing template applied to pages before rendering, if configured
    pub template: Option<&'a TemplateConfig>,

    /// Version tag for generated base names
    pub version: &'a str,
}

/// Append an extension without disturbing dots already in the base name.
///
/// Version tags like `1.0` end up in base names, so `Path::with_extension`
/// would truncate them.
fn with_export_extension(base: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(base.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Export one document object, recursing into container children.
///
/// `object` is `None` when an upstream lookup failed; that is a caller bug,
/// reported as a failure without recursing. `explicit_output` is a
/// caller-given base path (no extension); when absent the object gets its
/// default name from the base-name builder under `out_dir`.
///
/// Every visited object's outcome is recorded into `summary`. A container's
/// own result depends only on its own export step; children's failures are
/// logged and tallied but never propagated, so one bad node doesn't block
/// the rest of a large tree.
pub fn export_object(
    object: Option<ObjectRef>,
    document: &dyn Document,
    out_dir: &Path,
    explicit_output: Option<&Path>,
    ctx: &ExportContext<'_>,
    summary: &mut ExportSummary,
) -> ObjectOutcome {
    let object = match object {
        Some(object) => object,
        None => {
            tracing::error!("Asked to export a missing object");
            let outcome = ObjectOutcome::Failed("missing object".to_string());
            summary.record(&outcome);
            summary.add_error(ExportError::new(
                ExportErrorType::Input,
                "asked to export a missing object",
            ));
            return outcome;
        }
    };

    let category = classify(object.as_ref());
    tracing::info!(
        identity = object.identity(),
        label = object.label(),
        category = %category,
        "Exporting object"
    );

    let base = match explicit_output {
        Some(base) => base.to_path_buf(),
        None => out_dir.join(build_base_name(
            object.identity(),
            object.label(),
            category,
            ctx.version,
        )),
    };

    let outcome = match category {
        Category::DrawingPage => export_page(object.as_ref(), document, &base, ctx),
        Category::Assembly => {
            // Children are only relevant to closure checking; the encoder
            // resolves the compound shape itself.
            let output = with_export_extension(&base, ctx.encoder.extension());
            match ctx.encoder.encode_compound(object.as_ref(), &output) {
                Ok(()) => ObjectOutcome::Exported(output),
                Err(e) => ObjectOutcome::Failed(e.to_string()),
            }
        }
        Category::Body => encode_shape(object.as_ref(), &base, ctx),
        Category::PartContainer => {
            // Children first, in declared order, each deriving its own
            // default name, then the container's aggregate shape.
            for child in object.children() {
                let child_outcome =
                    export_object(Some(child.clone()), document, out_dir, None, ctx, summary);
                if child_outcome.is_failure() {
                    tracing::warn!(
                        identity = child.identity(),
                        parent = object.identity(),
                        "Child export failed, continuing with siblings"
                    );
                }
            }
            let output = with_export_extension(&base, ctx.encoder.extension());
            match ctx.encoder.encode_compound(object.as_ref(), &output) {
                Ok(()) => ObjectOutcome::Exported(output),
                Err(e) => ObjectOutcome::Failed(e.to_string()),
            }
        }
        Category::Sketch => ObjectOutcome::Skipped("sketch export not implemented".to_string()),
        Category::GenericShapeBearing => {
            if is_exportable(object.as_ref()) {
                encode_shape(object.as_ref(), &base, ctx)
            } else {
                ObjectOutcome::Skipped("no exportable geometry".to_string())
            }
        }
        // Links are only followed during closure checking, never on export.
        Category::Link => ObjectOutcome::Skipped("link objects are not auto-followed".to_string()),
        Category::Unclassified => {
            ObjectOutcome::Skipped(format!("unclassified tag {}", object.type_tag()))
        }
    };

    match &outcome {
        ObjectOutcome::Exported(path) => {
            tracing::info!(identity = object.identity(), output = %path.display(), "Exported");
        }
        ObjectOutcome::Skipped(reason) => {
            tracing::warn!(
                identity = object.identity(),
                tag = object.type_tag(),
                reason = %reason,
                "Object skipped"
            );
        }
        ObjectOutcome::Failed(message) => {
            tracing::error!(identity = object.identity(), error = %message, "Export failed");
            summary.add_error(
                ExportError::new(error_type_for(category), message.clone())
                    .with_context(format!("identity={}", object.identity())),
            );
        }
    }
    summary.record(&outcome);
    outcome
}

fn error_type_for(category: Category) -> ExportErrorType {
    match category {
        Category::DrawingPage => ExportErrorType::Render,
        Category::Link | Category::Unclassified => ExportErrorType::Input,
        _ => ExportErrorType::Encoding,
    }
}

fn encode_shape(object: &dyn DocumentObject, base: &Path, ctx: &ExportContext<'_>) -> ObjectOutcome {
    let output = with_export_extension(base, ctx.encoder.extension());
    match ctx.encoder.encode_shape(object, &output) {
        Ok(()) => ObjectOutcome::Exported(output),
        Err(e) => ObjectOutcome::Failed(e.to_string()),
    }
}

fn export_page(
    page: &dyn DocumentObject,
    document: &dyn Document,
    base: &Path,
    ctx: &ExportContext<'_>,
) -> ObjectOutcome {
    // Rendering needs an initialized GUI and a recomputed document.
    if let Err(e) = ctx.rendering.wait_until_ready(document) {
        return ObjectOutcome::Failed(e.to_string());
    }

    if let Some(template) = ctx.template {
        if let Err(e) =
            ctx.rendering
                .renderer()
                .apply_template(page, &template.sheet, &template.fields)
        {
            return ObjectOutcome::Failed(e.to_string());
        }
    }

    let output = with_export_extension(base, "pdf");
    match ctx.rendering.renderer().render_page(page, &output) {
        Ok(()) => ObjectOutcome::Exported(output),
        Err(e) => ObjectOutcome::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        MemoryDocument, MemoryGui, MemoryObject, RecordingEncoder, RecordingRenderer,
    };
    use crate::config::WaitConfig;
    use std::sync::Arc;

    fn test_rendering() -> RenderingContext {
        RenderingContext::new(
            Arc::new(MemoryGui::active()),
            Arc::new(RecordingRenderer::new()),
            WaitConfig {
                poll_interval_ms: 0,
                max_attempts: 5,
                settle_ms: 0,
            },
        )
    }

    fn ctx<'a>(
        encoder: &'a RecordingEncoder,
        rendering: &'a RenderingContext,
    ) -> ExportContext<'a> {
        ExportContext {
            encoder,
            rendering,
            template: None,
            version: "1.0",
        }
    }

    #[test]
    fn test_extension_preserves_dotted_version() {
        let out = with_export_extension(Path::new("/out/demoB1_B1_Body_1.0"), "step");
        assert_eq!(out, PathBuf::from("/out/demoB1_B1_Body_1.0.step"));
    }

    #[test]
    fn test_missing_object_is_reported_not_recursed() {
        let encoder = RecordingEncoder::new();
        let rendering = test_rendering();
        let doc = MemoryDocument::empty("/tmp/demo.fcstd");
        let mut summary = ExportSummary::new();

        let outcome = export_object(
            None,
            &doc,
            Path::new("/out"),
            None,
            &ctx(&encoder, &rendering),
            &mut summary,
        );
        assert!(outcome.is_failure());
        assert_eq!(summary.failed, 1);
        assert!(encoder.shape_calls().is_empty());
    }

    #[test]
    fn test_body_exports_via_shape_encoder() {
        let encoder = RecordingEncoder::new();
        let rendering = test_rendering();
        let doc = MemoryDocument::empty("/tmp/demo.fcstd");
        let body: ObjectRef = Arc::new(
            MemoryObject::new("demo#B1", "B1", "PartDesign::Body").with_measure(10.0),
        );
        let mut summary = ExportSummary::new();

        let outcome = export_object(
            Some(body),
            &doc,
            Path::new("/out"),
            None,
            &ctx(&encoder, &rendering),
            &mut summary,
        );
        assert_eq!(
            outcome,
            ObjectOutcome::Exported(PathBuf::from("/out/demoB1_B1_Body_1.0.step"))
        );
        assert_eq!(encoder.shape_calls().len(), 1);
    }

    #[test]
    fn test_assembly_compound_export_without_child_recursion() {
        let encoder = RecordingEncoder::new();
        let rendering = test_rendering();
        let doc = MemoryDocument::empty("/tmp/asm.fcstd");
        let child: ObjectRef =
            Arc::new(MemoryObject::new("asm#B", "B", "PartDesign::Body").with_measure(1.0));
        let assembly: ObjectRef = Arc::new(
            MemoryObject::new("asm#A", "A", "Assembly::AssemblyObject").with_children(vec![child]),
        );
        let mut summary = ExportSummary::new();

        export_object(
            Some(assembly),
            &doc,
            Path::new("/out"),
            None,
            &ctx(&encoder, &rendering),
            &mut summary,
        );
        assert_eq!(encoder.compound_calls().len(), 1);
        assert!(encoder.shape_calls().is_empty());
        assert_eq!(summary.total_objects, 1);
    }

    #[test]
    fn test_container_children_exported_in_order_before_aggregate() {
        let encoder = RecordingEncoder::new();
        let rendering = test_rendering();
        let doc = MemoryDocument::empty("/tmp/part.fcstd");
        let c1: ObjectRef =
            Arc::new(MemoryObject::new("part#C1", "C1", "PartDesign::Body").with_measure(1.0));
        let c2: ObjectRef =
            Arc::new(MemoryObject::new("part#C2", "C2", "PartDesign::Body").with_measure(1.0));
        let container: ObjectRef = Arc::new(
            MemoryObject::new("part#P", "P", "App::Part").with_children(vec![c1, c2]),
        );
        let mut summary = ExportSummary::new();

        export_object(
            Some(container),
            &doc,
            Path::new("/out"),
            None,
            &ctx(&encoder, &rendering),
            &mut summary,
        );

        let shapes = encoder.shape_calls();
        assert_eq!(shapes.len(), 2);
        assert!(shapes[0].output.to_str().unwrap().contains("C1"));
        assert!(shapes[1].output.to_str().unwrap().contains("C2"));
        // Aggregate call happens last
        let compounds = encoder.compound_calls();
        assert_eq!(compounds.len(), 1);
        assert!(compounds[0].sequence > shapes[1].sequence);
        assert_eq!(summary.exported, 3);
    }

    #[test]
    fn test_container_children_get_distinct_names() {
        let encoder = RecordingEncoder::new();
        let rendering = test_rendering();
        let doc = MemoryDocument::empty("/tmp/part.fcstd");
        let c1: ObjectRef =
            Arc::new(MemoryObject::new("part#C1", "Wheel", "PartDesign::Body").with_measure(1.0));
        let c2: ObjectRef =
            Arc::new(MemoryObject::new("part#C2", "Wheel", "PartDesign::Body").with_measure(1.0));
        let container: ObjectRef = Arc::new(
            MemoryObject::new("part#P", "P", "App::Part").with_children(vec![c1, c2]),
        );
        let mut summary = ExportSummary::new();

        export_object(
            Some(container),
            &doc,
            Path::new("/out"),
            None,
            &ctx(&encoder, &rendering),
            &mut summary,
        );

        let shapes = encoder.shape_calls();
        // Same label, different identities: names must not collide
        assert_ne!(shapes[0].output, shapes[1].output);
    }

    #[test]
    fn test_child_failure_does_not_fail_container() {
        let encoder = RecordingEncoder::failing_on("part#Bad");
        let rendering = test_rendering();
        let doc = MemoryDocument::empty("/tmp/part.fcstd");
        let bad: ObjectRef =
            Arc::new(MemoryObject::new("part#Bad", "Bad", "PartDesign::Body").with_measure(1.0));
        let good: ObjectRef =
            Arc::new(MemoryObject::new("part#Good", "Good", "PartDesign::Body").with_measure(1.0));
        let container: ObjectRef = Arc::new(
            MemoryObject::new("part#P", "P", "App::Part").with_children(vec![bad, good]),
        );
        let mut summary = ExportSummary::new();

        let outcome = export_object(
            Some(container),
            &doc,
            Path::new("/out"),
            None,
            &ctx(&encoder, &rendering),
            &mut summary,
        );
        assert!(!outcome.is_failure());
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.exported, 2); // good child + aggregate
    }

    #[test]
    fn test_sketch_skipped_not_failed() {
        let encoder = RecordingEncoder::new();
        let rendering = test_rendering();
        let doc = MemoryDocument::empty("/tmp/demo.fcstd");
        let sketch: ObjectRef = Arc::new(
            MemoryObject::new("demo#S1", "S1", "Sketcher::SketchObject").with_measure(2.0),
        );
        let mut summary = ExportSummary::new();

        let outcome = export_object(
            Some(sketch),
            &doc,
            Path::new("/out"),
            None,
            &ctx(&encoder, &rendering),
            &mut summary,
        );
        assert!(matches!(outcome, ObjectOutcome::Skipped(_)));
        assert_eq!(summary.skipped, 1);
        assert!(summary.is_successful());
    }

    #[test]
    fn test_link_never_followed_on_export() {
        let encoder = RecordingEncoder::new();
        let rendering = test_rendering();
        let doc = MemoryDocument::empty("/tmp/demo.fcstd");
        let target: ObjectRef = Arc::new(
            MemoryObject::new("other#B", "B", "PartDesign::Body").with_measure(5.0),
        );
        let link: ObjectRef = Arc::new(
            MemoryObject::new("demo#L", "L", "App::Link").with_link_target(target),
        );
        let mut summary = ExportSummary::new();

        let outcome = export_object(
            Some(link),
            &doc,
            Path::new("/out"),
            None,
            &ctx(&encoder, &rendering),
            &mut summary,
        );
        assert!(matches!(outcome, ObjectOutcome::Skipped(_)));
        assert!(encoder.shape_calls().is_empty());
        assert!(encoder.compound_calls().is_empty());
    }

    #[test]
    fn test_page_rendered_to_pdf() {
        let encoder = RecordingEncoder::new();
        let renderer = Arc::new(RecordingRenderer::new());
        let rendering = RenderingContext::new(
            Arc::new(MemoryGui::active()),
            renderer.clone(),
            WaitConfig {
                poll_interval_ms: 0,
                max_attempts: 5,
                settle_ms: 0,
            },
        );
        let doc = MemoryDocument::empty("/tmp/demo.fcstd");
        let page: ObjectRef = Arc::new(MemoryObject::new("demo#Page", "Sheet", "TechDraw::DrawPage"));
        let mut summary = ExportSummary::new();

        let outcome = export_object(
            Some(page),
            &doc,
            Path::new("/out"),
            None,
            &ctx(&encoder, &rendering),
            &mut summary,
        );
        match outcome {
            ObjectOutcome::Exported(path) => {
                assert_eq!(path.extension().unwrap(), "pdf");
            }
            other => panic!("expected export, got {other:?}"),
        }
        assert_eq!(renderer.rendered_pages().len(), 1);
    }

    #[test]
    fn test_explicit_output_overrides_default_name() {
        let encoder = RecordingEncoder::new();
        let rendering = test_rendering();
        let doc = MemoryDocument::empty("/tmp/demo.fcstd");
        let body: ObjectRef = Arc::new(
            MemoryObject::new("demo#B1", "B1", "PartDesign::Body").with_measure(10.0),
        );
        let mut summary = ExportSummary::new();

        let outcome = export_object(
            Some(body),
            &doc,
            Path::new("/out"),
            Some(Path::new("/elsewhere/housing")),
            &ctx(&encoder, &rendering),
            &mut summary,
        );
        assert_eq!(
            outcome,
            ObjectOutcome::Exported(PathBuf::from("/elsewhere/housing.step"))
        );
    }
}
