//! Object category classification
//!
//! The CAD runtime describes every document object with a string type tag.
//! This module is the single place those raw tags are branched on: the rest
//! of the crate works with the closed [`Category`] set, so supporting a new
//! runtime tag is a one-line change here.

use crate::adapters::runtime::traits::DocumentObject;
use std::fmt;

/// Closed category set for document objects
///
/// Every object maps to exactly one category; unknown tags fall back to
/// [`Category::Unclassified`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// A drawing page, rasterized to a page-layout PDF
    DrawingPage,
    /// An assembly whose children are resolved through link indirection
    Assembly,
    /// A link to an object in another document
    Link,
    /// A solid body carrying exportable geometry
    Body,
    /// A part container owning sub-bodies
    PartContainer,
    /// A 2D sketch (export unsupported)
    Sketch,
    /// Not otherwise classified but exposes a shape attribute
    GenericShapeBearing,
    /// Fallback for unknown tags
    Unclassified,
}

impl Category {
    /// Total mapping from the runtime's declared type tag.
    ///
    /// Never panics; tags this crate doesn't know about classify as
    /// `Unclassified`.
    pub fn from_tag(tag: &str) -> Category {
        match tag {
            "TechDraw::DrawPage" => Category::DrawingPage,
            "Assembly::AssemblyObject" => Category::Assembly,
            "App::Link" | "Assembly::AssemblyLink" => Category::Link,
            "PartDesign::Body" => Category::Body,
            "App::Part" | "PartDesign::Part" => Category::PartContainer,
            "Sketcher::SketchObject" => Category::Sketch,
            _ => Category::Unclassified,
        }
    }

    /// Short name used in generated file names, e.g. `Body` or `DrawPage`.
    pub fn short_name(&self) -> &'static str {
        match self {
            Category::DrawingPage => "DrawPage",
            Category::Assembly => "Assembly",
            Category::Link => "Link",
            Category::Body => "Body",
            Category::PartContainer => "Part",
            Category::Sketch => "Sketch",
            Category::GenericShapeBearing => "Shape",
            Category::Unclassified => "Object",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_name())
    }
}

/// Construction/reference geometry tags (planes, axes, origins).
///
/// These expose shape attributes but never carry exportable geometry.
pub fn is_construction_tag(tag: &str) -> bool {
    matches!(
        tag,
        "App::Plane" | "App::Line" | "App::Origin" | "App::DatumElement"
    )
}

/// Classify a document object.
///
/// Tag-driven via [`Category::from_tag`], with one refinement: an object the
/// tag table doesn't know but that exposes a shape is treated as
/// [`Category::GenericShapeBearing`] so the fallback export path can decide
/// whether it is worth encoding.
pub fn classify(object: &dyn DocumentObject) -> Category {
    match Category::from_tag(object.type_tag()) {
        Category::Unclassified if object.shape_measure().is_some() => {
            Category::GenericShapeBearing
        }
        category => category,
    }
}
