//! Exportability guard for the generic fallback export path
//!
//! This is a guard, not a classifier of export kind: it only decides whether
//! a shape-bearing object that fell through every dedicated category is
//! worth handing to the encoder.

use crate::adapters::runtime::traits::DocumentObject;
use crate::domain::category::{is_construction_tag, Category};

/// Whether an object carries exportable geometry.
///
/// False when the object has no shape, is a sketch or construction-reference
/// artifact, or its shape has zero measure (the canonical symptom of a
/// container or reference-only object that happens to expose a shape
/// attribute).
pub fn is_exportable(object: &dyn DocumentObject) -> bool {
    let measure = match object.shape_measure() {
        Some(measure) => measure,
        None => return false,
    };
    if Category::from_tag(object.type_tag()) == Category::Sketch {
        return false;
    }
    if is_construction_tag(object.type_tag()) {
        return false;
    }
    measure != 0.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::MemoryObject;

    #[test]
    fn test_shapeless_object_not_exportable() {
        let obj = MemoryObject::new("demo#Group", "Group", "App::DocumentObjectGroup");
        assert!(!is_exportable(&obj));
    }

    #[test]
    fn test_sketch_not_exportable_even_with_shape() {
        let obj =
            MemoryObject::new("demo#Sketch", "Sketch", "Sketcher::SketchObject").with_measure(4.2);
        assert!(!is_exportable(&obj));
    }

    #[test]
    fn test_construction_reference_not_exportable() {
        let obj = MemoryObject::new("demo#XY", "XY_Plane", "App::Plane").with_measure(100.0);
        assert!(!is_exportable(&obj));
    }

    #[test]
    fn test_zero_measure_shape_not_exportable() {
        let obj = MemoryObject::new("demo#Ref", "Ref", "Mesh::Feature").with_measure(0.0);
        assert!(!is_exportable(&obj));
    }

    #[test]
    fn test_real_shape_exportable() {
        let obj = MemoryObject::new("demo#Solid", "Solid", "Mesh::Feature").with_measure(12.5);
        assert!(is_exportable(&obj));
    }
}
