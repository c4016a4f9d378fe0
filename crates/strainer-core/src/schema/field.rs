use super::{Annotation, AnnotationKind};
use crate::stmt::Type;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    /// The field name
    pub name: String,

    /// Declared type
    pub ty: Type,

    /// Markers attached to the declaration, in declaration order
    pub annotations: Vec<Annotation>,

    /// Static fields belong to the type, not to its instances, and are not
    /// searchable.
    pub is_static: bool,

    /// Fields generated by tooling rather than declared by the application.
    /// Not searchable.
    pub synthetic: bool,
}

impl Field {
    pub fn new(name: impl Into<String>, ty: impl Into<Type>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            annotations: vec![],
            is_static: false,
            synthetic: false,
        }
    }

    pub fn annotated(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn static_field(mut self) -> Self {
        self.is_static = true;
        self
    }

    pub fn synthetic(mut self) -> Self {
        self.synthetic = true;
        self
    }

    /// Returns the first annotation of the given kind
    pub fn annotation(&self, kind: &AnnotationKind) -> Option<&Annotation> {
        self.annotations
            .iter()
            .find(|annotation| annotation.kind() == *kind)
    }

    pub fn has_annotation(&self, kind: &AnnotationKind) -> bool {
        self.annotation(kind).is_some()
    }

    /// Returns `true` if the field participates in property metadata and
    /// path resolution.
    pub fn is_searchable(&self) -> bool {
        !self.is_static && !self.synthetic
    }
}
