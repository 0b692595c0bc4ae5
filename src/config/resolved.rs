//! Resolved entity model: spec validated and flattened for the compilers.

use std::collections::HashMap;

/// Prefix that marks a declared type as a reference to another entity (e.g. "$person").
pub const REFERENCE_MARKER: char = '$';

/// Implicit primary key present on every entity.
pub const ID_COLUMN: &str = "id";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScalarKind {
    String,
    Number,
}

/// Entity a reference points at, with its collection path segment.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReferenceTarget {
    pub entity: String,
    pub plural: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PropertyType {
    Scalar(ScalarKind),
    Reference(ReferenceTarget),
}

/// Declared type string split into its kind; reference targets are not checked yet.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DeclaredType<'a> {
    Scalar(ScalarKind),
    Reference(&'a str),
}

impl<'a> DeclaredType<'a> {
    /// None when the string is neither a known scalar nor a marker followed by a name.
    pub fn parse(declared: &'a str) -> Option<Self> {
        if let Some(target) = declared.strip_prefix(REFERENCE_MARKER) {
            return (!target.is_empty()).then_some(DeclaredType::Reference(target));
        }
        match declared {
            "string" => Some(DeclaredType::Scalar(ScalarKind::String)),
            "number" | "integer" => Some(DeclaredType::Scalar(ScalarKind::Number)),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedProperty {
    pub name: String,
    /// Label used in generated UI (title-cased name).
    pub title: String,
    pub ty: PropertyType,
    /// One-to-many: never persisted, posted, or rendered in forms.
    pub list: bool,
}

impl ResolvedProperty {
    pub fn is_persisted(&self) -> bool {
        !self.list
    }

    pub fn reference(&self) -> Option<&ReferenceTarget> {
        match &self.ty {
            PropertyType::Reference(target) => Some(target),
            PropertyType::Scalar(_) => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResolvedEntity {
    pub name: String,
    /// Collection path segment and identifier (e.g. "books").
    pub plural: String,
    /// Type name in generated code (e.g. "Book").
    pub title: String,
    /// All declared properties, declaration order.
    pub properties: Vec<ResolvedProperty>,
}

impl ResolvedEntity {
    /// Resolved property set: non-list properties in declaration order.
    /// These become SQL columns, JSON body fields and form inputs.
    pub fn persisted(&self) -> impl Iterator<Item = &ResolvedProperty> + '_ {
        self.properties.iter().filter(|p| p.is_persisted())
    }

    pub fn persisted_names(&self) -> Vec<&str> {
        self.persisted().map(|p| p.name.as_str()).collect()
    }

    /// Persisted reference properties with their targets, declaration order.
    pub fn references(&self) -> impl Iterator<Item = (&ResolvedProperty, &ReferenceTarget)> + '_ {
        self.persisted().filter_map(|p| p.reference().map(|t| (p, t)))
    }
}

#[derive(Clone, Debug, Default)]
pub struct ResolvedModel {
    /// Spec order.
    pub entities: Vec<ResolvedEntity>,
    pub entity_by_name: HashMap<String, usize>,
}

impl ResolvedModel {
    pub fn entity(&self, name: &str) -> Option<&ResolvedEntity> {
        self.entity_by_name.get(name).map(|&i| &self.entities[i])
    }
}
