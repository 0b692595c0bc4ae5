//! Typed errors for spec validation and artifact output.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unknown entity reference: {entity}.{property} references '{target}'")]
    UnknownEntityReference {
        entity: String,
        property: String,
        target: String,
    },
    #[error("unknown property type: {entity}.{property} has type '{declared}'")]
    UnknownPropertyType {
        entity: String,
        property: String,
        declared: String,
    },
    #[error("duplicate entity name: {0}")]
    DuplicateEntityName(String),
    #[error("duplicate property name: {entity}.{property}")]
    DuplicatePropertyName { entity: String, property: String },
    #[error("reserved property name: {entity}.id is implicit and cannot be declared")]
    ReservedPropertyName { entity: String },
    #[error("reserved {kind} identifier: '{name}'")]
    ReservedIdentifier { kind: &'static str, name: String },
    #[error("name collision: generated names of entity '{entity}' clash with entity '{other}'")]
    NameCollision { entity: String, other: String },
    #[error("invalid {kind} identifier: '{name}'")]
    InvalidIdentifier { kind: &'static str, name: String },
    #[error("spec load: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum CodegenError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl CodegenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CodegenError::Io {
            path: path.into(),
            source,
        }
    }
}
