//! Spec validation: identifiers, uniqueness, declared types, and reference integrity.
//! Runs as a single pass before anything is compiled or written.

use crate::case::plural;
use crate::config::{DeclaredType, SpecDocument, ID_COLUMN};
use crate::error::ConfigError;
use regex::Regex;
use std::collections::HashSet;
use std::sync::OnceLock;

fn entity_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z][a-z0-9_]*$").expect("static pattern"))
}

fn property_name_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z_][a-z0-9_]*$").expect("static pattern"))
}

/// Keywords PostgreSQL refuses as unquoted table or column names, including those
/// reserved except as function or type names. Names are emitted unquoted.
const SQL_RESERVED: &[&str] = &[
    "all", "analyse", "analyze", "and", "any", "array", "as", "asc", "asymmetric", "authorization",
    "binary", "both", "case", "cast", "check", "collate", "collation", "column", "concurrently",
    "constraint", "create", "cross", "current_catalog", "current_date", "current_role",
    "current_schema", "current_time", "current_timestamp", "current_user", "default", "deferrable",
    "desc", "distinct", "do", "else", "end", "except", "false", "fetch", "for", "foreign", "freeze",
    "from", "full", "grant", "group", "having", "ilike", "in", "initially", "inner", "intersect",
    "into", "is", "isnull", "join", "lateral", "leading", "left", "like", "limit", "localtime",
    "localtimestamp", "natural", "not", "notnull", "null", "offset", "on", "only", "or", "order",
    "outer", "overlaps", "placing", "primary", "references", "returning", "right", "select",
    "session_user", "similar", "some", "symmetric", "system_user", "table", "tablesample", "then",
    "to", "trailing", "true", "union", "unique", "user", "using", "variadic", "verbose", "when",
    "where", "window", "with",
];

/// Entity names whose title form clashes with identifiers imported by generated pages.
const UI_RESERVED: &[&str] = &["link"];

pub fn validate(spec: &SpecDocument) -> Result<(), ConfigError> {
    let mut entity_names: HashSet<&str> = HashSet::new();
    for (name, _) in spec.entities.iter() {
        if !entity_name_pattern().is_match(name) {
            return Err(ConfigError::InvalidIdentifier {
                kind: "entity",
                name: name.to_string(),
            });
        }
        if SQL_RESERVED.contains(&name) || UI_RESERVED.contains(&name) {
            return Err(ConfigError::ReservedIdentifier {
                kind: "entity",
                name: name.to_string(),
            });
        }
        if !entity_names.insert(name) {
            return Err(ConfigError::DuplicateEntityName(name.to_string()));
        }
    }

    for (entity, e) in spec.entities.iter() {
        let entity_plural = plural(entity);
        if entity_names.contains(entity_plural.as_str()) {
            return Err(ConfigError::NameCollision {
                entity: entity.to_string(),
                other: entity_plural,
            });
        }
        let mut property_names: HashSet<&str> = HashSet::new();
        for (property, p) in e.properties.iter() {
            if property == ID_COLUMN {
                return Err(ConfigError::ReservedPropertyName {
                    entity: entity.to_string(),
                });
            }
            if !property_name_pattern().is_match(property) {
                return Err(ConfigError::InvalidIdentifier {
                    kind: "property",
                    name: format!("{}.{}", entity, property),
                });
            }
            if SQL_RESERVED.contains(&property) {
                return Err(ConfigError::ReservedIdentifier {
                    kind: "property",
                    name: format!("{}.{}", entity, property),
                });
            }
            if !property_names.insert(property) {
                return Err(ConfigError::DuplicatePropertyName {
                    entity: entity.to_string(),
                    property: property.to_string(),
                });
            }
            match DeclaredType::parse(&p.type_) {
                None => {
                    return Err(ConfigError::UnknownPropertyType {
                        entity: entity.to_string(),
                        property: property.to_string(),
                        declared: p.type_.clone(),
                    });
                }
                Some(DeclaredType::Reference(target)) if !entity_names.contains(target) => {
                    return Err(ConfigError::UnknownEntityReference {
                        entity: entity.to_string(),
                        property: property.to_string(),
                        target: target.to_string(),
                    });
                }
                Some(_) => {}
            }
        }
    }

    Ok(())
}
