//! Parse spec documents and build the resolved model.

use crate::case::{plural, title_case};
use crate::config::resolved::{
    DeclaredType, PropertyType, ReferenceTarget, ResolvedEntity, ResolvedModel, ResolvedProperty,
};
use crate::config::{validate, SpecDocument};
use crate::error::ConfigError;
use std::collections::HashMap;

/// Parse a spec from JSON text. Keeps declaration order and repeated keys.
pub fn parse_spec(json: &str) -> Result<SpecDocument, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Parse a spec from an already-decoded JSON value.
/// Keys repeated in the source text have already been merged by the time a `Value` exists.
pub fn from_value(value: serde_json::Value) -> Result<SpecDocument, ConfigError> {
    serde_json::from_value(value).map_err(|e| ConfigError::Load(e.to_string()))
}

/// Build resolved model from the spec (validates first).
pub fn resolve(spec: &SpecDocument) -> Result<ResolvedModel, ConfigError> {
    validate(spec)?;

    let mut entities = Vec::with_capacity(spec.entities.len());
    let mut entity_by_name = HashMap::with_capacity(spec.entities.len());

    for (name, entity) in spec.entities.iter() {
        let properties = entity
            .properties
            .iter()
            .map(|(prop_name, p)| {
                let ty = match DeclaredType::parse(&p.type_) {
                    Some(DeclaredType::Scalar(kind)) => PropertyType::Scalar(kind),
                    Some(DeclaredType::Reference(target)) => PropertyType::Reference(ReferenceTarget {
                        entity: target.to_string(),
                        plural: plural(target),
                    }),
                    None => {
                        return Err(ConfigError::UnknownPropertyType {
                            entity: name.to_string(),
                            property: prop_name.to_string(),
                            declared: p.type_.clone(),
                        })
                    }
                };
                Ok(ResolvedProperty {
                    name: prop_name.to_string(),
                    title: title_case(prop_name),
                    ty,
                    list: p.list,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let resolved = ResolvedEntity {
            name: name.to_string(),
            plural: plural(name),
            title: title_case(name),
            properties,
        };
        tracing::debug!(
            entity = %resolved.name,
            columns = ?resolved.persisted_names(),
            "resolved entity"
        );
        entity_by_name.insert(resolved.name.clone(), entities.len());
        entities.push(resolved);
    }

    Ok(ResolvedModel {
        entities,
        entity_by_name,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScalarKind;
    use pretty_assertions::assert_eq;

    const BOOKS: &str = r#"{
        "book": {
            "properties": {
                "title": { "type": "string" },
                "author": { "type": "$person", "list": false },
                "chapters": { "type": "$chapter", "list": true },
                "pages": { "type": "number" }
            }
        },
        "person": { "properties": { "name": { "type": "string" } } },
        "chapter": { "properties": { "heading": { "type": "string" } } }
    }"#;

    #[test]
    fn resolves_persisted_set_in_declaration_order() {
        let model = resolve(&parse_spec(BOOKS).unwrap()).unwrap();
        let book = model.entity("book").unwrap();
        assert_eq!(book.plural, "books");
        assert_eq!(book.title, "Book");
        assert_eq!(book.persisted_names(), vec!["title", "author", "pages"]);
        assert_eq!(book.properties.len(), 4);

        let refs: Vec<(&str, &str)> = book
            .references()
            .map(|(p, t)| (p.name.as_str(), t.plural.as_str()))
            .collect();
        assert_eq!(refs, vec![("author", "persons")]);
        assert_eq!(book.properties[3].ty, PropertyType::Scalar(ScalarKind::Number));
    }

    #[test]
    fn keeps_spec_entity_order() {
        let model = resolve(&parse_spec(BOOKS).unwrap()).unwrap();
        let names: Vec<&str> = model.entities.iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["book", "person", "chapter"]);
        assert_eq!(model.entity_by_name["chapter"], 2);
    }

    #[test]
    fn from_value_matches_text_parse() {
        let value: serde_json::Value = serde_json::from_str(BOOKS).unwrap();
        assert_eq!(from_value(value).unwrap(), parse_spec(BOOKS).unwrap());
    }

    #[test]
    fn load_errors_are_reported() {
        assert!(matches!(parse_spec("[1, 2]"), Err(ConfigError::Load(_))));
        assert!(matches!(
            parse_spec(r#"{ "book": { "properties": { "title": {} } } }"#),
            Err(ConfigError::Load(_))
        ));
    }

    #[test]
    fn misspelled_property_flag_is_a_load_error() {
        let err = parse_spec(r#"{ "tag": { "properties": { "books": { "type": "string", "lsit": true } } } }"#)
            .unwrap_err();
        match err {
            ConfigError::Load(msg) => assert!(msg.contains("lsit"), "{}", msg),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn misspelled_properties_key_is_a_load_error() {
        let err = parse_spec(r#"{ "book": { "propertys": { "title": { "type": "string" } } } }"#).unwrap_err();
        match err {
            ConfigError::Load(msg) => assert!(msg.contains("propertys"), "{}", msg),
            other => panic!("unexpected: {:?}", other),
        }
        let value = serde_json::json!({ "book": { "propertys": {} } });
        assert!(matches!(from_value(value), Err(ConfigError::Load(_))));
    }

    #[test]
    fn resolve_fails_before_building() {
        let spec = parse_spec(r#"{ "book": { "properties": { "author": { "type": "$person" } } } }"#).unwrap();
        assert!(matches!(resolve(&spec), Err(ConfigError::UnknownEntityReference { .. })));
    }
}
