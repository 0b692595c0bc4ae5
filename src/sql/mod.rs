//! SQL target: schema DDL and data-access statements.

mod builder;
mod ddl;
pub use builder::*;
pub use ddl::*;

use crate::artifact::Artifact;
use crate::config::ResolvedModel;

pub const SCHEMA_PATH: &str = "database/schema.sql";

/// One schema file, one CREATE TABLE per entity in spec order.
pub fn compile_schema(model: &ResolvedModel) -> Vec<Artifact> {
    let mut out = String::new();
    for entity in &model.entities {
        let table = CreateTable::for_entity(entity);
        tracing::debug!(table = %table.table, columns = table.columns.len(), "create table");
        out.push_str(&table.to_string());
        out.push('\n');
    }
    vec![Artifact::new(SCHEMA_PATH, out)]
}
