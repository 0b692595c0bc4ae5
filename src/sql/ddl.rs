//! CREATE TABLE statements built from the resolved property set.

use crate::config::{ResolvedEntity, ID_COLUMN};
use crate::typemap::SqlType;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: String,
    pub ty: SqlType,
    pub primary_key: bool,
}

impl fmt::Display for ColumnDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.ty)?;
        if self.primary_key {
            f.write_str(" PRIMARY KEY")?;
        }
        Ok(())
    }
}

/// One table per entity: persisted properties in declaration order, then the `id` key.
/// No foreign-key constraints or indexes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CreateTable {
    pub table: String,
    pub columns: Vec<ColumnDef>,
}

impl CreateTable {
    pub fn for_entity(entity: &ResolvedEntity) -> Self {
        let mut columns: Vec<ColumnDef> = entity
            .persisted()
            .map(|p| ColumnDef {
                name: p.name.clone(),
                ty: p.ty.sql_type(),
                primary_key: false,
            })
            .collect();
        columns.push(ColumnDef {
            name: ID_COLUMN.to_string(),
            ty: SqlType::Serial,
            primary_key: true,
        });
        CreateTable {
            table: entity.name.clone(),
            columns,
        }
    }
}

impl fmt::Display for CreateTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols = self
            .columns
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "CREATE TABLE {} ({});", self.table, cols)
    }
}
