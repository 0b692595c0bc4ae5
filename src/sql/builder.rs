//! Builds the SELECT and INSERT text embedded in the generated data-access layer.

use crate::config::{ResolvedEntity, ID_COLUMN};

/// Positional placeholder of the generated driver (psycopg2).
pub const PLACEHOLDER: &str = "%s";

/// Statements for one entity. SELECT order, row mapping and INSERT order all come from `columns`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EntityQueries {
    pub table: String,
    /// Resolved property set, declaration order.
    pub columns: Vec<String>,
}

impl EntityQueries {
    pub fn for_entity(entity: &ResolvedEntity) -> Self {
        EntityQueries {
            table: entity.name.clone(),
            columns: entity.persisted().map(|p| p.name.clone()).collect(),
        }
    }

    /// `id` followed by every persisted column; row index i maps to entry i.
    pub fn select_columns(&self) -> Vec<&str> {
        std::iter::once(ID_COLUMN)
            .chain(self.columns.iter().map(String::as_str))
            .collect()
    }

    fn select_column_list(&self) -> String {
        self.select_columns().join(", ")
    }

    pub fn select_list(&self) -> String {
        format!("SELECT {} FROM {}", self.select_column_list(), self.table)
    }

    /// Caller binds the id as the sole param.
    pub fn select_by_id(&self) -> String {
        format!(
            "SELECT {} FROM {} WHERE {} = {}",
            self.select_column_list(),
            self.table,
            ID_COLUMN,
            PLACEHOLDER
        )
    }

    /// Params bind `columns` in order. An entity without persisted columns inserts defaults only.
    pub fn insert(&self) -> String {
        if self.columns.is_empty() {
            return format!("INSERT INTO {} DEFAULT VALUES RETURNING {}", self.table, ID_COLUMN);
        }
        let placeholders = vec![PLACEHOLDER; self.columns.len()].join(", ");
        format!(
            "INSERT INTO {} ({}) VALUES ({}) RETURNING {}",
            self.table,
            self.columns.join(", "),
            placeholders,
            ID_COLUMN
        )
    }
}
