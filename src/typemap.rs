//! Property type -> target type systems (SQL column, UI field).

use crate::config::{PropertyType, ScalarKind};
use std::fmt;

/// Width of string columns.
pub const VARCHAR_LENGTH: u16 = 255;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlType {
    Varchar(u16),
    Integer,
    /// Auto-increment integer, only used for the implicit key.
    Serial,
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SqlType::Varchar(n) => write!(f, "VARCHAR({})", n),
            SqlType::Integer => f.write_str("INTEGER"),
            SqlType::Serial => f.write_str("SERIAL"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UiType {
    String,
    Number,
}

impl fmt::Display for UiType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            UiType::String => "string",
            UiType::Number => "number",
        })
    }
}

impl PropertyType {
    /// References are stored as integer foreign keys.
    pub fn sql_type(&self) -> SqlType {
        match self {
            PropertyType::Scalar(ScalarKind::String) => SqlType::Varchar(VARCHAR_LENGTH),
            PropertyType::Scalar(ScalarKind::Number) | PropertyType::Reference(_) => SqlType::Integer,
        }
    }

    pub fn ui_type(&self) -> UiType {
        match self {
            PropertyType::Scalar(ScalarKind::String) => UiType::String,
            PropertyType::Scalar(ScalarKind::Number) | PropertyType::Reference(_) => UiType::Number,
        }
    }

    /// Numeric on the wire: form values are converted before posting.
    pub fn is_numeric(&self) -> bool {
        self.ui_type() == UiType::Number
    }
}
