//! Utility types for data operations

use std::fmt;

/// Column type information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnType {
    Int,
    Float,
    String,
    Timestamp,
}

impl ColumnType {
    /// Check if type is text
    pub fn is_string(&self) -> bool {
        matches!(self, ColumnType::String)
    }

    /// Type name used in errors and dtype strings
    pub fn name(&self) -> &'static str {
        match self {
            ColumnType::Int => "int64",
            ColumnType::Float => "float64",
            ColumnType::String => "string",
            ColumnType::Timestamp => "datetime",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
