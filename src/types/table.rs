//! Table schema definitions
use serde::{Deserialize, Serialize};

use crate::error::{Result, SqlError};
use crate::types::Value;

/// Declared column type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Float,
    Text,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Integer => write!(f, "int"),
            ColumnType::Float => write!(f, "float"),
            ColumnType::Text => write!(f, "varchar"),
        }
    }
}

/// Column definition: name plus declared type. Names are unique within a
/// table, enforced by `TableSchema::new`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnDef {
    pub name: String,
    pub col_type: ColumnType,
}

impl ColumnDef {
    pub fn new(name: impl Into<String>, col_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            col_type,
        }
    }
}

/// Table schema: name plus ordered column definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnDef>,
}

impl TableSchema {
    /// Build a schema, rejecting duplicate column names.
    pub fn new(name: impl Into<String>, columns: Vec<ColumnDef>) -> Result<Self> {
        let mut seen = std::collections::HashSet::new();
        for col in &columns {
            if !seen.insert(col.name.clone()) {
                return Err(SqlError::Syntax(format!(
                    "duplicate column '{}' in table definition",
                    col.name
                )));
            }
        }
        Ok(Self {
            name: name.into(),
            columns,
        })
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.col_type)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c.name == name)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Coerce a literal to a column's declared type. The only widening
    /// allowed is Integer -> Float; everything else must match exactly.
    pub fn coerce(&self, column: &ColumnDef, value: Value) -> Result<Value> {
        match (column.col_type, value) {
            (ColumnType::Integer, Value::Integer(i)) => Ok(Value::Integer(i)),
            (ColumnType::Float, Value::Float(f)) => Ok(Value::Float(f)),
            (ColumnType::Float, Value::Integer(i)) => Ok(Value::Float(i as f64)),
            (ColumnType::Text, Value::Text(s)) => Ok(Value::Text(s)),
            (expected, got) => Err(SqlError::TypeCoercion(format!(
                "cannot store {} value '{}' in column '{}' of type {}",
                got.column_type(),
                got,
                column.name,
                expected
            ))),
        }
    }
}
