//! In-memory table store
//!
//! The store is an owned object handed through the executor; there is no
//! module-level state, so isolated sessions and parallel tests each get
//! their own. It knows nothing about the grammar: predicates and update
//! computations come in as callables over rows.

use std::collections::HashMap;

use crate::error::{Result, SqlError};
use crate::types::{SqlRow, TableSchema, Value};

/// Row predicate, as the executor compiles it from a WHERE clause.
pub type RowPredicate<'a> = dyn Fn(&SqlRow) -> Result<bool> + 'a;

/// Per-row assignment computation for UPDATE: produces the new
/// (column, value) pairs for one row, before coercion.
pub type RowUpdate<'a> = dyn Fn(&SqlRow) -> Result<Vec<(String, Value)>> + 'a;

/// Outcome of `create_table` when the caller signals IF NOT EXISTS.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateOutcome {
    Created,
    /// Name was taken and IF NOT EXISTS downgraded the error to a warning.
    SkippedExisting,
}

#[derive(Debug, Clone)]
pub struct Table {
    pub schema: TableSchema,
    pub rows: Vec<SqlRow>,
}

/// All named tables of one session. Created empty, mutated by every
/// executed statement, discarded with the session.
#[derive(Debug, Default)]
pub struct TableStore {
    tables: HashMap<String, Table>,
    /// Creation order, for stable SHOW TABLES output.
    order: Vec<String>,
}

impl TableStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Table names in creation order.
    pub fn table_names(&self) -> Vec<String> {
        self.order.clone()
    }

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables
            .get_mut(name)
            .ok_or_else(|| SqlError::UnknownTable(name.to_string()))
    }

    pub fn create_table(&mut self, schema: TableSchema, if_not_exists: bool) -> Result<CreateOutcome> {
        if self.tables.contains_key(&schema.name) {
            if if_not_exists {
                return Ok(CreateOutcome::SkippedExisting);
            }
            return Err(SqlError::DuplicateTable(schema.name));
        }

        let name = schema.name.clone();
        self.tables.insert(
            name.clone(),
            Table {
                schema,
                rows: Vec::new(),
            },
        );
        self.order.push(name);
        Ok(CreateOutcome::Created)
    }

    pub fn drop_table(&mut self, name: &str) -> Result<Table> {
        let table = self
            .tables
            .remove(name)
            .ok_or_else(|| SqlError::UnknownTable(name.to_string()))?;
        self.order.retain(|n| n != name);
        Ok(table)
    }

    /// Append literal rows in submission order. Every row is coerced to the
    /// schema before any is appended, so a bad row leaves the table
    /// untouched.
    pub fn insert_rows(&mut self, name: &str, literal_rows: Vec<Vec<Value>>) -> Result<usize> {
        let table = self.table_mut(name)?;

        let mut coerced: Vec<SqlRow> = Vec::with_capacity(literal_rows.len());
        for literals in literal_rows {
            if literals.len() != table.schema.columns.len() {
                return Err(SqlError::TypeCoercion(format!(
                    "table '{}' has {} columns but {} values were supplied",
                    name,
                    table.schema.columns.len(),
                    literals.len()
                )));
            }
            let mut row = SqlRow::with_capacity(literals.len());
            for (column, value) in table.schema.columns.iter().zip(literals) {
                let value = table.schema.coerce(column, value)?;
                row.insert(column.name.clone(), value);
            }
            coerced.push(row);
        }

        let count = coerced.len();
        table.rows.extend(coerced);
        Ok(count)
    }

    /// Rows satisfying the predicate (all rows when absent), projected to
    /// the requested columns (`None` = every column, schema order), in
    /// original row order. Also returns the match count.
    pub fn select_rows(
        &self,
        name: &str,
        columns: Option<&[String]>,
        predicate: Option<&RowPredicate<'_>>,
    ) -> Result<(Vec<String>, Vec<Vec<Value>>)> {
        let table = self
            .tables
            .get(name)
            .ok_or_else(|| SqlError::UnknownTable(name.to_string()))?;

        let projected: Vec<String> = match columns {
            Some(cols) => {
                for col in cols {
                    if !table.schema.has_column(col) {
                        return Err(SqlError::UnknownColumn(col.clone()));
                    }
                }
                cols.to_vec()
            }
            None => table.schema.column_names(),
        };

        let mut rows = Vec::new();
        for row in &table.rows {
            let keep = match predicate {
                Some(pred) => pred(row)?,
                None => true,
            };
            if keep {
                let mut values = Vec::with_capacity(projected.len());
                for col in &projected {
                    let value = row
                        .get(col)
                        .cloned()
                        .ok_or_else(|| SqlError::UnknownColumn(col.clone()))?;
                    values.push(value);
                }
                rows.push(values);
            }
        }

        Ok((projected, rows))
    }

    /// Apply `update` to each row satisfying the predicate and coerce the
    /// new values to the column types. All replacement rows are computed
    /// before any is written, so a mid-statement failure (division by zero,
    /// coercion) leaves every row as it was.
    pub fn update_rows(
        &mut self,
        name: &str,
        update: &RowUpdate<'_>,
        predicate: Option<&RowPredicate<'_>>,
    ) -> Result<usize> {
        let table = self.table_mut(name)?;

        let mut staged: Vec<(usize, SqlRow)> = Vec::new();
        for (idx, row) in table.rows.iter().enumerate() {
            let touched = match predicate {
                Some(pred) => pred(row)?,
                None => true,
            };
            if !touched {
                continue;
            }

            let mut new_row = row.clone();
            for (column_name, value) in update(row)? {
                let column = table
                    .schema
                    .columns
                    .iter()
                    .find(|c| c.name == column_name)
                    .ok_or_else(|| SqlError::UnknownColumn(column_name.clone()))?
                    .clone();
                let value = table.schema.coerce(&column, value)?;
                new_row.insert(column_name, value);
            }
            staged.push((idx, new_row));
        }

        let count = staged.len();
        for (idx, new_row) in staged {
            table.rows[idx] = new_row;
        }
        Ok(count)
    }

    /// Remove rows satisfying the predicate (all rows when absent). The
    /// match set is computed before any removal.
    pub fn delete_rows(
        &mut self,
        name: &str,
        predicate: Option<&RowPredicate<'_>>,
    ) -> Result<usize> {
        let table = self.table_mut(name)?;

        let mut keep: Vec<bool> = Vec::with_capacity(table.rows.len());
        for row in &table.rows {
            let matched = match predicate {
                Some(pred) => pred(row)?,
                None => true,
            };
            keep.push(!matched);
        }

        let removed = keep.iter().filter(|k| !**k).count();
        let mut idx = 0;
        table.rows.retain(|_| {
            let kept = keep[idx];
            idx += 1;
            kept
        });
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ColumnDef, ColumnType};

    fn schema(name: &str) -> TableSchema {
        TableSchema::new(
            name,
            vec![
                ColumnDef::new("id", ColumnType::Integer),
                ColumnDef::new("tag", ColumnType::Text),
            ],
        )
        .unwrap()
    }

    fn seeded_store() -> TableStore {
        let mut store = TableStore::new();
        store.create_table(schema("t"), false).unwrap();
        store
            .insert_rows(
                "t",
                vec![
                    vec![Value::Integer(1), Value::Text("a".into())],
                    vec![Value::Integer(2), Value::Text("b".into())],
                ],
            )
            .unwrap();
        store
    }

    #[test]
    fn test_create_duplicate_fails() {
        let mut store = TableStore::new();
        store.create_table(schema("t"), false).unwrap();
        assert_eq!(
            store.create_table(schema("t"), false),
            Err(SqlError::DuplicateTable("t".into()))
        );
        // IF NOT EXISTS downgrades to a warning-level no-op
        assert_eq!(
            store.create_table(schema("t"), true).unwrap(),
            CreateOutcome::SkippedExisting
        );
        assert_eq!(store.table_names(), vec!["t".to_string()]);
    }

    #[test]
    fn test_table_names_in_creation_order() {
        let mut store = TableStore::new();
        store.create_table(schema("b"), false).unwrap();
        store.create_table(schema("a"), false).unwrap();
        assert_eq!(store.table_names(), vec!["b".to_string(), "a".to_string()]);
        store.drop_table("b").unwrap();
        assert_eq!(store.table_names(), vec!["a".to_string()]);
    }

    #[test]
    fn test_drop_unknown_table() {
        let mut store = TableStore::new();
        assert_eq!(
            store.drop_table("ghost").unwrap_err(),
            SqlError::UnknownTable("ghost".into())
        );
    }

    #[test]
    fn test_insert_preserves_order_and_types() {
        let store = seeded_store();
        let (cols, rows) = store.select_rows("t", None, None).unwrap();
        assert_eq!(cols, vec!["id".to_string(), "tag".to_string()]);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0], vec![Value::Integer(1), Value::Text("a".into())]);
        assert_eq!(rows[1], vec![Value::Integer(2), Value::Text("b".into())]);
    }

    #[test]
    fn test_insert_bad_row_is_atomic() {
        let mut store = seeded_store();
        let err = store
            .insert_rows(
                "t",
                vec![
                    vec![Value::Integer(3), Value::Text("c".into())],
                    vec![Value::Text("oops".into()), Value::Text("d".into())],
                ],
            )
            .unwrap_err();
        assert!(matches!(err, SqlError::TypeCoercion(_)));
        // The good leading row must not have been appended
        let (_, rows) = store.select_rows("t", None, None).unwrap();
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn test_insert_arity_mismatch() {
        let mut store = seeded_store();
        assert!(store
            .insert_rows("t", vec![vec![Value::Integer(3)]])
            .is_err());
    }

    #[test]
    fn test_select_projection_unknown_column() {
        let store = seeded_store();
        assert_eq!(
            store
                .select_rows("t", Some(&["ghost".to_string()]), None)
                .unwrap_err(),
            SqlError::UnknownColumn("ghost".into())
        );
    }

    fn id_gt_1(row: &SqlRow) -> Result<bool> {
        Ok(matches!(row.get("id"), Some(Value::Integer(i)) if *i > 1))
    }

    fn id_is_1(row: &SqlRow) -> Result<bool> {
        Ok(matches!(row.get("id"), Some(Value::Integer(1))))
    }

    fn id_is_2(row: &SqlRow) -> Result<bool> {
        Ok(matches!(row.get("id"), Some(Value::Integer(2))))
    }

    #[test]
    fn test_select_with_predicate() {
        let store = seeded_store();
        let (cols, rows) = store
            .select_rows("t", Some(&["tag".to_string()]), Some(&id_gt_1))
            .unwrap();
        assert_eq!(cols, vec!["tag".to_string()]);
        assert_eq!(rows, vec![vec![Value::Text("b".into())]]);
    }

    fn set_tag_x(_row: &SqlRow) -> Result<Vec<(String, Value)>> {
        Ok(vec![("tag".to_string(), Value::Text("x".into()))])
    }

    #[test]
    fn test_update_counts_and_applies() {
        let mut store = seeded_store();
        let touched = store.update_rows("t", &set_tag_x, Some(&id_is_2)).unwrap();
        assert_eq!(touched, 1);

        let (_, rows) = store.select_rows("t", None, None).unwrap();
        assert_eq!(rows[0][1], Value::Text("a".into()));
        assert_eq!(rows[1][1], Value::Text("x".into()));
    }

    #[test]
    fn test_update_coercion_failure_is_atomic() {
        let mut store = seeded_store();
        // Second matching row fails coercion; the first must not stick
        fn update(row: &SqlRow) -> Result<Vec<(String, Value)>> {
            let id = match row.get("id") {
                Some(Value::Integer(i)) => *i,
                _ => 0,
            };
            if id == 1 {
                Ok(vec![("tag".to_string(), Value::Text("ok".into()))])
            } else {
                Ok(vec![("tag".to_string(), Value::Integer(9))])
            }
        }
        assert!(store.update_rows("t", &update, None).is_err());
        let (_, rows) = store.select_rows("t", None, None).unwrap();
        assert_eq!(rows[0][1], Value::Text("a".into()));
        assert_eq!(rows[1][1], Value::Text("b".into()));
    }

    #[test]
    fn test_update_unknown_column() {
        let mut store = seeded_store();
        fn update(_row: &SqlRow) -> Result<Vec<(String, Value)>> {
            Ok(vec![("ghost".to_string(), Value::Integer(1))])
        }
        assert_eq!(
            store.update_rows("t", &update, None).unwrap_err(),
            SqlError::UnknownColumn("ghost".into())
        );
    }

    #[test]
    fn test_delete_with_predicate() {
        let mut store = seeded_store();
        assert_eq!(store.delete_rows("t", Some(&id_is_1)).unwrap(), 1);
        let (_, rows) = store.select_rows("t", None, None).unwrap();
        assert_eq!(rows, vec![vec![Value::Integer(2), Value::Text("b".into())]]);
    }

    #[test]
    fn test_delete_all() {
        let mut store = seeded_store();
        assert_eq!(store.delete_rows("t", None).unwrap(), 2);
        let (_, rows) = store.select_rows("t", None, None).unwrap();
        assert!(rows.is_empty());
    }
}
