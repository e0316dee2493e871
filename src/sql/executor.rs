//! Statement executor - dispatches parsed statements to store operations
use super::ast::*;
use super::evaluator::ExprEvaluator;
use crate::error::{Result, SqlError};
use crate::store::{CreateOutcome, TableStore};
use crate::types::{TableSchema, Value};

/// Result of one executed statement.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    /// SELECT / SHOW TABLES result: a table slice plus (implicitly) its
    /// row count.
    Select {
        columns: Vec<String>,
        rows: Vec<Vec<Value>>,
    },

    /// CREATE/DROP/INSERT/UPDATE/DELETE result. `warnings` is 1 exactly
    /// when CREATE TABLE IF NOT EXISTS hit an existing name.
    Modification {
        affected_rows: usize,
        warnings: usize,
    },
}

impl QueryResult {
    pub fn affected_rows(&self) -> usize {
        match self {
            QueryResult::Modification { affected_rows, .. } => *affected_rows,
            _ => 0,
        }
    }

    pub fn row_count(&self) -> usize {
        match self {
            QueryResult::Select { rows, .. } => rows.len(),
            QueryResult::Modification { affected_rows, .. } => *affected_rows,
        }
    }
}

/// Borrows the session store for the duration of one statement.
pub struct QueryExecutor<'a> {
    store: &'a mut TableStore,
    evaluator: ExprEvaluator,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(store: &'a mut TableStore) -> Self {
        Self {
            store,
            evaluator: ExprEvaluator::new(),
        }
    }

    pub fn execute(&mut self, statement: Statement) -> Result<QueryResult> {
        tracing::debug!(?statement, "executing statement");
        match statement {
            Statement::ShowTables => self.execute_show_tables(),
            Statement::CreateTable(stmt) => self.execute_create_table(stmt),
            Statement::DropTable(stmt) => self.execute_drop_table(stmt),
            Statement::Insert(stmt) => self.execute_insert(stmt),
            Statement::Select(stmt) => self.execute_select(stmt),
            Statement::Update(stmt) => self.execute_update(stmt),
            Statement::Delete(stmt) => self.execute_delete(stmt),
        }
    }

    fn execute_show_tables(&mut self) -> Result<QueryResult> {
        let rows = self
            .store
            .table_names()
            .into_iter()
            .map(|name| vec![Value::Text(name)])
            .collect();
        Ok(QueryResult::Select {
            columns: vec!["Tables".to_string()],
            rows,
        })
    }

    fn execute_create_table(&mut self, stmt: CreateTableStmt) -> Result<QueryResult> {
        let schema = TableSchema::new(stmt.table, stmt.columns)?;
        let outcome = self.store.create_table(schema, stmt.if_not_exists)?;
        let warnings = match outcome {
            CreateOutcome::Created => 0,
            CreateOutcome::SkippedExisting => 1,
        };
        Ok(QueryResult::Modification {
            affected_rows: 0,
            warnings,
        })
    }

    fn execute_drop_table(&mut self, stmt: DropTableStmt) -> Result<QueryResult> {
        self.store.drop_table(&stmt.table)?;
        Ok(QueryResult::Modification {
            affected_rows: 0,
            warnings: 0,
        })
    }

    fn execute_insert(&mut self, stmt: InsertStmt) -> Result<QueryResult> {
        let affected_rows = self.store.insert_rows(&stmt.table, stmt.rows)?;
        Ok(QueryResult::Modification {
            affected_rows,
            warnings: 0,
        })
    }

    fn execute_select(&mut self, stmt: SelectStmt) -> Result<QueryResult> {
        let columns = match &stmt.projection {
            Projection::Star => None,
            Projection::Columns(cols) => Some(cols.as_slice()),
        };

        let evaluator = &self.evaluator;
        let (columns, rows) = match &stmt.where_clause {
            Some(cond) => {
                let pred = |row: &crate::types::SqlRow| evaluator.eval_condition(cond, row);
                self.store.select_rows(&stmt.table, columns, Some(&pred))?
            }
            None => self.store.select_rows(&stmt.table, columns, None)?,
        };

        Ok(QueryResult::Select { columns, rows })
    }

    fn execute_update(&mut self, stmt: UpdateStmt) -> Result<QueryResult> {
        let evaluator = &self.evaluator;
        let assignments = &stmt.assignments;

        // The right-hand side of each assignment sees the current row, so
        // `SET x = x + 1` reads that row's x.
        let update = |row: &crate::types::SqlRow| {
            let mut values = Vec::with_capacity(assignments.len());
            for (column, expr) in assignments {
                match evaluator.eval(expr, row)? {
                    Some(value) => values.push((column.clone(), value)),
                    // A SET expression that resolves to missing has no
                    // value to store; there is no NULL in this engine.
                    None => {
                        return Err(SqlError::TypeError(format!(
                            "SET expression for column '{}' references a missing column",
                            column
                        )))
                    }
                }
            }
            Ok(values)
        };

        let affected_rows = match &stmt.where_clause {
            Some(cond) => {
                let pred = |row: &crate::types::SqlRow| evaluator.eval_condition(cond, row);
                self.store.update_rows(&stmt.table, &update, Some(&pred))?
            }
            None => self.store.update_rows(&stmt.table, &update, None)?,
        };

        Ok(QueryResult::Modification {
            affected_rows,
            warnings: 0,
        })
    }

    fn execute_delete(&mut self, stmt: DeleteStmt) -> Result<QueryResult> {
        let evaluator = &self.evaluator;
        let affected_rows = match &stmt.where_clause {
            Some(cond) => {
                let pred = |row: &crate::types::SqlRow| evaluator.eval_condition(cond, row);
                self.store.delete_rows(&stmt.table, Some(&pred))?
            }
            None => self.store.delete_rows(&stmt.table, None)?,
        };

        Ok(QueryResult::Modification {
            affected_rows,
            warnings: 0,
        })
    }
}
