//! tinysql - a tiny interactive SQL-subset engine
//!
//! Single textual statements are executed against named, typed, in-memory
//! tables. Supported forms: SHOW TABLES, CREATE TABLE [IF NOT EXISTS],
//! DROP TABLE, INSERT, SELECT (with WHERE), UPDATE, DELETE.
//!
//! ## Architecture
//! - Lexer: tokenizes statement text, recovering from bad characters
//! - Parser: builds the statement/expression/condition AST
//! - Evaluator: interprets expressions and conditions against rows
//! - Store: owns the named tables and the mutation primitives
//! - Executor: dispatches statements to the store and shapes results
//!
//! The engine is fully synchronous and single-threaded; embed the
//! [`TableStore`] behind your own lock if the host is concurrent.
//!
//! ```
//! use tinysql::{execute_sql, TableStore};
//!
//! let mut store = TableStore::new();
//! execute_sql(&mut store, "CREATE TABLE t (id INT, tag VARCHAR);").unwrap();
//! execute_sql(&mut store, "INSERT INTO t VALUES (1, 'a'), (2, 'b');").unwrap();
//! let result = execute_sql(&mut store, "SELECT tag FROM t WHERE id > 1;").unwrap();
//! assert_eq!(result.row_count(), 1);
//! ```

pub mod error;
pub mod render;
pub mod sql;
pub mod store;
pub mod types;

pub use error::{Result, SqlError};
pub use sql::{execute_sql, QueryExecutor, QueryResult};
pub use store::TableStore;
pub use types::{ColumnDef, ColumnType, SqlRow, TableSchema, Value};
