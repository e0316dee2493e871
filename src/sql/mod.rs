//! The SQL engine: lexer, parser, evaluator, executor
//!
//! Pipeline: text -> tokens -> statement -> store mutation/query -> result.
//! A fresh lexer and parser are constructed per statement, so a failed
//! parse cannot leak state into the next call.

pub mod ast;
pub mod evaluator;
pub mod executor;
pub mod lexer;
pub mod parser;
pub mod token;

pub use ast::{Condition, Expr, Projection, Statement};
pub use evaluator::ExprEvaluator;
pub use executor::{QueryExecutor, QueryResult};
pub use lexer::{LexDiagnostic, Lexer};
pub use parser::Parser;
pub use token::{Token, TokenType};

use crate::error::Result;
use crate::store::TableStore;

/// Parse and execute a single statement against the session store.
pub fn execute_sql(store: &mut TableStore, sql: &str) -> Result<QueryResult> {
    let mut lexer = Lexer::new(sql);
    let tokens = lexer.tokenize()?;
    let mut parser = Parser::new(tokens);
    let statement = parser.parse()?;
    let mut executor = QueryExecutor::new(store);
    executor.execute(statement)
}
