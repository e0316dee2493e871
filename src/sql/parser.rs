//! SQL parser - converts tokens into AST
//!
//! One parser instance handles exactly one statement; construct a fresh one
//! per parse call so a failed parse can never leak state into the next.

use super::ast::*;
use super::token::{Token, TokenType};
use crate::error::{Result, SqlError};
use crate::types::{ColumnDef, ColumnType, Value};

pub struct Parser {
    tokens: Vec<Token>,
    position: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            position: 0,
        }
    }

    /// Parse a single statement, optionally terminated by `;`. Anything
    /// left over after the terminator is a syntax error.
    pub fn parse(&mut self) -> Result<Statement> {
        let stmt = match &self.current().token_type {
            TokenType::Show => self.parse_show()?,
            TokenType::Create => Statement::CreateTable(self.parse_create_table()?),
            TokenType::Drop => Statement::DropTable(self.parse_drop_table()?),
            TokenType::Insert => Statement::Insert(self.parse_insert()?),
            TokenType::Select => Statement::Select(self.parse_select()?),
            TokenType::Update => Statement::Update(self.parse_update()?),
            TokenType::Delete => Statement::Delete(self.parse_delete()?),
            _ => {
                return Err(self.error(
                    "Expected SHOW, CREATE, DROP, INSERT, SELECT, UPDATE, or DELETE",
                ))
            }
        };

        self.match_token(TokenType::Semicolon);
        if !matches!(self.current().token_type, TokenType::Eof) {
            return Err(self.error("Unexpected trailing input after statement"));
        }

        Ok(stmt)
    }

    fn parse_show(&mut self) -> Result<Statement> {
        self.expect(TokenType::Show)?;
        self.expect(TokenType::Tables)?;
        Ok(Statement::ShowTables)
    }

    fn parse_create_table(&mut self) -> Result<CreateTableStmt> {
        self.expect(TokenType::Create)?;
        self.expect(TokenType::Table)?;

        let if_not_exists = if self.match_token(TokenType::If) {
            self.expect(TokenType::Not)?;
            self.expect(TokenType::Exists)?;
            true
        } else {
            false
        };

        let table = self.parse_identifier()?;
        self.expect(TokenType::LParen)?;
        let columns = self.parse_column_defs()?;
        self.expect(TokenType::RParen)?;

        Ok(CreateTableStmt {
            table,
            columns,
            if_not_exists,
        })
    }

    fn parse_column_defs(&mut self) -> Result<Vec<ColumnDef>> {
        let mut columns = Vec::new();

        loop {
            let name = self.parse_identifier()?;
            let col_type = self.parse_column_type()?;
            columns.push(ColumnDef::new(name, col_type));

            if !self.match_token(TokenType::Comma) {
                break;
            }
        }

        Ok(columns)
    }

    fn parse_column_type(&mut self) -> Result<ColumnType> {
        let col_type = match &self.current().token_type {
            TokenType::Int => ColumnType::Integer,
            TokenType::Float => ColumnType::Float,
            TokenType::Varchar => ColumnType::Text,
            _ => return Err(self.error("Expected column type (INT, FLOAT, or VARCHAR)")),
        };
        self.advance();
        Ok(col_type)
    }

    fn parse_drop_table(&mut self) -> Result<DropTableStmt> {
        self.expect(TokenType::Drop)?;
        self.expect(TokenType::Table)?;
        let table = self.parse_identifier()?;
        Ok(DropTableStmt { table })
    }

    fn parse_insert(&mut self) -> Result<InsertStmt> {
        self.expect(TokenType::Insert)?;
        self.expect(TokenType::Into)?;
        let table = self.parse_identifier()?;
        self.expect(TokenType::Values)?;

        let mut rows = Vec::new();
        loop {
            self.expect(TokenType::LParen)?;
            let row = self.parse_literal_list()?;
            self.expect(TokenType::RParen)?;
            rows.push(row);

            if !self.match_token(TokenType::Comma) {
                break;
            }
        }

        Ok(InsertStmt { table, rows })
    }

    fn parse_literal_list(&mut self) -> Result<Vec<Value>> {
        let mut values = Vec::new();
        loop {
            values.push(self.parse_literal()?);
            if !self.match_token(TokenType::Comma) {
                break;
            }
        }
        Ok(values)
    }

    fn parse_literal(&mut self) -> Result<Value> {
        let value = match &self.current().token_type {
            TokenType::IntNumber(i) => Value::Integer(*i),
            TokenType::FloatNumber(f) => Value::Float(*f),
            TokenType::String(s) => Value::Text(s.clone()),
            _ => return Err(self.error("Expected literal value")),
        };
        self.advance();
        Ok(value)
    }

    fn parse_select(&mut self) -> Result<SelectStmt> {
        self.expect(TokenType::Select)?;

        let projection = if self.match_token(TokenType::Star) {
            Projection::Star
        } else {
            Projection::Columns(self.parse_identifier_list()?)
        };

        self.expect(TokenType::From)?;
        let table = self.parse_identifier()?;

        let where_clause = if self.match_token(TokenType::Where) {
            Some(self.parse_condition()?)
        } else {
            None
        };

        Ok(SelectStmt {
            table,
            projection,
            where_clause,
        })
    }

    fn parse_update(&mut self) -> Result<UpdateStmt> {
        self.expect(TokenType::Update)?;
        let table = self.parse_identifier()?;
        self.expect(TokenType::Set)?;

        let mut assignments = Vec::new();
        loop {
            let column = self.parse_identifier()?;
            self.expect(TokenType::Eq)?;
            let expr = self.parse_expr()?;
            assignments.push((column, expr));

            if !self.match_token(TokenType::Comma) {
                break;
            }
        }

        let where_clause = if self.match_token(TokenType::Where) {
            Some(self.parse_condition()?)
        } else {
            None
        };

        Ok(UpdateStmt {
            table,
            assignments,
            where_clause,
        })
    }

    fn parse_delete(&mut self) -> Result<DeleteStmt> {
        self.expect(TokenType::Delete)?;
        self.expect(TokenType::From)?;
        let table = self.parse_identifier()?;

        let where_clause = if self.match_token(TokenType::Where) {
            Some(self.parse_condition()?)
        } else {
            None
        };

        Ok(DeleteStmt {
            table,
            where_clause,
        })
    }

    // Conditions
    //
    // condition  := and_cond ( OR and_cond )*
    // and_cond   := comparison ( AND comparison )*
    // comparison := '(' condition ')' | expr cmp_op expr

    fn parse_condition(&mut self) -> Result<Condition> {
        let mut left = self.parse_and_condition()?;

        while self.match_token(TokenType::Or) {
            let right = self.parse_and_condition()?;
            left = Condition::Or(Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_and_condition(&mut self) -> Result<Condition> {
        let mut left = self.parse_comparison()?;

        while self.match_token(TokenType::And) {
            let right = self.parse_comparison()?;
            left = Condition::And(Box::new(left), Box::new(right));
        }

        Ok(left)
    }

    fn parse_comparison(&mut self) -> Result<Condition> {
        // A leading '(' is ambiguous: it may group a condition or open a
        // parenthesized expression on the left side of a comparison. Try
        // the condition reading first and rewind on failure.
        if matches!(self.current().token_type, TokenType::LParen) {
            let checkpoint = self.position;
            self.advance();
            if let Ok(cond) = self.parse_condition() {
                if self.match_token(TokenType::RParen) {
                    return Ok(cond);
                }
            }
            self.position = checkpoint;
        }

        let left = self.parse_expr()?;
        let op = self.parse_cmp_op()?;
        let right = self.parse_expr()?;

        Ok(Condition::Compare { left, op, right })
    }

    fn parse_cmp_op(&mut self) -> Result<CmpOp> {
        let op = match &self.current().token_type {
            TokenType::Eq => CmpOp::Eq,
            TokenType::Ne => CmpOp::Ne,
            TokenType::Lt => CmpOp::Lt,
            TokenType::Gt => CmpOp::Gt,
            TokenType::Le => CmpOp::Le,
            TokenType::Ge => CmpOp::Ge,
            _ => return Err(self.error("Expected comparison operator")),
        };
        self.advance();
        Ok(op)
    }

    // Expressions
    //
    // expr   := term ( ('+' | '-') term )*
    // term   := factor ( ('*' | '/') factor )*
    // factor := literal | identifier | '(' expr ')'

    fn parse_expr(&mut self) -> Result<Expr> {
        let mut left = self.parse_term()?;

        loop {
            let op = match &self.current().token_type {
                TokenType::Plus => ArithOp::Add,
                TokenType::Minus => ArithOp::Sub,
                _ => break,
            };
            self.advance();
            let right = self.parse_term()?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_term(&mut self) -> Result<Expr> {
        let mut left = self.parse_factor()?;

        loop {
            let op = match &self.current().token_type {
                TokenType::Star => ArithOp::Mul,
                TokenType::Slash => ArithOp::Div,
                _ => break,
            };
            self.advance();
            let right = self.parse_factor()?;
            left = Expr::BinaryOp {
                left: Box::new(left),
                op,
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_factor(&mut self) -> Result<Expr> {
        match &self.current().token_type {
            TokenType::IntNumber(i) => {
                let i = *i;
                self.advance();
                Ok(Expr::Literal(Value::Integer(i)))
            }
            TokenType::FloatNumber(f) => {
                let f = *f;
                self.advance();
                Ok(Expr::Literal(Value::Float(f)))
            }
            TokenType::String(s) => {
                let s = s.clone();
                self.advance();
                Ok(Expr::Literal(Value::Text(s)))
            }
            TokenType::Identifier(_) => {
                let name = self.parse_identifier()?;
                Ok(Expr::Column(name))
            }
            TokenType::LParen => {
                self.advance();
                let expr = self.parse_expr()?;
                self.expect(TokenType::RParen)?;
                Ok(expr)
            }
            _ => Err(self.error("Expected expression")),
        }
    }

    // Helper methods

    fn parse_identifier(&mut self) -> Result<String> {
        if let TokenType::Identifier(name) = &self.current().token_type {
            let name = name.clone();
            self.advance();
            Ok(name)
        } else {
            Err(self.error("Expected identifier"))
        }
    }

    fn parse_identifier_list(&mut self) -> Result<Vec<String>> {
        let mut list = Vec::new();
        loop {
            list.push(self.parse_identifier()?);
            if !self.match_token(TokenType::Comma) {
                break;
            }
        }
        Ok(list)
    }

    fn current(&self) -> &Token {
        &self.tokens[self.position]
    }

    fn advance(&mut self) {
        if self.position < self.tokens.len() - 1 {
            self.position += 1;
        }
    }

    fn match_token(&mut self, token_type: TokenType) -> bool {
        if std::mem::discriminant(&self.current().token_type)
            == std::mem::discriminant(&token_type)
        {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, token_type: TokenType) -> Result<()> {
        if std::mem::discriminant(&self.current().token_type)
            == std::mem::discriminant(&token_type)
        {
            self.advance();
            Ok(())
        } else {
            Err(self.error(&format!("Expected {:?}", token_type)))
        }
    }

    fn error(&self, msg: &str) -> SqlError {
        let token = self.current();
        SqlError::Syntax(format!(
            "{} at line {} column {}",
            msg, token.line, token.column
        ))
    }
}
