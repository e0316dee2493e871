//! Row evaluator - interprets expressions and conditions against rows
//!
//! Column lookups that miss yield a "missing" marker (`None`), never an
//! error; every comparison involving missing is false. AND and OR evaluate
//! both operands unconditionally, so an error (say, a division by zero) on
//! either branch always surfaces.

use super::ast::{ArithOp, CmpOp, Condition, Expr};
use crate::error::{Result, SqlError};
use crate::types::{SqlRow, Value};

pub struct ExprEvaluator;

impl ExprEvaluator {
    pub fn new() -> Self {
        Self
    }

    /// Evaluate an expression against a row. `None` means a column
    /// reference missed and the result is unknown.
    pub fn eval(&self, expr: &Expr, row: &SqlRow) -> Result<Option<Value>> {
        match expr {
            Expr::Literal(val) => Ok(Some(val.clone())),

            Expr::Column(name) => Ok(row.get(name).cloned()),

            Expr::BinaryOp { left, op, right } => {
                let left_val = self.eval(left, row)?;
                let right_val = self.eval(right, row)?;
                match (left_val, right_val) {
                    (Some(l), Some(r)) => Ok(Some(self.eval_arith(*op, l, r)?)),
                    // Missing propagates through arithmetic
                    _ => Ok(None),
                }
            }
        }
    }

    /// Evaluate a WHERE-clause condition against a row.
    pub fn eval_condition(&self, cond: &Condition, row: &SqlRow) -> Result<bool> {
        match cond {
            Condition::Compare { left, op, right } => {
                let left_val = self.eval(left, row)?;
                let right_val = self.eval(right, row)?;
                match (left_val, right_val) {
                    (Some(l), Some(r)) => Ok(self.compare(*op, &l, &r)),
                    // Any comparison against missing is false
                    _ => Ok(false),
                }
            }

            // Both operands are evaluated unconditionally; evaluators are
            // side-effect-free so only errors are observable either way.
            Condition::And(left, right) => {
                let l = self.eval_condition(left, row)?;
                let r = self.eval_condition(right, row)?;
                Ok(l && r)
            }

            Condition::Or(left, right) => {
                let l = self.eval_condition(left, row)?;
                let r = self.eval_condition(right, row)?;
                Ok(l || r)
            }
        }
    }

    fn eval_arith(&self, op: ArithOp, left: Value, right: Value) -> Result<Value> {
        match op {
            ArithOp::Add => self.add_values(left, right),
            ArithOp::Sub => self.sub_values(left, right),
            ArithOp::Mul => self.mul_values(left, right),
            ArithOp::Div => self.div_values(left, right),
        }
    }

    fn add_values(&self, left: Value, right: Value) -> Result<Value> {
        match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l + r)),
            (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l + r)),
            (Value::Integer(l), Value::Float(r)) => Ok(Value::Float(l as f64 + r)),
            (Value::Float(l), Value::Integer(r)) => Ok(Value::Float(l + r as f64)),
            _ => Err(SqlError::TypeError("cannot add these types".to_string())),
        }
    }

    fn sub_values(&self, left: Value, right: Value) -> Result<Value> {
        match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l - r)),
            (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l - r)),
            (Value::Integer(l), Value::Float(r)) => Ok(Value::Float(l as f64 - r)),
            (Value::Float(l), Value::Integer(r)) => Ok(Value::Float(l - r as f64)),
            _ => Err(SqlError::TypeError(
                "cannot subtract these types".to_string(),
            )),
        }
    }

    fn mul_values(&self, left: Value, right: Value) -> Result<Value> {
        match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => Ok(Value::Integer(l * r)),
            (Value::Float(l), Value::Float(r)) => Ok(Value::Float(l * r)),
            (Value::Integer(l), Value::Float(r)) => Ok(Value::Float(l as f64 * r)),
            (Value::Float(l), Value::Integer(r)) => Ok(Value::Float(l * r as f64)),
            _ => Err(SqlError::TypeError(
                "cannot multiply these types".to_string(),
            )),
        }
    }

    /// Division always promotes to Float, whatever the operand kinds.
    fn div_values(&self, left: Value, right: Value) -> Result<Value> {
        let (l, r) = match (left.as_f64(), right.as_f64()) {
            (Some(l), Some(r)) => (l, r),
            _ => {
                return Err(SqlError::TypeError("cannot divide these types".to_string()));
            }
        };
        if r == 0.0 {
            return Err(SqlError::DivisionByZero);
        }
        Ok(Value::Float(l / r))
    }

    /// Equality requires identical kinds; ordering compares numerics
    /// naturally (Integer against Float is allowed) and Text
    /// lexicographically. Ordering across numeric and Text is false.
    fn compare(&self, op: CmpOp, left: &Value, right: &Value) -> bool {
        match op {
            CmpOp::Eq => self.values_eq(left, right),
            CmpOp::Ne => !self.values_eq(left, right),
            CmpOp::Lt => self.values_cmp(left, right) == Some(std::cmp::Ordering::Less),
            CmpOp::Gt => self.values_cmp(left, right) == Some(std::cmp::Ordering::Greater),
            CmpOp::Le => matches!(
                self.values_cmp(left, right),
                Some(std::cmp::Ordering::Less) | Some(std::cmp::Ordering::Equal)
            ),
            CmpOp::Ge => matches!(
                self.values_cmp(left, right),
                Some(std::cmp::Ordering::Greater) | Some(std::cmp::Ordering::Equal)
            ),
        }
    }

    fn values_eq(&self, left: &Value, right: &Value) -> bool {
        match (left, right) {
            (Value::Integer(l), Value::Integer(r)) => l == r,
            (Value::Float(l), Value::Float(r)) => l == r,
            (Value::Text(l), Value::Text(r)) => l == r,
            // Values of different declared kinds are never equal
            _ => false,
        }
    }

    fn values_cmp(&self, left: &Value, right: &Value) -> Option<std::cmp::Ordering> {
        match (left, right) {
            (Value::Text(l), Value::Text(r)) => Some(l.cmp(r)),
            _ => {
                let l = left.as_f64()?;
                let r = right.as_f64()?;
                l.partial_cmp(&r)
            }
        }
    }
}

impl Default for ExprEvaluator {
    fn default() -> Self {
        Self::new()
    }
}
