//! Scalar expressions evaluated against a single row.
//!
//! Expressions reference columns by name. Before an operator evaluates an
//! expression it binds it against the operator's input columns, turning every
//! `Column` into a positional `Slot`. Evaluation follows SQL null semantics:
//! comparisons and arithmetic involving null yield null, and a filter keeps a
//! row only when its predicate is exactly true.

use fakebook_core::{CoreError, Row, Value};
use std::cmp::Ordering;

use crate::{QueryError, QueryResult};

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
    And,
    Or,
    Add,
    Sub,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
    IsNull,
    IsNotNull,
    Abs,
    /// Character length of a text value.
    Length,
}

/// A scalar expression.
#[derive(Debug, Clone)]
pub enum Expr {
    /// Column reference by name, either qualified (`U.USER_ID`) or bare.
    Column(String),
    /// Column reference by position, produced by [`Expr::bind`].
    Slot(usize),
    Literal(Value),
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },
}

/// Column reference.
pub fn col(name: impl Into<String>) -> Expr {
    Expr::Column(name.into())
}

/// Literal value.
pub fn lit(value: impl Into<Value>) -> Expr {
    Expr::Literal(value.into())
}

#[allow(clippy::should_implement_trait)]
impl Expr {
    fn binary(self, op: BinaryOp, right: Expr) -> Expr {
        Expr::Binary {
            op,
            left: Box::new(self),
            right: Box::new(right),
        }
    }

    fn unary(self, op: UnaryOp) -> Expr {
        Expr::Unary {
            op,
            operand: Box::new(self),
        }
    }

    pub fn eq(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Eq, right)
    }

    pub fn ne(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Ne, right)
    }

    pub fn lt(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Lt, right)
    }

    pub fn le(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Le, right)
    }

    pub fn gt(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Gt, right)
    }

    pub fn ge(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Ge, right)
    }

    pub fn and(self, right: Expr) -> Expr {
        self.binary(BinaryOp::And, right)
    }

    pub fn or(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Or, right)
    }

    pub fn add(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Add, right)
    }

    pub fn sub(self, right: Expr) -> Expr {
        self.binary(BinaryOp::Sub, right)
    }

    pub fn not(self) -> Expr {
        self.unary(UnaryOp::Not)
    }

    pub fn is_null(self) -> Expr {
        self.unary(UnaryOp::IsNull)
    }

    pub fn is_not_null(self) -> Expr {
        self.unary(UnaryOp::IsNotNull)
    }

    pub fn abs(self) -> Expr {
        self.unary(UnaryOp::Abs)
    }

    pub fn length(self) -> Expr {
        self.unary(UnaryOp::Length)
    }

    /// Resolve every column reference against `columns`.
    pub fn bind(&self, columns: &[String]) -> QueryResult<Expr> {
        match self {
            Expr::Column(name) => resolve_column(columns, name).map(Expr::Slot),
            Expr::Slot(_) | Expr::Literal(_) => Ok(self.clone()),
            Expr::Binary { op, left, right } => Ok(Expr::Binary {
                op: *op,
                left: Box::new(left.bind(columns)?),
                right: Box::new(right.bind(columns)?),
            }),
            Expr::Unary { op, operand } => Ok(Expr::Unary {
                op: *op,
                operand: Box::new(operand.bind(columns)?),
            }),
        }
    }

    /// Evaluate a bound expression against a row.
    pub fn eval(&self, row: &Row) -> QueryResult<Value> {
        match self {
            Expr::Column(name) => Err(QueryError::unbound_column(name)),
            Expr::Slot(index) => row.get(*index).cloned().ok_or_else(|| {
                CoreError::ColumnOutOfRange {
                    index: *index,
                    arity: row.arity(),
                }
                .into()
            }),
            Expr::Literal(value) => Ok(value.clone()),
            Expr::Binary { op, left, right } => {
                let l = left.eval(row)?;
                let r = right.eval(row)?;
                eval_binary(*op, l, r)
            }
            Expr::Unary { op, operand } => eval_unary(*op, operand.eval(row)?),
        }
    }

    /// Evaluate as a filter predicate: only `true` keeps the row.
    pub fn eval_predicate(&self, row: &Row) -> QueryResult<bool> {
        match self.eval(row)? {
            Value::Bool(b) => Ok(b),
            Value::Null => Ok(false),
            other => Err(QueryError::type_error(format!(
                "predicate evaluated to {}",
                other.type_name()
            ))),
        }
    }
}

/// Find a column by exact name, or by unqualified suffix when unambiguous.
pub fn resolve_column(columns: &[String], name: &str) -> QueryResult<usize> {
    let exact = positions(columns, |c| c == name);
    let candidates = if exact.is_empty() && !name.contains('.') {
        positions(columns, |c| c.rsplit('.').next() == Some(name))
    } else {
        exact
    };
    match candidates.as_slice() {
        [index] => Ok(*index),
        [] => Err(QueryError::unknown_column(name)),
        _ => Err(QueryError::ambiguous_column(name)),
    }
}

fn positions(columns: &[String], matches: impl Fn(&str) -> bool) -> Vec<usize> {
    columns
        .iter()
        .enumerate()
        .filter(|(_, c)| matches(c.as_str()))
        .map(|(index, _)| index)
        .collect()
}

fn as_logic(value: &Value) -> QueryResult<Option<bool>> {
    match value {
        Value::Bool(b) => Ok(Some(*b)),
        Value::Null => Ok(None),
        other => Err(QueryError::type_error(format!(
            "expected Bool, got {}",
            other.type_name()
        ))),
    }
}

fn eval_binary(op: BinaryOp, l: Value, r: Value) -> QueryResult<Value> {
    let compare = |accept: fn(Ordering) -> bool| -> Value {
        match l.sql_cmp(&r) {
            Some(ordering) => Value::Bool(accept(ordering)),
            None => Value::Null,
        }
    };

    match op {
        BinaryOp::Eq => Ok(compare(|o| o == Ordering::Equal)),
        BinaryOp::Ne => Ok(compare(|o| o != Ordering::Equal)),
        BinaryOp::Lt => Ok(compare(|o| o == Ordering::Less)),
        BinaryOp::Le => Ok(compare(|o| o != Ordering::Greater)),
        BinaryOp::Gt => Ok(compare(|o| o == Ordering::Greater)),
        BinaryOp::Ge => Ok(compare(|o| o != Ordering::Less)),
        BinaryOp::And => {
            let result = match (as_logic(&l)?, as_logic(&r)?) {
                (Some(false), _) | (_, Some(false)) => Some(false),
                (Some(true), Some(true)) => Some(true),
                _ => None,
            };
            Ok(result.into())
        }
        BinaryOp::Or => {
            let result = match (as_logic(&l)?, as_logic(&r)?) {
                (Some(true), _) | (_, Some(true)) => Some(true),
                (Some(false), Some(false)) => Some(false),
                _ => None,
            };
            Ok(result.into())
        }
        BinaryOp::Add | BinaryOp::Sub => match (&l, &r) {
            (Value::Null, _) | (_, Value::Null) => Ok(Value::Null),
            (Value::Int(a), Value::Int(b)) => {
                let result = if op == BinaryOp::Add {
                    a.checked_add(*b)
                } else {
                    a.checked_sub(*b)
                };
                result
                    .map(Value::Int)
                    .ok_or_else(|| QueryError::type_error("integer overflow"))
            }
            _ => Err(QueryError::type_error(format!(
                "cannot apply {:?} to {} and {}",
                op,
                l.type_name(),
                r.type_name()
            ))),
        },
    }
}

fn eval_unary(op: UnaryOp, value: Value) -> QueryResult<Value> {
    match op {
        UnaryOp::IsNull => Ok(Value::Bool(value.is_null())),
        UnaryOp::IsNotNull => Ok(Value::Bool(!value.is_null())),
        UnaryOp::Not => Ok(as_logic(&value)?.map(|b| !b).into()),
        UnaryOp::Abs => match value {
            Value::Null => Ok(Value::Null),
            Value::Int(i) => i
                .checked_abs()
                .map(Value::Int)
                .ok_or_else(|| QueryError::type_error("integer overflow")),
            other => Err(QueryError::type_error(format!(
                "cannot take abs of {}",
                other.type_name()
            ))),
        },
        UnaryOp::Length => match value {
            Value::Null => Ok(Value::Null),
            Value::Text(s) => Ok(Value::Int(s.chars().count() as i64)),
            other => Err(QueryError::type_error(format!(
                "cannot take length of {}",
                other.type_name()
            ))),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakebook_core::row;

    fn columns() -> Vec<String> {
        ["U.USER_ID", "U.FIRST_NAME", "F.USER_ID"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_resolve_column() {
        let columns = columns();

        assert_eq!(resolve_column(&columns, "U.USER_ID").unwrap(), 0);
        assert_eq!(resolve_column(&columns, "FIRST_NAME").unwrap(), 1);
        assert!(matches!(
            resolve_column(&columns, "USER_ID"),
            Err(QueryError::AmbiguousColumn { .. })
        ));
        assert!(matches!(
            resolve_column(&columns, "X.USER_ID"),
            Err(QueryError::UnknownColumn { .. })
        ));
    }

    #[test]
    fn test_unbound_column_fails_eval() {
        let result = col("A").eval(&row![1i64]);

        assert!(matches!(result, Err(QueryError::UnboundColumn { .. })));
    }

    #[test]
    fn test_comparison_with_null_is_not_true() {
        // GIVEN
        let columns = vec!["A".to_string(), "B".to_string()];
        let pred = col("A").eq(col("B")).bind(&columns).unwrap();

        // THEN
        assert!(!pred.eval_predicate(&row![Value::Null, Value::Null]).unwrap());
        assert!(!pred.eval_predicate(&row![1i64, Value::Null]).unwrap());
        assert!(pred.eval_predicate(&row![1i64, 1i64]).unwrap());
    }

    #[test]
    fn test_kleene_logic() {
        let t = lit(true);
        let n = lit(Value::Null);
        let f = lit(false);
        let empty = row![];

        assert_eq!(t.clone().and(n.clone()).eval(&empty).unwrap(), Value::Null);
        assert_eq!(f.clone().and(n.clone()).eval(&empty).unwrap(), Value::Bool(false));
        assert_eq!(t.clone().or(n.clone()).eval(&empty).unwrap(), Value::Bool(true));
        assert_eq!(f.or(n.clone()).eval(&empty).unwrap(), Value::Null);
        assert_eq!(n.not().eval(&empty).unwrap(), Value::Null);
    }

    #[test]
    fn test_year_gap_arithmetic() {
        // GIVEN
        let columns = vec!["Y1".to_string(), "Y2".to_string()];
        let gap = col("Y1").sub(col("Y2")).abs().bind(&columns).unwrap();

        // THEN
        assert_eq!(gap.eval(&row![1990i64, 2001i64]).unwrap(), Value::Int(11));
        assert_eq!(gap.eval(&row![1990i64, Value::Null]).unwrap(), Value::Null);
    }

    #[test]
    fn test_length_counts_characters() {
        let expr = lit("Zoë").length();

        assert_eq!(expr.eval(&row![]).unwrap(), Value::Int(3));
    }

    #[test]
    fn test_type_errors() {
        assert!(lit("a").sub(lit(1i64)).eval(&row![]).is_err());
        assert!(lit(1i64).eval_predicate(&row![]).is_err());
        assert!(lit(1i64).length().eval(&row![]).is_err());
    }
}
