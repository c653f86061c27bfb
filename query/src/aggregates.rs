//! Aggregate computation for query execution.
//!
//! This module contains the logic for computing aggregate functions
//! (COUNT, SUM, MIN, MAX) over grouped rows. Nulls never contribute: COUNT
//! of an expression skips them, and SUM/MIN/MAX over only nulls is null.

use fakebook_core::{Row, Value};
use std::collections::HashSet;

use crate::expr::Expr;
use crate::plan::AggregateKind;
use crate::{QueryError, QueryResult};

/// An aggregate whose argument has already been bound to the input columns.
#[derive(Debug, Clone)]
pub struct BoundAggregate {
    pub kind: AggregateKind,
    pub expr: Option<Expr>,
    pub distinct: bool,
}

impl BoundAggregate {
    /// Value produced for an empty, ungrouped input.
    pub fn empty_value(&self) -> Value {
        match self.kind {
            AggregateKind::Count => Value::Int(0),
            _ => Value::Null,
        }
    }
}

/// Compute an aggregate over a group of rows.
pub fn compute_aggregate(agg: &BoundAggregate, group: &[&Row]) -> QueryResult<Value> {
    let Some(expr) = &agg.expr else {
        return match agg.kind {
            AggregateKind::Count => Ok(Value::Int(group.len() as i64)),
            kind => Err(QueryError::type_error(format!(
                "{:?} requires an argument",
                kind
            ))),
        };
    };

    let mut values = Vec::with_capacity(group.len());
    for row in group {
        let value = expr.eval(row)?;
        if !value.is_null() {
            values.push(value);
        }
    }
    if agg.distinct {
        let mut seen = HashSet::new();
        values.retain(|v| seen.insert(v.clone()));
    }

    match agg.kind {
        AggregateKind::Count => Ok(Value::Int(values.len() as i64)),
        AggregateKind::Sum => compute_sum(&values),
        AggregateKind::Min => Ok(compute_extreme(values, std::cmp::Ordering::Less)),
        AggregateKind::Max => Ok(compute_extreme(values, std::cmp::Ordering::Greater)),
    }
}

/// Compute SUM aggregate.
fn compute_sum(values: &[Value]) -> QueryResult<Value> {
    if values.is_empty() {
        return Ok(Value::Null);
    }
    let mut sum = 0i64;
    for value in values {
        let Value::Int(i) = value else {
            return Err(QueryError::type_error(format!(
                "cannot sum {}",
                value.type_name()
            )));
        };
        sum = sum
            .checked_add(*i)
            .ok_or_else(|| QueryError::type_error("integer overflow"))?;
    }
    Ok(Value::Int(sum))
}

/// Compute MIN or MAX aggregate.
fn compute_extreme(values: Vec<Value>, target_order: std::cmp::Ordering) -> Value {
    let mut result: Option<Value> = None;
    for val in values {
        result = Some(match result {
            None => val,
            Some(current) => {
                if val.cmp_sortable(&current) == target_order {
                    val
                } else {
                    current
                }
            }
        });
    }
    result.unwrap_or(Value::Null)
}
