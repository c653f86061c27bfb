//! Plan operator execution.
//!
//! This module contains the execution logic for each query plan operator.
//! Every operator consumes the fully materialized output of its inputs and
//! produces a new [`QueryResults`].

use fakebook_core::{Row, Value};
use fakebook_store::Database;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};

use crate::aggregates::{compute_aggregate, BoundAggregate};
use crate::expr::Expr;
use crate::plan::{AggregateSpec, JoinKind, PlanOp, SortKey};
use crate::result::QueryResults;
use crate::{QueryError, QueryResult};

/// Operator executor context.
///
/// Holds references needed during operator execution.
pub struct OperatorContext<'d> {
    pub database: &'d Database,
}

impl<'d> OperatorContext<'d> {
    /// Create a new operator context.
    pub fn new(database: &'d Database) -> Self {
        Self { database }
    }

    /// Execute a plan operator.
    pub fn execute_op(&self, op: &PlanOp) -> QueryResult<QueryResults> {
        match op {
            PlanOp::Scan { table, alias } => self.execute_scan(table, alias),

            PlanOp::Filter { input, predicate } => self.execute_filter(input, predicate),

            PlanOp::Project { input, projections } => self.execute_project(input, projections),

            PlanOp::Join {
                left,
                right,
                kind,
                on,
            } => self.execute_join(left, right, *kind, on),

            PlanOp::Union { left, right, all } => self.execute_union(left, right, *all),

            PlanOp::Aggregate {
                input,
                group_by,
                aggregates,
            } => self.execute_aggregate(input, group_by, aggregates),

            PlanOp::Sort { input, order_by } => self.execute_sort(input, order_by),

            PlanOp::LimitOffset {
                input,
                limit,
                offset,
            } => self.execute_limit_offset(input, *limit, *offset),

            PlanOp::Distinct { input } => self.execute_distinct(input),
        }
    }

    fn execute_scan(&self, table: &str, alias: &str) -> QueryResult<QueryResults> {
        let table = self
            .database
            .table(table)
            .ok_or_else(|| QueryError::unknown_table(table))?;

        let columns = table
            .columns()
            .iter()
            .map(|c| format!("{}.{}", alias, c))
            .collect();

        Ok(QueryResults::from_rows(columns, table.rows().to_vec()))
    }

    fn execute_filter(&self, input: &PlanOp, predicate: &Expr) -> QueryResult<QueryResults> {
        let (columns, rows) = self.execute_op(input)?.into_parts();
        let predicate = predicate.bind(&columns)?;

        let mut results = QueryResults::with_columns(columns);
        for row in rows {
            if predicate.eval_predicate(&row)? {
                results.push(row);
            }
        }

        Ok(results)
    }

    fn execute_project(
        &self,
        input: &PlanOp,
        projections: &[(String, Expr)],
    ) -> QueryResult<QueryResults> {
        let (columns, rows) = self.execute_op(input)?.into_parts();
        let bound = projections
            .iter()
            .map(|(_, expr)| expr.bind(&columns))
            .collect::<QueryResult<Vec<_>>>()?;

        let names = projections.iter().map(|(name, _)| name.clone()).collect();
        let mut results = QueryResults::with_columns(names);
        for row in rows {
            let values = bound
                .iter()
                .map(|expr| expr.eval(&row))
                .collect::<QueryResult<Vec<_>>>()?;
            results.push(Row::new(values));
        }

        Ok(results)
    }

    fn execute_join(
        &self,
        left: &PlanOp,
        right: &PlanOp,
        kind: JoinKind,
        on: &[(Expr, Expr)],
    ) -> QueryResult<QueryResults> {
        let (left_columns, left_rows) = self.execute_op(left)?.into_parts();
        let (right_columns, right_rows) = self.execute_op(right)?.into_parts();

        let mut left_keys = Vec::with_capacity(on.len());
        let mut right_keys = Vec::with_capacity(on.len());
        for (l, r) in on {
            left_keys.push(l.bind(&left_columns)?);
            right_keys.push(r.bind(&right_columns)?);
        }

        // Build side: right rows by key, preserving row order per key.
        // Rows with a null key component never match.
        let mut table: HashMap<Vec<Value>, Vec<usize>> = HashMap::new();
        for (index, row) in right_rows.iter().enumerate() {
            if let Some(key) = join_key(&right_keys, row)? {
                table.entry(key).or_default().push(index);
            }
        }

        let right_arity = right_columns.len();
        let columns = match kind {
            JoinKind::Anti => left_columns,
            JoinKind::Inner | JoinKind::LeftOuter => {
                let mut columns = left_columns;
                columns.extend(right_columns);
                columns
            }
        };

        let mut results = QueryResults::with_columns(columns);
        for row in &left_rows {
            let matches: &[usize] = match join_key(&left_keys, row)? {
                Some(key) => table.get(&key).map(Vec::as_slice).unwrap_or(&[]),
                None => &[],
            };

            match kind {
                JoinKind::Inner => {
                    for &index in matches {
                        results.push(row.concat(&right_rows[index]));
                    }
                }
                JoinKind::LeftOuter => {
                    if matches.is_empty() {
                        results.push(row.pad_nulls(right_arity));
                    }
                    for &index in matches {
                        results.push(row.concat(&right_rows[index]));
                    }
                }
                JoinKind::Anti => {
                    if matches.is_empty() {
                        results.push(row.clone());
                    }
                }
            }
        }

        Ok(results)
    }

    fn execute_union(&self, left: &PlanOp, right: &PlanOp, all: bool) -> QueryResult<QueryResults> {
        let (columns, left_rows) = self.execute_op(left)?.into_parts();
        let (right_columns, right_rows) = self.execute_op(right)?.into_parts();
        if columns.len() != right_columns.len() {
            return Err(QueryError::ArityMismatch {
                expected: columns.len(),
                actual: right_columns.len(),
            });
        }

        let rows = left_rows.into_iter().chain(right_rows);
        let rows: Vec<Row> = if all {
            rows.collect()
        } else {
            dedup_rows(rows)
        };

        Ok(QueryResults::from_rows(columns, rows))
    }

    fn execute_aggregate(
        &self,
        input: &PlanOp,
        group_by: &[(String, Expr)],
        aggregates: &[AggregateSpec],
    ) -> QueryResult<QueryResults> {
        let (columns, rows) = self.execute_op(input)?.into_parts();

        let group_exprs = group_by
            .iter()
            .map(|(_, expr)| expr.bind(&columns))
            .collect::<QueryResult<Vec<_>>>()?;
        let bound_aggs = aggregates
            .iter()
            .map(|agg| -> QueryResult<BoundAggregate> {
                Ok(BoundAggregate {
                    kind: agg.kind,
                    expr: agg.expr.as_ref().map(|e| e.bind(&columns)).transpose()?,
                    distinct: agg.distinct,
                })
            })
            .collect::<QueryResult<Vec<_>>>()?;

        let names: Vec<String> = group_by
            .iter()
            .map(|(name, _)| name.clone())
            .chain(aggregates.iter().map(|agg| agg.name.clone()))
            .collect();
        let mut output = QueryResults::with_columns(names);

        if group_by.is_empty() && rows.is_empty() {
            // Empty input with no grouping returns single row with defaults
            let values = bound_aggs.iter().map(BoundAggregate::empty_value).collect();
            output.push(Row::new(values));
            return Ok(output);
        }

        // Groups in order of first appearance; null keys form their own group.
        let mut group_index: HashMap<Vec<Value>, usize> = HashMap::new();
        let mut groups: Vec<(Vec<Value>, Vec<&Row>)> = Vec::new();
        for row in &rows {
            let key = group_exprs
                .iter()
                .map(|expr| expr.eval(row))
                .collect::<QueryResult<Vec<_>>>()?;
            match group_index.get(&key) {
                Some(&index) => groups[index].1.push(row),
                None => {
                    group_index.insert(key.clone(), groups.len());
                    groups.push((key, vec![row]));
                }
            }
        }

        for (key, group) in groups {
            let mut row_values = key;
            for agg in &bound_aggs {
                row_values.push(compute_aggregate(agg, &group)?);
            }
            output.push(Row::new(row_values));
        }

        Ok(output)
    }

    fn execute_sort(&self, input: &PlanOp, order_by: &[SortKey]) -> QueryResult<QueryResults> {
        let (columns, rows) = self.execute_op(input)?.into_parts();
        let keys = order_by
            .iter()
            .map(|key| -> QueryResult<(Expr, bool, bool)> {
                Ok((key.expr.bind(&columns)?, key.ascending, key.nulls_first))
            })
            .collect::<QueryResult<Vec<_>>>()?;

        // Evaluate sort keys once per row, then stable-sort.
        let mut decorated = Vec::with_capacity(rows.len());
        for row in rows {
            let values = keys
                .iter()
                .map(|(expr, _, _)| expr.eval(&row))
                .collect::<QueryResult<Vec<_>>>()?;
            decorated.push((values, row));
        }

        decorated.sort_by(|(a, _), (b, _)| {
            for ((a_val, b_val), (_, ascending, nulls_first)) in a.iter().zip(b).zip(&keys) {
                let cmp = compare_sort_values(a_val, b_val, *ascending, *nulls_first);
                if cmp != Ordering::Equal {
                    return cmp;
                }
            }
            Ordering::Equal
        });

        let rows = decorated.into_iter().map(|(_, row)| row).collect();
        Ok(QueryResults::from_rows(columns, rows))
    }

    fn execute_limit_offset(
        &self,
        input: &PlanOp,
        limit: Option<usize>,
        offset: Option<usize>,
    ) -> QueryResult<QueryResults> {
        let (columns, rows) = self.execute_op(input)?.into_parts();

        let start = offset.unwrap_or(0);
        let take = limit.unwrap_or(usize::MAX);

        let rows = rows.into_iter().skip(start).take(take).collect();
        Ok(QueryResults::from_rows(columns, rows))
    }

    fn execute_distinct(&self, input: &PlanOp) -> QueryResult<QueryResults> {
        let (columns, rows) = self.execute_op(input)?.into_parts();
        Ok(QueryResults::from_rows(columns, dedup_rows(rows)))
    }
}

/// Evaluate join key expressions; `None` if any component is null.
fn join_key(keys: &[Expr], row: &Row) -> QueryResult<Option<Vec<Value>>> {
    let mut key = Vec::with_capacity(keys.len());
    for expr in keys {
        let value = expr.eval(row)?;
        if value.is_null() {
            return Ok(None);
        }
        key.push(value);
    }
    Ok(Some(key))
}

/// Remove duplicate rows, keeping the first occurrence of each.
fn dedup_rows(rows: impl IntoIterator<Item = Row>) -> Vec<Row> {
    let mut seen = HashSet::new();
    rows.into_iter()
        .filter(|row| seen.insert(row.clone()))
        .collect()
}

/// Compare two sort values honoring direction and null placement.
pub fn compare_sort_values(a: &Value, b: &Value, ascending: bool, nulls_first: bool) -> Ordering {
    match (a.is_null(), b.is_null()) {
        (true, true) => Ordering::Equal,
        (true, false) => {
            if nulls_first {
                Ordering::Less
            } else {
                Ordering::Greater
            }
        }
        (false, true) => {
            if nulls_first {
                Ordering::Greater
            } else {
                Ordering::Less
            }
        }
        (false, false) => {
            let cmp = a.cmp_sortable(b);
            if ascending {
                cmp
            } else {
                cmp.reverse()
            }
        }
    }
}
