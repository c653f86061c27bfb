//! Query planning.
//!
//! A plan is a tree of relational operators built bottom-up with the fluent
//! methods on [`PlanOp`]:
//!
//! ```text
//! PlanOp::scan("USERS", "U")
//!     .filter(col("U.MONTH_OF_BIRTH").is_not_null())
//!     .aggregate(vec![("MONTH", col("U.MONTH_OF_BIRTH"))],
//!                vec![AggregateSpec::count_star("BIRTHED")])
//!     .sort(vec![SortKey::desc(col("BIRTHED")), SortKey::asc(col("MONTH"))])
//!     .named("birth_months")
//! ```

use crate::expr::Expr;

/// A named query execution plan.
#[derive(Debug, Clone)]
pub struct QueryPlan {
    /// Short label used in diagnostics.
    pub name: String,
    /// The root operator of the plan.
    pub root: PlanOp,
}

impl QueryPlan {
    pub fn new(name: impl Into<String>, root: PlanOp) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }
}

/// Join flavors. All joins are equi-joins on a list of key pairs; an empty
/// key list joins every left row with every right row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinKind {
    /// Matching pairs only.
    Inner,
    /// Every left row; right columns are null when nothing matches.
    LeftOuter,
    /// Left rows with no match on the right (NOT EXISTS). Right columns are dropped.
    Anti,
}

/// A sort key with direction and null placement.
#[derive(Debug, Clone)]
pub struct SortKey {
    pub expr: Expr,
    pub ascending: bool,
    pub nulls_first: bool,
}

impl SortKey {
    /// Ascending, nulls last.
    pub fn asc(expr: Expr) -> Self {
        Self {
            expr,
            ascending: true,
            nulls_first: false,
        }
    }

    /// Descending, nulls first (the exact reverse of [`SortKey::asc`]).
    pub fn desc(expr: Expr) -> Self {
        Self {
            expr,
            ascending: false,
            nulls_first: true,
        }
    }

    pub fn nulls_first(mut self) -> Self {
        self.nulls_first = true;
        self
    }

    pub fn nulls_last(mut self) -> Self {
        self.nulls_first = false;
        self
    }
}

/// Aggregate function kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AggregateKind {
    Count,
    Sum,
    Min,
    Max,
}

/// Specification for an aggregate computation.
#[derive(Debug, Clone)]
pub struct AggregateSpec {
    /// Output column name.
    pub name: String,
    /// Type of aggregate function.
    pub kind: AggregateKind,
    /// Expression to aggregate over; `None` means COUNT(*).
    pub expr: Option<Expr>,
    /// Whether to only consider distinct values (e.g., COUNT(DISTINCT x)).
    pub distinct: bool,
}

impl AggregateSpec {
    fn new(name: impl Into<String>, kind: AggregateKind, expr: Option<Expr>) -> Self {
        Self {
            name: name.into(),
            kind,
            expr,
            distinct: false,
        }
    }

    /// COUNT(*)
    pub fn count_star(name: impl Into<String>) -> Self {
        Self::new(name, AggregateKind::Count, None)
    }

    /// COUNT(expr), ignoring nulls.
    pub fn count(name: impl Into<String>, expr: Expr) -> Self {
        Self::new(name, AggregateKind::Count, Some(expr))
    }

    /// COUNT(DISTINCT expr), ignoring nulls.
    pub fn count_distinct(name: impl Into<String>, expr: Expr) -> Self {
        let mut spec = Self::new(name, AggregateKind::Count, Some(expr));
        spec.distinct = true;
        spec
    }

    pub fn sum(name: impl Into<String>, expr: Expr) -> Self {
        Self::new(name, AggregateKind::Sum, Some(expr))
    }

    pub fn min(name: impl Into<String>, expr: Expr) -> Self {
        Self::new(name, AggregateKind::Min, Some(expr))
    }

    pub fn max(name: impl Into<String>, expr: Expr) -> Self {
        Self::new(name, AggregateKind::Max, Some(expr))
    }
}

/// A plan operator. Each operator materializes its full output.
#[derive(Debug, Clone)]
pub enum PlanOp {
    /// Scan every row of a table. Output columns are `alias.COLUMN`.
    Scan { table: String, alias: String },

    /// Filter rows by a condition.
    Filter { input: Box<PlanOp>, predicate: Expr },

    /// Compute named output columns.
    Project {
        input: Box<PlanOp>,
        projections: Vec<(String, Expr)>,
    },

    /// Equi-join two inputs.
    Join {
        left: Box<PlanOp>,
        right: Box<PlanOp>,
        kind: JoinKind,
        /// (left key, right key) pairs.
        on: Vec<(Expr, Expr)>,
    },

    /// Concatenate two inputs of equal arity, optionally removing duplicates.
    Union {
        left: Box<PlanOp>,
        right: Box<PlanOp>,
        all: bool,
    },

    /// Aggregate with optional grouping. Output is group columns then aggregates.
    Aggregate {
        input: Box<PlanOp>,
        group_by: Vec<(String, Expr)>,
        aggregates: Vec<AggregateSpec>,
    },

    /// Stable sort by keys.
    Sort {
        input: Box<PlanOp>,
        order_by: Vec<SortKey>,
    },

    /// Limit and offset.
    LimitOffset {
        input: Box<PlanOp>,
        limit: Option<usize>,
        offset: Option<usize>,
    },

    /// Remove duplicate rows, keeping first occurrences.
    Distinct { input: Box<PlanOp> },
}

impl PlanOp {
    pub fn scan(table: impl Into<String>, alias: impl Into<String>) -> Self {
        PlanOp::Scan {
            table: table.into(),
            alias: alias.into(),
        }
    }

    pub fn filter(self, predicate: Expr) -> Self {
        PlanOp::Filter {
            input: Box::new(self),
            predicate,
        }
    }

    pub fn project<N: Into<String>>(self, projections: Vec<(N, Expr)>) -> Self {
        PlanOp::Project {
            input: Box::new(self),
            projections: projections
                .into_iter()
                .map(|(name, expr)| (name.into(), expr))
                .collect(),
        }
    }

    fn join_with(self, right: PlanOp, kind: JoinKind, on: Vec<(Expr, Expr)>) -> Self {
        PlanOp::Join {
            left: Box::new(self),
            right: Box::new(right),
            kind,
            on,
        }
    }

    pub fn join(self, right: PlanOp, on: Vec<(Expr, Expr)>) -> Self {
        self.join_with(right, JoinKind::Inner, on)
    }

    pub fn left_join(self, right: PlanOp, on: Vec<(Expr, Expr)>) -> Self {
        self.join_with(right, JoinKind::LeftOuter, on)
    }

    pub fn anti_join(self, right: PlanOp, on: Vec<(Expr, Expr)>) -> Self {
        self.join_with(right, JoinKind::Anti, on)
    }

    /// UNION (duplicates removed).
    pub fn union(self, right: PlanOp) -> Self {
        PlanOp::Union {
            left: Box::new(self),
            right: Box::new(right),
            all: false,
        }
    }

    /// UNION ALL.
    pub fn union_all(self, right: PlanOp) -> Self {
        PlanOp::Union {
            left: Box::new(self),
            right: Box::new(right),
            all: true,
        }
    }

    pub fn aggregate<N: Into<String>>(
        self,
        group_by: Vec<(N, Expr)>,
        aggregates: Vec<AggregateSpec>,
    ) -> Self {
        PlanOp::Aggregate {
            input: Box::new(self),
            group_by: group_by
                .into_iter()
                .map(|(name, expr)| (name.into(), expr))
                .collect(),
            aggregates,
        }
    }

    /// Aggregate the whole input as a single group. Always yields one row.
    pub fn aggregate_all(self, aggregates: Vec<AggregateSpec>) -> Self {
        self.aggregate(Vec::<(String, Expr)>::new(), aggregates)
    }

    pub fn sort(self, order_by: Vec<SortKey>) -> Self {
        PlanOp::Sort {
            input: Box::new(self),
            order_by,
        }
    }

    pub fn limit(self, limit: usize) -> Self {
        PlanOp::LimitOffset {
            input: Box::new(self),
            limit: Some(limit),
            offset: None,
        }
    }

    pub fn distinct(self) -> Self {
        PlanOp::Distinct {
            input: Box::new(self),
        }
    }

    /// Wrap into a named [`QueryPlan`].
    pub fn named(self, name: impl Into<String>) -> QueryPlan {
        QueryPlan::new(name, self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::col;

    #[test]
    fn test_fluent_plan_shape() {
        // GIVEN
        let plan = PlanOp::scan("USERS", "U")
            .filter(col("U.MONTH_OF_BIRTH").is_not_null())
            .sort(vec![SortKey::asc(col("U.USER_ID"))])
            .limit(10)
            .named("users");

        // THEN
        assert_eq!(plan.name, "users");
        let PlanOp::LimitOffset { input, limit, offset } = plan.root else {
            panic!("expected LimitOffset at the root");
        };
        assert_eq!(limit, Some(10));
        assert_eq!(offset, None);
        assert!(matches!(*input, PlanOp::Sort { .. }));
    }

    #[test]
    fn test_sort_key_defaults() {
        let asc = SortKey::asc(col("A"));
        let desc = SortKey::desc(col("A"));

        assert!(asc.ascending && !asc.nulls_first);
        assert!(!desc.ascending && desc.nulls_first);
        assert!(SortKey::asc(col("A")).nulls_first().nulls_first);
    }

    #[test]
    fn test_aggregate_spec_constructors() {
        let star = AggregateSpec::count_star("N");
        let distinct = AggregateSpec::count_distinct("D", col("X"));

        assert!(star.expr.is_none());
        assert_eq!(star.kind, AggregateKind::Count);
        assert!(distinct.distinct);
        assert_eq!(AggregateSpec::max("M", col("X")).kind, AggregateKind::Max);
    }
}
