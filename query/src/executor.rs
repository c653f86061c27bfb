//! Query execution.

use fakebook_store::Database;

use crate::operators::OperatorContext;
use crate::plan::QueryPlan;
use crate::result::QueryResults;
use crate::QueryResult;

/// A relational data source: executes a plan and returns its ordered rows.
///
/// This is the only capability the oracle needs from its environment.
/// Implementations must be read-only; executing a plan never changes what a
/// later execution of the same plan returns.
///
/// User rows must carry non-null first and last names, as the store
/// guarantees. The oracle reports a null name as a malformed row.
pub trait DataSource {
    fn execute(&self, plan: &QueryPlan) -> QueryResult<QueryResults>;
}

impl<T: DataSource + ?Sized> DataSource for &T {
    fn execute(&self, plan: &QueryPlan) -> QueryResult<QueryResults> {
        (**self).execute(plan)
    }
}

impl<T: DataSource + ?Sized> DataSource for Box<T> {
    fn execute(&self, plan: &QueryPlan) -> QueryResult<QueryResults> {
        (**self).execute(plan)
    }
}

/// Query executor over the in-memory store.
pub struct QueryExecutor<'d> {
    database: &'d Database,
}

impl<'d> QueryExecutor<'d> {
    /// Create a new executor.
    pub fn new(database: &'d Database) -> Self {
        Self { database }
    }

    /// Get the database this executor reads.
    pub fn database(&self) -> &Database {
        self.database
    }
}

impl DataSource for QueryExecutor<'_> {
    fn execute(&self, plan: &QueryPlan) -> QueryResult<QueryResults> {
        let context = OperatorContext::new(self.database);
        let results = context.execute_op(&plan.root)?;
        log::debug!("plan {} returned {} rows", plan.name, results.len());
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::col;
    use crate::plan::{PlanOp, SortKey};
    use fakebook_core::{TableNames, User};
    use fakebook_store::DatabaseBuilder;

    #[test]
    fn test_execute_named_plan() {
        // GIVEN
        let mut builder = DatabaseBuilder::new(TableNames::default());
        builder.add_user(User::new(7, "Grace", "Hopper")).unwrap();
        builder.add_user(User::new(3, "Barbara", "Liskov")).unwrap();
        let db = builder.build();
        let executor = QueryExecutor::new(&db);

        // WHEN
        let plan = PlanOp::scan("USERS", "U")
            .sort(vec![SortKey::asc(col("U.USER_ID"))])
            .project(vec![("ID", col("U.USER_ID"))])
            .named("ids");
        let results = executor.execute(&plan).unwrap();

        // THEN
        let ids: Vec<i64> = results.iter().map(|r| r.int(0).unwrap()).collect();
        assert_eq!(ids, vec![3, 7]);
    }

    #[test]
    fn test_boxed_data_source() {
        let db = DatabaseBuilder::new(TableNames::default()).build();
        let source: Box<dyn DataSource + '_> = Box::new(QueryExecutor::new(&db));

        let results = source
            .execute(&PlanOp::scan("TAGS", "T").named("tags"))
            .unwrap();

        assert!(results.is_empty());
        assert_eq!(results.column_names().len(), 2);
    }
}
