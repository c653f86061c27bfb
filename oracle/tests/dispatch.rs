//! Request dispatch, configuration and failure handling.

mod common;

use std::cell::Cell;

use fakebook_core::{row, TableNames, UserId, Value};
use fakebook_oracle::{FakebookOracle, OracleConfig, OracleError, Request, Response, UserInfo};
use fakebook_query::{DataSource, QueryError, QueryExecutor, QueryPlan, QueryResult, QueryResults};
use fakebook_store::DatabaseBuilder;
use pretty_assertions::assert_eq;

const ALL_REQUESTS: [Request; 10] = [
    Request::MonthOfBirthInfo,
    Request::NameInfo,
    Request::LonelyUsers,
    Request::LiveAwayFromHome,
    Request::PhotosWithMostTags { num: 3 },
    Request::MatchMaker {
        num: 3,
        year_diff: 5,
    },
    Request::SuggestFriends { num: 3 },
    Request::EventStates,
    Request::AgeInfo {
        user_id: UserId(2),
    },
    Request::PotentialSiblings,
];

/// A data source that fails after serving a fixed number of plans.
struct Flaky<'d> {
    inner: QueryExecutor<'d>,
    remaining: Cell<usize>,
}

impl DataSource for Flaky<'_> {
    fn execute(&self, plan: &QueryPlan) -> QueryResult<QueryResults> {
        match self.remaining.get() {
            0 => Err(QueryError::unavailable(format!("lost connection during {}", plan.name))),
            n => {
                self.remaining.set(n - 1);
                self.inner.execute(plan)
            }
        }
    }
}

mod requests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_run_matches_direct_calls() {
        // GIVEN
        let db = common::database();
        let oracle = common::oracle(&db);

        // WHEN
        let lonely = oracle.run(&Request::LonelyUsers).unwrap();
        let ages = oracle
            .run(&Request::AgeInfo {
                user_id: UserId::new(3),
            })
            .unwrap();

        // THEN
        assert_eq!(lonely, Response::Users(vec![UserInfo::new(8, "Ann", "Ng")]));
        assert_eq!(
            ages,
            Response::Ages(oracle.find_age_info(UserId::new(3)).unwrap())
        );
    }

    #[test]
    fn test_every_request_succeeds_on_empty_data() {
        let db = common::empty_database();
        let oracle = common::oracle(&db);

        for request in ALL_REQUESTS {
            assert!(oracle.run(&request).is_ok(), "{:?} failed", request);
        }
    }
}

mod configuration {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_prefixed_tables() {
        // GIVEN
        let prefix = "project2.Public_";
        let mut builder = DatabaseBuilder::new(TableNames::with_prefix(prefix));
        common::populate(&mut builder, common::Orientation::Mixed);
        let db = builder.build();
        let config = OracleConfig::new().with_table_prefix(prefix);
        let oracle = FakebookOracle::with_config(QueryExecutor::new(&db), config);

        // WHEN
        let lonely = oracle.lonely_users().unwrap();

        // THEN
        assert_eq!(lonely, vec![UserInfo::new(8, "Ann", "Ng")]);
    }

    #[test]
    fn test_mismatched_table_names_are_errors() {
        // GIVEN
        let db = common::database();
        let config = OracleConfig::new().with_table_prefix("elsewhere.");
        let oracle = FakebookOracle::with_config(QueryExecutor::new(&db), config);

        // WHEN
        let result = oracle.find_event_states();

        // THEN
        assert!(matches!(
            result,
            Err(OracleError::DataSource(QueryError::UnknownTable { .. }))
        ));
    }
}

mod failures {
    use super::*;

    #[test]
    fn test_every_operation_reports_source_failure() {
        let db = common::database();

        for request in ALL_REQUESTS {
            // GIVEN
            let source = Flaky {
                inner: QueryExecutor::new(&db),
                remaining: Cell::new(0),
            };
            let oracle = FakebookOracle::new(source);

            // WHEN
            let result = oracle.run(&request);

            // THEN
            assert!(
                matches!(result, Err(OracleError::DataSource(_))),
                "{} did not fail",
                request.operation()
            );
        }
    }

    #[test]
    fn test_null_user_name_is_a_malformed_row() {
        // GIVEN
        let tables = TableNames::default();
        let mut builder = DatabaseBuilder::new(tables.clone());
        let nameless = row![
            9i64,
            "Zed",
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null,
            Value::Null
        ];
        builder.insert_row(&tables.users, nameless).unwrap();
        let db = builder.build();
        let oracle = FakebookOracle::new(QueryExecutor::new(&db));

        // WHEN
        let result = oracle.lonely_users();

        // THEN
        assert!(matches!(result, Err(OracleError::Row(_))));
    }

    #[test]
    fn test_failure_in_follow_up_query() {
        // GIVEN
        let db = common::database();
        let source = Flaky {
            inner: QueryExecutor::new(&db),
            remaining: Cell::new(1),
        };
        let oracle = FakebookOracle::new(source);

        // WHEN
        let result = oracle.find_photos_with_most_tags(2);

        // THEN
        let Err(OracleError::DataSource(err)) = result else {
            panic!("expected a data source error");
        };
        assert!(err.to_string().contains("tagged_users"));
    }
}
