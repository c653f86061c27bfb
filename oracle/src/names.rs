//! First-name statistics.

use fakebook_query::{col, lit, AggregateSpec, DataSource, PlanOp, SortKey};

use crate::info::FirstNameInfo;
use crate::relations::{self, leading_ties, texts};
use crate::{FakebookOracle, OracleError, OracleResult};

impl<S: DataSource> FakebookOracle<S> {
    /// The longest and shortest distinct first names (by character count),
    /// and the most common first names with how many users carry each.
    ///
    /// Names compare case-sensitively and every list is in byte order.
    pub fn find_name_info(&self) -> OracleResult<FirstNameInfo> {
        self.boundary("find_name_info", || self.name_info())
    }

    fn name_info(&self) -> OracleResult<FirstNameInfo> {
        let lengths = self.fetch(
            "first_name_lengths",
            self.first_names().aggregate_all(vec![
                AggregateSpec::max("LONGEST", col("U.FIRST_NAME").length()),
                AggregateSpec::min("SHORTEST", col("U.FIRST_NAME").length()),
            ]),
        )?;
        let Some(row) = lengths.rows().first() else {
            return Err(OracleError::shape(
                "find_name_info",
                "aggregate returned no rows",
            ));
        };
        let (Some(longest), Some(shortest)) = (row.opt_int(0)?, row.opt_int(1)?) else {
            return Ok(FirstNameInfo::default());
        };

        let common = self.fetch(
            "common_first_names",
            self.first_names()
                .aggregate(
                    vec![("FIRST_NAME", col("U.FIRST_NAME"))],
                    vec![AggregateSpec::count_star("OCCURRENCES")],
                )
                .sort(vec![
                    SortKey::desc(col("OCCURRENCES")),
                    SortKey::asc(col("FIRST_NAME")),
                ]),
        )?;
        let (count, tied) = leading_ties(&common, 1)?;

        Ok(FirstNameInfo {
            long_names: self.names_of_length("longest_first_names", longest)?,
            short_names: self.names_of_length("shortest_first_names", shortest)?,
            common_names: texts(tied)?,
            common_name_count: relations::count("find_name_info", count)?,
        })
    }

    fn first_names(&self) -> PlanOp {
        PlanOp::scan(&self.tables().users, "U").filter(col("U.FIRST_NAME").is_not_null())
    }

    fn names_of_length(&self, name: &str, length: i64) -> OracleResult<Vec<String>> {
        let names = self.fetch(
            name,
            self.first_names()
                .filter(col("U.FIRST_NAME").length().eq(lit(length)))
                .project(vec![("FIRST_NAME", col("U.FIRST_NAME"))])
                .distinct()
                .sort(vec![SortKey::asc(col("FIRST_NAME"))]),
        )?;
        texts(&names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakebook_core::{TableNames, User};
    use fakebook_query::QueryExecutor;
    use fakebook_store::DatabaseBuilder;

    #[test]
    fn test_name_info() {
        // GIVEN
        let mut builder = DatabaseBuilder::new(TableNames::default());
        let names = [
            (1, "Al"),
            (2, "Bo"),
            (3, "Christopher"),
            (4, "Al"),
            (5, "bo"),
            (6, "Bo"),
        ];
        for (id, first) in names {
            builder.add_user(User::new(id, first, "Smith")).unwrap();
        }
        let db = builder.build();
        let oracle = FakebookOracle::new(QueryExecutor::new(&db));

        // WHEN
        let info = oracle.find_name_info().unwrap();

        // THEN
        assert_eq!(info.long_names, vec!["Christopher"]);
        assert_eq!(info.short_names, vec!["Al", "Bo", "bo"]);
        assert_eq!(info.common_names, vec!["Al", "Bo"]);
        assert_eq!(info.common_name_count, 2);
    }

    #[test]
    fn test_name_info_without_users() {
        let db = DatabaseBuilder::new(TableNames::default()).build();
        let oracle = FakebookOracle::new(QueryExecutor::new(&db));

        let info = oracle.find_name_info().unwrap();

        assert_eq!(info, FirstNameInfo::default());
    }
}
