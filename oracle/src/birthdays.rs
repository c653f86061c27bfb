//! Birth-date operations: the birth-month distribution and the oldest and
//! youngest friend of a user.

use fakebook_core::UserId;
use fakebook_query::{col, lit, AggregateSpec, DataSource, PlanOp, SortKey};

use crate::info::{AgeInfo, BirthMonthInfo, UserInfo};
use crate::relations::{count, friendships, user_at, user_columns, users};
use crate::{FakebookOracle, OracleError, OracleResult};

impl<S: DataSource> FakebookOracle<S> {
    /// How many users have a known birth month, which months are the most
    /// and least common, and who was born in them.
    ///
    /// Ties are broken towards the smaller month number in both directions.
    pub fn find_month_of_birth_info(&self) -> OracleResult<BirthMonthInfo> {
        self.boundary("find_month_of_birth_info", || self.month_of_birth_info())
    }

    fn month_of_birth_info(&self) -> OracleResult<BirthMonthInfo> {
        let months = self.fetch(
            "birth_month_counts",
            PlanOp::scan(&self.tables().users, "U")
                .filter(col("U.MONTH_OF_BIRTH").is_not_null())
                .aggregate(
                    vec![("MONTH", col("U.MONTH_OF_BIRTH"))],
                    vec![AggregateSpec::count_star("BIRTHS")],
                )
                .sort(vec![SortKey::desc(col("BIRTHS")), SortKey::asc(col("MONTH"))]),
        )?;
        let Some(first) = months.rows().first() else {
            return Ok(BirthMonthInfo::empty());
        };

        let most = first.int(0)?;
        let mut total = 0;
        let mut least = (most, first.int(1)?);
        for row in &months {
            let (month, births) = (row.int(0)?, row.int(1)?);
            total += births;
            // Equal counts arrive in month order, so the first minimum wins.
            if births < least.1 {
                least = (month, births);
            }
        }

        Ok(BirthMonthInfo {
            total: count("find_month_of_birth_info", total)?,
            most_month: Some(month_number(most)?),
            least_month: Some(month_number(least.0)?),
            most_popular_users: self.users_born_in(most)?,
            least_popular_users: self.users_born_in(least.0)?,
        })
    }

    fn users_born_in(&self, month: i64) -> OracleResult<Vec<UserInfo>> {
        let born = self.fetch(
            "users_born_in_month",
            PlanOp::scan(&self.tables().users, "U")
                .filter(col("U.MONTH_OF_BIRTH").eq(lit(month)))
                .sort(vec![SortKey::asc(col("U.USER_ID"))])
                .project(user_columns("U", "USER")),
        )?;
        users(&born)
    }

    /// The oldest and youngest friend of `user_id`, whichever column the
    /// friendship is stored in.
    ///
    /// Friends are ordered by birth year, month and day, unknown parts last,
    /// with the larger id first among equals. The oldest friend is the first
    /// in that order and the youngest the last, so a friend with an unknown
    /// birth year counts as the youngest. A user without friends gets
    /// neither.
    pub fn find_age_info(&self, user_id: UserId) -> OracleResult<AgeInfo> {
        self.boundary("find_age_info", || self.age_info(user_id))
    }

    fn age_info(&self, user_id: UserId) -> OracleResult<AgeInfo> {
        let oldest_first = vec![
            SortKey::asc(col("U.YEAR_OF_BIRTH")),
            SortKey::asc(col("U.MONTH_OF_BIRTH")),
            SortKey::asc(col("U.DAY_OF_BIRTH")),
            SortKey::desc(col("U.USER_ID")),
        ];
        let youngest_first = vec![
            SortKey::desc(col("U.YEAR_OF_BIRTH")),
            SortKey::desc(col("U.MONTH_OF_BIRTH")),
            SortKey::desc(col("U.DAY_OF_BIRTH")),
            SortKey::asc(col("U.USER_ID")),
        ];

        Ok(AgeInfo {
            oldest: self.first_friend("oldest_friend", user_id, oldest_first)?,
            youngest: self.first_friend("youngest_friend", user_id, youngest_first)?,
        })
    }

    fn first_friend(
        &self,
        name: &str,
        user_id: UserId,
        order_by: Vec<SortKey>,
    ) -> OracleResult<Option<UserInfo>> {
        let tables = self.tables();
        let friend = self.fetch(
            name,
            friendships(tables, "F")
                .filter(col("F.USER_ID").eq(lit(user_id.raw())))
                .join(
                    PlanOp::scan(&tables.users, "U"),
                    vec![(col("F.FRIEND_ID"), col("U.USER_ID"))],
                )
                .sort(order_by)
                .limit(1)
                .project(user_columns("U", "USER")),
        )?;
        friend.rows().first().map(|row| user_at(row, 0)).transpose()
    }
}

fn month_number(month: i64) -> OracleResult<u32> {
    u32::try_from(month).map_err(|_| {
        OracleError::shape("find_month_of_birth_info", format!("bad birth month {}", month))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakebook_core::{TableNames, User};
    use fakebook_query::QueryExecutor;
    use fakebook_store::{Database, DatabaseBuilder};

    fn database() -> Database {
        let mut builder = DatabaseBuilder::new(TableNames::default());
        builder
            .add_user(User::new(1, "Ann", "Lee").born(1990, 3, 1))
            .unwrap()
            .add_user(User::new(2, "Bob", "Lee").born(1985, 3, 9))
            .unwrap()
            .add_user(User::new(3, "Cy", "Ng").born(1985, 7, 2))
            .unwrap()
            .add_user(User::new(4, "Di", "Ng"))
            .unwrap();
        builder.add_friendship(1, 2).unwrap();
        builder.add_friendship(1, 3).unwrap();
        builder.build()
    }

    #[test]
    fn test_month_of_birth_info() {
        // GIVEN
        let db = database();
        let oracle = FakebookOracle::new(QueryExecutor::new(&db));

        // WHEN
        let info = oracle.find_month_of_birth_info().unwrap();

        // THEN
        assert_eq!(info.total, 3);
        assert_eq!(info.most_month, Some(3));
        assert_eq!(info.least_month, Some(7));
        assert_eq!(
            info.most_popular_users,
            vec![UserInfo::new(1, "Ann", "Lee"), UserInfo::new(2, "Bob", "Lee")]
        );
        assert_eq!(info.least_popular_users, vec![UserInfo::new(3, "Cy", "Ng")]);
    }

    #[test]
    fn test_age_info() {
        // GIVEN
        let db = database();
        let oracle = FakebookOracle::new(QueryExecutor::new(&db));

        // WHEN
        let ages = oracle.find_age_info(UserId::new(1)).unwrap();

        // THEN
        assert_eq!(ages.oldest, Some(UserInfo::new(2, "Bob", "Lee")));
        assert_eq!(ages.youngest, Some(UserInfo::new(3, "Cy", "Ng")));
    }

    #[test]
    fn test_unknown_birth_year_counts_as_youngest() {
        // GIVEN
        let mut builder = DatabaseBuilder::new(TableNames::default());
        builder
            .add_user(User::new(1, "Ann", "Lee"))
            .unwrap()
            .add_user(User::new(2, "Bob", "Lee").born(2000, 1, 1))
            .unwrap()
            .add_user(User::new(3, "Cy", "Ng"))
            .unwrap();
        builder.add_friendship(1, 2).unwrap();
        builder.add_friendship(1, 3).unwrap();
        let db = builder.build();
        let oracle = FakebookOracle::new(QueryExecutor::new(&db));

        // WHEN
        let ages = oracle.find_age_info(UserId::new(1)).unwrap();

        // THEN
        assert_eq!(ages.oldest, Some(UserInfo::new(2, "Bob", "Lee")));
        assert_eq!(ages.youngest, Some(UserInfo::new(3, "Cy", "Ng")));
    }

    #[test]
    fn test_age_info_without_friends() {
        let db = database();
        let oracle = FakebookOracle::new(QueryExecutor::new(&db));

        let ages = oracle.find_age_info(UserId::new(4)).unwrap();

        assert_eq!(ages, AgeInfo::default());
    }
}
