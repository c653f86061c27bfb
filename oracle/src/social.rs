//! Friendship and hometown operations.

use fakebook_core::UserId;
use fakebook_query::{col, lit, AggregateSpec, DataSource, PlanOp, SortKey};

use crate::info::{SiblingInfo, UserInfo, UsersPair};
use crate::relations::{friendships, user_at, user_columns, users};
use crate::{FakebookOracle, OracleResult};

impl<S: DataSource> FakebookOracle<S> {
    /// Users without a single friend, by id.
    pub fn lonely_users(&self) -> OracleResult<Vec<UserInfo>> {
        self.boundary("lonely_users", || {
            let tables = self.tables();
            let lonely = self.fetch(
                "lonely_users",
                PlanOp::scan(&tables.users, "U")
                    .anti_join(
                        friendships(tables, "F"),
                        vec![(col("U.USER_ID"), col("F.USER_ID"))],
                    )
                    .sort(vec![SortKey::asc(col("U.USER_ID"))])
                    .project(user_columns("U", "USER")),
            )?;
            users(&lonely)
        })
    }

    /// Users whose current city is not their hometown, by id. Users missing
    /// either city are left out.
    pub fn live_away_from_home(&self) -> OracleResult<Vec<UserInfo>> {
        self.boundary("live_away_from_home", || {
            let tables = self.tables();
            let movers = self.fetch(
                "live_away_from_home",
                PlanOp::scan(&tables.users, "U")
                    .join(
                        PlanOp::scan(&tables.current_cities, "C"),
                        vec![(col("U.USER_ID"), col("C.USER_ID"))],
                    )
                    .join(
                        PlanOp::scan(&tables.hometown_cities, "H"),
                        vec![(col("U.USER_ID"), col("H.USER_ID"))],
                    )
                    .filter(col("C.CURRENT_CITY_ID").ne(col("H.HOMETOWN_CITY_ID")))
                    .sort(vec![SortKey::asc(col("U.USER_ID"))])
                    .project(user_columns("U", "USER")),
            )?;
            users(&movers)
        })
    }

    /// The `num` pairs of users who are not friends but share the most
    /// friends, each with those mutual friends by id.
    ///
    /// Pairs with equal counts are ranked by smaller id, then larger id.
    pub fn suggest_friends(&self, num: usize) -> OracleResult<Vec<UsersPair>> {
        self.boundary("suggest_friends", || self.friend_suggestions(num))
    }

    fn friend_suggestions(&self, num: usize) -> OracleResult<Vec<UsersPair>> {
        let tables = self.tables();
        let mut group_by = user_columns("U1", "USER1");
        group_by.extend(user_columns("U2", "USER2"));

        let pairs = self.fetch(
            "friend_suggestions",
            friendships(tables, "A")
                .join(
                    friendships(tables, "B"),
                    vec![(col("A.FRIEND_ID"), col("B.FRIEND_ID"))],
                )
                .filter(
                    col("A.USER_ID")
                        .lt(col("B.USER_ID"))
                        .and(col("A.FRIEND_ID").ne(col("B.USER_ID"))),
                )
                .anti_join(
                    friendships(tables, "X"),
                    vec![
                        (col("A.USER_ID"), col("X.USER_ID")),
                        (col("B.USER_ID"), col("X.FRIEND_ID")),
                    ],
                )
                .join(
                    PlanOp::scan(&tables.users, "U1"),
                    vec![(col("A.USER_ID"), col("U1.USER_ID"))],
                )
                .join(
                    PlanOp::scan(&tables.users, "U2"),
                    vec![(col("B.USER_ID"), col("U2.USER_ID"))],
                )
                .join(
                    PlanOp::scan(&tables.users, "M"),
                    vec![(col("A.FRIEND_ID"), col("M.USER_ID"))],
                )
                .aggregate(
                    group_by,
                    vec![AggregateSpec::count_distinct("MUTUAL", col("M.USER_ID"))],
                )
                .sort(vec![
                    SortKey::desc(col("MUTUAL")),
                    SortKey::asc(col("USER1_ID")),
                    SortKey::asc(col("USER2_ID")),
                ])
                .limit(num),
        )?;

        pairs
            .iter()
            .map(|row| {
                let user1 = user_at(row, 0)?;
                let user2 = user_at(row, 3)?;
                let shared_friends = self.mutual_friends(user1.id, user2.id)?;
                Ok(UsersPair {
                    user1,
                    user2,
                    shared_friends,
                })
            })
            .collect()
    }

    fn mutual_friends(&self, user1: UserId, user2: UserId) -> OracleResult<Vec<UserInfo>> {
        let tables = self.tables();
        let mutual = self.fetch(
            "mutual_friends",
            friendships(tables, "A")
                .filter(col("A.USER_ID").eq(lit(user1.raw())))
                .join(
                    friendships(tables, "B").filter(col("B.USER_ID").eq(lit(user2.raw()))),
                    vec![(col("A.FRIEND_ID"), col("B.FRIEND_ID"))],
                )
                .filter(
                    col("A.FRIEND_ID")
                        .ne(lit(user1.raw()))
                        .and(col("A.FRIEND_ID").ne(lit(user2.raw()))),
                )
                .join(
                    PlanOp::scan(&tables.users, "M"),
                    vec![(col("A.FRIEND_ID"), col("M.USER_ID"))],
                )
                .sort(vec![SortKey::asc(col("M.USER_ID"))])
                .project(user_columns("M", "USER")),
        )?;
        users(&mutual)
    }

    /// Pairs of friends who share a last name and a hometown and were born
    /// less than the configured number of years apart, by (smaller id,
    /// larger id).
    pub fn find_potential_siblings(&self) -> OracleResult<Vec<SiblingInfo>> {
        self.boundary("find_potential_siblings", || self.potential_siblings())
    }

    fn potential_siblings(&self) -> OracleResult<Vec<SiblingInfo>> {
        let tables = self.tables();
        let mut columns = user_columns("U1", "USER1");
        columns.extend(user_columns("U2", "USER2"));

        let siblings = self.fetch(
            "potential_siblings",
            PlanOp::scan(&tables.users, "U1")
                .join(
                    PlanOp::scan(&tables.users, "U2"),
                    vec![(col("U1.LAST_NAME"), col("U2.LAST_NAME"))],
                )
                .filter(col("U1.USER_ID").lt(col("U2.USER_ID")))
                .join(
                    PlanOp::scan(&tables.hometown_cities, "H1"),
                    vec![(col("U1.USER_ID"), col("H1.USER_ID"))],
                )
                .join(
                    PlanOp::scan(&tables.hometown_cities, "H2"),
                    vec![
                        (col("U2.USER_ID"), col("H2.USER_ID")),
                        (col("H1.HOMETOWN_CITY_ID"), col("H2.HOMETOWN_CITY_ID")),
                    ],
                )
                .join(
                    friendships(tables, "F"),
                    vec![
                        (col("U1.USER_ID"), col("F.USER_ID")),
                        (col("U2.USER_ID"), col("F.FRIEND_ID")),
                    ],
                )
                .filter(
                    col("U1.YEAR_OF_BIRTH")
                        .sub(col("U2.YEAR_OF_BIRTH"))
                        .abs()
                        .lt(lit(self.config().sibling_year_gap)),
                )
                .sort(vec![
                    SortKey::asc(col("U1.USER_ID")),
                    SortKey::asc(col("U2.USER_ID")),
                ])
                .project(columns),
        )?;

        siblings
            .iter()
            .map(|row| {
                Ok(SiblingInfo {
                    user1: user_at(row, 0)?,
                    user2: user_at(row, 3)?,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fakebook_core::{TableNames, User};
    use fakebook_query::QueryExecutor;
    use fakebook_store::{Database, DatabaseBuilder};

    fn database() -> Database {
        let mut builder = DatabaseBuilder::new(TableNames::default());
        for (id, first) in [(1, "Ann"), (2, "Bob"), (3, "Cy"), (4, "Di"), (5, "Ed")] {
            builder.add_user(User::new(id, first, "Lee")).unwrap();
        }
        builder.add_friendship(1, 3).unwrap();
        builder.add_friendship(2, 3).unwrap();
        builder.add_friendship(1, 4).unwrap();
        builder.add_friendship(2, 4).unwrap();
        builder.add_current_city(1, 10).unwrap();
        builder.add_hometown_city(1, 11).unwrap();
        builder.add_current_city(2, 10).unwrap();
        builder.add_hometown_city(2, 10).unwrap();
        builder.add_current_city(3, 10).unwrap();
        builder.build()
    }

    #[test]
    fn test_lonely_users() {
        let db = database();
        let oracle = FakebookOracle::new(QueryExecutor::new(&db));

        let lonely = oracle.lonely_users().unwrap();

        assert_eq!(lonely, vec![UserInfo::new(5, "Ed", "Lee")]);
    }

    #[test]
    fn test_live_away_from_home() {
        let db = database();
        let oracle = FakebookOracle::new(QueryExecutor::new(&db));

        let movers = oracle.live_away_from_home().unwrap();

        assert_eq!(movers, vec![UserInfo::new(1, "Ann", "Lee")]);
    }

    #[test]
    fn test_suggest_friends() {
        // GIVEN
        let db = database();
        let oracle = FakebookOracle::new(QueryExecutor::new(&db));

        // WHEN
        let pairs = oracle.suggest_friends(10).unwrap();

        // THEN
        let ids: Vec<(i64, i64)> = pairs
            .iter()
            .map(|p| (p.user1.id.raw(), p.user2.id.raw()))
            .collect();
        assert_eq!(ids, vec![(1, 2), (3, 4)]);
        assert_eq!(
            pairs[0].shared_friends,
            vec![UserInfo::new(3, "Cy", "Lee"), UserInfo::new(4, "Di", "Lee")]
        );
        assert_eq!(pairs[1].shared_friends.len(), 2);
        assert!(oracle.suggest_friends(0).unwrap().is_empty());
    }
}
