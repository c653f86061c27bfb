//! Photo-tag operations: the most tagged photos and match suggestions.

use fakebook_core::{PhotoId, UserId};
use fakebook_query::{col, lit, AggregateSpec, DataSource, PlanOp, SortKey};

use crate::info::{MatchPair, PhotoInfo, TaggedPhotoInfo, UserInfo};
use crate::relations::{
    friendships, photo_at, photo_columns, photos_with_albums, user_at, user_columns, users,
};
use crate::{FakebookOracle, OracleResult};

impl<S: DataSource> FakebookOracle<S> {
    /// The `num` photos with the most distinct tagged users, ties by photo
    /// id, each with its tagged users by id. Untagged photos never appear.
    pub fn find_photos_with_most_tags(&self, num: usize) -> OracleResult<Vec<TaggedPhotoInfo>> {
        self.boundary("find_photos_with_most_tags", || self.most_tagged_photos(num))
    }

    fn most_tagged_photos(&self, num: usize) -> OracleResult<Vec<TaggedPhotoInfo>> {
        let tables = self.tables();
        let photos = self.fetch(
            "most_tagged_photos",
            PlanOp::scan(&tables.tags, "T")
                .join(
                    PlanOp::scan(&tables.users, "U"),
                    vec![(col("T.TAG_SUBJECT_ID"), col("U.USER_ID"))],
                )
                .join(
                    photos_with_albums(tables),
                    vec![(col("T.TAG_PHOTO_ID"), col("P.PHOTO_ID"))],
                )
                .aggregate(
                    photo_columns(),
                    vec![AggregateSpec::count_distinct("TAGGED", col("U.USER_ID"))],
                )
                .sort(vec![
                    SortKey::desc(col("TAGGED")),
                    SortKey::asc(col("PHOTO_ID")),
                ])
                .limit(num),
        )?;

        photos
            .iter()
            .map(|row| {
                let photo = photo_at(row, 0)?;
                let tagged_users = self.tagged_users(photo.photo_id)?;
                Ok(TaggedPhotoInfo {
                    photo,
                    tagged_users,
                })
            })
            .collect()
    }

    fn tagged_users(&self, photo: PhotoId) -> OracleResult<Vec<UserInfo>> {
        let tables = self.tables();
        let tagged = self.fetch(
            "tagged_users",
            PlanOp::scan(&tables.tags, "T")
                .filter(col("T.TAG_PHOTO_ID").eq(lit(photo.raw())))
                .join(
                    PlanOp::scan(&tables.users, "U"),
                    vec![(col("T.TAG_SUBJECT_ID"), col("U.USER_ID"))],
                )
                .project(user_columns("U", "USER"))
                .distinct()
                .sort(vec![SortKey::asc(col("USER_ID"))]),
        )?;
        users(&tagged)
    }

    /// The `num` best match suggestions: pairs of users of the same gender
    /// who are not friends, were born at most `year_diff` years apart and
    /// are tagged together in at least one photo.
    ///
    /// Pairs are ranked by shared photos, then by smaller id and larger id.
    /// Each pair lists its shared photos by photo id.
    pub fn match_maker(&self, num: usize, year_diff: u32) -> OracleResult<Vec<MatchPair>> {
        self.boundary("match_maker", || self.matches(num, year_diff))
    }

    fn matches(&self, num: usize, year_diff: u32) -> OracleResult<Vec<MatchPair>> {
        let tables = self.tables();
        let mut group_by = user_columns("U1", "USER1");
        group_by.push(("USER1_YEAR".to_string(), col("U1.YEAR_OF_BIRTH")));
        group_by.extend(user_columns("U2", "USER2"));
        group_by.push(("USER2_YEAR".to_string(), col("U2.YEAR_OF_BIRTH")));

        let pairs = self.fetch(
            "match_candidates",
            PlanOp::scan(&tables.tags, "T1")
                .join(
                    PlanOp::scan(&tables.tags, "T2"),
                    vec![(col("T1.TAG_PHOTO_ID"), col("T2.TAG_PHOTO_ID"))],
                )
                .filter(col("T1.TAG_SUBJECT_ID").lt(col("T2.TAG_SUBJECT_ID")))
                .join(
                    PlanOp::scan(&tables.users, "U1"),
                    vec![(col("T1.TAG_SUBJECT_ID"), col("U1.USER_ID"))],
                )
                .join(
                    PlanOp::scan(&tables.users, "U2"),
                    vec![(col("T2.TAG_SUBJECT_ID"), col("U2.USER_ID"))],
                )
                .filter(
                    col("U1.GENDER").eq(col("U2.GENDER")).and(
                        col("U1.YEAR_OF_BIRTH")
                            .sub(col("U2.YEAR_OF_BIRTH"))
                            .abs()
                            .le(lit(year_diff)),
                    ),
                )
                .anti_join(
                    friendships(tables, "F"),
                    vec![
                        (col("U1.USER_ID"), col("F.USER_ID")),
                        (col("U2.USER_ID"), col("F.FRIEND_ID")),
                    ],
                )
                .join(
                    photos_with_albums(tables),
                    vec![(col("T1.TAG_PHOTO_ID"), col("P.PHOTO_ID"))],
                )
                .aggregate(
                    group_by,
                    vec![AggregateSpec::count_distinct("SHARED", col("P.PHOTO_ID"))],
                )
                .sort(vec![
                    SortKey::desc(col("SHARED")),
                    SortKey::asc(col("USER1_ID")),
                    SortKey::asc(col("USER2_ID")),
                ])
                .limit(num),
        )?;

        pairs
            .iter()
            .map(|row| {
                let user1 = user_at(row, 0)?;
                let user2 = user_at(row, 4)?;
                let shared_photos = self.shared_photos(user1.id, user2.id)?;
                Ok(MatchPair {
                    user1,
                    user1_year: row.int(3)?,
                    user2,
                    user2_year: row.int(7)?,
                    shared_photos,
                })
            })
            .collect()
    }

    fn shared_photos(&self, user1: UserId, user2: UserId) -> OracleResult<Vec<PhotoInfo>> {
        let tables = self.tables();
        let shared = self.fetch(
            "shared_photos",
            PlanOp::scan(&tables.tags, "T1")
                .filter(col("T1.TAG_SUBJECT_ID").eq(lit(user1.raw())))
                .join(
                    PlanOp::scan(&tables.tags, "T2")
                        .filter(col("T2.TAG_SUBJECT_ID").eq(lit(user2.raw()))),
                    vec![(col("T1.TAG_PHOTO_ID"), col("T2.TAG_PHOTO_ID"))],
                )
                .join(
                    photos_with_albums(tables),
                    vec![(col("T1.TAG_PHOTO_ID"), col("P.PHOTO_ID"))],
                )
                .project(photo_columns())
                .distinct()
                .sort(vec![SortKey::asc(col("PHOTO_ID"))]),
        )?;
        shared.iter().map(|row| photo_at(row, 0)).collect()
    }
}
