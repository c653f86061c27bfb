//! Relational building blocks shared by the operations.

use fakebook_core::{Row, TableNames};
use fakebook_query::{col, Expr, PlanOp, QueryResults};

use crate::info::{PhotoInfo, UserInfo};
use crate::{OracleError, OracleResult};

/// Every friendship in both orientations, each ordered pair once.
///
/// Output columns are `{alias}.USER_ID` and `{alias}.FRIEND_ID`, so joining
/// on `USER_ID` finds all friends of a user however the pair is stored.
pub(crate) fn friendships(tables: &TableNames, alias: &str) -> PlanOp {
    let oriented = |user: &str, friend: &str| {
        PlanOp::scan(&tables.friends, alias).project(vec![
            (format!("{}.USER_ID", alias), col(format!("{}.{}", alias, user))),
            (format!("{}.FRIEND_ID", alias), col(format!("{}.{}", alias, friend))),
        ])
    };
    oriented("USER1_ID", "USER2_ID").union(oriented("USER2_ID", "USER1_ID"))
}

/// Id, first and last name of the user under `alias`, named `{label}_ID`,
/// `{label}_FIRST_NAME` and `{label}_LAST_NAME`. Decode with [`user_at`].
pub(crate) fn user_columns(alias: &str, label: &str) -> Vec<(String, Expr)> {
    ["USER_ID", "FIRST_NAME", "LAST_NAME"]
        .iter()
        .zip(["ID", "FIRST_NAME", "LAST_NAME"])
        .map(|(column, suffix)| {
            (
                format!("{}_{}", label, suffix),
                col(format!("{}.{}", alias, column)),
            )
        })
        .collect()
}

/// Photo columns of a plan that joined photos as `P` with albums as `A`.
/// Decode with [`photo_at`].
pub(crate) fn photo_columns() -> Vec<(String, Expr)> {
    vec![
        ("PHOTO_ID".to_string(), col("P.PHOTO_ID")),
        ("ALBUM_ID".to_string(), col("P.ALBUM_ID")),
        ("PHOTO_LINK".to_string(), col("P.PHOTO_LINK")),
        ("ALBUM_NAME".to_string(), col("A.ALBUM_NAME")),
    ]
}

/// Photos as `P` joined with their albums as `A`.
pub(crate) fn photos_with_albums(tables: &TableNames) -> PlanOp {
    PlanOp::scan(&tables.photos, "P").join(
        PlanOp::scan(&tables.albums, "A"),
        vec![(col("P.ALBUM_ID"), col("A.ALBUM_ID"))],
    )
}

/// Decode the three columns of [`user_columns`] starting at `at`. Both names
/// are required.
pub(crate) fn user_at(row: &Row, at: usize) -> OracleResult<UserInfo> {
    Ok(UserInfo::new(row.int(at)?, row.text(at + 1)?, row.text(at + 2)?))
}

/// Decode the four columns of [`photo_columns`] starting at `at`.
pub(crate) fn photo_at(row: &Row, at: usize) -> OracleResult<PhotoInfo> {
    Ok(PhotoInfo::new(
        row.int(at)?,
        row.int(at + 1)?,
        row.text(at + 2)?,
        row.text(at + 3)?,
    ))
}

pub(crate) fn users(results: &QueryResults) -> OracleResult<Vec<UserInfo>> {
    results.iter().map(|row| user_at(row, 0)).collect()
}

/// A count reported by the data source, which must not be negative.
pub(crate) fn count(operation: &str, value: i64) -> OracleResult<u64> {
    u64::try_from(value)
        .map_err(|_| OracleError::shape(operation, format!("negative count {}", value)))
}

/// The first column of every row, as text.
pub(crate) fn texts<'a>(rows: impl IntoIterator<Item = &'a Row>) -> OracleResult<Vec<String>> {
    rows.into_iter()
        .map(|row| Ok(row.text(0)?.to_string()))
        .collect()
}

/// The leading rows whose integer `score` equals the first row's, together
/// with that score. Rows must already be ordered best first; an empty input
/// gives a score of zero.
pub(crate) fn leading_ties(results: &QueryResults, score: usize) -> OracleResult<(i64, &[Row])> {
    let rows = results.rows();
    let Some(first) = rows.first() else {
        return Ok((0, rows));
    };

    let best = first.int(score)?;
    let mut tied = 0;
    for row in rows {
        if row.int(score)? != best {
            break;
        }
        tied += 1;
    }
    Ok((best, &rows[..tied]))
}
