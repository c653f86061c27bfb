//! Result records returned by the oracle operations.
//!
//! Every record is a plain value: built once by the operation that returns
//! it and never changed afterwards. Lists inside a record are already in
//! their documented order.

use fakebook_core::{AlbumId, PhotoId, UserId};
use serde::Serialize;
use std::fmt;

/// A user reference: id, first name, last name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
}

impl UserInfo {
    pub fn new(
        id: impl Into<UserId>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
        }
    }
}

impl fmt::Display for UserInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.first_name, self.last_name, self.id.raw())
    }
}

/// A photo reference together with the album it belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PhotoInfo {
    pub photo_id: PhotoId,
    pub album_id: AlbumId,
    pub link: String,
    pub album_name: String,
}

impl PhotoInfo {
    pub fn new(
        photo_id: impl Into<PhotoId>,
        album_id: impl Into<AlbumId>,
        link: impl Into<String>,
        album_name: impl Into<String>,
    ) -> Self {
        Self {
            photo_id: photo_id.into(),
            album_id: album_id.into(),
            link: link.into(),
            album_name: album_name.into(),
        }
    }
}

impl fmt::Display for PhotoInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "photo {} in album {} \"{}\": {}",
            self.photo_id.raw(),
            self.album_id.raw(),
            self.album_name,
            self.link
        )
    }
}

/// Birth-month distribution of all users with a known birth month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BirthMonthInfo {
    /// Number of users with a known birth month.
    pub total: u64,
    /// Month with the most births; `None` when no user has a birth month.
    pub most_month: Option<u32>,
    /// Month with the fewest (but at least one) births.
    pub least_month: Option<u32>,
    /// Users born in `most_month`, by id.
    pub most_popular_users: Vec<UserInfo>,
    /// Users born in `least_month`, by id.
    pub least_popular_users: Vec<UserInfo>,
}

impl BirthMonthInfo {
    pub fn empty() -> Self {
        Self {
            total: 0,
            most_month: None,
            least_month: None,
            most_popular_users: Vec::new(),
            least_popular_users: Vec::new(),
        }
    }
}

/// Longest, shortest and most common first names.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FirstNameInfo {
    pub long_names: Vec<String>,
    pub short_names: Vec<String>,
    pub common_names: Vec<String>,
    /// How many users carry each of the common names.
    pub common_name_count: u64,
}

/// A photo and every user tagged in it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedPhotoInfo {
    pub photo: PhotoInfo,
    pub tagged_users: Vec<UserInfo>,
}

/// A suggested match and the photos both users are tagged in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MatchPair {
    pub user1: UserInfo,
    pub user1_year: i64,
    pub user2: UserInfo,
    pub user2_year: i64,
    pub shared_photos: Vec<PhotoInfo>,
}

/// A suggested friendship and the friends both users already share.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UsersPair {
    pub user1: UserInfo,
    pub user2: UserInfo,
    pub shared_friends: Vec<UserInfo>,
}

/// The states hosting the most events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct EventStateInfo {
    /// Events held in each of `states`.
    pub event_count: u64,
    /// Alphabetical.
    pub states: Vec<String>,
}

/// The oldest and youngest friend of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AgeInfo {
    pub oldest: Option<UserInfo>,
    pub youngest: Option<UserInfo>,
}

/// Two users who are likely siblings; `user1` has the smaller id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SiblingInfo {
    pub user1: UserInfo,
    pub user2: UserInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let user = UserInfo::new(3901, "Jon", "Snow");
        let photo = PhotoInfo::new(80, 5, "www.photolink.net", "Winterfell S1");

        assert_eq!(user.to_string(), "Jon Snow (3901)");
        assert_eq!(
            photo.to_string(),
            "photo 80 in album 5 \"Winterfell S1\": www.photolink.net"
        );
    }

    #[test]
    fn test_empty_records() {
        let months = BirthMonthInfo::empty();

        assert_eq!(months.total, 0);
        assert!(months.most_month.is_none() && months.least_month.is_none());
        assert_eq!(AgeInfo::default(), AgeInfo { oldest: None, youngest: None });
        assert_eq!(EventStateInfo::default().event_count, 0);
    }
}
