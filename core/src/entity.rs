//! Entity records of the social network.
//!
//! Each record knows its row layout (see [`crate::schema`]), which is how the
//! store turns typed inserts into table rows.

use crate::{AlbumId, CityId, EventId, PhotoId, Row, UserId, Value};

/// A user. Names are required; gender and every birth component may be unknown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub year_of_birth: Option<i64>,
    pub month_of_birth: Option<i64>,
    pub day_of_birth: Option<i64>,
    pub gender: Option<String>,
}

impl User {
    /// Create a user with unknown birth date and gender.
    pub fn new(id: i64, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            id: UserId::new(id),
            first_name: first_name.into(),
            last_name: last_name.into(),
            year_of_birth: None,
            month_of_birth: None,
            day_of_birth: None,
            gender: None,
        }
    }

    /// Set the full birth date.
    pub fn born(mut self, year: i64, month: i64, day: i64) -> Self {
        self.year_of_birth = Some(year);
        self.month_of_birth = Some(month);
        self.day_of_birth = Some(day);
        self
    }

    /// Set only the birth year.
    pub fn birth_year(mut self, year: i64) -> Self {
        self.year_of_birth = Some(year);
        self
    }

    /// Set only the birth month.
    pub fn birth_month(mut self, month: i64) -> Self {
        self.month_of_birth = Some(month);
        self
    }

    /// Set the gender.
    pub fn gender(mut self, gender: impl Into<String>) -> Self {
        self.gender = Some(gender.into());
        self
    }

    pub fn to_row(&self) -> Row {
        Row::new(vec![
            Value::Int(self.id.raw()),
            Value::from(self.first_name.as_str()),
            Value::from(self.last_name.as_str()),
            Value::from(self.year_of_birth),
            Value::from(self.month_of_birth),
            Value::from(self.day_of_birth),
            Value::from(self.gender.clone()),
        ])
    }
}

/// An unordered friendship. Always stored with the smaller id first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Friendship {
    pub user1: UserId,
    pub user2: UserId,
}

impl Friendship {
    /// Create a friendship between two users, normalizing the order.
    pub fn new(a: i64, b: i64) -> Self {
        Self {
            user1: UserId::new(a.min(b)),
            user2: UserId::new(a.max(b)),
        }
    }

    /// Returns true if both sides are the same user.
    pub fn is_self_pair(&self) -> bool {
        self.user1 == self.user2
    }

    pub fn to_row(&self) -> Row {
        Row::new(vec![
            Value::Int(self.user1.raw()),
            Value::Int(self.user2.raw()),
        ])
    }
}

/// A city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct City {
    pub id: CityId,
    pub name: String,
    pub state: Option<String>,
    pub country: String,
}

impl City {
    pub fn new(id: i64, name: impl Into<String>, state: Option<&str>) -> Self {
        Self {
            id: CityId::new(id),
            name: name.into(),
            state: state.map(str::to_string),
            country: "United States".to_string(),
        }
    }

    pub fn to_row(&self) -> Row {
        Row::new(vec![
            Value::Int(self.id.raw()),
            Value::from(self.name.as_str()),
            Value::from(self.state.clone()),
            Value::from(self.country.as_str()),
        ])
    }
}

/// A user-to-city association (current city or hometown).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UserCity {
    pub user: UserId,
    pub city: CityId,
}

impl UserCity {
    pub fn new(user: i64, city: i64) -> Self {
        Self {
            user: UserId::new(user),
            city: CityId::new(city),
        }
    }

    pub fn to_row(&self) -> Row {
        Row::new(vec![
            Value::Int(self.user.raw()),
            Value::Int(self.city.raw()),
        ])
    }
}

/// An event, optionally located in a city.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub id: EventId,
    pub creator: UserId,
    pub name: String,
    pub city: Option<CityId>,
}

impl Event {
    pub fn new(id: i64, creator: i64, name: impl Into<String>, city: Option<i64>) -> Self {
        Self {
            id: EventId::new(id),
            creator: UserId::new(creator),
            name: name.into(),
            city: city.map(CityId::new),
        }
    }

    pub fn to_row(&self) -> Row {
        Row::new(vec![
            Value::Int(self.id.raw()),
            Value::Int(self.creator.raw()),
            Value::from(self.name.as_str()),
            Value::from(self.city.map(|c| c.raw())),
        ])
    }
}

/// A photo album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Album {
    pub id: AlbumId,
    pub owner: UserId,
    pub name: String,
}

impl Album {
    pub fn new(id: i64, owner: i64, name: impl Into<String>) -> Self {
        Self {
            id: AlbumId::new(id),
            owner: UserId::new(owner),
            name: name.into(),
        }
    }

    pub fn to_row(&self) -> Row {
        Row::new(vec![
            Value::Int(self.id.raw()),
            Value::Int(self.owner.raw()),
            Value::from(self.name.as_str()),
        ])
    }
}

/// A photo inside an album.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Photo {
    pub id: PhotoId,
    pub album: AlbumId,
    pub link: String,
}

impl Photo {
    pub fn new(id: i64, album: i64, link: impl Into<String>) -> Self {
        Self {
            id: PhotoId::new(id),
            album: AlbumId::new(album),
            link: link.into(),
        }
    }

    pub fn to_row(&self) -> Row {
        Row::new(vec![
            Value::Int(self.id.raw()),
            Value::Int(self.album.raw()),
            Value::from(self.link.as_str()),
        ])
    }
}

/// A user tagged in a photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tag {
    pub photo: PhotoId,
    pub subject: UserId,
}

impl Tag {
    pub fn new(photo: i64, subject: i64) -> Self {
        Self {
            photo: PhotoId::new(photo),
            subject: UserId::new(subject),
        }
    }

    pub fn to_row(&self) -> Row {
        Row::new(vec![
            Value::Int(self.photo.raw()),
            Value::Int(self.subject.raw()),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema;

    #[test]
    fn test_friendship_normalizes_order() {
        let f = Friendship::new(9, 4);

        assert_eq!(f.user1, UserId::new(4));
        assert_eq!(f.user2, UserId::new(9));
        assert!(!f.is_self_pair());
        assert!(Friendship::new(3, 3).is_self_pair());
    }

    #[test]
    fn test_user_row_layout() {
        // GIVEN
        let user = User::new(1, "Ada", "Lovelace").birth_year(1815).gender("female");

        // WHEN
        let row = user.to_row();

        // THEN
        assert_eq!(row.arity(), schema::users::COLUMNS.len());
        assert_eq!(row.int(0), Ok(1));
        assert_eq!(row.opt_int(3), Ok(Some(1815)));
        assert_eq!(row.opt_int(4), Ok(None));
        assert_eq!(row.opt_text(6), Ok(Some("female")));
    }

    #[test]
    fn test_event_without_city() {
        let row = Event::new(5, 1, "Launch", None).to_row();

        assert_eq!(row.arity(), schema::events::COLUMNS.len());
        assert_eq!(row.opt_int(3), Ok(None));
    }
}
