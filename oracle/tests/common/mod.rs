//! A small, hand-checked social network shared by the integration tests.
//!
//! Users (id, name, birth date, gender, current city / hometown):
//!
//! | id | name     | born        | gender | current | hometown |
//! |----|----------|-------------|--------|---------|----------|
//! | 1  | Ann Lee  | 1990-03-01  | female | 100     | 100      |
//! | 2  | Bob Lee  | 1995-03-15  | male   | 101     | 100      |
//! | 3  | Cy Ng    | 1988-07-04  | male   | 102     | 103      |
//! | 4  | Di Ng    | 1992-11-30  | female | 100     |          |
//! | 5  | Ed Lee   | 1990        | male   | 100     | 100      |
//! | 6  | Flo Park | 2001-07-07  | female | 104     | 104      |
//! | 7  | Gus Park | 1990        | male   | 101     | 104      |
//! | 8  | Ann Ng   | 1993-01-01  | female |         |          |
//!
//! Friendships: 1-2, 1-3, 2-3, 2-5, 3-4, 4-5 and 6-7. By default 2-5 is
//! stored with the larger id first. User 8 has no friends.

#![allow(dead_code)]

use fakebook_core::{Album, City, Event, Photo, TableNames, User};
use fakebook_oracle::FakebookOracle;
use fakebook_query::QueryExecutor;
use fakebook_store::{Database, DatabaseBuilder};

pub fn users() -> Vec<User> {
    vec![
        User::new(1, "Ann", "Lee").born(1990, 3, 1).gender("female"),
        User::new(2, "Bob", "Lee").born(1995, 3, 15).gender("male"),
        User::new(3, "Cy", "Ng").born(1988, 7, 4).gender("male"),
        User::new(4, "Di", "Ng").born(1992, 11, 30).gender("female"),
        User::new(5, "Ed", "Lee").birth_year(1990).gender("male"),
        User::new(6, "Flo", "Park").born(2001, 7, 7).gender("female"),
        User::new(7, "Gus", "Park").birth_year(1990).gender("male"),
        User::new(8, "Ann", "Ng").born(1993, 1, 1).gender("female"),
    ]
}

/// Every friendship of the fixture, smaller id first.
pub const FRIENDSHIPS: [(i64, i64); 7] = [(1, 2), (1, 3), (2, 3), (2, 5), (3, 4), (4, 5), (6, 7)];

/// How friendship rows are stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Smaller id first, except 5-2.
    Mixed,
    /// Smaller id first everywhere.
    Normalized,
    /// Larger id first everywhere.
    Reversed,
}

/// Fill `builder` with the fixture network.
pub fn populate(builder: &mut DatabaseBuilder, orientation: Orientation) {
    for user in users() {
        builder.add_user(user).unwrap();
    }

    for (a, b) in FRIENDSHIPS {
        let added = match orientation {
            Orientation::Mixed if (a, b) == (2, 5) => builder.add_friendship_raw(5, 2),
            Orientation::Mixed | Orientation::Normalized => builder.add_friendship(a, b),
            Orientation::Reversed => builder.add_friendship_raw(b, a),
        };
        added.unwrap();
    }

    builder
        .add_city(City::new(100, "Ann Arbor", Some("Michigan")))
        .unwrap()
        .add_city(City::new(101, "Detroit", Some("Michigan")))
        .unwrap()
        .add_city(City::new(102, "Austin", Some("Texas")))
        .unwrap()
        .add_city(City::new(103, "Dallas", Some("Texas")))
        .unwrap()
        .add_city(City::new(104, "Nowhere", None))
        .unwrap();
    for (user, city) in [(1, 100), (2, 101), (3, 102), (4, 100), (5, 100), (6, 104), (7, 101)] {
        builder.add_current_city(user, city).unwrap();
    }
    for (user, city) in [(1, 100), (2, 100), (3, 103), (5, 100), (6, 104), (7, 104)] {
        builder.add_hometown_city(user, city).unwrap();
    }

    for (id, city) in [(1, Some(100)), (2, Some(101)), (3, Some(102)), (4, Some(103))] {
        builder.add_event(Event::new(id, 1, "Meetup", city)).unwrap();
    }
    builder.add_event(Event::new(5, 2, "Rave", Some(104))).unwrap();
    builder.add_event(Event::new(6, 2, "Webinar", None)).unwrap();

    builder
        .add_album(Album::new(10, 1, "Spring"))
        .unwrap()
        .add_album(Album::new(11, 4, "Trip"))
        .unwrap();
    builder
        .add_photo(Photo::new(20, 10, "fb.com/p/20"))
        .unwrap()
        .add_photo(Photo::new(21, 11, "fb.com/p/21"))
        .unwrap()
        .add_photo(Photo::new(22, 11, "fb.com/p/22"))
        .unwrap()
        .add_photo(Photo::new(23, 11, "fb.com/p/23"))
        .unwrap();
    let tags = [
        (20, 1),
        (20, 2),
        (20, 3),
        (21, 4),
        (21, 6),
        (21, 8),
        (22, 1),
        (22, 2),
        (22, 4),
        (22, 8),
    ];
    for (photo, subject) in tags {
        builder.add_tag(photo, subject).unwrap();
    }
}

pub fn database() -> Database {
    database_with(Orientation::Mixed)
}

pub fn database_with(orientation: Orientation) -> Database {
    let mut builder = DatabaseBuilder::new(TableNames::default());
    populate(&mut builder, orientation);
    builder.build()
}

pub fn empty_database() -> Database {
    DatabaseBuilder::new(TableNames::default()).build()
}

pub fn oracle(db: &Database) -> FakebookOracle<QueryExecutor<'_>> {
    FakebookOracle::new(QueryExecutor::new(db))
}
