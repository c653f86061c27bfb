//! Validating database builder.

use std::collections::{HashMap, HashSet};

use fakebook_core::{
    Album, City, Event, Friendship, Photo, Row, TableNames, Tag, User, UserCity,
};

use crate::database::{Database, Table};
use crate::error::{StoreError, StoreResult};

/// Builder for a [`Database`].
///
/// Creates every table named by the given [`TableNames`] up front and
/// enforces the schema invariants as rows arrive.
pub struct DatabaseBuilder {
    names: TableNames,
    tables: HashMap<String, Table>,
    /// Primary keys seen so far, per table.
    keys: HashMap<String, HashSet<Vec<i64>>>,
}

impl DatabaseBuilder {
    /// Create a builder with the social-network tables.
    pub fn new(names: TableNames) -> Self {
        let mut tables = HashMap::new();
        for (name, columns) in names.layouts() {
            tables.insert(name.to_string(), Table::new(name, columns));
        }
        Self {
            names,
            tables,
            keys: HashMap::new(),
        }
    }

    /// Table names this builder writes to.
    pub fn names(&self) -> &TableNames {
        &self.names
    }

    /// Define an additional table.
    pub fn add_table(&mut self, name: &str, columns: &[&str]) -> StoreResult<&mut Self> {
        if self.tables.contains_key(name) {
            return Err(StoreError::DuplicateTable(name.to_string()));
        }
        self.tables.insert(name.to_string(), Table::new(name, columns));
        Ok(self)
    }

    /// Append a raw row to a table, checking only its arity.
    pub fn insert_row(&mut self, table: &str, row: Row) -> StoreResult<&mut Self> {
        let target = self
            .tables
            .get_mut(table)
            .ok_or_else(|| StoreError::TableNotFound(table.to_string()))?;
        if row.arity() != target.columns().len() {
            return Err(StoreError::ArityMismatch {
                table: table.to_string(),
                expected: target.columns().len(),
                actual: row.arity(),
            });
        }
        target.push(row);
        Ok(self)
    }

    /// Append a row whose key must be unique within the table.
    fn insert_keyed(&mut self, table: String, key: Vec<i64>, row: Row) -> StoreResult<&mut Self> {
        let seen = self.keys.entry(table.clone()).or_default();
        if !seen.insert(key.clone()) {
            return Err(StoreError::duplicate_key(table, format!("{:?}", key)));
        }
        self.insert_row(&table, row)
    }

    pub fn add_user(&mut self, user: User) -> StoreResult<&mut Self> {
        let table = self.names.users.clone();
        self.insert_keyed(table, vec![user.id.raw()], user.to_row())
    }

    /// Add a friendship between two users. The pair is normalized so the
    /// smaller id is stored first; adding the same pair twice (in either
    /// order) is a duplicate.
    pub fn add_friendship(&mut self, a: i64, b: i64) -> StoreResult<&mut Self> {
        let friendship = Friendship::new(a, b);
        if friendship.is_self_pair() {
            return Err(StoreError::SelfFriendship(friendship.user1));
        }
        let table = self.names.friends.clone();
        let key = vec![friendship.user1.raw(), friendship.user2.raw()];
        self.insert_keyed(table, key, friendship.to_row())
    }

    /// Append a friendship row exactly as given, without normalizing.
    ///
    /// Stores that predate the ordering convention may hold pairs with the
    /// larger id first; queries must tolerate both orientations.
    pub fn add_friendship_raw(&mut self, user1: i64, user2: i64) -> StoreResult<&mut Self> {
        if user1 == user2 {
            return Err(StoreError::SelfFriendship(user1.into()));
        }
        let table = self.names.friends.clone();
        let key = vec![user1.min(user2), user1.max(user2)];
        let row = Row::new(vec![user1.into(), user2.into()]);
        self.insert_keyed(table, key, row)
    }

    pub fn add_city(&mut self, city: City) -> StoreResult<&mut Self> {
        let table = self.names.cities.clone();
        self.insert_keyed(table, vec![city.id.raw()], city.to_row())
    }

    /// Record a user's current city. At most one per user.
    pub fn add_current_city(&mut self, user: i64, city: i64) -> StoreResult<&mut Self> {
        let table = self.names.current_cities.clone();
        let link = UserCity::new(user, city);
        self.insert_keyed(table, vec![user], link.to_row())
    }

    /// Record a user's hometown. At most one per user.
    pub fn add_hometown_city(&mut self, user: i64, city: i64) -> StoreResult<&mut Self> {
        let table = self.names.hometown_cities.clone();
        let link = UserCity::new(user, city);
        self.insert_keyed(table, vec![user], link.to_row())
    }

    pub fn add_event(&mut self, event: Event) -> StoreResult<&mut Self> {
        let table = self.names.events.clone();
        self.insert_keyed(table, vec![event.id.raw()], event.to_row())
    }

    pub fn add_album(&mut self, album: Album) -> StoreResult<&mut Self> {
        let table = self.names.albums.clone();
        self.insert_keyed(table, vec![album.id.raw()], album.to_row())
    }

    pub fn add_photo(&mut self, photo: Photo) -> StoreResult<&mut Self> {
        let table = self.names.photos.clone();
        self.insert_keyed(table, vec![photo.id.raw()], photo.to_row())
    }

    /// Tag a user in a photo. Tagging the same user twice is a duplicate.
    pub fn add_tag(&mut self, photo: i64, subject: i64) -> StoreResult<&mut Self> {
        let table = self.names.tags.clone();
        let tag = Tag::new(photo, subject);
        self.insert_keyed(table, vec![photo, subject], tag.to_row())
    }

    /// Finish building.
    pub fn build(self) -> Database {
        log::debug!("built database with {} tables", self.tables.len());
        Database::from_tables(self.tables)
    }
}
