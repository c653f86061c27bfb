//! Table and column names of the social-network schema.
//!
//! Column names are fixed. Table names are configurable because deployments
//! usually keep every table under a shared, schema-qualified prefix.

/// Column names of the users table.
pub mod users {
    pub const USER_ID: &str = "USER_ID";
    pub const FIRST_NAME: &str = "FIRST_NAME";
    pub const LAST_NAME: &str = "LAST_NAME";
    pub const YEAR_OF_BIRTH: &str = "YEAR_OF_BIRTH";
    pub const MONTH_OF_BIRTH: &str = "MONTH_OF_BIRTH";
    pub const DAY_OF_BIRTH: &str = "DAY_OF_BIRTH";
    pub const GENDER: &str = "GENDER";

    pub const COLUMNS: &[&str] = &[
        USER_ID,
        FIRST_NAME,
        LAST_NAME,
        YEAR_OF_BIRTH,
        MONTH_OF_BIRTH,
        DAY_OF_BIRTH,
        GENDER,
    ];
}

/// Column names of the friends table.
pub mod friends {
    pub const USER1_ID: &str = "USER1_ID";
    pub const USER2_ID: &str = "USER2_ID";

    pub const COLUMNS: &[&str] = &[USER1_ID, USER2_ID];
}

/// Column names of the cities table.
pub mod cities {
    pub const CITY_ID: &str = "CITY_ID";
    pub const CITY_NAME: &str = "CITY_NAME";
    pub const STATE_NAME: &str = "STATE_NAME";
    pub const COUNTRY_NAME: &str = "COUNTRY_NAME";

    pub const COLUMNS: &[&str] = &[CITY_ID, CITY_NAME, STATE_NAME, COUNTRY_NAME];
}

/// Column names of the current-city association table.
pub mod current_cities {
    pub const USER_ID: &str = "USER_ID";
    pub const CURRENT_CITY_ID: &str = "CURRENT_CITY_ID";

    pub const COLUMNS: &[&str] = &[USER_ID, CURRENT_CITY_ID];
}

/// Column names of the hometown-city association table.
pub mod hometown_cities {
    pub const USER_ID: &str = "USER_ID";
    pub const HOMETOWN_CITY_ID: &str = "HOMETOWN_CITY_ID";

    pub const COLUMNS: &[&str] = &[USER_ID, HOMETOWN_CITY_ID];
}

/// Column names of the events table.
pub mod events {
    pub const EVENT_ID: &str = "EVENT_ID";
    pub const EVENT_CREATOR_ID: &str = "EVENT_CREATOR_ID";
    pub const EVENT_NAME: &str = "EVENT_NAME";
    pub const EVENT_CITY_ID: &str = "EVENT_CITY_ID";

    pub const COLUMNS: &[&str] = &[EVENT_ID, EVENT_CREATOR_ID, EVENT_NAME, EVENT_CITY_ID];
}

/// Column names of the albums table.
pub mod albums {
    pub const ALBUM_ID: &str = "ALBUM_ID";
    pub const ALBUM_OWNER_ID: &str = "ALBUM_OWNER_ID";
    pub const ALBUM_NAME: &str = "ALBUM_NAME";

    pub const COLUMNS: &[&str] = &[ALBUM_ID, ALBUM_OWNER_ID, ALBUM_NAME];
}

/// Column names of the photos table.
pub mod photos {
    pub const PHOTO_ID: &str = "PHOTO_ID";
    pub const ALBUM_ID: &str = "ALBUM_ID";
    pub const PHOTO_LINK: &str = "PHOTO_LINK";

    pub const COLUMNS: &[&str] = &[PHOTO_ID, ALBUM_ID, PHOTO_LINK];
}

/// Column names of the tags table.
pub mod tags {
    pub const TAG_PHOTO_ID: &str = "TAG_PHOTO_ID";
    pub const TAG_SUBJECT_ID: &str = "TAG_SUBJECT_ID";

    pub const COLUMNS: &[&str] = &[TAG_PHOTO_ID, TAG_SUBJECT_ID];
}

/// Physical names of every table the oracle reads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableNames {
    pub users: String,
    pub friends: String,
    pub cities: String,
    pub current_cities: String,
    pub hometown_cities: String,
    pub events: String,
    pub albums: String,
    pub photos: String,
    pub tags: String,
}

impl Default for TableNames {
    fn default() -> Self {
        Self {
            users: "USERS".to_string(),
            friends: "FRIENDS".to_string(),
            cities: "CITIES".to_string(),
            current_cities: "USER_CURRENT_CITIES".to_string(),
            hometown_cities: "USER_HOMETOWN_CITIES".to_string(),
            events: "USER_EVENTS".to_string(),
            albums: "ALBUMS".to_string(),
            photos: "PHOTOS".to_string(),
            tags: "TAGS".to_string(),
        }
    }
}

impl TableNames {
    /// Table names qualified with a shared prefix, e.g. `project2.Public_`
    /// gives `project2.Public_Users`, `project2.Public_Friends`, ...
    pub fn with_prefix(prefix: &str) -> Self {
        let name = |suffix: &str| format!("{}{}", prefix, suffix);
        Self {
            users: name("Users"),
            friends: name("Friends"),
            cities: name("Cities"),
            current_cities: name("User_Current_Cities"),
            hometown_cities: name("User_Hometown_Cities"),
            events: name("User_Events"),
            albums: name("Albums"),
            photos: name("Photos"),
            tags: name("Tags"),
        }
    }

    /// Every (table name, column layout) pair, in a fixed order.
    pub fn layouts(&self) -> [(&str, &'static [&'static str]); 9] {
        [
            (self.users.as_str(), users::COLUMNS),
            (self.friends.as_str(), friends::COLUMNS),
            (self.cities.as_str(), cities::COLUMNS),
            (self.current_cities.as_str(), current_cities::COLUMNS),
            (self.hometown_cities.as_str(), hometown_cities::COLUMNS),
            (self.events.as_str(), events::COLUMNS),
            (self.albums.as_str(), albums::COLUMNS),
            (self.photos.as_str(), photos::COLUMNS),
            (self.tags.as_str(), tags::COLUMNS),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefixed_names() {
        let names = TableNames::with_prefix("project2.Public_");

        assert_eq!(names.users, "project2.Public_Users");
        assert_eq!(names.hometown_cities, "project2.Public_User_Hometown_Cities");
    }

    #[test]
    fn test_layouts_cover_every_table() {
        let names = TableNames::default();
        let layouts = names.layouts();

        assert_eq!(layouts.len(), 9);
        assert_eq!(layouts[0], ("USERS", users::COLUMNS));
        assert_eq!(layouts[8].1, &[tags::TAG_PHOTO_ID, tags::TAG_SUBJECT_ID]);
    }
}
