//! Identity types for Fakebook entities.
//!
//! All identifiers are 64-bit values that are:
//! - Unique within their table
//! - Immutable once assigned
//! - Ordered, so every id-ordered output list is well defined

use serde::Serialize;
use std::fmt;

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
        #[serde(transparent)]
        pub struct $name(pub i64);

        impl $name {
            /// Create a new id from a raw value.
            pub fn new(id: i64) -> Self {
                Self(id)
            }

            /// Get the raw value.
            pub fn raw(&self) -> i64 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "{}"), self.0)
            }
        }

        impl From<i64> for $name {
            fn from(id: i64) -> Self {
                Self(id)
            }
        }
    };
}

entity_id!(
    /// Unique identifier for a user.
    UserId,
    "u"
);
entity_id!(
    /// Unique identifier for a city.
    CityId,
    "c"
);
entity_id!(
    /// Unique identifier for an event.
    EventId,
    "ev"
);
entity_id!(
    /// Unique identifier for a photo album.
    AlbumId,
    "a"
);
entity_id!(
    /// Unique identifier for a photo.
    PhotoId,
    "p"
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_id_ordering() {
        let low = UserId::new(3);
        let high = UserId::new(17);

        assert!(low < high);
        assert_eq!(low.max(high), high);
        assert_eq!(UserId::from(3), low);
    }

    #[test]
    fn test_id_display() {
        assert_eq!(UserId::new(42).to_string(), "u42");
        assert_eq!(PhotoId::new(7).to_string(), "p7");
        assert_eq!(AlbumId::new(1).to_string(), "a1");
    }
}
