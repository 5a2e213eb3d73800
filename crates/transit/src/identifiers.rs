//! Type-safe identifiers for transit entities.
//!
//! Identifiers wrap `Arc<str>` for cheap cloning; they are handed around
//! between selection state, fetch parameters, and display items.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

macro_rules! impl_identifier {
    ($name:ident) => {
        #[derive(Clone, Debug)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(s: impl AsRef<str>) -> Self {
                Self(s.as_ref().into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                Arc::ptr_eq(&self.0, &other.0) || self.0 == other.0
            }
        }

        impl Eq for $name {}

        impl Hash for $name {
            fn hash<H: Hasher>(&self, state: &mut H) {
                self.0.hash(state);
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self::new(s)
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self::new(s)
            }
        }
    };
}

impl_identifier!(RouteIdentifier);
impl_identifier!(StopIdentifier);

/// Index into a route's per-direction arrays (`direction_names`,
/// `direction_destinations`), used verbatim as the API's
/// `filter[direction_id]` value.
///
/// MBTA routes carry exactly two directions, so only 0 and 1 are valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DirectionId(u8);

impl DirectionId {
    pub fn from_index(index: usize) -> Option<Self> {
        (index < 2).then(|| Self(index as u8))
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for DirectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_equality_and_clone() {
        let id1 = RouteIdentifier::new("Red");
        let id2 = RouteIdentifier::new("Red");
        let id3 = id1.clone();

        assert_eq!(id1, id2);
        assert_eq!(id1, id3);
    }

    #[test]
    fn identifier_hash_lookup() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(StopIdentifier::new("70061"), 42);

        assert_eq!(map.get(&StopIdentifier::new("70061")), Some(&42));
    }

    #[test]
    fn identifier_display() {
        assert_eq!(RouteIdentifier::new("Orange").to_string(), "Orange");
    }

    #[test]
    fn direction_id_bounds() {
        assert_eq!(DirectionId::from_index(0).map(|d| d.index()), Some(0));
        assert_eq!(DirectionId::from_index(1).map(|d| d.to_string()).as_deref(), Some("1"));
        assert_eq!(DirectionId::from_index(2), None);
    }
}
