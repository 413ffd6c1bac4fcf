//! Item Identifiers
//!
//! Persisted items carry the server's integer id. Items added in edit mode
//! carry a temporary `tmp-<n>` token until the save round-trip assigns a
//! real one. The two forms never compare equal.

use std::fmt;
use std::str::FromStr;

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::LayoutError;

/// Reserved prefix for client-generated ids
pub const TEMP_ID_PREFIX: &str = "tmp-";

/// Identifier of a layout item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ItemId {
    /// Assigned by the server
    Persisted(u64),
    /// Issued locally for an unsaved item
    Temporary(u32),
}

impl ItemId {
    pub fn is_temporary(&self) -> bool {
        matches!(self, ItemId::Temporary(_))
    }

    /// The server id, or None for temporary items
    pub fn server_id(&self) -> Option<u64> {
        match self {
            ItemId::Persisted(id) => Some(*id),
            ItemId::Temporary(_) => None,
        }
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ItemId::Persisted(id) => write!(f, "{}", id),
            ItemId::Temporary(n) => write!(f, "{}{}", TEMP_ID_PREFIX, n),
        }
    }
}

impl FromStr for ItemId {
    type Err = LayoutError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(rest) = s.strip_prefix(TEMP_ID_PREFIX) {
            return rest
                .parse::<u32>()
                .map(ItemId::Temporary)
                .map_err(|_| LayoutError::Decode(format!("invalid temporary id '{}'", s)));
        }
        s.parse::<u64>()
            .map(ItemId::Persisted)
            .map_err(|_| LayoutError::Decode(format!("invalid item id '{}'", s)))
    }
}

impl Serialize for ItemId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ItemId::Persisted(id) => serializer.serialize_u64(*id),
            ItemId::Temporary(_) => serializer.collect_str(self),
        }
    }
}

struct ItemIdVisitor;

impl<'de> Visitor<'de> for ItemIdVisitor {
    type Value = ItemId;

    fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("an integer id or a \"tmp-<n>\" string")
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<ItemId, E> {
        Ok(ItemId::Persisted(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<ItemId, E> {
        u64::try_from(v)
            .map(ItemId::Persisted)
            .map_err(|_| E::custom(format!("negative item id {}", v)))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<ItemId, E> {
        v.parse().map_err(|e: LayoutError| E::custom(e.to_string()))
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ItemIdVisitor)
    }
}

/// The container whose children form the current hierarchy level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ParentRef {
    /// Top level (buildings)
    #[default]
    Root,
    /// Children of a persisted item
    Item(u64),
}

impl ParentRef {
    pub fn from_server_id(id: Option<u64>) -> Self {
        id.map_or(ParentRef::Root, ParentRef::Item)
    }

    pub fn server_id(&self) -> Option<u64> {
        match self {
            ParentRef::Root => None,
            ParentRef::Item(id) => Some(*id),
        }
    }

    /// Value of the `parent_id` query parameter
    pub fn query_value(&self) -> String {
        match self {
            ParentRef::Root => "root".to_string(),
            ParentRef::Item(id) => id.to_string(),
        }
    }
}

impl Serialize for ParentRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.server_id().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ParentRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<u64>::deserialize(deserializer).map(ParentRef::from_server_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_and_persisted_never_equal() {
        assert_ne!(ItemId::Temporary(7), ItemId::Persisted(7));
        assert!(ItemId::Temporary(7).is_temporary());
        assert_eq!(ItemId::Temporary(7).server_id(), None);
        assert_eq!(ItemId::Persisted(7).server_id(), Some(7));
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(ItemId::Temporary(3).to_string(), "tmp-3");
        assert_eq!("tmp-3".parse::<ItemId>().unwrap(), ItemId::Temporary(3));
        assert_eq!("42".parse::<ItemId>().unwrap(), ItemId::Persisted(42));
        assert!("tmp-x".parse::<ItemId>().is_err());
        assert!("abc".parse::<ItemId>().is_err());
    }

    #[test]
    fn test_serde_forms() {
        assert_eq!(serde_json::to_string(&ItemId::Persisted(12)).unwrap(), "12");
        assert_eq!(serde_json::to_string(&ItemId::Temporary(2)).unwrap(), "\"tmp-2\"");
        assert_eq!(serde_json::from_str::<ItemId>("\"tmp-2\"").unwrap(), ItemId::Temporary(2));
        assert_eq!(serde_json::from_str::<ItemId>("\"15\"").unwrap(), ItemId::Persisted(15));
        assert!(serde_json::from_str::<ItemId>("-1").is_err());
    }

    #[test]
    fn test_parent_ref_wire_form() {
        assert_eq!(serde_json::to_string(&ParentRef::Root).unwrap(), "null");
        assert_eq!(serde_json::to_string(&ParentRef::Item(5)).unwrap(), "5");
        assert_eq!(ParentRef::Root.query_value(), "root");
        assert_eq!(ParentRef::Item(5).query_value(), "5");
        assert_eq!(serde_json::from_str::<ParentRef>("null").unwrap(), ParentRef::Root);
    }
}
