use serde::ser::{SerializeMap, Serializer};
use serde::Serialize;

use crate::value::{JsonValue, Map};

/// One matched object entry, kept as its own `{key: value}` record.
#[derive(Debug, Clone, PartialEq)]
pub struct Match {
    pub key: String,
    pub value: JsonValue,
}

/// All matches of one search, in pre-order.
pub type ResultSet = Vec<Match>;

impl Match {
    pub fn new(key: impl Into<String>, value: JsonValue) -> Self {
        Self { key: key.into(), value }
    }
}

impl From<Match> for JsonValue {
    fn from(m: Match) -> Self {
        let mut map = Map::with_capacity(1);
        map.insert(m.key, m.value);
        JsonValue::Object(map)
    }
}

// Serializes as `{"<key>": <value>}`.
impl Serialize for Match {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.key, &self.value)?;
        map.end()
    }
}

/// A match together with where it was found.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocatedMatch {
    pub pointer: String, // JSON Pointer to the matched entry
    pub depth: usize,    // depth of the object holding the entry; root is 0
    #[serde(rename = "match")]
    pub entry: Match,
}
