//! Zone Model

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Service zone (territory grouping customers and service personnel)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    pub id: i64,
    pub name: String,
    #[serde(default = "default_active")]
    pub is_active: bool,
    #[serde(default)]
    pub service_persons: Vec<ServicePerson>,
}

fn default_active() -> bool {
    true
}

/// Service person assigned to a zone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServicePerson {
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Zone filter chosen on the intake form.
///
/// `All` searches customers across every zone; it must never be persisted
/// on a ticket. On the wire it is the string `"all"`, a concrete zone is its
/// numeric id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZoneSelection {
    Zone(i64),
    All,
}

const ALL_ZONES: &str = "all";

impl ZoneSelection {
    pub fn is_all(&self) -> bool {
        matches!(self, ZoneSelection::All)
    }

    /// Concrete zone id, `None` for the all-zones sentinel
    pub fn zone_id(&self) -> Option<i64> {
        match self {
            ZoneSelection::Zone(id) => Some(*id),
            ZoneSelection::All => None,
        }
    }
}

impl fmt::Display for ZoneSelection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneSelection::Zone(id) => write!(f, "{}", id),
            ZoneSelection::All => f.write_str(ALL_ZONES),
        }
    }
}

impl From<i64> for ZoneSelection {
    fn from(id: i64) -> Self {
        ZoneSelection::Zone(id)
    }
}

impl Serialize for ZoneSelection {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ZoneSelection::Zone(id) => serializer.serialize_i64(*id),
            ZoneSelection::All => serializer.serialize_str(ALL_ZONES),
        }
    }
}

impl<'de> Deserialize<'de> for ZoneSelection {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Id(i64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Id(id) => Ok(ZoneSelection::Zone(id)),
            Raw::Text(s) if s == ALL_ZONES => Ok(ZoneSelection::All),
            // form values arrive as strings
            Raw::Text(s) => s.trim().parse().map(ZoneSelection::Zone).map_err(|_| {
                de::Error::invalid_value(de::Unexpected::Str(&s), &"a zone id or \"all\"")
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_deserialize_defaults() {
        let zone: Zone = serde_json::from_str(r#"{"id":1,"name":"North"}"#).unwrap();
        assert_eq!(zone.id, 1);
        assert_eq!(zone.name, "North");
        assert!(zone.is_active);
        assert!(zone.service_persons.is_empty());
    }

    #[test]
    fn test_zone_selection_wire_format() {
        assert_eq!(serde_json::to_string(&ZoneSelection::Zone(7)).unwrap(), "7");
        assert_eq!(serde_json::to_string(&ZoneSelection::All).unwrap(), "\"all\"");

        let all: ZoneSelection = serde_json::from_str("\"all\"").unwrap();
        assert!(all.is_all());
        let zone: ZoneSelection = serde_json::from_str("3").unwrap();
        assert_eq!(zone.zone_id(), Some(3));
        let from_form: ZoneSelection = serde_json::from_str("\"12\"").unwrap();
        assert_eq!(from_form, ZoneSelection::Zone(12));
        assert!(serde_json::from_str::<ZoneSelection>("\"north\"").is_err());
    }
}
