use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Whether a property carries its plain value or a digest of it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PropertyType {
    /// The value is disclosed as-is.
    Raw,
    /// The value has already been replaced by its hash.
    Hash,
}

/// A single credential property.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Property {
    pub key: String,
    pub value: String,
    #[serde(rename = "type")]
    pub property_type: PropertyType,
}

impl Property {
    /// A property with a plain value.
    pub fn raw(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            property_type: PropertyType::Raw,
        }
    }

    /// A property whose value is already a digest.
    pub fn hashed(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            property_type: PropertyType::Hash,
        }
    }

    pub fn is_hashed(&self) -> bool {
        self.property_type == PropertyType::Hash
    }
}

/// Project properties onto a plain key/value map.
///
/// Hashed properties are left out. When a key repeats, the later record wins.
pub fn property_map(properties: &[Property]) -> BTreeMap<String, String> {
    properties
        .iter()
        .filter(|p| !p.is_hashed())
        .map(|p| (p.key.clone(), p.value.clone()))
        .collect()
}

/// Turn a plain key/value map into raw properties, in key order.
pub fn properties_from_map(map: &BTreeMap<String, String>) -> Vec<Property> {
    map.iter().map(|(k, v)| Property::raw(k.clone(), v.clone())).collect()
}
