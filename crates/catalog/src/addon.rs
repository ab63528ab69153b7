//! Addon types.

use common::Money;
use serde::{Deserialize, Serialize};

/// Identifier for an addon service (e.g. "rush-delivery").
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AddonId(String);

impl AddonId {
    /// Creates a new addon id from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AddonId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AddonId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for AddonId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for AddonId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// How an addon's price applies to a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AddonPriceType {
    /// Charged once regardless of quantity.
    Flat,

    /// Charged per unit (e.g. per staged photo).
    PerUnit,
}

/// An addon service as resolved from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Addon {
    /// The addon id.
    pub id: AddonId,

    /// Human-readable addon name.
    pub name: String,

    /// Unit price (or flat price for non-per-unit addons).
    pub price: Money,

    /// Whether the price is flat or per unit.
    pub price_type: AddonPriceType,
}

impl Addon {
    /// Creates a new addon record.
    pub fn new(
        id: impl Into<AddonId>,
        name: impl Into<String>,
        price: Money,
        price_type: AddonPriceType,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price,
            price_type,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn addon_id_string_conversion() {
        let id = AddonId::new("rush-delivery");
        assert_eq!(id.as_str(), "rush-delivery");

        let id2: AddonId = "aerial-video".into();
        assert_eq!(id2.as_str(), "aerial-video");
    }

    #[test]
    fn addon_serialization_roundtrip() {
        let addon = Addon::new(
            "premium-staging",
            "Premium Virtual Staging",
            Money::from_dollars(40),
            AddonPriceType::PerUnit,
        );
        let json = serde_json::to_string(&addon).unwrap();
        let deserialized: Addon = serde_json::from_str(&json).unwrap();
        assert_eq!(addon, deserialized);
    }

    #[test]
    fn price_type_serialization_is_snake_case() {
        let json = serde_json::to_string(&AddonPriceType::PerUnit).unwrap();
        assert_eq!(json, "\"per_unit\"");
    }
}
