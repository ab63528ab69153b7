//! Package and property-size-tier types.

use common::Money;
use serde::{Deserialize, Serialize};

/// Key identifying a media package (e.g. "essentials", "signature").
///
/// Package keys are catalog data, not a closed set, so this stays a string
/// newtype rather than an enum.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageKey(String);

impl PackageKey {
    /// Creates a new package key from a string.
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PackageKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for PackageKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<&str> for PackageKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl AsRef<str> for PackageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Banded property-size category used for base pricing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SqftTier {
    /// Under 2,000 sqft.
    #[serde(rename = "lt2000")]
    Lt2000,

    /// 2,000 to 3,000 sqft.
    #[serde(rename = "2000to3000")]
    From2000To3000,

    /// 3,000 to 4,500 sqft.
    #[serde(rename = "3000to4500")]
    From3000To4500,

    /// Over 4,500 sqft.
    #[serde(rename = "gt4500")]
    Over4500,
}

impl SqftTier {
    /// All tiers, smallest first.
    pub const ALL: [SqftTier; 4] = [
        SqftTier::Lt2000,
        SqftTier::From2000To3000,
        SqftTier::From3000To4500,
        SqftTier::Over4500,
    ];

    /// Representative square footage for the tier, used when no explicit
    /// property square footage is known.
    pub fn default_sqft(&self) -> u32 {
        match self {
            SqftTier::Lt2000 => 1_500,
            SqftTier::From2000To3000 => 2_500,
            SqftTier::From3000To4500 => 3_750,
            SqftTier::Over4500 => 5_500,
        }
    }

    /// Returns the tier key as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            SqftTier::Lt2000 => "lt2000",
            SqftTier::From2000To3000 => "2000to3000",
            SqftTier::From3000To4500 => "3000to4500",
            SqftTier::Over4500 => "gt4500",
        }
    }
}

impl std::fmt::Display for SqftTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A package with its tier price table, as listed by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Package {
    /// The package key.
    pub key: PackageKey,

    /// Human-readable package name.
    pub name: String,

    /// Base price per size tier, smallest tier first.
    pub prices: Vec<TierPrice>,
}

/// Base price for a package at one size tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPrice {
    pub tier: SqftTier,
    pub price: Money,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_key_string_conversion() {
        let key = PackageKey::new("signature");
        assert_eq!(key.as_str(), "signature");

        let key2: PackageKey = "essentials".into();
        assert_eq!(key2.as_str(), "essentials");
    }

    #[test]
    fn sqft_tier_default_sqft_is_monotonic() {
        let mut previous = 0;
        for tier in SqftTier::ALL {
            assert!(tier.default_sqft() > previous);
            previous = tier.default_sqft();
        }
    }

    #[test]
    fn sqft_tier_serialization_uses_band_keys() {
        let json = serde_json::to_string(&SqftTier::Lt2000).unwrap();
        assert_eq!(json, "\"lt2000\"");

        let tier: SqftTier = serde_json::from_str("\"2000to3000\"").unwrap();
        assert_eq!(tier, SqftTier::From2000To3000);
    }

    #[test]
    fn sqft_tier_display() {
        assert_eq!(SqftTier::Over4500.to_string(), "gt4500");
    }
}
