//! The production price table.

use common::Money;

use crate::{Addon, AddonId, AddonPriceType, Package, PackageKey, PricingCatalog, SqftTier, TierPrice};

/// The standard price table for media packages and addons.
///
/// Prices are whole-dollar amounts. Unknown keys resolve to None; the
/// pricing engine treats them as contributing nothing to a quote.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardCatalog;

impl StandardCatalog {
    pub fn new() -> Self {
        Self
    }

    fn package_table(key: &str) -> Option<(&'static str, [i64; 4])> {
        // Tier order matches SqftTier::ALL.
        match key {
            "essentials" => Some(("Essentials Package", [249, 299, 349, 399])),
            "signature" => Some(("Signature Package", [449, 499, 579, 659])),
            "premium" => Some(("Premium Package", [649, 719, 799, 899])),
            _ => None,
        }
    }

    fn tier_index(tier: SqftTier) -> usize {
        match tier {
            SqftTier::Lt2000 => 0,
            SqftTier::From2000To3000 => 1,
            SqftTier::From3000To4500 => 2,
            SqftTier::Over4500 => 3,
        }
    }

    fn addon_table(id: &str) -> Option<(&'static str, i64, AddonPriceType)> {
        match id {
            "rush-delivery" => Some(("Rush Delivery", 75, AddonPriceType::Flat)),
            "aerial-video" => Some(("Aerial Video Tour", 150, AddonPriceType::Flat)),
            "social-reel" => Some(("Social Media Reel", 125, AddonPriceType::Flat)),
            "exterior-drone" => Some(("Exterior Drone Photos", 95, AddonPriceType::Flat)),
            "twilight-photos" => Some(("Twilight Photos", 85, AddonPriceType::Flat)),
            "floor-plan" => Some(("2D Floor Plan", 65, AddonPriceType::Flat)),
            "virtual-tour" => Some(("3D Virtual Tour", 195, AddonPriceType::Flat)),
            "premium-staging" => Some(("Premium Virtual Staging", 40, AddonPriceType::PerUnit)),
            "extra-staging" => Some(("Additional Virtual Staging", 25, AddonPriceType::PerUnit)),
            _ => None,
        }
    }

    const PACKAGE_KEYS: [&'static str; 3] = ["essentials", "signature", "premium"];

    const ADDON_IDS: [&'static str; 9] = [
        "rush-delivery",
        "aerial-video",
        "social-reel",
        "exterior-drone",
        "twilight-photos",
        "floor-plan",
        "virtual-tour",
        "premium-staging",
        "extra-staging",
    ];
}

impl PricingCatalog for StandardCatalog {
    fn package_price(&self, key: &PackageKey, tier: SqftTier) -> Option<Money> {
        let (_, prices) = Self::package_table(key.as_str())?;
        Some(Money::from_dollars(prices[Self::tier_index(tier)]))
    }

    fn package_name(&self, key: &PackageKey) -> Option<String> {
        Self::package_table(key.as_str()).map(|(name, _)| name.to_string())
    }

    fn addon(&self, id: &AddonId) -> Option<Addon> {
        Self::addon_table(id.as_str()).map(|(name, price, price_type)| {
            Addon::new(id.clone(), name, Money::from_dollars(price), price_type)
        })
    }

    fn packages(&self) -> Vec<Package> {
        Self::PACKAGE_KEYS
            .iter()
            .filter_map(|key| {
                let (name, prices) = Self::package_table(key)?;
                Some(Package {
                    key: PackageKey::new(*key),
                    name: name.to_string(),
                    prices: SqftTier::ALL
                        .iter()
                        .map(|tier| TierPrice {
                            tier: *tier,
                            price: Money::from_dollars(prices[Self::tier_index(*tier)]),
                        })
                        .collect(),
                })
            })
            .collect()
    }

    fn addons(&self) -> Vec<Addon> {
        Self::ADDON_IDS
            .iter()
            .filter_map(|id| self.addon(&AddonId::new(*id)))
            .collect()
    }
}
