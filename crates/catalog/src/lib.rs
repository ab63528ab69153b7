//! Price catalog for the booking funnel.
//!
//! The catalog is pure lookup data: package key + size tier resolve to a
//! base price, addon ids resolve to a name, unit price, and price type.
//! Consumers depend on the [`PricingCatalog`] trait; [`StandardCatalog`]
//! carries the production price table.

mod addon;
mod package;
mod standard;

pub use addon::{Addon, AddonId, AddonPriceType};
pub use package::{Package, PackageKey, SqftTier, TierPrice};
pub use standard::StandardCatalog;

use common::Money;

/// Pure price lookup consumed by the pricing engine.
pub trait PricingCatalog: Send + Sync {
    /// Resolves the base price for a package at a given property size tier.
    ///
    /// Returns None for unknown package keys.
    fn package_price(&self, key: &PackageKey, tier: SqftTier) -> Option<Money>;

    /// Resolves the display name for a package.
    fn package_name(&self, key: &PackageKey) -> Option<String>;

    /// Resolves an addon by id.
    ///
    /// Returns None for unknown addon ids.
    fn addon(&self, id: &AddonId) -> Option<Addon>;

    /// Lists every package with its tier price table.
    fn packages(&self) -> Vec<Package>;

    /// Lists every addon.
    fn addons(&self) -> Vec<Addon>;
}
