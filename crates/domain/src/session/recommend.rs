//! Heuristic addon recommendations.
//!
//! Recomputed only when the package or size tier changes. Rules fire in
//! priority order; the final list is deduplicated, disjoint from current
//! selections, and truncated to [`MAX_RECOMMENDATIONS`].

use std::collections::HashSet;

use catalog::{AddonId, PackageKey, SqftTier};

use super::value_objects::AddonSelection;

/// Upper bound on the number of suggested addons.
pub const MAX_RECOMMENDATIONS: usize = 3;

/// Square footage above which staging/drone upsells kick in.
const LARGE_PROPERTY_SQFT: u32 = 3_000;

/// Resolves the square footage used by the recommendation rules: the
/// explicit value when known, else the tier's representative default.
pub fn resolve_sqft(explicit: Option<u32>, tier: Option<SqftTier>) -> u32 {
    explicit
        .or_else(|| tier.map(|t| t.default_sqft()))
        .unwrap_or(0)
}

/// Produces up to three suggested addon ids for the current selections.
///
/// Deterministic: the same inputs always produce the same list, in rule
/// priority order.
pub fn recommend_addons(
    package: Option<&PackageKey>,
    sqft: u32,
    selected: &[AddonSelection],
) -> Vec<AddonId> {
    let mut candidates: Vec<&str> = Vec::new();

    match package.map(PackageKey::as_str) {
        // Essentials excludes video, so push the short-form reel upsell.
        Some("essentials") => candidates.extend(["social-reel", "rush-delivery"]),
        Some("signature") => candidates.extend(["aerial-video", "premium-staging"]),
        _ => {}
    }

    if sqft > LARGE_PROPERTY_SQFT {
        candidates.extend(["extra-staging", "exterior-drone"]);
    }

    candidates.push("rush-delivery");

    let selected_ids: HashSet<&str> = selected.iter().map(|s| s.id.as_str()).collect();

    let mut suggestions: Vec<AddonId> = Vec::new();
    for candidate in candidates {
        if selected_ids.contains(candidate) {
            continue;
        }
        if suggestions.iter().any(|id| id.as_str() == candidate) {
            continue;
        }
        suggestions.push(AddonId::new(candidate));
        if suggestions.len() == MAX_RECOMMENDATIONS {
            break;
        }
    }

    suggestions
}
