//! Quote computation.
//!
//! Pricing is recomputed in full after every mutation that can affect it.
//! The breakdown is rebuilt from scratch each time so there is no
//! incremental drift and no stale lines.

use catalog::{AddonPriceType, PricingCatalog};
use common::Money;
use serde::{Deserialize, Serialize};

use super::aggregate::BookingSession;
use super::value_objects::CouponDiscount;

/// One line of the itemized quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Display name of the line.
    pub name: String,

    /// Line amount. Negative for discount lines.
    pub price: Money,

    /// Quantity, present only for per-unit addon lines.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

/// The fully derived price quote.
///
/// Never hand-mutated; always produced whole by [`price_session`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub package_price: Money,
    pub addons_total: Money,
    pub travel_fee: Money,
    pub coupon_discount: Money,
    pub loyalty_discount: Money,
    pub subtotal: Money,

    /// Sales tax. Media services are untaxed, so this is always zero, but
    /// the quote contract keeps the field for downstream consumers.
    pub tax: Money,

    pub total: Money,

    /// Itemized lines: package, addons, travel fee, then discounts.
    pub breakdown: Vec<LineItem>,
}

/// Computes the quote for the session's current selections.
///
/// Pure and deterministic: the same session state and catalog always
/// produce the same result. Unknown addon ids contribute nothing and get
/// no breakdown line.
pub fn price_session<C: PricingCatalog>(catalog: &C, session: &BookingSession) -> PricingResult {
    let mut breakdown = Vec::new();

    // 1. Package base price. An unselected package prices at zero.
    let mut package_price = Money::zero();
    if let (Some(key), Some(tier)) = (session.package_key(), session.sqft_tier()) {
        if let Some(price) = catalog.package_price(key, tier) {
            package_price = price;
            let name = catalog
                .package_name(key)
                .unwrap_or_else(|| key.to_string());
            breakdown.push(LineItem {
                name,
                price,
                quantity: None,
            });
        }
    }

    // 2. Addons, in selection order.
    let mut addons_total = Money::zero();
    for selection in session.addons() {
        let Some(addon) = catalog.addon(&selection.id) else {
            continue;
        };
        let (line_price, quantity) = match addon.price_type {
            AddonPriceType::Flat => (addon.price, None),
            AddonPriceType::PerUnit => (
                addon.price.multiply(selection.quantity),
                Some(selection.quantity),
            ),
        };
        addons_total += line_price;
        breakdown.push(LineItem {
            name: addon.name,
            price: line_price,
            quantity,
        });
    }

    // 3. Travel fee.
    let travel_fee = session.travel().map(|t| t.fee).unwrap_or_default();
    if travel_fee.is_positive() {
        breakdown.push(LineItem {
            name: "Travel Fee".to_string(),
            price: travel_fee,
            quantity: None,
        });
    }

    let subtotal = package_price + addons_total + travel_fee;

    // 4. Coupon, computed against the pre-loyalty subtotal.
    let coupon_discount = match session.coupon() {
        Some(coupon) => match coupon.discount {
            CouponDiscount::Percent(pct) => subtotal.percent(pct),
            CouponDiscount::Fixed(amount) => amount,
        },
        None => Money::zero(),
    };
    if coupon_discount.is_positive() {
        let code = session.coupon().map(|c| c.code.as_str()).unwrap_or("");
        breakdown.push(LineItem {
            name: format!("Coupon ({code})"),
            price: coupon_discount.negate(),
            quantity: None,
        });
    }

    // 5. Loyalty value is pre-resolved by the caller.
    let loyalty_discount = session.loyalty().map(|l| l.value).unwrap_or_default();
    if loyalty_discount.is_positive() {
        breakdown.push(LineItem {
            name: "Loyalty Redemption".to_string(),
            price: loyalty_discount.negate(),
            quantity: None,
        });
    }

    // 6. Discounts can exceed the subtotal; the total never goes negative.
    let total = (subtotal - coupon_discount - loyalty_discount).floor_at_zero();

    PricingResult {
        package_price,
        addons_total,
        travel_fee,
        coupon_discount,
        loyalty_discount,
        subtotal,
        tax: Money::zero(),
        total,
        breakdown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{SqftTier, StandardCatalog};
    use common::Money;

    use crate::session::value_objects::TravelFee;

    fn catalog() -> StandardCatalog {
        StandardCatalog::new()
    }

    fn signature_session() -> BookingSession {
        let mut session = BookingSession::new();
        session.set_package("signature".into(), SqftTier::Lt2000, &catalog());
        session
    }

    #[test]
    fn empty_session_prices_at_zero() {
        let session = BookingSession::new();
        let pricing = price_session(&catalog(), &session);

        assert_eq!(pricing.package_price, Money::zero());
        assert_eq!(pricing.subtotal, Money::zero());
        assert_eq!(pricing.total, Money::zero());
        assert!(pricing.breakdown.is_empty());
    }

    #[test]
    fn subtotal_is_package_plus_addons_plus_travel() {
        let mut session = signature_session();
        session.toggle_addon("rush-delivery".into(), &catalog());
        session.set_travel_fee(
            TravelFee {
                fee: Money::from_dollars(25),
                distance_miles: 50.0,
                duration_minutes: 60,
            },
            &catalog(),
        );

        let pricing = price_session(&catalog(), &session);
        assert_eq!(pricing.package_price, Money::from_dollars(449));
        assert_eq!(pricing.addons_total, Money::from_dollars(75));
        assert_eq!(pricing.travel_fee, Money::from_dollars(25));
        assert_eq!(pricing.subtotal, Money::from_dollars(549));
        assert_eq!(pricing.total, Money::from_dollars(549));
    }

    #[test]
    fn percent_coupon_rounds_against_pre_loyalty_subtotal() {
        let mut session = signature_session();
        session.toggle_addon("rush-delivery".into(), &catalog());
        session.set_travel_fee(
            TravelFee {
                fee: Money::from_dollars(25),
                distance_miles: 50.0,
                duration_minutes: 60,
            },
            &catalog(),
        );
        session.apply_coupon("SAVE10", CouponDiscount::Percent(10), &catalog());

        let pricing = price_session(&catalog(), &session);
        assert_eq!(pricing.coupon_discount, Money::from_dollars(55));
        assert_eq!(pricing.total, Money::from_dollars(494));
    }

    #[test]
    fn oversized_fixed_coupon_clamps_total_at_zero() {
        let mut session = signature_session();
        session.apply_coupon(
            "HUGE",
            CouponDiscount::Fixed(Money::from_dollars(1000)),
            &catalog(),
        );

        let pricing = price_session(&catalog(), &session);
        assert_eq!(pricing.subtotal, Money::from_dollars(449));
        assert_eq!(pricing.coupon_discount, Money::from_dollars(1000));
        assert_eq!(pricing.total, Money::zero());
    }

    #[test]
    fn loyalty_discount_applies_after_coupon() {
        let mut session = signature_session();
        session.apply_coupon("SAVE10", CouponDiscount::Percent(10), &catalog());
        session.set_loyalty_points(500, Money::from_dollars(25), &catalog());

        let pricing = price_session(&catalog(), &session);
        // 449 - round(44.9) - 25
        assert_eq!(pricing.coupon_discount, Money::from_dollars(45));
        assert_eq!(pricing.loyalty_discount, Money::from_dollars(25));
        assert_eq!(pricing.total, Money::from_dollars(379));
    }

    #[test]
    fn per_unit_addons_multiply_by_quantity() {
        let mut session = signature_session();
        session.set_addon_quantity("premium-staging".into(), 3, &catalog());

        let pricing = price_session(&catalog(), &session);
        assert_eq!(pricing.addons_total, Money::from_dollars(120));

        let line = pricing
            .breakdown
            .iter()
            .find(|l| l.name == "Premium Virtual Staging")
            .unwrap();
        assert_eq!(line.price, Money::from_dollars(120));
        assert_eq!(line.quantity, Some(3));
    }

    #[test]
    fn flat_addons_ignore_quantity() {
        let mut session = signature_session();
        session.set_addon_quantity("rush-delivery".into(), 4, &catalog());

        let pricing = price_session(&catalog(), &session);
        assert_eq!(pricing.addons_total, Money::from_dollars(75));

        let line = pricing
            .breakdown
            .iter()
            .find(|l| l.name == "Rush Delivery")
            .unwrap();
        assert_eq!(line.quantity, None);
    }

    #[test]
    fn unknown_addon_contributes_nothing_and_has_no_line() {
        let mut session = signature_session();
        session.toggle_addon("jet-ski".into(), &catalog());
        session.toggle_addon("rush-delivery".into(), &catalog());

        let pricing = price_session(&catalog(), &session);
        assert_eq!(pricing.addons_total, Money::from_dollars(75));
        assert!(pricing.breakdown.iter().all(|l| l.name != "jet-ski"));
    }

    #[test]
    fn breakdown_line_order_is_stable() {
        let mut session = signature_session();
        session.toggle_addon("rush-delivery".into(), &catalog());
        session.toggle_addon("twilight-photos".into(), &catalog());
        session.set_travel_fee(
            TravelFee {
                fee: Money::from_dollars(25),
                distance_miles: 50.0,
                duration_minutes: 60,
            },
            &catalog(),
        );
        session.apply_coupon("SAVE10", CouponDiscount::Percent(10), &catalog());
        session.set_loyalty_points(200, Money::from_dollars(10), &catalog());

        let pricing = price_session(&catalog(), &session);
        let names: Vec<&str> = pricing.breakdown.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(
            names,
            [
                "Signature Package",
                "Rush Delivery",
                "Twilight Photos",
                "Travel Fee",
                "Coupon (SAVE10)",
                "Loyalty Redemption",
            ]
        );
    }

    #[test]
    fn zero_travel_fee_gets_no_line() {
        let mut session = signature_session();
        session.set_travel_fee(
            TravelFee {
                fee: Money::zero(),
                distance_miles: 5.0,
                duration_minutes: 12,
            },
            &catalog(),
        );

        let pricing = price_session(&catalog(), &session);
        assert!(pricing.breakdown.iter().all(|l| l.name != "Travel Fee"));
        assert_eq!(pricing.breakdown.len(), 1);
    }

    #[test]
    fn discount_lines_are_negative() {
        let mut session = signature_session();
        session.apply_coupon(
            "FLAT50",
            CouponDiscount::Fixed(Money::from_dollars(50)),
            &catalog(),
        );

        let pricing = price_session(&catalog(), &session);
        let line = pricing
            .breakdown
            .iter()
            .find(|l| l.name == "Coupon (FLAT50)")
            .unwrap();
        assert_eq!(line.price, Money::from_dollars(-50));
    }

    #[test]
    fn tax_is_always_zero() {
        let mut session = signature_session();
        session.toggle_addon("aerial-video".into(), &catalog());

        let pricing = price_session(&catalog(), &session);
        assert_eq!(pricing.tax, Money::zero());
    }
}
