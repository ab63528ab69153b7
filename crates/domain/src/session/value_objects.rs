//! Value objects for the booking session.
//!
//! Fields the funnel sets together are grouped into one struct each, so a
//! partial write (coupon code without a discount, travel fee without a
//! distance) is unrepresentable.

use catalog::AddonId;
use chrono::{NaiveDate, NaiveTime};
use common::Money;
use serde::{Deserialize, Serialize};

/// A selected addon with its quantity.
///
/// Selections are unique by id and never stored at quantity 0; a quantity
/// update to 0 removes the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddonSelection {
    /// The addon id.
    pub id: AddonId,

    /// Quantity selected, always ≥ 1.
    pub quantity: u32,
}

impl AddonSelection {
    /// Creates a new selection.
    pub fn new(id: impl Into<AddonId>, quantity: u32) -> Self {
        Self {
            id: id.into(),
            quantity,
        }
    }
}

/// The property being shot, as resolved by the address autocomplete.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyAddress {
    /// Street address line.
    pub address: String,

    pub city: String,

    /// Two-letter state code.
    pub state: String,

    pub zip: String,

    pub lat: f64,

    pub lng: f64,

    /// Place id from the geocoding provider.
    pub place_id: String,
}

/// The scheduled shoot slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShootSchedule {
    pub date: NaiveDate,
    pub time: NaiveTime,
}

impl ShootSchedule {
    /// Creates a schedule from its parts.
    pub fn new(date: NaiveDate, time: NaiveTime) -> Self {
        Self { date, time }
    }
}

/// A validated coupon as supplied by the upstream coupon validator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// The coupon code as entered.
    pub code: String,

    /// The discount the validator resolved for the code.
    pub discount: CouponDiscount,
}

/// A percent- or fixed-amount discount applied to the pre-loyalty subtotal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CouponDiscount {
    /// Percentage of the subtotal, expressed as a whole number (10 = 10%).
    Percent(u32),

    /// Fixed currency amount.
    Fixed(Money),
}

/// A loyalty redemption with its pre-resolved currency value.
///
/// The value is supplied already-valued; this subsystem never recomputes it
/// from points.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoyaltyRedemption {
    pub points: u32,
    pub value: Money,
}

/// Travel surcharge for properties outside the service radius.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TravelFee {
    pub fee: Money,
    pub distance_miles: f64,
    pub duration_minutes: u32,
}

/// FAA airspace status for the property, when drone addons are in play.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AirspaceStatus {
    Clear,
    LaancRequired,
    Restricted,
    #[default]
    Unknown,
}

impl AirspaceStatus {
    /// Returns the status as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            AirspaceStatus::Clear => "clear",
            AirspaceStatus::LaancRequired => "laanc_required",
            AirspaceStatus::Restricted => "restricted",
            AirspaceStatus::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for AirspaceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One day of the weather forecast shown on the scheduling step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub high_f: i32,
    pub low_f: i32,
    pub condition: String,
    pub precipitation_chance: u8,
}

/// Typed partial update for the free-form session fields.
///
/// Only `Some` fields are merged; everything else is left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionPatch {
    pub contact_name: Option<String>,
    pub contact_email: Option<String>,
    pub contact_phone: Option<String>,

    /// Explicit property square footage, overriding the tier default for
    /// recommendations.
    pub property_sqft: Option<u32>,

    pub airspace_status: Option<AirspaceStatus>,
    pub airspace_warnings: Option<Vec<String>>,
    pub weather_forecast: Option<Vec<ForecastDay>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coupon_discount_serialization() {
        let percent = CouponDiscount::Percent(10);
        let json = serde_json::to_string(&percent).unwrap();
        assert_eq!(json, r#"{"type":"percent","value":10}"#);

        let fixed = CouponDiscount::Fixed(Money::from_dollars(50));
        let json = serde_json::to_string(&fixed).unwrap();
        let back: CouponDiscount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fixed);
    }

    #[test]
    fn airspace_status_defaults_to_unknown() {
        assert_eq!(AirspaceStatus::default(), AirspaceStatus::Unknown);
        assert_eq!(AirspaceStatus::LaancRequired.to_string(), "laanc_required");
    }

    #[test]
    fn session_patch_default_is_all_none() {
        let patch = SessionPatch::default();
        assert!(patch.contact_name.is_none());
        assert!(patch.property_sqft.is_none());
        assert!(patch.weather_forecast.is_none());
    }

    #[test]
    fn shoot_schedule_serialization_roundtrip() {
        let schedule = ShootSchedule {
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            time: NaiveTime::from_hms_opt(10, 30, 0).unwrap(),
        };
        let json = serde_json::to_string(&schedule).unwrap();
        let back: ShootSchedule = serde_json::from_str(&json).unwrap();
        assert_eq!(back, schedule);
    }
}
