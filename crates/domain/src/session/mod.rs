//! Booking session aggregate and related types.

mod aggregate;
mod pricing;
mod recommend;
mod service;
mod steps;
mod tracker;
mod value_objects;

pub use aggregate::BookingSession;
pub use pricing::{LineItem, PricingResult, price_session};
pub use recommend::{MAX_RECOMMENDATIONS, recommend_addons, resolve_sqft};
pub use service::FunnelService;
pub use steps::{FIRST_STEP, LAST_STEP, can_advance};
pub use tracker::{SessionTracker, UtmParams};
pub use value_objects::{
    AddonSelection, AirspaceStatus, Coupon, CouponDiscount, ForecastDay, LoyaltyRedemption,
    PropertyAddress, SessionPatch, ShootSchedule, TravelFee,
};
