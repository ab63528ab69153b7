//! Domain layer for the booking funnel.
//!
//! This crate provides the funnel's core state engine:
//! - BookingSession aggregate with its action API
//! - Pure pricing recomputation with an itemized breakdown
//! - Heuristic addon recommendations
//! - Step-gating predicate for wizard navigation
//! - Session identity/UTM tracking and abandonment flags
//! - FunnelService dispatcher that persists a snapshot after every action

pub mod error;
pub mod session;

pub use error::FunnelError;
pub use session::{
    AddonSelection, AirspaceStatus, BookingSession, Coupon, CouponDiscount, ForecastDay,
    FunnelService, LineItem, LoyaltyRedemption, PricingResult, PropertyAddress, SessionPatch,
    SessionTracker, ShootSchedule, TravelFee, UtmParams,
};
