//! Booking session aggregate.

use catalog::{AddonId, PackageKey, PricingCatalog, SqftTier};
use chrono::{DateTime, Utc};
use common::{Money, SessionId};
use serde::{Deserialize, Serialize};

use super::pricing::{self, PricingResult};
use super::recommend;
use super::steps;
use super::tracker::{SessionTracker, UtmParams};
use super::value_objects::{
    AddonSelection, AirspaceStatus, Coupon, CouponDiscount, ForecastDay, LoyaltyRedemption,
    PropertyAddress, SessionPatch, ShootSchedule, TravelFee,
};

/// Booking session aggregate root.
///
/// Single source of truth for the funnel. Every mutation goes through an
/// action method; actions are atomic and recompute exactly the derived
/// state that depends on them before returning, so callers always observe
/// a consistent quote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BookingSession {
    /// Current wizard step, 0 through 4.
    current_step: u8,

    package_key: Option<PackageKey>,
    sqft_tier: Option<SqftTier>,

    /// Selected addons, unique by id, in selection order.
    addons: Vec<AddonSelection>,

    property: Option<PropertyAddress>,

    /// Explicit square footage, when known more precisely than the tier.
    property_sqft: Option<u32>,

    schedule: Option<ShootSchedule>,

    coupon: Option<Coupon>,
    loyalty: Option<LoyaltyRedemption>,
    travel: Option<TravelFee>,

    #[serde(default)]
    airspace_status: AirspaceStatus,
    airspace_warnings: Vec<String>,
    weather_forecast: Vec<ForecastDay>,

    contact_name: String,
    contact_email: String,
    contact_phone: String,

    tracker: SessionTracker,

    /// Derived quote, rebuilt after every pricing-relevant mutation.
    pricing: PricingResult,

    /// Derived suggestions, rebuilt on package/tier change.
    recommended_addons: Vec<AddonId>,
}

// Query methods
impl BookingSession {
    /// Creates a fresh, uninitialized session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current_step(&self) -> u8 {
        self.current_step
    }

    pub fn package_key(&self) -> Option<&PackageKey> {
        self.package_key.as_ref()
    }

    pub fn sqft_tier(&self) -> Option<SqftTier> {
        self.sqft_tier
    }

    pub fn addons(&self) -> &[AddonSelection] {
        &self.addons
    }

    /// Returns a selection by addon id.
    pub fn get_addon(&self, id: &AddonId) -> Option<&AddonSelection> {
        self.addons.iter().find(|a| &a.id == id)
    }

    pub fn property(&self) -> Option<&PropertyAddress> {
        self.property.as_ref()
    }

    pub fn property_sqft(&self) -> Option<u32> {
        self.property_sqft
    }

    /// Square footage used by the recommendation rules: the explicit value
    /// when known, else the tier default.
    pub fn resolved_sqft(&self) -> u32 {
        recommend::resolve_sqft(self.property_sqft, self.sqft_tier)
    }

    pub fn schedule(&self) -> Option<&ShootSchedule> {
        self.schedule.as_ref()
    }

    pub fn coupon(&self) -> Option<&Coupon> {
        self.coupon.as_ref()
    }

    pub fn loyalty(&self) -> Option<&LoyaltyRedemption> {
        self.loyalty.as_ref()
    }

    pub fn travel(&self) -> Option<&TravelFee> {
        self.travel.as_ref()
    }

    pub fn airspace_status(&self) -> AirspaceStatus {
        self.airspace_status
    }

    pub fn airspace_warnings(&self) -> &[String] {
        &self.airspace_warnings
    }

    pub fn weather_forecast(&self) -> &[ForecastDay] {
        &self.weather_forecast
    }

    pub fn contact_name(&self) -> &str {
        &self.contact_name
    }

    pub fn contact_email(&self) -> &str {
        &self.contact_email
    }

    pub fn contact_phone(&self) -> &str {
        &self.contact_phone
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.tracker.session_id()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.tracker.created_at()
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.tracker.last_updated_at()
    }

    pub fn utm(&self) -> Option<&UtmParams> {
        self.tracker.utm()
    }

    pub fn is_abandoned(&self) -> bool {
        self.tracker.is_abandoned()
    }

    pub fn recovery_email_sent(&self) -> bool {
        self.tracker.recovery_email_sent()
    }

    /// The current quote.
    pub fn pricing(&self) -> &PricingResult {
        &self.pricing
    }

    /// Current addon suggestions, disjoint from selections, at most three.
    pub fn recommended_addons(&self) -> &[AddonId] {
        &self.recommended_addons
    }

    /// Whether forward navigation is permitted from the current step.
    pub fn can_proceed(&self) -> bool {
        steps::can_advance(self.current_step, self)
    }
}

// Actions
impl BookingSession {
    /// Initializes session identity and captures UTM attribution.
    ///
    /// Idempotent: an existing `session_id` is never overwritten, and UTM
    /// parameters are captured only on the first call. Always refreshes
    /// `last_updated_at`.
    pub fn init(&mut self, utm_query: Option<&str>) {
        self.tracker.init(utm_query);
    }

    /// Jumps directly to a step. Not clamped; staying in range is the
    /// caller's contract.
    pub fn set_step(&mut self, step: u8) {
        self.current_step = step;
    }

    /// Advances one step, clamped at the last step.
    pub fn next_step(&mut self) {
        self.current_step = self.current_step.saturating_add(1).min(steps::LAST_STEP);
        self.tracker.touch();
    }

    /// Goes back one step, clamped at the first step. Does not refresh
    /// `last_updated_at`.
    pub fn prev_step(&mut self) {
        self.current_step = self.current_step.saturating_sub(1).max(steps::FIRST_STEP);
    }

    /// Shallow-merges the patch's populated fields.
    pub fn apply_patch(&mut self, patch: SessionPatch) {
        if let Some(name) = patch.contact_name {
            self.contact_name = name;
        }
        if let Some(email) = patch.contact_email {
            self.contact_email = email;
        }
        if let Some(phone) = patch.contact_phone {
            self.contact_phone = phone;
        }
        if let Some(sqft) = patch.property_sqft {
            self.property_sqft = Some(sqft);
        }
        if let Some(status) = patch.airspace_status {
            self.airspace_status = status;
        }
        if let Some(warnings) = patch.airspace_warnings {
            self.airspace_warnings = warnings;
        }
        if let Some(forecast) = patch.weather_forecast {
            self.weather_forecast = forecast;
        }
        self.tracker.touch();
    }

    /// Selects the package and size tier, then recomputes the quote and
    /// the addon suggestions (pricing first, so suggestions see settled
    /// selections).
    pub fn set_package(
        &mut self,
        key: PackageKey,
        tier: SqftTier,
        catalog: &impl PricingCatalog,
    ) {
        self.package_key = Some(key);
        self.sqft_tier = Some(tier);
        self.recompute_pricing(catalog);
        self.recompute_recommendations();
        self.tracker.touch();
    }

    /// Toggles an addon: removes it if selected, else selects it at
    /// quantity 1. Recomputes the quote only.
    pub fn toggle_addon(&mut self, id: AddonId, catalog: &impl PricingCatalog) {
        match self.addons.iter().position(|a| a.id == id) {
            Some(index) => {
                self.addons.remove(index);
            }
            None => self.addons.push(AddonSelection::new(id, 1)),
        }
        self.recompute_pricing(catalog);
        self.tracker.touch();
    }

    /// Sets an addon's quantity. Quantity 0 removes the selection; setting
    /// a quantity on an unselected addon selects it.
    pub fn set_addon_quantity(
        &mut self,
        id: AddonId,
        quantity: u32,
        catalog: &impl PricingCatalog,
    ) {
        match self.addons.iter().position(|a| a.id == id) {
            Some(index) if quantity == 0 => {
                self.addons.remove(index);
            }
            Some(index) => self.addons[index].quantity = quantity,
            None if quantity > 0 => self.addons.push(AddonSelection::new(id, quantity)),
            None => {}
        }
        self.recompute_pricing(catalog);
        self.tracker.touch();
    }

    /// Sets the full property address in one step. Price-independent.
    pub fn set_property(&mut self, property: PropertyAddress) {
        self.property = Some(property);
        self.tracker.touch();
    }

    /// Sets the shoot date and time together. Price-independent.
    pub fn set_schedule(&mut self, schedule: ShootSchedule) {
        self.schedule = Some(schedule);
        self.tracker.touch();
    }

    /// Applies a validated coupon and recomputes the quote.
    pub fn apply_coupon(
        &mut self,
        code: impl Into<String>,
        discount: CouponDiscount,
        catalog: &impl PricingCatalog,
    ) {
        self.coupon = Some(Coupon {
            code: code.into(),
            discount,
        });
        self.recompute_pricing(catalog);
        self.tracker.touch();
    }

    /// Clears the coupon and recomputes the quote.
    pub fn remove_coupon(&mut self, catalog: &impl PricingCatalog) {
        self.coupon = None;
        self.recompute_pricing(catalog);
        self.tracker.touch();
    }

    /// Sets the loyalty redemption (points plus pre-resolved value) and
    /// recomputes the quote.
    pub fn set_loyalty_points(&mut self, points: u32, value: Money, catalog: &impl PricingCatalog) {
        self.loyalty = Some(LoyaltyRedemption { points, value });
        self.recompute_pricing(catalog);
        self.tracker.touch();
    }

    /// Sets the travel surcharge and recomputes the quote.
    pub fn set_travel_fee(&mut self, travel: TravelFee, catalog: &impl PricingCatalog) {
        self.travel = Some(travel);
        self.recompute_pricing(catalog);
        self.tracker.touch();
    }

    /// Flags the session as abandoned. Idempotent, leaves
    /// `last_updated_at` alone so abandonment timers stay meaningful.
    pub fn mark_abandoned(&mut self) {
        self.tracker.mark_abandoned();
    }

    /// Records that a recovery email went out. Idempotent.
    pub fn mark_recovery_email_sent(&mut self) {
        self.tracker.mark_recovery_email_sent();
    }

    /// Restores every field to its initial default, including derived
    /// state and session identity.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    fn recompute_pricing(&mut self, catalog: &impl PricingCatalog) {
        self.pricing = pricing::price_session(catalog, self);
    }

    fn recompute_recommendations(&mut self) {
        self.recommended_addons = recommend::recommend_addons(
            self.package_key.as_ref(),
            self.resolved_sqft(),
            &self.addons,
        );
    }
}
