//! Booking session endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, RawQuery, State};
use axum::http::StatusCode;
use catalog::StandardCatalog;
use common::{Money, SessionId};
use domain::{
    BookingSession, CouponDiscount, FunnelService, PricingResult, PropertyAddress, SessionPatch,
    ShootSchedule, TravelFee,
};
use serde::{Deserialize, Serialize};
use session_store::SessionStore;

use crate::error::ApiError;

/// Shared application state accessible from all handlers.
pub struct AppState<S: SessionStore> {
    pub funnel: FunnelService<S, StandardCatalog>,
}

// -- Request types --

#[derive(Deserialize)]
pub struct SelectPackageRequest {
    pub package_key: String,
    pub sqft_tier: catalog::SqftTier,
}

#[derive(Deserialize)]
pub struct ToggleAddonRequest {
    pub addon_id: String,
}

#[derive(Deserialize)]
pub struct AddonQuantityRequest {
    pub addon_id: String,
    pub quantity: u32,
}

#[derive(Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscountTypeRequest {
    Percent,
    Fixed,
}

#[derive(Deserialize)]
pub struct CouponRequest {
    pub code: String,
    pub discount_type: DiscountTypeRequest,
    /// Percentage for percent coupons, whole dollars for fixed coupons.
    pub amount: i64,
}

#[derive(Deserialize)]
pub struct LoyaltyRequest {
    pub points: u32,
    /// Pre-resolved redemption value in whole dollars.
    pub value: i64,
}

#[derive(Deserialize)]
pub struct TravelRequest {
    pub fee: i64,
    pub distance_miles: f64,
    pub duration_minutes: u32,
}

#[derive(Deserialize)]
pub struct PropertyRequest {
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub lat: f64,
    pub lng: f64,
    pub place_id: String,
}

#[derive(Deserialize)]
pub struct ScheduleRequest {
    pub date: chrono::NaiveDate,
    pub time: chrono::NaiveTime,
}

#[derive(Deserialize)]
pub struct GotoStepRequest {
    pub step: u8,
}

// -- Response types --

#[derive(Serialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub current_step: u8,
    pub can_proceed: bool,
    pub package_key: Option<String>,
    pub sqft_tier: Option<String>,
    pub addons: Vec<AddonSelectionResponse>,
    pub recommended_addons: Vec<String>,
    pub pricing: PricingResponse,
    pub is_abandoned: bool,
}

#[derive(Serialize)]
pub struct AddonSelectionResponse {
    pub addon_id: String,
    pub quantity: u32,
}

#[derive(Serialize)]
pub struct PricingResponse {
    pub package_price: i64,
    pub addons_total: i64,
    pub travel_fee: i64,
    pub coupon_discount: i64,
    pub loyalty_discount: i64,
    pub subtotal: i64,
    pub tax: i64,
    pub total: i64,
    pub breakdown: Vec<LineItemResponse>,
}

#[derive(Serialize)]
pub struct LineItemResponse {
    pub name: String,
    pub price: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl From<&PricingResult> for PricingResponse {
    fn from(pricing: &PricingResult) -> Self {
        Self {
            package_price: pricing.package_price.dollars(),
            addons_total: pricing.addons_total.dollars(),
            travel_fee: pricing.travel_fee.dollars(),
            coupon_discount: pricing.coupon_discount.dollars(),
            loyalty_discount: pricing.loyalty_discount.dollars(),
            subtotal: pricing.subtotal.dollars(),
            tax: pricing.tax.dollars(),
            total: pricing.total.dollars(),
            breakdown: pricing
                .breakdown
                .iter()
                .map(|line| LineItemResponse {
                    name: line.name.clone(),
                    price: line.price.dollars(),
                    quantity: line.quantity,
                })
                .collect(),
        }
    }
}

fn session_response(session: &BookingSession) -> SessionResponse {
    SessionResponse {
        session_id: session
            .session_id()
            .map(|id| id.to_string())
            .unwrap_or_default(),
        current_step: session.current_step(),
        can_proceed: session.can_proceed(),
        package_key: session.package_key().map(|k| k.to_string()),
        sqft_tier: session.sqft_tier().map(|t| t.to_string()),
        addons: session
            .addons()
            .iter()
            .map(|a| AddonSelectionResponse {
                addon_id: a.id.to_string(),
                quantity: a.quantity,
            })
            .collect(),
        recommended_addons: session
            .recommended_addons()
            .iter()
            .map(|id| id.to_string())
            .collect(),
        pricing: session.pricing().into(),
        is_abandoned: session.is_abandoned(),
    }
}

fn parse_session_id(id: &str) -> Result<SessionId, ApiError> {
    let uuid = uuid::Uuid::parse_str(id)
        .map_err(|e| ApiError::BadRequest(format!("Invalid session id: {e}")))?;
    Ok(SessionId::from(uuid))
}

// -- Handlers --

/// POST /sessions — start a new session; UTM attribution is read from the
/// request's query string.
#[tracing::instrument(skip(state, query))]
pub async fn create<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    RawQuery(query): RawQuery,
) -> Result<(StatusCode, Json<SessionResponse>), ApiError> {
    let session = state.funnel.start_session(query.as_deref()).await?;
    Ok((StatusCode::CREATED, Json(session_response(&session))))
}

/// GET /sessions/{id} — load a session from its last snapshot.
#[tracing::instrument(skip(state))]
pub async fn get<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .funnel
        .get_session(session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Session {id} not found")))?;

    Ok(Json(session_response(&session)))
}

/// GET /sessions/{id}/quote — the current itemized quote.
#[tracing::instrument(skip(state))]
pub async fn quote<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<PricingResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .funnel
        .get_session(session_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Session {id} not found")))?;

    Ok(Json(session.pricing().into()))
}

/// POST /sessions/{id}/package — select the package and size tier.
#[tracing::instrument(skip(state, req))]
pub async fn select_package<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<SelectPackageRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .funnel
        .select_package(session_id, req.package_key.into(), req.sqft_tier)
        .await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/addons/toggle — toggle an addon selection.
#[tracing::instrument(skip(state, req))]
pub async fn toggle_addon<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<ToggleAddonRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .funnel
        .toggle_addon(session_id, req.addon_id.into())
        .await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/addons/quantity — set an addon's quantity (0 removes).
#[tracing::instrument(skip(state, req))]
pub async fn set_addon_quantity<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<AddonQuantityRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .funnel
        .set_addon_quantity(session_id, req.addon_id.into(), req.quantity)
        .await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/coupon — apply a validated coupon.
#[tracing::instrument(skip(state, req))]
pub async fn apply_coupon<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<CouponRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let discount = match req.discount_type {
        DiscountTypeRequest::Percent => {
            let pct = u32::try_from(req.amount)
                .map_err(|_| ApiError::BadRequest("Invalid percent amount".to_string()))?;
            CouponDiscount::Percent(pct)
        }
        DiscountTypeRequest::Fixed => CouponDiscount::Fixed(Money::from_dollars(req.amount)),
    };
    let session = state
        .funnel
        .apply_coupon(session_id, req.code, discount)
        .await?;
    Ok(Json(session_response(&session)))
}

/// DELETE /sessions/{id}/coupon — remove any applied coupon.
#[tracing::instrument(skip(state))]
pub async fn remove_coupon<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state.funnel.remove_coupon(session_id).await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/loyalty — set the loyalty redemption.
#[tracing::instrument(skip(state, req))]
pub async fn set_loyalty<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<LoyaltyRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .funnel
        .set_loyalty_points(session_id, req.points, Money::from_dollars(req.value))
        .await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/travel — set the travel surcharge.
#[tracing::instrument(skip(state, req))]
pub async fn set_travel<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<TravelRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .funnel
        .set_travel_fee(
            session_id,
            TravelFee {
                fee: Money::from_dollars(req.fee),
                distance_miles: req.distance_miles,
                duration_minutes: req.duration_minutes,
            },
        )
        .await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/property — set the property address.
#[tracing::instrument(skip(state, req))]
pub async fn set_property<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<PropertyRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .funnel
        .set_property(
            session_id,
            PropertyAddress {
                address: req.address,
                city: req.city,
                state: req.state,
                zip: req.zip,
                lat: req.lat,
                lng: req.lng,
                place_id: req.place_id,
            },
        )
        .await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/schedule — set the shoot date and time.
#[tracing::instrument(skip(state, req))]
pub async fn set_schedule<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<ScheduleRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state
        .funnel
        .set_schedule(session_id, ShootSchedule::new(req.date, req.time))
        .await?;
    Ok(Json(session_response(&session)))
}

/// PATCH /sessions/{id}/form — merge a partial form update.
#[tracing::instrument(skip(state, patch))]
pub async fn update_form<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(patch): Json<SessionPatch>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state.funnel.update_form(session_id, patch).await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/advance — move to the next step if the gate allows.
#[tracing::instrument(skip(state))]
pub async fn advance<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state.funnel.advance(session_id).await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/back — move to the previous step.
#[tracing::instrument(skip(state))]
pub async fn back<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state.funnel.back(session_id).await?;
    Ok(Json(session_response(&session)))
}

/// PUT /sessions/{id}/step — jump directly to a step (not clamped).
#[tracing::instrument(skip(state, req))]
pub async fn goto_step<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
    Json(req): Json<GotoStepRequest>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state.funnel.goto_step(session_id, req.step).await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/abandon — flag the session as abandoned.
#[tracing::instrument(skip(state))]
pub async fn abandon<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state.funnel.abandon(session_id).await?;
    Ok(Json(session_response(&session)))
}

/// POST /sessions/{id}/recovery-email — record that a recovery email went out.
#[tracing::instrument(skip(state))]
pub async fn recovery_email<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session_id = parse_session_id(&id)?;
    let session = state.funnel.mark_recovery_email_sent(session_id).await?;
    Ok(Json(session_response(&session)))
}

/// DELETE /sessions/{id} — discard the session.
#[tracing::instrument(skip(state))]
pub async fn discard<S: SessionStore + 'static>(
    State(state): State<Arc<AppState<S>>>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let session_id = parse_session_id(&id)?;
    state.funnel.discard(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
