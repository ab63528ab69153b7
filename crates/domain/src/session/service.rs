//! Funnel service: the action dispatcher UI layers talk to.
//!
//! Each call loads the session, applies exactly one aggregate action, and
//! persists the updated snapshot before returning, so persistence rides
//! along as a side effect of dispatch and the state shape stays
//! storage-free.

use catalog::{AddonId, PackageKey, PricingCatalog, SqftTier};
use common::{Money, SessionId};
use session_store::{SessionSnapshot, SessionStore};

use crate::error::FunnelError;

use super::aggregate::BookingSession;
use super::value_objects::{
    CouponDiscount, PropertyAddress, SessionPatch, ShootSchedule, TravelFee,
};

/// Service for driving booking sessions.
///
/// Generic over the snapshot store and the price catalog so tests can swap
/// either out.
pub struct FunnelService<S: SessionStore, C: PricingCatalog> {
    store: S,
    catalog: C,
}

impl<S: SessionStore, C: PricingCatalog> FunnelService<S, C> {
    /// Creates a new funnel service.
    pub fn new(store: S, catalog: C) -> Self {
        Self { store, catalog }
    }

    /// Returns a reference to the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns a reference to the price catalog.
    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Starts a new session, capturing UTM attribution from the supplied
    /// query string, and persists the first snapshot.
    #[tracing::instrument(skip(self))]
    pub async fn start_session(&self, utm_query: Option<&str>) -> Result<BookingSession, FunnelError> {
        let mut session = BookingSession::new();
        session.init(utm_query);
        self.persist(&session).await?;

        metrics::counter!("funnel_sessions_started").increment(1);
        if let Some(id) = session.session_id() {
            tracing::info!(session_id = %id, "session started");
        }

        Ok(session)
    }

    /// Loads a session from its last snapshot.
    ///
    /// Returns None if no snapshot exists.
    #[tracing::instrument(skip(self))]
    pub async fn get_session(&self, id: SessionId) -> Result<Option<BookingSession>, FunnelError> {
        match self.store.load(id).await? {
            Some(snapshot) => Ok(Some(snapshot.into_state()?)),
            None => Ok(None),
        }
    }

    /// Selects the package and size tier.
    #[tracing::instrument(skip(self))]
    pub async fn select_package(
        &self,
        id: SessionId,
        key: PackageKey,
        tier: SqftTier,
    ) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, catalog| {
            session.set_package(key, tier, catalog);
        })
        .await
    }

    /// Toggles an addon selection.
    #[tracing::instrument(skip(self))]
    pub async fn toggle_addon(
        &self,
        id: SessionId,
        addon: AddonId,
    ) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, catalog| {
            session.toggle_addon(addon, catalog);
        })
        .await
    }

    /// Sets an addon's quantity (0 removes it).
    #[tracing::instrument(skip(self))]
    pub async fn set_addon_quantity(
        &self,
        id: SessionId,
        addon: AddonId,
        quantity: u32,
    ) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, catalog| {
            session.set_addon_quantity(addon, quantity, catalog);
        })
        .await
    }

    /// Applies a coupon the upstream validator already resolved.
    #[tracing::instrument(skip(self))]
    pub async fn apply_coupon(
        &self,
        id: SessionId,
        code: String,
        discount: CouponDiscount,
    ) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, catalog| {
            session.apply_coupon(code, discount, catalog);
        })
        .await
    }

    /// Removes any applied coupon.
    #[tracing::instrument(skip(self))]
    pub async fn remove_coupon(&self, id: SessionId) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, catalog| {
            session.remove_coupon(catalog);
        })
        .await
    }

    /// Sets the loyalty redemption.
    #[tracing::instrument(skip(self))]
    pub async fn set_loyalty_points(
        &self,
        id: SessionId,
        points: u32,
        value: Money,
    ) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, catalog| {
            session.set_loyalty_points(points, value, catalog);
        })
        .await
    }

    /// Sets the travel surcharge.
    #[tracing::instrument(skip(self))]
    pub async fn set_travel_fee(
        &self,
        id: SessionId,
        travel: TravelFee,
    ) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, catalog| {
            session.set_travel_fee(travel, catalog);
        })
        .await
    }

    /// Sets the property address.
    #[tracing::instrument(skip(self))]
    pub async fn set_property(
        &self,
        id: SessionId,
        property: PropertyAddress,
    ) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, _| session.set_property(property)).await
    }

    /// Sets the shoot schedule.
    #[tracing::instrument(skip(self))]
    pub async fn set_schedule(
        &self,
        id: SessionId,
        schedule: ShootSchedule,
    ) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, _| session.set_schedule(schedule)).await
    }

    /// Merges a partial form update.
    #[tracing::instrument(skip(self, patch))]
    pub async fn update_form(
        &self,
        id: SessionId,
        patch: SessionPatch,
    ) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, _| session.apply_patch(patch)).await
    }

    /// Advances to the next step, refusing when the current step's
    /// required fields are missing.
    #[tracing::instrument(skip(self))]
    pub async fn advance(&self, id: SessionId) -> Result<BookingSession, FunnelError> {
        let mut session = self.load_required(id).await?;
        if !session.can_proceed() {
            return Err(FunnelError::StepIncomplete {
                step: session.current_step(),
            });
        }
        session.next_step();
        self.persist(&session).await?;
        metrics::counter!("funnel_actions_applied").increment(1);
        Ok(session)
    }

    /// Goes back one step.
    #[tracing::instrument(skip(self))]
    pub async fn back(&self, id: SessionId) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, _| session.prev_step()).await
    }

    /// Jumps directly to a step. Not clamped and not gated; staying in
    /// range is the caller's contract.
    #[tracing::instrument(skip(self))]
    pub async fn goto_step(&self, id: SessionId, step: u8) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, _| session.set_step(step)).await
    }

    /// Flags the session as abandoned.
    #[tracing::instrument(skip(self))]
    pub async fn abandon(&self, id: SessionId) -> Result<BookingSession, FunnelError> {
        let session = self.apply(id, |session, _| session.mark_abandoned()).await?;
        metrics::counter!("funnel_sessions_abandoned").increment(1);
        Ok(session)
    }

    /// Records that a recovery email went out for the session.
    #[tracing::instrument(skip(self))]
    pub async fn mark_recovery_email_sent(
        &self,
        id: SessionId,
    ) -> Result<BookingSession, FunnelError> {
        self.apply(id, |session, _| session.mark_recovery_email_sent())
            .await
    }

    /// Deletes the stored snapshot (user-initiated reset or completed
    /// submission).
    #[tracing::instrument(skip(self))]
    pub async fn discard(&self, id: SessionId) -> Result<(), FunnelError> {
        self.store.delete(id).await?;
        Ok(())
    }

    async fn load_required(&self, id: SessionId) -> Result<BookingSession, FunnelError> {
        self.get_session(id)
            .await?
            .ok_or(FunnelError::SessionNotFound { id })
    }

    /// Loads the session, applies one action, persists the new snapshot.
    async fn apply<F>(&self, id: SessionId, action: F) -> Result<BookingSession, FunnelError>
    where
        F: FnOnce(&mut BookingSession, &C),
    {
        let mut session = self.load_required(id).await?;
        action(&mut session, &self.catalog);
        self.persist(&session).await?;
        metrics::counter!("funnel_actions_applied").increment(1);
        Ok(session)
    }

    async fn persist(&self, session: &BookingSession) -> Result<(), FunnelError> {
        let id = session.session_id().ok_or(FunnelError::SessionNotStarted)?;
        let snapshot = SessionSnapshot::from_state(id, session)?;
        self.store.save(snapshot).await?;
        Ok(())
    }
}
