//! Session identity, timing, and attribution tracking.

use chrono::{DateTime, Utc};
use common::SessionId;
use serde::{Deserialize, Serialize};

/// UTM attribution parameters captured from the landing URL.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtmParams {
    pub source: Option<String>,
    pub medium: Option<String>,
    pub campaign: Option<String>,
}

impl UtmParams {
    /// Parses UTM parameters out of a raw query string.
    ///
    /// Accepts the string with or without its leading `?`. Unrelated
    /// parameters are ignored.
    pub fn from_query(query: &str) -> Self {
        let mut params = Self::default();
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "utm_source" => params.source = Some(value.into_owned()),
                "utm_medium" => params.medium = Some(value.into_owned()),
                "utm_campaign" => params.campaign = Some(value.into_owned()),
                _ => {}
            }
        }

        params
    }

    /// Returns true if no UTM parameter was present.
    pub fn is_empty(&self) -> bool {
        self.source.is_none() && self.medium.is_none() && self.campaign.is_none()
    }
}

/// Tracks session identity, creation/update timestamps, attribution, and
/// cart-abandonment flags.
///
/// Identity and UTM capture happen exactly once, on the first `init`; later
/// `init` calls only refresh `last_updated_at`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionTracker {
    session_id: Option<SessionId>,
    created_at: Option<DateTime<Utc>>,
    last_updated_at: Option<DateTime<Utc>>,
    utm: Option<UtmParams>,
    is_abandoned: bool,
    recovery_email_sent: bool,
}

impl SessionTracker {
    /// Initializes the session identity if it doesn't exist yet.
    ///
    /// The first call mints the session id, stamps `created_at`, and
    /// captures UTM parameters from the supplied query string. Subsequent
    /// calls only refresh `last_updated_at`.
    pub fn init(&mut self, utm_query: Option<&str>) {
        if self.session_id.is_none() {
            self.session_id = Some(SessionId::new());
            self.created_at = Some(Utc::now());
            self.utm = utm_query
                .map(UtmParams::from_query)
                .filter(|utm| !utm.is_empty());
        }
        self.touch();
    }

    /// Refreshes `last_updated_at`.
    pub fn touch(&mut self) {
        self.last_updated_at = Some(Utc::now());
    }

    /// Flags the session as abandoned. Idempotent.
    pub fn mark_abandoned(&mut self) {
        self.is_abandoned = true;
    }

    /// Records that a recovery email went out. Idempotent.
    pub fn mark_recovery_email_sent(&mut self) {
        self.recovery_email_sent = true;
    }

    pub fn session_id(&self) -> Option<SessionId> {
        self.session_id
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    pub fn last_updated_at(&self) -> Option<DateTime<Utc>> {
        self.last_updated_at
    }

    pub fn utm(&self) -> Option<&UtmParams> {
        self.utm.as_ref()
    }

    pub fn is_abandoned(&self) -> bool {
        self.is_abandoned
    }

    pub fn recovery_email_sent(&self) -> bool {
        self.recovery_email_sent
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_query_parses_utm_params() {
        let utm =
            UtmParams::from_query("?utm_source=google&utm_medium=cpc&utm_campaign=spring_promo");
        assert_eq!(utm.source.as_deref(), Some("google"));
        assert_eq!(utm.medium.as_deref(), Some("cpc"));
        assert_eq!(utm.campaign.as_deref(), Some("spring_promo"));
    }

    #[test]
    fn from_query_ignores_unrelated_params() {
        let utm = UtmParams::from_query("page=2&utm_source=newsletter&ref=abc");
        assert_eq!(utm.source.as_deref(), Some("newsletter"));
        assert!(utm.medium.is_none());
        assert!(utm.campaign.is_none());
    }

    #[test]
    fn from_query_decodes_percent_encoding() {
        let utm = UtmParams::from_query("utm_campaign=spring%20sale");
        assert_eq!(utm.campaign.as_deref(), Some("spring sale"));
    }

    #[test]
    fn from_query_empty_is_empty() {
        assert!(UtmParams::from_query("").is_empty());
        assert!(UtmParams::from_query("foo=bar").is_empty());
    }

    #[test]
    fn init_mints_identity_once() {
        let mut tracker = SessionTracker::default();
        assert!(tracker.session_id().is_none());

        tracker.init(None);
        let id = tracker.session_id().unwrap();
        let created = tracker.created_at().unwrap();

        tracker.init(None);
        assert_eq!(tracker.session_id(), Some(id));
        assert_eq!(tracker.created_at(), Some(created));
    }

    #[test]
    fn init_captures_utm_only_on_first_call() {
        let mut tracker = SessionTracker::default();
        tracker.init(Some("utm_source=google"));
        assert_eq!(tracker.utm().unwrap().source.as_deref(), Some("google"));

        tracker.init(Some("utm_source=facebook"));
        assert_eq!(tracker.utm().unwrap().source.as_deref(), Some("google"));
    }

    #[test]
    fn init_without_utm_stores_none() {
        let mut tracker = SessionTracker::default();
        tracker.init(Some("page=2"));
        assert!(tracker.utm().is_none());
    }

    #[test]
    fn init_refreshes_last_updated() {
        let mut tracker = SessionTracker::default();
        tracker.init(None);
        assert!(tracker.last_updated_at().is_some());
    }

    #[test]
    fn abandonment_flags_are_idempotent() {
        let mut tracker = SessionTracker::default();
        assert!(!tracker.is_abandoned());

        tracker.mark_abandoned();
        tracker.mark_abandoned();
        assert!(tracker.is_abandoned());

        tracker.mark_recovery_email_sent();
        assert!(tracker.recovery_email_sent());
    }

    #[test]
    fn tracker_serialization_roundtrip() {
        let mut tracker = SessionTracker::default();
        tracker.init(Some("utm_source=google&utm_medium=cpc"));
        tracker.mark_abandoned();

        let json = serde_json::to_string(&tracker).unwrap();
        let restored: SessionTracker = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, tracker);
    }
}
