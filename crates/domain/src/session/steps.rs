//! Wizard step gating.
//!
//! A pure predicate over the current step and session fields, queried on
//! demand (never cached) to decide whether "next" is enabled.

use super::aggregate::BookingSession;

/// First wizard step (package selection).
pub const FIRST_STEP: u8 = 0;

/// Last wizard step (contact details).
pub const LAST_STEP: u8 = 4;

/// Returns whether forward navigation is permitted from `step`.
///
/// Steps: 0 package, 1 addons, 2 property, 3 schedule, 4 contact.
/// Out-of-range values gate to false.
pub fn can_advance(step: u8, session: &BookingSession) -> bool {
    match step {
        0 => session.package_key().is_some() && session.sqft_tier().is_some(),
        1 => true,
        2 => session
            .property()
            .is_some_and(|p| !p.address.is_empty() && !p.city.is_empty() && !p.zip.is_empty()),
        3 => session.schedule().is_some(),
        4 => {
            !session.contact_name().is_empty()
                && !session.contact_email().is_empty()
                && !session.contact_phone().is_empty()
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{SqftTier, StandardCatalog};
    use chrono::{NaiveDate, NaiveTime};

    use crate::session::value_objects::{PropertyAddress, SessionPatch, ShootSchedule};

    fn property() -> PropertyAddress {
        PropertyAddress {
            address: "412 Maple Ave".to_string(),
            city: "Austin".to_string(),
            state: "TX".to_string(),
            zip: "78704".to_string(),
            lat: 30.25,
            lng: -97.75,
            place_id: "ChIJabc123".to_string(),
        }
    }

    #[test]
    fn step_0_requires_package_and_tier() {
        let mut session = BookingSession::new();
        assert!(!can_advance(0, &session));

        session.set_package("essentials".into(), SqftTier::Lt2000, &StandardCatalog::new());
        assert!(can_advance(0, &session));
    }

    #[test]
    fn step_1_is_always_open() {
        let session = BookingSession::new();
        assert!(can_advance(1, &session));
    }

    #[test]
    fn step_2_requires_address_city_and_zip() {
        let mut session = BookingSession::new();
        assert!(!can_advance(2, &session));

        session.set_property(property());
        assert!(can_advance(2, &session));

        let mut blank_zip = property();
        blank_zip.zip = String::new();
        session.set_property(blank_zip);
        assert!(!can_advance(2, &session));
    }

    #[test]
    fn step_3_requires_a_schedule() {
        let mut session = BookingSession::new();
        assert!(!can_advance(3, &session));

        session.set_schedule(ShootSchedule {
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            time: NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
        });
        assert!(can_advance(3, &session));
    }

    #[test]
    fn step_4_requires_all_contact_fields() {
        let mut session = BookingSession::new();
        assert!(!can_advance(4, &session));

        session.apply_patch(SessionPatch {
            contact_name: Some("Dana Reyes".to_string()),
            contact_email: Some("dana@example.com".to_string()),
            ..Default::default()
        });
        assert!(!can_advance(4, &session));

        session.apply_patch(SessionPatch {
            contact_phone: Some("512-555-0188".to_string()),
            ..Default::default()
        });
        assert!(can_advance(4, &session));
    }

    #[test]
    fn out_of_range_steps_gate_to_false() {
        let session = BookingSession::new();
        assert!(!can_advance(5, &session));
        assert!(!can_advance(255, &session));
    }
}
