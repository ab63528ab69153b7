use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a booking session.
///
/// Wraps a UUID to provide type safety and prevent mixing up
/// session IDs with other UUID-based identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(Uuid);

impl SessionId {
    /// Creates a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Creates a session ID from an existing UUID.
    pub fn from_uuid(uuid: Uuid) -> Self {
        Self(uuid)
    }

    /// Returns the underlying UUID.
    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for SessionId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl From<SessionId> for Uuid {
    fn from(id: SessionId) -> Self {
        id.0
    }
}

/// Currency amount in whole dollars.
///
/// Media packages and addons are priced in whole-dollar amounts, so the
/// quote math stays in integer dollars end to end. Percent discounts round
/// half-up to the nearest dollar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Money {
    /// Amount in whole dollars (e.g., 449 = $449).
    dollars: i64,
}

impl Money {
    /// Creates a new Money amount from whole dollars.
    pub fn from_dollars(dollars: i64) -> Self {
        Self { dollars }
    }

    /// Returns zero money.
    pub fn zero() -> Self {
        Self { dollars: 0 }
    }

    /// Returns the amount in whole dollars.
    pub fn dollars(&self) -> i64 {
        self.dollars
    }

    /// Returns true if the amount is positive.
    pub fn is_positive(&self) -> bool {
        self.dollars > 0
    }

    /// Returns true if the amount is zero.
    pub fn is_zero(&self) -> bool {
        self.dollars == 0
    }

    /// Returns true if the amount is negative.
    pub fn is_negative(&self) -> bool {
        self.dollars < 0
    }

    /// Multiplies by a quantity.
    pub fn multiply(&self, quantity: u32) -> Money {
        Money {
            dollars: self.dollars * quantity as i64,
        }
    }

    /// Takes a percentage of the amount, rounding half-up to the nearest
    /// dollar. `percent` is expressed as a whole number (10 = 10%).
    pub fn percent(&self, percent: u32) -> Money {
        Money {
            dollars: (self.dollars * percent as i64 + 50).div_euclid(100),
        }
    }

    /// Negates the amount.
    pub fn negate(&self) -> Money {
        Money {
            dollars: -self.dollars,
        }
    }

    /// Clamps negative amounts to zero.
    pub fn floor_at_zero(&self) -> Money {
        Money {
            dollars: self.dollars.max(0),
        }
    }
}

impl Default for Money {
    fn default() -> Self {
        Self::zero()
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.dollars < 0 {
            write!(f, "-${}", -self.dollars)
        } else {
            write!(f, "${}", self.dollars)
        }
    }
}

impl std::ops::Add for Money {
    type Output = Money;

    fn add(self, rhs: Self) -> Self::Output {
        Money {
            dollars: self.dollars + rhs.dollars,
        }
    }
}

impl std::ops::Sub for Money {
    type Output = Money;

    fn sub(self, rhs: Self) -> Self::Output {
        Money {
            dollars: self.dollars - rhs.dollars,
        }
    }
}

impl std::ops::AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.dollars += rhs.dollars;
    }
}

impl std::ops::SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.dollars -= rhs.dollars;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_id_new_creates_unique_ids() {
        let id1 = SessionId::new();
        let id2 = SessionId::new();
        assert_ne!(id1, id2);
    }

    #[test]
    fn session_id_from_uuid_preserves_value() {
        let uuid = Uuid::new_v4();
        let id = SessionId::from_uuid(uuid);
        assert_eq!(id.as_uuid(), uuid);
    }

    #[test]
    fn session_id_serialization_roundtrip() {
        let id = SessionId::new();
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: SessionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn money_from_dollars() {
        let money = Money::from_dollars(449);
        assert_eq!(money.dollars(), 449);
        assert!(money.is_positive());
    }

    #[test]
    fn money_arithmetic() {
        let a = Money::from_dollars(100);
        let b = Money::from_dollars(25);

        assert_eq!((a + b).dollars(), 125);
        assert_eq!((a - b).dollars(), 75);
        assert_eq!(b.multiply(3).dollars(), 75);
    }

    #[test]
    fn money_percent_rounds_half_up() {
        assert_eq!(Money::from_dollars(549).percent(10).dollars(), 55);
        assert_eq!(Money::from_dollars(449).percent(10).dollars(), 45);
        assert_eq!(Money::from_dollars(449).percent(15).dollars(), 67);
        assert_eq!(Money::from_dollars(100).percent(50).dollars(), 50);
        assert_eq!(Money::zero().percent(10).dollars(), 0);
    }

    #[test]
    fn money_floor_at_zero() {
        assert_eq!(Money::from_dollars(-50).floor_at_zero(), Money::zero());
        assert_eq!(
            Money::from_dollars(50).floor_at_zero(),
            Money::from_dollars(50)
        );
    }

    #[test]
    fn money_display() {
        assert_eq!(Money::from_dollars(449).to_string(), "$449");
        assert_eq!(Money::from_dollars(0).to_string(), "$0");
        assert_eq!(Money::from_dollars(-75).to_string(), "-$75");
    }

    #[test]
    fn money_comparison() {
        assert!(Money::from_dollars(100).is_positive());
        assert!(Money::zero().is_zero());
        assert!(Money::from_dollars(-1).is_negative());
        assert!(Money::from_dollars(100) > Money::from_dollars(99));
    }

    #[test]
    fn money_add_assign() {
        let mut money = Money::from_dollars(100);
        money += Money::from_dollars(50);
        assert_eq!(money.dollars(), 150);
    }

    #[test]
    fn money_sub_assign() {
        let mut money = Money::from_dollars(100);
        money -= Money::from_dollars(30);
        assert_eq!(money.dollars(), 70);
    }
}
