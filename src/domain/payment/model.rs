//! Payment domain entity

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;

/// Payment record status. Records are append-only; a failed attempt is
/// never stored, so today only `Completed` is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentStatus {
    Completed,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A recorded payment against a booking
#[derive(Debug, Clone)]
pub struct Payment {
    pub id: i32,
    pub booking_id: i32,
    pub amount: Decimal,
    /// Payment method as supplied by the caller ("card", "cash", ...)
    pub method: String,
    /// Gateway reference, or a generated fallback when none is supplied
    pub transaction_id: String,
    pub status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

/// Fallback transaction id: display/reference only, not a security token.
/// Millisecond timestamp plus a random suffix keeps ids unique per call.
pub fn generate_transaction_id() -> String {
    let suffix: u32 = rand::random::<u32>() % 1_000_000;
    format!("TXN-{}-{:06}", Utc::now().timestamp_millis(), suffix)
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_have_expected_shape() {
        let id = generate_transaction_id();
        assert!(id.starts_with("TXN-"));
        // TXN-<millis>-<6-digit suffix>
        let parts: Vec<&str> = id.splitn(3, '-').collect();
        assert_eq!(parts.len(), 3);
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 6);
    }

    #[test]
    fn generated_ids_differ_between_calls() {
        let a = generate_transaction_id();
        let b = generate_transaction_id();
        assert_ne!(a, b);
    }

    #[test]
    fn status_string_roundtrip() {
        assert_eq!(
            PaymentStatus::parse(PaymentStatus::Completed.as_str()),
            Some(PaymentStatus::Completed)
        );
        assert_eq!(PaymentStatus::parse("pending"), None);
    }
}
