use serde::{Deserialize, Serialize};

/// Authoritative payment status as reconciled by the lifecycle controller.
///
/// `Paid`, `Expired` and `Cancelled` are terminal: once one of them has been
/// processed the controller never returns to `Pending` for the same intent.
/// `Unknown` marks a status query that could not be completed and is the only
/// non-terminal value reachable from an error path.
///
/// Serializes in screaming case, distinct from the free-form provider
/// strings that go through [`PaymentStatus::parse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentStatus {
    Pending,
    Paid,
    Expired,
    Cancelled,
    Unknown,
}

impl PaymentStatus {
    /// Parse a provider status string, case-insensitively.
    ///
    /// Unrecognized strings map to `Pending` rather than `Unknown`: the
    /// provider contract is allowed to introduce transitional values and the
    /// poller should keep going when it sees one.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("paid") {
            Self::Paid
        } else if raw.eq_ignore_ascii_case("expired") {
            Self::Expired
        } else if raw.eq_ignore_ascii_case("cancelled") {
            Self::Cancelled
        } else {
            Self::Pending
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Paid | Self::Expired | Self::Cancelled)
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        Self::Pending
    }
}
