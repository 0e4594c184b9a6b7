//! Bearer token entity for gateway authentication.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Assumed server-side token lifetime is 24 hours; we treat tokens as
/// expired an hour early so a request never rides a token that dies
/// mid-flight.
pub const TOKEN_REFRESH_WINDOW_HOURS: i64 = 23;

/// A bearer token and its client-side expiry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthToken {
    /// Opaque token value attached as `Authorization: Bearer <value>`
    pub value: String,

    /// Client-side expiry; the token is reused until this passes
    pub expires_at: DateTime<Utc>,
}

impl AuthToken {
    /// Create a token expiring after the default refresh window
    pub fn new(value: impl Into<String>) -> Self {
        Self::with_lifetime_hours(value, TOKEN_REFRESH_WINDOW_HOURS)
    }

    /// Create a token with an explicit lifetime in hours
    pub fn with_lifetime_hours(value: impl Into<String>, hours: i64) -> Self {
        Self {
            value: value.into(),
            expires_at: Utc::now() + Duration::hours(hours),
        }
    }

    /// Whether the token is still usable
    pub fn is_valid(&self) -> bool {
        Utc::now() < self.expires_at
    }

    /// Time remaining before expiry, or zero if already expired
    pub fn time_until_expiry(&self) -> Duration {
        let now = Utc::now();
        if self.expires_at > now {
            self.expires_at - now
        } else {
            Duration::zero()
        }
    }
}
