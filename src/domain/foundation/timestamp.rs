//! UTC instants for membership audit fields.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Point in time recorded on a membership row (`joined_at`, `updated_at`).
///
/// Ordered, so rosters can sort by joining time directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps a value read back from storage.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn sorts_chronologically() {
        let early = Timestamp::from_datetime(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap());
        let late = Timestamp::from(Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 1).unwrap());

        let mut joined = vec![late, early];
        joined.sort();
        assert_eq!(joined, vec![early, late]);
    }

    #[test]
    fn serializes_as_rfc3339_string() {
        let ts: Timestamp = serde_json::from_str("\"2024-01-15T10:30:00Z\"").unwrap();
        assert_eq!(
            *ts.as_datetime(),
            Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap()
        );
        assert_eq!(serde_json::to_string(&ts).unwrap(), "\"2024-01-15T10:30:00Z\"");
    }
}
