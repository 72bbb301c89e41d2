//! ISO-8601 instant parsing and formatting.
//!
//! Every instant handled by carbonshift is a [`DateTime<Utc>`]. Input may carry
//! an explicit offset (`2025-09-13T10:00:00+08:00`, `...Z`) or be naive
//! (`2025-09-13T10:00`, `2025-09-13 10:00:00`, `2025-09-13`), in which case it
//! is read as UTC. Output is always RFC 3339 in UTC, so string order and time
//! order agree.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat, Utc};

use crate::error::{ForecastError, Result};

/// Naive date-time layouts accepted when the input carries no offset.
const NAIVE_FORMATS: [&str; 6] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601 instant.
///
/// # Errors
///
/// Returns [`ForecastError::InvalidTimestamp`] if `raw` matches none of the
/// accepted forms.
pub fn parse_instant(raw: &str) -> Result<DateTime<Utc>> {
    let trimmed = raw.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(dt.with_timezone(&Utc));
    }

    for fmt in NAIVE_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return Ok(date.and_time(NaiveTime::MIN).and_utc());
    }

    Err(ForecastError::InvalidTimestamp(format!(
        "'{trimmed}' is not an ISO-8601 instant"
    )))
}

/// Format an instant as RFC 3339 UTC (`2025-09-13T10:15:00Z`).
///
/// Fractional seconds are only emitted when non-zero.
#[must_use]
pub fn format_instant(instant: &DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// Serde adapter storing a [`DateTime<Utc>`] as an ISO-8601 string.
///
/// Use with `#[serde(with = "carbonshift_forecast::instant::iso")]`.
pub mod iso {
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as RFC 3339 UTC.
    pub fn serialize<S: Serializer>(
        instant: &DateTime<Utc>,
        serializer: S,
    ) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_instant(instant))
    }

    /// Deserialize from any form accepted by [`super::parse_instant`].
    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_instant(&raw).map_err(serde::de::Error::custom)
    }
}
