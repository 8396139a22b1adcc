//! Row decoding helpers shared by the repositories.
//!
//! Timestamps are stored as RFC 3339 text and dates as ISO 8601 text, so
//! decoding failures surface as [`sqlx::Error::Decode`] like any other
//! column type mismatch.

use chrono::{DateTime, Utc};
use verdant_domain::time::{Date, Timestamp};

pub(crate) fn timestamp(text: &str) -> Result<Timestamp, sqlx::Error> {
    DateTime::parse_from_rfc3339(text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}

pub(crate) fn date(text: &str) -> Result<Date, sqlx::Error> {
    text.parse::<Date>()
        .map_err(|err| sqlx::Error::Decode(Box::new(err)))
}
