//! Time and timestamp helpers.

use chrono::{DateTime, Local, SecondsFormat, SubsecRound, Utc};
use serde::Serializer;

/// UTC timestamp used for `createdAt` and `updatedAt`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time, truncated to millisecond precision.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now().trunc_subsecs(3)
}

/// Render `ts` as a short calendar date (`M/D/YYYY`) in server-local time.
#[must_use]
pub fn local_date(ts: Timestamp) -> String {
    ts.with_timezone(&Local).format("%-m/%-d/%Y").to_string()
}

/// Serialize as RFC 3339 with exactly three fractional digits
/// (`2024-01-02T10:00:00.000Z`), even when the milliseconds are zero.
///
/// # Errors
///
/// Propagates the serializer's error.
pub fn serialize_millis<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&ts.to_rfc3339_opts(SecondsFormat::Millis, true))
}

/// [`serialize_millis`] for optional timestamps; `None` becomes `null`.
///
/// # Errors
///
/// Propagates the serializer's error.
#[allow(clippy::ref_option)]
pub fn serialize_millis_opt<S: Serializer>(
    ts: &Option<Timestamp>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match ts {
        Some(ts) => serialize_millis(ts, serializer),
        None => serializer.serialize_none(),
    }
}
