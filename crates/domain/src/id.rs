//! Typed identifier for service requests.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Unique identifier for a [`ServiceRequest`](crate::request::ServiceRequest).
///
/// Ids are positive integers handed out as `max + 1` over the collection,
/// so they keep growing even after deletions at the tail are re-filled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestId(u64);

impl RequestId {
    /// Id given to the first record of an empty collection.
    pub const FIRST: Self = Self(1);

    /// Wrap a raw integer id.
    #[must_use]
    pub const fn new(value: u64) -> Self {
        Self(value)
    }

    /// Access the inner integer.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }

    /// The id following this one, or `None` once `u64::MAX` is reached.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(value) => Some(Self(value)),
            None => None,
        }
    }

    /// Next id to assign given the ids already present.
    ///
    /// Returns `None` when the highest existing id is `u64::MAX`.
    #[must_use]
    pub fn next_after<I>(existing: I) -> Option<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        existing
            .into_iter()
            .max()
            .map_or(Some(Self::FIRST), Self::next)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for RequestId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_start_at_one_when_collection_is_empty() {
        assert_eq!(RequestId::next_after([]), Some(RequestId::FIRST));
    }

    #[test]
    fn should_pick_max_plus_one_when_ids_have_gaps() {
        let ids = [RequestId::new(3), RequestId::new(7), RequestId::new(5)];
        assert_eq!(RequestId::next_after(ids), Some(RequestId::new(8)));
    }

    #[test]
    fn should_have_no_next_id_after_u64_max() {
        let ids = [RequestId::new(1), RequestId::new(u64::MAX)];
        assert_eq!(RequestId::new(u64::MAX).next(), None);
        assert_eq!(RequestId::next_after(ids), None);
    }

    #[test]
    fn should_roundtrip_through_display_and_from_str() {
        let id = RequestId::new(12);
        let parsed: RequestId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
    }

    #[test]
    fn should_serialize_as_bare_integer() {
        let json = serde_json::to_string(&RequestId::new(4)).unwrap();
        assert_eq!(json, "4");
    }

    #[test]
    fn should_return_error_when_parsing_non_numeric_id() {
        assert!(RequestId::from_str("abc").is_err());
        assert!(RequestId::from_str("-1").is_err());
    }
}
