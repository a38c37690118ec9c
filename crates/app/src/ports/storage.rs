//! Storage port — whole-document persistence for the request collection.

use std::future::Future;

use staple_domain::error::StapleError;
use staple_domain::request::ServiceRequest;

/// Persistence for the ordered collection of [`ServiceRequest`]s.
///
/// The collection is always read and written as a unit; insertion order
/// must survive a `write_all` / `read_all` round trip.
pub trait RequestStore {
    /// Load every stored request, in creation order.
    fn read_all(&self) -> impl Future<Output = Result<Vec<ServiceRequest>, StapleError>> + Send;

    /// Replace the stored collection with `requests`.
    fn write_all(
        &self,
        requests: &[ServiceRequest],
    ) -> impl Future<Output = Result<(), StapleError>> + Send;
}
