//! Aggregate counts over the request collection.

use serde::{Deserialize, Serialize};

use crate::request::{RequestStatus, ServiceRequest};

/// Totals shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestStats {
    pub total: usize,
    pub pending: usize,
    pub completed: usize,
}

impl RequestStats {
    /// Count requests by status in a single pass.
    #[must_use]
    pub fn from_requests(requests: &[ServiceRequest]) -> Self {
        requests
            .iter()
            .fold(Self::default(), |mut stats, request| {
                stats.total += 1;
                match request.status {
                    RequestStatus::Pending => stats.pending += 1,
                    RequestStatus::Completed => stats.completed += 1,
                }
                stats
            })
    }
}
