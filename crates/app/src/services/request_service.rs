//! Request service — use-cases for managing service requests.

use tokio::sync::Mutex;

use staple_domain::error::{NotFoundError, StapleError};
use staple_domain::id::RequestId;
use staple_domain::request::{NewServiceRequest, RequestStatus, ServiceRequest};
use staple_domain::stats::RequestStats;
use staple_domain::time;

use crate::ports::RequestStore;

/// Application service for service-request operations.
///
/// Every mutating use-case reads the whole collection, changes it, and
/// writes it back while holding `write_lock`, so two requests handled by
/// the same process cannot interleave their cycles.
pub struct RequestService<S> {
    store: S,
    write_lock: Mutex<()>,
}

impl<S: RequestStore> RequestService<S> {
    /// Create a new service backed by the given store.
    pub fn new(store: S) -> Self {
        Self {
            store,
            write_lock: Mutex::new(()),
        }
    }

    /// List all requests in creation order.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn list_requests(&self) -> Result<Vec<ServiceRequest>, StapleError> {
        self.store.read_all().await
    }

    /// Count requests by status.
    ///
    /// # Errors
    ///
    /// Returns a storage error propagated from the store.
    pub async fn stats(&self) -> Result<RequestStats, StapleError> {
        let requests = self.store.read_all().await?;
        Ok(RequestStats::from_requests(&requests))
    }

    /// Assign the next id to a validated submission and persist it as pending.
    ///
    /// # Errors
    ///
    /// Returns [`StapleError::IdsExhausted`] when the highest stored id is
    /// `u64::MAX`, or a storage error if the collection cannot be read or
    /// written.
    #[tracing::instrument(skip(self, new), fields(service = %new.service))]
    pub async fn create_request(
        &self,
        new: NewServiceRequest,
    ) -> Result<ServiceRequest, StapleError> {
        let _guard = self.write_lock.lock().await;
        let mut requests = self.store.read_all().await?;

        let id = RequestId::next_after(requests.iter().map(|r| r.id))
            .ok_or(StapleError::IdsExhausted)?;
        let request = new.into_request(id, time::now());
        requests.push(request.clone());
        self.store.write_all(&requests).await?;

        tracing::info!(%id, "service request created");
        Ok(request)
    }

    /// Set the status of an existing request and stamp `updated_at`.
    ///
    /// # Errors
    ///
    /// Returns [`StapleError::NotFound`] when no request with `id` exists,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn update_status(
        &self,
        id: RequestId,
        status: RequestStatus,
    ) -> Result<ServiceRequest, StapleError> {
        let _guard = self.write_lock.lock().await;
        let mut requests = self.store.read_all().await?;

        let request = requests
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| not_found(id))?;
        request.set_status(status, time::now());
        let updated = request.clone();
        self.store.write_all(&requests).await?;

        Ok(updated)
    }

    /// Delete a request by id.
    ///
    /// # Errors
    ///
    /// Returns [`StapleError::NotFound`] when no request with `id` exists,
    /// or a storage error from the store.
    #[tracing::instrument(skip(self))]
    pub async fn delete_request(&self, id: RequestId) -> Result<(), StapleError> {
        let _guard = self.write_lock.lock().await;
        let mut requests = self.store.read_all().await?;

        let before = requests.len();
        requests.retain(|r| r.id != id);
        if requests.len() == before {
            return Err(not_found(id));
        }
        self.store.write_all(&requests).await?;

        tracing::info!(%id, "service request deleted");
        Ok(())
    }
}

fn not_found(id: RequestId) -> StapleError {
    NotFoundError {
        entity: "Request",
        id: id.to_string(),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex as StdMutex};

    #[derive(Default)]
    struct InMemoryRequestStore {
        requests: StdMutex<Vec<ServiceRequest>>,
    }

    impl InMemoryRequestStore {
        fn snapshot(&self) -> Vec<ServiceRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl RequestStore for InMemoryRequestStore {
        async fn read_all(&self) -> Result<Vec<ServiceRequest>, StapleError> {
            let requests = self.snapshot();
            // Give concurrent callers a chance to interleave.
            tokio::task::yield_now().await;
            Ok(requests)
        }

        async fn write_all(&self, requests: &[ServiceRequest]) -> Result<(), StapleError> {
            *self.requests.lock().unwrap() = requests.to_vec();
            Ok(())
        }
    }

    struct ReadOnlyStore;

    impl RequestStore for ReadOnlyStore {
        async fn read_all(&self) -> Result<Vec<ServiceRequest>, StapleError> {
            Ok(vec![])
        }

        async fn write_all(&self, _requests: &[ServiceRequest]) -> Result<(), StapleError> {
            Err(StapleError::Storage(Box::new(std::io::Error::other(
                "read-only filesystem",
            ))))
        }
    }

    impl<S: RequestStore> RequestService<S> {
        fn store(&self) -> &S {
            &self.store
        }
    }

    fn make_service() -> RequestService<InMemoryRequestStore> {
        RequestService::new(InMemoryRequestStore::default())
    }

    fn submission(name: &str) -> NewServiceRequest {
        NewServiceRequest::builder()
            .name(name)
            .email("a@x.com")
            .service("S")
            .message("hi")
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn should_assign_first_id_when_collection_empty() {
        let svc = make_service();

        let created = svc.create_request(submission("A")).await.unwrap();

        assert_eq!(created.id, RequestId::FIRST);
        assert_eq!(created.status, RequestStatus::Pending);
        assert_eq!(svc.store().snapshot(), vec![created]);
    }

    #[tokio::test]
    async fn should_assign_increasing_ids_in_creation_order() {
        let svc = make_service();
        let a = svc.create_request(submission("A")).await.unwrap();
        let b = svc.create_request(submission("B")).await.unwrap();

        assert!(b.id > a.id);
        let names: Vec<String> = svc
            .list_requests()
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(names, ["A", "B"]);
    }

    #[tokio::test]
    async fn should_continue_after_highest_id_when_earlier_deleted() {
        let svc = make_service();
        let a = svc.create_request(submission("A")).await.unwrap();
        let b = svc.create_request(submission("B")).await.unwrap();
        svc.delete_request(a.id).await.unwrap();

        let c = svc.create_request(submission("C")).await.unwrap();

        assert_eq!(b.id.next(), Some(c.id));
    }

    #[tokio::test]
    async fn should_update_status_and_stamp_updated_at() {
        let svc = make_service();
        let created = svc.create_request(submission("A")).await.unwrap();

        let updated = svc
            .update_status(created.id, RequestStatus::Completed)
            .await
            .unwrap();

        assert_eq!(updated.status, RequestStatus::Completed);
        assert!(updated.updated_at.is_some());
        assert_eq!(svc.store().snapshot()[0], updated);
    }

    #[tokio::test]
    async fn should_allow_any_status_transition() {
        let svc = make_service();
        let created = svc.create_request(submission("A")).await.unwrap();
        svc.update_status(created.id, RequestStatus::Completed)
            .await
            .unwrap();

        let reopened = svc
            .update_status(created.id, RequestStatus::Pending)
            .await
            .unwrap();
        assert_eq!(reopened.status, RequestStatus::Pending);
    }

    #[tokio::test]
    async fn should_return_not_found_when_updating_missing_request() {
        let svc = make_service();
        let result = svc
            .update_status(RequestId::new(9), RequestStatus::Completed)
            .await;
        assert!(matches!(result, Err(StapleError::NotFound(_))));
    }

    #[tokio::test]
    async fn should_return_not_found_when_deleting_missing_request() {
        let svc = make_service();
        svc.create_request(submission("A")).await.unwrap();

        let result = svc.delete_request(RequestId::new(9)).await;

        assert!(matches!(result, Err(StapleError::NotFound(_))));
        assert_eq!(svc.store().snapshot().len(), 1);
    }

    #[tokio::test]
    async fn should_report_zero_stats_after_deleting_only_request() {
        let svc = make_service();
        let created = svc.create_request(submission("A")).await.unwrap();

        svc.delete_request(created.id).await.unwrap();

        assert!(svc.list_requests().await.unwrap().is_empty());
        assert_eq!(svc.stats().await.unwrap(), RequestStats::default());
    }

    #[tokio::test]
    async fn should_count_stats_by_status() {
        let svc = make_service();
        let a = svc.create_request(submission("A")).await.unwrap();
        svc.create_request(submission("B")).await.unwrap();
        svc.update_status(a.id, RequestStatus::Completed)
            .await
            .unwrap();

        let stats = svc.stats().await.unwrap();
        assert_eq!(
            stats,
            RequestStats {
                total: 2,
                pending: 1,
                completed: 1,
            }
        );
    }

    #[tokio::test]
    async fn should_refuse_create_when_highest_id_is_u64_max() {
        let svc = make_service();
        let last = submission("Z").into_request(RequestId::new(u64::MAX), time::now());
        svc.store().requests.lock().unwrap().push(last.clone());

        let result = svc.create_request(submission("A")).await;

        assert!(matches!(result, Err(StapleError::IdsExhausted)));
        assert_eq!(svc.store().snapshot(), vec![last]);
        // The write lock was released; later mutations still run.
        svc.delete_request(RequestId::new(u64::MAX)).await.unwrap();
    }

    #[tokio::test]
    async fn should_propagate_write_failure() {
        let svc = RequestService::new(ReadOnlyStore);
        let result = svc.create_request(submission("A")).await;
        assert!(matches!(result, Err(StapleError::Storage(_))));
    }

    #[tokio::test]
    async fn should_assign_unique_ids_when_creates_run_concurrently() {
        let svc = Arc::new(make_service());
        let mut tasks = tokio::task::JoinSet::new();
        for i in 0..16 {
            let svc = Arc::clone(&svc);
            tasks.spawn(async move { svc.create_request(submission(&format!("R{i}"))).await });
        }
        while let Some(result) = tasks.join_next().await {
            result.unwrap().unwrap();
        }

        let mut ids: Vec<u64> = svc
            .store()
            .snapshot()
            .iter()
            .map(|r| r.id.get())
            .collect();
        ids.sort_unstable();
        assert_eq!(ids, (1..=16).collect::<Vec<_>>());
    }
}
