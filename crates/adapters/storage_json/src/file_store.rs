//! [`RequestStore`] backed by a single JSON document on disk.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;
use tokio::io::AsyncWriteExt;

use staple_app::ports::RequestStore;
use staple_domain::error::StapleError;
use staple_domain::request::ServiceRequest;
use staple_domain::time;

use crate::error::StorageError;

/// Configuration for the JSON file storage adapter.
pub struct Config {
    /// Location of the collection file (e.g. `data/requests.json`).
    pub path: PathBuf,
    /// Surface unreadable or corrupt files as errors instead of treating
    /// them as an empty collection.
    pub strict_reads: bool,
}

impl Config {
    /// Build a [`JsonFileStore`] from this configuration.
    ///
    /// Creates the containing directory and an empty collection when the
    /// file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the directory or file cannot be created.
    pub async fn build(self) -> Result<JsonFileStore, StorageError> {
        let store = JsonFileStore::new(self.path).with_strict_reads(self.strict_reads);
        store.ensure_initialized().await?;
        Ok(store)
    }
}

/// File-backed request collection.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    strict_reads: bool,
}

impl JsonFileStore {
    /// Create a lenient store for `path`. Nothing is touched on disk.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            strict_reads: false,
        }
    }

    /// Choose whether read failures propagate (`true`) or degrade to an
    /// empty collection (`false`).
    #[must_use]
    pub fn with_strict_reads(mut self, strict: bool) -> Self {
        self.strict_reads = strict;
        self
    }

    /// Path of the collection file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the parent directory and an empty `[]` document if absent.
    /// An existing file is left untouched.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] if the directory or file cannot be created.
    pub async fn ensure_initialized(&self) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|source| self.io_error(source))?;
        }

        let created = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&self.path)
            .await;
        match created {
            Ok(mut file) => {
                file.write_all(b"[]")
                    .await
                    .map_err(|source| self.io_error(source))?;
                file.flush().await.map_err(|source| self.io_error(source))?;
                tracing::info!(path = %self.path.display(), "created empty request collection");
                Ok(())
            }
            Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(source) => Err(self.io_error(source)),
        }
    }

    async fn load(&self) -> Result<Vec<ServiceRequest>, StorageError> {
        let bytes = fs::read(&self.path)
            .await
            .map_err(|source| self.io_error(source))?;
        serde_json::from_slice(&bytes).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })
    }

    async fn save(&self, requests: &[ServiceRequest]) -> Result<(), StorageError> {
        let body = serde_json::to_vec_pretty(requests).map_err(|source| StorageError::Json {
            path: self.path.clone(),
            source,
        })?;

        let tmp = self.sibling_path(".tmp");
        fs::write(&tmp, &body)
            .await
            .map_err(|source| self.io_error(source))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|source| self.io_error(source))
    }

    /// Move an unparseable collection to `<file>.corrupt-<timestamp>` and
    /// start over with an empty one, so the next write cannot overwrite
    /// the records it still holds.
    async fn quarantine(&self) -> Result<PathBuf, StorageError> {
        let suffix = format!(".corrupt-{}", time::now().format("%Y%m%dT%H%M%S%.3fZ"));
        let target = self.sibling_path(&suffix);
        match fs::rename(&self.path, &target).await {
            Ok(()) => {}
            // a concurrent reader got there first
            Err(err) if err.kind() == ErrorKind::NotFound => {}
            Err(source) => return Err(self.io_error(source)),
        }
        self.ensure_initialized().await?;
        Ok(target)
    }

    fn sibling_path(&self, suffix: &str) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map_or_else(|| OsString::from("requests.json"), OsString::from);
        name.push(suffix);
        self.path.with_file_name(name)
    }

    fn io_error(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl RequestStore for JsonFileStore {
    async fn read_all(&self) -> Result<Vec<ServiceRequest>, StapleError> {
        match self.load().await {
            Ok(requests) => Ok(requests),
            Err(err) if self.strict_reads => Err(err.into()),
            Err(err @ StorageError::Json { .. }) => {
                tracing::error!(error = ?err, "request collection is corrupt, serving an empty collection");
                let moved = self.quarantine().await?;
                tracing::warn!(path = %moved.display(), "moved corrupt request collection aside");
                Ok(Vec::new())
            }
            Err(err) => {
                tracing::error!(error = ?err, "failed to read requests, serving an empty collection");
                Ok(Vec::new())
            }
        }
    }

    async fn write_all(&self, requests: &[ServiceRequest]) -> Result<(), StapleError> {
        self.save(requests).await.map_err(|err| {
            tracing::error!(error = ?err, "failed to write requests");
            err.into()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use staple_domain::id::RequestId;
    use staple_domain::request::{NewServiceRequest, RequestStatus};
    use staple_domain::time;

    fn request(id: u64, name: &str) -> ServiceRequest {
        NewServiceRequest::builder()
            .name(name)
            .email("a@x.com")
            .service("S")
            .message("hi")
            .build()
            .unwrap()
            .into_request(RequestId::new(id), time::now())
    }

    #[tokio::test]
    async fn should_create_directory_and_empty_array_when_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data").join("requests.json");

        let store = Config {
            path: path.clone(),
            strict_reads: true,
        }
        .build()
        .await
        .unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_leave_existing_file_untouched_when_initialized_twice() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("requests.json"));
        store.ensure_initialized().await.unwrap();
        store.write_all(&[request(1, "A")]).await.unwrap();

        store.ensure_initialized().await.unwrap();

        assert_eq!(store.read_all().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn should_preserve_order_across_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("requests.json"));
        let mut second = request(2, "B");
        second.set_status(RequestStatus::Completed, time::now());
        let requests = vec![request(5, "A"), second, request(3, "C")];

        store.write_all(&requests).await.unwrap();

        assert_eq!(store.read_all().await.unwrap(), requests);
    }

    #[tokio::test]
    async fn should_write_pretty_printed_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.json");
        let store = JsonFileStore::new(&path);

        store.write_all(&[request(1, "A")]).await.unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("[\n  {\n    \"id\": 1,"));
        assert!(!dir.path().join("requests.json.tmp").exists());
    }

    #[tokio::test]
    async fn should_return_empty_collection_when_file_is_corrupt_and_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path);

        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_move_corrupt_file_aside_before_next_write_when_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.json");
        let original = r#"[{"id":1,"name":"A","email":"a@x.com","phone":"N/A","service":"S","message":"hi","status":"archived","date":"1/2/2024","createdAt":"2024-01-02T10:00:00.000Z"}]"#;
        std::fs::write(&path, original).unwrap();
        let store = JsonFileStore::new(&path);

        assert!(store.read_all().await.unwrap().is_empty());
        store.write_all(&[request(1, "B")]).await.unwrap();

        let moved: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().path())
            .filter(|p| {
                p.file_name()
                    .unwrap()
                    .to_string_lossy()
                    .starts_with("requests.json.corrupt-")
            })
            .collect();
        assert_eq!(moved.len(), 1);
        assert_eq!(std::fs::read_to_string(&moved[0]).unwrap(), original);
        assert_eq!(store.read_all().await.unwrap()[0].name, "B");
    }

    #[tokio::test]
    async fn should_return_empty_collection_when_file_is_missing_and_lenient() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("absent.json"));

        assert!(store.read_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn should_surface_corrupt_file_when_strict() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("requests.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = JsonFileStore::new(&path).with_strict_reads(true);

        let result = store.read_all().await;
        assert!(matches!(result, Err(StapleError::Storage(_))));
    }

    #[tokio::test]
    async fn should_propagate_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("missing-dir").join("requests.json"));

        let result = store.write_all(&[request(1, "A")]).await;

        assert!(matches!(result, Err(StapleError::Storage(_))));
    }
}
