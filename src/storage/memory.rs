// In-process object store for dry runs and tests

use super::{ObjectStore, ProgressFn};
use crate::models::{TransferProgress, UploadTarget};
use crate::types::{AppError, AppResult};
use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tracing::info;

/// Keeps written objects in memory, keyed by `(bucket, key)`.
#[derive(Default)]
pub struct MemoryStore {
    objects: Mutex<HashMap<(String, String), Bytes>>,
    latency: Option<Duration>,
    failure: Option<String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Delay every write by `latency` before acknowledging it.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Reject every write with `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    pub fn get(&self, bucket: &str, key: &str) -> Option<Bytes> {
        self.objects
            .lock()
            .ok()?
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.objects.lock().map(|o| o.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ObjectStore for MemoryStore {
    async fn put_object(
        &self,
        target: UploadTarget,
        progress: Option<&ProgressFn>,
    ) -> AppResult<()> {
        let total = target.len();
        if let Some(report) = progress {
            report(TransferProgress { transferred: 0, total });
        }

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }

        if let Some(reason) = &self.failure {
            return Err(AppError::TransferFailure(reason.clone()));
        }

        self.objects
            .lock()
            .map_err(|_| AppError::TransferFailure("memory store poisoned".to_string()))?
            .insert((target.bucket.clone(), target.key.clone()), target.payload);

        if let Some(report) = progress {
            report(TransferProgress { transferred: total, total });
        }
        info!(bucket = %target.bucket, key = %target.key, bytes = total, "Object kept in memory");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_put_reports_progress_and_stores_bytes() {
        let store = MemoryStore::new();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let report: &ProgressFn = &move |p: TransferProgress| sink.lock().unwrap().push(p);

        let target = UploadTarget::new("images", "a.png", vec![1u8, 2, 3]).unwrap();
        store.put_object(target, Some(report)).await.unwrap();

        assert_eq!(store.get("images", "a.png").unwrap().as_ref(), &[1, 2, 3]);
        let seen = seen.lock().unwrap();
        assert_eq!(seen.first().unwrap().transferred, 0);
        assert!(seen.last().unwrap().is_done());
    }

    #[tokio::test]
    async fn test_failing_store_returns_error() {
        let store = MemoryStore::failing("access denied");
        let target = UploadTarget::new("images", "a.png", Vec::new()).unwrap();

        let err = store.put_object(target, None).await.unwrap_err();
        assert!(matches!(err, AppError::TransferFailure(ref r) if r == "access denied"));
        assert!(store.is_empty());
    }
}
