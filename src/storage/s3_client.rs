// S3 client backed by rust-s3

use super::{ObjectStore, ProgressFn};
use crate::config::StorageConfig;
use crate::models::{TransferProgress, UploadTarget};
use crate::types::{AppError, AppResult};
use async_trait::async_trait;
use s3::creds::Credentials;
use s3::{Bucket, Region};
use tracing::{debug, info, warn};

pub struct S3Client {
    bucket: Box<Bucket>,
}

impl S3Client {
    pub fn new(bucket: Box<Bucket>) -> Self {
        Self { bucket }
    }

    /// Build a client for the configured bucket.
    ///
    /// A custom endpoint (MinIO, R2, ...) switches to path-style addressing.
    pub fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let credentials = Credentials::new(
            Some(&config.access_key_id),
            Some(&config.secret_access_key),
            None,
            None,
            None,
        )
        .map_err(|e| AppError::InvalidConfig(format!("S3 credentials rejected: {}", e)))?;

        let region = match &config.endpoint {
            Some(endpoint) => Region::Custom {
                region: config.region.clone(),
                endpoint: endpoint.clone(),
            },
            None => Region::Custom {
                region: config.region.clone(),
                endpoint: format!("https://s3.{}.amazonaws.com", config.region),
            },
        };

        let bucket = Bucket::new(&config.bucket, region, credentials)
            .map_err(|e| AppError::InvalidConfig(format!("S3 bucket setup failed: {}", e)))?;
        let bucket = if config.endpoint.is_some() {
            bucket.with_path_style()
        } else {
            bucket
        };

        info!(
            bucket = %config.bucket,
            region = %config.region,
            "S3 client configured"
        );
        Ok(Self::new(bucket))
    }

    pub fn bucket_name(&self) -> String {
        self.bucket.name()
    }
}

#[async_trait]
impl ObjectStore for S3Client {
    async fn put_object(
        &self,
        target: UploadTarget,
        progress: Option<&ProgressFn>,
    ) -> AppResult<()> {
        if target.bucket != self.bucket.name() {
            warn!(
                requested = %target.bucket,
                configured = %self.bucket.name(),
                "Upload target names a different bucket; using the configured one"
            );
        }

        let total = target.len();
        if let Some(report) = progress {
            report(TransferProgress { transferred: 0, total });
        }

        debug!(key = %target.key, bytes = total, "Sending PUT object");
        // rust-s3's default `fail-on-err` feature turns non-2xx answers into errors.
        self.bucket
            .put_object(&target.key, &target.payload)
            .await
            .map_err(|e| AppError::TransferFailure(e.to_string()))?;

        if let Some(report) = progress {
            report(TransferProgress { transferred: total, total });
        }
        info!(key = %target.key, bytes = total, "Object stored");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Server;
    use std::sync::{Arc, Mutex};

    fn storage_config(endpoint: Option<&str>) -> StorageConfig {
        StorageConfig {
            bucket: "images".to_string(),
            region: "eu-west-1".to_string(),
            access_key_id: "AKIDEXAMPLE".to_string(),
            secret_access_key: "secret".to_string(),
            endpoint: endpoint.map(String::from),
        }
    }

    #[test]
    fn test_from_config_aws() {
        let client = S3Client::from_config(&storage_config(None)).unwrap();
        assert_eq!(client.bucket_name(), "images");
    }

    #[test]
    fn test_from_config_custom_endpoint() {
        let client = S3Client::from_config(&storage_config(Some("http://localhost:9000"))).unwrap();
        assert_eq!(client.bucket_name(), "images");
    }

    fn recorder() -> (Arc<Mutex<Vec<(u64, u64)>>>, impl Fn(TransferProgress) + Send + Sync) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let record = move |p: TransferProgress| sink.lock().unwrap().push((p.transferred, p.total));
        (seen, record)
    }

    #[tokio::test]
    async fn test_put_object_uses_file_name_as_key() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/images/a.png")
            .with_status(200)
            .create_async()
            .await;

        let client = S3Client::from_config(&storage_config(Some(&server.url()))).unwrap();
        let target = UploadTarget::new("images", "a.png", b"png".to_vec()).unwrap();
        let (seen, record) = recorder();
        let report: &ProgressFn = &record;

        client.put_object(target, Some(report)).await.unwrap();

        mock.assert_async().await;
        assert_eq!(*seen.lock().unwrap(), vec![(0, 3), (3, 3)]);
    }

    #[tokio::test]
    async fn test_rejected_put_is_transfer_failure() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("PUT", "/images/a.png")
            .with_status(403)
            .with_body("denied")
            .create_async()
            .await;

        let client = S3Client::from_config(&storage_config(Some(&server.url()))).unwrap();
        let target = UploadTarget::new("images", "a.png", b"png".to_vec()).unwrap();
        let (seen, record) = recorder();
        let report: &ProgressFn = &record;

        let err = client.put_object(target, Some(report)).await.unwrap_err();

        mock.assert_async().await;
        assert!(matches!(err, AppError::TransferFailure(ref m) if m.contains("403")));
        assert_eq!(*seen.lock().unwrap(), vec![(0, 3)]);
    }
}
