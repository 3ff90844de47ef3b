// Domain models for uploads and gallery records

use crate::types::{AppError, AppResult};
use bytes::Bytes;
use serde::Deserialize;
use std::path::Path;

/// One object write: bucket, key, and the bytes to store.
#[derive(Debug, Clone)]
pub struct UploadTarget {
    pub bucket: String,
    pub key: String,
    pub payload: Bytes,
}

impl UploadTarget {
    pub fn new(
        bucket: impl Into<String>,
        key: impl Into<String>,
        payload: impl Into<Bytes>,
    ) -> AppResult<Self> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(AppError::InvalidTarget("object key must not be empty".to_string()));
        }
        Ok(Self {
            bucket: bucket.into(),
            key,
            payload: payload.into(),
        })
    }

    /// Read a file from disk; the object key is the file's own name.
    pub async fn from_path(bucket: impl Into<String>, path: &Path) -> AppResult<Self> {
        let key = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                AppError::InvalidTarget(format!("{} has no usable file name", path.display()))
            })?
            .to_string();
        let payload = tokio::fs::read(path).await?;
        Self::new(bucket, key, payload)
    }

    pub fn len(&self) -> u64 {
        self.payload.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.payload.is_empty()
    }
}

/// Bytes acknowledged so far out of the payload total.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransferProgress {
    pub transferred: u64,
    pub total: u64,
}

impl TransferProgress {
    pub fn percent(&self) -> u8 {
        if self.total == 0 {
            return if self.transferred == 0 { 0 } else { 100 };
        }
        ((self.transferred.min(self.total) * 100) / self.total) as u8
    }

    pub fn is_done(&self) -> bool {
        self.transferred >= self.total
    }
}

/// Lifecycle of a single upload.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum UploadStatus {
    #[default]
    Idle,
    Uploading { percent: u8 },
    Complete,
    Failed(String),
}

impl UploadStatus {
    /// True once the storage call has resolved either way.
    pub fn is_settled(&self) -> bool {
        matches!(self, UploadStatus::Complete | UploadStatus::Failed(_))
    }
}

impl std::fmt::Display for UploadStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadStatus::Idle => write!(f, "idle"),
            UploadStatus::Uploading { percent } => write!(f, "uploading ({}%)", percent),
            UploadStatus::Complete => write!(f, "complete"),
            UploadStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// A previously uploaded image as listed by the metadata endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub storage_key: String,
    #[serde(default)]
    pub generated_caption: String,
    #[serde(default)]
    pub translated_caption: String,
    #[serde(default)]
    pub moderated: Option<bool>,
}

impl ImageRecord {
    pub fn is_eligible(&self) -> bool {
        self.moderated != Some(true)
    }

    /// `<cdn>/<storageKey>`, tolerating a trailing slash on the host.
    pub fn image_url(&self, cdn_base: &str) -> String {
        format!("{}/{}", cdn_base.trim_end_matches('/'), self.storage_key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_key_rejected() {
        let err = UploadTarget::new("images", "", Vec::new()).unwrap_err();
        assert!(matches!(err, AppError::InvalidTarget(_)));
    }

    #[tokio::test]
    async fn test_target_from_path_uses_file_name() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.png");
        tokio::fs::write(&path, b"").await.unwrap();

        let target = UploadTarget::from_path("images", &path).await.unwrap();
        assert_eq!(target.bucket, "images");
        assert_eq!(target.key, "a.png");
        assert!(target.is_empty());
    }

    #[test]
    fn test_progress_percent() {
        let p = TransferProgress { transferred: 50, total: 200 };
        assert_eq!(p.percent(), 25);
        assert!(!p.is_done());

        let empty = TransferProgress { transferred: 0, total: 0 };
        assert_eq!(empty.percent(), 0);
        assert!(empty.is_done());
    }

    #[test]
    fn test_record_eligibility_and_json_shape() {
        let json = r#"[
            {"storageKey": "cat.png", "generatedCaption": "a cat #pets", "translatedCaption": "un gato"},
            {"storageKey": "bad.png", "generatedCaption": "", "translatedCaption": "", "moderated": true},
            {"storageKey": "dog.png", "generatedCaption": "a dog", "translatedCaption": "un perro", "moderated": false}
        ]"#;
        let records: Vec<ImageRecord> = serde_json::from_str(json).unwrap();

        let eligible: Vec<_> = records.iter().filter(|r| r.is_eligible()).map(|r| r.storage_key.as_str()).collect();
        assert_eq!(eligible, vec!["cat.png", "dog.png"]);
    }

    #[test]
    fn test_image_url() {
        let record = ImageRecord {
            storage_key: "cat.png".to_string(),
            generated_caption: String::new(),
            translated_caption: String::new(),
            moderated: None,
        };
        assert_eq!(record.image_url("https://cdn.example.com/"), "https://cdn.example.com/cat.png");
    }
}
