use crate::types::{AppError, AppResult};
use serde::Deserialize;
use std::env;
use std::time::Duration;

const DEFAULT_RESET_DELAY_SECS: u64 = 5;

/// Bucket name used when no storage is configured (`--dry-run`, gallery only).
pub const LOCAL_BUCKET: &str = "local";

const STORAGE_VARS: [&str; 4] = [
    "S3_BUCKET_NAME",
    "S3_BUCKET_REGION",
    "S3_ACCESS_KEY_ID",
    "S3_SECRET_ACCESS_KEY",
];

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// `None` when no `S3_*` variable is set at all.
    pub storage: Option<StorageConfig>,
    pub gallery: GalleryConfig,
    pub upload: UploadConfig,
}

#[derive(Clone, Deserialize)]
pub struct StorageConfig {
    pub bucket: String,
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub endpoint: Option<String>,
}

// Keep credentials out of logs.
impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("bucket", &self.bucket)
            .field("region", &self.region)
            .field("access_key_id", &"<redacted>")
            .field("secret_access_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .finish()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryConfig {
    pub metadata_url: Option<String>,
    pub cdn_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadConfig {
    pub reset_delay_secs: u64,
}

impl UploadConfig {
    pub fn reset_delay(&self) -> Duration {
        Duration::from_secs(self.reset_delay_secs)
    }
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            reset_delay_secs: DEFAULT_RESET_DELAY_SECS,
        }
    }
}

impl Config {
    pub fn from_env() -> AppResult<Self> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Build and validate configuration from an arbitrary variable source.
    ///
    /// Blank values are treated the same as missing ones. The storage
    /// section is all or nothing: setting any `S3_*` credential requires
    /// the rest, while setting none leaves storage unconfigured until
    /// [`Config::storage`] is asked for it.
    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let optional = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };
        let required = |name: &str| {
            optional(name).ok_or_else(|| AppError::ConfigurationMissing(name.to_string()))
        };

        let reset_delay_secs = match optional("UPLOAD_RESET_DELAY_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                AppError::InvalidConfig(format!(
                    "UPLOAD_RESET_DELAY_SECS must be a whole number of seconds, got {:?}",
                    raw
                ))
            })?,
            None => DEFAULT_RESET_DELAY_SECS,
        };

        let storage = if STORAGE_VARS.iter().any(|name| optional(name).is_some()) {
            Some(StorageConfig {
                bucket: required("S3_BUCKET_NAME")?,
                region: required("S3_BUCKET_REGION")?,
                access_key_id: required("S3_ACCESS_KEY_ID")?,
                secret_access_key: required("S3_SECRET_ACCESS_KEY")?,
                endpoint: optional("S3_ENDPOINT"),
            })
        } else {
            None
        };

        Ok(Self {
            storage,
            gallery: GalleryConfig {
                metadata_url: optional("GALLERY_METADATA_URL"),
                cdn_url: optional("GALLERY_CDN_URL"),
            },
            upload: UploadConfig { reset_delay_secs },
        })
    }

    /// Storage credentials, required only where uploads go to S3.
    pub fn storage(&self) -> AppResult<&StorageConfig> {
        self.storage
            .as_ref()
            .ok_or_else(|| AppError::ConfigurationMissing(STORAGE_VARS[0].to_string()))
    }

    /// Target bucket for uploads, or [`LOCAL_BUCKET`] without storage.
    pub fn bucket_name(&self) -> &str {
        self.storage
            .as_ref()
            .map(|s| s.bucket.as_str())
            .unwrap_or(LOCAL_BUCKET)
    }

    /// The metadata endpoint, required only by commands that show the gallery.
    pub fn metadata_url(&self) -> AppResult<&str> {
        self.gallery
            .metadata_url
            .as_deref()
            .ok_or_else(|| AppError::ConfigurationMissing("GALLERY_METADATA_URL".to_string()))
    }
}
