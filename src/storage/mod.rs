// Storage layer (S3-compatible)

use crate::models::{TransferProgress, UploadTarget};
use crate::types::AppResult;
use async_trait::async_trait;

pub mod memory;
pub mod s3_client;

pub use memory::*;
pub use s3_client::*;

/// Callback invoked as bytes are acknowledged by the store.
pub type ProgressFn = dyn Fn(TransferProgress) + Send + Sync;

/// A key-addressed byte store that can accept a single object write.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `target.payload` under `target.key`.
    ///
    /// Resolves once the service has acknowledged the write. Every failure
    /// is returned to the caller; nothing is swallowed here.
    async fn put_object(
        &self,
        target: UploadTarget,
        progress: Option<&ProgressFn>,
    ) -> AppResult<()>;
}
