//! Upload Workflow Controller
//!
//! Drives each upload through `Idle → Uploading → Complete | Failed → Idle`.
//!
//! Every selected file gets its own [`UploadId`] and entry, so a second
//! selection made while the first is still in flight never touches the
//! first upload's status. Storage calls and reset timers run on spawned
//! tasks and report back over a channel; only the owner of the controller
//! mutates state, either by polling ([`UploadController::poll_events`]) or
//! by awaiting the next change ([`UploadController::next_change`]).

use crate::config::Config;
use crate::models::{TransferProgress, UploadStatus, UploadTarget};
use crate::storage::{ObjectStore, ProgressFn};
use chrono::{DateTime, Local};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

const EVENT_BUFFER: usize = 100;

/// Identity of one upload within a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UploadId(u64);

impl std::fmt::Display for UploadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An upload that has not yet been reset to idle.
#[derive(Debug, Clone)]
pub struct UploadEntry {
    pub id: UploadId,
    pub file: PathBuf,
    pub key: String,
    pub status: UploadStatus,
    pub started_at: DateTime<Local>,
    pub settled_at: Option<DateTime<Local>>,
}

impl UploadEntry {
    /// Wall-clock time from selection to settling; `None` while in flight.
    pub fn duration(&self) -> Option<chrono::Duration> {
        self.settled_at.map(|settled| settled - self.started_at)
    }
}

/// Lifecycle events sent back by upload and timer tasks
#[derive(Debug)]
enum UploadEvent {
    Progress {
        id: UploadId,
        progress: TransferProgress,
    },
    Settled {
        id: UploadId,
        result: Result<(), String>,
    },
    Reset {
        id: UploadId,
    },
}

pub struct UploadController {
    store: Arc<dyn ObjectStore>,
    bucket: String,
    reset_delay: Duration,
    uploads: BTreeMap<UploadId, UploadEntry>,
    next_id: u64,
    event_tx: mpsc::Sender<UploadEvent>,
    event_rx: mpsc::Receiver<UploadEvent>,
}

impl UploadController {
    pub fn new(store: Arc<dyn ObjectStore>, bucket: impl Into<String>, reset_delay: Duration) -> Self {
        let (event_tx, event_rx) = mpsc::channel(EVENT_BUFFER);
        Self {
            store,
            bucket: bucket.into(),
            reset_delay,
            uploads: BTreeMap::new(),
            next_id: 1,
            event_tx,
            event_rx,
        }
    }

    pub fn from_config(store: Arc<dyn ObjectStore>, config: &Config) -> Self {
        Self::new(store, config.bucket_name(), config.upload.reset_delay())
    }

    /// Start uploading the first of `files`.
    ///
    /// An empty selection does nothing. Must be called from within a tokio
    /// runtime.
    pub fn select_files(&mut self, files: Vec<PathBuf>) -> Option<UploadId> {
        let path = files.into_iter().next()?;

        let id = UploadId(self.next_id);
        self.next_id += 1;

        let key = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        info!(upload = %id, file = %path.display(), "Upload started");
        self.uploads.insert(
            id,
            UploadEntry {
                id,
                file: path.clone(),
                key,
                status: UploadStatus::Uploading { percent: 0 },
                started_at: Local::now(),
                settled_at: None,
            },
        );

        let store = self.store.clone();
        let bucket = self.bucket.clone();
        let tx = self.event_tx.clone();
        tokio::spawn(async move {
            let progress_tx = tx.clone();
            let report: &ProgressFn = &move |progress: TransferProgress| {
                // A full buffer only drops an intermediate percentage.
                progress_tx.try_send(UploadEvent::Progress { id, progress }).ok();
            };

            let result = match UploadTarget::from_path(bucket, &path).await {
                Ok(target) => store.put_object(target, Some(report)).await,
                Err(e) => Err(e),
            };

            tx.send(UploadEvent::Settled {
                id,
                result: result.map_err(|e| e.to_string()),
            })
            .await
            .ok();
        });

        Some(id)
    }

    /// Apply every event already waiting, without blocking.
    pub fn poll_events(&mut self) -> Vec<(UploadId, UploadStatus)> {
        let mut events = Vec::new();
        while let Ok(event) = self.event_rx.try_recv() {
            events.push(event);
        }

        events
            .into_iter()
            .filter_map(|event| self.apply(event))
            .collect()
    }

    /// Wait for the next status change of any upload.
    pub async fn next_change(&mut self) -> Option<(UploadId, UploadStatus)> {
        loop {
            // The controller keeps a sender, so this never yields None.
            let event = self.event_rx.recv().await?;
            if let Some(change) = self.apply(event) {
                return Some(change);
            }
        }
    }

    fn apply(&mut self, event: UploadEvent) -> Option<(UploadId, UploadStatus)> {
        match event {
            UploadEvent::Progress { id, progress } => {
                let entry = self.uploads.get_mut(&id)?;
                if !matches!(entry.status, UploadStatus::Uploading { .. }) {
                    return None;
                }
                let percent = progress.percent();
                if entry.status == (UploadStatus::Uploading { percent }) {
                    return None;
                }
                debug!(upload = %id, percent, "Upload progress");
                entry.status = UploadStatus::Uploading { percent };
                Some((id, entry.status.clone()))
            }
            UploadEvent::Settled { id, result } => {
                let entry = self.uploads.get_mut(&id)?;
                let settled_at = Local::now();
                let elapsed_ms = (settled_at - entry.started_at).num_milliseconds();
                entry.settled_at = Some(settled_at);
                entry.status = match result {
                    Ok(()) => {
                        info!(upload = %id, key = %entry.key, elapsed_ms, "Upload complete");
                        UploadStatus::Complete
                    }
                    Err(reason) => {
                        error!(upload = %id, key = %entry.key, elapsed_ms, "Upload failed: {}", reason);
                        UploadStatus::Failed(reason)
                    }
                };
                let status = entry.status.clone();
                self.schedule_reset(id);
                Some((id, status))
            }
            UploadEvent::Reset { id } => {
                let entry = self.uploads.remove(&id)?;
                debug!(upload = %id, file = %entry.file.display(), "Upload reset to idle");
                Some((id, UploadStatus::Idle))
            }
        }
    }

    fn schedule_reset(&self, id: UploadId) {
        let tx = self.event_tx.clone();
        let delay = self.reset_delay;
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tx.send(UploadEvent::Reset { id }).await.ok();
        });
    }

    /// Status of `id`; uploads that were reset (or never existed) are idle.
    pub fn status(&self, id: UploadId) -> UploadStatus {
        self.uploads
            .get(&id)
            .map(|e| e.status.clone())
            .unwrap_or_default()
    }

    pub fn entry(&self, id: UploadId) -> Option<&UploadEntry> {
        self.uploads.get(&id)
    }

    /// Uploads not yet reset, oldest first.
    pub fn uploads(&self) -> impl Iterator<Item = &UploadEntry> {
        self.uploads.values()
    }

    /// The most recently started upload still on display.
    pub fn latest(&self) -> Option<&UploadEntry> {
        self.uploads.values().next_back()
    }

    pub fn in_flight(&self) -> usize {
        self.uploads
            .values()
            .filter(|e| matches!(e.status, UploadStatus::Uploading { .. }))
            .count()
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }

    pub fn reset_delay(&self) -> Duration {
        self.reset_delay
    }
}
