//! Gallery Loader
//!
//! Fetches the list of previously uploaded images from the metadata
//! endpoint, drops moderated entries and tracks which image is selected.

use crate::models::ImageRecord;
use crate::types::{AppError, AppResult};
use tracing::{debug, info, warn};

/// Eligible records plus the index of the selected one.
///
/// `selected` is `None` only when `records` is empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Gallery {
    records: Vec<ImageRecord>,
    selected: Option<usize>,
}

impl Gallery {
    /// Keep eligible records only and select the first of them.
    pub fn from_records(records: Vec<ImageRecord>) -> Self {
        let records: Vec<ImageRecord> = records.into_iter().filter(|r| r.is_eligible()).collect();
        let selected = if records.is_empty() { None } else { Some(0) };
        Self { records, selected }
    }

    pub fn records(&self) -> &[ImageRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    pub fn selected(&self) -> Option<&ImageRecord> {
        self.selected.and_then(|i| self.records.get(i))
    }

    pub fn select(&mut self, index: usize) -> bool {
        if index < self.records.len() {
            self.selected = Some(index);
            true
        } else {
            false
        }
    }

    pub fn select_next(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some((i + 1).min(self.records.len() - 1));
        }
    }

    pub fn select_prev(&mut self) {
        if let Some(i) = self.selected {
            self.selected = Some(i.saturating_sub(1));
        }
    }

    /// URL of the selected image under `cdn_base`.
    pub fn image_url(&self, cdn_base: &str) -> Option<String> {
        self.selected().map(|r| r.image_url(cdn_base))
    }
}

/// What the gallery view currently shows.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum GalleryState {
    #[default]
    Loading,
    Ready(Gallery),
    Failed(String),
}

/// Client for the metadata endpoint
pub struct GalleryLoader {
    client: reqwest::Client,
    metadata_url: String,
}

impl GalleryLoader {
    pub fn new(metadata_url: impl Into<String>) -> Self {
        Self::with_client(reqwest::Client::new(), metadata_url)
    }

    pub fn with_client(client: reqwest::Client, metadata_url: impl Into<String>) -> Self {
        Self {
            client,
            metadata_url: metadata_url.into(),
        }
    }

    /// Fetch every record the endpoint lists, moderated ones included.
    pub async fn fetch_records(&self) -> AppResult<Vec<ImageRecord>> {
        debug!(url = %self.metadata_url, "Fetching gallery metadata");

        let response = self
            .client
            .get(&self.metadata_url)
            .send()
            .await
            .map_err(|e| AppError::FetchFailure(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::FetchFailure(format!(
                "metadata endpoint answered HTTP {}",
                status.as_u16()
            )));
        }

        response
            .json::<Vec<ImageRecord>>()
            .await
            .map_err(|e| AppError::FetchFailure(format!("invalid gallery JSON: {}", e)))
    }

    pub async fn load(&self) -> AppResult<Gallery> {
        let records = self.fetch_records().await?;
        let total = records.len();
        let gallery = Gallery::from_records(records);
        info!(
            total,
            eligible = gallery.records().len(),
            "Gallery loaded"
        );
        Ok(gallery)
    }

    /// Like [`load`](Self::load), but folded into a displayable state.
    pub async fn load_state(&self) -> GalleryState {
        match self.load().await {
            Ok(gallery) => GalleryState::Ready(gallery),
            Err(e) => {
                warn!("Gallery load failed: {}", e);
                GalleryState::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(key: &str, moderated: Option<bool>) -> ImageRecord {
        ImageRecord {
            storage_key: key.to_string(),
            generated_caption: format!("caption for {}", key),
            translated_caption: String::new(),
            moderated,
        }
    }

    #[test]
    fn test_moderated_records_excluded() {
        let gallery = Gallery::from_records(vec![
            record("hidden.png", Some(true)),
            record("a.png", None),
            record("b.png", Some(false)),
            record("also-hidden.png", Some(true)),
        ]);

        let keys: Vec<_> = gallery.records().iter().map(|r| r.storage_key.as_str()).collect();
        assert_eq!(keys, vec!["a.png", "b.png"]);
        assert_eq!(gallery.selected().unwrap().storage_key, "a.png");
    }

    #[test]
    fn test_no_eligible_records_leaves_selection_unset() {
        let gallery = Gallery::from_records(vec![record("hidden.png", Some(true))]);
        assert!(gallery.is_empty());
        assert_eq!(gallery.selected(), None);
        assert_eq!(gallery.image_url("https://cdn.example.com"), None);
    }

    #[test]
    fn test_selection_stays_in_bounds() {
        let mut gallery = Gallery::from_records(vec![record("a.png", None), record("b.png", None)]);

        gallery.select_prev();
        assert_eq!(gallery.selected_index(), Some(0));
        gallery.select_next();
        gallery.select_next();
        assert_eq!(gallery.selected_index(), Some(1));
        assert!(!gallery.select(2));
        assert_eq!(gallery.selected_index(), Some(1));

        let mut empty = Gallery::default();
        empty.select_next();
        assert_eq!(empty.selected_index(), None);
    }

    #[tokio::test]
    async fn test_load_from_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/images")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                r#"[
                    {"storageKey": "x.png", "generatedCaption": "x", "translatedCaption": "x", "moderated": true},
                    {"storageKey": "cat.png", "generatedCaption": "a cat #pets", "translatedCaption": "un gato"}
                ]"#,
            )
            .create_async()
            .await;

        let loader = GalleryLoader::new(format!("{}/images", server.url()));
        let gallery = loader.load().await.unwrap();

        mock.assert_async().await;
        assert_eq!(gallery.records().len(), 1);
        assert_eq!(
            gallery.image_url("https://cdn.example.com").unwrap(),
            "https://cdn.example.com/cat.png"
        );
    }

    #[tokio::test]
    async fn test_http_error_is_fetch_failure() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/images")
            .with_status(503)
            .create_async()
            .await;

        let loader = GalleryLoader::new(format!("{}/images", server.url()));
        let err = loader.load().await.unwrap_err();
        assert!(matches!(err, AppError::FetchFailure(ref m) if m.contains("503")));
    }

    #[tokio::test]
    async fn test_malformed_json_becomes_failed_state() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/images")
            .with_status(200)
            .with_body("{not json")
            .create_async()
            .await;

        let loader = GalleryLoader::new(format!("{}/images", server.url()));
        assert!(matches!(loader.load_state().await, GalleryState::Failed(_)));
    }
}
