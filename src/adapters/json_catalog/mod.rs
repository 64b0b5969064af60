// JSON catalog adapter - Clip metadata read from a local search listing

use std::path::PathBuf;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

#[derive(Debug, Deserialize)]
struct Listing {
    #[serde(default)]
    items: Vec<ListingItem>,
}

#[derive(Debug, Deserialize)]
struct ListingItem {
    id: ListingId,
    #[serde(default)]
    snippet: Snippet,
}

#[derive(Debug, Deserialize)]
struct ListingId {
    #[serde(rename = "videoId")]
    video_id: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct Snippet {
    #[serde(default)]
    title: String,
    #[serde(default)]
    description: String,
}

/// Catalog backed by a search-listing JSON file
///
/// Only entries carrying a video id are playable; channel and playlist
/// results are skipped. The file is re-read on every request.
pub struct JsonCatalogAdapter {
    path: PathBuf,
}

impl JsonCatalogAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Parse a listing document into playable items
    pub fn parse_listing(content: &str) -> Result<Vec<CatalogItem>, DomainError> {
        let listing: Listing = serde_json::from_str(content)
            .map_err(|e| DomainError::CatalogMalformed(e.to_string()))?;

        let mut items = Vec::with_capacity(listing.items.len());
        for entry in listing.items {
            let Some(video_id) = entry.id.video_id else {
                continue;
            };
            match ClipId::new(video_id) {
                Ok(id) => items.push(CatalogItem {
                    id,
                    title: entry.snippet.title,
                    description: entry.snippet.description,
                }),
                Err(e) => warn!(error = %e, "Skipping catalog entry"),
            }
        }
        Ok(items)
    }
}

#[async_trait]
impl CatalogPort for JsonCatalogAdapter {
    async fn load_items(&self) -> Result<Vec<CatalogItem>, DomainError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            DomainError::CatalogUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let items = Self::parse_listing(&content)?;
        debug!(path = %self.path.display(), items = items.len(), "Catalog loaded");
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "kind": "youtube#searchListResponse",
        "items": [
            {"id": {"kind": "youtube#video", "videoId": "v1"},
             "snippet": {"title": "Cat show", "description": "cats"}},
            {"id": {"kind": "youtube#channel", "channelId": "c1"},
             "snippet": {"title": "A channel", "description": ""}},
            {"id": {"kind": "youtube#video", "videoId": "v2"},
             "snippet": {"title": "Dog walk"}}
        ]
    }"#;

    #[test]
    fn test_parse_skips_non_video_entries() {
        let items = JsonCatalogAdapter::parse_listing(LISTING).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].id.as_str(), "v1");
        assert_eq!(items[0].description, "cats");
        assert_eq!(items[1].title, "Dog walk");
        assert_eq!(items[1].description, "");
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!(matches!(
            JsonCatalogAdapter::parse_listing("{ nope"),
            Err(DomainError::CatalogMalformed(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let adapter = JsonCatalogAdapter::new("/nonexistent/catalog.json");
        assert!(matches!(
            adapter.load_items().await,
            Err(DomainError::CatalogUnavailable(_))
        ));
    }
}
