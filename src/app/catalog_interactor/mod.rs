// Catalog interactor - Paginated, searchable clip listing

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::CatalogRules;
use crate::ports::*;

/// Interactor for the catalog browsing use case
pub struct CatalogInteractor {
    catalog_port: Arc<dyn CatalogPort>,
}

impl CatalogInteractor {
    /// Create new catalog interactor with injected port
    pub fn new(catalog_port: Arc<dyn CatalogPort>) -> Self {
        Self { catalog_port }
    }

    /// Fetch one page of the catalog, optionally filtered by title
    pub async fn fetch_page(&self, request: CatalogRequest) -> Result<CatalogPage, DomainError> {
        let page = request.page.ok_or(DomainError::MissingPage)?;
        if page == 0 {
            return Err(DomainError::BadArgs("page numbers start at 1".to_string()));
        }

        let mut items = self.catalog_port.load_items().await?;

        match request.filter() {
            Some(query) => {
                info!(query, "Filtering catalog");
                items.retain(|item| CatalogRules::title_matches(&item.title, query));
            }
            None => debug!("No catalog query"),
        }

        let total_pages = CatalogRules::total_pages(items.len());
        let items = CatalogRules::page_slice(&items, page);
        debug!(page, total_pages, returned = items.len(), "Catalog page built");

        Ok(CatalogPage { total_pages, items })
    }
}
