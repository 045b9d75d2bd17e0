//! Category export.

use crate::clients::{page_params, ApiResponse, Command, WebRequestService};
use crate::config::BigCommerceConfig;
use crate::engine::{CancellationToken, CollectError, Marker, PageCollector};
use crate::models::{Category, Envelope};
use std::sync::Arc;

/// Fetches the store's category tree.
#[derive(Debug)]
pub struct CategoriesService {
    transport: Arc<WebRequestService>,
    collector: PageCollector,
}

impl CategoriesService {
    /// Creates a service over its own transport, without host probing.
    #[must_use]
    pub fn new(config: BigCommerceConfig) -> Self {
        Self::with_transport(Arc::new(WebRequestService::new(config)))
    }

    /// Creates a service over a shared transport.
    #[must_use]
    pub fn with_transport(transport: Arc<WebRequestService>) -> Self {
        let collector = PageCollector::from_config(transport.config());
        Self {
            transport,
            collector,
        }
    }

    /// Fetches every category.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::RetriesExhausted`] when a page fails past
    /// the retry ceiling, or [`CollectError::Cancelled`] when the token
    /// fires.
    pub async fn get_categories(
        &self,
        cancel: &CancellationToken,
    ) -> Result<Vec<Category>, CollectError> {
        let marker = Marker::new();
        let url = self.transport.url_for(Command::GetCategories);
        let enveloped = Command::GetCategories.enveloped(self.transport.config().auth_mode());
        let transport = &*self.transport;
        let marker_ref = &marker;

        let categories = self
            .collector
            .collect_async(&marker, &url, cancel, |page| {
                let params = page_params(page);
                async move {
                    if enveloped {
                        transport
                            .get::<Envelope<Category>>(Command::GetCategories, &params, marker_ref)
                            .await
                            .map(|response| response.map(|envelope| envelope.data).into_page())
                    } else {
                        transport
                            .get::<Vec<Category>>(Command::GetCategories, &params, marker_ref)
                            .await
                            .map(ApiResponse::into_page)
                    }
                }
            })
            .await?;

        tracing::info!(
            marker = %marker,
            count = categories.len(),
            category = "categories",
            "category export finished"
        );
        Ok(categories)
    }
}
