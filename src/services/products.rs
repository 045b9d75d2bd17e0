//! Catalog product export and inventory updates.

use crate::clients::{
    concat_params, page_params, product_update_endpoint, variant_update_endpoint, ApiResponse,
    Command, WebRequestService, PRODUCTS_INCLUDE_PARAMS,
};
use crate::config::{AuthMode, BigCommerceConfig};
use crate::engine::{CancellationToken, CollectError, Marker, PageCollector, RetryContext};
use crate::models::{Brand, Envelope, Product, ProductUpdate, Store};
use std::collections::HashMap;
use std::sync::Arc;

/// Fetches catalog products and pushes inventory updates.
#[derive(Debug)]
pub struct ProductsService {
    transport: Arc<WebRequestService>,
    collector: PageCollector,
}

impl ProductsService {
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

    fn auth_mode(&self) -> AuthMode {
        self.transport.config().auth_mode()
    }

    /// Fetches the whole catalog, variants and images included.
    ///
    /// With `include_extended` the store's weight unit is stamped on every
    /// product and brand ids are resolved to names, at the cost of one
    /// store call plus a paginated brands fetch.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::RetriesExhausted`] when a call fails past
    /// the retry ceiling, or [`CollectError::Cancelled`] when the token
    /// fires.
    pub async fn get_products(
        &self,
        include_extended: bool,
        cancel: &CancellationToken,
    ) -> Result<Vec<Product>, CollectError> {
        let marker = Marker::new();
        let url = self.transport.url_for(Command::GetProducts);
        let enveloped = Command::GetProducts.enveloped(self.auth_mode());
        let base_params = if enveloped { PRODUCTS_INCLUDE_PARAMS } else { "" };
        let transport = &*self.transport;
        let marker_ref = &marker;

        let mut products = self
            .collector
            .collect_async(&marker, &url, cancel, |page| {
                let params = concat_params(base_params, &page_params(page));
                async move {
                    if enveloped {
                        transport
                            .get::<Envelope<Product>>(Command::GetProducts, &params, marker_ref)
                            .await
                            .map(|response| response.map(|envelope| envelope.data).into_page())
                    } else {
                        transport
                            .get::<Vec<Product>>(Command::GetProducts, &params, marker_ref)
                            .await
                            .map(ApiResponse::into_page)
                    }
                }
            })
            .await?;

        if include_extended {
            self.fill_weight_unit(&mut products, &marker, cancel)
                .await?;
            self.fill_brand_names(&mut products, &marker, cancel)
                .await?;
        }

        tracing::info!(
            marker = %marker,
            count = products.len(),
            category = "products",
            "catalog export finished"
        );
        Ok(products)
    }

    /// Pushes inventory updates, one paced PUT per entry.
    ///
    /// Updates are never paginated and never adjusted; a failing update
    /// retries like any other call and aborts the whole batch on
    /// exhaustion.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::RetriesExhausted`] when an update fails
    /// past the retry ceiling, or [`CollectError::Cancelled`] when the
    /// token fires.
    pub async fn update_products(
        &self,
        updates: &[ProductUpdate],
        cancel: &CancellationToken,
    ) -> Result<(), CollectError> {
        let marker = Marker::new();
        let mode = self.auth_mode();

        for update in updates {
            let endpoint = match update.variant_id {
                Some(variant_id) => variant_update_endpoint(update.id, variant_id),
                None => product_update_endpoint(update.id, mode),
            };
            let url = format!("{}{endpoint}", self.transport.url_for(Command::UpdateProduct));
            let ctx = RetryContext::new(marker.clone(), &url);
            let body = update.body();

            let limits = self
                .collector
                .retry_policy()
                .execute_async(
                    &ctx,
                    cancel,
                    || {
                        self.transport
                            .put(Command::UpdateProduct, &endpoint, &body, &marker)
                    },
                    |_, _| {},
                )
                .await?;

            self.collector
                .delay_scheduler()
                .wait_async(limits, cancel)
                .await?;
        }

        tracing::info!(
            marker = %marker,
            count = updates.len(),
            category = "products",
            "inventory updates pushed"
        );
        Ok(())
    }

    async fn fill_weight_unit(
        &self,
        products: &mut [Product],
        marker: &Marker,
        cancel: &CancellationToken,
    ) -> Result<(), CollectError> {
        let url = self.transport.url_for(Command::GetStore);
        let ctx = RetryContext::new(marker.clone(), &url);

        let response = self
            .collector
            .retry_policy()
            .execute_async(
                &ctx,
                cancel,
                || {
                    self.transport
                        .get::<Store>(Command::GetStore, "", marker)
                },
                |_, _| {},
            )
            .await?;

        if let Some(store) = response.body {
            for product in products.iter_mut() {
                product.weight_unit = Some(store.weight_units.clone());
            }
        }
        self.collector
            .delay_scheduler()
            .wait_async(response.limits, cancel)
            .await?;
        Ok(())
    }

    async fn fill_brand_names(
        &self,
        products: &mut [Product],
        marker: &Marker,
        cancel: &CancellationToken,
    ) -> Result<(), CollectError> {
        let url = self.transport.url_for(Command::GetBrands);
        let enveloped = Command::GetBrands.enveloped(self.auth_mode());
        let transport = &*self.transport;

        let brands = self
            .collector
            .collect_async(marker, &url, cancel, |page| {
                let params = page_params(page);
                async move {
                    if enveloped {
                        transport
                            .get::<Envelope<Brand>>(Command::GetBrands, &params, marker)
                            .await
                            .map(|response| response.map(|envelope| envelope.data).into_page())
                    } else {
                        transport
                            .get::<Vec<Brand>>(Command::GetBrands, &params, marker)
                            .await
                            .map(ApiResponse::into_page)
                    }
                }
            })
            .await?;

        let names: HashMap<i64, String> = brands
            .into_iter()
            .map(|brand| (brand.id, brand.name))
            .collect();
        for product in products.iter_mut() {
            product.brand_name = product
                .brand_id
                .and_then(|id| names.get(&id).cloned());
        }
        Ok(())
    }
}
