//! Blocking service variants.
//!
//! Behavioral parity with the async services for callers without an
//! async runtime: same pagination, retry, adjustment, and pacing
//! behavior, with sub-resource fetches performed sequentially instead of
//! fanned out.

use crate::clients::blocking::WebRequestService;
use crate::clients::{
    concat_params, orders_date_params, page_params, product_update_endpoint,
    variant_update_endpoint, ApiResponse, Command, PRODUCTS_INCLUDE_PARAMS,
};
use crate::config::{AuthMode, BigCommerceConfig};
use crate::engine::{CollectError, Marker, PageCollector, RetryContext};
use crate::models::{
    Brand, Category, Envelope, Order, OrderProduct, Product, ProductUpdate, ShippingAddress, Store,
};
use std::collections::HashMap;
use std::sync::Arc;

/// Blocking twin of [`crate::services::OrdersService`].
#[derive(Debug)]
pub struct OrdersService {
    transport: Arc<WebRequestService>,
    collector: PageCollector,
}

impl OrdersService {
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

    /// Fetches every order created or modified inside `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::RetriesExhausted`] when a page or
    /// sub-resource call fails past the retry ceiling.
    pub fn get_orders(
        &self,
        from: chrono::DateTime<chrono::Utc>,
        to: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Order>, CollectError> {
        let marker = Marker::new();
        let date_params = orders_date_params(from, to);
        let url = self.transport.url_for(Command::GetOrders);

        let mut orders = self.collector.collect(&marker, &url, |page| {
            let params = concat_params(&date_params, &page_params(page));
            self.transport
                .get::<Vec<Order>>(Command::GetOrders, &params, &marker)
                .map(ApiResponse::into_page)
        })?;

        for order in &mut orders {
            let limits = self.fill_one_order(order, &marker)?;
            self.collector.delay_scheduler().wait(limits);
        }
        Ok(orders)
    }

    fn fill_one_order(
        &self,
        order: &mut Order,
        marker: &Marker,
    ) -> Result<crate::throttling::RateLimits, CollectError> {
        let mut limits = crate::throttling::RateLimits::unknown();

        if let Some(link) = order.products_link.clone() {
            let url = self.transport.resolve_url(&link.url);
            let ctx = RetryContext::new(marker.clone(), &url);
            let response = self.collector.retry_policy().execute(
                &ctx,
                || self.transport.get_url::<Vec<OrderProduct>>(&url, marker),
                |_, _| {},
            )?;
            order.products = response.body.unwrap_or_default();
            limits = response.limits;
        }

        if let Some(link) = order.shipping_addresses_link.clone() {
            let url = self.transport.resolve_url(&link.url);
            let ctx = RetryContext::new(marker.clone(), &url);
            let response = self.collector.retry_policy().execute(
                &ctx,
                || self.transport.get_url::<Vec<ShippingAddress>>(&url, marker),
                |_, _| {},
            )?;
            order.addresses = response.body.unwrap_or_default();
            limits = response.limits;
        }

        Ok(limits)
    }
}

/// Blocking twin of [`crate::services::ProductsService`].
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
    /// # Errors
    ///
    /// Returns [`CollectError::RetriesExhausted`] when a call fails past
    /// the retry ceiling.
    pub fn get_products(&self, include_extended: bool) -> Result<Vec<Product>, CollectError> {
        let marker = Marker::new();
        let url = self.transport.url_for(Command::GetProducts);
        let enveloped = Command::GetProducts.enveloped(self.auth_mode());
        let base_params = if enveloped { PRODUCTS_INCLUDE_PARAMS } else { "" };

        let mut products = self.collector.collect(&marker, &url, |page| {
            let params = concat_params(base_params, &page_params(page));
            if enveloped {
                self.transport
                    .get::<Envelope<Product>>(Command::GetProducts, &params, &marker)
                    .map(|response| response.map(|envelope| envelope.data).into_page())
            } else {
                self.transport
                    .get::<Vec<Product>>(Command::GetProducts, &params, &marker)
                    .map(ApiResponse::into_page)
            }
        })?;

        if include_extended {
            self.fill_weight_unit(&mut products, &marker)?;
            self.fill_brand_names(&mut products, &marker)?;
        }
        Ok(products)
    }

    /// Pushes inventory updates, one paced PUT per entry.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::RetriesExhausted`] when an update fails
    /// past the retry ceiling.
    pub fn update_products(&self, updates: &[ProductUpdate]) -> Result<(), CollectError> {
        let marker = Marker::new();
        let mode = self.auth_mode();

        for update in updates {
            let endpoint = match update.variant_id {
                Some(variant_id) => variant_update_endpoint(update.id, variant_id),
                None => product_update_endpoint(update.id, mode),
            };
            let url = format!("{}{endpoint}", self.transport.url_for(Command::UpdateProduct));
            let ctx = RetryContext::new(marker.clone(), &url);

            let limits = self.collector.retry_policy().execute(
                &ctx,
                || {
                    self.transport
                        .put(Command::UpdateProduct, &endpoint, &update.body(), &marker)
                },
                |_, _| {},
            )?;
            self.collector.delay_scheduler().wait(limits);
        }
        Ok(())
    }

    fn fill_weight_unit(
        &self,
        products: &mut [Product],
        marker: &Marker,
    ) -> Result<(), CollectError> {
        let url = self.transport.url_for(Command::GetStore);
        let ctx = RetryContext::new(marker.clone(), &url);

        let response = self.collector.retry_policy().execute(
            &ctx,
            || self.transport.get::<Store>(Command::GetStore, "", marker),
            |_, _| {},
        )?;

        if let Some(store) = response.body {
            for product in products.iter_mut() {
                product.weight_unit = Some(store.weight_units.clone());
            }
        }
        self.collector.delay_scheduler().wait(response.limits);
        Ok(())
    }

    fn fill_brand_names(
        &self,
        products: &mut [Product],
        marker: &Marker,
    ) -> Result<(), CollectError> {
        let url = self.transport.url_for(Command::GetBrands);
        let enveloped = Command::GetBrands.enveloped(self.auth_mode());

        let brands = self.collector.collect(marker, &url, |page| {
            let params = page_params(page);
            if enveloped {
                self.transport
                    .get::<Envelope<Brand>>(Command::GetBrands, &params, marker)
                    .map(|response| response.map(|envelope| envelope.data).into_page())
            } else {
                self.transport
                    .get::<Vec<Brand>>(Command::GetBrands, &params, marker)
                    .map(ApiResponse::into_page)
            }
        })?;

        let names: HashMap<i64, String> = brands
            .into_iter()
            .map(|brand| (brand.id, brand.name))
            .collect();
        for product in products.iter_mut() {
            product.brand_name = product.brand_id.and_then(|id| names.get(&id).cloned());
        }
        Ok(())
    }
}

/// Blocking twin of [`crate::services::CategoriesService`].
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
    /// the retry ceiling.
    pub fn get_categories(&self) -> Result<Vec<Category>, CollectError> {
        let marker = Marker::new();
        let url = self.transport.url_for(Command::GetCategories);
        let enveloped = Command::GetCategories.enveloped(self.transport.config().auth_mode());

        self.collector.collect(&marker, &url, |page| {
            let params = page_params(page);
            if enveloped {
                self.transport
                    .get::<Envelope<Category>>(Command::GetCategories, &params, &marker)
                    .map(|response| response.map(|envelope| envelope.data).into_page())
            } else {
                self.transport
                    .get::<Vec<Category>>(Command::GetCategories, &params, &marker)
                    .map(ApiResponse::into_page)
            }
        })
    }
}
