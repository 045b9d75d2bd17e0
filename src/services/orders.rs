//! Order export.

use crate::clients::{
    concat_params, orders_date_params, page_params, ApiResponse, Command, WebRequestService,
};
use crate::config::BigCommerceConfig;
use crate::engine::{CancellationToken, CollectError, Marker, PageCollector, RetryContext};
use crate::models::{Order, OrderProduct, ShippingAddress};
use crate::throttling::RateLimits;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Fetches orders in a date range, with their line items and shipping
/// addresses resolved.
///
/// The order pages themselves are collected sequentially through the
/// shared engine; the per-order sub-resource fetches fan out in bounded
/// batches, narrowing to one at a time while the store reports a
/// constrained quota.
#[derive(Debug)]
pub struct OrdersService {
    transport: Arc<WebRequestService>,
    collector: PageCollector,
    fanout_limit: usize,
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
        let fanout_limit = transport.config().fanout_limit().max(1);
        Self {
            transport,
            collector,
            fanout_limit,
        }
    }

    /// Fetches every order created or modified inside `[from, to]`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectError::RetriesExhausted`] when a page or
    /// sub-resource call fails past the retry ceiling, or
    /// [`CollectError::Cancelled`] when the token fires.
    pub async fn get_orders(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        cancel: &CancellationToken,
    ) -> Result<Vec<Order>, CollectError> {
        let marker = Marker::new();
        let date_params = orders_date_params(from, to);
        let url = self.transport.url_for(Command::GetOrders);
        let transport = &*self.transport;
        let marker_ref = &marker;

        let mut orders = self
            .collector
            .collect_async(&marker, &url, cancel, |page| {
                let params = concat_params(&date_params, &page_params(page));
                async move {
                    transport
                        .get::<Vec<Order>>(Command::GetOrders, &params, marker_ref)
                        .await
                        .map(ApiResponse::into_page)
                }
            })
            .await?;

        self.fill_order_details(&mut orders, &marker, cancel)
            .await?;

        tracing::info!(
            marker = %marker,
            count = orders.len(),
            category = "orders",
            "orders export finished"
        );
        Ok(orders)
    }

    /// Resolves line items and shipping addresses for each order, in
    /// bounded concurrent batches.
    async fn fill_order_details(
        &self,
        orders: &mut [Order],
        marker: &Marker,
        cancel: &CancellationToken,
    ) -> Result<(), CollectError> {
        let thresholds = self.transport.config().thresholds();
        let mut width = self.fanout_limit;
        let mut start = 0;

        while start < orders.len() {
            let end = (start + width).min(orders.len());
            let batch = &mut orders[start..end];
            let outcomes =
                futures::future::join_all(batch.iter_mut().map(|order| async move {
                    self.fill_one_order(order, marker, cancel).await
                }))
                .await;

            let mut limits = RateLimits::unknown();
            for outcome in outcomes {
                limits = outcome?;
            }

            self.collector
                .delay_scheduler()
                .wait_async(limits, cancel)
                .await?;

            // Narrow to a single in-flight call while the quota is tight.
            width = if limits.is_unlimited(thresholds) {
                self.fanout_limit
            } else {
                1
            };
            start = end;
        }
        Ok(())
    }

    async fn fill_one_order(
        &self,
        order: &mut Order,
        marker: &Marker,
        cancel: &CancellationToken,
    ) -> Result<RateLimits, CollectError> {
        let mut limits = RateLimits::unknown();

        if let Some(link) = order.products_link.clone() {
            let url = self.transport.resolve_url(&link.url);
            let response = self
                .get_with_retry::<Vec<OrderProduct>>(&url, marker, cancel)
                .await?;
            order.products = response.body.unwrap_or_default();
            limits = response.limits;
        }

        if let Some(link) = order.shipping_addresses_link.clone() {
            let url = self.transport.resolve_url(&link.url);
            let response = self
                .get_with_retry::<Vec<ShippingAddress>>(&url, marker, cancel)
                .await?;
            order.addresses = response.body.unwrap_or_default();
            limits = response.limits;
        }

        Ok(limits)
    }

    async fn get_with_retry<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        marker: &Marker,
        cancel: &CancellationToken,
    ) -> Result<ApiResponse<T>, CollectError> {
        let ctx = RetryContext::new(marker.clone(), url);
        let response = self
            .collector
            .retry_policy()
            .execute_async(
                &ctx,
                cancel,
                || self.transport.get_url::<T>(url, marker),
                |_, _| {},
            )
            .await?;
        Ok(response)
    }
}
