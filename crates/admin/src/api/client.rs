//! Admin client implementation.
//!
//! Thin `reqwest` wrapper over the ordering backend's management endpoints.
//! Stateless and uncached: the admin panel always shows live data.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::instrument;

use cantina_core::{Category, CategoryId, Order, OrderId, OrderStatus, Product, ProductId};

use crate::config::BackendConfig;

use super::types::{
    ApiCategory, ApiOrder, ApiProduct, ApiUser, CategoryPayload, LoginRequest, ProductPayload,
    StatusUpdate,
};
use super::{ApiError, body_snippet, conversions};

/// Client for the ordering backend's management REST API.
#[derive(Clone)]
pub struct AdminClient {
    inner: Arc<AdminClientInner>,
}

struct AdminClientInner {
    client: reqwest::Client,
    base_url: String,
}

impl AdminClient {
    /// Create a new backend API client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        Self {
            inner: Arc::new(AdminClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
            }),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Send a request and parse the JSON body.
    async fn execute<T: DeserializeOwned>(
        &self,
        builder: reqwest::RequestBuilder,
    ) -> Result<T, ApiError> {
        let body = self.execute_raw(builder).await?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::error!(
                error = %e,
                body = %body_snippet(&body),
                "Failed to parse backend response"
            );
            ApiError::Parse(e)
        })
    }

    /// Send a request, check the status, and return the raw body.
    async fn execute_raw(&self, builder: reqwest::RequestBuilder) -> Result<String, ApiError> {
        let response = builder.send().await?;
        let status = response.status();

        // Get response body as text first for better error diagnostics
        let body = response.text().await?;

        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(body_snippet(&body)));
        }

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %body_snippet(&body),
                "Backend returned non-success status"
            );
            return Err(ApiError::Status {
                status: status.as_u16(),
                message: body_snippet(&body),
            });
        }

        Ok(body)
    }

    /// Send a mutation whose response body is not interpreted.
    async fn execute_no_content(&self, builder: reqwest::RequestBuilder) -> Result<(), ApiError> {
        self.execute_raw(builder).await?;
        Ok(())
    }

    // =========================================================================
    // Category Methods
    // =========================================================================

    /// Get all categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Vec<Category>, ApiError> {
        let raw: Vec<ApiCategory> = self
            .execute(self.inner.client.get(self.url("/api/categorias")))
            .await?;

        Ok(raw.into_iter().map(conversions::convert_category).collect())
    }

    /// Create a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the payload or the request fails.
    #[instrument(skip(self, payload), fields(nombre = %payload.nombre))]
    pub async fn create_category(&self, payload: &CategoryPayload) -> Result<(), ApiError> {
        self.execute_no_content(
            self.inner
                .client
                .post(self.url("/api/categorias"))
                .json(payload),
        )
        .await
    }

    /// Update a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found or the request fails.
    #[instrument(skip(self, payload), fields(category_id = %category_id))]
    pub async fn update_category(
        &self,
        category_id: CategoryId,
        payload: &CategoryPayload,
    ) -> Result<(), ApiError> {
        self.execute_no_content(
            self.inner
                .client
                .put(self.url(&format!("/api/categorias/{category_id}")))
                .json(payload),
        )
        .await
    }

    /// Delete a category.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found or the request fails.
    #[instrument(skip(self), fields(category_id = %category_id))]
    pub async fn delete_category(&self, category_id: CategoryId) -> Result<(), ApiError> {
        self.execute_no_content(
            self.inner
                .client
                .delete(self.url(&format!("/api/categorias/{category_id}"))),
        )
        .await
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get all products.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        let raw: Vec<ApiProduct> = self
            .execute(self.inner.client.get(self.url("/api/productos")))
            .await?;

        Ok(raw.into_iter().map(conversions::convert_product).collect())
    }

    /// Create a product (active by default on the backend).
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the payload or the request fails.
    #[instrument(skip(self, payload), fields(nombre = %payload.nombre))]
    pub async fn create_product(&self, payload: &ProductPayload) -> Result<(), ApiError> {
        self.execute_no_content(
            self.inner
                .client
                .post(self.url("/api/productos"))
                .json(payload),
        )
        .await
    }

    /// Update a product's data (not its active flag).
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self, payload), fields(product_id = %product_id))]
    pub async fn update_product(
        &self,
        product_id: ProductId,
        payload: &ProductPayload,
    ) -> Result<(), ApiError> {
        self.execute_no_content(
            self.inner
                .client
                .put(self.url(&format!("/api/productos/{product_id}")))
                .json(payload),
        )
        .await
    }

    /// Toggle a product's active flag via the dedicated endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn toggle_product_status(&self, product_id: ProductId) -> Result<(), ApiError> {
        self.execute_no_content(
            self.inner
                .client
                .patch(self.url(&format!("/api/productos/{product_id}/estado"))),
        )
        .await
    }

    /// Delete a product.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn delete_product(&self, product_id: ProductId) -> Result<(), ApiError> {
        self.execute_no_content(
            self.inner
                .client
                .delete(self.url(&format!("/api/productos/{product_id}"))),
        )
        .await
    }

    // =========================================================================
    // Order Methods
    // =========================================================================

    /// Get every order in the system.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an order is malformed.
    #[instrument(skip(self))]
    pub async fn get_orders(&self) -> Result<Vec<Order>, ApiError> {
        let raw: Vec<ApiOrder> = self
            .execute(self.inner.client.get(self.url("/api/pedidos")))
            .await?;

        raw.into_iter().map(conversions::convert_order).collect()
    }

    /// Transition an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self), fields(order_id = %order_id, status = %status))]
    pub async fn update_order_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), ApiError> {
        self.execute_no_content(
            self.inner
                .client
                .patch(self.url(&format!("/api/pedidos/{order_id}/estado")))
                .json(&StatusUpdate { estado: status }),
        )
        .await
    }

    /// Cancel an order through the dedicated cancel endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the order is not found or the request fails.
    #[instrument(skip(self), fields(order_id = %order_id))]
    pub async fn cancel_order(&self, order_id: OrderId) -> Result<(), ApiError> {
        self.execute_no_content(
            self.inner
                .client
                .patch(self.url(&format!("/api/pedidos/{order_id}/cancelar"))),
        )
        .await
    }

    // =========================================================================
    // User Methods
    // =========================================================================

    /// Authenticate a user against the backend.
    ///
    /// Role checks happen in the caller; this just verifies credentials.
    ///
    /// # Errors
    ///
    /// Returns an error if the credentials are rejected or the request fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn login(&self, request: &LoginRequest) -> Result<ApiUser, ApiError> {
        self.execute(
            self.inner
                .client
                .post(self.url("/api/usuarios/login"))
                .json(request),
        )
        .await
    }
}
