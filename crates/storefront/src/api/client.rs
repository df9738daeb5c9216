//! Catalog client implementation.
//!
//! Thin `reqwest` wrapper over the ordering backend's REST endpoints.
//! Owns no state beyond the category cache.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use cantina_core::{Category, Order, Product, ProductId, UserId};

use crate::config::BackendConfig;

use super::types::{ApiCategory, ApiOrder, ApiProduct, ApiUser, LoginRequest, OrderCreate, RegisterRequest};
use super::{ApiError, body_snippet, conversions};

/// How long category reads may be served from memory.
const CATEGORY_CACHE_TTL: Duration = Duration::from_secs(300); // 5 minutes

const CATEGORY_CACHE_KEY: &str = "categories";

/// Client for the ordering backend's REST API.
///
/// Categories are cached for 5 minutes. Products are NEVER cached: every
/// cart render and every checkout revalidates quantities against stock, so
/// product reads must observe the backend's live state.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    base_url: String,
    categories: Cache<&'static str, Arc<Vec<Category>>>,
}

impl CatalogClient {
    /// Create a new backend API client.
    #[must_use]
    pub fn new(config: &BackendConfig) -> Self {
        let categories = Cache::builder()
            .max_capacity(1)
            .time_to_live(CATEGORY_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                base_url: config.base_url.as_str().trim_end_matches('/').to_owned(),
                categories,
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

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// Get all categories (cached).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_categories(&self) -> Result<Arc<Vec<Category>>, ApiError> {
        if let Some(categories) = self.inner.categories.get(CATEGORY_CACHE_KEY).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let raw: Vec<ApiCategory> = self
            .execute(self.inner.client.get(self.url("/api/categorias")))
            .await?;

        let categories = Arc::new(
            raw.into_iter()
                .map(conversions::convert_category)
                .collect::<Vec<_>>(),
        );

        self.inner
            .categories
            .insert(CATEGORY_CACHE_KEY, Arc::clone(&categories))
            .await;

        Ok(categories)
    }

    /// Get the full product list - always fresh, never cached.
    ///
    /// Every caller that makes stock decisions (cart rendering, checkout)
    /// goes through here, so the returned list is a live snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self) -> Result<Vec<Product>, ApiError> {
        let raw: Vec<ApiProduct> = self
            .execute(self.inner.client.get(self.url("/api/productos")))
            .await?;

        Ok(raw.into_iter().map(conversions::convert_product).collect())
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product, ApiError> {
        let raw: ApiProduct = self
            .execute(
                self.inner
                    .client
                    .get(self.url(&format!("/api/productos/{product_id}"))),
            )
            .await?;

        Ok(conversions::convert_product(raw))
    }

    // =========================================================================
    // Order Methods (never cached - mutable state)
    // =========================================================================

    /// Get the orders placed by one user.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or an order is malformed.
    #[instrument(skip(self), fields(user_id = %user_id))]
    pub async fn get_orders_by_user(&self, user_id: UserId) -> Result<Vec<Order>, ApiError> {
        let raw: Vec<ApiOrder> = self
            .execute(
                self.inner
                    .client
                    .get(self.url(&format!("/api/pedidos/usuario/{user_id}"))),
            )
            .await?;

        raw.into_iter().map(conversions::convert_order).collect()
    }

    /// Submit one order-creation request.
    ///
    /// The response body is not interpreted: success is the status code.
    /// There is exactly one submission per checkout and no retry.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the backend rejects it.
    #[instrument(skip(self, order), fields(user_id = order.usuario_id))]
    pub async fn create_order(&self, order: &OrderCreate) -> Result<(), ApiError> {
        self.execute_raw(self.inner.client.post(self.url("/api/pedidos")).json(order))
            .await?;
        Ok(())
    }

    // =========================================================================
    // User Methods
    // =========================================================================

    /// Authenticate a user against the backend.
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

    /// Register a new user.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend rejects the signup or the request fails.
    #[instrument(skip(self, request), fields(email = %request.email))]
    pub async fn register(&self, request: &RegisterRequest) -> Result<ApiUser, ApiError> {
        self.execute(
            self.inner
                .client
                .post(self.url("/api/usuarios/registro"))
                .json(request),
        )
        .await
    }
}
