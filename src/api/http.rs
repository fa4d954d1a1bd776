use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use url::Url;

use super::{CredentialProvider, ProductCatalog};
use crate::config::StorefrontConfig;
use crate::domain::aggregates::{ProductPage, ProductSummary};
use crate::{Result, StorefrontError};

/// [`ProductCatalog`] over the storefront REST API.
#[derive(Clone)]
pub struct HttpCatalog {
    client: reqwest::Client,
    base_url: Url,
    credentials: Arc<dyn CredentialProvider>,
}

impl HttpCatalog {
    pub fn new(base_url: &str, credentials: Arc<dyn CredentialProvider>, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| StorefrontError::Config(format!("api url {base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(StorefrontError::Config(format!("api url {base_url} cannot be a base")));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client, base_url, credentials })
    }

    pub fn from_config(config: &StorefrontConfig) -> Result<Self> {
        Self::new(&config.api_url, config.credentials(), config.timeout())
    }

    pub fn base_url(&self) -> &Url { &self.base_url }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        match self.credentials.bearer_token() {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T> {
        debug!(%url, "GET");
        let response = self.authorized(self.client.get(url.clone())).send().await?;
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(StorefrontError::NotFound(url.path().to_string()));
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(%url, status = status.as_u16(), "storefront API request failed");
            return Err(StorefrontError::Api { status: status.as_u16(), message });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[async_trait]
impl ProductCatalog for HttpCatalog {
    async fn list_products(&self, query: &str) -> Result<ProductPage> {
        let mut url = self.endpoint(&["products"]);
        if !query.is_empty() {
            url.set_query(Some(query));
        }
        self.get_json(url).await
    }

    async fn get_product(&self, id: &str) -> Result<ProductSummary> {
        self.get_json(self.endpoint(&["products", id])).await
    }
}
