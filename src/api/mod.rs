//! Backend collaborators.
//!
//! The listing store only sees [`ProductCatalog`]; the HTTP implementation
//! lives in [`http`]. Credentials are injected through [`CredentialProvider`]
//! when a client is built, so every request carries the same session token
//! without a process-wide lookup.

mod http;

pub use http::HttpCatalog;

use async_trait::async_trait;

use crate::domain::aggregates::{ProductPage, ProductSummary};
use crate::Result;

#[async_trait]
pub trait ProductCatalog: Send + Sync {
    /// `GET /products?{query}`. `query` is already encoded.
    async fn list_products(&self, query: &str) -> Result<ProductPage>;

    /// `GET /products/{id}`.
    async fn get_product(&self, id: &str) -> Result<ProductSummary>;
}

pub trait CredentialProvider: Send + Sync {
    fn bearer_token(&self) -> Option<String>;
}

#[derive(Clone, Debug)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self { Self(token.into()) }
}

impl CredentialProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> { Some(self.0.clone()) }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoCredentials;

impl CredentialProvider for NoCredentials {
    fn bearer_token(&self) -> Option<String> { None }
}
