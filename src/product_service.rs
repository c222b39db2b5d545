use crate::models::{Product, ProductsEnvelope};
use reqwest::{Client, Url};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("product request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("product endpoint returned status {status}")]
    Status { status: u16 },
    #[error("unexpected product payload: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Anything that can hand out the current product list.
pub trait ProductSource: Send + Sync + 'static {
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, FetchError>> + Send;
}

/// HTTP client for the product listing endpoint.
#[derive(Debug, Clone)]
pub struct ProductService {
    client: Client,
    url: Url,
}

impl ProductService {
    pub fn new(url: Url, timeout: Duration) -> Result<Self, FetchError> {
        let client = Client::builder()
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self { client, url })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

impl ProductSource for ProductService {
    async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
        let response = self.client.get(self.url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
            });
        }

        let body = response.bytes().await?;
        parse_products(&body)
    }
}

pub fn parse_products(body: &[u8]) -> Result<Vec<Product>, FetchError> {
    let envelope: ProductsEnvelope = serde_json::from_slice(body)?;
    Ok(envelope.products)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_envelope_and_keeps_extra_fields() {
        let body = br#"{
            "products": [
                {"id": 1, "title": "iPhone 9", "category": "smartphones", "brand": "Apple", "price": 549},
                {"id": 2, "title": "Apple sauce", "category": "groceries"}
            ],
            "total": 2, "skip": 0, "limit": 30
        }"#;

        let products = parse_products(body).unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].brand, "Apple");
        assert_eq!(products[0].title(), Some("iPhone 9"));
        assert_eq!(products[0].extra["price"], 549);
        assert_eq!(products[1].category, "groceries");
        assert_eq!(products[1].brand, "");
    }

    #[test]
    fn null_brand_or_category_reads_as_empty() {
        let body = br#"{
            "products": [
                {"category": "Phone", "brand": "Apple"},
                {"category": "groceries", "brand": null},
                {"category": null, "brand": "Apple"}
            ]
        }"#;

        let products = parse_products(body).unwrap();
        assert_eq!(products.len(), 3);
        assert_eq!(products[1].brand, "");
        assert_eq!(products[2].category, "");
        assert!(!products[1].extra.contains_key("brand"));
        assert_eq!(crate::aggregate::apple_products(&products).len(), 2);
    }

    #[test]
    fn rejects_bare_array() {
        let body = br#"[{"category": "Phone", "brand": "Apple"}]"#;
        assert!(matches!(parse_products(body), Err(FetchError::Decode(_))));
    }

    #[test]
    fn rejects_non_json() {
        assert!(matches!(parse_products(b"<html>"), Err(FetchError::Decode(_))));
    }
}
