use crate::product_service::ProductSource;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{info, warn};

/// Total number of products, fetched once when the page starts.
#[derive(Debug, Default)]
pub struct ProductCount {
    total: AtomicUsize,
    loaded: AtomicBool,
}

impl ProductCount {
    pub async fn init<S: ProductSource>(&self, source: &S) {
        match source.fetch_products().await {
            Ok(products) => {
                self.total.store(products.len(), Ordering::SeqCst);
                self.loaded.store(true, Ordering::SeqCst);
                info!(total = products.len(), "product count loaded");
            }
            Err(err) => warn!("failed to load product count: {err}"),
        }
    }

    pub fn total(&self) -> usize {
        self.total.load(Ordering::SeqCst)
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Product;
    use crate::product_service::FetchError;

    struct Fixed(Result<Vec<Product>, u16>);

    impl ProductSource for Fixed {
        async fn fetch_products(&self) -> Result<Vec<Product>, FetchError> {
            self.0.clone().map_err(|status| FetchError::Status { status })
        }
    }

    #[tokio::test]
    async fn counts_fetched_products() {
        let count = ProductCount::default();
        let source = Fixed(Ok(vec![Product::new("Phone", "Apple"), Product::new("Laptop", "Dell")]));

        count.init(&source).await;
        assert_eq!(count.total(), 2);
        assert!(count.is_loaded());
    }

    #[tokio::test]
    async fn empty_listing_counts_zero() {
        let count = ProductCount::default();
        count.init(&Fixed(Ok(Vec::new()))).await;
        assert_eq!(count.total(), 0);
        assert!(count.is_loaded());
    }

    #[tokio::test]
    async fn failed_fetch_leaves_zero() {
        let count = ProductCount::default();
        count.init(&Fixed(Err(500))).await;
        assert_eq!(count.total(), 0);
        assert!(!count.is_loaded());
    }
}
