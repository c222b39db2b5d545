use crate::aggregate::CategoryCounts;
use crate::dashboard::AutoUpdate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A product record as served by the listing API.
///
/// Only `category` and `brand` are interpreted; every other field is kept
/// as-is in `extra`. A missing or `null` category or brand reads as empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Product {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub brand: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Product {
    pub fn new(category: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            category: category.into(),
            brand: brand.into(),
            extra: Map::new(),
        }
    }

    pub fn title(&self) -> Option<&str> {
        self.extra.get("title").and_then(Value::as_str)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Response body of the listing endpoint: `{ "products": [...] }`.
#[derive(Debug, Deserialize)]
pub struct ProductsEnvelope {
    pub products: Vec<Product>,
}

/// Everything the dashboard displays at one instant.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DashboardSnapshot {
    pub current_time: String,
    pub products: Vec<Product>,
    pub category_counts: CategoryCounts,
    pub apple_products: Vec<Product>,
    pub refreshed_at: Option<String>,
    pub revision: u64,
}

impl DashboardSnapshot {
    pub fn total_products(&self) -> usize {
        self.products.len()
    }
}

#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub current_time: String,
    pub total_products: usize,
    pub category_counts: CategoryCounts,
    pub apple_products: Vec<Product>,
    pub refreshed_at: Option<String>,
    pub revision: u64,
    pub auto_update: AutoUpdate,
}

#[derive(Debug, Serialize)]
pub struct AutoUpdateResponse {
    pub auto_update: AutoUpdate,
    pub timer_running: bool,
}

#[derive(Debug, Serialize)]
pub struct ProductCountResponse {
    pub total_products: usize,
    pub loaded: bool,
}
