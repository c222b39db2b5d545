use crate::dashboard::TimeDashboard;
use crate::product_count::ProductCount;
use crate::product_service::ProductService;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub dashboard: Arc<TimeDashboard<ProductService>>,
    pub product_count: Arc<ProductCount>,
}

impl AppState {
    pub fn new(dashboard: Arc<TimeDashboard<ProductService>>, product_count: Arc<ProductCount>) -> Self {
        Self {
            dashboard,
            product_count,
        }
    }
}
