pub mod aggregate;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod product_count;
pub mod product_service;
pub mod state;
pub mod ui;

pub use app::router;
pub use config::AppConfig;
pub use dashboard::{AutoUpdate, TimeDashboard};
pub use product_count::ProductCount;
pub use product_service::{ProductService, ProductSource};
pub use state::AppState;
