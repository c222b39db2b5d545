use product_dashboard::{AppConfig, AppState, ProductCount, ProductService, TimeDashboard, router};
use std::{net::SocketAddr, sync::Arc};
use tracing::{error, info};
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let config = AppConfig::from_env()?;
    let service = ProductService::new(config.products_url.clone(), config.request_timeout)?;
    info!(
        url = %service.url(),
        interval_secs = config.refresh_interval.as_secs(),
        "product source configured"
    );

    let dashboard = Arc::new(TimeDashboard::new(service.clone(), config.refresh_interval));
    dashboard.start();

    let product_count = Arc::new(ProductCount::default());
    tokio::spawn({
        let product_count = Arc::clone(&product_count);
        async move { product_count.init(&service).await }
    });

    let app = router(AppState::new(Arc::clone(&dashboard), product_count));

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    dashboard.shutdown();
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        error!("failed to listen for shutdown signal: {err}");
        std::future::pending::<()>().await;
    }
    info!("shutting down");
}
