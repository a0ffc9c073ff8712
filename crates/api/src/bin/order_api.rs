//! Order service entry point.

use std::sync::Arc;

use api::config::Config;
use api::routes::orders::OrderAppState;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use workflow::{HttpCatalogGateway, HttpPaymentGateway, OrderWorkflow};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let metrics_handle = metrics_exporter_prometheus::PrometheusBuilder::new()
        .install_recorder()
        .expect("failed to install Prometheus recorder");

    let config = Config::from_env(8080);
    let client = reqwest::Client::new();
    let catalog = HttpCatalogGateway::new(client.clone(), config.catalog_url.clone());
    let payment = HttpPaymentGateway::new(client, config.payment_url.clone());

    let state = Arc::new(OrderAppState {
        workflow: OrderWorkflow::new(catalog, payment),
    });
    let app = api::create_order_app(state, metrics_handle);

    api::serve(app, &config.addr()).await;
}
