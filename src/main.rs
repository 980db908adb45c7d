use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::routing::{get, post};
use axum::Router;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use concierge::config::AppConfig;
use concierge::db;
use concierge::handlers;
use concierge::services::directory::rest::RestBusinessDirectory;
use concierge::services::fulfillment;
use concierge::services::messaging::twilio::TwilioSmsProvider;
use concierge::services::queue::sqs::SqsQueue;
use concierge::services::search::elastic::ElasticsearchIndex;
use concierge::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = AppConfig::from_env();
    anyhow::ensure!(!config.queue_url.is_empty(), "QUEUE_URL must be set");

    let conn = db::init_db(&config.database_url)?;

    let queue = SqsQueue::new(config.queue_url.clone());
    let index = ElasticsearchIndex::new(config.search_url.clone(), config.search_index.clone());
    let directory =
        RestBusinessDirectory::new(config.directory_url.clone(), config.directory_token.clone());
    let messaging = TwilioSmsProvider::new(
        config.twilio_account_sid.clone(),
        config.twilio_auth_token.clone(),
        config.twilio_phone_number.clone(),
        config.sms_country_prefix.clone(),
    );

    let state = Arc::new(AppState {
        db: Arc::new(Mutex::new(conn)),
        config: config.clone(),
        queue: Box::new(queue),
        index: Box::new(index),
        directory: Box::new(directory),
        messaging: Box::new(messaging),
    });

    // Fulfillment runs on a timer, independent of the dialog endpoint; the
    // two halves communicate only through the queue.
    let worker_state = Arc::clone(&state);
    tokio::spawn(async move {
        let mut ticker =
            tokio::time::interval(Duration::from_secs(worker_state.config.poll_interval_secs));
        loop {
            ticker.tick().await;
            match fulfillment::drain_queue(&worker_state).await {
                Ok(0) => {}
                Ok(n) => tracing::info!(drained = n, "fulfillment batch complete"),
                Err(e) => tracing::error!(error = %e, "fulfillment batch failed"),
            }
        }
    });

    let app = Router::new()
        .route("/health", get(handlers::health::health))
        .route("/dialog", post(handlers::dialog::dialog_turn))
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = format!("0.0.0.0:{}", config.port);
    tracing::info!("starting server on {addr}");

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
