use mimalloc::MiMalloc;
use shelter_bot::api::{build_http_client, dog_api::DogApi, slack_api::SlackApi};
use shelter_bot::config::Config;
use shelter_bot::db::DogStorage;
use shelter_bot::router::{ShelterState, shelter_router};
use shelter_bot::service::{dispatcher::Dispatcher, pipeline};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cfg = Config::load()?;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(cfg.loglevel.clone()));
    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_level(true)
                .with_target(false),
        )
        .init();

    info!(
        database_url = %cfg.database_url,
        dog_api_url = %cfg.dog_api_url,
        proxy = %cfg.proxy.as_ref().map(|u| u.as_str()).unwrap_or("<none>"),
        listen_addr = %cfg.listen_addr,
        dispatch_concurrency = cfg.dispatch_concurrency,
        admin_routes = cfg.admin_key.is_some(),
        verify_slack_token = cfg.slack_verification_token.is_some()
    );

    let storage = DogStorage::connect(&cfg.shelter())
        .await
        .inspect_err(|e| error!(error = %e, "could not connect to the shelter database"))?;

    let http = build_http_client(cfg.proxy.as_ref())?;
    let images = Arc::new(DogApi::new(http.clone(), cfg.dog_api_url.clone()));
    let sink = Arc::new(SlackApi::new(
        http,
        &cfg.slack_api_url,
        cfg.slack_access_token.as_str(),
    )?);
    let dispatcher = Dispatcher::new(storage.clone(), images, sink);

    let (events_tx, events_rx) = mpsc::channel(cfg.event_queue_capacity.max(1));
    let pipeline = pipeline::spawn(dispatcher, events_rx, cfg.dispatch_concurrency);

    let state = ShelterState::new(
        events_tx,
        storage.clone(),
        cfg.slack_verification_token.clone(),
        cfg.admin_key.clone(),
    );
    let app = shelter_router(state);

    let listener = TcpListener::bind(&cfg.listen_addr).await?;
    info!("HTTP server listening on {}", cfg.listen_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The router held the last event sender; the pipeline finishes what is queued.
    if let Err(e) = pipeline.await {
        warn!(error = %e, "dispatch pipeline ended abnormally");
    }
    storage.close().await;
    info!("Shelter closed");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "failed to listen for ctrl-c");
        std::future::pending::<()>().await;
    }
    info!("Shutdown requested");
}
