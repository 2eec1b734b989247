use std::sync::Arc;

use anyhow::Context;
use log::info;
use tokio::net::TcpListener;
use tokio::signal;

use caredesk::api::{self, AppState};
use caredesk::config::ServiceConfig;
use caredesk::predictor::WeightedScoreModel;
use caredesk::store::PatientStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Setup logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = ServiceConfig::from_env()?;
    info!("Patient store file: {}", config.data_path.display());

    // The classifier artifact is loaded once; request tasks share the handle
    // read-only. A bad artifact fails startup, not the first prediction.
    let model = WeightedScoreModel::load(&config.model_path).with_context(|| {
        format!(
            "failed to load premium model from {}",
            config.model_path.display()
        )
    })?;

    let state = Arc::new(AppState {
        store: PatientStore::new(config.data_path),
        model: Arc::new(model),
    });

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.bind_addr))?;
    info!("caredesk listening on http://{}", config.bind_addr);

    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    Ok(())
}

async fn shutdown_signal() {
    let _ = signal::ctrl_c().await;
}
