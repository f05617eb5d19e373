use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use solar_harvest::{api, config::Config, model, predictor::Predictor, telemetry};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    telemetry::init_tracing();

    let cfg = Config::load()?;

    // Frozen artifacts, loaded once and shared read-only for the process
    // lifetime.
    let ghi_model = model::LinearGhiModel::load(&cfg.model.model_path)?;
    let feature_names = model::load_feature_names(&cfg.model.features_path)?;

    if ghi_model.coefficients.len() != feature_names.len() {
        anyhow::bail!(
            "model artifact mismatch: {} coefficients but {} feature names",
            ghi_model.coefficients.len(),
            feature_names.len()
        );
    }

    info!(
        model = %cfg.model.model_path,
        features = feature_names.len(),
        "model artifacts loaded"
    );

    let predictor = Predictor::new(Arc::new(ghi_model), feature_names);
    let state = api::AppState::new(Arc::new(predictor));

    let app: Router = api::router(state, &cfg);
    let addr = cfg.server.socket_addr()?;

    if cfg.server.host == "0.0.0.0" {
        warn!("Server binding to 0.0.0.0 - service will be accessible from the network");
    }

    info!(%addr, "starting solar harvest predictor");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(telemetry::shutdown_signal())
        .await?;

    warn!("shutdown complete");
    Ok(())
}
