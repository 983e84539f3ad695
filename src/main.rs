use std::sync::Arc;

use anyhow::{anyhow, Result};
use tokio::signal;
use tracing::{error, info};

use churnline::api::{self, AppState};
use churnline::common::{log, AppCfg};
use churnline::model::{FsModelRepo, ModelHandle};
use churnline::PredictionService;

#[tokio::main]
async fn main() -> Result<()> {
    let cfg = AppCfg::load()?;
    log::init(&cfg).map_err(|err| anyhow!(err))?;

    let repo = FsModelRepo::new(&cfg);
    let model: Option<ModelHandle> = match repo.load() {
        Ok(model) => Some(Arc::new(model)),
        Err(err) => {
            error!(
                path = %repo.path().display(),
                error = %err,
                "classifier unavailable, prediction endpoints will answer 500"
            );
            None
        }
    };

    let state = AppState::new(PredictionService::new(model));
    let app = api::router(state, cfg.cors_enabled);

    let listener = tokio::net::TcpListener::bind(cfg.bind_addr).await?;
    info!(addr = %cfg.bind_addr, cors = cfg.cors_enabled, "churnline listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = signal::ctrl_c().await;
            info!("shutdown signal received");
        })
        .await?;

    info!("churnline stopped");
    Ok(())
}
