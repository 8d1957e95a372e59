//! Studymate HTTP service entry point.
//!
//! # Purpose
//! Wires configuration, storage, and HTTP routers, then starts the main API
//! server and (optionally) the internal bootstrap server.
//!
//! # Notes
//! The `build_state` helper keeps wiring testable and minimizes main setup logic.
use std::future::Future;
use std::sync::Arc;
use studymate::app::{build_bootstrap_router, build_router, AppState};
use studymate::config::StudymateConfig;
use studymate::observability;
use studymate::store::memory::InMemoryStore;
use studymate::store::StudyStore;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = StudymateConfig::from_env_or_yaml()?;
    run_with_shutdown(config, async {
        let _ = tokio::signal::ctrl_c().await;
    })
    .await
}

async fn run_with_shutdown<F>(config: StudymateConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let metrics_handle = observability::init_observability("studymate");
    let state = build_state(&config);
    let backend_name = state.store.backend_name();
    let metrics_task = tokio::spawn(observability::serve_metrics(
        metrics_handle,
        config.metrics_bind,
    ));

    let app = build_router(state.clone());

    let bootstrap_task = if config.bootstrap.enabled {
        let bootstrap_addr = config.bootstrap.bind_addr;
        let bootstrap_app = build_bootstrap_router(state.clone());
        Some(tokio::spawn(async move {
            tracing::info!(%bootstrap_addr, "bootstrap listener starting");
            match tokio::net::TcpListener::bind(bootstrap_addr).await {
                Ok(listener) => {
                    let _ = axum::serve(listener, bootstrap_app.into_make_service()).await;
                }
                Err(err) => {
                    tracing::warn!(error = %err, "failed to bind bootstrap listener");
                }
            }
        }))
    } else {
        None
    };

    let addr = config.bind_addr;
    tracing::info!(%addr, backend = backend_name, "studymate listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tokio::pin!(shutdown);
    tokio::select! {
        result = axum::serve(listener, app.into_make_service()) => {
            result?;
        }
        _ = &mut shutdown => {}
    }

    metrics_task.abort();
    if let Some(task) = &bootstrap_task {
        task.abort();
    }
    let _ = metrics_task.await;
    if let Some(task) = bootstrap_task {
        let _ = task.await;
    }
    Ok(())
}

fn build_state(config: &StudymateConfig) -> AppState {
    let store: Arc<dyn StudyStore> = Arc::new(InMemoryStore::new());
    AppState {
        store,
        jwt_secret: config.jwt_secret.clone(),
        bootstrap_enabled: config.bootstrap.enabled,
        bootstrap_token: config.bootstrap.token.clone(),
    }
}
