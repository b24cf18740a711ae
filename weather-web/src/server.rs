use anyhow::Context;
use axum::{
    Form, Json, Router,
    extract::{State, rejection::FormRejection},
    routing::{get, post},
};
use serde::Serialize;
use tower_http::trace::TraceLayer;
use tracing::{debug, info, warn};
use weather_core::{Config, LookupRequest, WeatherLookupService};

use crate::view::Page;

#[derive(Debug, Clone)]
pub struct AppState {
    pub service: WeatherLookupService,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/weather", post(get_weather))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind the configured address and serve until Ctrl-C or SIGTERM.
pub async fn serve(config: Config) -> anyhow::Result<()> {
    let service = WeatherLookupService::from_config(&config.upstream)?;
    let app = build_app(AppState { service });

    let addr = config.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server terminated with an error")?;
    Ok(())
}

async fn index() -> Page {
    Page::Blank
}

/// Reads the first `city` field. A body that can't be decoded as a form
/// counts as a missing city.
async fn get_weather(
    State(state): State<AppState>,
    form: Result<Form<Vec<(String, String)>>, FormRejection>,
) -> Page {
    let request = match form {
        Ok(Form(fields)) => LookupRequest::from_fields(fields),
        Err(rejection) => {
            debug!(%rejection, "unreadable form submission");
            LookupRequest::default()
        }
    };
    state.service.lookup(request.city()).await.into()
}

async fn health() -> Json<HealthData> {
    Json(HealthData { status: "ok" })
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("received shutdown signal, starting graceful shutdown");
}
