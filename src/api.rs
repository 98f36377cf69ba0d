use std::sync::Arc;

use anyhow::{Error, Result};
use axum::{
    Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::{
    clients::{database::DatabaseClient, health::HealthChecker},
    config::Config,
    models::{campaign::CreateCampaignRequest, error::ApiError},
};

pub struct AppState {
    database: DatabaseClient,
    health_checker: HealthChecker,
}

pub fn build_router(database: DatabaseClient) -> Router {
    let state = Arc::new(AppState {
        health_checker: HealthChecker::new(database.clone()),
        database,
    });

    Router::new()
        .route("/health", get(health_check))
        .route("/campaigns", post(create_campaign))
        .route("/campaigns/{id}", get(get_campaign))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_api_server(config: Config, database: DatabaseClient) -> Result<(), Error> {
    let app = build_router(database);

    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = TcpListener::bind(&addr).await?;

    info!(address = %addr, "Campaign API server started");

    axum::serve(listener, app).await?;

    Ok(())
}

/// `GET /health` always answers 200; store reachability is reflected in the
/// body only.
async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.health_checker.check_mysql().await)
}

async fn create_campaign(
    State(state): State<Arc<AppState>>,
    Json(request): Json<CreateCampaignRequest>,
) -> Result<impl IntoResponse, ApiError> {
    // All validation completes before any store interaction.
    let (name, details) = request.validate()?;

    state.database.ensure_schema().await?;

    let id = state.database.insert_campaign(&name, &details).await?;

    info!(
        id = %id,
        campaign_type = %details.campaign_type(),
        "Campaign created"
    );

    Ok((StatusCode::CREATED, Json(json!({ "id": id }))))
}

async fn get_campaign(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let campaign = state.database.fetch_campaign(&id).await?;

    Ok(Json(campaign))
}
