//! HTTP endpoints for the natal chart server using axum.
//!
//! Endpoints:
//! - POST /api/calculate - compute a chart
//! - POST /api/wheel     - compute a chart and return its wheel geometry
//! - GET  /api/cities    - built-in city list
//! - GET  /health        - health check

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use natal_chart::gazetteer::{self, City};
use natal_chart::{ChartEngine, ChartQuery, ChartResult, WheelGenerator, WheelSpec};

use crate::error::ServerError;

pub const DEFAULT_WHEEL_SIZE: f32 = 600.0;
const MAX_WHEEL_SIZE: f32 = 4096.0;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<ChartEngine>,
    pub wheel: Arc<WheelGenerator>,
}

impl AppState {
    pub fn new(engine: ChartEngine) -> Self {
        Self {
            engine: Arc::new(engine),
            wheel: Arc::new(WheelGenerator::new()),
        }
    }
}

/// Build the axum router with all endpoints.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/calculate", post(calculate))
        .route("/api/wheel", post(wheel))
        .route("/api/cities", get(cities))
        .route("/health", get(health))
        .with_state(state)
}

// ── Request / Response types ────────────────────────────────────────

#[derive(Deserialize)]
pub struct WheelRequest {
    #[serde(flatten)]
    pub chart: ChartQuery,
    pub width: Option<f32>,
    pub height: Option<f32>,
}

#[derive(Serialize, Deserialize)]
pub struct CitiesResponse {
    pub cities: Vec<CityEntry>,
}

#[derive(Serialize, Deserialize)]
pub struct CityEntry {
    pub name: String,
    pub lat: f64,
    pub lon: f64,
}

impl From<&City> for CityEntry {
    fn from(city: &City) -> Self {
        Self {
            name: city.name.to_string(),
            lat: city.lat,
            lon: city.lon,
        }
    }
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

// ── Handlers ────────────────────────────────────────────────────────

async fn compute(engine: &ChartEngine, query: ChartQuery) -> Result<ChartResult, ServerError> {
    let request = query.into_request().map_err(|e| ServerError::BadRequest(e.to_string()))?;
    let chart = engine.calculate(&request).await?;
    log::info!(
        "chart at {} ({}, {}): {} bodies from {:?}, {} aspects",
        request.timestamp,
        request.location.lat,
        request.location.lon,
        chart.bodies.len(),
        chart.source,
        chart.aspects.len()
    );
    Ok(chart)
}

async fn calculate(
    State(state): State<AppState>,
    body: Result<Json<ChartQuery>, JsonRejection>,
) -> Result<Json<ChartResult>, ServerError> {
    let Json(query) = body?;
    let chart = compute(&state.engine, query).await?;
    Ok(Json(chart))
}

async fn wheel(
    State(state): State<AppState>,
    body: Result<Json<WheelRequest>, JsonRejection>,
) -> Result<Json<WheelSpec>, ServerError> {
    let Json(req) = body?;
    let width = wheel_dimension("width", req.width)?;
    let height = wheel_dimension("height", req.height)?;
    let chart = compute(&state.engine, req.chart).await?;
    Ok(Json(state.wheel.generate(&chart, width, height)))
}

fn wheel_dimension(field: &str, value: Option<f32>) -> Result<f32, ServerError> {
    match value {
        None => Ok(DEFAULT_WHEEL_SIZE),
        Some(v) if v.is_finite() && v > 0.0 && v <= MAX_WHEEL_SIZE => Ok(v),
        Some(v) => Err(ServerError::BadRequest(format!(
            "{} must be between 0 and {}, got {}",
            field, MAX_WHEEL_SIZE, v
        ))),
    }
}

async fn cities() -> Json<CitiesResponse> {
    Json(CitiesResponse {
        cities: gazetteer::cities().iter().map(CityEntry::from).collect(),
    })
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}
