//! REST API handlers for trip attribution reports
//!
//! These handlers use the shared ReportService.

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use super::service::{ReportQuery, ReportService};
use crate::analytics::{FleetKpis, HubSummary, VendorSummary};
use crate::engine::Report;
use crate::error::LinehaulError;

// ============================================================================
// Response Types
// ============================================================================

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct DatesResponse {
    pub dates: Vec<NaiveDate>,
    pub default: Option<NaiveDate>,
}

#[derive(Serialize)]
pub struct HubsResponse {
    pub hubs: Vec<String>,
}

// ============================================================================
// Query Parameters
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ReportParams {
    /// YYYY-MM-DD
    pub date: Option<String>,
    /// Comma separated hub names
    pub hubs: Option<String>,
    /// Parsed in `to_query` so a bad value gets the JSON error body
    pub top: Option<String>,
}

impl ReportParams {
    pub fn to_query(&self) -> Result<ReportQuery, ApiError> {
        let date = match self.date.as_deref() {
            Some(s) => Some(NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                error(StatusCode::BAD_REQUEST, format!("Invalid date: {}", s))
            })?),
            None => None,
        };
        let hubs = self.hubs.as_deref().map(|s| {
            s.split(',')
                .map(str::trim)
                .filter(|h| !h.is_empty())
                .map(str::to_string)
                .collect()
        });
        let top_n = match self.top.as_deref().map(str::trim) {
            Some(s) => Some(s.parse::<usize>().map_err(|_| {
                error(StatusCode::BAD_REQUEST, format!("Invalid top: {}", s))
            })?),
            None => None,
        };
        Ok(ReportQuery { date, hubs, top_n })
    }
}

// ============================================================================
// Handlers
// ============================================================================

pub type AppState = Arc<ReportService>;
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn error(status: StatusCode, message: String) -> ApiError {
    (status, Json(ErrorResponse { error: message }))
}

fn status_for(e: &LinehaulError) -> StatusCode {
    match e {
        LinehaulError::NoInputFile(_) => StatusCode::NOT_FOUND,
        e if e.is_data_error() => StatusCode::UNPROCESSABLE_ENTITY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<LinehaulError> for ErrorResponse {
    fn from(e: LinehaulError) -> Self {
        Self { error: e.to_string() }
    }
}

fn api_error(e: LinehaulError) -> ApiError {
    (status_for(&e), Json(ErrorResponse::from(e)))
}

async fn build_report(service: &ReportService, params: &ReportParams) -> Result<Report, ApiError> {
    let query = params.to_query()?;
    service.report(&query).await.map_err(api_error)
}

/// GET /api/v1/health
pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok"}))
}

/// GET /api/v1/dates
pub async fn get_dates(State(service): State<AppState>) -> Result<Json<DatesResponse>, ApiError> {
    let dates = service.dates().await.map_err(api_error)?;
    Ok(Json(DatesResponse {
        default: dates.first().copied(),
        dates,
    }))
}

/// GET /api/v1/hubs
pub async fn get_hubs(State(service): State<AppState>) -> Result<Json<HubsResponse>, ApiError> {
    let hubs = service.hubs().await.map_err(api_error)?;
    Ok(Json(HubsResponse { hubs }))
}

/// GET /api/v1/report
pub async fn get_report(
    State(service): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Report>, ApiError> {
    build_report(&service, &params).await.map(Json)
}

/// GET /api/v1/kpis
pub async fn get_kpis(
    State(service): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<FleetKpis>, ApiError> {
    build_report(&service, &params).await.map(|r| Json(r.kpis))
}

/// GET /api/v1/hubs/summary
pub async fn get_hub_summary(
    State(service): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<HubSummary>>, ApiError> {
    build_report(&service, &params).await.map(|r| Json(r.hubs))
}

/// GET /api/v1/vendors/top
pub async fn get_top_vendors(
    State(service): State<AppState>,
    Query(params): Query<ReportParams>,
) -> Result<Json<Vec<VendorSummary>>, ApiError> {
    build_report(&service, &params).await.map(|r| Json(r.top_vendors))
}
