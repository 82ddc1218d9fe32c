use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Router,
};
use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

use super::anomaly::{AnomalyDetector, LocationSample};
use super::domain::{EnhancedSafetyScore, GeoPoint, RealTimeData, SafetyInputs, UserBehavior};
use super::engine::SafetyScoreEngine;
use super::prediction::{
    PredictionError, RiskDataSource, RiskPrediction, RiskPredictor, RiskTrend,
    RouteRiskPrediction, TimeRange, TimeWindow, UserProfile,
};
use super::quick::quick_score;

/// Full evaluation request. `now` falls back to the local wall clock.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreRequest {
    pub inputs: SafetyInputs,
    pub real_time: RealTimeData,
    pub behavior: UserBehavior,
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

impl ScoreRequest {
    pub fn evaluate(&self, engine: &SafetyScoreEngine) -> EnhancedSafetyScore {
        engine.compute(
            &self.inputs,
            &self.real_time,
            &self.behavior,
            resolve_now(self.now),
        )
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    pub point: GeoPoint,
    #[serde(default)]
    pub window: Option<TimeWindow>,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RouteRequest {
    pub route: Vec<GeoPoint>,
    #[serde(default)]
    pub window: Option<TimeWindow>,
    #[serde(default)]
    pub profile: UserProfile,
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TrendRequest {
    pub point: GeoPoint,
    /// Defaults to `now`.
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    pub hours: u32,
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LocationAnomalyRequest {
    pub history: Vec<LocationSample>,
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BehaviorAnomalyRequest {
    pub behavior: UserBehavior,
    #[serde(default)]
    pub now: Option<NaiveDateTime>,
}

/// Router exposing scoring, prediction, and anomaly endpoints.
pub fn safety_router<S>(predictor: Arc<RiskPredictor<S>>) -> Router
where
    S: RiskDataSource + 'static,
{
    Router::new()
        .route("/api/v1/safety/score", post(score_handler))
        .route("/api/v1/safety/quick", post(quick_handler))
        .route("/api/v1/risk/predict", post(predict_handler::<S>))
        .route("/api/v1/risk/route", post(route_handler::<S>))
        .route("/api/v1/risk/trend", post(trend_handler::<S>))
        .route("/api/v1/anomalies/location", post(location_anomaly_handler))
        .route("/api/v1/anomalies/behavior", post(behavior_anomaly_handler))
        .with_state(predictor)
}

pub(crate) async fn score_handler(axum::Json(request): axum::Json<ScoreRequest>) -> Response {
    let score = request.evaluate(&SafetyScoreEngine::new());
    (StatusCode::OK, axum::Json(score)).into_response()
}

pub(crate) async fn quick_handler(axum::Json(inputs): axum::Json<SafetyInputs>) -> Response {
    (StatusCode::OK, axum::Json(quick_score(&inputs))).into_response()
}

pub(crate) async fn predict_handler<S>(
    State(predictor): State<Arc<RiskPredictor<S>>>,
    axum::Json(request): axum::Json<PredictRequest>,
) -> Result<axum::Json<RiskPrediction>, AppError>
where
    S: RiskDataSource + 'static,
{
    let now = resolve_now(request.now);
    let window = match request.window {
        Some(window) => window,
        None => default_window(now)?,
    };

    let prediction = predictor.predict(request.point, window, &request.profile, now)?;
    Ok(axum::Json(prediction))
}

pub(crate) async fn route_handler<S>(
    State(predictor): State<Arc<RiskPredictor<S>>>,
    axum::Json(request): axum::Json<RouteRequest>,
) -> Result<axum::Json<RouteRiskPrediction>, AppError>
where
    S: RiskDataSource + 'static,
{
    let now = resolve_now(request.now);
    let window = match request.window {
        Some(window) => window,
        None => default_window(now)?,
    };

    let prediction = predictor.predict_route(&request.route, window, &request.profile, now)?;
    Ok(axum::Json(prediction))
}

pub(crate) async fn trend_handler<S>(
    State(predictor): State<Arc<RiskPredictor<S>>>,
    axum::Json(request): axum::Json<TrendRequest>,
) -> Result<axum::Json<RiskTrend>, AppError>
where
    S: RiskDataSource + 'static,
{
    let now = resolve_now(request.now);
    let range = TimeRange {
        start: request.start.unwrap_or(now),
        duration_hours: request.hours,
    };

    let trend = predictor.risk_trend(request.point, range, now)?;
    Ok(axum::Json(trend))
}

pub(crate) async fn location_anomaly_handler(
    axum::Json(request): axum::Json<LocationAnomalyRequest>,
) -> Response {
    let report = AnomalyDetector::new()
        .detect_location_anomalies(&request.history, resolve_now(request.now));
    (StatusCode::OK, axum::Json(report)).into_response()
}

pub(crate) async fn behavior_anomaly_handler(
    axum::Json(request): axum::Json<BehaviorAnomalyRequest>,
) -> Response {
    let report = AnomalyDetector::new()
        .detect_behavior_anomalies(&request.behavior, resolve_now(request.now));
    (StatusCode::OK, axum::Json(report)).into_response()
}

fn default_window(now: NaiveDateTime) -> Result<TimeWindow, PredictionError> {
    TimeWindow::hour_starting_at(now).ok_or(PredictionError::TimeOutOfRange(now))
}

fn resolve_now(now: Option<NaiveDateTime>) -> NaiveDateTime {
    now.unwrap_or_else(|| Local::now().naive_local())
}
