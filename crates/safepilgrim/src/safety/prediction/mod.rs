//! Location and time-window risk prediction over an injected data source.

pub mod domain;
mod factors;
mod source;

pub use domain::{
    CrowdDensityData, CrowdTrend, EventType, HistoricalIncident, IncidentSeverity, IncidentType,
    LocalEvent, RiskFactors, RiskLevel, RiskPrediction, RiskTrend, RiskTrendPoint,
    RouteRiskPrediction, SegmentRisk, TimeRange, TimeWindow, UserProfile, WeatherForecast,
};
pub use source::{DataSourceError, RiskDataSource};

use super::domain::GeoPoint;
use crate::config::PredictionConfig;
use chrono::NaiveDateTime;
use std::sync::Arc;
use tracing::{debug, warn};

/// Predictor composing the data source with the factor rubric.
pub struct RiskPredictor<S> {
    source: Arc<S>,
    config: PredictionConfig,
}

impl<S> RiskPredictor<S>
where
    S: RiskDataSource + 'static,
{
    pub fn new(source: Arc<S>, config: PredictionConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> PredictionConfig {
        self.config
    }

    /// Predict the risk at `point` for `window`, stamping the result with `now`.
    pub fn predict(
        &self,
        point: GeoPoint,
        window: TimeWindow,
        profile: &UserProfile,
        now: NaiveDateTime,
    ) -> Result<RiskPrediction, PredictionError> {
        let incidents = self
            .source
            .incidents(&point, &window)
            .map_err(log_source_failure)?;
        let forecast = self
            .source
            .weather_forecast(&point, &window)
            .map_err(log_source_failure)?;
        let crowd = self
            .source
            .crowd_density(&point, &window)
            .map_err(log_source_failure)?;
        let events = self
            .source
            .local_events(&point, &window)
            .map_err(log_source_failure)?;

        let historical_risk = factors::historical_risk(&incidents);
        let weather_risk = factors::weather_risk(&forecast);
        let crowd_risk = factors::crowd_risk(&crowd);
        let event_risk = factors::event_risk(&events);
        let time_risk = factors::time_risk(&window);
        let user_risk = factors::user_risk(profile);

        let risk_score = factors::combine(
            historical_risk,
            weather_risk,
            crowd_risk,
            event_risk,
            time_risk,
            user_risk,
        );
        let risk_level = RiskLevel::for_score(risk_score);

        debug!(
            latitude = point.latitude,
            longitude = point.longitude,
            risk_score,
            level = risk_level.label(),
            "risk predicted"
        );

        Ok(RiskPrediction {
            point,
            window,
            risk_score,
            risk_level,
            factors: RiskFactors {
                historical_risk,
                weather_risk,
                crowd_risk,
                event_risk,
                time_risk,
                user_risk,
                is_night_time: time_risk > 30.0,
                is_solo_travel: user_risk > 20.0,
            },
            recommendations: factors::recommendations(risk_level, &window, profile),
            confidence: factors::confidence(&incidents, &forecast, &crowd),
            timestamp: now,
        })
    }

    /// Predict each segment at its midpoint and summarize the route.
    pub fn predict_route(
        &self,
        route: &[GeoPoint],
        window: TimeWindow,
        profile: &UserProfile,
        now: NaiveDateTime,
    ) -> Result<RouteRiskPrediction, PredictionError> {
        if route.len() < 2 {
            return Err(PredictionError::RouteTooShort(route.len()));
        }

        let segments = route
            .windows(2)
            .map(|pair| -> Result<SegmentRisk, PredictionError> {
                let (start, end) = (pair[0], pair[1]);
                let risk = self.predict(start.midpoint(&end), window, profile, now)?;
                Ok(SegmentRisk { start, end, risk })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let total: f64 = segments.iter().map(|segment| segment.risk.risk_score).sum();
        let average_risk = total / segments.len() as f64;
        let max_risk = segments
            .iter()
            .map(|segment| segment.risk.risk_score)
            .fold(0.0, f64::max);
        let recommendations = factors::route_recommendations(&segments, average_risk);

        Ok(RouteRiskPrediction {
            route: route.to_vec(),
            window,
            segments,
            average_risk,
            max_risk,
            overall_risk_level: RiskLevel::for_score(average_risk),
            recommendations,
            timestamp: now,
        })
    }

    /// Hour-by-hour prediction for a default traveler profile.
    pub fn risk_trend(
        &self,
        point: GeoPoint,
        range: TimeRange,
        now: NaiveDateTime,
    ) -> Result<RiskTrend, PredictionError> {
        if range.duration_hours == 0 || range.duration_hours > self.config.max_trend_hours {
            return Err(PredictionError::InvalidTimeRange {
                requested: range.duration_hours,
                max: self.config.max_trend_hours,
            });
        }

        let profile = UserProfile::default();
        let points = range
            .windows()
            .map(|window| -> Result<RiskTrendPoint, PredictionError> {
                let window = window.ok_or(PredictionError::TimeOutOfRange(range.start))?;
                let prediction = self.predict(point, window, &profile, now)?;
                Ok(RiskTrendPoint {
                    time: window.start,
                    risk_score: prediction.risk_score,
                    risk_level: prediction.risk_level,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(RiskTrend { point, points })
    }
}

fn log_source_failure(err: DataSourceError) -> DataSourceError {
    warn!(error = %err, "risk data source failed");
    err
}

#[derive(Debug, thiserror::Error)]
pub enum PredictionError {
    #[error("route needs at least two points, got {0}")]
    RouteTooShort(usize),
    #[error("trend duration must be between 1 and {max} hours, got {requested}")]
    InvalidTimeRange { requested: u32, max: u32 },
    #[error("time window starting at {0} is outside the supported calendar range")]
    TimeOutOfRange(NaiveDateTime),
    #[error(transparent)]
    DataSource(#[from] DataSourceError),
}
