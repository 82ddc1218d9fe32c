//! Risk prediction scenarios exercised through the predictor facade and HTTP router.

mod common {
    use chrono::{NaiveDate, NaiveDateTime};
    use safepilgrim::safety::domain::{GeoPoint, WeatherCondition};
    use safepilgrim::safety::prediction::{
        CrowdDensityData, CrowdTrend, DataSourceError, EventType, HistoricalIncident,
        IncidentSeverity, IncidentType, LocalEvent, RiskDataSource, TimeWindow, UserProfile,
        WeatherForecast,
    };

    pub(super) fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 15)
            .expect("valid date")
            .and_hms_opt(hour, 0, 0)
            .expect("valid time")
    }

    pub(super) fn vulnerable_traveller() -> UserProfile {
        UserProfile {
            is_solo_traveler: true,
            is_first_time_visitor: true,
            age: 70,
            has_medical_conditions: true,
        }
    }

    /// A stormy, packed protest district with a critical incident on record.
    pub(super) struct ProtestDistrict;

    impl RiskDataSource for ProtestDistrict {
        fn incidents(
            &self,
            point: &GeoPoint,
            window: &TimeWindow,
        ) -> Result<Vec<HistoricalIncident>, DataSourceError> {
            Ok(vec![HistoricalIncident {
                point: *point,
                incident_type: IncidentType::SecurityThreat,
                severity: IncidentSeverity::Critical,
                timestamp: window.start - chrono::Duration::days(1),
                description: "Clashes near the square".to_string(),
            }])
        }

        fn weather_forecast(
            &self,
            _point: &GeoPoint,
            _window: &TimeWindow,
        ) -> Result<WeatherForecast, DataSourceError> {
            Ok(WeatherForecast {
                condition: WeatherCondition::HeavyRain,
                temperature: 38.0,
                humidity: 90.0,
                wind_speed: 25.0,
                precipitation: 30.0,
            })
        }

        fn crowd_density(
            &self,
            _point: &GeoPoint,
            _window: &TimeWindow,
        ) -> Result<CrowdDensityData, DataSourceError> {
            Ok(CrowdDensityData {
                density: 95.0,
                trend: CrowdTrend::Increasing,
            })
        }

        fn local_events(
            &self,
            _point: &GeoPoint,
            _window: &TimeWindow,
        ) -> Result<Vec<LocalEvent>, DataSourceError> {
            Ok(vec![LocalEvent {
                name: "March to the assembly".to_string(),
                expected_crowd: 20_000,
                event_type: EventType::Protest,
            }])
        }
    }

    /// Everything answers except the crowd feed.
    pub(super) struct CrowdFeedDown;

    impl RiskDataSource for CrowdFeedDown {
        fn incidents(
            &self,
            point: &GeoPoint,
            window: &TimeWindow,
        ) -> Result<Vec<HistoricalIncident>, DataSourceError> {
            ProtestDistrict.incidents(point, window)
        }

        fn weather_forecast(
            &self,
            point: &GeoPoint,
            window: &TimeWindow,
        ) -> Result<WeatherForecast, DataSourceError> {
            ProtestDistrict.weather_forecast(point, window)
        }

        fn crowd_density(
            &self,
            _point: &GeoPoint,
            _window: &TimeWindow,
        ) -> Result<CrowdDensityData, DataSourceError> {
            Err(DataSourceError::Unavailable {
                feed: "crowd",
                reason: "sensor gateway offline".to_string(),
            })
        }

        fn local_events(
            &self,
            point: &GeoPoint,
            window: &TimeWindow,
        ) -> Result<Vec<LocalEvent>, DataSourceError> {
            ProtestDistrict.local_events(point, window)
        }
    }
}

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use common::*;
use safepilgrim::config::PredictionConfig;
use safepilgrim::safety::domain::GeoPoint;
use safepilgrim::safety::prediction::{
    PredictionError, RiskLevel, RiskPredictor, TimeRange, TimeWindow,
};
use safepilgrim::safety::safety_router;
use serde_json::{json, Value};
use std::sync::Arc;
use tower::ServiceExt;

fn predictor<S: safepilgrim::safety::RiskDataSource + 'static>(source: S) -> RiskPredictor<S> {
    RiskPredictor::new(Arc::new(source), PredictionConfig::default())
}

#[test]
fn late_night_protest_district_is_medium_risk_for_vulnerable_traveller() {
    let point = GeoPoint::new(31.6340, 74.8723);
    let window = TimeWindow::hour_starting_at(at(23)).expect("window in range");

    let prediction = predictor(ProtestDistrict)
        .predict(point, window, &vulnerable_traveller(), at(18))
        .expect("prediction succeeds");

    // 100*.25 + 55*.20 + 40*.15 + 60*.15 + 40*.15 + 70*.10
    assert!((prediction.risk_score - 64.0).abs() < 1e-9, "got {}", prediction.risk_score);
    assert_eq!(prediction.risk_level, RiskLevel::Medium);
    assert!(prediction.factors.is_night_time);
    assert!(prediction.factors.is_solo_travel);
    assert!((prediction.confidence - 1.0).abs() < 1e-9);
    assert_eq!(prediction.timestamp, at(18));
    assert_eq!(
        prediction.recommendations,
        vec![
            "Exercise extra caution",
            "Stay alert and aware of surroundings",
            "Avoid isolated areas",
            "Late night hours - extra caution recommended",
            "Consider joining a group tour",
            "Familiarize yourself with the area beforehand",
        ]
    );
}

#[test]
fn trend_tracks_time_of_day() {
    let range = TimeRange {
        start: at(16),
        duration_hours: 4,
    };

    let trend = predictor(ProtestDistrict)
        .risk_trend(GeoPoint::new(31.62, 74.87), range, at(12))
        .expect("trend succeeds");

    let hours: Vec<_> = trend.points.iter().map(|point| point.time).collect();
    assert_eq!(hours, vec![at(16), at(17), at(18), at(19)]);
    // daytime 5 -> evening 20, weighted by 0.15
    let lift = trend.points[2].risk_score - trend.points[1].risk_score;
    assert!((lift - 2.25).abs() < 1e-9, "got {lift}");
}

#[test]
fn failing_feed_surfaces_as_data_source_error() {
    let error = predictor(CrowdFeedDown)
        .predict(
            GeoPoint::new(31.62, 74.87),
            TimeWindow::hour_starting_at(at(12)).expect("window in range"),
            &vulnerable_traveller(),
            at(12),
        )
        .expect_err("crowd feed is down");

    assert!(matches!(error, PredictionError::DataSource(_)));
    assert_eq!(error.to_string(), "crowd feed unavailable: sensor gateway offline");
}

#[tokio::test]
async fn route_endpoint_summarizes_segments() {
    let router = safety_router(Arc::new(predictor(ProtestDistrict)));
    let body = json!({
        "route": [
            { "latitude": 31.6200, "longitude": 74.8765 },
            { "latitude": 31.6260, "longitude": 74.8740 },
            { "latitude": 31.6340, "longitude": 74.8723 }
        ],
        "window": { "start": "2025-10-15T23:00:00", "end": "2025-10-16T00:00:00" },
        "profile": {
            "is_solo_traveler": true,
            "is_first_time_visitor": true,
            "age": 70,
            "has_medical_conditions": true
        },
        "now": "2025-10-15T18:00:00"
    });

    let response = router
        .oneshot(
            Request::post("/api/v1/risk/route")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(serde_json::to_vec(&body).expect("serialize body")))
                .expect("build request"),
        )
        .await
        .expect("router responds");

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&bytes).expect("json body");

    assert_eq!(payload["segments"].as_array().map(Vec::len), Some(2));
    assert_eq!(payload["overall_risk_level"], "medium");
    assert_eq!(payload["recommendations"], json!(["Consider alternative route"]));
}
