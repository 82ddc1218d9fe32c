use crate::infra::StaticRiskDataSource;
use chrono::{Duration, Local, NaiveDateTime};
use clap::Args;
use safepilgrim::config::PredictionConfig;
use safepilgrim::error::AppError;
use safepilgrim::safety::domain::{
    EmergencyServicesStatus, EnhancedSafetyScore, GeoPoint, PoliticalSituation,
    PublicTransportStatus, RealTimeData, SafetyInputs, TrafficCondition, UserBehavior,
    WeatherCondition,
};
use safepilgrim::safety::prediction::{PredictionError, RiskPrediction, TimeWindow, UserProfile};
use safepilgrim::safety::{
    quick_score, AnomalyDetector, AnomalyReport, RiskPredictor, SafetyScoreEngine, ScoreRequest,
};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// JSON file holding `inputs`, `real_time`, `behavior`, and an optional `now`
    #[arg(long)]
    pub(crate) request: PathBuf,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Evaluation time (YYYY-MM-DDTHH:MM[:SS]). Defaults to the local clock.
    #[arg(long, value_parser = crate::infra::parse_datetime)]
    pub(crate) now: Option<NaiveDateTime>,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let raw = std::fs::read_to_string(&args.request)?;
    let request: ScoreRequest = serde_json::from_str(&raw)?;

    let score = request.evaluate(&SafetyScoreEngine::new());
    println!("Safety score for {}", args.request.display());
    render_score(&score);

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let now = args.now.unwrap_or_else(|| Local::now().naive_local());
    let trip = DemoTrip::evening_temple_visit(now);

    println!("SafePilgrim demo at {}", now.format("%Y-%m-%d %H:%M"));
    println!(
        "Destination: {} ({:.4}, {:.4})",
        trip.name, trip.point.latitude, trip.point.longitude
    );

    let quick = quick_score(&trip.inputs);
    println!("\nQuick score (static inputs only)");
    println!("- {} / 100 | {:?} risk", quick.score, quick.level);

    let score =
        SafetyScoreEngine::new().compute(&trip.inputs, &trip.real_time, &trip.behavior, now);
    println!("\nLive safety score");
    render_score(&score);

    let predictor = RiskPredictor::new(
        Arc::new(StaticRiskDataSource::default()),
        PredictionConfig::default(),
    );
    let window = TimeWindow::hour_starting_at(now).ok_or(PredictionError::TimeOutOfRange(now))?;
    let prediction = predictor.predict(trip.point, window, &trip.profile, now)?;
    println!("\nRisk forecast for the next hour");
    render_prediction(&prediction);

    let anomalies = AnomalyDetector::new().detect_behavior_anomalies(&trip.behavior, now);
    println!("\nBehavior check");
    render_anomalies(&anomalies);

    Ok(())
}

struct DemoTrip {
    name: &'static str,
    point: GeoPoint,
    inputs: SafetyInputs,
    real_time: RealTimeData,
    behavior: UserBehavior,
    profile: UserProfile,
}

impl DemoTrip {
    fn evening_temple_visit(now: NaiveDateTime) -> Self {
        Self {
            name: "Golden Temple, Amritsar",
            point: GeoPoint::new(31.6200, 74.8765),
            inputs: SafetyInputs {
                area_risk_level: 2,
                is_night_time: false,
                is_solo_travel: true,
                incident_history_score: 20,
                weather_risk_score: 10,
            },
            real_time: RealTimeData {
                crowd_density: 75.0,
                weather_condition: WeatherCondition::Clear,
                traffic_condition: TrafficCondition::Moderate,
                public_transport_status: PublicTransportStatus::Normal,
                emergency_services_status: EmergencyServicesStatus::Normal,
                has_local_events: true,
                political_situation: PoliticalSituation::Stable,
            },
            behavior: UserBehavior {
                user_id: "demo-pilgrim".to_string(),
                last_communication_time: before(now, Duration::hours(7)),
                last_app_usage_time: before(now, Duration::minutes(20)),
                last_check_in_time: before(now, Duration::hours(3)),
                average_app_usage_minutes: 45,
                communication_frequency_hours: 4,
            },
            profile: UserProfile {
                is_solo_traveler: true,
                is_first_time_visitor: true,
                age: 34,
                has_medical_conditions: false,
            },
        }
    }
}

fn before(now: NaiveDateTime, gap: Duration) -> NaiveDateTime {
    now.checked_sub_signed(gap).unwrap_or(NaiveDateTime::MIN)
}

fn render_score(score: &EnhancedSafetyScore) {
    println!(
        "- {:.1} / 100 ({}) | confidence {:.0}%",
        score.score,
        score.label.label(),
        score.confidence * 100.0
    );
    println!(
        "- base {:.1} | ai adjustment {:+.1} | behavior {:.1} | real-time risk {:.1}",
        score.base_score, score.ai_adjustment, score.behavior_score, score.real_time_risk
    );
    println!("Recommendations:");
    for recommendation in &score.recommendations {
        println!("  - {recommendation}");
    }
}

fn render_prediction(prediction: &RiskPrediction) {
    println!(
        "- risk {:.1} ({}) | confidence {:.0}%",
        prediction.risk_score,
        prediction.risk_level.label(),
        prediction.confidence * 100.0
    );
    let factors = &prediction.factors;
    println!(
        "- historical {:.0} | weather {:.0} | crowd {:.0} | events {:.0} | time {:.0} | traveller {:.0}",
        factors.historical_risk,
        factors.weather_risk,
        factors.crowd_risk,
        factors.event_risk,
        factors.time_risk,
        factors.user_risk
    );
    for recommendation in &prediction.recommendations {
        println!("  - {recommendation}");
    }
}

fn render_anomalies(report: &AnomalyReport) {
    if report.anomalies.is_empty() {
        println!("- no anomalies detected");
        return;
    }

    println!(
        "- {} anomalies | overall {:?} | confidence {:.0}%",
        report.anomalies.len(),
        report.severity,
        report.confidence * 100.0
    );
    for anomaly in &report.anomalies {
        println!("  - [{:?}] {}", anomaly.severity, anomaly.description);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::parse_datetime;

    fn evening() -> NaiveDateTime {
        parse_datetime("2025-10-15T19:30:00").expect("valid timestamp")
    }

    #[test]
    fn demo_trip_runs_end_to_end() {
        let args = DemoArgs {
            now: Some(evening()),
        };

        run_demo(args).expect("demo completes");
    }

    #[test]
    fn demo_trip_flags_the_silent_traveller() {
        let now = evening();
        let trip = DemoTrip::evening_temple_visit(now);

        let report = AnomalyDetector::new().detect_behavior_anomalies(&trip.behavior, now);

        assert_eq!(report.anomalies.len(), 1);
        assert_eq!(report.anomalies[0].description, "No communication for 7 hours");
    }

    #[test]
    fn score_command_reports_missing_file() {
        let args = ScoreArgs {
            request: PathBuf::from("does-not-exist/request.json"),
        };

        let error = run_score(args).expect_err("missing file fails");
        assert!(matches!(error, AppError::Io(_)));
    }
}
