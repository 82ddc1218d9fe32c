use super::super::domain::{RealTimeData, SafetyInputs, UserBehavior, WeatherCondition};
use chrono::NaiveDateTime;

const BASE_CONFIDENCE: f64 = 0.5;
const COMPLETENESS_STEP: f64 = 0.1;

/// Input-completeness heuristic, not a statistical confidence.
pub fn estimate_confidence(
    inputs: &SafetyInputs,
    real_time: &RealTimeData,
    behavior: &UserBehavior,
    now: NaiveDateTime,
) -> f64 {
    let signals = [
        inputs.area_risk_level > 0,
        inputs.incident_history_score > 0,
        inputs.weather_risk_score > 0,
        real_time.crowd_density > 0.0,
        real_time.weather_condition != WeatherCondition::Unknown,
        behavior.communication_gap_hours(now) < 24,
    ];

    let present = signals.iter().filter(|present| **present).count() as f64;
    (BASE_CONFIDENCE + present * COMPLETENESS_STEP).clamp(0.0, 1.0)
}
