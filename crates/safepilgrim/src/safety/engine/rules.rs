use super::super::domain::{
    DayPeriod, EmergencyServicesStatus, PoliticalSituation, PublicTransportStatus, RealTimeData,
    SafetyInputs, TrafficCondition, UserBehavior, WeatherCondition,
};
use chrono::NaiveDateTime;

/// Communication older than this many hours costs the AI adjustment.
pub(crate) const COMMUNICATION_SILENCE_HOURS: i64 = 6;
/// Check-ins older than this many hours cost the AI adjustment.
pub(crate) const CHECK_IN_OVERDUE_HOURS: i64 = 24;

/// Static-input estimate: 100 minus the area, night, solo, history and weather penalties.
pub fn base_score(inputs: &SafetyInputs) -> f64 {
    let mut score = 100.0;

    // 0..48 for levels 1..5
    score -= (f64::from(inputs.area_risk_level) - 1.0) * 12.0;

    if inputs.is_night_time {
        score -= 10.0;
    }
    if inputs.is_solo_travel {
        score -= 10.0;
    }

    score -= f64::from(inputs.incident_history_score) * 0.3;
    score -= f64::from(inputs.weather_risk_score) * 0.3;

    score.clamp(0.0, 100.0)
}

/// Signed, unclamped delta from live conditions, time of day and engagement recency.
pub fn ai_adjustment(real_time: &RealTimeData, behavior: &UserBehavior, now: NaiveDateTime) -> f64 {
    let mut adjustment = 0.0;

    if real_time.crowd_density > 90.0 {
        adjustment -= 15.0;
    } else if real_time.crowd_density > 70.0 {
        adjustment -= 10.0;
    } else if real_time.crowd_density < 30.0 {
        adjustment += 5.0;
    }

    adjustment += match real_time.weather_condition {
        WeatherCondition::Storm => -20.0,
        WeatherCondition::HeavyRain => -15.0,
        WeatherCondition::LightRain => -5.0,
        WeatherCondition::Clear => 5.0,
        WeatherCondition::Unknown => -2.0,
    };

    adjustment += match DayPeriod::of(now) {
        DayPeriod::Night => -15.0,
        DayPeriod::EarlyMorning => -5.0,
        DayPeriod::Daytime => 5.0,
        DayPeriod::Evening => 0.0,
    };

    if behavior.silent_for_more_than(COMMUNICATION_SILENCE_HOURS, now) {
        adjustment -= 10.0;
    }
    if behavior.check_in_older_than(CHECK_IN_OVERDUE_HOURS, now) {
        adjustment -= 15.0;
    }

    adjustment
}

/// Recency-of-engagement heuristic starting from a neutral 50.
pub fn behavior_score(behavior: &UserBehavior, now: NaiveDateTime) -> f64 {
    let mut score: f64 = 50.0;

    // The `> 12` tier is checked first, so gaps beyond a day also cost 15.
    let communication_gap = behavior.communication_gap_hours(now);
    if communication_gap < 2 {
        score += 10.0;
    } else if communication_gap < 6 {
        score += 5.0;
    } else if communication_gap > 12 {
        score -= 15.0;
    } else if communication_gap > 24 {
        score -= 25.0;
    }

    let app_usage_gap = behavior.app_usage_gap_hours(now);
    if app_usage_gap < 4 {
        score += 5.0;
    } else if app_usage_gap > 24 {
        score -= 10.0;
    }

    let check_in_gap = behavior.check_in_gap_hours(now);
    if check_in_gap < 12 {
        score += 10.0;
    } else if check_in_gap > 48 {
        score -= 20.0;
    }

    score.clamp(0.0, 100.0)
}

/// Non-negative penalty accumulator over live infrastructure and civic conditions.
pub fn real_time_risk(real_time: &RealTimeData) -> f64 {
    let traffic = match real_time.traffic_condition {
        TrafficCondition::Heavy => 15.0,
        TrafficCondition::Moderate => 8.0,
        TrafficCondition::Light => 3.0,
        TrafficCondition::None => 0.0,
    };

    let transport = match real_time.public_transport_status {
        PublicTransportStatus::Disrupted => 20.0,
        PublicTransportStatus::Delayed => 10.0,
        PublicTransportStatus::Normal => 0.0,
    };

    let emergency = match real_time.emergency_services_status {
        EmergencyServicesStatus::Limited => 25.0,
        EmergencyServicesStatus::Normal => 0.0,
    };

    let events = if real_time.has_local_events { 10.0 } else { 0.0 };

    let political = match real_time.political_situation {
        PoliticalSituation::Unstable => 30.0,
        PoliticalSituation::Tense => 15.0,
        PoliticalSituation::Stable => 0.0,
    };

    traffic + transport + emergency + events + political
}
