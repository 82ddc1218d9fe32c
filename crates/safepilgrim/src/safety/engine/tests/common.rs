use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::safety::domain::{
    EmergencyServicesStatus, PoliticalSituation, PublicTransportStatus, RealTimeData,
    SafetyInputs, TrafficCondition, UserBehavior, WeatherCondition,
};

pub(super) fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 10, 15)
        .expect("valid date")
        .and_hms_opt(hour, minute, 0)
        .expect("valid time")
}

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn calm_inputs() -> SafetyInputs {
    SafetyInputs {
        area_risk_level: 1,
        is_night_time: false,
        is_solo_travel: false,
        incident_history_score: 0,
        weather_risk_score: 0,
    }
}

pub(super) fn worst_inputs() -> SafetyInputs {
    SafetyInputs {
        area_risk_level: 5,
        is_night_time: true,
        is_solo_travel: true,
        incident_history_score: 100,
        weather_risk_score: 100,
    }
}

pub(super) fn calm_real_time() -> RealTimeData {
    RealTimeData {
        crowd_density: 20.0,
        weather_condition: WeatherCondition::Clear,
        traffic_condition: TrafficCondition::None,
        public_transport_status: PublicTransportStatus::Normal,
        emergency_services_status: EmergencyServicesStatus::Normal,
        has_local_events: false,
        political_situation: PoliticalSituation::Stable,
    }
}

pub(super) fn hostile_real_time() -> RealTimeData {
    RealTimeData {
        crowd_density: 95.0,
        weather_condition: WeatherCondition::Storm,
        traffic_condition: TrafficCondition::Heavy,
        public_transport_status: PublicTransportStatus::Disrupted,
        emergency_services_status: EmergencyServicesStatus::Limited,
        has_local_events: true,
        political_situation: PoliticalSituation::Unstable,
    }
}

/// Behavior with each timestamp the given number of hours before `now`.
pub(super) fn behavior_with_gaps(
    now: NaiveDateTime,
    communication_hours: i64,
    app_usage_hours: i64,
    check_in_hours: i64,
) -> UserBehavior {
    UserBehavior {
        user_id: "traveler-1".to_string(),
        last_communication_time: now - Duration::hours(communication_hours),
        last_app_usage_time: now - Duration::hours(app_usage_hours),
        last_check_in_time: now - Duration::hours(check_in_hours),
        average_app_usage_minutes: 35,
        communication_frequency_hours: 3,
    }
}
