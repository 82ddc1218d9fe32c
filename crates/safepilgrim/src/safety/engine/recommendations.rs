use super::super::domain::{
    DayPeriod, PublicTransportStatus, RealTimeData, TrafficCondition, UserBehavior,
    WeatherCondition,
};
use chrono::NaiveDateTime;

pub(crate) const EXCELLENT_TIER: [&str; 2] = [
    "Excellent safety conditions - enjoy your trip!",
    "Consider sharing your location with trusted contacts",
];

pub(crate) const GOOD_TIER: [&str; 2] = [
    "Good safety conditions with minor precautions needed",
    "Stay alert and aware of your surroundings",
];

pub(crate) const MODERATE_TIER: [&str; 3] = [
    "Moderate risk - extra caution recommended",
    "Avoid traveling alone if possible",
    "Keep emergency contacts readily available",
];

pub(crate) const HIGH_RISK_TIER: [&str; 4] = [
    "High risk conditions - consider postponing travel",
    "Travel with a companion",
    "Stay in well-lit, populated areas",
    "Keep emergency services on speed dial",
];

pub(crate) const CROWD_ADVICE: &str = "High crowd density - watch for pickpockets and stay alert";
pub(crate) const STORM_ADVICE: &str = "Severe weather - avoid outdoor activities";
pub(crate) const TRAFFIC_ADVICE: &str = "Heavy traffic - allow extra travel time";
pub(crate) const TRANSPORT_ADVICE: &str =
    "Public transport disrupted - have alternative transport ready";
pub(crate) const CHECK_IN_WITH_CONTACTS: &str = "Consider checking in with family/friends";
pub(crate) const CHECK_IN_DUE: &str = "Time for a safety check-in";
pub(crate) const LATE_NIGHT_ADVICE: &str = "Late night hours - extra caution recommended";

pub fn generate_recommendations(
    final_score: f64,
    real_time: &RealTimeData,
    behavior: &UserBehavior,
    now: NaiveDateTime,
) -> Vec<String> {
    let tier: &[&str] = if final_score >= 80.0 {
        &EXCELLENT_TIER
    } else if final_score >= 60.0 {
        &GOOD_TIER
    } else if final_score >= 40.0 {
        &MODERATE_TIER
    } else {
        &HIGH_RISK_TIER
    };

    let mut recommendations = Vec::new();
    for advice in tier {
        push_unique(&mut recommendations, advice);
    }

    if real_time.crowd_density > 80.0 {
        push_unique(&mut recommendations, CROWD_ADVICE);
    }
    if real_time.weather_condition == WeatherCondition::Storm {
        push_unique(&mut recommendations, STORM_ADVICE);
    }
    if real_time.traffic_condition == TrafficCondition::Heavy {
        push_unique(&mut recommendations, TRAFFIC_ADVICE);
    }
    if real_time.public_transport_status == PublicTransportStatus::Disrupted {
        push_unique(&mut recommendations, TRANSPORT_ADVICE);
    }

    if behavior.communication_gap_hours(now) > 6 {
        push_unique(&mut recommendations, CHECK_IN_WITH_CONTACTS);
    }
    if behavior.check_in_gap_hours(now) > 24 {
        push_unique(&mut recommendations, CHECK_IN_DUE);
    }

    if DayPeriod::of(now) == DayPeriod::Night {
        push_unique(&mut recommendations, LATE_NIGHT_ADVICE);
    }

    recommendations
}

/// Appends `advice` unless an identical entry is already present.
pub(crate) fn push_unique(recommendations: &mut Vec<String>, advice: &str) {
    if !recommendations.iter().any(|existing| existing == advice) {
        recommendations.push(advice.to_string());
    }
}
