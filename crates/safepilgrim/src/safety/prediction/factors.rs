use super::super::domain::{DayPeriod, WeatherCondition};
use super::super::engine::recommendations::push_unique;
use super::domain::{
    CrowdDensityData, HistoricalIncident, LocalEvent, RiskLevel, SegmentRisk, TimeWindow,
    UserProfile, WeatherForecast,
};

const HISTORICAL_WEIGHT: f64 = 0.25;
const WEATHER_WEIGHT: f64 = 0.20;
const CROWD_WEIGHT: f64 = 0.15;
const EVENT_WEIGHT: f64 = 0.15;
const TIME_WEIGHT: f64 = 0.15;
const USER_WEIGHT: f64 = 0.10;

pub(crate) fn historical_risk(incidents: &[HistoricalIncident]) -> f64 {
    if incidents.is_empty() {
        return 0.0;
    }

    let total: f64 = incidents
        .iter()
        .map(|incident| incident.severity.weight())
        .sum();
    (total / incidents.len() as f64).clamp(0.0, 100.0)
}

pub(crate) fn weather_risk(forecast: &WeatherForecast) -> f64 {
    let mut risk: f64 = match forecast.condition {
        WeatherCondition::Clear => 0.0,
        WeatherCondition::LightRain => 15.0,
        WeatherCondition::HeavyRain => 30.0,
        WeatherCondition::Storm => 60.0,
        WeatherCondition::Unknown => 20.0,
    };

    if forecast.temperature > 35.0 || forecast.temperature < 5.0 {
        risk += 10.0;
    }
    if forecast.wind_speed > 20.0 {
        risk += 15.0;
    }

    risk.clamp(0.0, 100.0)
}

pub(crate) fn crowd_risk(crowd: &CrowdDensityData) -> f64 {
    if crowd.density > 90.0 {
        40.0
    } else if crowd.density > 70.0 {
        25.0
    } else if crowd.density > 50.0 {
        15.0
    } else if crowd.density > 30.0 {
        5.0
    } else {
        0.0
    }
}

pub(crate) fn event_risk(events: &[LocalEvent]) -> f64 {
    if events.is_empty() {
        return 0.0;
    }

    let total: f64 = events.iter().map(|event| event.event_type.weight()).sum();
    (total / events.len() as f64).clamp(0.0, 100.0)
}

pub(crate) fn time_risk(window: &TimeWindow) -> f64 {
    match DayPeriod::of(window.start) {
        DayPeriod::Night => 40.0,
        DayPeriod::EarlyMorning => 15.0,
        DayPeriod::Daytime => 5.0,
        DayPeriod::Evening => 20.0,
    }
}

pub(crate) fn user_risk(profile: &UserProfile) -> f64 {
    let mut risk = 0.0;

    if profile.is_solo_traveler {
        risk += 20.0;
    }
    if profile.is_first_time_visitor {
        risk += 15.0;
    }
    if profile.age < 18 || profile.age > 65 {
        risk += 10.0;
    }
    if profile.has_medical_conditions {
        risk += 25.0;
    }

    f64::min(risk, 100.0)
}

pub(crate) fn combine(
    historical: f64,
    weather: f64,
    crowd: f64,
    event: f64,
    time: f64,
    user: f64,
) -> f64 {
    let combined = historical * HISTORICAL_WEIGHT
        + weather * WEATHER_WEIGHT
        + crowd * CROWD_WEIGHT
        + event * EVENT_WEIGHT
        + time * TIME_WEIGHT
        + user * USER_WEIGHT;

    combined.clamp(0.0, 100.0)
}

pub(crate) fn recommendations(
    level: RiskLevel,
    window: &TimeWindow,
    profile: &UserProfile,
) -> Vec<String> {
    let tier: &[&str] = match level {
        RiskLevel::High => &[
            "Consider postponing travel to this area",
            "Travel with a companion if possible",
            "Stay in well-lit, populated areas",
            "Keep emergency contacts readily available",
        ],
        RiskLevel::Medium => &[
            "Exercise extra caution",
            "Stay alert and aware of surroundings",
            "Avoid isolated areas",
        ],
        RiskLevel::Low => &["Standard safety precautions apply", "Enjoy your visit safely"],
    };

    let mut recommendations = Vec::new();
    for advice in tier {
        push_unique(&mut recommendations, advice);
    }

    if DayPeriod::of(window.start) == DayPeriod::Night {
        push_unique(
            &mut recommendations,
            "Late night hours - extra caution recommended",
        );
    }
    if profile.is_solo_traveler {
        push_unique(&mut recommendations, "Consider joining a group tour");
    }
    if profile.is_first_time_visitor {
        push_unique(
            &mut recommendations,
            "Familiarize yourself with the area beforehand",
        );
    }

    recommendations
}

pub(crate) fn route_recommendations(segments: &[SegmentRisk], average_risk: f64) -> Vec<String> {
    let mut recommendations = Vec::new();

    let high_risk_segments = segments
        .iter()
        .filter(|segment| segment.risk.risk_level == RiskLevel::High)
        .count();
    if high_risk_segments > 0 {
        recommendations.push(format!(
            "Avoid high-risk segments: {high_risk_segments} identified"
        ));
    }

    if average_risk > 50.0 {
        recommendations.push("Consider alternative route".to_string());
    }

    recommendations
}

pub(crate) fn confidence(
    incidents: &[HistoricalIncident],
    forecast: &WeatherForecast,
    crowd: &CrowdDensityData,
) -> f64 {
    let mut confidence = 0.5;

    if !incidents.is_empty() {
        confidence += 0.2;
    }
    if forecast.condition != WeatherCondition::Unknown {
        confidence += 0.2;
    }
    if crowd.density > 0.0 {
        confidence += 0.1;
    }

    f64::min(confidence, 1.0)
}
