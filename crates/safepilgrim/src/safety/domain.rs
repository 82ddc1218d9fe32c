use chrono::{Duration, NaiveDateTime, Timelike};
use serde::{Deserialize, Serialize};

/// Static trip inputs captured once per evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafetyInputs {
    /// 1 (low) .. 5 (high).
    pub area_risk_level: i32,
    pub is_night_time: bool,
    pub is_solo_travel: bool,
    /// 0 (none) .. 100 (many).
    pub incident_history_score: i32,
    /// 0 (good) .. 100 (bad).
    pub weather_risk_score: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Clear,
    LightRain,
    HeavyRain,
    Storm,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrafficCondition {
    None,
    Light,
    Moderate,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicTransportStatus {
    Normal,
    Delayed,
    Disrupted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmergencyServicesStatus {
    Normal,
    Limited,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PoliticalSituation {
    Stable,
    Tense,
    Unstable,
}

/// Live environment snapshot supplied by the telemetry collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RealTimeData {
    /// 0 .. 100.
    pub crowd_density: f64,
    pub weather_condition: WeatherCondition,
    pub traffic_condition: TrafficCondition,
    pub public_transport_status: PublicTransportStatus,
    pub emergency_services_status: EmergencyServicesStatus,
    pub has_local_events: bool,
    pub political_situation: PoliticalSituation,
}

/// Engagement recency for a single traveller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserBehavior {
    #[serde(default)]
    pub user_id: String,
    pub last_communication_time: NaiveDateTime,
    pub last_app_usage_time: NaiveDateTime,
    pub last_check_in_time: NaiveDateTime,
    #[serde(default)]
    pub average_app_usage_minutes: u32,
    #[serde(default)]
    pub communication_frequency_hours: u32,
}

impl UserBehavior {
    /// Whole hours since the last communication, truncated toward zero.
    pub fn communication_gap_hours(&self, now: NaiveDateTime) -> i64 {
        (now - self.last_communication_time).num_hours()
    }

    pub fn app_usage_gap_hours(&self, now: NaiveDateTime) -> i64 {
        (now - self.last_app_usage_time).num_hours()
    }

    pub fn check_in_gap_hours(&self, now: NaiveDateTime) -> i64 {
        (now - self.last_check_in_time).num_hours()
    }

    /// True when the last communication happened strictly before `now - hours`.
    pub fn silent_for_more_than(&self, hours: i64, now: NaiveDateTime) -> bool {
        now.checked_sub_signed(Duration::hours(hours))
            .is_some_and(|cutoff| self.last_communication_time < cutoff)
    }

    /// True when the last check-in happened strictly before `now - hours`.
    pub fn check_in_older_than(&self, hours: i64, now: NaiveDateTime) -> bool {
        now.checked_sub_signed(Duration::hours(hours))
            .is_some_and(|cutoff| self.last_check_in_time < cutoff)
    }
}

const EARTH_RADIUS_M: f64 = 6_371_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// Arithmetic mean of the coordinates; adequate for city-scale segments.
    pub fn midpoint(&self, other: &GeoPoint) -> GeoPoint {
        GeoPoint::new(
            (self.latitude + other.latitude) / 2.0,
            (self.longitude + other.longitude) / 2.0,
        )
    }

    /// Great-circle distance in meters.
    pub fn distance_m(&self, other: &GeoPoint) -> f64 {
        let lat1 = self.latitude.to_radians();
        let lat2 = other.latitude.to_radians();
        let dlat = lat2 - lat1;
        let dlon = (other.longitude - self.longitude).to_radians();

        let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
        2.0 * EARTH_RADIUS_M * a.sqrt().asin()
    }
}

/// Hour-of-day buckets shared by the scoring rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DayPeriod {
    /// 22:00 - 05:59
    Night,
    /// 06:00 - 08:59
    EarlyMorning,
    /// 09:00 - 17:59
    Daytime,
    /// 18:00 - 21:59
    Evening,
}

impl DayPeriod {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            22..=23 | 0..=5 => Self::Night,
            6..=8 => Self::EarlyMorning,
            9..=17 => Self::Daytime,
            _ => Self::Evening,
        }
    }

    pub fn of(timestamp: NaiveDateTime) -> Self {
        Self::from_hour(timestamp.hour())
    }
}

/// Score band shown alongside the numeric score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SafetyLabel {
    Excellent,
    Good,
    Moderate,
    #[serde(rename = "High Risk")]
    HighRisk,
}

impl SafetyLabel {
    pub fn for_score(score: f64) -> Self {
        if score >= 80.0 {
            Self::Excellent
        } else if score >= 60.0 {
            Self::Good
        } else if score >= 40.0 {
            Self::Moderate
        } else {
            Self::HighRisk
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Excellent => "Excellent",
            Self::Good => "Good",
            Self::Moderate => "Moderate",
            Self::HighRisk => "High Risk",
        }
    }
}

/// Result of a full engine evaluation. Higher scores are safer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnhancedSafetyScore {
    pub score: f64,
    pub base_score: f64,
    pub ai_adjustment: f64,
    pub behavior_score: f64,
    pub real_time_risk: f64,
    pub label: SafetyLabel,
    pub recommendations: Vec<String>,
    pub confidence: f64,
    pub timestamp: NaiveDateTime,
}
