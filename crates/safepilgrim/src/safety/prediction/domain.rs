use super::super::domain::{GeoPoint, WeatherCondition};
use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    /// `None` when the hour would run past the calendar range chrono supports.
    pub fn hour_starting_at(start: NaiveDateTime) -> Option<Self> {
        let end = start.checked_add_signed(Duration::hours(1))?;
        Some(Self { start, end })
    }
}

/// Consecutive one-hour windows beginning at `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: NaiveDateTime,
    pub duration_hours: u32,
}

impl TimeRange {
    /// Yields `None` for any hour that falls outside the calendar range.
    pub fn windows(self) -> impl Iterator<Item = Option<TimeWindow>> {
        (0..self.duration_hours).map(move |hour| {
            self.start
                .checked_add_signed(Duration::hours(i64::from(hour)))
                .and_then(TimeWindow::hour_starting_at)
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserProfile {
    pub is_solo_traveler: bool,
    pub is_first_time_visitor: bool,
    pub age: u32,
    pub has_medical_conditions: bool,
}

impl Default for UserProfile {
    fn default() -> Self {
        Self {
            is_solo_traveler: true,
            is_first_time_visitor: false,
            age: 30,
            has_medical_conditions: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Theft,
    Accident,
    MedicalEmergency,
    SecurityThreat,
    NaturalDisaster,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncidentSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl IncidentSeverity {
    pub fn weight(&self) -> f64 {
        match self {
            Self::Low => 10.0,
            Self::Medium => 25.0,
            Self::High => 50.0,
            Self::Critical => 100.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoricalIncident {
    pub point: GeoPoint,
    pub incident_type: IncidentType,
    pub severity: IncidentSeverity,
    pub timestamp: NaiveDateTime,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeatherForecast {
    pub condition: WeatherCondition,
    /// Degrees Celsius.
    pub temperature: f64,
    pub humidity: f64,
    /// km/h.
    pub wind_speed: f64,
    pub precipitation: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CrowdTrend {
    Increasing,
    Decreasing,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrowdDensityData {
    /// 0 .. 100.
    pub density: f64,
    pub trend: CrowdTrend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EventType {
    Festival,
    Concert,
    Sports,
    Protest,
    Other,
}

impl EventType {
    pub fn weight(&self) -> f64 {
        match self {
            Self::Festival => 30.0,
            Self::Concert => 25.0,
            Self::Sports => 20.0,
            Self::Protest => 60.0,
            Self::Other => 15.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocalEvent {
    pub name: String,
    pub expected_crowd: u32,
    pub event_type: EventType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn for_score(score: f64) -> Self {
        if score >= 70.0 {
            Self::High
        } else if score >= 40.0 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

/// Individual factor scores behind a prediction, each 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskFactors {
    pub historical_risk: f64,
    pub weather_risk: f64,
    pub crowd_risk: f64,
    pub event_risk: f64,
    pub time_risk: f64,
    pub user_risk: f64,
    pub is_night_time: bool,
    pub is_solo_travel: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskPrediction {
    pub point: GeoPoint,
    pub window: TimeWindow,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
    pub factors: RiskFactors,
    pub recommendations: Vec<String>,
    pub confidence: f64,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRisk {
    pub start: GeoPoint,
    pub end: GeoPoint,
    pub risk: RiskPrediction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RouteRiskPrediction {
    pub route: Vec<GeoPoint>,
    pub window: TimeWindow,
    pub segments: Vec<SegmentRisk>,
    pub average_risk: f64,
    pub max_risk: f64,
    pub overall_risk_level: RiskLevel,
    pub recommendations: Vec<String>,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskTrendPoint {
    pub time: NaiveDateTime,
    pub risk_score: f64,
    pub risk_level: RiskLevel,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskTrend {
    pub point: GeoPoint,
    pub points: Vec<RiskTrendPoint>,
}
