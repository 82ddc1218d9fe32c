//! Heuristic anomaly checks over location history and engagement recency.

use super::domain::{GeoPoint, UserBehavior};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tracing::debug;

const MAX_PLAUSIBLE_SPEED_KMH: f64 = 200.0;
const ROUTE_DEVIATION_LIMIT_M: f64 = 1000.0;
const DROPOFF_HOURS: i64 = 4;
const INACTIVITY_HOURS: i64 = 6;
const INACTIVITY_LOOKBACK: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LocationSample {
    pub point: GeoPoint,
    pub timestamp: NaiveDateTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalyType {
    SpeedAnomaly,
    RouteDeviation,
    LocationDropoff,
    ProlongedInactivity,
    CommunicationSilence,
    AppUsageAnomaly,
    MissedCheckIn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnomalySeverity {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: AnomalyType,
    pub severity: AnomalySeverity,
    pub description: String,
    pub point: Option<GeoPoint>,
    pub timestamp: NaiveDateTime,
    pub confidence: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyReport {
    pub anomalies: Vec<Anomaly>,
    pub severity: AnomalySeverity,
    pub confidence: f64,
    pub timestamp: NaiveDateTime,
}

impl AnomalyReport {
    fn from_anomalies(anomalies: Vec<Anomaly>, now: NaiveDateTime) -> Self {
        let severity = overall_severity(&anomalies);
        let confidence = if anomalies.is_empty() {
            0.0
        } else {
            anomalies.iter().map(|anomaly| anomaly.confidence).sum::<f64>()
                / anomalies.len() as f64
        };

        Self {
            anomalies,
            severity,
            confidence,
            timestamp: now,
        }
    }
}

/// Stateless detector; all history is passed in per call.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnomalyDetector;

impl AnomalyDetector {
    pub fn new() -> Self {
        Self
    }

    /// `history` is expected in chronological order.
    pub fn detect_location_anomalies(
        &self,
        history: &[LocationSample],
        now: NaiveDateTime,
    ) -> AnomalyReport {
        let mut anomalies = speed_anomalies(history);
        anomalies.extend(route_deviation(history));
        anomalies.extend(location_dropoff(history, now));
        anomalies.extend(prolonged_inactivity(history));

        debug!(
            samples = history.len(),
            anomalies = anomalies.len(),
            "location anomalies checked"
        );
        AnomalyReport::from_anomalies(anomalies, now)
    }

    pub fn detect_behavior_anomalies(
        &self,
        behavior: &UserBehavior,
        now: NaiveDateTime,
    ) -> AnomalyReport {
        let mut anomalies = Vec::new();

        let communication_gap = behavior.communication_gap_hours(now);
        if communication_gap > 6 {
            anomalies.push(Anomaly {
                kind: AnomalyType::CommunicationSilence,
                severity: AnomalySeverity::Medium,
                description: format!("No communication for {communication_gap} hours"),
                point: None,
                timestamp: behavior.last_communication_time,
                confidence: 0.7,
            });
        }

        let app_usage_gap = behavior.app_usage_gap_hours(now);
        if app_usage_gap > 12 {
            anomalies.push(Anomaly {
                kind: AnomalyType::AppUsageAnomaly,
                severity: AnomalySeverity::Low,
                description: format!("No app usage for {app_usage_gap} hours"),
                point: None,
                timestamp: behavior.last_app_usage_time,
                confidence: 0.6,
            });
        }

        let check_in_gap = behavior.check_in_gap_hours(now);
        if check_in_gap > 24 {
            anomalies.push(Anomaly {
                kind: AnomalyType::MissedCheckIn,
                severity: AnomalySeverity::Medium,
                description: format!("No check-in for {check_in_gap} hours"),
                point: None,
                timestamp: behavior.last_check_in_time,
                confidence: 0.8,
            });
        }

        debug!(
            user_id = %behavior.user_id,
            anomalies = anomalies.len(),
            "behavior anomalies checked"
        );
        AnomalyReport::from_anomalies(anomalies, now)
    }
}

fn speed_anomalies(history: &[LocationSample]) -> Vec<Anomaly> {
    let mut anomalies = Vec::new();

    for pair in history.windows(2) {
        let (previous, current) = (&pair[0], &pair[1]);
        let seconds = (current.timestamp - previous.timestamp).num_seconds();
        if seconds <= 0 {
            continue;
        }

        let speed_kmh = previous.point.distance_m(&current.point) / seconds as f64 * 3.6;

        if speed_kmh > MAX_PLAUSIBLE_SPEED_KMH {
            anomalies.push(Anomaly {
                kind: AnomalyType::SpeedAnomaly,
                severity: AnomalySeverity::High,
                description: format!(
                    "Unusually high speed detected: {} km/h",
                    speed_kmh as i64
                ),
                point: Some(current.point),
                timestamp: current.timestamp,
                confidence: 0.9,
            });
        }

        if speed_kmh < 1.0 && seconds > 3600 {
            anomalies.push(Anomaly {
                kind: AnomalyType::SpeedAnomaly,
                severity: AnomalySeverity::Medium,
                description: format!(
                    "Prolonged low speed detected: {} km/h for {} hours",
                    speed_kmh as i64,
                    seconds / 3600
                ),
                point: Some(current.point),
                timestamp: current.timestamp,
                confidence: 0.7,
            });
        }
    }

    anomalies
}

/// Distance of the middle of the last three samples from the straight-line midpoint.
fn route_deviation(history: &[LocationSample]) -> Option<Anomaly> {
    if history.len() < 3 {
        return None;
    }

    let recent = &history[history.len() - 3..];
    let expected = recent[0].point.midpoint(&recent[2].point);
    let deviation = expected.distance_m(&recent[1].point);

    (deviation > ROUTE_DEVIATION_LIMIT_M).then(|| Anomaly {
        kind: AnomalyType::RouteDeviation,
        severity: AnomalySeverity::Medium,
        description: format!(
            "Significant route deviation detected: {}m",
            deviation as i64
        ),
        point: Some(recent[2].point),
        timestamp: recent[2].timestamp,
        confidence: 0.8,
    })
}

fn location_dropoff(history: &[LocationSample], now: NaiveDateTime) -> Option<Anomaly> {
    let last = history.last()?;
    let hours = (now - last.timestamp).num_hours();

    (hours > DROPOFF_HOURS).then(|| Anomaly {
        kind: AnomalyType::LocationDropoff,
        severity: AnomalySeverity::High,
        description: format!("No location updates for {hours} hours"),
        point: Some(last.point),
        timestamp: last.timestamp,
        confidence: 0.9,
    })
}

fn prolonged_inactivity(history: &[LocationSample]) -> Option<Anomaly> {
    if history.len() < 2 {
        return None;
    }

    let recent = &history[history.len().saturating_sub(INACTIVITY_LOOKBACK)..];
    let longest_gap = recent
        .windows(2)
        .map(|pair| (pair[1].timestamp - pair[0].timestamp).num_hours())
        .max()
        .unwrap_or(0);
    let last = recent.last()?;

    (longest_gap > INACTIVITY_HOURS).then(|| Anomaly {
        kind: AnomalyType::ProlongedInactivity,
        severity: AnomalySeverity::Medium,
        description: format!("Prolonged inactivity detected: {longest_gap} hours"),
        point: Some(last.point),
        timestamp: last.timestamp,
        confidence: 0.8,
    })
}

fn overall_severity(anomalies: &[Anomaly]) -> AnomalySeverity {
    let high = anomalies
        .iter()
        .filter(|anomaly| anomaly.severity == AnomalySeverity::High)
        .count();
    let medium = anomalies
        .iter()
        .filter(|anomaly| anomaly.severity == AnomalySeverity::Medium)
        .count();

    if high > 0 {
        AnomalySeverity::High
    } else if medium > 1 {
        AnomalySeverity::Medium
    } else {
        AnomalySeverity::Low
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 15)
            .expect("valid date")
            .and_hms_opt(hour, minute, 0)
            .expect("valid time")
    }

    fn sample(latitude: f64, longitude: f64, timestamp: NaiveDateTime) -> LocationSample {
        LocationSample {
            point: GeoPoint::new(latitude, longitude),
            timestamp,
        }
    }

    fn kinds(report: &AnomalyReport) -> Vec<AnomalyType> {
        report.anomalies.iter().map(|anomaly| anomaly.kind).collect()
    }

    #[test]
    fn steady_walk_is_clean() {
        let history = [
            sample(31.6200, 74.8765, at(10, 0)),
            sample(31.6210, 74.8770, at(10, 10)),
            sample(31.6220, 74.8775, at(10, 20)),
        ];

        let report = AnomalyDetector::new().detect_location_anomalies(&history, at(10, 30));

        assert!(report.anomalies.is_empty());
        assert_eq!(report.severity, AnomalySeverity::Low);
        assert_eq!(report.confidence, 0.0);
        assert_eq!(report.timestamp, at(10, 30));
    }

    #[test]
    fn flags_implausible_speed() {
        // one degree of longitude on the equator in 30 minutes
        let history = [sample(0.0, 0.0, at(10, 0)), sample(0.0, 1.0, at(10, 30))];

        let report = AnomalyDetector::new().detect_location_anomalies(&history, at(10, 31));

        assert_eq!(kinds(&report), vec![AnomalyType::SpeedAnomaly]);
        assert_eq!(report.anomalies[0].severity, AnomalySeverity::High);
        assert_eq!(
            report.anomalies[0].description,
            "Unusually high speed detected: 222 km/h"
        );
        assert_eq!(report.severity, AnomalySeverity::High);
    }

    #[test]
    fn flags_prolonged_low_speed() {
        let history = [sample(31.62, 74.87, at(8, 0)), sample(31.62, 74.87, at(10, 0))];

        let report = AnomalyDetector::new().detect_location_anomalies(&history, at(10, 5));

        assert_eq!(kinds(&report), vec![AnomalyType::SpeedAnomaly]);
        assert_eq!(
            report.anomalies[0].description,
            "Prolonged low speed detected: 0 km/h for 2 hours"
        );
        assert_eq!(report.severity, AnomalySeverity::Low);
    }

    #[test]
    fn flags_route_deviation() {
        let history = [
            sample(31.60, 74.87, at(10, 0)),
            sample(31.62, 74.88, at(10, 10)),
            sample(31.60, 74.89, at(10, 20)),
        ];

        let report = AnomalyDetector::new().detect_location_anomalies(&history, at(10, 25));

        assert_eq!(kinds(&report), vec![AnomalyType::RouteDeviation]);
        assert_eq!(report.anomalies[0].point, Some(history[2].point));
        assert!((report.confidence - 0.8).abs() < 1e-9);
    }

    #[test]
    fn flags_dropoff_and_inactivity() {
        let history = [
            sample(31.62, 74.87, at(0, 0)),
            sample(31.62, 74.87, at(0, 30)),
            sample(31.62, 74.87, at(7, 45)),
        ];
        let now = at(7, 45) + Duration::hours(5);

        let report = AnomalyDetector::new().detect_location_anomalies(&history, now);

        assert_eq!(
            kinds(&report),
            vec![
                AnomalyType::SpeedAnomaly,
                AnomalyType::LocationDropoff,
                AnomalyType::ProlongedInactivity,
            ]
        );
        assert_eq!(
            report.anomalies[2].description,
            "Prolonged inactivity detected: 7 hours"
        );
        assert_eq!(report.severity, AnomalySeverity::High);
    }

    #[test]
    fn behavior_gaps_raise_anomalies() {
        let now = at(20, 0);
        let behavior = UserBehavior {
            user_id: "traveler-7".to_string(),
            last_communication_time: now - Duration::hours(7),
            last_app_usage_time: now - Duration::hours(13),
            last_check_in_time: now - Duration::hours(25),
            average_app_usage_minutes: 20,
            communication_frequency_hours: 4,
        };

        let report = AnomalyDetector::new().detect_behavior_anomalies(&behavior, now);

        assert_eq!(
            kinds(&report),
            vec![
                AnomalyType::CommunicationSilence,
                AnomalyType::AppUsageAnomaly,
                AnomalyType::MissedCheckIn,
            ]
        );
        assert_eq!(report.severity, AnomalySeverity::Medium);
        assert!((report.confidence - 0.7).abs() < 1e-9);
        assert_eq!(report.anomalies[2].timestamp, behavior.last_check_in_time);
    }

    #[test]
    fn single_medium_anomaly_stays_low_overall() {
        let now = at(20, 0);
        let behavior = UserBehavior {
            user_id: String::new(),
            last_communication_time: now - Duration::hours(8),
            last_app_usage_time: now,
            last_check_in_time: now,
            average_app_usage_minutes: 0,
            communication_frequency_hours: 0,
        };

        let report = AnomalyDetector::new().detect_behavior_anomalies(&behavior, now);

        assert_eq!(kinds(&report), vec![AnomalyType::CommunicationSilence]);
        assert_eq!(report.severity, AnomalySeverity::Low);
    }
}
