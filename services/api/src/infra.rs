use chrono::{Duration, NaiveDateTime};
use metrics_exporter_prometheus::PrometheusHandle;
use safepilgrim::safety::domain::{GeoPoint, WeatherCondition};
use safepilgrim::safety::prediction::{
    CrowdDensityData, CrowdTrend, DataSourceError, EventType, HistoricalIncident,
    IncidentSeverity, IncidentType, LocalEvent, RiskDataSource, TimeWindow, WeatherForecast,
};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Fixed feeds used until real incident, weather, crowd, and event providers are wired in.
#[derive(Debug, Clone)]
pub(crate) struct StaticRiskDataSource {
    forecast: WeatherForecast,
    crowd: CrowdDensityData,
    events: Vec<LocalEvent>,
}

impl Default for StaticRiskDataSource {
    fn default() -> Self {
        Self {
            forecast: WeatherForecast {
                condition: WeatherCondition::Clear,
                temperature: 25.0,
                humidity: 60.0,
                wind_speed: 10.0,
                precipitation: 0.0,
            },
            crowd: CrowdDensityData {
                density: 70.0,
                trend: CrowdTrend::Increasing,
            },
            events: vec![LocalEvent {
                name: "Local Festival".to_string(),
                expected_crowd: 5000,
                event_type: EventType::Festival,
            }],
        }
    }
}

impl RiskDataSource for StaticRiskDataSource {
    fn incidents(
        &self,
        point: &GeoPoint,
        window: &TimeWindow,
    ) -> Result<Vec<HistoricalIncident>, DataSourceError> {
        // Reported within a few hundred meters of the query point. Incidents that would
        // predate the calendar range are left out.
        let reported = |days: i64| window.start.checked_sub_signed(Duration::days(days));
        let mut incidents = Vec::with_capacity(2);

        if let Some(timestamp) = reported(2) {
            incidents.push(HistoricalIncident {
                point: GeoPoint::new(point.latitude + 0.001, point.longitude + 0.001),
                incident_type: IncidentType::Theft,
                severity: IncidentSeverity::Medium,
                timestamp,
                description: "Pickpocketing reported".to_string(),
            });
        }
        if let Some(timestamp) = reported(5) {
            incidents.push(HistoricalIncident {
                point: GeoPoint::new(point.latitude - 0.002, point.longitude + 0.001),
                incident_type: IncidentType::Accident,
                severity: IncidentSeverity::Low,
                timestamp,
                description: "Minor traffic accident".to_string(),
            });
        }

        Ok(incidents)
    }

    fn weather_forecast(
        &self,
        _point: &GeoPoint,
        _window: &TimeWindow,
    ) -> Result<WeatherForecast, DataSourceError> {
        Ok(self.forecast)
    }

    fn crowd_density(
        &self,
        _point: &GeoPoint,
        _window: &TimeWindow,
    ) -> Result<CrowdDensityData, DataSourceError> {
        Ok(self.crowd)
    }

    fn local_events(
        &self,
        _point: &GeoPoint,
        _window: &TimeWindow,
    ) -> Result<Vec<LocalEvent>, DataSourceError> {
        Ok(self.events.clone())
    }
}

/// Accepts `YYYY-MM-DDTHH:MM[:SS]` or the same with a space separator.
pub(crate) fn parse_datetime(raw: &str) -> Result<NaiveDateTime, String> {
    let trimmed = raw.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(trimmed, format).ok())
        .ok_or_else(|| format!("failed to parse '{raw}' as YYYY-MM-DDTHH:MM[:SS]"))
}
