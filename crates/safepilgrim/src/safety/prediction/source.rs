use super::super::domain::GeoPoint;
use super::domain::{CrowdDensityData, HistoricalIncident, LocalEvent, TimeWindow, WeatherForecast};

/// Provider of the location data behind a prediction (incident databases, weather
/// APIs, crowd feeds, event calendars).
pub trait RiskDataSource: Send + Sync {
    fn incidents(
        &self,
        point: &GeoPoint,
        window: &TimeWindow,
    ) -> Result<Vec<HistoricalIncident>, DataSourceError>;

    fn weather_forecast(
        &self,
        point: &GeoPoint,
        window: &TimeWindow,
    ) -> Result<WeatherForecast, DataSourceError>;

    fn crowd_density(
        &self,
        point: &GeoPoint,
        window: &TimeWindow,
    ) -> Result<CrowdDensityData, DataSourceError>;

    fn local_events(
        &self,
        point: &GeoPoint,
        window: &TimeWindow,
    ) -> Result<Vec<LocalEvent>, DataSourceError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DataSourceError {
    #[error("{feed} feed unavailable: {reason}")]
    Unavailable { feed: &'static str, reason: String },
}
