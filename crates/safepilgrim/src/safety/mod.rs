//! Tourist safety scoring, risk prediction, and anomaly detection.

pub mod anomaly;
pub mod domain;
pub mod engine;
pub mod prediction;
pub mod quick;
pub mod router;

pub use anomaly::{
    Anomaly, AnomalyDetector, AnomalyReport, AnomalySeverity, AnomalyType, LocationSample,
};
pub use domain::{
    DayPeriod, EmergencyServicesStatus, EnhancedSafetyScore, GeoPoint, PoliticalSituation,
    PublicTransportStatus, RealTimeData, SafetyInputs, SafetyLabel, TrafficCondition,
    UserBehavior, WeatherCondition,
};
pub use engine::{compute_safety_score, SafetyScoreEngine};
pub use prediction::{
    DataSourceError, PredictionError, RiskDataSource, RiskLevel, RiskPrediction, RiskPredictor,
    RiskTrend, RouteRiskPrediction, TimeRange, TimeWindow, UserProfile,
};
pub use quick::{quick_score, QuickRiskLevel, QuickSafetyScore};
pub use router::{safety_router, ScoreRequest};
