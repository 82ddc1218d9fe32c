//! Integer-only score over the static trip inputs, shown before live data arrives.

use super::domain::SafetyInputs;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuickRiskLevel {
    Low,
    Moderate,
    High,
}

impl QuickRiskLevel {
    fn for_score(score: u8) -> Self {
        if score >= 70 {
            Self::Low
        } else if score >= 40 {
            Self::Moderate
        } else {
            Self::High
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickSafetyScore {
    /// 0..=100, higher is safer.
    pub score: u8,
    pub level: QuickRiskLevel,
}

pub fn quick_score(inputs: &SafetyInputs) -> QuickSafetyScore {
    let area_penalty = (i64::from(inputs.area_risk_level) - 1) * 12;
    let night_penalty = if inputs.is_night_time { 10 } else { 0 };
    let solo_penalty = if inputs.is_solo_travel { 10 } else { 0 };
    let history_penalty = (f64::from(inputs.incident_history_score) * 0.3) as i64;
    let weather_penalty = (f64::from(inputs.weather_risk_score) * 0.3) as i64;

    let penalties = area_penalty + night_penalty + solo_penalty + history_penalty + weather_penalty;
    let score = (100 - penalties).clamp(0, 100) as u8;

    QuickSafetyScore {
        score,
        level: QuickRiskLevel::for_score(score),
    }
}
