mod confidence;
pub(crate) mod recommendations;
mod rules;

#[cfg(test)]
mod tests;

pub use confidence::estimate_confidence;
pub use recommendations::generate_recommendations;
pub use rules::{ai_adjustment, base_score, behavior_score, real_time_risk};

use super::domain::{EnhancedSafetyScore, RealTimeData, SafetyInputs, SafetyLabel, UserBehavior};
use chrono::NaiveDateTime;
use tracing::debug;

pub const BASE_WEIGHT: f64 = 0.4;
pub const AI_WEIGHT: f64 = 0.3;
pub const BEHAVIOR_WEIGHT: f64 = 0.2;
/// Subtracted rather than added: more live risk lowers the score.
pub const REAL_TIME_RISK_WEIGHT: f64 = 0.1;

/// Stateless evaluator combining the four sub-scores into a bounded safety score.
#[derive(Debug, Clone, Copy, Default)]
pub struct SafetyScoreEngine;

impl SafetyScoreEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn compute(
        &self,
        inputs: &SafetyInputs,
        real_time: &RealTimeData,
        behavior: &UserBehavior,
        now: NaiveDateTime,
    ) -> EnhancedSafetyScore {
        let base_score = rules::base_score(inputs);
        let ai_adjustment = rules::ai_adjustment(real_time, behavior, now);
        let behavior_score = rules::behavior_score(behavior, now);
        let real_time_risk = rules::real_time_risk(real_time);

        let score = combine_scores(base_score, ai_adjustment, behavior_score, real_time_risk);
        let recommendations = generate_recommendations(score, real_time, behavior, now);
        let confidence = estimate_confidence(inputs, real_time, behavior, now);

        debug!(
            user_id = %behavior.user_id,
            score,
            base_score,
            ai_adjustment,
            behavior_score,
            real_time_risk,
            confidence,
            "safety score computed"
        );

        EnhancedSafetyScore {
            score,
            base_score,
            ai_adjustment,
            behavior_score,
            real_time_risk,
            label: SafetyLabel::for_score(score),
            recommendations,
            confidence,
            timestamp: now,
        }
    }
}

/// Weighted combination clamped to 0..=100.
///
/// The additive weights sum to 0.9, so a perfect base and behavior score with a
/// neutral adjustment tops out below 100.
pub fn combine_scores(
    base_score: f64,
    ai_adjustment: f64,
    behavior_score: f64,
    real_time_risk: f64,
) -> f64 {
    let combined = base_score * BASE_WEIGHT
        + ai_adjustment * AI_WEIGHT
        + behavior_score * BEHAVIOR_WEIGHT
        - real_time_risk * REAL_TIME_RISK_WEIGHT;

    combined.clamp(0.0, 100.0)
}

/// Entry point for callers that do not keep an engine around.
pub fn compute_safety_score(
    inputs: &SafetyInputs,
    real_time: &RealTimeData,
    behavior: &UserBehavior,
    now: NaiveDateTime,
) -> EnhancedSafetyScore {
    SafetyScoreEngine::new().compute(inputs, real_time, behavior, now)
}
