use serde::{Deserialize, Serialize};
use schemars::JsonSchema;

/// Duplicate count at which the variation sub-score saturates.
pub const VARIATION_SATURATION: f64 = 50.0;

/// Country count at which the reach sub-score saturates.
pub const COUNTRY_SATURATION: f64 = 5.0;

/// Days active at which the duration sub-score saturates.
pub const DURATION_SATURATION_DAYS: f64 = 30.0;

/// Engagement proxy at which the engagement sub-score saturates.
pub const ENGAGEMENT_SATURATION: f64 = 5000.0;

/// Engagement sub-score used when a creative has no engagement proxy.
pub const ENGAGEMENT_FALLBACK_SCORE: f64 = 50.0;

/// Recency points lost per day active.
pub const RECENCY_DECAY_PER_DAY: f64 = 2.0;

/// Sidebar lists (advertisers, countries) show this many entries.
pub const TOP_N: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreWeights {
    pub variation: f64,
    pub country: f64,
    pub duration: f64,
    pub engagement: f64,
    pub recency: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            variation: 0.3,
            country: 0.2,
            duration: 0.2,
            engagement: 0.2,
            recency: 0.1,
        }
    }
}

impl ScoreWeights {
    pub fn sum(&self) -> f64 {
        self.variation + self.country + self.duration + self.engagement + self.recency
    }
}

/// Explanatory decomposition of a creative's composite score.
///
/// Sub-scores are rounded to whole points for display; `total_score` is
/// rounded from the unrounded weighted sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ScoreBreakdown {
    pub variation_score: u8,
    pub country_score: u8,
    pub duration_score: u8,
    pub engagement_score: u8,
    pub recency_score: u8,
    pub total_score: u8,
    pub weights: ScoreWeights,
}

/// Display tier for a 0-100 score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreTier {
    Excellent,
    Good,
    Fair,
    Low,
}

impl ScoreTier {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => ScoreTier::Excellent,
            70..=89 => ScoreTier::Good,
            50..=69 => ScoreTier::Fair,
            _ => ScoreTier::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreTier::Excellent => "Excelente",
            ScoreTier::Good => "Bom",
            ScoreTier::Fair => "Regular",
            ScoreTier::Low => "Baixo",
        }
    }
}

/// Badge shown on a creative card. Finer-grained than `ScoreTier`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum ScoreBadge {
    Viral,
    High,
    Good,
    Medium,
    Low,
}

impl ScoreBadge {
    pub fn from_score(score: u8) -> Self {
        match score {
            90.. => ScoreBadge::Viral,
            80..=89 => ScoreBadge::High,
            70..=79 => ScoreBadge::Good,
            60..=69 => ScoreBadge::Medium,
            _ => ScoreBadge::Low,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ScoreBadge::Viral => "VIRAL",
            ScoreBadge::High => "ALTO",
            ScoreBadge::Good => "BOM",
            ScoreBadge::Medium => "MÉDIO",
            ScoreBadge::Low => "BAIXO",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_weights_sum_to_one() {
        assert!((ScoreWeights::default().sum() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn tiers_follow_thresholds() {
        assert_eq!(ScoreTier::from_score(95), ScoreTier::Excellent);
        assert_eq!(ScoreTier::from_score(90), ScoreTier::Excellent);
        assert_eq!(ScoreTier::from_score(89), ScoreTier::Good);
        assert_eq!(ScoreTier::from_score(50), ScoreTier::Fair);
        assert_eq!(ScoreTier::from_score(49).label(), "Baixo");
    }

    #[test]
    fn badges_follow_thresholds() {
        assert_eq!(ScoreBadge::from_score(92).label(), "VIRAL");
        assert_eq!(ScoreBadge::from_score(81), ScoreBadge::High);
        assert_eq!(ScoreBadge::from_score(76), ScoreBadge::Good);
        assert_eq!(ScoreBadge::from_score(60), ScoreBadge::Medium);
        assert_eq!(ScoreBadge::from_score(10), ScoreBadge::Low);
    }
}
