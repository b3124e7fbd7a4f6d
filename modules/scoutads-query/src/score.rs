use scoutads_common::{
    Creative, ScoreBreakdown, ScoreWeights, COUNTRY_SATURATION, DURATION_SATURATION_DAYS,
    ENGAGEMENT_FALLBACK_SCORE, ENGAGEMENT_SATURATION, RECENCY_DECAY_PER_DAY,
    VARIATION_SATURATION,
};

/// Decompose a creative into five weighted sub-scores.
///
/// Depends only on duplicates, country count, days active and engagement.
/// The stored `score` is never read.
pub fn score_breakdown(creative: &Creative) -> ScoreBreakdown {
    let weights = ScoreWeights::default();

    let variation = saturating(f64::from(creative.count_duplicates), VARIATION_SATURATION);
    let country = saturating(creative.countries.len() as f64, COUNTRY_SATURATION);
    let duration = saturating(f64::from(creative.days_active), DURATION_SATURATION_DAYS);
    let engagement = creative
        .engagement_proxy
        .map(|e| saturating(e, ENGAGEMENT_SATURATION))
        .unwrap_or(ENGAGEMENT_FALLBACK_SCORE);
    let recency =
        (100.0 - f64::from(creative.days_active) * RECENCY_DECAY_PER_DAY).clamp(0.0, 100.0);

    let total = variation * weights.variation
        + country * weights.country
        + duration * weights.duration
        + engagement * weights.engagement
        + recency * weights.recency;

    ScoreBreakdown {
        variation_score: points(variation),
        country_score: points(country),
        duration_score: points(duration),
        engagement_score: points(engagement),
        recency_score: points(recency),
        total_score: points(total),
        weights,
    }
}

/// `value / full * 100`, clamped to [0, 100].
fn saturating(value: f64, full: f64) -> f64 {
    (value / full * 100.0).clamp(0.0, 100.0)
}

fn points(value: f64) -> u8 {
    value.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn saturating_clamps_both_ends() {
        assert_eq!(saturating(25.0, 50.0), 50.0);
        assert_eq!(saturating(500.0, 50.0), 100.0);
        assert_eq!(saturating(-5.0, 50.0), 0.0);
    }

    #[test]
    fn points_round_half_away_from_zero() {
        assert_eq!(points(93.5), 94);
        assert_eq!(points(93.49), 93);
        assert_eq!(points(120.0), 100);
    }
}
