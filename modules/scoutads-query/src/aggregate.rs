//! Sidebar aggregations over a result set.
//!
//! Counts are accumulated in first-occurrence order and sorted with a stable
//! sort, so equal counts always rank by which key appeared first in the input.

use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use scoutads_common::{
    country_name, AdvertiserCount, CountryCount, Creative, MediaType, Platform, TOP_N,
};

pub fn top_advertisers(creatives: &[Creative]) -> Vec<AdvertiserCount> {
    top_advertisers_n(creatives, TOP_N)
}

/// One creative is one occurrence; no fingerprint dedup.
pub fn top_advertisers_n(creatives: &[Creative], limit: usize) -> Vec<AdvertiserCount> {
    ranked_counts(creatives.iter().map(|c| c.advertiser.as_str()), limit)
        .into_iter()
        .map(|(name, count)| AdvertiserCount {
            name: name.to_string(),
            count,
        })
        .collect()
}

pub fn top_countries(creatives: &[Creative]) -> Vec<CountryCount> {
    top_countries_n(creatives, TOP_N)
}

/// A creative seen in several countries counts once for each of them.
pub fn top_countries_n(creatives: &[Creative], limit: usize) -> Vec<CountryCount> {
    let codes = creatives
        .iter()
        .flat_map(|c| c.countries.iter().map(String::as_str));
    ranked_counts(codes, limit)
        .into_iter()
        .map(|(code, count)| CountryCount {
            code: code.to_string(),
            name: country_name(code),
            count,
        })
        .collect()
}

/// Count keys, rank by count descending, ties by first occurrence.
fn ranked_counts<'a>(keys: impl Iterator<Item = &'a str>, limit: usize) -> Vec<(&'a str, usize)> {
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut counts: Vec<(&'a str, usize)> = Vec::new();

    for key in keys {
        match index.get(key) {
            Some(&i) => counts[i].1 += 1,
            None => {
                index.insert(key, counts.len());
                counts.push((key, 1));
            }
        }
    }

    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

// ---------------------------------------------------------------------------
// Result header summary
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ResultSummary {
    pub total: usize,
    pub average_score: f64,
    pub total_duplicates: u64,
    pub by_media_type: Vec<(MediaType, usize)>,
    pub by_platform: Vec<(Platform, usize)>,
}

pub fn summarize(creatives: &[Creative]) -> ResultSummary {
    let total = creatives.len();
    let score_sum: u64 = creatives.iter().map(|c| u64::from(c.score)).sum();
    let average_score = if total == 0 {
        0.0
    } else {
        score_sum as f64 / total as f64
    };

    ResultSummary {
        total,
        average_score,
        total_duplicates: creatives.iter().map(|c| u64::from(c.count_duplicates)).sum(),
        by_media_type: MediaType::ALL
            .iter()
            .map(|m| (*m, creatives.iter().filter(|c| c.media_type == *m).count()))
            .collect(),
        by_platform: Platform::ALL
            .iter()
            .map(|p| (*p, creatives.iter().filter(|c| c.platform == *p).count()))
            .collect(),
    }
}
