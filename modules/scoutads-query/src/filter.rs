//! Filter engine.
//!
//! A creative is kept iff it satisfies every active predicate in the
//! `SearchFilters`. Absent bounds and empty sets impose no constraint.
//! Output preserves input order; sorting happens afterwards.

use scoutads_common::{landing_host, Creative, SearchFilters};

// ---------------------------------------------------------------------------
// Public entry points
// ---------------------------------------------------------------------------

/// Narrow `creatives` to those matching `filters`, keeping input order.
pub fn filter_creatives(creatives: &[Creative], filters: &SearchFilters) -> Vec<Creative> {
    let kept: Vec<Creative> = creatives
        .iter()
        .filter(|c| matches(c, filters))
        .cloned()
        .collect();

    tracing::debug!(
        input = creatives.len(),
        kept = kept.len(),
        "Filtered creatives"
    );
    kept
}

/// Whether a single creative passes every active predicate.
pub fn matches(creative: &Creative, filters: &SearchFilters) -> bool {
    duplicates_in_range(creative, filters)
        && shares_country(creative, filters)
        && platform_allowed(creative, filters)
        && media_type_allowed(creative, filters)
        && query_matches(creative, filters)
        && within_dates(creative, filters)
        && score_in_range(creative, filters)
        && days_active_in_range(creative, filters)
        && landing_domain_matches(creative, filters)
        && advertiser_matches(creative, filters)
}

// ---------------------------------------------------------------------------
// Predicates
// ---------------------------------------------------------------------------

fn duplicates_in_range(c: &Creative, f: &SearchFilters) -> bool {
    c.count_duplicates >= f.min_duplicates
        && f.max_duplicates.map_or(true, |max| c.count_duplicates <= max)
}

fn shares_country(c: &Creative, f: &SearchFilters) -> bool {
    f.countries.is_empty() || c.countries.iter().any(|code| f.countries.contains(code))
}

fn platform_allowed(c: &Creative, f: &SearchFilters) -> bool {
    f.platforms.is_empty() || f.platforms.contains(&c.platform)
}

fn media_type_allowed(c: &Creative, f: &SearchFilters) -> bool {
    f.media_types.is_empty() || f.media_types.contains(&c.media_type)
}

fn query_matches(c: &Creative, f: &SearchFilters) -> bool {
    match text_filter(&f.query) {
        Some(q) => contains_ignore_case(&c.searchable_text(), q),
        None => true,
    }
}

/// `date_from` bounds `first_seen`, `date_to` bounds `last_seen`.
fn within_dates(c: &Creative, f: &SearchFilters) -> bool {
    f.date_from.map_or(true, |from| c.first_seen >= from)
        && f.date_to.map_or(true, |to| c.last_seen <= to)
}

fn score_in_range(c: &Creative, f: &SearchFilters) -> bool {
    f.min_score.map_or(true, |min| c.score >= min) && f.max_score.map_or(true, |max| c.score <= max)
}

fn days_active_in_range(c: &Creative, f: &SearchFilters) -> bool {
    f.min_days_active.map_or(true, |min| c.days_active >= min)
        && f.max_days_active.map_or(true, |max| c.days_active <= max)
}

/// A missing or unparsable landing URL never matches a domain filter.
fn landing_domain_matches(c: &Creative, f: &SearchFilters) -> bool {
    let Some(domain) = text_filter(&f.landing_domain) else {
        return true;
    };
    match c.landing_url.as_deref().and_then(landing_host) {
        Some(host) => contains_ignore_case(&host, domain),
        None => false,
    }
}

fn advertiser_matches(c: &Creative, f: &SearchFilters) -> bool {
    match text_filter(&f.advertiser) {
        Some(name) => contains_ignore_case(&c.advertiser, name),
        None => true,
    }
}

/// A blank text box is no filter at all.
fn text_filter(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.trim().is_empty())
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;
    use scoutads_common::{MediaType, Platform};

    fn creative() -> Creative {
        Creative {
            creative_id: "c1".into(),
            fingerprint_text: "ft".into(),
            fingerprint_media: "fm".into(),
            first_seen: "2024-01-10T08:00:00Z".parse().unwrap(),
            last_seen: "2024-01-22T18:45:00Z".parse().unwrap(),
            storage_path: None,
            media_type: MediaType::Video,
            perceptual_hash: None,
            sha256: None,
            preview_url: String::new(),
            count_duplicates: 45,
            score: 92,
            countries: vec!["BR".into(), "US".into()],
            advertiser: "Crypto Academy".into(),
            snippet: "Aprenda a ganhar...".into(),
            headline: Some("Do Zero ao Primeiro Bitcoin".into()),
            text: "Curso completo de criptomoedas.".into(),
            landing_url: Some("https://cryptoacademy.com/curso".into()),
            platform: Platform::Facebook,
            days_active: 12,
            engagement_proxy: Some(2890.0),
            velocity: Some(4.1),
        }
    }

    #[test]
    fn default_filters_keep_creative_above_min_duplicates() {
        assert!(matches(&creative(), &SearchFilters::default()));
    }

    #[test]
    fn blank_text_filters_impose_no_constraint() {
        let mut no_url = creative();
        no_url.landing_url = None;
        for blank in ["", "   "] {
            let filters = SearchFilters {
                query: Some(blank.into()),
                landing_domain: Some(blank.into()),
                advertiser: Some(blank.into()),
                ..SearchFilters::default()
            };
            assert!(matches(&no_url, &filters), "{blank:?}");
            assert!(matches(&creative(), &filters), "{blank:?}");
        }
    }

    #[test]
    fn duplicate_bounds_are_inclusive() {
        let c = creative();
        let exact = SearchFilters {
            min_duplicates: 45,
            max_duplicates: Some(45),
            ..SearchFilters::default()
        };
        assert!(matches(&c, &exact));

        let above = SearchFilters {
            min_duplicates: 46,
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &above));

        let below = SearchFilters {
            max_duplicates: Some(44),
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &below));
    }

    #[test]
    fn empty_sets_are_unrestricted() {
        let f = SearchFilters {
            countries: vec![],
            platforms: vec![],
            media_types: vec![],
            min_duplicates: 1,
            ..SearchFilters::default()
        };
        assert!(matches(&creative(), &f));
    }

    #[test]
    fn non_empty_sets_require_membership() {
        let c = creative();
        let country_hit = SearchFilters {
            countries: vec!["PT".into(), "US".into()],
            ..SearchFilters::default()
        };
        assert!(matches(&c, &country_hit));

        let country_miss = SearchFilters {
            countries: vec!["PT".into()],
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &country_miss));

        let platform_miss = SearchFilters {
            platforms: vec![Platform::Instagram],
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &platform_miss));

        let media_miss = SearchFilters {
            media_types: vec![MediaType::Image, MediaType::Carousel],
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &media_miss));
    }

    #[test]
    fn query_is_case_insensitive_across_text_fields() {
        let c = creative();
        for q in ["BITCOIN", "crypto academy", "aprenda", "criptomoedas"] {
            let f = SearchFilters {
                query: Some(q.into()),
                ..SearchFilters::default()
            };
            assert!(matches(&c, &f), "query {q:?} should match");
        }
        let f = SearchFilters {
            query: Some("imóveis".into()),
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &f));
    }

    #[test]
    fn date_from_bounds_first_seen_and_date_to_bounds_last_seen() {
        let c = creative();
        let inside = SearchFilters {
            date_from: Some("2024-01-10T08:00:00Z".parse().unwrap()),
            date_to: Some("2024-01-22T18:45:00Z".parse().unwrap()),
            ..SearchFilters::default()
        };
        assert!(matches(&c, &inside));

        let late_start = SearchFilters {
            date_from: Some("2024-01-11T00:00:00Z".parse().unwrap()),
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &late_start));

        let early_end = SearchFilters {
            date_to: Some("2024-01-20T00:00:00Z".parse().unwrap()),
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &early_end));
    }

    #[test]
    fn score_and_days_bounds_are_inclusive() {
        let c = creative();
        let f = SearchFilters {
            min_score: Some(92),
            max_score: Some(92),
            min_days_active: Some(12),
            max_days_active: Some(12),
            ..SearchFilters::default()
        };
        assert!(matches(&c, &f));

        let f = SearchFilters {
            min_score: Some(93),
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &f));

        let f = SearchFilters {
            max_days_active: Some(11),
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &f));
    }

    #[test]
    fn zero_score_bound_is_still_a_bound() {
        let mut c = creative();
        c.score = 0;
        let f = SearchFilters {
            max_score: Some(0),
            ..SearchFilters::default()
        };
        assert!(matches(&c, &f));
    }

    #[test]
    fn landing_domain_matches_hostname_only() {
        let c = creative();
        let host = SearchFilters {
            landing_domain: Some("CryptoAcademy".into()),
            ..SearchFilters::default()
        };
        assert!(matches(&c, &host));

        let path_only = SearchFilters {
            landing_domain: Some("curso".into()),
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &path_only));
    }

    #[test]
    fn landing_domain_excludes_missing_or_malformed_urls() {
        let f = SearchFilters {
            landing_domain: Some("cryptoacademy".into()),
            ..SearchFilters::default()
        };

        let mut missing = creative();
        missing.landing_url = None;
        assert!(!matches(&missing, &f));

        let mut malformed = creative();
        malformed.landing_url = Some("cryptoacademy.com/curso".into());
        assert!(!matches(&malformed, &f));

        // Without the domain filter the same creatives pass.
        assert!(matches(&missing, &SearchFilters::default()));
        assert!(matches(&malformed, &SearchFilters::default()));
    }

    #[test]
    fn advertiser_is_case_insensitive_substring() {
        let c = creative();
        let f = SearchFilters {
            advertiser: Some("academy".into()),
            ..SearchFilters::default()
        };
        assert!(matches(&c, &f));
        let f = SearchFilters {
            advertiser: Some("Trade".into()),
            ..SearchFilters::default()
        };
        assert!(!matches(&c, &f));
    }

    #[test]
    fn filter_preserves_input_order() {
        let mut a = creative();
        a.creative_id = "a".into();
        a.score = 10;
        let mut b = creative();
        b.creative_id = "b".into();
        b.count_duplicates = 1;
        let mut c = creative();
        c.creative_id = "c".into();
        c.score = 99;

        let kept = filter_creatives(&[a, b, c], &SearchFilters::default());
        let ids: Vec<&str> = kept.iter().map(|c| c.creative_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
