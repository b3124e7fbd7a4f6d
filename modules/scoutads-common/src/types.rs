use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ScoutAdsError;

// --- Enums ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MediaType {
    Image,
    Video,
    Carousel,
}

impl MediaType {
    pub const ALL: [MediaType; 3] = [MediaType::Image, MediaType::Video, MediaType::Carousel];

    pub fn as_str(&self) -> &'static str {
        match self {
            MediaType::Image => "image",
            MediaType::Video => "video",
            MediaType::Carousel => "carousel",
        }
    }
}

impl std::fmt::Display for MediaType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for MediaType {
    type Err = ScoutAdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "image" => Ok(MediaType::Image),
            "video" => Ok(MediaType::Video),
            "carousel" => Ok(MediaType::Carousel),
            other => Err(ScoutAdsError::Validation(format!("unknown media type: {other}"))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    Facebook,
    Instagram,
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Facebook, Platform::Instagram];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Facebook => "facebook",
            Platform::Instagram => "instagram",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Platform {
    type Err = ScoutAdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "facebook" => Ok(Platform::Facebook),
            "instagram" => Ok(Platform::Instagram),
            other => Err(ScoutAdsError::Validation(format!("unknown platform: {other}"))),
        }
    }
}

/// Field the result list is ordered by.
///
/// Deserialization is lenient: any unrecognised value becomes `Unknown`,
/// which the sort engine orders by score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortField {
    #[default]
    Score,
    Duplicates,
    DaysActive,
    FirstSeen,
    LastSeen,
    Unknown,
}

impl SortField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortField::Score => "score",
            SortField::Duplicates => "duplicates",
            SortField::DaysActive => "days_active",
            SortField::FirstSeen => "first_seen",
            SortField::LastSeen => "last_seen",
            SortField::Unknown => "unknown",
        }
    }

    pub fn parse_lenient(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "score" => SortField::Score,
            "duplicates" => SortField::Duplicates,
            "days_active" => SortField::DaysActive,
            "first_seen" => SortField::FirstSeen,
            "last_seen" => SortField::LastSeen,
            _ => SortField::Unknown,
        }
    }
}

impl std::fmt::Display for SortField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortField {
    type Err = ScoutAdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(SortField::parse_lenient(s))
    }
}

impl Serialize for SortField {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for SortField {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Ok(SortField::parse_lenient(&raw))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for SortOrder {
    type Err = ScoutAdsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "asc" => Ok(SortOrder::Asc),
            "desc" => Ok(SortOrder::Desc),
            other => Err(ScoutAdsError::Validation(format!("unknown sort order: {other}"))),
        }
    }
}

// --- Creative ---

/// One detected ad creative: a distinct ad unit plus everything collapsed into it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Creative {
    pub creative_id: String,
    pub fingerprint_text: String,
    pub fingerprint_media: String,
    pub first_seen: DateTime<Utc>,
    pub last_seen: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_path: Option<String>,
    pub media_type: MediaType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub perceptual_hash: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
    #[serde(default)]
    pub preview_url: String,
    pub count_duplicates: u32,
    /// Upstream ranking value, 0-100. Not reconciled with `ScoreBreakdown::total_score`.
    pub score: u8,
    pub countries: Vec<String>,
    pub advertiser: String,
    pub snippet: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub landing_url: Option<String>,
    pub platform: Platform,
    pub days_active: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub engagement_proxy: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub velocity: Option<f64>,
}

impl Creative {
    /// Text the free-form query is matched against.
    pub fn searchable_text(&self) -> String {
        [
            self.text.as_str(),
            self.headline.as_deref().unwrap_or(""),
            self.advertiser.as_str(),
            self.snippet.as_str(),
        ]
        .join(" ")
    }
}

// --- Search filters ---

/// User-facing filter specification. Round-trips through JSON for the
/// preference store; missing fields take the dashboard defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct SearchFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    pub min_duplicates: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_duplicates: Option<u32>,
    pub countries: Vec<String>,
    pub platforms: Vec<Platform>,
    pub media_types: Vec<MediaType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_score: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub landing_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advertiser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min_days_active: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_days_active: Option<u32>,
    pub sort_by: SortField,
    pub sort_order: SortOrder,
}

pub const DEFAULT_MIN_DUPLICATES: u32 = 5;

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: None,
            min_duplicates: DEFAULT_MIN_DUPLICATES,
            max_duplicates: None,
            countries: Vec::new(),
            platforms: Platform::ALL.to_vec(),
            media_types: MediaType::ALL.to_vec(),
            date_from: None,
            date_to: None,
            min_score: None,
            max_score: None,
            landing_domain: None,
            advertiser: None,
            min_days_active: None,
            max_days_active: None,
            sort_by: SortField::Score,
            sort_order: SortOrder::Desc,
        }
    }
}

impl SearchFilters {
    /// Enforce `min_duplicates >= 1` and drop blank strings, so that a blank
    /// text box never acts as a filter.
    pub fn normalized(mut self) -> Self {
        self.min_duplicates = self.min_duplicates.max(1);
        for field in [&mut self.query, &mut self.landing_domain, &mut self.advertiser] {
            if field.as_deref().is_some_and(|s| s.trim().is_empty()) {
                *field = None;
            }
        }
        self
    }

    /// Number of filters that narrow the result set beyond the defaults.
    pub fn active_filter_count(&self) -> usize {
        [
            self.query.is_some(),
            self.min_duplicates > DEFAULT_MIN_DUPLICATES,
            self.max_duplicates.is_some(),
            !self.countries.is_empty(),
            self.platforms.len() < Platform::ALL.len(),
            self.media_types.len() < MediaType::ALL.len(),
            self.date_from.is_some(),
            self.date_to.is_some(),
            self.advertiser.is_some(),
            self.landing_domain.is_some(),
            self.min_score.is_some(),
            self.max_score.is_some(),
            self.min_days_active.is_some(),
            self.max_days_active.is_some(),
        ]
        .into_iter()
        .filter(|active| *active)
        .count()
    }

    /// Apply one of the one-click presets offered next to the search box.
    pub fn with_quick_filter(mut self, quick: QuickFilter) -> Self {
        match quick {
            QuickFilter::MinDuplicates10 => self.min_duplicates = 10,
            QuickFilter::MinDuplicates20 => self.min_duplicates = 20,
            QuickFilter::BrazilOnly => self.countries = vec!["BR".to_string()],
            QuickFilter::VideosOnly => self.media_types = vec![MediaType::Video],
            QuickFilter::Score80Plus => self.min_score = Some(80),
        }
        self
    }
}

/// Toggle membership of `item` in a filter list, keeping the remaining order.
pub fn toggle_member<T: PartialEq>(list: &mut Vec<T>, item: T) {
    if let Some(pos) = list.iter().position(|x| *x == item) {
        list.remove(pos);
    } else {
        list.push(item);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum QuickFilter {
    MinDuplicates10,
    MinDuplicates20,
    BrazilOnly,
    VideosOnly,
    Score80Plus,
}

// --- Aggregates ---

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AdvertiserCount {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CountryCount {
    pub code: String,
    pub name: String,
    pub count: usize,
}

/// Per-country statistics shown on the landing page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CountryData {
    pub code: String,
    pub name: String,
    pub flag: String,
    pub ad_count: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub growth_rate: Option<f64>,
}

// --- Search boundary ---

/// What a search returns to the front end: matching creatives in display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SearchResponse {
    pub items: Vec<Creative>,
    pub total: usize,
    pub filters_applied: SearchFilters,
    pub search_time_ms: u64,
}
