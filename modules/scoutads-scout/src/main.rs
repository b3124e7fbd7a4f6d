use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use scoutads_common::{
    config::load_config, country_flag, format_days_active, format_number, truncate_text, Config,
    MediaType, Platform, QuickFilter, ScoreBadge, ScoreTier, SearchFilters, SortField, SortOrder,
};
use scoutads_scout::Dashboard;
use scoutads_store::fixtures::sample_queries;
use scoutads_store::{CreativeSource, FileStore, FixtureSource, JsonFileSource};

#[derive(Parser)]
#[command(name = "scoutads", about = "Find winning ad creatives")]
struct Cli {
    /// Optional TOML file overriding environment settings.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search creatives, starting from the saved filters.
    Search(SearchArgs),
    /// Show how a creative's quality score breaks down.
    Breakdown { creative_id: String },
    /// Toggle a creative in the saved set.
    Save { creative_id: String },
    /// List saved creatives.
    Saved,
    /// Request a media download (not implemented yet).
    Download { creative_id: String },
    /// Toggle automatic crawling (not implemented yet).
    Crawl,
}

#[derive(Args)]
struct SearchArgs {
    /// Start from default filters instead of the saved ones.
    #[arg(long)]
    reset: bool,
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    min_duplicates: Option<u32>,
    #[arg(long)]
    max_duplicates: Option<u32>,
    /// ISO country code; repeat for several.
    #[arg(long = "country")]
    countries: Vec<String>,
    #[arg(long = "platform")]
    platforms: Vec<Platform>,
    #[arg(long = "media-type")]
    media_types: Vec<MediaType>,
    /// Earliest first-seen date, YYYY-MM-DD.
    #[arg(long, value_parser = parse_day)]
    from: Option<DateTime<Utc>>,
    /// Latest last-seen date, YYYY-MM-DD.
    #[arg(long, value_parser = parse_day)]
    to: Option<DateTime<Utc>>,
    #[arg(long)]
    min_score: Option<u8>,
    #[arg(long)]
    max_score: Option<u8>,
    #[arg(long)]
    min_days_active: Option<u32>,
    #[arg(long)]
    max_days_active: Option<u32>,
    #[arg(long)]
    landing_domain: Option<String>,
    #[arg(long)]
    advertiser: Option<String>,
    #[arg(long, value_parser = parse_quick_filter)]
    quick: Option<QuickFilter>,
    #[arg(long)]
    sort_by: Option<SortField>,
    #[arg(long)]
    order: Option<SortOrder>,
    /// Override the simulated latency for this run.
    #[arg(long)]
    latency_ms: Option<u64>,
    /// Print the search response as JSON.
    #[arg(long)]
    json: bool,
}

impl SearchArgs {
    fn apply(&self, mut filters: SearchFilters) -> SearchFilters {
        if let Some(quick) = self.quick {
            filters = filters.with_quick_filter(quick);
        }
        if self.query.is_some() {
            filters.query = self.query.clone();
        }
        if let Some(n) = self.min_duplicates {
            filters.min_duplicates = n;
        }
        if self.max_duplicates.is_some() {
            filters.max_duplicates = self.max_duplicates;
        }
        if !self.countries.is_empty() {
            filters.countries = self.countries.iter().map(|c| c.to_uppercase()).collect();
        }
        if !self.platforms.is_empty() {
            filters.platforms = self.platforms.clone();
        }
        if !self.media_types.is_empty() {
            filters.media_types = self.media_types.clone();
        }
        if self.from.is_some() {
            filters.date_from = self.from;
        }
        if self.to.is_some() {
            filters.date_to = self.to;
        }
        if self.min_score.is_some() {
            filters.min_score = self.min_score;
        }
        if self.max_score.is_some() {
            filters.max_score = self.max_score;
        }
        if self.min_days_active.is_some() {
            filters.min_days_active = self.min_days_active;
        }
        if self.max_days_active.is_some() {
            filters.max_days_active = self.max_days_active;
        }
        if self.landing_domain.is_some() {
            filters.landing_domain = self.landing_domain.clone();
        }
        if self.advertiser.is_some() {
            filters.advertiser = self.advertiser.clone();
        }
        if let Some(sort_by) = self.sort_by {
            filters.sort_by = sort_by;
        }
        if let Some(order) = self.order {
            filters.sort_order = order;
        }
        filters
    }
}

fn parse_day(s: &str) -> Result<DateTime<Utc>, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))?
        .and_hms_opt(0, 0, 0)
        .map(|dt| dt.and_utc())
        .ok_or_else(|| format!("invalid date {s}"))
}

fn parse_quick_filter(s: &str) -> Result<QuickFilter, String> {
    serde_json::from_value(serde_json::Value::String(s.replace('-', "_")))
        .map_err(|_| format!("unknown quick filter {s}"))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::from_default_env().add_directive("scoutads=info".parse()?);
    if cli.log_json {
        tracing_subscriber::fmt().json().with_env_filter(filter).init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let mut config = Config::from_env()?;
    if let Some(path) = &cli.config {
        let file = load_config(path)
            .with_context(|| format!("failed to load config {}", path.display()))?;
        config = config.merge_file(&file);
    }
    if let Command::Search(SearchArgs {
        latency_ms: Some(ms),
        ..
    }) = &cli.command
    {
        config.latency_ms = *ms;
    }
    config.log_redacted();

    let source: Arc<dyn CreativeSource> = match &config.creatives_file {
        Some(path) => Arc::new(JsonFileSource::new(path)),
        None => Arc::new(FixtureSource::default()),
    };
    let store = FileStore::new(&config.data_dir);
    let mut dashboard = Dashboard::new(store, source, &config)?;

    match cli.command {
        Command::Search(args) => {
            let base = if args.reset {
                dashboard.reset_filters()?;
                SearchFilters::default()
            } else {
                dashboard.state().filters.clone()
            };
            dashboard.search_with(args.apply(base))?;
            let state = dashboard.wait_for_search().await?;

            if let Some(message) = state.error() {
                anyhow::bail!("search failed: {message}");
            }

            if args.json {
                let response = serde_json::json!({
                    "items": state.creatives,
                    "total": state.total,
                    "filters_applied": state.filters,
                    "search_time_ms": state.last_search_ms.unwrap_or(0),
                });
                println!("{}", serde_json::to_string_pretty(&response)?);
                return Ok(());
            }

            println!(
                "{} creatives in {} ms ({} active filters)",
                state.total,
                state.last_search_ms.unwrap_or(0),
                state.filters.active_filter_count()
            );
            if state.creatives.is_empty() && state.filters.query.is_none() {
                let suggestions: Vec<&str> = sample_queries().iter().take(5).copied().collect();
                println!("try searching for: {}", suggestions.join(", "));
            }
            for c in &state.creatives {
                let saved = if state.is_saved(&c.creative_id) { "*" } else { " " };
                let flags: String = c.countries.iter().map(|cc| country_flag(cc)).collect();
                println!(
                    "{saved} [{:>3}] {:<5} {:<22} dup {:>3}  {:<10} {}  {} {}",
                    c.creative_id,
                    ScoreBadge::from_score(c.score).label(),
                    truncate_text(&c.advertiser, 22),
                    c.count_duplicates,
                    format_days_active(c.days_active),
                    c.score,
                    flags,
                    truncate_text(c.headline.as_deref().unwrap_or(&c.text), 48),
                );
            }

            let summary = state.summary();
            println!(
                "\naverage score {:.1}, {} duplicates",
                summary.average_score,
                format_number(summary.total_duplicates)
            );

            println!("\nTop advertisers");
            for a in dashboard.top_advertisers() {
                println!("  {:<24} {}", a.name, a.count);
            }
            println!("\nTop countries");
            for c in dashboard.top_countries() {
                println!("  {} {:<20} {}", country_flag(&c.code), c.name, c.count);
            }
        }
        Command::Breakdown { creative_id } => {
            let creative = dashboard.find_creative(&creative_id).await?;
            let breakdown = dashboard.breakdown(&creative_id).await?;
            println!("{} ({})", creative.advertiser, creative.creative_id);
            println!("  variation   {:>3}  x{}", breakdown.variation_score, breakdown.weights.variation);
            println!("  countries   {:>3}  x{}", breakdown.country_score, breakdown.weights.country);
            println!("  duration    {:>3}  x{}", breakdown.duration_score, breakdown.weights.duration);
            println!("  engagement  {:>3}  x{}", breakdown.engagement_score, breakdown.weights.engagement);
            println!("  recency     {:>3}  x{}", breakdown.recency_score, breakdown.weights.recency);
            println!(
                "  total       {:>3}  {}",
                breakdown.total_score,
                ScoreTier::from_score(breakdown.total_score).label()
            );
        }
        Command::Save { creative_id } => {
            let now_saved = dashboard.toggle_save(&creative_id)?;
            info!(creative_id = creative_id.as_str(), saved = now_saved, "Saved set updated");
            let ids: Vec<&str> = dashboard.state().saved.iter().collect();
            println!("saved: {}", ids.join(", "));
        }
        Command::Saved => {
            let ids = dashboard.state().saved.to_vec();
            if ids.is_empty() {
                println!("no saved creatives");
            }
            for id in ids {
                match dashboard.find_creative(&id).await {
                    Ok(c) => println!("[{:>3}] {} ({})", c.creative_id, c.advertiser, c.score),
                    Err(_) => println!("[{id:>3}] (no longer available)"),
                }
            }
        }
        Command::Download { creative_id } => {
            dashboard.download(&creative_id)?;
        }
        Command::Crawl => {
            dashboard.toggle_auto_crawl()?;
        }
    }

    Ok(())
}
