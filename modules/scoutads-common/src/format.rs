//! Small display helpers shared by the CLI and the card views.

use chrono::{DateTime, Utc};
use url::Url;

const DAY_MS: i64 = 24 * 60 * 60 * 1000;

/// Whole days between two instants, rounded up. Order does not matter.
pub fn calculate_days_active(first_seen: DateTime<Utc>, last_seen: DateTime<Utc>) -> u32 {
    let diff_ms = (last_seen - first_seen).num_milliseconds().unsigned_abs() as i64;
    let days = (diff_ms + DAY_MS - 1) / DAY_MS;
    u32::try_from(days).unwrap_or(u32::MAX)
}

pub fn format_days_active(days: u32) -> String {
    match days {
        0 => "Hoje".to_string(),
        1 => "1 dia".to_string(),
        2..=6 => format!("{days} dias"),
        7..=29 => match days / 7 {
            1 => "1 semana".to_string(),
            weeks => format!("{weeks} semanas"),
        },
        30..=364 => match days / 30 {
            1 => "1 mês".to_string(),
            months => format!("{months} meses"),
        },
        _ => match days / 365 {
            1 => "1 ano".to_string(),
            years => format!("{years} anos"),
        },
    }
}

/// Compact number: `950`, `1.2k`, `3.4M`.
pub fn format_number(num: u64) -> String {
    if num < 1_000 {
        num.to_string()
    } else if num < 1_000_000 {
        format!("{:.1}k", num as f64 / 1_000.0)
    } else {
        format!("{:.1}M", num as f64 / 1_000_000.0)
    }
}

pub fn format_date(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y").to_string()
}

pub fn format_date_time(date: DateTime<Utc>) -> String {
    date.format("%d/%m/%Y %H:%M").to_string()
}

/// Cut `text` to `max_chars` characters and append `...` when it was longer.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let cut: String = text.chars().take(max_chars).collect();
    format!("{cut}...")
}

pub fn is_valid_url(raw: &str) -> bool {
    Url::parse(raw).is_ok()
}

/// Hostname of `raw`, or `None` when it does not parse as an absolute URL.
pub fn landing_host(raw: &str) -> Option<String> {
    Url::parse(raw)
        .ok()
        .and_then(|u| u.host_str().map(|h| h.to_string()))
}

/// Hostname for display; falls back to the raw string when unparsable.
pub fn extract_domain(raw: &str) -> String {
    landing_host(raw).unwrap_or_else(|| raw.to_string())
}

/// Cheap content fingerprint: 32-bit rolling hash (x31) over UTF-16 code
/// units, hex of the absolute value.
pub fn generate_fingerprint(text: &str) -> String {
    let hash = text
        .encode_utf16()
        .fold(0i32, |hash, unit| {
            hash.wrapping_shl(5).wrapping_sub(hash).wrapping_add(unit as i32)
        });
    format!("{:x}", hash.unsigned_abs())
}
