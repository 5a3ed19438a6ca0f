use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;

/// Day-first formats tried in order, then ISO.
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%d-%m-%Y %H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S%.f",
];

const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%Y-%m-%d"];

/// Parse a sale date ("31/01/2026 18:45", "31/01/2026", "2026-01-31 18:45:00", ...).
/// Returns None for empty or unparseable strings.
pub fn parse_dayfirst_datetime(s: &str) -> Option<NaiveDateTime> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Some(dt);
        }
    }
    for fmt in DATE_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(trimmed, fmt) {
            return d.and_hms_opt(0, 0, 0);
        }
    }
    None
}

/// True when `s` reads as digit groups `d{1,3}(sep ddd)+`, e.g. `1.234.567`.
fn is_grouped(s: &str, sep: char) -> bool {
    let digits = s.strip_prefix('-').unwrap_or(s);
    let mut parts = digits.split(sep);
    let head_ok = parts
        .next()
        .map(|h| {
            (1..=3).contains(&h.len())
                && !h.starts_with('0')
                && h.bytes().all(|b| b.is_ascii_digit())
        })
        .unwrap_or(false);
    let mut tail_count = 0;
    let tail_ok = parts.all(|p| {
        tail_count += 1;
        p.len() == 3 && p.bytes().all(|b| b.is_ascii_digit())
    });
    head_ok && tail_ok && tail_count > 0
}

/// Parse a monetary amount ("R$ 1.234,56", "R$ 1.500", "1234,56", "1234.56", "-3,5").
///
/// When both separators appear the rightmost one is the decimal mark. A lone
/// comma is a decimal mark. Dots that split the integer into groups of three
/// digits are thousands separators, so "1.500" is fifteen hundred.
pub fn parse_amount(s: &str) -> Option<Decimal> {
    let cleaned: String = s
        .trim()
        .trim_start_matches("R$")
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();
    if cleaned.is_empty() {
        return None;
    }

    let normalized = match (cleaned.rfind(','), cleaned.rfind('.')) {
        (Some(c), Some(d)) if c > d => cleaned.replace('.', "").replace(',', "."),
        (Some(_), Some(_)) => cleaned.replace(',', ""),
        (Some(_), None) if is_grouped(&cleaned, ',') && cleaned.matches(',').count() > 1 => {
            cleaned.replace(',', "")
        }
        (Some(_), None) => cleaned.replace(',', "."),
        (None, Some(_)) if is_grouped(&cleaned, '.') => cleaned.replace('.', ""),
        _ => cleaned,
    };

    Decimal::from_str(&normalized).ok()
}
