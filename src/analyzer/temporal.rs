use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::analyzer::types::Transaction;
use crate::error::AppError;

/// Calendar week, Monday to Sunday, used as a pivot column.
///
/// Ordering only looks at `start_date`; the label is for display and never
/// parsed back (it carries no year).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Period {
    pub iso_year: i32,
    pub iso_week: u32,
    pub label: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl Period {
    /// The week containing `date`. Weeks are not clipped to month boundaries.
    pub fn containing(date: NaiveDate) -> Self {
        let days_from_monday = date.weekday().num_days_from_monday() as i64;
        let start_date = date - Duration::days(days_from_monday);
        let end_date = start_date + Duration::days(6);
        let iw = start_date.iso_week();
        let label = format!(
            "{:02}/{:02} à {:02}/{:02}",
            start_date.day(),
            start_date.month(),
            end_date.day(),
            end_date.month()
        );
        Period {
            iso_year: iw.year(),
            iso_week: iw.week(),
            label,
            start_date,
            end_date,
        }
    }
}

impl Ord for Period {
    fn cmp(&self, other: &Self) -> Ordering {
        self.start_date.cmp(&other.start_date)
    }
}

impl PartialOrd for Period {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One Period per transaction, in input order.
pub fn segment(transactions: &[Transaction]) -> Vec<Period> {
    transactions
        .iter()
        .map(|t| Period::containing(t.timestamp.date()))
        .collect()
}

/// Distinct periods present in `transactions`, ascending by start date.
pub fn observed_periods(transactions: &[Transaction]) -> Vec<Period> {
    let set: BTreeSet<Period> = segment(transactions).into_iter().collect();
    set.into_iter().collect()
}

/// A calendar month, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, AppError> {
        if !(1..=12).contains(&month) {
            return Err(AppError::InvalidMonth(format!("{:04}-{:02}", year, month)));
        }
        Ok(YearMonth { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        YearMonth {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            YearMonth {
                year: self.year + 1,
                month: 1,
            }
        } else {
            YearMonth {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// "Janeiro 2026"
    pub fn label(&self) -> String {
        format!("{} {}", portuguese_month_name(self.month), self.year)
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl FromStr for YearMonth {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let (y, m) = trimmed
            .split_once('-')
            .ok_or_else(|| AppError::InvalidMonth(trimmed.to_string()))?;
        let year = y
            .parse::<i32>()
            .map_err(|_| AppError::InvalidMonth(trimmed.to_string()))?;
        let month = m
            .parse::<u32>()
            .map_err(|_| AppError::InvalidMonth(trimmed.to_string()))?;
        YearMonth::new(year, month)
    }
}

impl TryFrom<String> for YearMonth {
    type Error = AppError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<YearMonth> for String {
    fn from(ym: YearMonth) -> Self {
        ym.to_string()
    }
}

/// Every month from `from` to `to` inclusive. Empty when `from > to`.
pub fn month_range(from: YearMonth, to: YearMonth) -> Vec<YearMonth> {
    let mut result = Vec::new();
    let mut current = from;
    while current <= to {
        result.push(current);
        current = current.next();
    }
    result
}

/// Keeps the transactions dated inside one of the selected months.
pub fn filter_months(transactions: &[Transaction], months: &[YearMonth]) -> Vec<Transaction> {
    if months.is_empty() {
        return Vec::new();
    }
    let selected: BTreeSet<YearMonth> = months.iter().copied().collect();
    transactions
        .iter()
        .filter(|t| selected.contains(&YearMonth::of(t.timestamp.date())))
        .cloned()
        .collect()
}

fn portuguese_month_name(month: u32) -> &'static str {
    match month {
        1 => "Janeiro",
        2 => "Fevereiro",
        3 => "Março",
        4 => "Abril",
        5 => "Maio",
        6 => "Junho",
        7 => "Julho",
        8 => "Agosto",
        9 => "Setembro",
        10 => "Outubro",
        11 => "Novembro",
        12 => "Dezembro",
        _ => "Desconhecido",
    }
}
