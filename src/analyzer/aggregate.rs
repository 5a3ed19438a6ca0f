use std::collections::{HashMap, HashSet};

use chrono::{Datelike, Weekday};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analyzer::temporal::Period;
use crate::analyzer::types::Transaction;

/// Scalar reduced per (period, weekday) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Measure {
    /// Revenue: sum of amounts.
    Sum,
    /// Number of distinct sale ids.
    DistinctCount,
    /// Average ticket: revenue divided by distinct sale count.
    Ratio,
}

impl Measure {
    pub const ALL: [Measure; 3] = [Measure::Sum, Measure::DistinctCount, Measure::Ratio];

    pub fn slug(&self) -> &'static str {
        match self {
            Measure::Sum => "faturamento",
            Measure::DistinctCount => "vendas",
            Measure::Ratio => "ticket_medio",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Measure::Sum => "Faturamento",
            Measure::DistinctCount => "Vendas",
            Measure::Ratio => "Ticket médio",
        }
    }

    /// Pivot value for a (weekday, period) with no records. A ratio over
    /// zero sales has no value rather than zero.
    pub fn missing_value(&self) -> Option<Decimal> {
        match self {
            Measure::Sum | Measure::DistinctCount => Some(Decimal::ZERO),
            Measure::Ratio => None,
        }
    }

    pub fn is_currency(&self) -> bool {
        !matches!(self, Measure::DistinctCount)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey {
    pub period: Period,
    pub weekday: Weekday,
}

#[derive(Default)]
struct GroupAcc<'a> {
    total: Decimal,
    sales: HashSet<&'a str>,
}

/// Groups transactions by (calendar week, weekday) and reduces `measure`.
/// Groups without records do not appear in the result.
pub fn aggregate_by_weekday(
    transactions: &[Transaction],
    measure: Measure,
) -> HashMap<GroupKey, Decimal> {
    let mut groups: HashMap<GroupKey, GroupAcc> = HashMap::new();

    for t in transactions {
        let date = t.timestamp.date();
        let key = GroupKey {
            period: Period::containing(date),
            weekday: date.weekday(),
        };
        let acc = groups.entry(key).or_default();
        acc.total = acc.total.saturating_add(t.amount);
        acc.sales.insert(t.sale_id.as_str());
    }

    groups
        .into_iter()
        .filter_map(|(key, acc)| {
            let count = Decimal::from(acc.sales.len() as u64);
            let value = match measure {
                Measure::Sum => Some(acc.total),
                Measure::DistinctCount => Some(count),
                Measure::Ratio => acc.total.checked_div(count),
            };
            value.map(|v| (key, v))
        })
        .collect()
}
