use std::collections::{BTreeMap, HashSet};

use rust_decimal::Decimal;
use serde::Serialize;

use crate::analyzer::temporal::{month_range, YearMonth};
use crate::analyzer::types::Transaction;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyRevenue {
    pub year_month: YearMonth,
    pub label: String,
    pub revenue: Decimal,
    pub sales: usize,
}

/// Revenue per calendar month for one unit (or all units with `None`).
///
/// Months between the first and last observed month appear with zero
/// revenue so the series has no gaps.
pub fn monthly_revenue(transactions: &[Transaction], unit: Option<&str>) -> Vec<MonthlyRevenue> {
    let mut by_month: BTreeMap<YearMonth, (Decimal, HashSet<&str>)> = BTreeMap::new();

    for t in transactions
        .iter()
        .filter(|t| unit.map_or(true, |u| t.unit_id == u))
    {
        let entry = by_month
            .entry(YearMonth::of(t.timestamp.date()))
            .or_insert_with(|| (Decimal::ZERO, HashSet::new()));
        entry.0 = entry.0.saturating_add(t.amount);
        entry.1.insert(t.sale_id.as_str());
    }

    let (first, last) = match (by_month.keys().next(), by_month.keys().next_back()) {
        (Some(f), Some(l)) => (*f, *l),
        _ => return Vec::new(),
    };

    month_range(first, last)
        .into_iter()
        .map(|ym| {
            let (revenue, sales) = by_month
                .get(&ym)
                .map(|(r, s)| (*r, s.len()))
                .unwrap_or((Decimal::ZERO, 0));
            MonthlyRevenue {
                year_month: ym,
                label: ym.label(),
                revenue,
                sales,
            }
        })
        .collect()
}
