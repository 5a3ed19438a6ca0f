use std::collections::{BTreeSet, HashMap};

use chrono::Weekday;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::analyzer::aggregate::{aggregate_by_weekday, GroupKey, Measure};
use crate::analyzer::temporal::{observed_periods, Period};
use crate::analyzer::types::Transaction;

/// Row order of every pivot, Monday first.
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Weekday × period table, one row per entry of `WEEKDAYS`. `cells[row][col]`
/// is `None` when the measure has no value for that group (ratio over zero
/// sales).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PivotMatrix {
    pub measure: Measure,
    pub periods: Vec<Period>,
    pub cells: [Vec<Option<Decimal>>; 7],
}

impl PivotMatrix {
    pub fn row_count(&self) -> usize {
        self.cells.len()
    }

    pub fn column_count(&self) -> usize {
        self.periods.len()
    }

    pub fn value(&self, row: usize, col: usize) -> Option<Decimal> {
        self.cells.get(row).and_then(|r| r.get(col)).copied().flatten()
    }

    pub fn column_labels(&self) -> Vec<&str> {
        self.periods.iter().map(|p| p.label.as_str()).collect()
    }
}

/// Reshapes aggregated groups into the fixed 7-row matrix. Columns are the
/// given periods, deduplicated and sorted by start date.
pub fn build_pivot(
    aggregated: &HashMap<GroupKey, Decimal>,
    periods: &[Period],
    measure: Measure,
) -> PivotMatrix {
    let columns: Vec<Period> = periods
        .iter()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let cells: [Vec<Option<Decimal>>; 7] = WEEKDAYS.map(|weekday| {
        columns
            .iter()
            .map(|period| {
                let key = GroupKey {
                    period: period.clone(),
                    weekday,
                };
                match aggregated.get(&key) {
                    Some(v) => Some(*v),
                    None => measure.missing_value(),
                }
            })
            .collect()
    });

    PivotMatrix {
        measure,
        periods: columns,
        cells,
    }
}

/// Segments, aggregates and pivots `transactions` in one pass.
pub fn build_comparison(transactions: &[Transaction], measure: Measure) -> PivotMatrix {
    let periods = observed_periods(transactions);
    let aggregated = aggregate_by_weekday(transactions, measure);
    log::debug!(
        "Pivot {}: {} transações, {} semanas, {} grupos",
        measure.slug(),
        transactions.len(),
        periods.len(),
        aggregated.len()
    );
    build_pivot(&aggregated, &periods, measure)
}
