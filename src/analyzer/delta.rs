use rust_decimal::Decimal;
use serde::Serialize;

use crate::analyzer::aggregate::Measure;
use crate::analyzer::number_format::{format_currency, format_integer, format_percent};
use crate::analyzer::pivot::PivotMatrix;
use crate::config::ReportConfig;

/// A delta strictly above this value is an increase; anything else,
/// including exactly zero, is a decrease. There is no "unchanged" class.
pub const DELTA_INCREASE_THRESHOLD: Decimal = Decimal::ZERO;

/// Title of the first display/export column.
pub const WEEKDAY_HEADER: &str = "Dia da semana";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DeltaClass {
    Increase,
    Decrease,
    Undefined,
}

/// `grid[row][col]`; `None` in column 0, which has nothing to compare with.
pub type ClassificationGrid = Vec<Vec<Option<DeltaClass>>>;

/// Relative change from `prev` to `curr`. Undefined when either side has no
/// value or `prev` is zero.
pub fn compute_delta(prev: Option<Decimal>, curr: Option<Decimal>) -> Option<Decimal> {
    let prev = prev?;
    if prev.is_zero() {
        return None;
    }
    let curr = curr?;
    (curr - prev).checked_div(prev)
}

pub fn classify(delta: Option<Decimal>) -> DeltaClass {
    match delta {
        Some(d) if d > DELTA_INCREASE_THRESHOLD => DeltaClass::Increase,
        Some(_) => DeltaClass::Decrease,
        None => DeltaClass::Undefined,
    }
}

/// Delta of every cell against the same weekday in the previous column.
pub fn delta_grid(matrix: &PivotMatrix) -> Vec<Vec<Option<Decimal>>> {
    matrix
        .cells
        .iter()
        .map(|row| {
            (0..row.len())
                .map(|col| {
                    if col == 0 {
                        None
                    } else {
                        compute_delta(row[col - 1], row[col])
                    }
                })
                .collect()
        })
        .collect()
}

pub fn classification_grid(matrix: &PivotMatrix) -> ClassificationGrid {
    delta_grid(matrix)
        .into_iter()
        .map(|row| {
            row.into_iter()
                .enumerate()
                .map(|(col, delta)| if col == 0 { None } else { Some(classify(delta)) })
                .collect()
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayCell {
    pub text: String,
    pub value_text: String,
    pub delta_text: Option<String>,
    pub class: Option<DeltaClass>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRow {
    pub label: String,
    pub cells: Vec<DisplayCell>,
}

/// Formatted pivot handed to the rendering layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayTable {
    pub measure: Measure,
    pub header: Vec<String>,
    pub rows: Vec<DisplayRow>,
}

impl DisplayTable {
    pub fn classifications(&self) -> ClassificationGrid {
        self.rows
            .iter()
            .map(|r| r.cells.iter().map(|c| c.class).collect())
            .collect()
    }
}

fn format_value(value: Option<Decimal>, measure: Measure, config: &ReportConfig) -> String {
    match value {
        None => config.no_value_text.clone(),
        Some(v) if measure.is_currency() => format_currency(
            v,
            &config.currency_symbol,
            &config.thousands_separator,
            &config.decimal_separator,
        ),
        Some(v) => format_integer(v, &config.thousands_separator),
    }
}

/// Builds the display table: value text per cell, followed by the signed
/// percentage change when it is defined.
pub fn format_report(matrix: &PivotMatrix, config: &ReportConfig) -> DisplayTable {
    let deltas = delta_grid(matrix);

    let mut header = Vec::with_capacity(matrix.column_count() + 1);
    header.push(WEEKDAY_HEADER.to_string());
    header.extend(matrix.column_labels().into_iter().map(str::to_string));

    let rows = matrix
        .cells
        .iter()
        .zip(deltas.iter())
        .enumerate()
        .map(|(row_idx, (values, row_deltas))| {
            let cells = values
                .iter()
                .zip(row_deltas.iter())
                .enumerate()
                .map(|(col, (value, delta))| {
                    let value_text = format_value(*value, matrix.measure, config);
                    let delta_text = delta.map(format_percent);
                    let text = match &delta_text {
                        Some(d) => format!("{} ({})", value_text, d),
                        None => value_text.clone(),
                    };
                    DisplayCell {
                        text,
                        value_text,
                        delta_text,
                        class: if col == 0 { None } else { Some(classify(*delta)) },
                    }
                })
                .collect();
            DisplayRow {
                label: config.weekday_label(row_idx),
                cells,
            }
        })
        .collect();

    DisplayTable {
        measure: matrix.measure,
        header,
        rows,
    }
}
