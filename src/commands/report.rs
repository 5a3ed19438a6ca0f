use serde::{Deserialize, Serialize};

use crate::analyzer::aggregate::Measure;
use crate::analyzer::delta::{classification_grid, format_report, ClassificationGrid, DisplayTable};
use crate::analyzer::pivot::{build_comparison, PivotMatrix};
use crate::analyzer::temporal::{filter_months, YearMonth};
use crate::analyzer::types::{validate_rows, Transaction};
use crate::config::{get_config_from_db, ReportConfig};
use crate::db::queries;
use crate::error::AppError;
use crate::state::{AppState, DbAccess};

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    pub unit: Option<String>,
    pub months: Vec<YearMonth>,
    pub measure: Measure,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonReport {
    pub matrix: PivotMatrix,
    pub table: DisplayTable,
    pub classifications: ClassificationGrid,
}

/// Pivot, display table and classifications for already selected transactions.
pub fn build_report(
    transactions: &[Transaction],
    measure: Measure,
    config: &ReportConfig,
) -> ComparisonReport {
    let matrix = build_comparison(transactions, measure);
    let table = format_report(&matrix, config);
    let classifications = classification_grid(&matrix);
    ComparisonReport {
        matrix,
        table,
        classifications,
    }
}

pub(crate) fn load_config(state: &AppState) -> Result<ReportConfig, AppError> {
    state.db(|conn| Ok(get_config_from_db(conn)?))
}

/// Stored sales of `unit` (all units with `None`), validated.
pub(crate) fn load_transactions(
    state: &AppState,
    unit: Option<&str>,
) -> Result<Vec<Transaction>, AppError> {
    let rows = state.db(|conn| Ok(queries::get_sales(conn, unit)?))?;
    validate_rows(rows)
}

/// Shared by the display command and the exports.
pub(crate) fn run_report_logic(
    state: &AppState,
    request: &ReportRequest,
) -> Result<(ComparisonReport, ReportConfig), AppError> {
    let config = load_config(state)?;
    let transactions = load_transactions(state, request.unit.as_deref())?;
    let selected = filter_months(&transactions, &request.months);
    log::info!(
        "Comparativo {} UN={:?}: {} meses, {} de {} vendas selecionadas",
        request.measure.slug(),
        request.unit,
        request.months.len(),
        selected.len(),
        transactions.len()
    );
    Ok((build_report(&selected, request.measure, &config), config))
}

pub fn get_comparison_report(
    state: &AppState,
    request: ReportRequest,
) -> Result<ComparisonReport, String> {
    run_report_logic(state, &request)
        .map(|(report, _)| report)
        .map_err(|e| e.to_string())
}
