use std::path::Path;
use std::time::Instant;

use serde::Serialize;

use crate::db::insert::{bulk_insert_sales, insert_import};
use crate::parser::ParseWarning;
use crate::state::{AppState, DbAccess};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportResult {
    pub import_id: i64,
    pub total_rows: usize,
    pub imported_sales: usize,
    pub skipped_rows: usize,
    pub warnings: Vec<ParseWarning>,
    pub detected_columns: Vec<String>,
    pub unique_units: Vec<String>,
    pub parse_duration_ms: u64,
    pub duration_ms: u64,
}

/// Parses a sales CSV and stores its valid rows under a new import record.
pub fn import_csv(state: &AppState, path: String) -> Result<ImportResult, String> {
    let start = Instant::now();

    let filename = Path::new(&path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(&path)
        .to_string();

    let parse_output = crate::parser::parse_csv(&path, |rows_parsed, accepted| {
        log::debug!("{}: {} linhas lidas, {} aceitas", filename, rows_parsed, accepted);
    })
    .map_err(|e| e.to_string())?;

    let total_rows = parse_output.total_rows_processed;
    let skipped_rows = parse_output.skipped_rows;
    let transactions = parse_output.transactions;

    let (import_id, imported_sales) = state
        .db_mut(|conn| {
            let import_id =
                insert_import(conn, &filename, total_rows, transactions.len(), skipped_rows)?;
            let inserted = bulk_insert_sales(conn, import_id, &transactions)?;
            Ok((import_id, inserted))
        })
        .map_err(|e| e.to_string())?;

    log::info!(
        "Importação {} ({}): {} vendas gravadas, {} linhas ignoradas",
        import_id,
        filename,
        imported_sales,
        skipped_rows
    );

    Ok(ImportResult {
        import_id,
        total_rows,
        imported_sales,
        skipped_rows,
        warnings: parse_output.warnings,
        detected_columns: parse_output.detected_columns,
        unique_units: parse_output.unique_units,
        parse_duration_ms: parse_output.parse_duration_ms,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
