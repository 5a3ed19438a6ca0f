use std::collections::BTreeSet;
use std::io::Read;
use std::time::Instant;

use crate::analyzer::types::Transaction;
use crate::error::AppError;
use crate::parser::columns::{validate_columns, ColumnMap};
use crate::parser::deserializers::{parse_amount, parse_dayfirst_datetime};
use crate::parser::types::{ParseWarning, SaleRaw};

/// Output of `parse_csv`: accepted transactions plus import metadata.
#[derive(Debug)]
pub struct ParseOutput {
    pub transactions: Vec<Transaction>,
    pub warnings: Vec<ParseWarning>,
    pub total_rows_processed: usize,
    pub skipped_rows: usize,
    pub detected_columns: Vec<String>,
    pub unique_units: Vec<String>,
    pub parse_duration_ms: u64,
}

/// `;` when the header line has more semicolons than commas, else `,`.
pub fn detect_delimiter(header_line: &str) -> u8 {
    let semicolons = header_line.matches(';').count();
    let commas = header_line.matches(',').count();
    if semicolons > commas {
        b';'
    } else {
        b','
    }
}

/// Parse a sales CSV export from `path`, sniffing the delimiter.
/// `progress_cb(rows_processed, transactions_accepted)` is called every 500 rows.
pub fn parse_csv(path: &str, progress_cb: impl Fn(usize, usize)) -> Result<ParseOutput, AppError> {
    let content = std::fs::read_to_string(path)?;
    let delimiter = detect_delimiter(content.lines().next().unwrap_or(""));
    parse_csv_reader(content.as_bytes(), delimiter, progress_cb)
}

/// Core parsing logic over any `Read` source.
///
/// Rows with an invalid date, amount, sale id or unit are skipped and
/// reported as warnings; they never reach the report pipeline.
pub fn parse_csv_reader<R: Read>(
    reader: R,
    delimiter: u8,
    progress_cb: impl Fn(usize, usize),
) -> Result<ParseOutput, AppError> {
    let start = Instant::now();

    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    // Phase 1: validate columns
    let headers = rdr.headers()?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.trim().is_empty()) {
        return Err(AppError::EmptyFile);
    }
    let col_map = ColumnMap::from_headers(&headers);
    let detected_columns = validate_columns(&col_map)?;

    // Phase 2: parse and normalise records
    let mut transactions: Vec<Transaction> = Vec::new();
    let mut warnings: Vec<ParseWarning> = Vec::new();
    let mut skipped = 0usize;
    let mut row_idx = 0usize;
    let mut units: BTreeSet<String> = BTreeSet::new();

    for result in rdr.records() {
        row_idx += 1;
        if row_idx % 500 == 0 {
            progress_cb(row_idx, transactions.len());
        }

        let outcome = result
            .map_err(|e| e.to_string())
            .and_then(|record| normalize_sale(&record_to_raw(&col_map, &record)));

        match outcome {
            Ok(tx) => {
                units.insert(tx.unit_id.clone());
                transactions.push(tx);
            }
            Err(message) => {
                log::warn!("Linha {} ignorada: {}", row_idx + 1, message);
                warnings.push(ParseWarning {
                    line: row_idx + 1, // +1 for the header row
                    message,
                });
                skipped += 1;
            }
        }
    }

    if row_idx == 0 {
        return Err(AppError::EmptyFile);
    }

    log::info!(
        "CSV lido: {} linhas, {} vendas aceitas, {} ignoradas",
        row_idx,
        transactions.len(),
        skipped
    );

    Ok(ParseOutput {
        transactions,
        warnings,
        total_rows_processed: row_idx,
        skipped_rows: skipped,
        detected_columns,
        unique_units: units.into_iter().collect(),
        parse_duration_ms: start.elapsed().as_millis() as u64,
    })
}

fn record_to_raw(col_map: &ColumnMap, record: &csv::StringRecord) -> SaleRaw {
    SaleRaw {
        venda: col_map.get(record, "VENDA").map(str::to_string),
        un: col_map.get(record, "UN").map(str::to_string),
        data: col_map.get(record, "DATA").map(str::to_string),
        total: col_map.get(record, "TOTAL").map(str::to_string),
    }
}

fn normalize_sale(raw: &SaleRaw) -> Result<Transaction, String> {
    let sale_id = raw.venda.as_deref().unwrap_or("").trim().to_string();
    if sale_id.is_empty() {
        return Err("VENDA vazia".to_string());
    }

    let unit_id = raw.un.as_deref().unwrap_or("").trim().to_string();
    if unit_id.is_empty() {
        return Err(format!("UN vazia na venda {}", sale_id));
    }

    let data_str = raw.data.as_deref().unwrap_or("");
    let timestamp = parse_dayfirst_datetime(data_str)
        .ok_or_else(|| format!("DATA inválida: {:?}", data_str))?;

    let total_str = raw.total.as_deref().unwrap_or("");
    let amount = parse_amount(total_str).ok_or_else(|| format!("TOTAL inválido: {:?}", total_str))?;

    Ok(Transaction {
        sale_id,
        unit_id,
        timestamp,
        amount,
    })
}
