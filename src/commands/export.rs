use std::io::Write as _;
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use crate::analyzer::aggregate::Measure;
use crate::analyzer::temporal::{filter_months, YearMonth};
use crate::error::AppError;
use crate::export::comparison_report::{export_filename, generate_comparison_report};
use crate::export::monthly_report::generate_monthly_report;
use crate::export::XLSX_MIME;
use crate::state::AppState;

use super::monthly::run_monthly_logic;
use super::report::{build_report, load_config, load_transactions, run_report_logic, ReportRequest};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportResult {
    pub path: String,
    pub size_bytes: u64,
    pub duration_ms: u64,
}

/// In-memory artifact for callers that stream the file themselves.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportFile {
    pub filename: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AllMeasuresRequest {
    pub unit: Option<String>,
    pub months: Vec<YearMonth>,
}

pub(crate) fn run_comparison_file_logic(
    state: &AppState,
    request: &ReportRequest,
) -> Result<ExportFile, AppError> {
    let (report, config) = run_report_logic(state, request)?;
    let bytes = generate_comparison_report(&report.matrix, &report.classifications, &config)?;
    Ok(ExportFile {
        filename: export_filename(request.measure),
        mime: XLSX_MIME.to_string(),
        bytes,
    })
}

pub(crate) fn run_all_measures_zip_logic(
    state: &AppState,
    request: &AllMeasuresRequest,
) -> Result<Vec<u8>, AppError> {
    let config = load_config(state)?;
    let transactions = load_transactions(state, request.unit.as_deref())?;
    let selected = filter_months(&transactions, &request.months);

    let cursor = std::io::Cursor::new(Vec::new());
    let mut zip = zip::ZipWriter::new(cursor);
    let options = zip::write::SimpleFileOptions::default()
        .compression_method(zip::CompressionMethod::Deflated);

    for measure in Measure::ALL {
        let report = build_report(&selected, measure, &config);
        let bytes = generate_comparison_report(&report.matrix, &report.classifications, &config)?;
        zip.start_file(export_filename(measure), options)?;
        zip.write_all(&bytes)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

pub fn build_comparison_file(
    state: &AppState,
    request: ReportRequest,
) -> Result<ExportFile, String> {
    run_comparison_file_logic(state, &request).map_err(|e| e.to_string())
}

/// Writes `comparativo_<measure>.xlsx` into `dir`.
pub fn export_comparison(
    state: &AppState,
    dir: String,
    request: ReportRequest,
) -> Result<ExportResult, String> {
    let start = Instant::now();

    let file = run_comparison_file_logic(state, &request).map_err(|e| e.to_string())?;
    let path = Path::new(&dir).join(&file.filename);

    std::fs::write(&path, &file.bytes).map_err(|e| e.to_string())?;

    Ok(ExportResult {
        path: path.to_string_lossy().into_owned(),
        size_bytes: file.bytes.len() as u64,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// One zip holding the comparison workbook of every measure.
pub fn export_all_measures_zip(
    state: &AppState,
    path: String,
    request: AllMeasuresRequest,
) -> Result<ExportResult, String> {
    let start = Instant::now();

    let buf = run_all_measures_zip_logic(state, &request).map_err(|e| e.to_string())?;

    std::fs::write(&path, &buf).map_err(|e| e.to_string())?;

    Ok(ExportResult {
        path,
        size_bytes: buf.len() as u64,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

pub fn export_monthly(
    state: &AppState,
    path: String,
    unit: String,
) -> Result<ExportResult, String> {
    let start = Instant::now();

    let report = run_monthly_logic(state, &unit).map_err(|e| e.to_string())?;
    let bytes = generate_monthly_report(&report.unit, &report.months).map_err(|e| e.to_string())?;

    std::fs::write(&path, &bytes).map_err(|e| e.to_string())?;

    Ok(ExportResult {
        path,
        size_bytes: bytes.len() as u64,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}
