use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::analyzer::aggregate::Measure;
use crate::analyzer::delta::{DeltaClass, WEEKDAY_HEADER};
use crate::analyzer::pivot::PivotMatrix;
use crate::config::ReportConfig;
use crate::error::AppError;
use crate::export::{
    create_header_format, create_integer_format, create_number_format, decimal_to_cell,
    set_fixed_properties,
};

/// `comparativo_<measure>.xlsx`
pub fn export_filename(measure: Measure) -> String {
    format!("comparativo_{}.xlsx", measure.slug())
}

/// Gera a planilha comparativa semana a semana (uma aba).
///
/// Cells hold the rounded raw values, not display strings. `classifications`
/// is indexed like the matrix; a missing entry means no shading.
pub fn generate_comparison_report(
    matrix: &PivotMatrix,
    classifications: &[Vec<Option<DeltaClass>>],
    config: &ReportConfig,
) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    set_fixed_properties(&mut wb, &format!("Comparativo {}", matrix.measure.title()))?;
    write_comparison(&mut wb, matrix, classifications, config)?;
    let bytes = wb.save_to_buffer()?;
    log::debug!(
        "{} gerado: {} bytes",
        export_filename(matrix.measure),
        bytes.len()
    );
    Ok(bytes)
}

fn fill_for(class: Option<DeltaClass>, config: &ReportConfig) -> Option<&str> {
    match class? {
        DeltaClass::Increase => Some(config.increase_fill.as_str()),
        DeltaClass::Decrease => Some(config.decrease_fill.as_str()),
        DeltaClass::Undefined if config.shade_undefined => Some(config.decrease_fill.as_str()),
        DeltaClass::Undefined => None,
    }
}

fn write_comparison(
    wb: &mut Workbook,
    matrix: &PivotMatrix,
    classifications: &[Vec<Option<DeltaClass>>],
    config: &ReportConfig,
) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name(matrix.measure.title())?;

    let hdr = create_header_format();
    let (plain, decimals) = if matrix.measure.is_currency() {
        (create_number_format(), 2)
    } else {
        (create_integer_format(), 0)
    };

    ws.write_with_format(0, 0, WEEKDAY_HEADER, &hdr)?;
    for (col, period) in matrix.periods.iter().enumerate() {
        ws.write_with_format(0, (col + 1) as u16, period.label.as_str(), &hdr)?;
    }

    for (row_idx, values) in matrix.cells.iter().enumerate() {
        let row = (row_idx + 1) as u32;
        ws.write(row, 0, config.weekday_label(row_idx))?;

        for (col_idx, value) in values.iter().enumerate() {
            let col = (col_idx + 1) as u16;
            let class = classifications
                .get(row_idx)
                .and_then(|r| r.get(col_idx))
                .copied()
                .flatten();
            let format = match fill_for(class, config) {
                Some(fill) => plain.clone().set_background_color(fill),
                None => plain.clone(),
            };
            write_value(ws, row, col, value.map(|v| decimal_to_cell(v, decimals)), &format)?;
        }
    }

    ws.set_freeze_panes(1, 1)?;
    ws.set_column_width(0, 18)?;
    for col in 1..=matrix.column_count() as u16 {
        ws.set_column_width(col, 16)?;
    }

    Ok(())
}

fn write_value(
    ws: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
    format: &Format,
) -> Result<(), XlsxError> {
    match value {
        Some(v) => {
            ws.write_with_format(row, col, v, format)?;
        }
        None => {
            ws.write_blank(row, col, format)?;
        }
    }
    Ok(())
}
