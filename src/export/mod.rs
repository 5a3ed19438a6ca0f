pub mod comparison_report;
pub mod monthly_report;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_xlsxwriter::{
    ConditionalFormatCell, ConditionalFormatCellRule, DocProperties, ExcelDateTime, Format,
    FormatBorder, Workbook, Worksheet, XlsxError,
};

pub const XLSX_MIME: &str = "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Cabeçalho azul #2C5F8A, texto branco, negrito, borda fina
pub fn create_header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color("2C5F8A")
        .set_font_color("FFFFFF")
        .set_font_size(11)
        .set_border(FormatBorder::Thin)
        .set_text_wrap()
}

/// #,##0.00
pub fn create_number_format() -> Format {
    Format::new().set_num_format("#,##0.00")
}

/// #,##0
pub fn create_integer_format() -> Format {
    Format::new().set_num_format("#,##0")
}

/// 0.0%
pub fn create_percent_format() -> Format {
    Format::new().set_num_format("0.0%")
}

/// Pins the workbook creation date so identical input gives identical bytes.
pub fn set_fixed_properties(wb: &mut Workbook, title: &str) -> Result<(), XlsxError> {
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    let properties = DocProperties::new()
        .set_title(title)
        .set_creation_datetime(&created);
    wb.set_properties(&properties);
    Ok(())
}

/// Rounded numeric cell value; xlsx cells hold f64.
pub fn decimal_to_cell(value: Decimal, decimals: u32) -> f64 {
    value
        .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
        .unwrap_or(0.0)
}

/// Two-level conditional fill on an attainment column (ratio, 1.0 = goal met):
/// green ≥ 1, red < 1.
pub fn apply_attainment_conditional_format(
    ws: &mut Worksheet,
    first_row: u32,
    col: u16,
    last_row: u32,
) -> Result<(), XlsxError> {
    let green = Format::new()
        .set_background_color("C6EFCE")
        .set_font_color("006100");
    let red = Format::new()
        .set_background_color("FFC7CE")
        .set_font_color("9C0006");

    ws.add_conditional_format(
        first_row,
        col,
        last_row,
        col,
        &ConditionalFormatCell::new()
            .set_rule(ConditionalFormatCellRule::GreaterThanOrEqualTo(1.0))
            .set_format(&green),
    )?;
    ws.add_conditional_format(
        first_row,
        col,
        last_row,
        col,
        &ConditionalFormatCell::new()
            .set_rule(ConditionalFormatCellRule::LessThan(1.0))
            .set_format(&red),
    )?;

    Ok(())
}
