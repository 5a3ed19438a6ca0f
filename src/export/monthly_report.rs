use rust_decimal::Decimal;
use rust_xlsxwriter::{Workbook, XlsxError};

use crate::analyzer::goals::GoalProgress;
use crate::error::AppError;
use crate::export::{
    apply_attainment_conditional_format, create_header_format, create_number_format,
    create_percent_format, decimal_to_cell, set_fixed_properties,
};

/// Gera o relatório de faturamento mensal de uma UN, com metas e atingimento.
pub fn generate_monthly_report(unit: &str, progress: &[GoalProgress]) -> Result<Vec<u8>, AppError> {
    let mut wb = Workbook::new();
    set_fixed_properties(&mut wb, &format!("Faturamento mensal {}", unit))?;
    write_monthly(&mut wb, unit, progress)?;
    Ok(wb.save_to_buffer()?)
}

fn write_monthly(wb: &mut Workbook, unit: &str, progress: &[GoalProgress]) -> Result<(), XlsxError> {
    let ws = wb.add_worksheet();
    ws.set_name("Faturamento mensal")?;

    let hdr = create_header_format();
    let num = create_number_format();
    let pct = create_percent_format();

    ws.write_with_format(0, 0, "UN", &hdr)?;
    ws.write(0, 1, unit)?;

    let header_row = 2u32;
    let headers = ["Mês", "Faturamento", "Meta", "Atingimento", "Diferença"];
    for (col, h) in headers.iter().enumerate() {
        ws.write_with_format(header_row, col as u16, *h, &hdr)?;
    }

    for (i, p) in progress.iter().enumerate() {
        let row = header_row + 1 + i as u32;
        ws.write(row, 0, p.label.as_str())?;
        ws.write_with_format(row, 1, decimal_to_cell(p.revenue, 2), &num)?;
        if let Some(target) = p.target {
            ws.write_with_format(row, 2, decimal_to_cell(target, 2), &num)?;
        }
        if let Some(att) = p.attainment {
            ws.write_with_format(row, 3, decimal_to_cell(att, 4), &pct)?;
        }
        if let Some(gap) = p.gap {
            ws.write_with_format(row, 4, decimal_to_cell(gap, 2), &num)?;
        }
    }

    if !progress.is_empty() {
        let first_data_row = header_row + 1;
        let last_data_row = header_row + progress.len() as u32;
        let total_row = last_data_row + 2;

        let total_revenue: Decimal = progress.iter().map(|p| p.revenue).sum();
        let total_target: Decimal = progress.iter().filter_map(|p| p.target).sum();

        ws.write_with_format(total_row, 0, "TOTAL", &hdr)?;
        ws.write_with_format(total_row, 1, decimal_to_cell(total_revenue, 2), &num)?;
        ws.write_with_format(total_row, 2, decimal_to_cell(total_target, 2), &num)?;

        ws.set_freeze_panes(first_data_row, 0)?;
        apply_attainment_conditional_format(ws, first_data_row, 3, last_data_row)?;
    }

    ws.set_column_width(0, 18)?;
    for col in 1u16..=4 {
        ws.set_column_width(col, 16)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::goals::{compute_goal_progress, Goal};
    use crate::analyzer::monthly::MonthlyRevenue;
    use rust_decimal_macros::dec;

    fn progress() -> Vec<GoalProgress> {
        let jan = "2026-01".parse().unwrap();
        let feb = "2026-02".parse().unwrap();
        compute_goal_progress(
            &[
                MonthlyRevenue {
                    year_month: jan,
                    label: "Janeiro 2026".into(),
                    revenue: dec!(8000),
                    sales: 400,
                },
                MonthlyRevenue {
                    year_month: feb,
                    label: "Fevereiro 2026".into(),
                    revenue: dec!(12000),
                    sales: 520,
                },
            ],
            &[Goal {
                unit_id: "CENTRO".into(),
                year_month: jan,
                target: dec!(10000),
            }],
        )
    }

    #[test]
    fn test_generate_monthly_report_xlsx_signature() {
        let bytes = generate_monthly_report("CENTRO", &progress()).unwrap();
        assert!(bytes.len() > 4);
        assert_eq!(bytes[0], 0x50);
        assert_eq!(bytes[1], 0x4B);
    }

    #[test]
    fn test_generate_monthly_report_empty() {
        let bytes = generate_monthly_report("CENTRO", &[]).unwrap();
        assert_eq!(bytes[0], 0x50);
        assert_eq!(bytes[1], 0x4B);
    }
}
