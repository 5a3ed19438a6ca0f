pub mod analyzer;
pub mod commands;
pub mod config;
pub mod db;
pub mod error;
pub mod export;
pub mod parser;
pub mod state;

pub use analyzer::{DeltaClass, Measure, PivotMatrix, Transaction, YearMonth};
pub use config::ReportConfig;
pub use error::AppError;
pub use state::AppState;

// ─── E2E Integration Tests ──────────────────────────────────────────────────

#[cfg(test)]
mod e2e_tests {
    use std::io::{Cursor, Read};
    use std::path::PathBuf;

    use rusqlite::Connection;

    use crate::analyzer::aggregate::Measure;
    use crate::analyzer::delta::DeltaClass;
    use crate::commands::export::AllMeasuresRequest;
    use crate::commands::report::ReportRequest;
    use crate::state::AppState;

    const SALES_CSV: &str = "VENDA;UN;DATA;TOTAL\n\
        1;CENTRO;05/01/2026 10:00;1000,00\n\
        2;CENTRO;12/01/2026 09:30;1200,00\n\
        3;CENTRO;10/01/2026 11:00;300,00\n\
        4;NORTE;06/01/2026 08:00;50,00\n\
        5;CENTRO;;20,00\n\
        6;CENTRO;03/02/2026 07:15;80,00\n";

    fn setup_state() -> AppState {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        AppState::new(conn)
    }

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("padaria_e2e_{}_{}", std::process::id(), name))
    }

    fn imported_state(name: &str) -> AppState {
        let state = setup_state();
        let csv_path = temp_path(name);
        std::fs::write(&csv_path, SALES_CSV).unwrap();
        let result = crate::commands::import::import_csv(
            &state,
            csv_path.to_string_lossy().into_owned(),
        )
        .expect("import failed");
        std::fs::remove_file(&csv_path).ok();

        assert_eq!(result.imported_sales, 5);
        assert_eq!(result.skipped_rows, 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.unique_units, vec!["CENTRO", "NORTE"]);
        state
    }

    fn january(measure: Measure) -> ReportRequest {
        ReportRequest {
            unit: Some("CENTRO".into()),
            months: vec!["2026-01".parse().unwrap()],
            measure,
        }
    }

    /// E2E: CSV → SQLite → weekday pivot → deltas → display table
    #[test]
    fn test_e2e_import_and_comparison_report() {
        let state = imported_state("report.csv");

        let report =
            crate::commands::report::get_comparison_report(&state, january(Measure::Sum))
                .expect("report failed");

        assert_eq!(report.matrix.row_count(), 7);
        assert_eq!(
            report.table.header,
            vec!["Dia da semana", "05/01 à 11/01", "12/01 à 18/01"]
        );

        let monday = &report.table.rows[0];
        assert_eq!(monday.label, "Segunda-feira");
        assert_eq!(monday.cells[0].class, None);
        assert_eq!(monday.cells[1].delta_text.as_deref(), Some("+20.00%"));
        assert_eq!(monday.cells[1].class, Some(DeltaClass::Increase));
        assert_eq!(monday.cells[1].value_text, "R$ 1.200,00");

        // Saturday 300 → no sales the following week
        let saturday = &report.table.rows[5];
        assert_eq!(saturday.cells[1].delta_text.as_deref(), Some("-100.00%"));
        assert_eq!(saturday.cells[1].class, Some(DeltaClass::Decrease));

        // Tuesday 0 → 0: no baseline
        let tuesday = &report.table.rows[1];
        assert_eq!(tuesday.cells[1].class, Some(DeltaClass::Undefined));
        assert_eq!(tuesday.cells[1].delta_text, None);

        // NORTE and February sales are filtered out
        let counts = crate::commands::report::get_comparison_report(
            &state,
            january(Measure::DistinctCount),
        )
        .unwrap();
        let total: rust_decimal::Decimal = counts
            .matrix
            .cells
            .iter()
            .flatten()
            .map(|v| v.unwrap_or_default())
            .sum();
        assert_eq!(total, rust_decimal::Decimal::from(3));
    }

    #[test]
    fn test_e2e_export_comparison_file() {
        let state = imported_state("export.csv");
        let dir = temp_path("export_dir");
        std::fs::create_dir_all(&dir).unwrap();

        let result = crate::commands::export::export_comparison(
            &state,
            dir.to_string_lossy().into_owned(),
            january(Measure::Ratio),
        )
        .expect("export failed");

        assert!(result.path.ends_with("comparativo_ticket_medio.xlsx"));
        let bytes = std::fs::read(&result.path).unwrap();
        assert_eq!(bytes.len() as u64, result.size_bytes);
        assert_eq!(&bytes[..2], b"PK");

        let again =
            crate::commands::export::build_comparison_file(&state, january(Measure::Ratio))
                .unwrap();
        assert_eq!(again.bytes, bytes, "export must be reproducible");
        assert_eq!(again.mime, crate::export::XLSX_MIME);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn test_e2e_all_measures_zip() {
        let state = imported_state("zip.csv");
        let zip_path = temp_path("all.zip");

        crate::commands::export::export_all_measures_zip(
            &state,
            zip_path.to_string_lossy().into_owned(),
            AllMeasuresRequest {
                unit: None,
                months: vec!["2026-01".parse().unwrap(), "2026-02".parse().unwrap()],
            },
        )
        .expect("zip export failed");

        let buf = std::fs::read(&zip_path).unwrap();
        std::fs::remove_file(&zip_path).ok();

        let mut archive = zip::ZipArchive::new(Cursor::new(buf)).unwrap();
        let mut names: Vec<String> = archive.file_names().map(str::to_string).collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "comparativo_faturamento.xlsx",
                "comparativo_ticket_medio.xlsx",
                "comparativo_vendas.xlsx",
            ]
        );

        let mut inner = Vec::new();
        archive
            .by_name("comparativo_vendas.xlsx")
            .unwrap()
            .read_to_end(&mut inner)
            .unwrap();
        assert_eq!(&inner[..2], b"PK");
    }

    #[test]
    fn test_e2e_empty_selection_still_exports() {
        let state = imported_state("empty.csv");
        let request = ReportRequest {
            unit: Some("CENTRO".into()),
            months: vec!["2025-06".parse().unwrap()],
            measure: Measure::DistinctCount,
        };

        let report =
            crate::commands::report::get_comparison_report(&state, request.clone()).unwrap();
        assert_eq!(report.matrix.row_count(), 7);
        assert_eq!(report.matrix.column_count(), 0);
        assert_eq!(report.table.header, vec!["Dia da semana"]);

        let file = crate::commands::export::build_comparison_file(&state, request).unwrap();
        assert_eq!(file.filename, "comparativo_vendas.xlsx");
        assert_eq!(&file.bytes[..2], b"PK");
    }

    #[test]
    fn test_e2e_null_date_fails_report() {
        let state = setup_state();
        state
            .db
            .lock()
            .unwrap()
            .as_ref()
            .unwrap()
            .execute(
                "INSERT INTO vendas (venda, un, data, total) VALUES ('77', 'CENTRO', NULL, '10')",
                [],
            )
            .unwrap();

        let err = crate::commands::report::get_comparison_report(&state, january(Measure::Sum))
            .unwrap_err();
        assert!(err.contains("77"), "unexpected error: {}", err);
    }

    #[test]
    fn test_e2e_monthly_goals() {
        let state = imported_state("monthly.csv");
        let jan: crate::analyzer::temporal::YearMonth = "2026-01".parse().unwrap();

        let updated = crate::commands::goals::update_goals(
            &state,
            vec![crate::analyzer::goals::Goal {
                unit_id: "CENTRO".into(),
                year_month: jan,
                target: rust_decimal::Decimal::from(2000),
            }],
        )
        .unwrap();
        assert_eq!(updated, 1);

        let report =
            crate::commands::monthly::get_monthly_report(&state, "CENTRO".into()).unwrap();
        assert_eq!(report.months.len(), 2);
        assert_eq!(report.months[0].revenue, rust_decimal::Decimal::from(2500));
        assert_eq!(report.months[0].target, Some(rust_decimal::Decimal::from(2000)));
        assert_eq!(report.months[1].target, None);

        let units = crate::commands::monthly::get_units(&state).unwrap();
        assert_eq!(units, vec!["CENTRO", "NORTE"]);

        let xlsx_path = temp_path("monthly.xlsx");
        let result = crate::commands::export::export_monthly(
            &state,
            xlsx_path.to_string_lossy().into_owned(),
            "CENTRO".into(),
        )
        .unwrap();
        assert!(result.size_bytes > 0);
        std::fs::remove_file(&xlsx_path).ok();
    }
}
