pub mod aggregate;
pub mod delta;
pub mod goals;
pub mod monthly;
pub mod number_format;
pub mod pivot;
pub mod temporal;
pub mod types;

pub use aggregate::{aggregate_by_weekday, Measure};
pub use delta::{classification_grid, format_report, DeltaClass, DisplayTable};
pub use pivot::{build_comparison, build_pivot, PivotMatrix};
pub use temporal::{segment, Period, YearMonth};
pub use types::{validate_rows, Transaction};
