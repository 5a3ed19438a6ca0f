use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// A sale accepted into the reporting pipeline. The timestamp is always set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    pub sale_id: String,
    pub unit_id: String,
    pub timestamp: NaiveDateTime,
    pub amount: Decimal,
}

/// A sale as stored in the `vendas` table, before validation.
#[derive(Debug, Clone, PartialEq)]
pub struct SaleRow {
    pub sale_id: String,
    pub unit_id: String,
    pub timestamp: Option<NaiveDateTime>,
    pub amount: Decimal,
}

impl TryFrom<SaleRow> for Transaction {
    type Error = AppError;

    fn try_from(row: SaleRow) -> Result<Self, Self::Error> {
        let timestamp = row.timestamp.ok_or_else(|| AppError::MissingDate {
            sale_id: row.sale_id.clone(),
        })?;
        Ok(Transaction {
            sale_id: row.sale_id,
            unit_id: row.unit_id,
            timestamp,
            amount: row.amount,
        })
    }
}

/// Converts stored rows into transactions. The first row without a date
/// aborts the whole batch with `AppError::MissingDate`.
pub fn validate_rows(rows: Vec<SaleRow>) -> Result<Vec<Transaction>, AppError> {
    rows.into_iter().map(Transaction::try_from).collect()
}
