use std::str::FromStr;

use rusqlite::{types::Type, Connection};
use rust_decimal::Decimal;

use crate::analyzer::goals::Goal;
use crate::analyzer::temporal::YearMonth;
use crate::analyzer::types::SaleRow;
use crate::parser::deserializers::parse_dayfirst_datetime;

// ─── Helpers privados ─────────────────────────────────────────────────────────

fn decimal_col(row: &rusqlite::Row<'_>, idx: usize) -> Result<Decimal, rusqlite::Error> {
    let text: String = row.get(idx)?;
    Decimal::from_str(text.trim()).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Text,
            format!("valor decimal inválido {:?}: {}", text, e).into(),
        )
    })
}

fn year_month_col(row: &rusqlite::Row<'_>, idx: usize) -> Result<YearMonth, rusqlite::Error> {
    let text: String = row.get(idx)?;
    text.parse::<YearMonth>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.to_string().into())
    })
}

// ─── Vendas ───────────────────────────────────────────────────────────────────

/// Stored sales, optionally restricted to one unit. A NULL or unreadable
/// `data` comes back as `timestamp: None`; callers validate before reporting.
pub fn get_sales(conn: &Connection, unit: Option<&str>) -> Result<Vec<SaleRow>, rusqlite::Error> {
    let mut stmt = conn.prepare_cached(
        "SELECT venda, un, data, total FROM vendas
         WHERE (?1 IS NULL OR un = ?1)
         ORDER BY id",
    )?;
    let rows = stmt.query_map([unit], |row| {
        let data: Option<String> = row.get(2)?;
        Ok(SaleRow {
            sale_id: row.get(0)?,
            unit_id: row.get(1)?,
            timestamp: data.as_deref().and_then(parse_dayfirst_datetime),
            amount: decimal_col(row, 3)?,
        })
    })?;
    let result = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(result)
}

pub fn get_units(conn: &Connection) -> Result<Vec<String>, rusqlite::Error> {
    let mut stmt = conn.prepare_cached("SELECT DISTINCT un FROM vendas WHERE un <> '' ORDER BY un")?;
    let units = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(units)
}

// ─── Metas ────────────────────────────────────────────────────────────────────

pub fn get_goals(conn: &Connection, unit: &str) -> Result<Vec<Goal>, rusqlite::Error> {
    let mut stmt =
        conn.prepare_cached("SELECT un, ano_mes, meta FROM metas WHERE un = ?1 ORDER BY ano_mes")?;
    let rows = stmt.query_map([unit], |row| {
        Ok(Goal {
            unit_id: row.get(0)?,
            year_month: year_month_col(row, 1)?,
            target: decimal_col(row, 2)?,
        })
    })?;
    let result = rows.collect::<Result<Vec<_>, _>>()?;
    Ok(result)
}

/// Writes the edited goals grid. Last write wins per (unit, month).
pub fn upsert_goals(conn: &mut Connection, goals: &[Goal]) -> Result<usize, rusqlite::Error> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare_cached(
            "INSERT OR REPLACE INTO metas (un, ano_mes, meta, updated_at)
             VALUES (?1, ?2, ?3, datetime('now'))",
        )?;
        for g in goals {
            stmt.execute(rusqlite::params![
                g.unit_id,
                g.year_month.to_string(),
                g.target.to_string()
            ])?;
        }
    }
    tx.commit()?;
    Ok(goals.len())
}
