use rusqlite::Connection;

use crate::analyzer::types::Transaction;

pub const DB_DATETIME_FMT: &str = "%Y-%m-%d %H:%M:%S";

pub fn insert_import(
    conn: &Connection,
    filename: &str,
    total_rows: usize,
    parsed_rows: usize,
    skipped_rows: usize,
) -> Result<i64, rusqlite::Error> {
    conn.execute(
        "INSERT INTO imports (filename, total_rows, parsed_rows, skipped_rows)
         VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![
            filename,
            total_rows as i64,
            parsed_rows as i64,
            skipped_rows as i64
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn bulk_insert_sales(
    conn: &mut Connection,
    import_id: i64,
    transactions: &[Transaction],
) -> Result<usize, rusqlite::Error> {
    let tx = conn.transaction()?;

    {
        let mut stmt = tx.prepare_cached(
            "INSERT INTO vendas (import_id, venda, un, data, total) VALUES (?1, ?2, ?3, ?4, ?5)",
        )?;

        for t in transactions {
            stmt.execute(rusqlite::params![
                import_id,
                t.sale_id,
                t.unit_id,
                t.timestamp.format(DB_DATETIME_FMT).to_string(),
                t.amount.to_string(),
            ])?;
        }
    }

    tx.commit()?;
    Ok(transactions.len())
}
