use std::sync::Mutex;

use rusqlite::Connection;

use crate::db::setup::init_db;
use crate::error::AppError;

/// Shared handle to the sales database. Holds no per-request state: every
/// report call receives its parameters explicitly.
pub struct AppState {
    pub db: Mutex<Option<Connection>>,
}

impl AppState {
    pub fn new(conn: Connection) -> Self {
        AppState {
            db: Mutex::new(Some(conn)),
        }
    }

    /// Opens (or creates) the SQLite file and applies migrations.
    pub fn open(path: &str) -> Result<Self, AppError> {
        let conn = init_db(path)?;
        log::info!("Base de vendas aberta: {}", path);
        Ok(AppState::new(conn))
    }
}

pub trait DbAccess {
    fn db<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, AppError>;

    fn db_mut<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError>;
}

impl DbAccess for AppState {
    fn db<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&Connection) -> Result<T, AppError>,
    {
        let guard = self
            .db
            .lock()
            .map_err(|e| AppError::Custom(format!("Mutex envenenado: {}", e)))?;
        let conn = guard
            .as_ref()
            .ok_or_else(|| AppError::Custom("Base de dados não inicializada".into()))?;
        f(conn)
    }

    fn db_mut<F, T>(&self, f: F) -> Result<T, AppError>
    where
        F: FnOnce(&mut Connection) -> Result<T, AppError>,
    {
        let mut guard = self
            .db
            .lock()
            .map_err(|e| AppError::Custom(format!("Mutex envenenado: {}", e)))?;
        let conn = guard
            .as_mut()
            .ok_or_else(|| AppError::Custom("Base de dados não inicializada".into()))?;
        f(conn)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uninitialized_db_is_error() {
        let state = AppState {
            db: Mutex::new(None),
        };
        let result = state.db(|_| Ok(()));
        assert!(matches!(result, Err(AppError::Custom(_))));
    }

    #[test]
    fn test_db_access_runs_closure() {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        let state = AppState::new(conn);
        let count: i64 = state
            .db(|c| Ok(c.query_row("SELECT COUNT(*) FROM vendas", [], |r| r.get(0))?))
            .unwrap();
        assert_eq!(count, 0);
    }
}
