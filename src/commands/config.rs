use crate::config::{get_config_from_db, update_config_in_db, ReportConfig};
use crate::state::{AppState, DbAccess};

pub fn get_config(state: &AppState) -> Result<ReportConfig, String> {
    state
        .db(|conn| Ok(get_config_from_db(conn)?))
        .map_err(|e| e.to_string())
}

pub fn update_config(state: &AppState, config: ReportConfig) -> Result<(), String> {
    if config.weekday_labels.len() != 7 {
        return Err(format!(
            "São necessários 7 rótulos de dia da semana, recebidos {}",
            config.weekday_labels.len()
        ));
    }
    state
        .db(|conn| Ok(update_config_in_db(conn, &config)?))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn setup_state() -> AppState {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        AppState::new(conn)
    }

    #[test]
    fn test_config_round_trip_through_state() {
        let state = setup_state();
        assert_eq!(get_config(&state).unwrap(), ReportConfig::default());

        let config = ReportConfig {
            no_value_text: "n/d".into(),
            shade_undefined: true,
            ..ReportConfig::default()
        };
        update_config(&state, config.clone()).unwrap();
        assert_eq!(get_config(&state).unwrap(), config);
    }

    #[test]
    fn test_update_config_rejects_wrong_label_count() {
        let state = setup_state();
        let config = ReportConfig {
            weekday_labels: vec!["Seg".into(), "Ter".into()],
            ..ReportConfig::default()
        };
        let err = update_config(&state, config).unwrap_err();
        assert!(err.contains("7"), "unexpected error: {}", err);
        assert_eq!(get_config(&state).unwrap(), ReportConfig::default());
    }
}
