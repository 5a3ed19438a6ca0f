use crate::analyzer::goals::Goal;
use crate::db::queries;
use crate::state::{AppState, DbAccess};

pub fn get_goals(state: &AppState, unit: String) -> Result<Vec<Goal>, String> {
    state
        .db(|conn| Ok(queries::get_goals(conn, &unit)?))
        .map_err(|e| e.to_string())
}

/// Upserts monthly targets; the last write for a (unit, month) wins.
pub fn update_goals(state: &AppState, goals: Vec<Goal>) -> Result<usize, String> {
    if let Some(bad) = goals.iter().find(|g| g.target.is_sign_negative()) {
        return Err(format!(
            "Meta negativa para {} em {}: {}",
            bad.unit_id, bad.year_month, bad.target
        ));
    }
    if let Some(bad) = goals.iter().find(|g| g.unit_id.trim().is_empty()) {
        return Err(format!("Meta sem UN para {}", bad.year_month));
    }
    state
        .db_mut(|conn| Ok(queries::upsert_goals(conn, &goals)?))
        .map_err(|e| e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::temporal::YearMonth;
    use rusqlite::Connection;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn setup_state() -> AppState {
        let conn = Connection::open_in_memory().unwrap();
        crate::db::migrations::run_migrations(&conn).unwrap();
        AppState::new(conn)
    }

    fn goal(unit: &str, target: Decimal) -> Goal {
        Goal {
            unit_id: unit.into(),
            year_month: "2026-01".parse::<YearMonth>().unwrap(),
            target,
        }
    }

    #[test]
    fn test_update_then_get_goals() {
        let state = setup_state();
        assert_eq!(update_goals(&state, vec![goal("CENTRO", dec!(5000))]).unwrap(), 1);
        let goals = get_goals(&state, "CENTRO".into()).unwrap();
        assert_eq!(goals, vec![goal("CENTRO", dec!(5000))]);
    }

    #[test]
    fn test_negative_target_rejected() {
        let state = setup_state();
        let err = update_goals(
            &state,
            vec![goal("CENTRO", dec!(100)), goal("NORTE", dec!(-1))],
        )
        .unwrap_err();
        assert!(err.contains("NORTE"), "unexpected error: {}", err);
        // Nothing written when any goal is rejected
        assert!(get_goals(&state, "CENTRO".into()).unwrap().is_empty());
    }

    #[test]
    fn test_empty_unit_rejected() {
        let state = setup_state();
        let err = update_goals(&state, vec![goal("  ", dec!(100))]).unwrap_err();
        assert!(err.contains("2026-01"), "unexpected error: {}", err);
        assert!(get_goals(&state, "  ".into()).unwrap().is_empty());
    }

    #[test]
    fn test_zero_target_accepted() {
        let state = setup_state();
        assert_eq!(update_goals(&state, vec![goal("CENTRO", Decimal::ZERO)]).unwrap(), 1);
    }
}
