use serde::Serialize;

use crate::analyzer::goals::{compute_goal_progress, GoalProgress};
use crate::analyzer::monthly::monthly_revenue;
use crate::db::queries;
use crate::error::AppError;
use crate::state::{AppState, DbAccess};

use super::report::load_transactions;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyReport {
    pub unit: String,
    pub months: Vec<GoalProgress>,
}

pub(crate) fn run_monthly_logic(state: &AppState, unit: &str) -> Result<MonthlyReport, AppError> {
    let transactions = load_transactions(state, Some(unit))?;
    let monthly = monthly_revenue(&transactions, Some(unit));
    let goals = state.db(|conn| Ok(queries::get_goals(conn, unit)?))?;
    Ok(MonthlyReport {
        unit: unit.to_string(),
        months: compute_goal_progress(&monthly, &goals),
    })
}

pub fn get_monthly_report(state: &AppState, unit: String) -> Result<MonthlyReport, String> {
    run_monthly_logic(state, &unit).map_err(|e| e.to_string())
}

pub fn get_units(state: &AppState) -> Result<Vec<String>, String> {
    state
        .db(|conn| Ok(queries::get_units(conn)?))
        .map_err(|e| e.to_string())
}
