use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::analyzer::monthly::MonthlyRevenue;
use crate::analyzer::temporal::YearMonth;

/// Monthly revenue target of a unit, as edited in the goals grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub unit_id: String,
    pub year_month: YearMonth,
    pub target: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub year_month: YearMonth,
    pub label: String,
    pub revenue: Decimal,
    pub target: Option<Decimal>,
    /// revenue / target; `None` without a positive target.
    pub attainment: Option<Decimal>,
    /// target - revenue
    pub gap: Option<Decimal>,
}

/// Joins monthly revenue with the unit's goals. Months that only have a
/// goal show zero revenue.
pub fn compute_goal_progress(monthly: &[MonthlyRevenue], goals: &[Goal]) -> Vec<GoalProgress> {
    let targets: HashMap<YearMonth, Decimal> =
        goals.iter().map(|g| (g.year_month, g.target)).collect();

    let mut months: BTreeMap<YearMonth, Decimal> =
        monthly.iter().map(|m| (m.year_month, m.revenue)).collect();
    for ym in targets.keys() {
        months.entry(*ym).or_insert(Decimal::ZERO);
    }

    months
        .into_iter()
        .map(|(ym, revenue)| {
            let target = targets.get(&ym).copied();
            let attainment = target
                .filter(|t| *t > Decimal::ZERO)
                .and_then(|t| revenue.checked_div(t));
            GoalProgress {
                year_month: ym,
                label: ym.label(),
                revenue,
                target,
                attainment,
                gap: target.map(|t| t - revenue),
            }
        })
        .collect()
}
