use crate::fmt::{format_count, format_currency};
use crate::models::{MonthData, Value};

pub const NO_DATA: &str = "No data";

/// Absent, zero and NaN all count as "nothing reported".
fn is_blank(value: Option<f64>) -> bool {
    match value {
        None => true,
        Some(v) => v == 0.0 || v.is_nan(),
    }
}

fn side_is_blank(side: Option<&Value>) -> bool {
    side.map_or(true, |v| is_blank(v.income) && is_blank(v.active_partners))
}

/// A month is empty when the record is missing or none of its four figures
/// carries a non-zero number. Reported zeros are treated as no data.
pub fn is_empty_month(data: Option<&MonthData>) -> bool {
    match data {
        None => true,
        Some(m) => side_is_blank(m.plan.as_ref()) && side_is_blank(m.fact.as_ref()),
    }
}

/// One resolved board cell, ready to render.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    Empty,
    Filled {
        plan_income: String,
        fact_income: String,
        plan_count: String,
        fact_count: String,
    },
}

impl CellView {
    pub fn from_month(data: Option<&MonthData>) -> Self {
        let Some(m) = data.filter(|m| !is_empty_month(Some(*m))) else {
            return CellView::Empty;
        };
        let plan = m.plan.unwrap_or_default();
        let fact = m.fact.unwrap_or_default();
        CellView::Filled {
            plan_income: format_currency(plan.income),
            fact_income: format_currency(fact.income),
            plan_count: format_count(plan.active_partners),
            fact_count: format_count(fact.active_partners),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellView::Empty)
    }

    /// (plan, fact) strings for the income line.
    pub fn income_line(&self) -> (&str, &str) {
        match self {
            CellView::Empty => (NO_DATA, ""),
            CellView::Filled { plan_income, fact_income, .. } => (plan_income.as_str(), fact_income.as_str()),
        }
    }

    /// (plan, fact) strings for the active-partners line. Empty cells leave it blank.
    pub fn count_line(&self) -> (&str, &str) {
        match self {
            CellView::Empty => ("", ""),
            CellView::Filled { plan_count, fact_count, .. } => (plan_count.as_str(), fact_count.as_str()),
        }
    }
}
