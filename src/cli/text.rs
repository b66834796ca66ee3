use colored::Colorize;
use comfy_table::{Cell, Table};

use crate::cell::CellView;
use crate::error::Result;
use crate::settings::Settings;
use crate::source::load_dataset;
use crate::view_model::{build_view, BoardView};

use super::BoardArgs;

const INCOME_LABELS: &str = "Income:\nActive partners:";
const TOTAL_LABELS: &str = "Total Income:\nTotal Active Partners:";

/// Load once, synchronously, and print the board. A failed load prints an
/// empty board; the failure itself only goes to the log.
pub fn run(args: &BoardArgs, settings: &Settings) -> Result<()> {
    let mut state = args.initial_state(settings);
    if let Some(data) = load_dataset(&args.source(settings), settings.timeout()) {
        state = state.with_dataset(data);
    }
    println!("{}", format_board(&build_view(&state)));
    Ok(())
}

fn cell_pair(cell: &CellView) -> [Cell; 2] {
    let (plan_income, fact_income) = cell.income_line();
    let (plan_count, fact_count) = cell.count_line();
    [
        Cell::new(format!("{plan_income}\n{plan_count}")),
        Cell::new(format!("{fact_income}\n{fact_count}")),
    ]
}

pub fn format_board(view: &BoardView) -> String {
    let mut table = Table::new();

    let mut header = vec![Cell::new("Manager"), Cell::new("")];
    for month in view.month_labels {
        header.push(Cell::new(format!("{month}\nPlan")));
        header.push(Cell::new("\nFact"));
    }
    table.set_header(header);

    let mut total = vec![Cell::new("Total"), Cell::new(TOTAL_LABELS)];
    total.extend(view.total_row.iter().flat_map(cell_pair));
    table.add_row(total);

    for row in &view.manager_rows {
        let mut cells = vec![Cell::new(&row.name), Cell::new(INCOME_LABELS)];
        cells.extend(row.cells.iter().flat_map(cell_pair));
        table.add_row(cells);
    }

    let title = format!("Year {} \u{2014} {}", view.year, view.range_label());
    format!("{}\n{table}", title.bold())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Dataset, Manager, MonthData, Value};
    use crate::view_model::AppState;

    #[test]
    fn test_format_board_lists_months_and_rows() {
        let mut months = [None; 12];
        months[11] = Some(MonthData::new(
            Value { income: Some(5000.0), active_partners: Some(3.0) },
            Value { income: Some(4800.0), active_partners: Some(3.0) },
        ));
        let state = AppState::new(2025, 10, false).with_dataset(Dataset {
            managers: vec![Manager {
                admin_name: "Dana".into(),
                months,
                ..Manager::default()
            }],
            total: Vec::new(),
        });
        let out = format_board(&build_view(&state));
        for month in ["November", "December", "January", "April"] {
            assert!(out.contains(month), "missing {month}");
        }
        assert!(!out.contains("May"));
        assert!(out.contains("Dana"));
        assert!(out.contains("$5,000"));
        assert!(out.contains("$4,800"));
        assert!(out.contains("No data"));
        assert!(out.contains("Total Income:"));
    }

    #[test]
    fn test_format_empty_board() {
        let out = format_board(&build_view(&AppState::new(2024, 0, false)));
        assert!(out.contains("Year 2024"));
        assert!(out.contains("January"));
        assert!(out.contains("June"));
        assert_eq!(out.matches("No data").count(), 6);
    }
}
