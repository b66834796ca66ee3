use crate::cell::CellView;
use crate::models::{Dataset, Manager, MonthData};
use crate::window::{self, WINDOW_LEN};

/// Everything the board shows. Each transition returns a new state; the
/// collections are swapped wholesale, never edited in place.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub managers: Vec<Manager>,
    pub total: Vec<MonthData>,
    pub current_index: usize,
    /// Where the window sits after a load (`--start`, January by default).
    pub start_index: usize,
    pub year: i32,
    /// Restrict manager rows to `year`. Off means the year selector is display-only.
    pub filter_by_year: bool,
}

impl AppState {
    pub fn new(year: i32, start: usize, filter_by_year: bool) -> Self {
        Self {
            managers: Vec::new(),
            total: Vec::new(),
            current_index: window::cyclic_index(start),
            start_index: window::cyclic_index(start),
            year,
            filter_by_year,
        }
    }

    /// A fresh load replaces both collections and puts the window back at its start.
    pub fn with_dataset(&self, data: Dataset) -> Self {
        Self {
            managers: data.managers,
            total: data.total,
            current_index: self.start_index,
            ..self.clone()
        }
    }

    pub fn advanced(&self) -> Self {
        Self {
            current_index: window::advance(self.current_index),
            ..self.clone()
        }
    }

    pub fn retreated(&self) -> Self {
        Self {
            current_index: window::retreat(self.current_index),
            ..self.clone()
        }
    }

    pub fn with_year(&self, year: i32) -> Self {
        Self {
            year,
            ..self.clone()
        }
    }

    fn shows(&self, manager: &Manager) -> bool {
        !self.filter_by_year || manager.year == i64::from(self.year)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ManagerRow {
    pub id: i64,
    pub name: String,
    pub cells: [CellView; WINDOW_LEN],
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardView {
    pub year: i32,
    pub slots: [usize; WINDOW_LEN],
    pub month_labels: [&'static str; WINDOW_LEN],
    pub total_row: [CellView; WINDOW_LEN],
    pub manager_rows: Vec<ManagerRow>,
}

impl BoardView {
    pub fn range_label(&self) -> String {
        window::range_label(self.slots[0])
    }
}

/// Project the state onto the six visible columns.
pub fn build_view(state: &AppState) -> BoardView {
    let slots = window::visible_slots(state.current_index);

    let total_row = std::array::from_fn(|k| {
        let idx = window::cyclic_index(state.current_index + k);
        CellView::from_month(state.total.get(idx))
    });

    let manager_rows = state
        .managers
        .iter()
        .filter(|m| state.shows(m))
        .map(|m| ManagerRow {
            id: m.id,
            name: m.admin_name.clone(),
            cells: std::array::from_fn(|k| {
                let idx = window::cyclic_index(state.current_index + k);
                CellView::from_month(m.months[idx].as_ref())
            }),
        })
        .collect();

    BoardView {
        year: state.year,
        slots,
        month_labels: slots.map(window::month_name),
        total_row,
        manager_rows,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Value;
    use crate::normalizer::normalize_str;

    fn december_only() -> Manager {
        let mut months = [None; 12];
        months[11] = Some(MonthData::new(
            Value { income: Some(5000.0), active_partners: Some(3.0) },
            Value { income: Some(4800.0), active_partners: Some(3.0) },
        ));
        Manager {
            id: 1,
            admin_id: 10,
            admin_name: "Dana".into(),
            year: 2025,
            months,
        }
    }

    #[test]
    fn test_window_over_year_boundary() {
        let state = AppState::new(2025, 10, false)
            .advanced()
            .with_dataset(Dataset {
                managers: vec![december_only()],
                total: Vec::new(),
            });
        assert_eq!(state.current_index, 10);

        let view = build_view(&state);
        assert_eq!(view.slots, [10, 11, 0, 1, 2, 3]);
        assert_eq!(
            view.month_labels,
            ["November", "December", "January", "February", "March", "April"]
        );

        let row = &view.manager_rows[0];
        assert_eq!(row.id, 1);
        assert_eq!(row.name, "Dana");
        for (k, cell) in row.cells.iter().enumerate() {
            if k == 1 {
                assert_eq!(cell.income_line(), ("$5,000", "$4,800"));
                assert_eq!(cell.count_line(), ("3", "3"));
            } else {
                assert!(cell.is_empty(), "slot {k} should be empty");
            }
        }
    }

    #[test]
    fn test_total_row_short_after_filtering() {
        let filled = MonthData::new(
            Value { income: Some(1.0), active_partners: None },
            Value::default(),
        );
        let state = AppState::new(2025, 0, false).with_dataset(Dataset {
            managers: Vec::new(),
            total: vec![filled],
        });
        let view = build_view(&state);
        assert!(!view.total_row[0].is_empty());
        assert!(view.total_row[1..].iter().all(CellView::is_empty));
    }

    #[test]
    fn test_total_row_follows_window_past_december() {
        let data = normalize_str(include_str!("../tests/fixtures/api.json")).unwrap();
        // January and December survive; December's total now sits at index 1
        assert_eq!(data.total.len(), 2);

        let view = build_view(&AppState::new(2025, 10, false).with_dataset(data));
        let lines: Vec<_> = view
            .total_row
            .iter()
            .map(|c| (c.income_line(), c.count_line()))
            .collect();
        assert!(view.total_row[0].is_empty());
        assert!(view.total_row[1].is_empty());
        assert_eq!(lines[2], (("$1,234,567", "$1,100,000"), ("12", "11")));
        assert_eq!(lines[3], (("$5,000", "$4,800"), ("3", "3")));
        assert!(view.total_row[4].is_empty());
        assert!(view.total_row[5].is_empty());
    }

    #[test]
    fn test_navigation_is_whole_value() {
        let state = AppState::new(2025, 0, false);
        let next = state.advanced();
        assert_eq!(state.current_index, 0);
        assert_eq!(next.current_index, 1);
        assert_eq!(state.retreated().current_index, 11);
        assert_eq!(next.retreated().current_index, 0);
    }

    #[test]
    fn test_start_is_reduced() {
        let state = AppState::new(2025, 14, false);
        assert_eq!(state.current_index, 2);
        assert_eq!(state.start_index, 2);
        assert_eq!(AppState::default().current_index, 0);
    }

    #[test]
    fn test_year_selector_inert_by_default() {
        let mut old = december_only();
        old.year = 2024;
        let state = AppState::new(2025, 0, false).with_dataset(Dataset {
            managers: vec![december_only(), old],
            total: Vec::new(),
        });
        assert_eq!(build_view(&state).manager_rows.len(), 2);

        let filtered = AppState { filter_by_year: true, ..state.clone() };
        assert_eq!(build_view(&filtered).manager_rows.len(), 1);
        assert_eq!(build_view(&filtered.with_year(2024)).manager_rows.len(), 1);
        assert_eq!(build_view(&filtered.with_year(2023)).manager_rows.len(), 0);
    }
}
