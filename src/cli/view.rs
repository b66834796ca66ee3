use std::sync::mpsc::{Receiver, TryRecvError};

use crossterm::event::KeyCode;
use ratatui::{
    layout::{Constraint, Layout},
    style::Style,
    text::{Line, Text},
    widgets::{Cell, Paragraph, Row, Table},
    Frame,
};

use crate::cell::CellView;
use crate::error::Result;
use crate::models::Dataset;
use crate::settings::Settings;
use crate::source::spawn_load;
use crate::tui::{
    run_view, View, ViewAction, AMOUNT_STYLE, FOOTER_STYLE, HEADER_STYLE, MONTH_STYLE,
    NO_DATA_STYLE, TOTAL_STYLE,
};
use crate::view_model::{build_view, AppState};
use crate::window::WINDOW_LEN;

use super::BoardArgs;

const ROW_HEIGHT: u16 = 2;

/// Open the interactive board. Data is fetched once in the background; the
/// board starts empty and fills in when the load lands.
pub fn run(args: &BoardArgs, settings: &Settings) -> Result<()> {
    let pending = spawn_load(args.source(settings), settings.timeout());
    let mut board = Board::new(args.initial_state(settings), settings.year_options(), pending);
    run_view(&mut board)
}

pub(crate) struct Board {
    state: AppState,
    years: Vec<i32>,
    pending: Option<Receiver<Option<Dataset>>>,
    status: String,
    offset: usize,
    visible_count: usize,
}

impl Board {
    fn new(state: AppState, years: Vec<i32>, pending: Receiver<Option<Dataset>>) -> Self {
        Self {
            state,
            years,
            pending: Some(pending),
            status: String::new(),
            offset: 0,
            visible_count: 10,
        }
    }

    fn loading(&self) -> bool {
        self.pending.is_some()
    }

    /// Step the year selector to the next configured option.
    fn cycle_year(&mut self) {
        let pos = self.years.iter().position(|&y| y == self.state.year);
        let next = match pos {
            Some(i) => self.years[(i + 1) % self.years.len()],
            None => self.years.first().copied().unwrap_or(self.state.year),
        };
        self.state = self.state.with_year(next);
        self.offset = 0;
    }

    fn row_count(&self) -> usize {
        build_view(&self.state).manager_rows.len()
    }
}

impl View for Board {
    fn tick(&mut self) {
        let Some(rx) = &self.pending else {
            return;
        };
        match rx.try_recv() {
            Ok(Some(data)) => {
                self.state = self.state.with_dataset(data);
                self.offset = 0;
                self.pending = None;
            }
            // load failed; it is already logged and the board stays as it was
            Ok(None) | Err(TryRecvError::Disconnected) => self.pending = None,
            Err(TryRecvError::Empty) => {}
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let view = build_view(&self.state);
        let area = frame.area();
        let [header_area, sep_area, content_area, footer_area] = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Fill(1),
            Constraint::Length(1),
        ])
        .areas(area);

        let loading = if self.loading() { "  (loading\u{2026})" } else { "" };
        frame.render_widget(
            Paragraph::new(format!(
                " Plan / Fact \u{2014} Year {} \u{2014} {}{loading}",
                view.year,
                view.range_label()
            ))
            .style(HEADER_STYLE),
            header_area,
        );

        frame.render_widget(
            Paragraph::new("\u{2501}".repeat(area.width as usize)).style(FOOTER_STYLE),
            sep_area,
        );

        // header row + total row, each two lines, plus the header margin
        let overhead = ROW_HEIGHT * 2 + 1;
        let visible = (content_area.height.saturating_sub(overhead) / ROW_HEIGHT) as usize;
        self.visible_count = visible.max(1);
        let max = view.manager_rows.len().saturating_sub(self.visible_count);
        self.offset = self.offset.min(max);

        let mut header_cells = vec![Cell::from("Manager"), Cell::from("")];
        for month in view.month_labels {
            header_cells.push(Cell::from(Text::from(vec![
                Line::styled(month, MONTH_STYLE),
                Line::from("Plan"),
            ])));
            header_cells.push(Cell::from(Text::from(vec![Line::from(""), Line::from("Fact")])));
        }
        let header = Row::new(header_cells)
            .height(ROW_HEIGHT)
            .bottom_margin(1)
            .style(HEADER_STYLE);

        let mut rows = Vec::with_capacity(self.visible_count + 1);
        rows.push(
            board_row("Total", ["Total Income:", "Total Active Partners:"], &view.total_row)
                .style(TOTAL_STYLE),
        );
        for manager in view.manager_rows.iter().skip(self.offset).take(self.visible_count) {
            rows.push(board_row(&manager.name, ["Income:", "Active partners:"], &manager.cells));
        }

        let mut widths = vec![Constraint::Min(14), Constraint::Length(22)];
        widths.extend(std::iter::repeat(Constraint::Length(11)).take(WINDOW_LEN * 2));
        frame.render_widget(
            Table::new(rows, widths).header(header).column_spacing(1),
            content_area,
        );

        let pos_info = if max > 0 {
            format!("  rows {}/{}", self.offset + 1, view.manager_rows.len())
        } else {
            String::new()
        };
        let status = if self.status.is_empty() {
            String::new()
        } else {
            format!("  {}", self.status)
        };
        frame.render_widget(
            Paragraph::new(format!(
                " \u{2190}/\u{2192}=month  y=year  a=add plan  \u{2191}/\u{2193}=scroll  q/Esc=close{pos_info}{status}"
            ))
            .style(FOOTER_STYLE),
            footer_area,
        );
    }

    fn handle_key(&mut self, code: KeyCode) -> ViewAction {
        self.status.clear();
        let max = self.row_count().saturating_sub(self.visible_count);
        match code {
            KeyCode::Char('q') | KeyCode::Esc => return ViewAction::Close,
            KeyCode::Left | KeyCode::Char('h') => self.state = self.state.retreated(),
            KeyCode::Right | KeyCode::Char('l') => self.state = self.state.advanced(),
            KeyCode::Char('y') => self.cycle_year(),
            KeyCode::Char('a') => self.status = "Adding plans is not supported yet".into(),
            KeyCode::Up | KeyCode::Char('k') => self.offset = self.offset.saturating_sub(1),
            KeyCode::Down | KeyCode::Char('j') => self.offset = (self.offset + 1).min(max),
            KeyCode::PageUp => self.offset = self.offset.saturating_sub(self.visible_count),
            KeyCode::PageDown => self.offset = (self.offset + self.visible_count).min(max),
            KeyCode::Home => self.offset = 0,
            KeyCode::End => self.offset = max,
            _ => {}
        }
        ViewAction::Continue
    }
}

// ---------------------------------------------------------------------------
// Helper: two-line cells (income over active partners)
// ---------------------------------------------------------------------------

fn two_lines(top: &str, bottom: &str, style: Style) -> Cell<'static> {
    Cell::from(Text::from(vec![
        Line::styled(top.to_string(), style),
        Line::styled(bottom.to_string(), style),
    ]))
}

fn board_row(name: &str, labels: [&str; 2], cells: &[CellView; WINDOW_LEN]) -> Row<'static> {
    let mut out = vec![
        Cell::from(name.to_string()),
        two_lines(labels[0], labels[1], Style::new()),
    ];
    for cell in cells {
        let style = if cell.is_empty() { NO_DATA_STYLE } else { AMOUNT_STYLE };
        let (plan_income, fact_income) = cell.income_line();
        let (plan_count, fact_count) = cell.count_line();
        out.push(two_lines(plan_income, plan_count, style));
        out.push(two_lines(fact_income, fact_count, style));
    }
    Row::new(out).height(ROW_HEIGHT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    fn board_with(years: Vec<i32>) -> (Board, mpsc::Sender<Option<Dataset>>) {
        let (tx, rx) = mpsc::channel();
        (Board::new(AppState::new(2025, 0, false), years, rx), tx)
    }

    #[test]
    fn test_arrows_move_window_cyclically() {
        let (mut board, _tx) = board_with(vec![2025, 2024]);
        board.handle_key(KeyCode::Left);
        assert_eq!(board.state.current_index, 11);
        board.handle_key(KeyCode::Right);
        board.handle_key(KeyCode::Right);
        assert_eq!(board.state.current_index, 1);
    }

    #[test]
    fn test_year_key_cycles_options() {
        let (mut board, _tx) = board_with(vec![2025, 2024]);
        board.handle_key(KeyCode::Char('y'));
        assert_eq!(board.state.year, 2024);
        board.handle_key(KeyCode::Char('y'));
        assert_eq!(board.state.year, 2025);
    }

    #[test]
    fn test_add_plan_only_sets_status() {
        let (mut board, _tx) = board_with(vec![2025]);
        let before = board.state.clone();
        board.handle_key(KeyCode::Char('a'));
        assert!(!board.status.is_empty());
        assert_eq!(board.state.current_index, before.current_index);
        assert_eq!(board.state.managers, before.managers);
    }

    #[test]
    fn test_tick_applies_loaded_data_once() {
        let (mut board, tx) = board_with(vec![2025]);
        board.tick();
        assert!(board.loading());
        tx.send(Some(Dataset {
            managers: vec![Default::default()],
            total: Vec::new(),
        }))
        .unwrap();
        board.tick();
        assert!(!board.loading());
        assert_eq!(board.state.managers.len(), 1);
    }

    #[test]
    fn test_failed_load_keeps_empty_state() {
        let (mut board, tx) = board_with(vec![2025]);
        tx.send(None).unwrap();
        board.tick();
        assert!(!board.loading());
        assert!(board.state.managers.is_empty());
    }

    #[test]
    fn test_quit_keys_close() {
        let (mut board, _tx) = board_with(vec![2025]);
        assert!(matches!(board.handle_key(KeyCode::Char('q')), ViewAction::Close));
        assert!(matches!(board.handle_key(KeyCode::Esc), ViewAction::Close));
    }
}
