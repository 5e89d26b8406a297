//! Table of player records.

use ratatui::prelude::*;
use ratatui::widgets::{Block, Row, Table, TableState};

use crate::tichu::Records;

pub type RecordsTableState = TableState;

#[derive(Debug, Clone)]
pub struct RecordsTable {
    /// Name, wins, losses, and win rate, in standings order.
    rows: Vec<[String; 4]>,
}

impl RecordsTable {
    pub fn new(records: &Records) -> Self {
        let rows = records
            .standings()
            .into_iter()
            .map(|r| {
                [
                    r.name.clone(),
                    r.wins.to_string(),
                    r.losses.to_string(),
                    r.win_rate(),
                ]
            })
            .collect();
        Self { rows }
    }

    /// Creates a selection state, keeping the previous selection in bounds.
    pub fn state(&self, selected: Option<usize>) -> RecordsTableState {
        let selected = match (selected, self.rows.len()) {
            (_, 0) => None,
            (Some(i), len) => Some(i.min(len - 1)),
            (None, _) => Some(0),
        };
        RecordsTableState::default().with_selected(selected)
    }

    /// The name of the selected player.
    pub fn selected(&self, state: &RecordsTableState) -> Option<String> {
        state
            .selected()
            .and_then(|idx| self.rows.get(idx))
            .map(|row| row[0].clone())
    }

    pub fn select_previous(&self, state: &mut RecordsTableState) {
        if let Some(i) = state.selected() {
            state.select(Some(i.saturating_sub(1)));
        }
    }

    pub fn select_next(&self, state: &mut RecordsTableState) {
        if let Some(i) = state.selected() {
            state.select(Some((i + 1).min(self.rows.len().saturating_sub(1))));
        }
    }

    fn table(self) -> Table<'static> {
        let empty = self.rows.is_empty();
        let rows = self.rows.into_iter().map(Row::new);
        let widths = [
            Constraint::Min(12),
            Constraint::Length(5),
            Constraint::Length(7),
            Constraint::Length(7),
        ];
        let title = if empty {
            " Player records (none yet) "
        } else {
            " Player records "
        };
        Table::new(rows, widths)
            .header(Row::new(["Name", "Wins", "Losses", "Rate"]).bold())
            .block(Block::bordered().title(title))
            .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
    }
}

impl StatefulWidget for RecordsTable {
    type State = RecordsTableState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut Self::State) {
        StatefulWidget::render(self.table(), area, buf, state)
    }
}

#[cfg(test)]
mod test {
    use crate::tichu::{MemoryStore, RecordStore, Team};

    use super::*;

    #[test]
    fn test_selection() {
        let mut store = MemoryStore::default();
        let roster = vec![("Alice".to_string(), Team::A), ("Bob".to_string(), Team::B)];
        store.record_match(Team::A, &roster).unwrap();
        let table = RecordsTable::new(&store.load().unwrap());

        let mut state = table.state(None);
        assert_eq!(table.selected(&state).as_deref(), Some("Alice"));
        table.select_next(&mut state);
        table.select_next(&mut state);
        assert_eq!(table.selected(&state).as_deref(), Some("Bob"));
        assert_eq!(table.state(Some(5)).selected(), Some(1));

        let empty = RecordsTable::new(&Records::default());
        assert_eq!(empty.selected(&empty.state(Some(0))), None);
    }
}
