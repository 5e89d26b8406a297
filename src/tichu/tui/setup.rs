//! Form for assigning players to roster slots.

use ratatui::crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::tichu::{Roster, Slot};

#[derive(Debug, Clone)]
pub struct SetupForm {
    /// Names as typed, by slot. Trimmed when the roster is built.
    names: [String; 4],
    /// Previously recorded names, offered as suggestions.
    known: Vec<String>,
    /// The slot being edited.
    selected: usize,
}

impl SetupForm {
    /// Creates a form prefilled from the previous roster.
    pub fn new(previous: &Roster, known: Vec<String>) -> Self {
        Self {
            names: Slot::all_slots().map(|slot| previous.name(slot).to_string()),
            known,
            selected: 0,
        }
    }

    /// The roster as entered.
    pub fn roster(&self) -> Roster {
        Roster::new(self.names.clone())
    }

    /// Replaces the selected slot's name with the known name following it.
    fn suggest(&mut self) {
        if self.known.is_empty() {
            return;
        }
        let name = &mut self.names[self.selected];
        let next = match self.known.iter().position(|n| n == name.trim()) {
            Some(i) => (i + 1) % self.known.len(),
            None => 0,
        };
        *name = self.known[next].clone();
    }

    /// Applies a key press to the selected slot.
    pub fn handle_key(&mut self, code: KeyCode) {
        let slots = self.names.len();
        match code {
            KeyCode::Up => self.selected = (self.selected + slots - 1) % slots,
            KeyCode::Down => self.selected = (self.selected + 1) % slots,
            KeyCode::Tab => self.suggest(),
            KeyCode::Backspace => {
                self.names[self.selected].pop();
            }
            KeyCode::Delete => self.names[self.selected].clear(),
            KeyCode::Char(c) => self.names[self.selected].push(c),
            _ => (),
        }
    }
}

impl Widget for &SetupForm {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let mut lines: Vec<Line> = Slot::all_slots()
            .iter()
            .zip(&self.names)
            .enumerate()
            .map(|(i, (slot, name))| {
                let line = Line::from(format!("{slot}  {name}"));
                if i == self.selected {
                    line.reversed()
                } else {
                    line
                }
            })
            .collect();
        if !self.known.is_empty() {
            lines.push(Line::from(""));
            lines.push(Line::from(format!("Known: {}", self.known.join(", "))).italic());
        }
        Paragraph::new(lines)
            .block(Block::bordered().title(" Players "))
            .render(area, buf);
    }
}
