//! Widget for the round log

use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::tichu::History;

/// The list of rounds played so far. When the list is taller than its area, the most recent
/// rounds are shown.
#[derive(Debug, Clone)]
pub struct RoundLog {
    lines: Vec<String>,
}

impl RoundLog {
    pub fn new(history: &History) -> Self {
        Self {
            lines: history.lines().collect(),
        }
    }
}

impl Widget for RoundLog {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let block = Block::bordered().title(" Rounds ");
        let height = block.inner(area).height as usize;
        let skip = self.lines.len().saturating_sub(height);
        let lines: Vec<Line> = if self.lines.is_empty() {
            vec![Line::from("No rounds yet.").italic()]
        } else {
            self.lines.into_iter().skip(skip).map(Line::from).collect()
        };
        Paragraph::new(lines).block(block).render(area, buf);
    }
}
