//! Form for entering the outcome of a round.

use ratatui::crossterm::event::KeyCode;
use ratatui::prelude::*;
use ratatui::widgets::{Block, Paragraph, Widget};

use crate::tichu::{CardPoints, InputError, RoundInput, Team, TeamInput, TichuCall};

/// An editable line of the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Call(Team),
    Success(Team),
    Points(Team),
    DoubleWin,
}

static FIELDS: [Field; 7] = [
    Field::Call(Team::A),
    Field::Success(Team::A),
    Field::Points(Team::A),
    Field::Call(Team::B),
    Field::Success(Team::B),
    Field::Points(Team::B),
    Field::DoubleWin,
];

/// Card points are entered as raw text, and only validated when the round is scored.
#[derive(Debug, Clone, Default)]
pub struct RoundForm {
    calls: [TichuCall; 2],
    success: [bool; 2],
    points: [String; 2],
    double_win: Option<Team>,
    selected: usize,
}

fn index(team: Team) -> usize {
    match team {
        Team::A => 0,
        Team::B => 1,
    }
}

fn cycle_double_win(double_win: Option<Team>) -> Option<Team> {
    match double_win {
        None => Some(Team::A),
        Some(Team::A) => Some(Team::B),
        Some(Team::B) => None,
    }
}

impl RoundForm {
    /// Validates the form.
    pub fn input(&self) -> Result<RoundInput, InputError> {
        let team = |team: Team| -> Result<TeamInput, InputError> {
            let i = index(team);
            let points = CardPoints::parse_field(&self.points[i])?;
            Ok(TeamInput::new(self.calls[i], self.success[i], points))
        };
        Ok(RoundInput {
            a: team(Team::A)?,
            b: team(Team::B)?,
            double_win: self.double_win,
        })
    }

    /// Clears the entries, keeping the cursor where it is.
    pub fn clear(&mut self) {
        *self = Self {
            selected: self.selected,
            ..Self::default()
        };
    }

    fn field(&self) -> Field {
        FIELDS[self.selected]
    }

    /// Applies a key press to the selected field.
    pub fn handle_key(&mut self, code: KeyCode) {
        match (self.field(), code) {
            (_, KeyCode::Up | KeyCode::BackTab) => {
                self.selected = (self.selected + FIELDS.len() - 1) % FIELDS.len();
            }
            (_, KeyCode::Down | KeyCode::Tab) => {
                self.selected = (self.selected + 1) % FIELDS.len();
            }
            (Field::Call(team), KeyCode::Right | KeyCode::Char(' ')) => {
                let call = &mut self.calls[index(team)];
                *call = call.next();
            }
            (Field::Call(team), KeyCode::Left) => {
                let call = &mut self.calls[index(team)];
                *call = call.prev();
            }
            (Field::Success(team), KeyCode::Left | KeyCode::Right | KeyCode::Char(' ')) => {
                let success = &mut self.success[index(team)];
                *success = !*success;
            }
            (Field::Points(team), KeyCode::Char(c)) if c.is_ascii_digit() || c == '-' => {
                let points = &mut self.points[index(team)];
                if points.len() < 4 {
                    points.push(c);
                }
            }
            (Field::Points(team), KeyCode::Backspace) => {
                self.points[index(team)].pop();
            }
            (Field::Points(team), KeyCode::Delete) => self.points[index(team)].clear(),
            (Field::DoubleWin, KeyCode::Right | KeyCode::Char(' ')) => {
                self.double_win = cycle_double_win(self.double_win);
            }
            (Field::DoubleWin, KeyCode::Left) => {
                self.double_win = cycle_double_win(cycle_double_win(self.double_win));
            }
            _ => (),
        }
    }

    fn line(&self, field: Field) -> Line<'static> {
        let (label, value) = match field {
            Field::Call(team) => (
                format!("{team} call"),
                format!("‹ {} ›", self.calls[index(team)]),
            ),
            Field::Success(team) => {
                let i = index(team);
                let value = match (self.calls[i], self.success[i]) {
                    (TichuCall::None, _) => "-".to_string(),
                    (_, true) => "[x] made it".to_string(),
                    (_, false) => "[ ] failed".to_string(),
                };
                ("  succeeded".to_string(), value)
            }
            Field::Points(team) => {
                let points = &self.points[index(team)];
                let value = if points.is_empty() {
                    "_".to_string()
                } else {
                    points.clone()
                };
                ("  card points".to_string(), value)
            }
            Field::DoubleWin => {
                let value = match self.double_win {
                    None => "‹ none ›".to_string(),
                    Some(team) => format!("‹ {team} ›"),
                };
                ("Double win".to_string(), value)
            }
        };
        let line = Line::from(vec![
            Span::raw(format!("{label:<14}")),
            Span::raw(value),
        ]);
        if field == self.field() {
            line.reversed()
        } else {
            line
        }
    }
}

impl Widget for &RoundForm {
    fn render(self, area: Rect, buf: &mut Buffer)
    where
        Self: Sized,
    {
        let lines: Vec<_> = FIELDS.iter().map(|&f| self.line(f)).collect();
        Paragraph::new(lines)
            .block(Block::bordered().title(" Round "))
            .render(area, buf);
    }
}

#[cfg(test)]
mod test {
    use assert_matches::assert_matches;

    use super::*;
    use crate::tichu::round::score;
    use crate::tichu::RoundResult;

    fn type_keys(form: &mut RoundForm, keys: &[KeyCode]) {
        for &key in keys {
            form.handle_key(key);
        }
    }

    #[test]
    fn test_form_input() {
        let mut form = RoundForm::default();
        assert_matches!(form.input().map(|i| score(&i)), Ok(Err(InputError::MissingScore)));

        // Team A calls tichu and makes it, and takes 70 card points.
        type_keys(
            &mut form,
            &[
                KeyCode::Right,
                KeyCode::Down,
                KeyCode::Char(' '),
                KeyCode::Down,
                KeyCode::Char('7'),
                KeyCode::Char('0'),
            ],
        );
        let input = form.input().unwrap();
        assert_eq!(input.a.call, TichuCall::Tichu);
        assert!(input.a.success);
        assert_eq!(score(&input).unwrap(), RoundResult::new(170, 30));

        form.clear();
        assert_eq!(form.field(), Field::Points(Team::A));
        assert_eq!(form.input().unwrap(), RoundInput::default());
    }

    #[test]
    fn test_form_double_win() {
        let mut form = RoundForm::default();
        type_keys(&mut form, &[KeyCode::Up, KeyCode::Left]);
        assert_eq!(form.input().unwrap().double_win, Some(Team::B));
    }

    #[test]
    fn test_form_rejects_bad_points() {
        let mut form = RoundForm::default();
        type_keys(
            &mut form,
            &[KeyCode::Down, KeyCode::Down, KeyCode::Char('2'), KeyCode::Char('0'), KeyCode::Char('0')],
        );
        assert_matches!(form.input(), Err(InputError::OutOfRange(200)));
        type_keys(&mut form, &[KeyCode::Backspace]);
        assert!(form.input().is_ok());
    }
}
