use itertools::Itertools;
use ratatui::widgets::{Block, Row, Table, Widget};

use crate::tichu::{Controller, Points, Team};

pub struct Scoreboard {
    round: usize,
    target: Points,
    names: [String; 2],
    scores: [Points; 2],
}

impl Scoreboard {
    pub fn new(controller: &Controller) -> Self {
        let game = controller.game();
        let names = Team::all_teams().map(|team| {
            controller
                .roster()
                .team_names(team)
                .into_iter()
                .filter(|n| !n.is_empty())
                .join(" & ")
        });
        let totals = game.totals();
        let scores = Team::all_teams().map(|team| totals.get(team));
        Self {
            round: game.round(),
            target: game.target_score(),
            names,
            scores,
        }
    }
}

impl Widget for Scoreboard {
    fn render(self, area: ratatui::prelude::Rect, buf: &mut ratatui::prelude::Buffer)
    where
        Self: Sized,
    {
        let [a_names, b_names] = self.names;
        let title = format!(" Round {} · first to {} ", self.round, self.target);
        Table::default()
            .header(Row::new(["", "Team A", "Team B"]))
            .rows([
                Row::new([String::from("Players"), a_names, b_names]),
                Row::new([
                    String::from("Score"),
                    self.scores[0].to_string(),
                    self.scores[1].to_string(),
                ]),
            ])
            .block(Block::bordered().title(title))
            .render(area, buf)
    }
}
