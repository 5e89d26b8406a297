//! Match management.
//!
//! A match consists of a sequence of rounds, by which [`Team`]s score points. A team wins the
//! match by reaching the target score, a thousand points unless configured otherwise.

use std::fmt::Display;

use delegate::delegate;

use super::{round, GameError, Points, RoundInput, RoundResult, Team};


/// The default target score.
pub const TARGET_SCORE: Points = 1000;

/// Where a match is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    /// Players are being assigned to teams.
    #[default]
    Setup,
    /// Rounds are being scored.
    Playing,
    /// A team has reached the target score.
    Finished,
}
impl Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Phase::Setup => "setup",
            Phase::Playing => "playing",
            Phase::Finished => "finished",
        })
    }
}

/// Running totals for both teams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub a: Points,
    pub b: Points,
}

impl Totals {
    /// The specified team's total.
    pub fn get(&self, team: Team) -> Points {
        match team {
            Team::A => self.a,
            Team::B => self.b,
        }
    }

    fn add(&mut self, result: &RoundResult) {
        self.a += result.a;
        self.b += result.b;
    }

    fn sub(&mut self, result: &RoundResult) {
        self.a -= result.a;
        self.b -= result.b;
    }
}

/// Results of the rounds played so far, oldest first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct History {
    rounds: Vec<RoundResult>,
}

impl History {
    delegate! {
        to self.rounds {
            pub fn len(&self) -> usize;
            pub fn is_empty(&self) -> bool;
            fn push(&mut self, result: RoundResult);
            fn pop(&mut self) -> Option<RoundResult>;
        }
    }

    /// Sums the results of all rounds.
    pub fn sum(&self) -> Totals {
        let mut totals = Totals::default();
        for result in &self.rounds {
            totals.add(result);
        }
        totals
    }

    /// Renders each round as a line for the round log.
    pub fn lines(&self) -> impl Iterator<Item = String> + '_ {
        self.rounds
            .iter()
            .enumerate()
            .map(|(i, result)| log_line(i + 1, result))
    }
}

/// Formats a round log entry.
pub fn log_line(round: usize, result: &RoundResult) -> String {
    format!("{round:>2}R  {result}")
}

/// The state of a match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Game {
    /// The current phase.
    phase: Phase,
    /// The current scores.
    totals: Totals,
    /// The rounds played so far.
    history: History,
    /// The target score.
    target_score: Points,
}

impl Default for Game {
    fn default() -> Self {
        Self {
            phase: Phase::Setup,
            totals: Totals::default(),
            history: History::default(),
            target_score: TARGET_SCORE,
        }
    }
}

impl Game {
    /// Sets the target score. Targets below one point are raised to one, so that a match never
    /// starts already won.
    pub fn with_target_score(mut self, score: Points) -> Self {
        self.target_score = score.max(1);
        self
    }

    /// The score required to win.
    pub fn target_score(&self) -> Points {
        self.target_score
    }

    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The running totals.
    pub fn totals(&self) -> Totals {
        self.totals
    }

    /// The specified team's running total.
    pub fn score(&self, team: Team) -> Points {
        self.totals.get(team)
    }

    /// The rounds played so far.
    pub fn history(&self) -> &History {
        &self.history
    }

    /// The number of the round about to be played, starting at one.
    pub fn round(&self) -> usize {
        self.history.len() + 1
    }

    /// Leaves setup and begins scoring rounds.
    pub fn start(&mut self) -> Result<(), GameError> {
        if self.phase != Phase::Setup {
            return Err(GameError::AlreadyStarted);
        }
        self.phase = Phase::Playing;
        Ok(())
    }

    /// Scores a round and adds it to the match. On error the match is left untouched.
    pub fn apply_round(&mut self, input: &RoundInput) -> Result<RoundResult, GameError> {
        match self.phase {
            Phase::Setup => return Err(GameError::NotStarted),
            Phase::Finished => return Err(GameError::GameOver),
            Phase::Playing => (),
        }
        let result = round::score(input)?;
        self.totals.add(&result);
        self.history.push(result);
        debug_assert_eq!(self.totals, self.history.sum());
        if self.winner().is_some() {
            self.phase = Phase::Finished;
        }
        Ok(result)
    }

    /// Removes the most recent round. Undoing the winning round reopens the match.
    pub fn undo(&mut self) -> Result<RoundResult, GameError> {
        let result = self.history.pop().ok_or(GameError::EmptyHistory)?;
        self.totals.sub(&result);
        debug_assert_eq!(self.totals, self.history.sum());
        self.phase = match self.winner() {
            Some(_) => Phase::Finished,
            None => Phase::Playing,
        };
        Ok(result)
    }

    /// Returns the winning team, if either has reached the target score. When both have, team A
    /// takes precedence.
    pub fn winner(&self) -> Option<Team> {
        Team::all_teams()
            .iter()
            .copied()
            .find(|&team| self.score(team) >= self.target_score)
    }

    /// Discards all rounds and returns to setup.
    pub fn reset(&mut self) {
        *self = Self::default().with_target_score(self.target_score);
    }
}
