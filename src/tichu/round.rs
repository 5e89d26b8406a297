//! Round scoring
//!
//! Each round, both teams may have declared a [`TichuCall`], and the card points are split
//! between the teams. Scoring a round is a pure function of the [`RoundInput`]:
//!
//! 1. Each team wins or loses the stake of its own call, independently of the other team.
//! 2. If one team went out double, it takes 200 points and the other team takes nothing from the
//!    cards. Otherwise the 100 card points are split as entered. When only one team's points were
//!    entered, the other team takes the remainder of the pot.
//! 3. The round result is the sum of the two, per team.

use std::fmt::Display;
use std::str::FromStr;

use super::{InputError, Team, TichuCall};

#[cfg(test)]
pub(super) mod test;

/// Score arithmetic is done in signed points; totals may go negative.
pub type Points = i32;

/// Card points in a round, before any tichu bonus.
pub const POT: Points = 100;

/// Card points awarded to a team that goes out double.
pub const DOUBLE_WIN: Points = 200;

/// Card points one team took in a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CardPoints(u8);

impl TryFrom<i64> for CardPoints {
    type Error = InputError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        u8::try_from(value)
            .ok()
            .filter(|&v| Points::from(v) <= POT)
            .map(CardPoints)
            .ok_or(InputError::OutOfRange(value))
    }
}
impl FromStr for CardPoints {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .trim()
            .parse()
            .map_err(|_| InputError::NonNumeric(s.to_string()))?;
        CardPoints::try_from(value)
    }
}
impl Display for CardPoints {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl CardPoints {
    /// Parses a raw input field. A blank field means the points were not entered.
    pub fn parse_field(s: &str) -> Result<Option<Self>, InputError> {
        if s.trim().is_empty() {
            Ok(None)
        } else {
            s.parse().map(Some)
        }
    }

    /// The points, as a score delta.
    pub fn value(self) -> Points {
        Points::from(self.0)
    }

    /// The other team's share of the pot.
    pub fn remainder(self) -> Points {
        POT - self.value()
    }
}

/// What one team declared for a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TeamInput {
    /// The team's tichu call, if any.
    pub call: TichuCall,
    /// Whether the call succeeded. Ignored when there is no call.
    pub success: bool,
    /// Card points taken by the team, if entered.
    pub points: Option<CardPoints>,
}

impl TeamInput {
    /// Creates a new [`TeamInput`].
    pub fn new(call: TichuCall, success: bool, points: Option<CardPoints>) -> Self {
        Self {
            call,
            success,
            points,
        }
    }

    /// The bonus or penalty for the team's call.
    pub fn bonus(&self) -> Points {
        let stake = self.call.stake();
        if self.success {
            stake
        } else {
            -stake
        }
    }
}

/// Everything entered for one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundInput {
    pub a: TeamInput,
    pub b: TeamInput,
    /// The team that went out double, if any.
    pub double_win: Option<Team>,
}

impl RoundInput {
    /// Returns the specified team's input.
    pub fn team(&self, team: Team) -> &TeamInput {
        match team {
            Team::A => &self.a,
            Team::B => &self.b,
        }
    }
}

/// Points scored by each team in one round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RoundResult {
    pub a: Points,
    pub b: Points,
}

impl Display for RoundResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "A: {:+}  B: {:+}", self.a, self.b)
    }
}

impl RoundResult {
    /// Creates a new [`RoundResult`].
    pub fn new(a: Points, b: Points) -> Self {
        Self { a, b }
    }

    fn get_mut(&mut self, team: Team) -> &mut Points {
        match team {
            Team::A => &mut self.a,
            Team::B => &mut self.b,
        }
    }
}

/// Splits the card points between the teams.
fn pot(input: &RoundInput) -> Result<RoundResult, InputError> {
    if let Some(team) = input.double_win {
        let mut result = RoundResult::default();
        *result.get_mut(team) = DOUBLE_WIN;
        return Ok(result);
    }
    match (input.a.points, input.b.points) {
        (Some(a), Some(b)) => Ok(RoundResult::new(a.value(), b.value())),
        (Some(a), None) => Ok(RoundResult::new(a.value(), a.remainder())),
        (None, Some(b)) => Ok(RoundResult::new(b.remainder(), b.value())),
        (None, None) => Err(InputError::MissingScore),
    }
}

/// Scores a round.
pub fn score(input: &RoundInput) -> Result<RoundResult, InputError> {
    let mut result = pot(input)?;
    for &team in Team::all_teams() {
        *result.get_mut(team) += input.team(team).bonus();
    }
    Ok(result)
}
