//! Teams and roster slots.

use std::fmt::Display;
use std::str::FromStr;

use super::InputError;

/// One of the two partnerships at the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Team {
    A,
    B,
}
impl Display for Team {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Team::A => "Team A",
            Team::B => "Team B",
        })
    }
}
impl TryFrom<char> for Team {
    type Error = ();

    fn try_from(c: char) -> Result<Self, Self::Error> {
        Ok(match c {
            'A' | 'a' => Team::A,
            'B' | 'b' => Team::B,
            _ => return Err(()),
        })
    }
}
impl FromStr for Team {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unknown = || InputError::UnknownTeam(s.to_string());
        let mut chars = s.trim().chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Team::try_from(c).map_err(|()| unknown()),
            _ => Err(unknown()),
        }
    }
}

impl Team {
    /// Both teams, in precedence order.
    pub fn all_teams() -> &'static [Team; 2] {
        static TEAMS: [Team; 2] = [Team::A, Team::B];
        &TEAMS
    }

    /// Returns an abbreviated name for the team.
    pub fn to_abbr(self) -> char {
        match self {
            Team::A => 'A',
            Team::B => 'B',
        }
    }
}

/// Parses the double-win selection: blank or "none" means no double win.
pub fn parse_double_win(s: &str) -> Result<Option<Team>, InputError> {
    match s.trim() {
        "" | "-" | "none" | "None" | "n" => Ok(None),
        other => other.parse().map(Some),
    }
}

/// A player position on the roster. Each team has two.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Slot {
    A1,
    A2,
    B1,
    B2,
}
impl Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let n = match self {
            Slot::A1 | Slot::B1 => 1,
            Slot::A2 | Slot::B2 => 2,
        };
        write!(f, "{}{n}", self.team().to_abbr())
    }
}
impl From<Slot> for Team {
    fn from(value: Slot) -> Self {
        match value {
            Slot::A1 | Slot::A2 => Team::A,
            Slot::B1 | Slot::B2 => Team::B,
        }
    }
}

impl Slot {
    /// All roster slots, in display order.
    pub fn all_slots() -> &'static [Slot; 4] {
        static SLOTS: [Slot; 4] = [Slot::A1, Slot::A2, Slot::B1, Slot::B2];
        &SLOTS
    }

    /// The team for this slot.
    pub fn team(self) -> Team {
        Team::from(self)
    }

    /// Position of the slot within [`Slot::all_slots`].
    pub fn index(self) -> usize {
        match self {
            Slot::A1 => 0,
            Slot::A2 => 1,
            Slot::B1 => 2,
            Slot::B2 => 3,
        }
    }
}

/// Player names assigned to each slot for the current match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Roster {
    names: [String; 4],
}

impl Roster {
    /// Creates a roster from names given in slot order (A1, A2, B1, B2).
    pub fn new<S: Into<String>>(names: [S; 4]) -> Self {
        Self {
            names: names.map(|n| n.into().trim().to_string()),
        }
    }

    /// Returns the name assigned to the slot. Unassigned slots are empty.
    pub fn name(&self, slot: Slot) -> &str {
        &self.names[slot.index()]
    }

    /// Assigns a name to the slot.
    pub fn set_name<S: Into<String>>(&mut self, slot: Slot, name: S) {
        self.names[slot.index()] = name.into().trim().to_string();
    }

    /// The names on the given team, including blanks.
    pub fn team_names(&self, team: Team) -> Vec<&str> {
        Slot::all_slots()
            .iter()
            .filter(|s| s.team() == team)
            .map(|&s| self.name(s))
            .collect()
    }

    /// Each slot's name paired with its team, in slot order.
    pub fn entries(&self) -> Vec<(String, Team)> {
        Slot::all_slots()
            .iter()
            .map(|&s| (self.name(s).to_string(), s.team()))
            .collect()
    }
}
