//! Tichu declarations.

use std::fmt::Display;
use std::str::FromStr;

use super::{InputError, Points};

/// A pre-round bet that the declaring team's player goes out first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TichuCall {
    #[default]
    None,
    Tichu,
    GrandTichu,
}
impl Display for TichuCall {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            TichuCall::None => "no call",
            TichuCall::Tichu => "Tichu",
            TichuCall::GrandTichu => "Grand Tichu",
        })
    }
}
impl FromStr for TichuCall {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().to_ascii_lowercase().as_str() {
            "" | "-" | "n" | "none" => TichuCall::None,
            "t" | "tichu" => TichuCall::Tichu,
            "g" | "gt" | "grand" | "grand tichu" | "grandtichu" => TichuCall::GrandTichu,
            _ => return Err(InputError::UnknownCall(s.to_string())),
        })
    }
}

impl TichuCall {
    /// All calls, from no bet to the largest.
    pub fn all_calls() -> &'static [TichuCall; 3] {
        static CALLS: [TichuCall; 3] = [TichuCall::None, TichuCall::Tichu, TichuCall::GrandTichu];
        &CALLS
    }

    /// Points won on success, or lost on failure.
    pub fn stake(self) -> Points {
        match self {
            TichuCall::None => 0,
            TichuCall::Tichu => 100,
            TichuCall::GrandTichu => 200,
        }
    }

    /// The next call in [`TichuCall::all_calls`] order, wrapping around.
    pub fn next(self) -> TichuCall {
        let calls = Self::all_calls();
        let i = calls.iter().position(|&c| c == self).unwrap_or_default();
        calls[(i + 1) % calls.len()]
    }

    /// The previous call in [`TichuCall::all_calls`] order, wrapping around.
    pub fn prev(self) -> TichuCall {
        self.next().next()
    }
}
