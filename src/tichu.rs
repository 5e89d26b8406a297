//! Score keeping for the game of tichu.

mod call;
mod console;
mod controller;
mod error;
mod game;
mod records;
mod round;
mod team;
#[cfg(feature = "tui")]
mod tui;
pub use self::call::TichuCall;
pub use self::console::cli_main;
pub use self::controller::Controller;
pub use self::error::{GameError, InputError, StoreError};
pub use self::game::{log_line, Game, History, Phase};
pub use self::records::{FileStore, MemoryStore, RecordStore, Records};
pub use self::round::{CardPoints, Points, RoundInput, RoundResult, TeamInput};
pub use self::team::{parse_double_win, Roster, Slot, Team};
#[cfg(feature = "tui")]
pub use self::tui::tui_main;

/// An event that occurs during a session.
#[derive(Debug, Clone)]
pub enum Event {
    /// The roster was confirmed and the match began.
    Start(Roster),
    /// A round was scored. Carries the round number.
    Round(usize, RoundResult),
    /// A round was taken back. Carries the number of the round removed.
    Undo(usize, RoundResult),
    /// A team reached the target score.
    Game(Team),
    /// The finished match was recorded.
    Saved(Team),
    /// The finished match was discarded without recording it.
    Discarded(Team),
    /// The match was abandoned.
    Reset,
    /// A player's record was deleted.
    Deleted(String),
    /// All records were deleted.
    Cleared,
    /// Something went wrong that didn't stop the session.
    Warning(String),
}
