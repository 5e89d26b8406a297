//! Command handling for a scorekeeping session.
//!
//! The [`Controller`] owns the match in progress and the roster, and triggers persistence of
//! player records when a finished match is saved. Front-ends invoke one method per user command
//! and then drain the [`Event`] queue to learn what changed.

use std::collections::VecDeque;

use super::{
    Event, Game, GameError, Phase, Points, RecordStore, Records, RoundInput, RoundResult,
    Roster, StoreError, Team,
};


pub struct Controller {
    /// The match in progress.
    game: Game,
    /// Player names for the match in progress.
    roster: Roster,
    /// Where player records are kept.
    store: Box<dyn RecordStore>,
    /// Events not yet seen by the front-end.
    events: VecDeque<Event>,
}

impl Controller {
    /// Creates a new [`Controller`], in setup.
    pub fn new(store: Box<dyn RecordStore>) -> Self {
        Self {
            game: Game::default(),
            roster: Roster::default(),
            store,
            events: VecDeque::new(),
        }
    }

    /// Sets the target score.
    pub fn with_target_score(mut self, score: Points) -> Self {
        self.game = self.game.with_target_score(score);
        self
    }

    /// Returns an immutable reference to the match.
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// The current roster.
    pub fn roster(&self) -> &Roster {
        &self.roster
    }

    /// Pops the oldest event from the queue of events.
    pub fn pop_event(&mut self) -> Option<Event> {
        self.events.pop_front()
    }

    /// Confirms the roster and starts scoring rounds.
    pub fn start(&mut self, roster: Roster) -> Result<(), GameError> {
        self.game.start()?;
        self.roster = roster;
        self.events.push_back(Event::Start(self.roster.clone()));
        Ok(())
    }

    /// Scores a round. Emits [`Event::Game`] if the round decides the match.
    pub fn apply_round(&mut self, input: &RoundInput) -> Result<RoundResult, GameError> {
        let round = self.game.round();
        let result = self.game.apply_round(input)?;
        self.events.push_back(Event::Round(round, result));
        if let Some(team) = self.check_win() {
            self.events.push_back(Event::Game(team));
        }
        Ok(result)
    }

    /// Takes back the most recent round.
    pub fn undo(&mut self) -> Result<RoundResult, GameError> {
        let result = self.game.undo()?;
        self.events.push_back(Event::Undo(self.game.round(), result));
        Ok(result)
    }

    /// Returns the winning team, if the match is over.
    pub fn check_win(&self) -> Option<Team> {
        self.game.winner()
    }

    /// Discards the match and roster and returns to setup. Records are not touched.
    pub fn reset(&mut self) {
        self.game.reset();
        self.roster = Roster::default();
        self.events.push_back(Event::Reset);
    }

    /// Records the finished match for every named player, then returns to setup. If the records
    /// cannot be written, the finished match is kept so that saving can be retried.
    pub fn save_and_restart(&mut self) -> Result<Team, GameError> {
        let winner = self.finished_winner()?;
        self.store.record_match(winner, &self.roster.entries())?;
        self.game.reset();
        self.events.push_back(Event::Saved(winner));
        Ok(winner)
    }

    /// Returns to setup without recording the finished match.
    pub fn discard_and_restart(&mut self) -> Result<(), GameError> {
        let winner = self.finished_winner()?;
        self.game.reset();
        self.events.push_back(Event::Discarded(winner));
        Ok(())
    }

    fn finished_winner(&self) -> Result<Team, GameError> {
        match (self.game.phase(), self.game.winner()) {
            (Phase::Finished, Some(team)) => Ok(team),
            (Phase::Setup, _) => Err(GameError::NotStarted),
            _ => Err(GameError::NotOver),
        }
    }

    /// Loads the record table.
    pub fn records(&self) -> Result<Records, StoreError> {
        self.store.load()
    }

    /// Names of previously recorded players, sorted, for suggesting at setup. An unreadable
    /// store yields no suggestions and a warning.
    pub fn known_names(&mut self) -> Vec<String> {
        match self.store.load() {
            Ok(records) => records.names(),
            Err(e) => {
                self.events.push_back(Event::Warning(e.to_string()));
                vec![]
            }
        }
    }

    /// Deletes a player's record. Deleting an unknown player is not an error.
    pub fn delete_player(&mut self, name: &str) -> Result<bool, StoreError> {
        let deleted = self.store.delete_one(name)?;
        if deleted {
            self.events.push_back(Event::Deleted(name.to_string()));
        }
        Ok(deleted)
    }

    /// Deletes every player's record.
    pub fn delete_all(&mut self) -> Result<(), StoreError> {
        self.store.delete_all()?;
        self.events.push_back(Event::Cleared);
        Ok(())
    }
}
