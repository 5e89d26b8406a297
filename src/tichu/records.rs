//! Player win/loss records.
//!
//! Records are kept in a table keyed by player name. The table is loaded, modified, and written
//! back in full on every change; there is no long-lived handle to the backing store, and no
//! protection against concurrent writers.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{StoreError, Team};

#[cfg(test)]
mod test;

/// Accumulated results for one player.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRecord {
    pub name: String,
    pub wins: u32,
    pub losses: u32,
}

impl PlayerRecord {
    /// Creates a new [`PlayerRecord`].
    pub fn new<S: Into<String>>(name: S, wins: u32, losses: u32) -> Self {
        Self {
            name: name.into(),
            wins,
            losses,
        }
    }

    /// Total matches played.
    pub fn played(&self) -> u32 {
        self.wins + self.losses
    }

    /// The win rate as a percentage string.
    pub fn win_rate(&self) -> String {
        win_rate(self)
    }
}

/// Formats the share of matches won, to one decimal place, e.g. `"75.0%"`. A player with no
/// matches has a rate of `"0.0%"`.
pub fn win_rate(record: &PlayerRecord) -> String {
    let played = record.played();
    if played == 0 {
        return "0.0%".into();
    }
    let rate = f64::from(record.wins) / f64::from(played) * 100.0;
    format!("{rate:.1}%")
}

/// The record table, indexed by player name.
///
/// Serialized as a list of rows, so readers rely on field names rather than column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<PlayerRecord>", into = "Vec<PlayerRecord>")]
pub struct Records {
    players: BTreeMap<String, PlayerRecord>,
}

impl From<Vec<PlayerRecord>> for Records {
    fn from(rows: Vec<PlayerRecord>) -> Self {
        let players = rows
            .into_iter()
            .filter(|r| !r.name.is_empty())
            .map(|r| (r.name.clone(), r))
            .collect();
        Self { players }
    }
}
impl From<Records> for Vec<PlayerRecord> {
    fn from(records: Records) -> Self {
        records.players.into_values().collect()
    }
}

impl Records {
    /// Returns true if there are no records.
    pub fn is_empty(&self) -> bool {
        self.players.is_empty()
    }

    /// All recorded player names, sorted.
    pub fn names(&self) -> Vec<String> {
        self.players.keys().cloned().collect()
    }

    /// Records, most wins first. Ties are broken by name.
    pub fn standings(&self) -> Vec<&PlayerRecord> {
        self.players
            .values()
            .sorted_by(|x, y| y.wins.cmp(&x.wins).then_with(|| x.name.cmp(&y.name)))
            .collect()
    }

    /// Credits every named player on the roster with a win or a loss. Blank names are skipped.
    /// A name listed more than once is credited once per listing.
    pub fn record_match(&mut self, winner: Team, roster: &[(String, Team)]) {
        for (name, team) in roster {
            if name.is_empty() {
                continue;
            }
            let record = self
                .players
                .entry(name.clone())
                .or_insert_with(|| PlayerRecord::new(name.clone(), 0, 0));
            if *team == winner {
                record.wins += 1;
            } else {
                record.losses += 1;
            }
        }
    }

    /// Removes a player's record, returning true if one was present.
    pub fn remove(&mut self, name: &str) -> bool {
        self.players.remove(name).is_some()
    }
}

/// Durable storage for the record table.
pub trait RecordStore {
    /// Reads the full table. A store that has never been written is empty.
    fn load(&self) -> Result<Records, StoreError>;

    /// Replaces the full table.
    fn save(&mut self, records: &Records) -> Result<(), StoreError>;

    /// Discards every record.
    fn clear(&mut self) -> Result<(), StoreError>;

    /// Loads the table, credits the roster with the match outcome, and writes it back.
    fn record_match(&mut self, winner: Team, roster: &[(String, Team)]) -> Result<(), StoreError> {
        let mut records = self.load()?;
        records.record_match(winner, roster);
        self.save(&records)
    }

    /// Deletes one player's record. Returns false, without writing, if there was none.
    fn delete_one(&mut self, name: &str) -> Result<bool, StoreError> {
        let mut records = self.load()?;
        if !records.remove(name) {
            return Ok(false);
        }
        self.save(&records)?;
        Ok(true)
    }

    /// Deletes all records.
    fn delete_all(&mut self) -> Result<(), StoreError> {
        self.clear()
    }
}

/// A [`RecordStore`] backed by a JSON file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    /// Creates a store for the specified path. The file need not exist yet.
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    /// Sibling file that a new table is written to before it replaces the backing file.
    fn staging_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_error(&self, source: io::Error) -> StoreError {
        StoreError::Write {
            path: self.path.clone(),
            source,
        }
    }
}

impl RecordStore for FileStore {
    fn load(&self) -> Result<Records, StoreError> {
        let data = match fs::read_to_string(&self.path) {
            Ok(data) => data,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Records::default()),
            Err(source) => {
                return Err(StoreError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        serde_json::from_str(&data).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Writes the table to a staging file, then renames it over the backing file, so a failed
    /// write leaves the previous table intact.
    fn save(&mut self, records: &Records) -> Result<(), StoreError> {
        let staging = self.staging_path();
        let file = File::create(&staging).map_err(|e| self.write_error(e))?;
        let mut writer = BufWriter::new(file);
        let written = serde_json::to_writer_pretty(&mut writer, records)
            .map_err(io::Error::from)
            .and_then(|()| writer.flush());
        drop(writer);
        if let Err(e) = written.and_then(|()| fs::rename(&staging, &self.path)) {
            let _ = fs::remove_file(&staging);
            return Err(self.write_error(e));
        }
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        match fs::remove_file(&self.path) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => Err(self.write_error(e)),
            _ => Ok(()),
        }
    }
}

/// A [`RecordStore`] that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Records,
}

impl From<Records> for MemoryStore {
    fn from(records: Records) -> Self {
        Self { records }
    }
}

impl RecordStore for MemoryStore {
    fn load(&self) -> Result<Records, StoreError> {
        Ok(self.records.clone())
    }

    fn save(&mut self, records: &Records) -> Result<(), StoreError> {
        self.records = records.clone();
        Ok(())
    }

    fn clear(&mut self) -> Result<(), StoreError> {
        self.records = Records::default();
        Ok(())
    }
}
