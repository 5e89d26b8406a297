use std::fs;
use std::path::PathBuf;

use assert_matches::assert_matches;
use maplit::btreemap;

use super::*;

impl Records {
    pub(crate) fn len(&self) -> usize {
        self.players.len()
    }

    pub(crate) fn get(&self, name: &str) -> Option<&PlayerRecord> {
        self.players.get(name)
    }
}

fn roster(entries: &[(&str, Team)]) -> Vec<(String, Team)> {
    entries
        .iter()
        .map(|(name, team)| (name.to_string(), *team))
        .collect()
}

fn records_fixture() -> Records {
    Records {
        players: btreemap! {
            "Alice".to_string() => PlayerRecord::new("Alice", 3, 1),
            "Bob".to_string() => PlayerRecord::new("Bob", 1, 3),
            "Carol".to_string() => PlayerRecord::new("Carol", 3, 0),
        },
    }
}

/// A record file path unique to this test process.
fn temp_path(name: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("tichu-{}-{name}.json", std::process::id()));
    let _ = fs::remove_file(&path);
    path
}

#[test]
fn test_win_rate() {
    assert_eq!(win_rate(&PlayerRecord::new("x", 0, 0)), "0.0%");
    assert_eq!(win_rate(&PlayerRecord::new("x", 3, 1)), "75.0%");
    assert_eq!(win_rate(&PlayerRecord::new("x", 1, 2)), "33.3%");
    assert_eq!(PlayerRecord::new("x", 2, 0).win_rate(), "100.0%");
}

#[test]
fn test_record_match() {
    let mut records = records_fixture();
    let before = records.clone();
    records.record_match(
        Team::A,
        &roster(&[("Alice", Team::A), ("Bob", Team::B)]),
    );
    assert_eq!(records.get("Alice"), Some(&PlayerRecord::new("Alice", 4, 1)));
    assert_eq!(records.get("Bob"), Some(&PlayerRecord::new("Bob", 1, 4)));
    assert_eq!(records.get("Carol"), before.get("Carol"));
}

#[test]
fn test_record_match_new_and_blank_names() {
    let mut records = Records::default();
    records.record_match(
        Team::B,
        &roster(&[("Dave", Team::A), ("", Team::A), ("Erin", Team::B), ("", Team::B)]),
    );
    assert_eq!(records.len(), 2);
    assert_eq!(records.get("Dave"), Some(&PlayerRecord::new("Dave", 0, 1)));
    assert_eq!(records.get("Erin"), Some(&PlayerRecord::new("Erin", 1, 0)));
    assert_eq!(records.get(""), None);
}

#[test]
fn test_record_match_duplicates_count_twice() {
    let mut records = Records::default();
    records.record_match(
        Team::A,
        &roster(&[("Alice", Team::A), ("Alice", Team::B)]),
    );
    assert_eq!(records.get("Alice"), Some(&PlayerRecord::new("Alice", 1, 1)));
}

#[test]
fn test_standings_and_names() {
    let records = records_fixture();
    let order: Vec<_> = records
        .standings()
        .iter()
        .map(|r| r.name.as_str())
        .collect();
    assert_eq!(order, vec!["Alice", "Carol", "Bob"]);
    assert_eq!(records.names(), vec!["Alice", "Bob", "Carol"]);
}

#[test]
fn test_deserialize_by_field_name() {
    let json = r#"[
        {"losses": 2, "name": "Alice", "wins": 5},
        {"wins": 1, "losses": 0, "name": ""},
        {"name": "Bob", "wins": 0, "losses": 1},
        {"name": "Bob", "wins": 4, "losses": 4}
    ]"#;
    let records: Records = serde_json::from_str(json).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records.get("Alice"), Some(&PlayerRecord::new("Alice", 5, 2)));
    assert_eq!(records.get("Bob"), Some(&PlayerRecord::new("Bob", 4, 4)));
}

#[test]
fn test_memory_store() {
    let mut store = MemoryStore::from(records_fixture());
    assert!(store.delete_one("Bob").unwrap());
    assert!(!store.delete_one("Bob").unwrap());
    store
        .record_match(Team::B, &roster(&[("Alice", Team::B)]))
        .unwrap();
    let records = store.load().unwrap();
    assert_eq!(records.names(), vec!["Alice", "Carol"]);
    assert_eq!(records.get("Alice").map(|r| r.wins), Some(4));
    store.delete_all().unwrap();
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_file_store_missing_file() {
    let path = temp_path("missing");
    let mut store = FileStore::new(&path);
    assert!(store.load().unwrap().is_empty());
    assert!(!store.delete_one("Alice").unwrap());
    store.delete_all().unwrap();
    assert!(!path.exists());
}

#[test]
fn test_file_store_persists() {
    let path = temp_path("persists");
    let mut store = FileStore::new(&path);
    store
        .record_match(
            Team::A,
            &roster(&[("Alice", Team::A), ("Bob", Team::B)]),
        )
        .unwrap();
    store
        .record_match(Team::B, &roster(&[("Alice", Team::A)]))
        .unwrap();

    let reopened = FileStore::new(&path);
    let records = reopened.load().unwrap();
    assert_eq!(records.get("Alice"), Some(&PlayerRecord::new("Alice", 1, 1)));
    assert_eq!(records.get("Bob"), Some(&PlayerRecord::new("Bob", 0, 1)));

    store.delete_all().unwrap();
    assert!(!path.exists());
    assert!(store.load().unwrap().is_empty());
}

#[test]
fn test_file_store_corrupt() {
    let path = temp_path("corrupt");
    fs::write(&path, "name,wins,losses\nAlice,1,0\n").unwrap();
    let mut store = FileStore::new(&path);
    assert_matches!(store.load(), Err(StoreError::Corrupt { .. }));
    assert_matches!(
        store.record_match(Team::A, &roster(&[("Bob", Team::A)])),
        Err(StoreError::Corrupt { .. })
    );
    // The unreadable file is left alone.
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "name,wins,losses\nAlice,1,0\n"
    );
    fs::remove_file(&path).unwrap();
}

#[test]
fn test_file_store_failed_save_keeps_table() {
    let path = temp_path("staging");
    let mut store = FileStore::new(&path);
    store
        .record_match(Team::A, &roster(&[("Alice", Team::A)]))
        .unwrap();
    let before = fs::read_to_string(&path).unwrap();

    // A directory in the staging file's place makes the write fail before the rename.
    let staging = store.staging_path();
    assert!(!staging.exists());
    fs::create_dir(&staging).unwrap();
    assert_matches!(
        store.record_match(Team::B, &roster(&[("Bob", Team::B)])),
        Err(StoreError::Write { .. })
    );
    assert_eq!(fs::read_to_string(&path).unwrap(), before);
    assert_eq!(store.load().unwrap().names(), vec!["Alice"]);

    fs::remove_dir(&staging).unwrap();
    store.delete_all().unwrap();
}
