//! End-to-end: two database files, a scripted session, then a fresh
//! "restart" that must see everything the first session wrote.

use std::io::Cursor;
use std::path::Path;
use std::sync::Arc;

use chrono::{TimeZone, Utc};
use reflect_app::config::{Config, ENTRIES_DB_VAR, USERS_DB_VAR};
use reflect_app::session;
use reflect_auth::{CredentialError, CredentialStore, HashCost, PasswordHasher};
use reflect_db::Database;
use reflect_journal::EntryStore;
use tempfile::TempDir;

const CHEAP: HashCost = HashCost {
    memory_kib: 64,
    iterations: 1,
    parallelism: 1,
};

fn open_stores(users: &Path, entries: &Path) -> (CredentialStore, EntryStore) {
    let credentials = CredentialStore::with_hasher(
        Arc::new(Database::open(users).unwrap()),
        PasswordHasher::new(CHEAP).unwrap(),
    );
    let entries = EntryStore::new(Arc::new(Database::open(entries).unwrap()));
    credentials.ensure_schema().unwrap();
    entries.ensure_schema().unwrap();
    (credentials, entries)
}

fn run_script(credentials: &CredentialStore, entries: &EntryStore, script: &str) -> String {
    let mut out = Vec::new();
    session::run(credentials, entries, Cursor::new(script.to_string()), &mut out).unwrap();
    String::from_utf8(out).unwrap()
}

#[test]
fn journal_persists_across_restarts() {
    let tmp = TempDir::new().unwrap();
    let users = tmp.path().join("users.db");
    let entries = tmp.path().join("entries.db");

    {
        let (credentials, store) = open_stores(&users, &entries);
        let output = run_script(&credentials, &store, "bob\npw1\nbob\npw1\nHello\nWorld\n:q\n");
        assert!(output.contains("Login successful!"));
    }

    let (credentials, store) = open_stores(&users, &entries);
    assert!(credentials.exists());
    assert!(matches!(
        credentials.register("bob", "pw2"),
        Err(CredentialError::AlreadyExists(_))
    ));
    assert!(credentials.authenticate("bob", "pw1"));
    assert!(!credentials.authenticate("bob", "pw2"));

    let loaded = store.load_all().unwrap();
    let ids: Vec<_> = loaded.iter().map(|e| e.id).collect();
    let bodies: Vec<_> = loaded.iter().map(|e| e.body.as_str()).collect();
    assert_eq!(ids, [1, 2]);
    assert_eq!(bodies, ["Hello", "World"]);

    let output = run_script(&credentials, &store, "bob\npw1\n:q\n");
    assert!(output.find("World").unwrap() < output.find("Hello").unwrap());
}

#[test]
fn stores_can_share_one_file() {
    let tmp = TempDir::new().unwrap();
    let shared = tmp.path().join("reflect.db");
    let path = shared.to_string_lossy().to_string();

    let config = Config::from_lookup(|key| match key {
        USERS_DB_VAR | ENTRIES_DB_VAR => Some(path.clone()),
        _ => None,
    });
    assert!(config.shared_file());

    let db = Arc::new(Database::open(&config.users_db).unwrap());
    let credentials = CredentialStore::with_hasher(db.clone(), PasswordHasher::new(CHEAP).unwrap());
    let store = EntryStore::new(db);
    credentials.ensure_schema().unwrap();
    store.ensure_schema().unwrap();

    credentials.register("alice", "pw").unwrap();
    let t = Utc.with_ymd_and_hms(2024, 1, 1, 8, 0, 0).unwrap();
    assert_eq!(store.append("one file", t).unwrap(), 1);

    assert!(credentials.authenticate("alice", "pw"));
    assert_eq!(store.load_all().unwrap()[0].timestamp, t);
}

#[test]
fn schema_setup_is_repeatable_on_every_start() {
    let tmp = TempDir::new().unwrap();
    let users = tmp.path().join("users.db");
    let entries = tmp.path().join("entries.db");

    for _ in 0..3 {
        let (credentials, store) = open_stores(&users, &entries);
        credentials.ensure_schema().unwrap();
        store.ensure_schema().unwrap();
    }

    let (credentials, store) = open_stores(&users, &entries);
    assert!(!credentials.exists());
    assert!(store.load_all().unwrap().is_empty());
}
