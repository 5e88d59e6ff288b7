use rusqlite::Connection;
use todokeep_core::db::open_db_in_memory;
use todokeep_core::{SqliteStateRepository, StateRepoError, StateRepository};

#[test]
fn set_get_and_remove_round_trip() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::try_new(&conn).unwrap();

    assert_eq!(repo.get_item("todolist-data").unwrap(), None);

    repo.set_item("todolist-data", "[]").unwrap();
    assert_eq!(repo.get_item("todolist-data").unwrap().as_deref(), Some("[]"));

    repo.set_item("todolist-data", "[{}]").unwrap();
    assert_eq!(
        repo.get_item("todolist-data").unwrap().as_deref(),
        Some("[{}]")
    );

    repo.remove_item("todolist-data").unwrap();
    repo.remove_item("todolist-data").unwrap();
    assert_eq!(repo.get_item("todolist-data").unwrap(), None);
}

#[test]
fn keys_are_isolated_from_each_other() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::try_new(&conn).unwrap();

    repo.set_item("todolist-data", "[]").unwrap();
    repo.set_item("todolist-theme", "forest").unwrap();

    assert_eq!(
        repo.get_item("todolist-theme").unwrap().as_deref(),
        Some("forest")
    );
    assert_eq!(repo.get_item("todolist-data").unwrap().as_deref(), Some("[]"));
}

#[test]
fn owned_connection_works_like_borrowed() {
    let repo = SqliteStateRepository::try_new(open_db_in_memory().unwrap()).unwrap();
    repo.set_item("k", "v").unwrap();
    assert_eq!(repo.get_item("k").unwrap().as_deref(), Some("v"));
}

#[test]
fn blank_key_is_rejected() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteStateRepository::try_new(&conn).unwrap();

    let err = repo.set_item("  ", "value").unwrap_err();
    assert!(matches!(err, StateRepoError::InvalidKey));
}

#[test]
fn try_new_rejects_unmigrated_connection() {
    let conn = Connection::open_in_memory().unwrap();

    let err = SqliteStateRepository::try_new(&conn).err().unwrap();
    assert!(matches!(
        err,
        StateRepoError::UninitializedConnection {
            actual_version: 0,
            ..
        }
    ));
}

#[test]
fn try_new_rejects_missing_table_at_current_version() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE kv_store;").unwrap();

    let err = SqliteStateRepository::try_new(&conn).err().unwrap();
    assert!(matches!(err, StateRepoError::MissingRequiredTable("kv_store")));
}
