use chrono::{NaiveDate, TimeZone, Utc};
use rusqlite::Connection;
use std::cell::RefCell;
use todokeep_core::db::{open_db, open_db_in_memory};
use todokeep_core::{
    SqliteStateRepository, StateRepoError, StateRepoResult, StateRepository, StoreConfig,
    TodoStore, DATA_STORAGE_KEY,
};

fn setup() -> Connection {
    open_db_in_memory().unwrap()
}

fn raw_payload(conn: &Connection) -> Option<String> {
    SqliteStateRepository::try_new(conn)
        .unwrap()
        .get_item(DATA_STORAGE_KEY)
        .unwrap()
}

/// Records writes and serves a fixed payload.
#[derive(Default)]
struct RecordingRepo {
    stored: Option<String>,
    writes: RefCell<Vec<String>>,
    fail_writes: bool,
}

impl StateRepository for RecordingRepo {
    fn get_item(&self, _key: &str) -> StateRepoResult<Option<String>> {
        Ok(self.stored.clone())
    }

    fn set_item(&self, key: &str, value: &str) -> StateRepoResult<()> {
        if self.fail_writes {
            return Err(StateRepoError::MissingRequiredTable("kv_store"));
        }
        assert_eq!(key, DATA_STORAGE_KEY);
        self.writes.borrow_mut().push(value.to_string());
        Ok(())
    }

    fn remove_item(&self, _key: &str) -> StateRepoResult<()> {
        Ok(())
    }
}

/// Fails every read.
struct BrokenRepo;

impl StateRepository for BrokenRepo {
    fn get_item(&self, _key: &str) -> StateRepoResult<Option<String>> {
        Err(StateRepoError::MissingRequiredTable("kv_store"))
    }

    fn set_item(&self, _key: &str, _value: &str) -> StateRepoResult<()> {
        Err(StateRepoError::MissingRequiredTable("kv_store"))
    }

    fn remove_item(&self, _key: &str) -> StateRepoResult<()> {
        Ok(())
    }
}

#[test]
fn tree_round_trips_through_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("todokeep.sqlite3");
    let due = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();

    let (folder, checklist, done, open) = {
        let conn = open_db(&path).unwrap();
        let mut store = TodoStore::load(SqliteStateRepository::try_new(&conn).unwrap());
        let folder = store.add_folder("Personal", "#22c55e");
        let checklist = store.add_checklist(&folder, "Groceries").unwrap();
        let done = store
            .add_task(&folder, &checklist, "Buy milk", Some(due))
            .unwrap();
        let open = store.add_task(&folder, &checklist, "Buy eggs", None).unwrap();
        store.toggle_task(&folder, &checklist, &done);
        (folder, checklist, done, open)
    };

    let conn = open_db(&path).unwrap();
    let store = TodoStore::load(SqliteStateRepository::try_new(&conn).unwrap());

    let loaded = store.folder(&folder).unwrap();
    assert_eq!(loaded.name, "Personal");
    assert_eq!(loaded.color, "#22c55e");
    let loaded_checklist = store.checklist(&folder, &checklist).unwrap();
    assert_eq!(loaded_checklist.name, "Groceries");
    assert_eq!(loaded_checklist.folder_id, folder);

    let milk = loaded_checklist.task(&done).unwrap();
    assert!(milk.completed);
    assert_eq!(milk.due_date, Some(due));
    let eggs = loaded_checklist.task(&open).unwrap();
    assert!(!eggs.completed);
    assert_eq!(eggs.due_date, None);

    assert_eq!(store.selected_folder_id(), None);
    assert_eq!(store.search_query(), "");
}

#[test]
fn persisted_payload_uses_camel_case_fields() {
    let conn = setup();
    let mut store = TodoStore::load(SqliteStateRepository::try_new(&conn).unwrap());
    let folder = store.add_folder("Work", "#3b82f6");
    let checklist = store.add_checklist(&folder, "Sprint").unwrap();
    store.add_task(&folder, &checklist, "Review", None).unwrap();

    let json: serde_json::Value = serde_json::from_str(&raw_payload(&conn).unwrap()).unwrap();
    let folder_json = &json[0];
    assert_eq!(folder_json["id"], folder.as_str());
    assert_eq!(folder_json["name"], "Work");
    assert_eq!(folder_json["color"], "#3b82f6");
    assert!(folder_json["createdAt"].is_string());

    let checklist_json = &folder_json["checklists"][0];
    assert_eq!(checklist_json["id"], checklist.as_str());
    assert_eq!(checklist_json["folderId"], folder.as_str());

    let task_json = &checklist_json["tasks"][0];
    assert_eq!(task_json["title"], "Review");
    assert_eq!(task_json["completed"], false);
    assert!(task_json.get("dueDate").is_none());
    assert!(task_json["createdAt"].as_str().unwrap().ends_with('Z'));
}

#[test]
fn every_mutation_is_written_immediately() {
    let conn = setup();
    let mut store = TodoStore::load(SqliteStateRepository::try_new(&conn).unwrap());

    let folder = store.add_folder("Work", "#3b82f6");
    assert!(raw_payload(&conn).unwrap().contains(&folder));

    store.rename_folder(&folder, "Office");
    assert!(raw_payload(&conn).unwrap().contains("Office"));

    store.delete_folder(&folder);
    assert_eq!(raw_payload(&conn).as_deref(), Some("[]"));
}

#[test]
fn legacy_payload_with_text_dates_and_short_ids_loads() {
    let conn = setup();
    let payload = r##"[
        {
            "id": "k3j2h4l1a",
            "name": "Work",
            "color": "#3b82f6",
            "createdAt": "2024-01-10T09:30:00.000Z",
            "checklists": [
                {
                    "id": "p9q8r7s6t",
                    "name": "Groceries",
                    "folderId": "k3j2h4l1a",
                    "createdAt": 1704879000000,
                    "tasks": [
                        {
                            "id": "a1b2c3d4e",
                            "title": "Buy milk",
                            "completed": true,
                            "dueDate": "2024-01-15",
                            "createdAt": "2024-01-10T09:31:00.000Z"
                        },
                        {
                            "id": "f5g6h7i8j",
                            "title": "Buy eggs",
                            "completed": false,
                            "createdAt": "2024-01-10T09:32:00.000Z"
                        }
                    ]
                }
            ]
        }
    ]"##;
    SqliteStateRepository::try_new(&conn)
        .unwrap()
        .set_item(DATA_STORAGE_KEY, payload)
        .unwrap();

    let mut store = TodoStore::load(SqliteStateRepository::try_new(&conn).unwrap());

    let checklist = store.checklist("k3j2h4l1a", "p9q8r7s6t").unwrap();
    assert_eq!(
        checklist.created_at,
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap()
    );
    let milk = checklist.task("a1b2c3d4e").unwrap();
    assert!(milk.completed);
    assert_eq!(milk.due_date, NaiveDate::from_ymd_opt(2024, 1, 15));
    assert_eq!(
        store.folder("k3j2h4l1a").unwrap().created_at,
        Utc.with_ymd_and_hms(2024, 1, 10, 9, 30, 0).unwrap()
    );

    store.toggle_task("k3j2h4l1a", "p9q8r7s6t", "f5g6h7i8j");
    assert!(
        store
            .checklist("k3j2h4l1a", "p9q8r7s6t")
            .unwrap()
            .task("f5g6h7i8j")
            .unwrap()
            .completed
    );
}

#[test]
fn non_string_due_date_is_dropped_without_losing_tree() {
    let conn = setup();
    let payload = r##"[{
        "id": "f1",
        "name": "Home",
        "color": "#22c55e",
        "createdAt": "2024-01-10T09:30:00.000Z",
        "checklists": [{
            "id": "c1",
            "name": "Bills",
            "folderId": "f1",
            "createdAt": "2024-01-10T09:30:00.000Z",
            "tasks": [
                {"id": "t1", "title": "Rent", "dueDate": 20240115,
                 "createdAt": "2024-01-10T09:31:00.000Z"},
                {"id": "t2", "title": "Power", "dueDate": "2024-01-20T23:30:00-05:00",
                 "createdAt": "2024-01-10T09:32:00.000Z"}
            ]
        }]
    }]"##;
    SqliteStateRepository::try_new(&conn)
        .unwrap()
        .set_item(DATA_STORAGE_KEY, payload)
        .unwrap();

    let store = TodoStore::load(SqliteStateRepository::try_new(&conn).unwrap());

    let checklist = store.checklist("f1", "c1").unwrap();
    assert_eq!(checklist.tasks.len(), 2);
    assert_eq!(checklist.task("t1").unwrap().due_date, None);
    assert_eq!(
        checklist.task("t2").unwrap().due_date,
        NaiveDate::from_ymd_opt(2024, 1, 20)
    );
}

#[test]
fn malformed_payload_falls_back_to_empty_tree() {
    let conn = setup();
    let repo = SqliteStateRepository::try_new(&conn).unwrap();
    repo.set_item(DATA_STORAGE_KEY, "{not json").unwrap();

    let mut store = TodoStore::load(SqliteStateRepository::try_new(&conn).unwrap());
    assert!(store.folders().is_empty());
    assert_eq!(raw_payload(&conn).as_deref(), Some("{not json"));

    store.add_folder("Fresh", "#22c55e");
    let json: serde_json::Value = serde_json::from_str(&raw_payload(&conn).unwrap()).unwrap();
    assert_eq!(json.as_array().unwrap().len(), 1);
}

#[test]
fn incompatible_payload_shape_falls_back_to_empty_tree() {
    let store = TodoStore::load(RecordingRepo {
        stored: Some(r#"{"folders": []}"#.to_string()),
        ..RecordingRepo::default()
    });
    assert!(store.folders().is_empty());
}

#[test]
fn unreadable_storage_falls_back_to_empty_tree() {
    let mut store = TodoStore::load(BrokenRepo);
    assert!(store.folders().is_empty());

    let folder = store.add_folder("Still works", "#22c55e");
    assert!(store.folder(&folder).is_some());
}

#[test]
fn failed_writes_keep_in_memory_state() {
    let mut store = TodoStore::load(RecordingRepo {
        fail_writes: true,
        ..RecordingRepo::default()
    });

    let folder = store.add_folder("Work", "#3b82f6");
    let checklist = store.add_checklist(&folder, "Sprint").unwrap();
    store.add_task(&folder, &checklist, "Ship", None).unwrap();

    assert_eq!(store.folders().len(), 1);
    assert_eq!(store.checklist(&folder, &checklist).unwrap().tasks.len(), 1);
    assert!(matches!(
        store.flush(),
        Err(todokeep_core::StoreError::Repo(_))
    ));
}

#[test]
fn no_op_and_session_only_operations_do_not_write() {
    let repo = RecordingRepo::default();
    let mut store = TodoStore::load(&repo);
    let folder = store.add_folder("Work", "#3b82f6");
    let checklist = store.add_checklist(&folder, "Sprint").unwrap();
    assert_eq!(repo.writes.borrow().len(), 2);

    store.rename_folder("missing", "Ghost");
    store.delete_folder("missing");
    store.delete_checklist(&folder, "missing");
    store.toggle_task(&folder, &checklist, "missing");
    store.reorder_folders(&folder, &folder);
    store.reorder_checklists(&folder, &checklist, "missing");
    store.select_folder(Some(&folder));
    store.select_checklist(Some(&checklist));
    store.set_search_query("work");
    assert_eq!(store.search_results().len(), 1);

    assert_eq!(repo.writes.borrow().len(), 2);
}

#[test]
fn custom_data_key_is_honored() {
    let conn = setup();
    let config = StoreConfig {
        data_key: "alt-data".to_string(),
        ..StoreConfig::default()
    };
    let mut store =
        TodoStore::load_with_config(SqliteStateRepository::try_new(&conn).unwrap(), &config);
    store.add_folder("Work", "#3b82f6");

    let repo = SqliteStateRepository::try_new(&conn).unwrap();
    assert!(repo.get_item("alt-data").unwrap().is_some());
    assert_eq!(repo.get_item(DATA_STORAGE_KEY).unwrap(), None);
}
