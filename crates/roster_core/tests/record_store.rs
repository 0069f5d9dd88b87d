use roster_core::db::{open_db, open_db_in_memory};
use roster_core::store::{EDIT_ID_KEY, EMPLOYEES_KEY};
use roster_core::{
    seed_employees, Employee, KeyValueStore, KvError, KvResult, RecordStore, SqliteKeyValueStore,
    StoreError, UpsertOutcome,
};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;

fn employee(id: u64, first_name: &str, department: &str) -> Employee {
    Employee {
        id,
        first_name: first_name.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@example.com", first_name.to_lowercase()),
        department: department.to_string(),
        role: "Analyst".to_string(),
    }
}

/// In-memory substrate whose writes can be switched to fail.
#[derive(Default)]
struct FlakyKv {
    entries: RefCell<HashMap<String, String>>,
    fail_writes: Cell<bool>,
}

impl KeyValueStore for &FlakyKv {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> KvResult<()> {
        if self.fail_writes.get() {
            return Err(KvError::Backend("quota exceeded".to_string()));
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> KvResult<()> {
        self.entries.borrow_mut().remove(key);
        Ok(())
    }
}

#[test]
fn load_falls_back_to_seed_when_absent_without_writing() {
    let conn = open_db_in_memory().unwrap();
    let store = RecordStore::load(SqliteKeyValueStore::new(&conn)).unwrap();

    assert_eq!(store.all(), seed_employees().as_slice());
    assert_eq!(SqliteKeyValueStore::new(&conn).get(EMPLOYEES_KEY).unwrap(), None);
}

#[test]
fn load_falls_back_to_seed_on_unparseable_payload() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    kv.set(EMPLOYEES_KEY, "{not json").unwrap();

    let store = RecordStore::load(kv).unwrap();
    assert_eq!(store.len(), 3);
    assert_eq!(store.all()[0].first_name, "John");
}

#[test]
fn load_reads_persisted_camel_case_records() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    kv.set(
        EMPLOYEES_KEY,
        r#"[{"id":1700000000000,"firstName":"Ada","lastName":"Lovelace","email":"ada@example.com","department":"R&D","role":"Engineer"}]"#,
    )
    .unwrap();

    let store = RecordStore::load(kv).unwrap();
    assert_eq!(store.len(), 1);
    let ada = store.get(1_700_000_000_000).unwrap();
    assert_eq!(ada.last_name, "Lovelace");
    assert_eq!(ada.department, "R&D");
}

#[test]
fn persisted_empty_list_stays_empty() {
    let conn = open_db_in_memory().unwrap();
    let kv = SqliteKeyValueStore::new(&conn);
    kv.set(EMPLOYEES_KEY, "[]").unwrap();

    let store = RecordStore::load(kv).unwrap();
    assert!(store.is_empty());
}

#[test]
fn upsert_replaces_in_place_or_appends_and_persists() {
    let conn = open_db_in_memory().unwrap();
    let mut store = RecordStore::with_records(
        SqliteKeyValueStore::new(&conn),
        vec![employee(1, "Ann", "Ops"), employee(2, "Bob", "Ops")],
    );

    let replaced = store.upsert(employee(1, "Ann", "Sales")).unwrap();
    assert_eq!(replaced, UpsertOutcome::Replaced);
    assert_eq!(store.all()[0].department, "Sales");
    assert_eq!(store.len(), 2);

    let inserted = store.upsert(employee(9, "Cy", "Ops")).unwrap();
    assert_eq!(inserted, UpsertOutcome::Inserted);
    assert_eq!(store.all()[2].id, 9);

    let raw = SqliteKeyValueStore::new(&conn)
        .get(EMPLOYEES_KEY)
        .unwrap()
        .unwrap();
    let persisted: Vec<Employee> = serde_json::from_str(&raw).unwrap();
    assert_eq!(persisted, store.all());
    assert!(raw.contains("\"firstName\""));
}

#[test]
fn remove_missing_id_is_a_silent_no_op() {
    let conn = open_db_in_memory().unwrap();
    let mut store = RecordStore::with_records(
        SqliteKeyValueStore::new(&conn),
        vec![employee(1, "Ann", "Ops")],
    );

    assert!(!store.remove(42).unwrap());
    assert_eq!(store.len(), 1);

    assert!(store.remove(1).unwrap());
    assert!(store.is_empty());
}

#[test]
fn allocated_ids_never_collide_after_deletes() {
    let conn = open_db_in_memory().unwrap();
    let mut store = RecordStore::with_records(
        SqliteKeyValueStore::new(&conn),
        vec![employee(5, "Ann", "Ops")],
    );

    let first = store.allocate_id().unwrap();
    store.upsert(employee(first, "New", "Ops")).unwrap();
    store.remove(first).unwrap();
    let second = store.allocate_id().unwrap();

    assert_eq!(first, 6);
    assert!(second > first);
}

#[test]
fn failed_persist_surfaces_error_and_keeps_memory_unchanged() {
    let kv = FlakyKv::default();
    let mut store = RecordStore::with_records(&kv, vec![employee(1, "Ann", "Ops")]);
    kv.fail_writes.set(true);

    let err = store.upsert(employee(2, "Bob", "Ops")).unwrap_err();
    assert!(matches!(err, StoreError::Kv(KvError::Backend(_))));
    assert_eq!(store.len(), 1);

    let err = store.upsert(employee(1, "Ann", "Sales")).unwrap_err();
    assert!(err.to_string().contains("quota exceeded"));
    assert_eq!(store.all()[0].department, "Ops");

    assert!(store.remove(1).is_err());
    assert_eq!(store.len(), 1);
}

#[test]
fn edit_marker_round_trips_and_ignores_garbage() {
    let conn = open_db_in_memory().unwrap();
    let store = RecordStore::load(SqliteKeyValueStore::new(&conn)).unwrap();

    assert_eq!(store.editing_id().unwrap(), None);
    store.mark_editing(2).unwrap();
    assert_eq!(
        SqliteKeyValueStore::new(&conn).get(EDIT_ID_KEY).unwrap().as_deref(),
        Some("2")
    );
    assert_eq!(store.editing_id().unwrap(), Some(2));

    store.clear_editing().unwrap();
    assert_eq!(store.editing_id().unwrap(), None);

    SqliteKeyValueStore::new(&conn).set(EDIT_ID_KEY, "two").unwrap();
    assert_eq!(store.editing_id().unwrap(), None);
}

#[test]
fn records_survive_reopening_the_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roster.db");

    {
        let conn = open_db(&path).unwrap();
        let mut store = RecordStore::load(SqliteKeyValueStore::new(&conn)).unwrap();
        store.remove(1).unwrap();
        store.upsert(employee(10, "Dee", "Legal")).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = RecordStore::load(SqliteKeyValueStore::new(&conn)).unwrap();
    let ids: Vec<_> = store.all().iter().map(|e| e.id).collect();
    assert_eq!(ids, vec![2, 3, 10]);
}

#[test]
fn allocation_fails_once_the_highest_id_is_taken() {
    let conn = open_db_in_memory().unwrap();
    let mut store = RecordStore::with_records(
        SqliteKeyValueStore::new(&conn),
        vec![employee(u64::MAX, "Ann", "Ops")],
    );

    assert!(matches!(store.allocate_id(), Err(StoreError::IdsExhausted)));
    assert_eq!(store.len(), 1);
}

#[test]
fn upserting_the_highest_id_exhausts_allocation() {
    let conn = open_db_in_memory().unwrap();
    let mut store = RecordStore::with_records(SqliteKeyValueStore::new(&conn), Vec::new());

    assert_eq!(store.allocate_id().unwrap(), 1);
    store.upsert(employee(u64::MAX, "Max", "Ops")).unwrap();
    assert!(matches!(store.allocate_id(), Err(StoreError::IdsExhausted)));
}
