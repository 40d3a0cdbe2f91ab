//! Smoke-test runner: create table, insert-or-update, read back.

use crate::domain::test_row::{INSERT_NAME, TEST_ROW_ID, UPDATE_NAME};
use crate::domain::{LogStore, SmokeOutcome, UpsertAction};
use crate::error::ProbeError;
use crate::persistence::SmokeStore;

/// Runs the create / insert-or-update / read-back sequence once.
///
/// An insert failure is assumed to mean the row already exists and falls
/// back to an update of the same row. Any other failure stops the run and is
/// returned to the caller, which owns the exit decision. Progress is
/// appended to `log`.
///
/// # Errors
///
/// Returns the first [`ProbeError`] from table creation, the update
/// fallback or the read-back, or [`ProbeError::RowMissing`] if the row is
/// absent after writing it.
pub async fn run_smoke_test<S: SmokeStore>(
    store: &mut S,
    log: &LogStore,
) -> Result<SmokeOutcome, ProbeError> {
    store.ensure_table().await.inspect_err(|e| {
        log.append(format!("Failed to create test table: {e}"));
    })?;
    log.append("Test table is ready.");

    let action = match store.insert_row(TEST_ROW_ID, INSERT_NAME).await {
        Ok(()) => UpsertAction::Inserted,
        Err(insert_err) => {
            log.append(format!(
                "Insert of test row {TEST_ROW_ID} failed, updating instead: {insert_err}"
            ));
            store
                .update_row(TEST_ROW_ID, UPDATE_NAME)
                .await
                .inspect_err(|e| log.append(format!("Failed to update test row: {e}")))?;
            UpsertAction::Updated
        }
    };
    log.append(format!("Test row {TEST_ROW_ID} {}.", action.as_str()));

    let row = store
        .fetch_row(TEST_ROW_ID)
        .await
        .inspect_err(|e| log.append(format!("Failed to read test row: {e}")))?
        .ok_or(ProbeError::RowMissing(TEST_ROW_ID))?;

    log.append(format!(
        "Read back test row: id={}, name={}, created_at={}",
        row.id, row.name, row.created_at
    ));

    Ok(SmokeOutcome { row, action })
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::collections::HashMap;

    use chrono::{NaiveDate, NaiveDateTime};

    use super::*;
    use crate::domain::TestRow;

    /// In-memory table with failure injection.
    #[derive(Debug, Default)]
    struct MemoryStore {
        table_exists: bool,
        rows: HashMap<i32, TestRow>,
        fail_create: bool,
        fail_update: bool,
        drop_on_read: bool,
        calls: Vec<&'static str>,
    }

    fn fixed_time() -> NaiveDateTime {
        let Some(dt) = NaiveDate::from_ymd_opt(2024, 5, 1).and_then(|d| d.and_hms_opt(12, 0, 0))
        else {
            panic!("valid timestamp");
        };
        dt
    }

    fn boom() -> ProbeError {
        ProbeError::Io(std::io::Error::other("boom"))
    }

    impl SmokeStore for MemoryStore {
        async fn ensure_table(&mut self) -> Result<(), ProbeError> {
            self.calls.push("ensure_table");
            if self.fail_create {
                return Err(boom());
            }
            self.table_exists = true;
            Ok(())
        }

        async fn insert_row(&mut self, id: i32, name: &str) -> Result<(), ProbeError> {
            self.calls.push("insert_row");
            if !self.table_exists || self.rows.contains_key(&id) {
                return Err(boom());
            }
            self.rows.insert(
                id,
                TestRow {
                    id,
                    name: name.to_string(),
                    created_at: fixed_time(),
                },
            );
            Ok(())
        }

        async fn update_row(&mut self, id: i32, name: &str) -> Result<(), ProbeError> {
            self.calls.push("update_row");
            if self.fail_update {
                return Err(boom());
            }
            if let Some(row) = self.rows.get_mut(&id) {
                row.name = name.to_string();
            }
            Ok(())
        }

        async fn fetch_row(&mut self, id: i32) -> Result<Option<TestRow>, ProbeError> {
            self.calls.push("fetch_row");
            if self.drop_on_read {
                return Ok(None);
            }
            Ok(self.rows.get(&id).cloned())
        }
    }

    #[tokio::test]
    async fn fresh_database_inserts_test_row() {
        let mut store = MemoryStore::default();
        let log = LogStore::new();

        let Ok(outcome) = run_smoke_test(&mut store, &log).await else {
            panic!("smoke test should pass on a fresh store");
        };

        assert_eq!(outcome.action, UpsertAction::Inserted);
        assert_eq!(outcome.row.id, 1);
        assert_eq!(outcome.row.name, "Test Name");
        assert_eq!(outcome.row.created_at, fixed_time());
        assert_eq!(store.calls, vec!["ensure_table", "insert_row", "fetch_row"]);
    }

    #[tokio::test]
    async fn second_run_updates_instead_of_failing() {
        let mut store = MemoryStore::default();
        let log = LogStore::new();

        let Ok(_) = run_smoke_test(&mut store, &log).await else {
            panic!("first run should pass");
        };
        let Ok(outcome) = run_smoke_test(&mut store, &log).await else {
            panic!("second run should fall back to update");
        };

        assert_eq!(outcome.action, UpsertAction::Updated);
        assert_eq!(outcome.row.id, 1);
        assert_eq!(outcome.row.name, "Updated Test Name");
        assert_eq!(store.rows.len(), 1);
        assert!(log.snapshot().iter().any(|l| l == "Test row 1 updated."));
    }

    #[tokio::test]
    async fn insert_failure_is_recorded_before_the_update() {
        let mut store = MemoryStore::default();
        let first_log = LogStore::new();
        let Ok(_) = run_smoke_test(&mut store, &first_log).await else {
            panic!("first run should pass");
        };

        let log = LogStore::new();
        let Ok(_) = run_smoke_test(&mut store, &log).await else {
            panic!("second run should fall back to update");
        };

        let entries = log.snapshot();
        let Some(fallback) = entries
            .iter()
            .position(|l| l == "Insert of test row 1 failed, updating instead: boom")
        else {
            panic!("insert failure must be logged: {entries:?}");
        };
        let Some(updated) = entries.iter().position(|l| l == "Test row 1 updated.") else {
            panic!("update must be logged: {entries:?}");
        };
        assert!(fallback < updated);
        assert!(
            !first_log
                .snapshot()
                .iter()
                .any(|l| l.starts_with("Insert of test row"))
        );
    }

    #[tokio::test]
    async fn table_creation_failure_stops_the_run() {
        let mut store = MemoryStore {
            fail_create: true,
            ..MemoryStore::default()
        };
        let log = LogStore::new();

        let result = run_smoke_test(&mut store, &log).await;

        assert!(matches!(result, Err(ProbeError::Io(_))));
        assert_eq!(store.calls, vec!["ensure_table"]);
        assert_eq!(log.snapshot(), vec!["Failed to create test table: boom"]);
    }

    #[tokio::test]
    async fn update_failure_after_insert_failure_is_fatal() {
        let mut store = MemoryStore {
            fail_update: true,
            ..MemoryStore::default()
        };
        let log = LogStore::new();
        let Ok(_) = run_smoke_test(&mut store, &log).await else {
            panic!("first run should pass");
        };

        let result = run_smoke_test(&mut store, &log).await;

        assert!(result.is_err());
        assert_eq!(store.calls.last(), Some(&"update_row"));
    }

    #[tokio::test]
    async fn missing_row_after_write_is_an_error() {
        let mut store = MemoryStore {
            drop_on_read: true,
            ..MemoryStore::default()
        };
        let log = LogStore::new();

        let result = run_smoke_test(&mut store, &log).await;

        assert!(matches!(result, Err(ProbeError::RowMissing(1))));
    }
}
