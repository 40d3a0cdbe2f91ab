//! The single fixed row written by the smoke test.

use chrono::NaiveDateTime;
use serde::Serialize;
use utoipa::ToSchema;

/// Primary key of the smoke-test row.
pub const TEST_ROW_ID: i32 = 1;

/// Name written when the row is inserted for the first time.
pub const INSERT_NAME: &str = "Test Name";

/// Name written when the row already exists and is updated instead.
pub const UPDATE_NAME: &str = "Updated Test Name";

/// A row of `test_table`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct TestRow {
    /// Primary key.
    pub id: i32,
    /// Stored name.
    pub name: String,
    /// Server-side insertion timestamp (`DATETIME`, no zone).
    pub created_at: NaiveDateTime,
}

/// Which write path the smoke test took.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum UpsertAction {
    /// The row did not exist and was inserted.
    Inserted,
    /// The insert failed and the existing row was updated.
    Updated,
}

impl UpsertAction {
    /// Lower-case label used in logs and the status page.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Inserted => "inserted",
            Self::Updated => "updated",
        }
    }
}

/// Result of a completed smoke test.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct SmokeOutcome {
    /// The row as read back from the database.
    pub row: TestRow,
    /// Whether the row was inserted or updated.
    pub action: UpsertAction,
}
