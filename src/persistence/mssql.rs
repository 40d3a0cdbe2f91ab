//! SQL Server implementation of [`SmokeStore`].

use std::fmt;

use chrono::NaiveDateTime;

use super::SmokeStore;
use super::connection::MssqlClient;
use crate::domain::TestRow;
use crate::error::ProbeError;

const CREATE_TABLE: &str = "IF OBJECT_ID(N'test_table', N'U') IS NULL \
     CREATE TABLE test_table (\
     id INT PRIMARY KEY, \
     name NVARCHAR(100) NOT NULL, \
     created_at DATETIME NOT NULL DEFAULT GETDATE())";

const INSERT_ROW: &str = "INSERT INTO test_table (id, name) VALUES (@P1, @P2)";

const UPDATE_ROW: &str = "UPDATE test_table SET name = @P1 WHERE id = @P2";

const SELECT_ROW: &str = "SELECT id, name, created_at FROM test_table WHERE id = @P1";

/// `test_table` access over a single `tiberius` client.
pub struct MssqlStore {
    client: MssqlClient,
}

impl MssqlStore {
    /// Wraps an already connected client.
    #[must_use]
    pub fn new(client: MssqlClient) -> Self {
        Self { client }
    }
}

impl fmt::Debug for MssqlStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MssqlStore").finish_non_exhaustive()
    }
}

impl SmokeStore for MssqlStore {
    async fn ensure_table(&mut self) -> Result<(), ProbeError> {
        self.client.simple_query(CREATE_TABLE).await?.into_results().await?;
        Ok(())
    }

    async fn insert_row(&mut self, id: i32, name: &str) -> Result<(), ProbeError> {
        self.client.execute(INSERT_ROW, &[&id, &name]).await?;
        Ok(())
    }

    async fn update_row(&mut self, id: i32, name: &str) -> Result<(), ProbeError> {
        let result = self.client.execute(UPDATE_ROW, &[&name, &id]).await?;
        tracing::debug!(id, rows = result.total(), "test row updated");
        Ok(())
    }

    async fn fetch_row(&mut self, id: i32) -> Result<Option<TestRow>, ProbeError> {
        let Some(row) = self
            .client
            .query(SELECT_ROW, &[&id])
            .await?
            .into_row()
            .await?
        else {
            return Ok(None);
        };

        let id: Option<i32> = row.try_get("id")?;
        let name: Option<&str> = row.try_get("name")?;
        let created_at: Option<NaiveDateTime> = row.try_get("created_at")?;

        Ok(match (id, name, created_at) {
            (Some(id), Some(name), Some(created_at)) => Some(TestRow {
                id,
                name: name.to_string(),
                created_at,
            }),
            _ => None,
        })
    }
}
