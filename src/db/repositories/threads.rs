use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, parse_optional_datetime},
    models::Thread,
};

fn select_thread(conn: &Connection, thread_id: i64) -> Result<Option<Thread>> {
    let row = conn
        .query_row(
            "SELECT id, title, created_at, deleted_at
             FROM discussion_threads
             WHERE id = ?1 AND deleted_at IS NULL",
            params![thread_id],
            |row| {
                Ok((
                    row.get::<_, i64>("id")?,
                    row.get::<_, String>("title")?,
                    row.get::<_, String>("created_at")?,
                    row.get::<_, Option<String>>("deleted_at")?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((id, title, created_at, deleted_at)) => Ok(Some(Thread {
            id,
            title,
            created_at: parse_datetime(&created_at, "created_at")?,
            deleted_at: parse_optional_datetime(deleted_at, "deleted_at")?,
        })),
        None => Ok(None),
    }
}

impl Database {
    pub async fn create_thread(&self, title: &str) -> Result<Thread> {
        let title = title.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO discussion_threads (title, created_at) VALUES (?1, ?2)",
                params![title, Utc::now().to_rfc3339()],
            )?;
            let thread_id = conn.last_insert_rowid();
            select_thread(conn, thread_id)?
                .ok_or_else(|| anyhow!("Thread not found after insert"))
        })
        .await
    }

    /// Get a live (not soft-deleted) thread
    pub async fn get_thread(&self, thread_id: i64) -> Result<Option<Thread>> {
        self.execute(move |conn| select_thread(conn, thread_id)).await
    }

    pub async fn soft_delete_thread(&self, thread_id: i64) -> Result<()> {
        self.execute(move |conn| {
            let rows_affected = conn.execute(
                "UPDATE discussion_threads
                 SET deleted_at = ?1
                 WHERE id = ?2 AND deleted_at IS NULL",
                params![Utc::now().to_rfc3339(), thread_id],
            )?;

            if rows_affected == 0 {
                return Err(anyhow!("Thread not found or already deleted"));
            }
            Ok(())
        })
        .await
    }
}
