use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension};

use crate::db::{connection::Database, helpers::parse_datetime, models::User};

impl Database {
    pub async fn create_user(&self, username: &str, site_admin: bool) -> Result<User> {
        let username = username.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO users (username, site_admin, created_at) VALUES (?1, ?2, ?3)",
                params![username, site_admin, Utc::now().to_rfc3339()],
            )?;
            let user_id = conn.last_insert_rowid();
            select_user(conn, user_id)?.ok_or_else(|| anyhow!("User not found after insert"))
        })
        .await
    }

    pub async fn get_user(&self, user_id: i64) -> Result<Option<User>> {
        self.execute(move |conn| select_user(conn, user_id)).await
    }
}

fn select_user(conn: &rusqlite::Connection, user_id: i64) -> Result<Option<User>> {
    let row = conn
        .query_row(
            "SELECT id, username, site_admin, created_at FROM users WHERE id = ?1",
            params![user_id],
            |row| {
                Ok((
                    row.get::<_, i64>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, bool>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?;

    match row {
        Some((id, username, site_admin, created_at)) => Ok(Some(User {
            id,
            username,
            site_admin,
            created_at: parse_datetime(&created_at, "created_at")?,
        })),
        None => Ok(None),
    }
}
