use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, OptionalExtension, Row};

use crate::db::{connection::Database, helpers::parse_datetime, models::Org};

fn row_to_org(row: &Row) -> Result<Org, rusqlite::Error> {
    let created_at: String = row.get("created_at")?;

    Ok(Org {
        id: row.get("id")?,
        name: row.get("name")?,
        created_at: parse_datetime(&created_at, "created_at").map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                e.into(),
            )
        })?,
    })
}

impl Database {
    pub async fn create_org(&self, name: &str) -> Result<Org> {
        let name = name.to_string();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO orgs (name, created_at) VALUES (?1, ?2)",
                params![name, Utc::now().to_rfc3339()],
            )?;
            let org_id = conn.last_insert_rowid();

            conn.query_row(
                "SELECT id, name, created_at FROM orgs WHERE id = ?1",
                params![org_id],
                row_to_org,
            )
            .optional()?
            .ok_or_else(|| anyhow!("Org not found after insert"))
        })
        .await
    }

    pub async fn get_org(&self, org_id: i64) -> Result<Option<Org>> {
        self.execute(move |conn| {
            let org = conn
                .query_row(
                    "SELECT id, name, created_at FROM orgs WHERE id = ?1",
                    params![org_id],
                    row_to_org,
                )
                .optional()?;
            Ok(org)
        })
        .await
    }

    pub async fn add_org_member(&self, org_id: i64, user_id: i64) -> Result<()> {
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO org_members (org_id, user_id, created_at)
                 VALUES (?1, ?2, ?3)
                 ON CONFLICT(org_id, user_id) DO NOTHING",
                params![org_id, user_id, Utc::now().to_rfc3339()],
            )?;
            Ok(())
        })
        .await
    }

    pub async fn is_org_member(&self, org_id: i64, user_id: i64) -> Result<bool> {
        self.execute(move |conn| {
            let found = conn
                .query_row(
                    "SELECT 1 FROM org_members WHERE org_id = ?1 AND user_id = ?2",
                    params![org_id, user_id],
                    |_| Ok(()),
                )
                .optional()?;
            Ok(found.is_some())
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn membership_round_trip() {
        let db = Database::in_memory().unwrap();
        let org = db.create_org("acme").await.unwrap();
        let user = db.create_user("alice", false).await.unwrap();

        assert!(!db.is_org_member(org.id, user.id).await.unwrap());
        db.add_org_member(org.id, user.id).await.unwrap();
        db.add_org_member(org.id, user.id).await.unwrap();
        assert!(db.is_org_member(org.id, user.id).await.unwrap());
    }

    #[tokio::test]
    async fn get_missing_org_is_none() {
        let db = Database::in_memory().unwrap();
        assert_eq!(db.get_org(1).await.unwrap(), None);

        let org = db.create_org("acme").await.unwrap();
        assert_eq!(db.get_org(org.id).await.unwrap(), Some(org));
    }

    #[tokio::test]
    async fn org_names_are_unique() {
        let db = Database::in_memory().unwrap();
        db.create_org("acme").await.unwrap();
        assert!(db.create_org("acme").await.is_err());
    }
}
