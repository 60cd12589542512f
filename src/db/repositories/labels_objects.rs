use anyhow::Result;
use chrono::Utc;
use rusqlite::{params, params_from_iter, Connection};

use crate::db::{connection::Database, helpers::placeholders, models::LabelObject};

pub struct LabelsObjectsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> LabelsObjectsRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Links on a thread, ordered by label ID
    pub fn list_for_thread(&self, thread_id: i64) -> Result<Vec<LabelObject>> {
        let mut stmt = self.conn.prepare(
            "SELECT label_id, thread_id
             FROM labels_objects
             WHERE thread_id = ?1
             ORDER BY label_id ASC",
        )?;

        let links = stmt
            .query_map(params![thread_id], |row| {
                Ok(LabelObject {
                    label_id: row.get(0)?,
                    thread_id: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(links)
    }

    /// Link labels to a thread. Already-linked labels are left alone.
    pub fn add_to_thread(&self, thread_id: i64, label_ids: &[i64]) -> Result<()> {
        let now = Utc::now().to_rfc3339();
        let mut stmt = self.conn.prepare(
            "INSERT INTO labels_objects (label_id, thread_id, created_at)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(label_id, thread_id) DO NOTHING",
        )?;
        for label_id in label_ids {
            stmt.execute(params![label_id, thread_id, now])?;
        }
        Ok(())
    }

    /// Unlink labels from a thread. Labels that were not linked are ignored.
    pub fn remove_from_thread(&self, thread_id: i64, label_ids: &[i64]) -> Result<()> {
        if label_ids.is_empty() {
            return Ok(());
        }

        let query = format!(
            "DELETE FROM labels_objects WHERE thread_id = ? AND label_id IN ({})",
            placeholders(label_ids.len())
        );
        let values = std::iter::once(&thread_id).chain(label_ids.iter());
        self.conn.execute(&query, params_from_iter(values))?;
        Ok(())
    }
}

// Database async wrappers for thread-label links
impl Database {
    pub async fn list_label_objects(&self, thread_id: i64) -> Result<Vec<LabelObject>> {
        self.execute(move |conn| LabelsObjectsRepository::new(conn).list_for_thread(thread_id))
            .await
    }

    /// Link all `label_ids` to the thread in one transaction
    pub async fn add_labels_to_thread(&self, thread_id: i64, label_ids: &[i64]) -> Result<()> {
        let label_ids = label_ids.to_vec();
        self.execute(move |conn| {
            let tx = conn.transaction()?;
            LabelsObjectsRepository::new(&tx).add_to_thread(thread_id, &label_ids)?;
            tx.commit()?;
            Ok(())
        })
        .await
    }

    pub async fn remove_labels_from_thread(
        &self,
        thread_id: i64,
        label_ids: &[i64],
    ) -> Result<()> {
        let label_ids = label_ids.to_vec();
        self.execute(move |conn| {
            LabelsObjectsRepository::new(conn).remove_from_thread(thread_id, &label_ids)
        })
        .await
    }
}
