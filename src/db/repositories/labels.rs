use anyhow::{anyhow, Result};
use chrono::Utc;
use rusqlite::{params, Connection, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, validate_color, validate_name},
    models::{Label, LabelUpdate, NewLabel},
};

const LABEL_COLUMNS: &str =
    "id, owner_org_id, name, description, color, created_at, updated_at";

fn row_to_label(row: &Row) -> Result<Label> {
    let created_at: String = row.get("created_at")?;
    let updated_at: String = row.get("updated_at")?;

    Ok(Label {
        id: row.get("id")?,
        owner_org_id: row.get("owner_org_id")?,
        name: row.get("name")?,
        description: row.get("description")?,
        color: row.get("color")?,
        created_at: parse_datetime(&created_at, "created_at")?,
        updated_at: parse_datetime(&updated_at, "updated_at")?,
    })
}

fn select_label(conn: &Connection, label_id: i64) -> Result<Option<Label>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {LABEL_COLUMNS}
         FROM labels
         WHERE id = ?1"
    ))?;
    let mut rows = stmt.query(params![label_id])?;
    match rows.next()? {
        Some(row) => Ok(Some(row_to_label(row)?)),
        None => Ok(None),
    }
}

impl Database {
    /// Insert a label and return the stored row
    pub async fn create_label(&self, label: NewLabel) -> Result<Label> {
        validate_name(&label.name)?;
        validate_color(&label.color)?;

        self.execute(move |conn| {
            let now = Utc::now().to_rfc3339();

            conn.execute(
                "INSERT INTO labels (owner_org_id, name, description, color, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?5)",
                params![
                    label.owner_org_id,
                    label.name,
                    label.description,
                    label.color,
                    now,
                ],
            )?;

            let label_id = conn.last_insert_rowid();
            select_label(conn, label_id)?.ok_or_else(|| anyhow!("Label not found after insert"))
        })
        .await
    }

    /// Get a single label by ID
    pub async fn get_label(&self, label_id: i64) -> Result<Option<Label>> {
        self.execute(move |conn| select_label(conn, label_id)).await
    }

    /// Get all labels owned by an organization, ordered by ID
    pub async fn get_labels_for_org(&self, org_id: i64) -> Result<Vec<Label>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {LABEL_COLUMNS}
                 FROM labels
                 WHERE owner_org_id = ?1
                 ORDER BY id ASC"
            ))?;

            let mut rows = stmt.query(params![org_id])?;
            let mut labels = Vec::new();
            while let Some(row) = rows.next()? {
                labels.push(row_to_label(row)?);
            }

            Ok(labels)
        })
        .await
    }

    /// Update a label's name, description and/or color.
    /// An empty update returns the label unchanged.
    pub async fn update_label(&self, label_id: i64, update: LabelUpdate) -> Result<Label> {
        if let Some(name) = &update.name {
            validate_name(name)?;
        }
        if let Some(color) = &update.color {
            validate_color(color)?;
        }

        self.execute(move |conn| {
            // Build update query dynamically based on what's being updated
            let mut updates = Vec::new();
            let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

            if let Some(n) = update.name {
                updates.push("name = ?");
                params_vec.push(Box::new(n));
            }
            if let Some(d) = update.description {
                updates.push("description = ?");
                params_vec.push(Box::new(d));
            }
            if let Some(c) = update.color {
                updates.push("color = ?");
                params_vec.push(Box::new(c));
            }

            if !updates.is_empty() {
                updates.push("updated_at = ?");
                params_vec.push(Box::new(Utc::now().to_rfc3339()));

                let query = format!("UPDATE labels SET {} WHERE id = ?", updates.join(", "));
                params_vec.push(Box::new(label_id));

                let params_refs: Vec<&dyn rusqlite::ToSql> =
                    params_vec.iter().map(|b| b.as_ref()).collect();

                if conn.execute(&query, params_refs.as_slice())? == 0 {
                    return Err(anyhow!("Label {label_id} not found"));
                }
            }

            select_label(conn, label_id)?.ok_or_else(|| anyhow!("Label {label_id} not found"))
        })
        .await
    }

    /// Delete a label; its thread links go with it
    pub async fn delete_label(&self, label_id: i64) -> Result<()> {
        self.execute(move |conn| {
            let rows_affected =
                conn.execute("DELETE FROM labels WHERE id = ?1", params![label_id])?;

            if rows_affected == 0 {
                return Err(anyhow!("Label {label_id} not found"));
            }

            Ok(())
        })
        .await
    }
}
