use anyhow::{Context, Result};
use rusqlite::{params, Row};

use crate::db::{
    connection::Database,
    helpers::{parse_datetime, to_i64},
    models::GenerationRecord,
};

const RECORD_COLUMNS: &str = "id, input_text, display_text, decoration_text, created_at";

fn row_to_record(row: &Row) -> Result<GenerationRecord> {
    let created_at: String = row.get("created_at")?;

    Ok(GenerationRecord {
        id: row.get("id")?,
        input_text: row.get("input_text")?,
        display_text: row.get("display_text")?,
        decoration_text: row.get("decoration_text")?,
        created_at: parse_datetime(&created_at, "created_at")?,
    })
}

impl Database {
    pub async fn insert_record(&self, record: &GenerationRecord) -> Result<()> {
        let record = record.clone();
        self.execute(move |conn| {
            conn.execute(
                "INSERT INTO records (id, input_text, display_text, decoration_text, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    record.id,
                    record.input_text,
                    record.display_text,
                    record.decoration_text,
                    record.created_at.to_rfc3339(),
                ],
            )
            .with_context(|| "failed to insert record")?;
            Ok(())
        })
        .await
    }

    /// Newest-first, at most `limit` rows.
    pub async fn list_records(&self, limit: usize) -> Result<Vec<GenerationRecord>> {
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RECORD_COLUMNS}
                 FROM records
                 ORDER BY created_at DESC, id DESC
                 LIMIT ?1"
            ))?;

            let mut rows = stmt.query(params![to_i64(limit)?])?;
            let mut records = Vec::new();
            while let Some(row) = rows.next()? {
                records.push(row_to_record(row)?);
            }

            Ok(records)
        })
        .await
    }

    pub async fn get_record(&self, record_id: &str) -> Result<Option<GenerationRecord>> {
        let record_id = record_id.to_string();
        self.execute(move |conn| {
            let mut stmt = conn.prepare(&format!(
                "SELECT {RECORD_COLUMNS} FROM records WHERE id = ?1"
            ))?;

            let mut rows = stmt.query(params![record_id])?;
            match rows.next()? {
                Some(row) => Ok(Some(row_to_record(row)?)),
                None => Ok(None),
            }
        })
        .await
    }

    /// Delete everything except the newest `keep` records. Returns the
    /// number of rows removed.
    pub async fn prune_records(&self, keep: usize) -> Result<usize> {
        self.execute(move |conn| {
            let removed = conn
                .execute(
                    "DELETE FROM records
                     WHERE id NOT IN (
                         SELECT id FROM records
                         ORDER BY created_at DESC, id DESC
                         LIMIT ?1
                     )",
                    params![to_i64(keep)?],
                )
                .with_context(|| "failed to prune records")?;
            Ok(removed)
        })
        .await
    }

    pub async fn clear_records(&self) -> Result<()> {
        self.execute(|conn| {
            conn.execute("DELETE FROM records", [])
                .with_context(|| "failed to clear records")?;
            Ok(())
        })
        .await
    }
}
