use anyhow::{bail, Context, Result};
use rusqlite::Connection;

/// Schema steps in order; entry `n` moves `user_version` from `n` to `n + 1`.
const MIGRATIONS: &[&str] = &[include_str!("schemas/schema_v1.sql")];

const SCHEMA_VERSION: usize = MIGRATIONS.len();

fn user_version(conn: &Connection) -> Result<usize> {
    let version: i64 = conn
        .pragma_query_value(None, "user_version", |row| row.get(0))
        .context("failed to read schema version")?;
    usize::try_from(version).with_context(|| format!("invalid schema version {version}"))
}

/// Bring the schema up to date in one transaction. Databases written by a
/// newer build are refused.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    let from = user_version(conn)?;
    if from > SCHEMA_VERSION {
        bail!("history store schema v{from} is newer than supported v{SCHEMA_VERSION}");
    }
    if from == SCHEMA_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (step, sql) in MIGRATIONS.iter().enumerate().skip(from) {
        tx.execute_batch(sql)
            .with_context(|| format!("schema migration to v{} failed", step + 1))?;
    }
    tx.pragma_update(None, "user_version", SCHEMA_VERSION as i64)?;
    tx.commit()?;

    Ok(())
}
