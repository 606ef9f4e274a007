//! Blog schema migrations.
//!
//! `0001_authors.sql` creates the author table and the unique name index that
//! backs "Name must be unique.". `0002_posts.sql` creates the post table with
//! its category CHECK. Each step is embedded into the binary at compile time.
//!
//! # Invariants
//! - Steps are numbered 1, 2, ... with no gaps.
//! - `PRAGMA user_version` equals the last step applied.
//! - A batch of pending steps commits together or not at all.

use crate::db::{DbError, DbResult};
use log::{debug, info};
use rusqlite::{Connection, Transaction};

/// One embedded schema step.
#[derive(Debug, Clone, Copy)]
struct SchemaStep {
    version: u32,
    /// Table the step introduces; only used in log events.
    table: &'static str,
    sql: &'static str,
}

const SCHEMA_STEPS: &[SchemaStep] = &[
    SchemaStep {
        version: 1,
        table: "authors",
        sql: include_str!("0001_authors.sql"),
    },
    SchemaStep {
        version: 2,
        table: "posts",
        sql: include_str!("0002_posts.sql"),
    },
];

/// Schema version this build writes; `0` means no tables at all.
pub fn latest_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |step| step.version)
}

/// Brings the `authors`/`posts` schema up to `latest_version()`.
///
/// # Errors
/// - `DbError::UnsupportedSchemaVersion` when the file was written by a newer
///   build; nothing is touched in that case.
/// - `DbError::Sqlite` when a step fails; earlier steps of the same batch are
///   rolled back.
pub fn apply_migrations(conn: &mut Connection) -> DbResult<()> {
    let from_version = schema_version(conn)?;
    let latest = latest_version();
    if from_version > latest {
        return Err(DbError::UnsupportedSchemaVersion {
            db_version: from_version,
            latest_supported: latest,
        });
    }

    let pending: Vec<&SchemaStep> = SCHEMA_STEPS
        .iter()
        .filter(|step| step.version > from_version)
        .collect();
    if pending.is_empty() {
        debug!("event=db_migrate module=db status=skipped version={from_version}");
        return Ok(());
    }

    let tx = conn.transaction()?;
    for step in &pending {
        run_step(&tx, step)?;
    }
    tx.commit()?;

    info!(
        "event=db_migrate module=db status=ok from_version={from_version} to_version={latest} steps={}",
        pending.len()
    );
    Ok(())
}

fn run_step(tx: &Transaction<'_>, step: &SchemaStep) -> DbResult<()> {
    tx.execute_batch(step.sql)?;
    tx.pragma_update(None, "user_version", step.version)?;
    debug!(
        "event=db_migrate_step module=db status=ok version={} table={}",
        step.version, step.table
    );
    Ok(())
}

fn schema_version(conn: &Connection) -> DbResult<u32> {
    Ok(conn.pragma_query_value(None, "user_version", |row| row.get(0))?)
}

#[cfg(test)]
mod tests {
    use super::{latest_version, SCHEMA_STEPS};
    use std::collections::HashSet;

    #[test]
    fn steps_are_numbered_without_gaps() {
        for (index, step) in SCHEMA_STEPS.iter().enumerate() {
            assert_eq!(step.version as usize, index + 1, "{}", step.table);
        }
        assert_eq!(latest_version() as usize, SCHEMA_STEPS.len());
    }

    #[test]
    fn each_step_introduces_a_distinct_table() {
        let tables: HashSet<_> = SCHEMA_STEPS.iter().map(|step| step.table).collect();
        assert_eq!(tables.len(), SCHEMA_STEPS.len());
        for step in SCHEMA_STEPS {
            assert!(
                step.sql.contains(&format!("CREATE TABLE {} (", step.table)),
                "step {} does not create `{}`",
                step.version,
                step.table
            );
        }
    }
}
