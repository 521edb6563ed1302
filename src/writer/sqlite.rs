use polars::prelude::{AnyValue, Column, DataFrame};
use rusqlite::types::Null;
use rusqlite::{Connection, OpenFlags, Statement};
use tracing::{debug, info};

use super::schema_gen::{generate_create_table, generate_indexes};
use crate::config::StoreLocation;
use crate::error::{EtlError, Result};
use crate::frame::{days_to_date, DATE_FORMAT};
use crate::schema::{DependencyResolver, TableSchema};
use crate::transform::Dimensions;
use crate::ui::Ui;

/// Rows bound between progress updates
const BATCH_SIZE: usize = 1000;

/// The relational store, one connection per run
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) the store named by a connection string.
    ///
    /// Existing databases are opened as-is; nothing is truncated.
    pub fn connect(uri: &str) -> Result<Self> {
        Self::open(uri, OpenFlags::default())
    }

    /// Open an existing store without creating or writing anything
    pub fn connect_read_only(uri: &str) -> Result<Self> {
        Self::open(uri, OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX)
    }

    fn open(uri: &str, flags: OpenFlags) -> Result<Self> {
        let location = StoreLocation::parse(uri)?;
        let connection_error = |source| EtlError::Connection {
            uri: uri.to_string(),
            source,
        };

        let conn = match &location {
            StoreLocation::File(path) => Connection::open_with_flags(path, flags),
            StoreLocation::Memory => Connection::open_in_memory(),
        }
        .map_err(connection_error)?;

        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA synchronous = NORMAL;",
        )
        .map_err(connection_error)?;

        debug!(?location, "opened store");
        Ok(Self { conn })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Create the given tables and their FK indexes if they do not exist yet
    pub fn create_tables(&self, schemas: &[&TableSchema]) -> Result<()> {
        for schema in schemas {
            let schema_error = |source| EtlError::Schema {
                table: schema.name,
                source,
            };

            self.conn
                .execute(&generate_create_table(schema), [])
                .map_err(schema_error)?;

            for index_sql in generate_indexes(schema) {
                self.conn.execute(&index_sql, []).map_err(schema_error)?;
            }
        }

        info!("Created {} tables", schemas.len());
        Ok(())
    }

    /// Append the rows of `frame` to one table.
    ///
    /// Only schema columns present in the frame are written. The table's rows
    /// go in one transaction; earlier tables are unaffected if this one fails.
    pub fn insert_frame(&mut self, schema: &TableSchema, frame: &DataFrame, ui: &mut impl Ui) -> Result<u64> {
        let insert_error = |source| EtlError::Insert {
            table: schema.name,
            source,
        };

        let columns: Vec<(&str, &Column)> = schema
            .column_names()
            .filter_map(|name| frame.column(name).ok().map(|column| (name, column)))
            .collect();
        if columns.is_empty() || frame.height() == 0 {
            return Ok(0);
        }

        let names: Vec<&str> = columns.iter().map(|(name, _)| *name).collect();
        let placeholders: Vec<&str> = columns.iter().map(|_| "?").collect();
        let insert_sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            schema.name,
            names.join(", "),
            placeholders.join(", ")
        );

        let total = frame.height();
        let tx = self.conn.transaction().map_err(insert_error)?;
        let mut count: u64 = 0;

        {
            let mut stmt = tx.prepare_cached(&insert_sql).map_err(insert_error)?;

            for start in (0..total).step_by(BATCH_SIZE) {
                let end = (start + BATCH_SIZE).min(total);
                for row in start..end {
                    for (idx, (_, column)) in columns.iter().enumerate() {
                        let value = column.get(row)?;
                        bind_value(&value, idx + 1, &mut stmt).map_err(insert_error)?;
                    }
                    stmt.raw_execute().map_err(insert_error)?;
                }

                count += (end - start) as u64;
                ui.set_progress(count, total as u64, schema.name);
            }
        }

        tx.commit().map_err(insert_error)?;
        ui.log(format!("{}: {} rows", schema.name, count));

        Ok(count)
    }

    /// Append dimensions, then facts, in FK dependency order
    pub fn load(&mut self, dims: &Dimensions, facts: &DataFrame, ui: &mut impl Ui) -> Result<Vec<(&'static str, u64)>> {
        let positions = dims.positions.to_frame()?;

        let mut counts = Vec::new();
        for schema in DependencyResolver::new().load_order()? {
            let frame = match schema.name {
                "teams" => &dims.teams,
                "nationalities" => &dims.nationalities,
                "positions" => &positions,
                "players" => facts,
                _ => continue,
            };

            let count = self.insert_frame(schema, frame, ui)?;
            info!(table = schema.name, rows = count, "inserted rows");
            counts.push((schema.name, count));
        }

        ui.clear_progress();
        Ok(counts)
    }
}

/// Bind one frame cell as a SQLite parameter; dates are stored as ISO text
fn bind_value(value: &AnyValue, idx: usize, stmt: &mut Statement) -> rusqlite::Result<()> {
    match value {
        AnyValue::Null => stmt.raw_bind_parameter(idx, Null),
        AnyValue::Boolean(b) => stmt.raw_bind_parameter(idx, b),
        AnyValue::Int32(i) => stmt.raw_bind_parameter(idx, i),
        AnyValue::Int64(i) => stmt.raw_bind_parameter(idx, i),
        AnyValue::UInt32(i) => stmt.raw_bind_parameter(idx, i),
        AnyValue::Float32(f) => stmt.raw_bind_parameter(idx, f),
        AnyValue::Float64(f) => stmt.raw_bind_parameter(idx, f),
        AnyValue::String(s) => stmt.raw_bind_parameter(idx, *s),
        AnyValue::StringOwned(s) => stmt.raw_bind_parameter(idx, s.as_str()),
        AnyValue::Date(days) => match days_to_date(*days) {
            Some(date) => stmt.raw_bind_parameter(idx, date.format(DATE_FORMAT).to_string()),
            None => stmt.raw_bind_parameter(idx, Null),
        },
        other => stmt.raw_bind_parameter(idx, other.to_string()),
    }
}

#[cfg(test)]
impl SqliteStore {
    /// Number of rows currently in a table
    pub fn count_rows(&self, table: &str) -> Result<u64> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get::<_, i64>(0))
            .map(|n| n as u64)
            .map_err(EtlError::Query)
    }
}
