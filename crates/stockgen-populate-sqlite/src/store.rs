//! SQLite persistence for movement rows.
//!
//! Only this module talks SQL. The emitters and the orchestrator deal
//! in [`MovementRecord`]s and id pools; everything row-shaped goes
//! through the helpers here.

use crate::error::PopulateError;
use rusqlite::{params, params_from_iter, Connection, Transaction};
use std::collections::BTreeMap;
use std::path::Path;
use stockgen_core::MovementRecord;

/// Timestamp layout used by the movements table.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Origin marker written on every movement this tool generates.
pub const ORIGIN_SYNTHETIC: &str = "synthetic";

/// Origin assumed for rows this tool did not create.
pub const ORIGIN_ORGANIC: &str = "organic";

/// Idempotent table definitions for a fresh store.
const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY,
    name TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS warehouse (
    id INTEGER PRIMARY KEY
);
CREATE TABLE IF NOT EXISTS employees (
    id INTEGER PRIMARY KEY
);
CREATE TABLE IF NOT EXISTS counterparties (
    id INTEGER PRIMARY KEY
);
CREATE TABLE IF NOT EXISTS movements (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    date TEXT NOT NULL,
    info TEXT NOT NULL,
    type TEXT NOT NULL,
    origin TEXT NOT NULL DEFAULT 'organic',
    counterparty_id INTEGER,
    employee_id INTEGER NOT NULL,
    target_employee_id INTEGER,
    target_warehouse_id INTEGER,
    warehouse_id INTEGER NOT NULL
);
CREATE TABLE IF NOT EXISTS products_movement (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    quantity INTEGER NOT NULL,
    movement_id INTEGER NOT NULL REFERENCES movements(id),
    product_id INTEGER NOT NULL REFERENCES products(id)
);
";

/// Cleanup scope executed before regeneration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanupMode {
    /// Delete only rows this tool generated (`origin = 'synthetic'`).
    Synthetic,
    /// Delete every movement and movement line, organic rows included.
    WipeAll,
}

/// Read-only reference tables the generator draws entity ids from.
#[derive(Debug, Clone, Copy)]
pub(crate) enum ReferenceTable {
    Warehouses,
    Employees,
    Counterparties,
}

impl ReferenceTable {
    fn sql_name(self) -> &'static str {
        match self {
            ReferenceTable::Warehouses => "warehouse",
            ReferenceTable::Employees => "employees",
            ReferenceTable::Counterparties => "counterparties",
        }
    }
}

/// Handle to the movement store.
pub struct MovementStore {
    conn: Connection,
}

impl MovementStore {
    /// Open (or create) the store at `path`.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, PopulateError> {
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Open an in-memory store (used in tests).
    pub fn open_in_memory() -> Result<Self, PopulateError> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Create missing tables and upgrade pre-existing ones. Idempotent.
    pub fn migrate(&self) -> Result<(), PopulateError> {
        self.apply_schema()?;
        self.ensure_origin_column()
    }

    /// Create any missing tables.
    pub fn apply_schema(&self) -> Result<(), PopulateError> {
        self.conn.execute_batch(SCHEMA)?;
        Ok(())
    }

    /// Add the origin column to movement tables created before it
    /// existed. Pre-existing rows keep the `'organic'` default, so a
    /// later synthetic-only cleanup leaves them alone.
    pub fn ensure_origin_column(&self) -> Result<(), PopulateError> {
        let alter = format!(
            "ALTER TABLE movements ADD COLUMN origin TEXT NOT NULL DEFAULT '{ORIGIN_ORGANIC}'"
        );
        match self.conn.execute(&alter, []) {
            Ok(_) => Ok(()),
            Err(err) if err.to_string().contains("duplicate column") => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Direct connection access, for reference-data seeding and tests.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction covering cleanup plus all inserts.
    /// Dropping it without an explicit commit rolls everything back.
    pub fn transaction(&mut self) -> Result<Transaction<'_>, PopulateError> {
        Ok(self.conn.transaction()?)
    }
}

/// Fetch ordered ids from one of the reference tables.
pub(crate) fn fetch_reference_ids(
    conn: &Connection,
    table: ReferenceTable,
) -> Result<Vec<i64>, PopulateError> {
    let sql = format!("SELECT id FROM {} ORDER BY id", table.sql_name());
    let mut stmt = conn.prepare(&sql)?;
    let ids = stmt
        .query_map([], |row| row.get(0))?
        .collect::<Result<Vec<i64>, _>>()?;
    Ok(ids)
}

/// Fetch products keyed by id, optionally restricted to `filter`.
///
/// Errors when the result is empty or when explicitly requested ids
/// are absent from the store.
pub fn fetch_products(
    conn: &Connection,
    filter: Option<&[i64]>,
) -> Result<BTreeMap<i64, String>, PopulateError> {
    let products: BTreeMap<i64, String> = match filter {
        Some(ids) if !ids.is_empty() => {
            let placeholders = vec!["?"; ids.len()].join(", ");
            let sql = format!(
                "SELECT id, name FROM products WHERE id IN ({placeholders}) ORDER BY id"
            );
            let mut stmt = conn.prepare(&sql)?;
            let rows = stmt
                .query_map(params_from_iter(ids.iter()), |row| {
                    Ok((row.get(0)?, row.get(1)?))
                })?
                .collect::<Result<_, _>>()?;
            rows
        }
        _ => {
            let mut stmt = conn.prepare("SELECT id, name FROM products ORDER BY id")?;
            let rows = stmt
                .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
                .collect::<Result<_, _>>()?;
            rows
        }
    };

    if let Some(ids) = filter {
        let mut missing: Vec<i64> = ids
            .iter()
            .copied()
            .filter(|id| !products.contains_key(id))
            .collect();
        if !missing.is_empty() {
            missing.sort_unstable();
            missing.dedup();
            return Err(PopulateError::MissingProducts(missing));
        }
    }
    if products.is_empty() {
        return Err(PopulateError::NoProducts);
    }
    Ok(products)
}

/// Insert one movement row, returning its id.
pub(crate) fn insert_movement(
    conn: &Connection,
    record: &MovementRecord,
) -> Result<i64, PopulateError> {
    conn.execute(
        "INSERT INTO movements(date, info, type, origin, counterparty_id, employee_id,
                               target_employee_id, target_warehouse_id, warehouse_id)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
        params![
            record.timestamp.format(TIMESTAMP_FORMAT).to_string(),
            record.info,
            record.kind.as_str(),
            ORIGIN_SYNTHETIC,
            record.counterparty_id,
            record.employee_id,
            record.target_employee_id,
            record.target_warehouse_id,
            record.warehouse_id,
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

/// Insert the single product line attached to a movement.
pub(crate) fn insert_line(
    conn: &Connection,
    movement_id: i64,
    product_id: i64,
    quantity: i64,
) -> Result<(), PopulateError> {
    conn.execute(
        "INSERT INTO products_movement(quantity, movement_id, product_id) VALUES (?1, ?2, ?3)",
        params![quantity, movement_id, product_id],
    )?;
    Ok(())
}

/// Remove prior movements according to `mode`.
pub fn cleanup(conn: &Connection, mode: CleanupMode) -> Result<(), PopulateError> {
    match mode {
        CleanupMode::WipeAll => {
            conn.execute("DELETE FROM products_movement", [])?;
            conn.execute("DELETE FROM movements", [])?;
        }
        CleanupMode::Synthetic => {
            conn.execute(
                "DELETE FROM products_movement WHERE movement_id IN
                     (SELECT id FROM movements WHERE origin = ?1)",
                params![ORIGIN_SYNTHETIC],
            )?;
            conn.execute(
                "DELETE FROM movements WHERE origin = ?1",
                params![ORIGIN_SYNTHETIC],
            )?;
        }
    }
    Ok(())
}
