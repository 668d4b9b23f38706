//! Populate pipeline: cleanup plus the three emitters in one
//! transaction.

use crate::error::PopulateError;
use crate::store::{self, CleanupMode, MovementStore, ReferenceTable};
use chrono::NaiveDate;
use rand::rngs::StdRng;
use rand::SeedableRng;
use stockgen_core::{
    build_profiles, calendar, emit_inbound, emit_outbound, emit_transfers, EntityPools,
};
use tracing::{debug, info};

/// Options for one populate run.
#[derive(Debug, Clone)]
pub struct PopulateOptions {
    /// Seed keeping the generated history stable across runs.
    pub seed: u64,
    /// First day of the generated range, inclusive.
    pub start: NaiveDate,
    /// Last day of the generated range, inclusive.
    pub end: NaiveDate,
    /// Restrict generation to these product ids (`None` = all).
    pub products: Option<Vec<i64>>,
    /// Remove all existing movements, organic rows included, before
    /// generating.
    pub wipe_all: bool,
    /// Run the full pipeline but roll back instead of committing.
    pub dry_run: bool,
}

/// Per-kind movement counts from a populate run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateCounts {
    pub inbound: u64,
    pub outbound: u64,
    pub transfers: u64,
}

impl PopulateCounts {
    pub fn total(&self) -> u64 {
        self.inbound + self.outbound + self.transfers
    }
}

/// Run cleanup plus the three emitters as one atomic unit.
///
/// Either the whole run commits, or the transaction rolls back on the
/// first error (and always on dry-run) and nothing observable changes.
/// Emitters run in a fixed order (inbound, outbound, transfers) off a
/// single run-level RNG, so equal seeds against equal reference data
/// reproduce the exact same rows.
pub fn populate(
    store: &mut MovementStore,
    options: &PopulateOptions,
) -> Result<PopulateCounts, PopulateError> {
    calendar::validate_range(options.start, options.end)?;

    let tx = store.transaction()?;

    let products = store::fetch_products(&tx, options.products.as_deref())?;
    let warehouses = store::fetch_reference_ids(&tx, ReferenceTable::Warehouses)?;
    let employees = store::fetch_reference_ids(&tx, ReferenceTable::Employees)?;
    let counterparties = store::fetch_reference_ids(&tx, ReferenceTable::Counterparties)?;
    if warehouses.is_empty() {
        return Err(PopulateError::NoWarehouses);
    }
    if employees.is_empty() {
        return Err(PopulateError::NoEmployees);
    }
    info!(
        products = products.len(),
        warehouses = warehouses.len(),
        employees = employees.len(),
        counterparties = counterparties.len(),
        "resolved reference data"
    );

    let profiles = build_profiles(products.keys().copied(), options.seed);
    let pools = EntityPools::new(warehouses, employees, counterparties);

    let mode = if options.wipe_all {
        CleanupMode::WipeAll
    } else {
        CleanupMode::Synthetic
    };
    store::cleanup(&tx, mode)?;
    debug!(?mode, "removed prior movements");

    let mut rng = StdRng::seed_from_u64(options.seed);
    let inbound = emit_inbound(
        &products,
        &profiles,
        &pools,
        options.start,
        options.end,
        &mut rng,
    );
    let outbound = emit_outbound(
        &products,
        &profiles,
        &pools,
        options.start,
        options.end,
        &mut rng,
    );
    let transfers = emit_transfers(
        &products,
        &profiles,
        &pools,
        options.start,
        options.end,
        &mut rng,
    );

    let counts = PopulateCounts {
        inbound: inbound.len() as u64,
        outbound: outbound.len() as u64,
        transfers: transfers.len() as u64,
    };

    for record in inbound.iter().chain(&outbound).chain(&transfers) {
        let movement_id = store::insert_movement(&tx, record)?;
        store::insert_line(&tx, movement_id, record.product_id, record.quantity)?;
    }

    if options.dry_run {
        info!(total = counts.total(), "dry run, rolling back");
        tx.rollback()?;
    } else {
        tx.commit()?;
        info!(
            inbound = counts.inbound,
            outbound = counts.outbound,
            transfers = counts.transfers,
            "populate committed"
        );
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rusqlite::Connection;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Store with 3 products, 2 warehouses, 2 employees,
    /// 4 counterparties.
    fn seeded_store() -> MovementStore {
        let store = MovementStore::open_in_memory().unwrap();
        store.migrate().unwrap();
        store
            .connection()
            .execute_batch(
                "INSERT INTO products(id, name)
                 VALUES (1, 'Crate'), (2, 'Drum'), (3, 'Pallet');
                 INSERT INTO warehouse(id) VALUES (1), (2);
                 INSERT INTO employees(id) VALUES (1), (2);
                 INSERT INTO counterparties(id) VALUES (1), (2), (3), (4);",
            )
            .unwrap();
        store
    }

    fn one_week_options() -> PopulateOptions {
        PopulateOptions {
            seed: 42,
            start: date(2024, 1, 1),
            end: date(2024, 1, 7),
            products: None,
            wipe_all: false,
            dry_run: false,
        }
    }

    fn dump_rows(conn: &Connection) -> Vec<String> {
        let mut stmt = conn
            .prepare(
                "SELECT m.date, m.info, m.type, m.origin,
                        coalesce(m.counterparty_id, -1),
                        m.employee_id,
                        coalesce(m.target_employee_id, -1),
                        coalesce(m.target_warehouse_id, -1),
                        m.warehouse_id, pm.quantity, pm.product_id
                 FROM movements m JOIN products_movement pm ON pm.movement_id = m.id
                 ORDER BY m.id",
            )
            .unwrap();
        stmt.query_map([], |row| {
            Ok(format!(
                "{}|{}|{}|{}|{}|{}|{}|{}|{}|{}|{}",
                row.get::<_, String>(0)?,
                row.get::<_, String>(1)?,
                row.get::<_, String>(2)?,
                row.get::<_, String>(3)?,
                row.get::<_, i64>(4)?,
                row.get::<_, i64>(5)?,
                row.get::<_, i64>(6)?,
                row.get::<_, i64>(7)?,
                row.get::<_, i64>(8)?,
                row.get::<_, i64>(9)?,
                row.get::<_, i64>(10)?,
            ))
        })
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
    }

    #[test]
    fn test_one_week_scenario() {
        let mut store = seeded_store();
        let counts = populate(&mut store, &one_week_options()).unwrap();

        // Recorded golden run for seed 42. The single month anchor
        // 2024-01-01 is in range, so inbound is exactly one restock
        // per product; the outbound and transfer counts pin the RNG
        // wiring and draw order, so any reordering fails here.
        assert_eq!(
            counts,
            PopulateCounts {
                inbound: 3,
                outbound: 10,
                transfers: 0,
            }
        );
        assert!(counts.outbound <= 21); // 3 products x 7 days

        let rows = dump_rows(store.connection());
        assert_eq!(rows.len() as u64, counts.total());
    }

    #[test]
    fn test_quantities_at_least_one() {
        let mut store = seeded_store();
        let options = PopulateOptions {
            end: date(2024, 6, 30),
            ..one_week_options()
        };
        populate(&mut store, &options).unwrap();
        let min_quantity: i64 = store
            .connection()
            .query_row("SELECT MIN(quantity) FROM products_movement", [], |row| {
                row.get(0)
            })
            .unwrap();
        assert!(min_quantity >= 1);
    }

    #[test]
    fn test_kind_target_invariant() {
        let mut store = seeded_store();
        let options = PopulateOptions {
            end: date(2024, 3, 31),
            ..one_week_options()
        };
        populate(&mut store, &options).unwrap();

        let bad_transfers: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM movements WHERE type = 'TRANSFER'
                 AND (target_warehouse_id IS NULL OR target_employee_id IS NULL)",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(bad_transfers, 0);

        let bad_linear: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM movements WHERE type IN ('INBOUND', 'OUTBOUND')
                 AND (target_warehouse_id IS NOT NULL OR target_employee_id IS NOT NULL)",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(bad_linear, 0);
    }

    #[test]
    fn test_deterministic_across_stores() {
        let mut store_a = seeded_store();
        let mut store_b = seeded_store();
        let options = PopulateOptions {
            end: date(2024, 2, 29),
            ..one_week_options()
        };
        let counts_a = populate(&mut store_a, &options).unwrap();
        let counts_b = populate(&mut store_b, &options).unwrap();
        assert_eq!(counts_a, counts_b);
        assert_eq!(dump_rows(store_a.connection()), dump_rows(store_b.connection()));
    }

    #[test]
    fn test_rerun_replaces_previous_synthetic_rows() {
        let mut store = seeded_store();
        let options = one_week_options();
        let first = populate(&mut store, &options).unwrap();
        let second = populate(&mut store, &options).unwrap();
        assert_eq!(first, second);
        let rows = dump_rows(store.connection());
        assert_eq!(rows.len() as u64, second.total());
    }

    #[test]
    fn test_organic_rows_survive_default_cleanup() {
        let mut store = seeded_store();
        store
            .connection()
            .execute(
                "INSERT INTO movements(date, info, type, employee_id, warehouse_id)
                 VALUES ('2023-12-01 10:00:00', 'manual receipt', 'INBOUND', 1, 1)",
                [],
            )
            .unwrap();

        populate(&mut store, &one_week_options()).unwrap();
        let organic: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM movements WHERE origin = 'organic'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(organic, 1);

        let options = PopulateOptions {
            wipe_all: true,
            ..one_week_options()
        };
        populate(&mut store, &options).unwrap();
        let organic: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM movements WHERE origin = 'organic'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(organic, 0);
    }

    #[test]
    fn test_product_filter_limits_generation() {
        let mut store = seeded_store();
        let options = PopulateOptions {
            products: Some(vec![2]),
            ..one_week_options()
        };
        let counts = populate(&mut store, &options).unwrap();
        assert_eq!(counts.inbound, 1);
        let distinct: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(DISTINCT product_id) FROM products_movement",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(distinct, 1);
    }

    #[test]
    fn test_missing_product_aborts_without_writes() {
        let mut store = seeded_store();
        let options = PopulateOptions {
            products: Some(vec![1, 99]),
            ..one_week_options()
        };
        let err = populate(&mut store, &options).unwrap_err();
        assert!(matches!(err, PopulateError::MissingProducts(ref ids) if ids == &vec![99]));
        assert!(dump_rows(store.connection()).is_empty());
    }

    #[test]
    fn test_empty_warehouses_rejected() {
        let store = MovementStore::open_in_memory().unwrap();
        store.migrate().unwrap();
        store
            .connection()
            .execute_batch(
                "INSERT INTO products(id, name) VALUES (1, 'Crate');
                 INSERT INTO employees(id) VALUES (1);",
            )
            .unwrap();
        let mut store = store;
        let err = populate(&mut store, &one_week_options()).unwrap_err();
        assert!(matches!(err, PopulateError::NoWarehouses));
    }

    #[test]
    fn test_empty_employees_rejected() {
        let store = MovementStore::open_in_memory().unwrap();
        store.migrate().unwrap();
        store
            .connection()
            .execute_batch(
                "INSERT INTO products(id, name) VALUES (1, 'Crate');
                 INSERT INTO warehouse(id) VALUES (1);",
            )
            .unwrap();
        let mut store = store;
        let err = populate(&mut store, &one_week_options()).unwrap_err();
        assert!(matches!(err, PopulateError::NoEmployees));
    }

    #[test]
    fn test_inverted_range_rejected_before_store_access() {
        let mut store = seeded_store();
        let options = PopulateOptions {
            start: date(2024, 2, 1),
            end: date(2024, 1, 1),
            ..one_week_options()
        };
        let err = populate(&mut store, &options).unwrap_err();
        assert!(matches!(err, PopulateError::Range(_)));
    }

    #[test]
    fn test_dry_run_rolls_back() {
        let mut store = seeded_store();
        let options = PopulateOptions {
            dry_run: true,
            ..one_week_options()
        };
        let counts = populate(&mut store, &options).unwrap();
        assert!(counts.total() > 0);
        assert!(dump_rows(store.connection()).is_empty());
    }

    #[test]
    fn test_no_counterparties_still_generates() {
        let store = MovementStore::open_in_memory().unwrap();
        store.migrate().unwrap();
        store
            .connection()
            .execute_batch(
                "INSERT INTO products(id, name) VALUES (1, 'Crate');
                 INSERT INTO warehouse(id) VALUES (1);
                 INSERT INTO employees(id) VALUES (1);",
            )
            .unwrap();
        let mut store = store;
        let counts = populate(&mut store, &one_week_options()).unwrap();
        assert_eq!(counts.inbound, 1);
        let with_counterparty: i64 = store
            .connection()
            .query_row(
                "SELECT COUNT(*) FROM movements WHERE counterparty_id IS NOT NULL",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(with_counterparty, 0);
    }
}
