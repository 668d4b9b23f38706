//! SQLite populator for stockgen.
//!
//! Wires the pure emitters from `stockgen-core` to a SQLite movement
//! store: resolves products and entity pools, runs cleanup, inserts
//! the generated movement and line rows, and commits the whole run as
//! one transaction.
//!
//! # Example
//!
//! ```rust
//! use stockgen_populate_sqlite::{populate, MovementStore, PopulateOptions};
//!
//! let mut store = MovementStore::open_in_memory().unwrap();
//! store.migrate().unwrap();
//! # store.connection().execute_batch(
//! #     "INSERT INTO products(id, name) VALUES (1, 'Crate');
//! #      INSERT INTO warehouse(id) VALUES (1);
//! #      INSERT INTO employees(id) VALUES (1);"
//! # ).unwrap();
//!
//! let options = PopulateOptions {
//!     seed: 42,
//!     start: chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
//!     end: chrono::NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
//!     products: None,
//!     wipe_all: false,
//!     dry_run: false,
//! };
//! let counts = populate(&mut store, &options).unwrap();
//! assert_eq!(counts.inbound, 1); // one month anchor, one product
//! ```

pub mod error;
pub mod populator;
pub mod store;

pub use error::PopulateError;
pub use populator::{populate, PopulateCounts, PopulateOptions};
pub use store::{CleanupMode, MovementStore, ORIGIN_ORGANIC, ORIGIN_SYNTHETIC};
