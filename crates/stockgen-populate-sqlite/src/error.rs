//! Error types for the SQLite populate pipeline.

use thiserror::Error;

/// Errors that can occur while populating the movement store.
///
/// Precondition failures (missing products, empty reference tables)
/// surface before any mutation; store errors abort the transaction,
/// so nothing is committed either way.
#[derive(Error, Debug)]
pub enum PopulateError {
    /// SQLite connection or statement error.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Inverted date range.
    #[error(transparent)]
    Range(#[from] stockgen_core::InvalidRange),

    /// The store has no products at all.
    #[error("no products found in the store")]
    NoProducts,

    /// Explicitly requested product ids missing from the store.
    #[error("products not found in the store: {0:?}")]
    MissingProducts(Vec<i64>),

    /// The store has no warehouses to originate movements from.
    #[error("no warehouses found in the store")]
    NoWarehouses,

    /// The store has no employees to book movements against.
    #[error("no employees found in the store")]
    NoEmployees,
}
