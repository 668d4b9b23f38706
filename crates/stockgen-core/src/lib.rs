//! Seeded synthetic warehouse-movement generation.
//!
//! This crate produces deterministic movement histories (inbound
//! restocks, outbound shipments, inter-warehouse transfers) for a set
//! of products, so that a demand-forecasting module has plausible
//! historical signal to train against. Everything here is pure: the
//! emitters read profiles, entity-id pools and a date range, and
//! return movement records for a store layer to persist.
//!
//! # Architecture
//!
//! ```text
//! (seed, product ids)
//!        │
//!        ▼
//! ┌────────────────┐     ┌──────────────────┐
//! │ build_profiles │     │ calendar anchors │
//! │  one RNG per   │     │  months / weeks  │
//! │  product       │     │  / days          │
//! └───────┬────────┘     └────────┬─────────┘
//!         │                       │
//!         ▼                       ▼
//!   ┌──────────────────────────────────┐
//!   │ emit_inbound / emit_outbound /   │
//!   │ emit_transfers (&mut impl Rng)   │
//!   └───────────────┬──────────────────┘
//!                   ▼
//!          Vec<MovementRecord>
//! ```
//!
//! # Determinism
//!
//! Profiles depend only on `(seed, product_id)`: each product draws
//! from a fresh RNG seeded with a mixed sub-seed, so adding or
//! removing other products never changes a profile. The emitters take
//! an explicit run-level RNG handle; there is no hidden global random
//! state anywhere in the crate.
//!
//! # Example
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use std::collections::BTreeMap;
//! use stockgen_core::{build_profiles, emit_inbound, EntityPools};
//!
//! let products: BTreeMap<i64, String> = [(1, "Pallet jack".to_string())].into();
//! let profiles = build_profiles(products.keys().copied(), 42);
//! let pools = EntityPools::new(vec![10], vec![20], vec![30, 31]);
//!
//! let start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let end = chrono::NaiveDate::from_ymd_opt(2024, 3, 31).unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//!
//! let records = emit_inbound(&products, &profiles, &pools, start, end, &mut rng);
//! assert_eq!(records.len(), 3); // one restock per month per product
//! ```

pub mod calendar;
pub mod emit;
pub mod movement;
pub mod pools;
pub mod profile;

pub use calendar::{day_iterator, month_iterator, week_iterator, InvalidRange};
pub use emit::{emit_inbound, emit_outbound, emit_transfers};
pub use movement::{MovementKind, MovementRecord, SYNTHETIC_TAG};
pub use pools::EntityPools;
pub use profile::{build_profile, build_profiles, DemandProfile};
