//! Per-product statistical profiles driving the synthetic history.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Mixing constant decorrelating per-product sub-seeds.
///
/// Not cryptographic; it only spreads consecutive product ids far
/// enough apart in seed space that their profile draws differ.
pub const SUB_SEED_STRIDE: u64 = 97;

/// Derived parameters shaping one product's movement history.
///
/// Profiles are ephemeral: computed once per run from the global seed
/// and the product id, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct DemandProfile {
    /// Baseline units shipped per day.
    pub base_rate: f64,
    /// Signed linear drift in daily demand, units per elapsed day.
    pub trend: f64,
    /// Amplitude of the single annual seasonal harmonic.
    pub seasonal_amp: f64,
    /// Phase offset of the seasonal harmonic, radians.
    pub seasonal_phase: f64,
    /// Standard deviation of the additive Gaussian demand noise.
    pub noise_sigma: f64,
    /// Probability that a positive-demand day actually ships.
    pub ship_probability: f64,
    /// Probability that a given week sees an inter-warehouse transfer.
    pub transfer_probability: f64,
    /// Supply-efficiency multiplier applied to monthly restocks.
    pub supply_factor: f64,
}

/// Sub-seed feeding one product's profile RNG.
pub fn sub_seed(seed: u64, product_id: i64) -> u64 {
    seed.wrapping_add((product_id as u64).wrapping_mul(SUB_SEED_STRIDE))
}

/// Build the profile for a single product.
///
/// Identical `(seed, product_id)` pairs always yield identical
/// profiles: the product gets a fresh RNG seeded from [`sub_seed`],
/// independent of which other products are processed and in what
/// order. The draw order below is part of the determinism contract
/// and must not be reordered.
pub fn build_profile(seed: u64, product_id: i64) -> DemandProfile {
    let mut rng = StdRng::seed_from_u64(sub_seed(seed, product_id));
    let base_rate = rng.gen_range(8.0..=26.0);
    let mut trend = rng.gen_range(0.002..=0.01);
    if rng.gen_bool(0.25) {
        trend = -trend;
    }
    DemandProfile {
        base_rate,
        trend,
        seasonal_amp: rng.gen_range(3.0..=10.0),
        seasonal_phase: rng.gen_range(0.0..=2.0 * PI),
        noise_sigma: rng.gen_range(1.5..=4.5),
        ship_probability: rng.gen_range(0.4..=0.7),
        transfer_probability: rng.gen_range(0.12..=0.28),
        supply_factor: rng.gen_range(0.9..=1.2),
    }
}

/// Build profiles for every given product id, keyed by product id.
pub fn build_profiles<I>(product_ids: I, seed: u64) -> BTreeMap<i64, DemandProfile>
where
    I: IntoIterator<Item = i64>,
{
    product_ids
        .into_iter()
        .map(|id| (id, build_profile(seed, id)))
        .collect()
}
