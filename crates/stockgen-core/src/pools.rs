//! Read-only entity-id pools backing the emitters' random picks.

use rand::seq::SliceRandom;
use rand::Rng;

/// Ordered id pools fetched from the store's reference tables.
///
/// The generator only reads these; it never creates warehouses,
/// employees or counterparties.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityPools {
    pub warehouses: Vec<i64>,
    pub employees: Vec<i64>,
    pub suppliers: Vec<i64>,
    pub customers: Vec<i64>,
}

impl EntityPools {
    /// Assemble pools from raw reference-table ids.
    ///
    /// Counterparties carry no persisted role, so the generator splits
    /// them positionally: the first `max(1, n/2)` ids act as suppliers
    /// and the rest as customers. A sole counterparty serves as both.
    /// This is a policy choice of the synthetic generator, not
    /// inferred business logic.
    pub fn new(warehouses: Vec<i64>, employees: Vec<i64>, counterparties: Vec<i64>) -> Self {
        let (suppliers, customers) = if counterparties.is_empty() {
            (Vec::new(), Vec::new())
        } else {
            let midpoint = std::cmp::max(1, counterparties.len() / 2);
            let suppliers = counterparties[..midpoint].to_vec();
            let mut customers = counterparties[midpoint..].to_vec();
            if customers.is_empty() {
                customers = counterparties;
            }
            (suppliers, customers)
        };
        Self {
            warehouses,
            employees,
            suppliers,
            customers,
        }
    }
}

/// Pick one id from a pool; `None` when the pool is empty.
pub fn pick<R: Rng>(ids: &[i64], rng: &mut R) -> Option<i64> {
    ids.choose(rng).copied()
}

/// Pick a (source, target) pair from a pool.
///
/// The two ends are distinct whenever the pool holds at least two
/// distinct ids; with a single id both ends coincide.
pub fn pick_two<R: Rng>(ids: &[i64], rng: &mut R) -> Option<(i64, i64)> {
    let first = *ids.choose(rng)?;
    if ids.len() < 2 {
        return Some((first, first));
    }
    let rest: Vec<i64> = ids.iter().copied().filter(|id| *id != first).collect();
    match rest.choose(rng) {
        Some(&second) => Some((first, second)),
        None => Some((first, first)),
    }
}
