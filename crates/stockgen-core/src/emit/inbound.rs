//! Monthly restock emitter.

use crate::calendar::month_iterator;
use crate::movement::{business_hours_timestamp, MovementRecord, SYNTHETIC_TAG};
use crate::pools::{pick, EntityPools};
use crate::profile::DemandProfile;
use chrono::NaiveDate;
use rand::Rng;
use std::collections::BTreeMap;

/// Days of coverage a monthly restock batch is sized for.
const RESTOCK_WINDOW_DAYS: f64 = 28.0;

/// Emit one restock per (month, product).
///
/// Restocking is modeled as a regular monthly batch sized from the
/// base daily rate over a four-week window, scaled by the product's
/// supply factor and a uniform efficiency draw. It is deliberately
/// decoupled from demand and, unlike shipments, not probability-gated:
/// every month anchor in range yields exactly one restock per product.
pub fn emit_inbound<R: Rng>(
    products: &BTreeMap<i64, String>,
    profiles: &BTreeMap<i64, DemandProfile>,
    pools: &EntityPools,
    start: NaiveDate,
    end: NaiveDate,
    rng: &mut R,
) -> Vec<MovementRecord> {
    let mut records = Vec::new();
    for month_start in month_iterator(start, end) {
        for (&product_id, name) in products {
            let Some(profile) = profiles.get(&product_id) else {
                continue;
            };
            let efficiency = rng.gen_range(0.8..=1.2);
            let quantity = (profile.base_rate * RESTOCK_WINDOW_DAYS * profile.supply_factor
                * efficiency)
                .round() as i64;
            let Some(warehouse_id) = pick(&pools.warehouses, rng) else {
                continue;
            };
            let Some(employee_id) = pick(&pools.employees, rng) else {
                continue;
            };
            let supplier_id = pick(&pools.suppliers, rng);
            records.push(MovementRecord::inbound(
                business_hours_timestamp(month_start, rng),
                format!("{SYNTHETIC_TAG} Restock {name}"),
                warehouse_id,
                employee_id,
                supplier_id,
                product_id,
                quantity.max(1),
            ));
        }
    }
    records
}
