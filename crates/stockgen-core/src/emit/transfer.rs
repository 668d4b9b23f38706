//! Weekly inter-warehouse transfer emitter.

use crate::calendar::week_iterator;
use crate::movement::{business_hours_timestamp, MovementRecord, SYNTHETIC_TAG};
use crate::pools::{pick, pick_two, EntityPools};
use crate::profile::DemandProfile;
use chrono::{Duration, NaiveDate};
use rand::Rng;
use std::collections::BTreeMap;

/// Emit probability-gated transfers, at most one per (week, product).
///
/// Each ISO week overlapping the range rolls the product's transfer
/// probability; on success the transfer lands on a random day of that
/// week. Week anchors can reach outside the requested range, so days
/// falling before `start` or after `end` are skipped. Source and
/// target warehouses are distinct whenever at least two exist; the
/// origin and target employees are drawn independently and may
/// coincide.
pub fn emit_transfers<R: Rng>(
    products: &BTreeMap<i64, String>,
    profiles: &BTreeMap<i64, DemandProfile>,
    pools: &EntityPools,
    start: NaiveDate,
    end: NaiveDate,
    rng: &mut R,
) -> Vec<MovementRecord> {
    let mut records = Vec::new();
    for week_start in week_iterator(start, end) {
        for (&product_id, name) in products {
            let Some(profile) = profiles.get(&product_id) else {
                continue;
            };
            if rng.gen::<f64>() > profile.transfer_probability {
                continue;
            }
            let transfer_date = week_start + Duration::days(rng.gen_range(0..=6));
            if transfer_date < start || transfer_date > end {
                continue;
            }
            let Some((source, target)) = pick_two(&pools.warehouses, rng) else {
                continue;
            };
            let quantity = (profile.base_rate * rng.gen_range(0.2..=0.6)).round() as i64;
            let Some(employee_id) = pick(&pools.employees, rng) else {
                continue;
            };
            let Some(target_employee_id) = pick(&pools.employees, rng) else {
                continue;
            };
            records.push(MovementRecord::transfer(
                business_hours_timestamp(transfer_date, rng),
                format!("{SYNTHETIC_TAG} Transfer {name}"),
                source,
                employee_id,
                target_employee_id,
                target,
                product_id,
                quantity.max(1),
            ));
        }
    }
    records
}
