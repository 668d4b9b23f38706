//! Daily shipment emitter: the demand time series proper.

use crate::calendar::day_iterator;
use crate::movement::{business_hours_timestamp, MovementRecord, SYNTHETIC_TAG};
use crate::pools::{pick, EntityPools};
use crate::profile::DemandProfile;
use chrono::{Datelike, NaiveDate};
use rand::Rng;
use rand_distr::StandardNormal;
use std::collections::BTreeMap;
use std::f64::consts::PI;

/// Length of the annual seasonal cycle, days.
const SEASON_CYCLE_DAYS: f64 = 365.0;

/// Expected daily demand before noise: linear trend over elapsed days
/// plus one annual sinusoidal harmonic.
fn expected_demand(profile: &DemandProfile, day_index: f64, seasonal_angle: f64) -> f64 {
    profile.base_rate
        + profile.trend * day_index
        + profile.seasonal_amp * (seasonal_angle + profile.seasonal_phase).sin()
}

/// Emit probability-thinned daily shipments for every product.
///
/// For each (day, product) the demand is the trend/seasonality model
/// plus additive Gaussian noise, rounded and floored at zero. A day
/// ships only when that demand is positive and a uniform draw clears
/// the product's ship probability, so shipments stay sparse; the
/// shipped quantity is floored at one. This is the signal a
/// downstream forecaster is expected to recover trend and seasonality
/// from.
pub fn emit_outbound<R: Rng>(
    products: &BTreeMap<i64, String>,
    profiles: &BTreeMap<i64, DemandProfile>,
    pools: &EntityPools,
    start: NaiveDate,
    end: NaiveDate,
    rng: &mut R,
) -> Vec<MovementRecord> {
    let mut records = Vec::new();
    for day in day_iterator(start, end) {
        let day_index = (day - start).num_days() as f64;
        let seasonal_angle = 2.0 * PI * (f64::from(day.ordinal()) / SEASON_CYCLE_DAYS);
        for (&product_id, name) in products {
            let Some(profile) = profiles.get(&product_id) else {
                continue;
            };
            let noise: f64 = rng.sample(StandardNormal);
            let demand = expected_demand(profile, day_index, seasonal_angle)
                + noise * profile.noise_sigma;
            let demand = demand.round().max(0.0) as i64;
            if demand == 0 || rng.gen::<f64>() > profile.ship_probability {
                continue;
            }
            let Some(warehouse_id) = pick(&pools.warehouses, rng) else {
                continue;
            };
            let Some(employee_id) = pick(&pools.employees, rng) else {
                continue;
            };
            let customer_id = pick(&pools.customers, rng);
            records.push(MovementRecord::outbound(
                business_hours_timestamp(day, rng),
                format!("{SYNTHETIC_TAG} Shipment {name}"),
                warehouse_id,
                employee_id,
                customer_id,
                product_id,
                demand.max(1),
            ));
        }
    }
    records
}
