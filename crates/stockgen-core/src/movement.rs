//! Movement record model shared by the emitters and the store layer.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rand::Rng;
use std::fmt;

/// Marker embedded in generated movement labels.
///
/// Kept for operator visibility when browsing the store; cleanup keys
/// on the explicit origin column, not on this string.
pub const SYNTHETIC_TAG: &str = "[SYNTHETIC_FORECAST]";

/// First hour of the business day movements are logged in.
const BUSINESS_OPEN_HOUR: u32 = 8;
/// Last hour of the business day movements are logged in.
const BUSINESS_LAST_HOUR: u32 = 19;

/// Kind of a logged warehouse event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MovementKind {
    Inbound,
    Outbound,
    Transfer,
}

impl MovementKind {
    /// Uppercase wire form stored in the movements table.
    pub fn as_str(&self) -> &'static str {
        match self {
            MovementKind::Inbound => "INBOUND",
            MovementKind::Outbound => "OUTBOUND",
            MovementKind::Transfer => "TRANSFER",
        }
    }
}

impl fmt::Display for MovementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One synthetic movement together with its single product line.
///
/// Kind/target invariant: transfers always carry a target employee and
/// a target warehouse, inbound and outbound movements never do. The
/// constructors below are the only way this crate builds records, so
/// the invariant holds by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct MovementRecord {
    pub timestamp: NaiveDateTime,
    pub info: String,
    pub kind: MovementKind,
    pub warehouse_id: i64,
    pub employee_id: i64,
    pub counterparty_id: Option<i64>,
    pub target_employee_id: Option<i64>,
    pub target_warehouse_id: Option<i64>,
    pub product_id: i64,
    pub quantity: i64,
}

impl MovementRecord {
    /// A restock delivered by `supplier_id` (if any supplier exists).
    pub fn inbound(
        timestamp: NaiveDateTime,
        info: String,
        warehouse_id: i64,
        employee_id: i64,
        supplier_id: Option<i64>,
        product_id: i64,
        quantity: i64,
    ) -> Self {
        Self {
            timestamp,
            info,
            kind: MovementKind::Inbound,
            warehouse_id,
            employee_id,
            counterparty_id: supplier_id,
            target_employee_id: None,
            target_warehouse_id: None,
            product_id,
            quantity,
        }
    }

    /// A shipment to `customer_id` (if any customer exists).
    pub fn outbound(
        timestamp: NaiveDateTime,
        info: String,
        warehouse_id: i64,
        employee_id: i64,
        customer_id: Option<i64>,
        product_id: i64,
        quantity: i64,
    ) -> Self {
        Self {
            timestamp,
            info,
            kind: MovementKind::Outbound,
            warehouse_id,
            employee_id,
            counterparty_id: customer_id,
            target_employee_id: None,
            target_warehouse_id: None,
            product_id,
            quantity,
        }
    }

    /// An inter-warehouse transfer. Source and target warehouses
    /// coincide only when the store has a single warehouse.
    #[allow(clippy::too_many_arguments)]
    pub fn transfer(
        timestamp: NaiveDateTime,
        info: String,
        warehouse_id: i64,
        employee_id: i64,
        target_employee_id: i64,
        target_warehouse_id: i64,
        product_id: i64,
        quantity: i64,
    ) -> Self {
        Self {
            timestamp,
            info,
            kind: MovementKind::Transfer,
            warehouse_id,
            employee_id,
            counterparty_id: None,
            target_employee_id: Some(target_employee_id),
            target_warehouse_id: Some(target_warehouse_id),
            product_id,
            quantity,
        }
    }
}

/// Attach a random business-hours time of day to a calendar date.
pub fn business_hours_timestamp<R: Rng>(date: NaiveDate, rng: &mut R) -> NaiveDateTime {
    let hour = rng.gen_range(BUSINESS_OPEN_HOUR..=BUSINESS_LAST_HOUR);
    let minute = rng.gen_range(0..=59);
    let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
    date.and_time(time)
}
