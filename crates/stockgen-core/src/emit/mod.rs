//! Movement emitters, one per movement kind.
//!
//! Each emitter walks its own temporal grid (months for restocks,
//! days for shipments, ISO weeks for transfers), consults the product
//! profiles and draws from the caller's RNG, and returns the records
//! for the store layer to persist. Emitters never touch the store.

pub mod inbound;
pub mod outbound;
pub mod transfer;

pub use inbound::emit_inbound;
pub use outbound::emit_outbound;
pub use transfer::emit_transfers;
