//! Chunk sizing and packing engine
//!
//! Given units with fixed token costs, [`select_capacity`] picks a
//! power-of-two chunk capacity that minimizes padding and
//! [`pack_first_fit`] assigns every unit to a chunk without splitting it or
//! overflowing the capacity. Everything here is pure and synchronous.

pub mod capacity;
pub mod error;
pub mod packer;
pub mod plan;
pub mod unit;

pub use capacity::{CapacityChoice, select_capacity};
pub use error::{PackingError, PackingResult};
pub use packer::pack_first_fit;
pub use plan::{Chunk, PackingPlan};
pub use unit::Unit;
