//! Vitals Units - Canonical-unit physical quantities
//!
//! Every physical value a record carries is held in one canonical unit per
//! dimension, whatever unit the caller supplied:
//! - Mass (kg; g, mg, ug, lb, oz)
//! - Energy (J; kJ, cal, kcal)
//! - Length (m; km, cm, mm, mi, ft, in, yd)
//! - Power (W; kW, kcal/day)
//! - Volume (L; mL, floz, cup, gal)
//! - Velocity (m/s; km/h, mph)

pub mod factors;
mod quantity;

pub use quantity::{CanonicalQuantity, Energy, Length, Mass, Power, Velocity, Volume};
