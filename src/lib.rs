//! Weather-sim - regional weather, sky color and moon simulation

pub mod core;
pub mod atmosphere;
