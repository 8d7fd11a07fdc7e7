#[allow(clippy::module_inception)]
pub mod energy_supply;
