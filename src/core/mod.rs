pub mod building_envelope;
pub mod consumption;
pub mod demand;
pub mod energy_supply;
pub mod fuel;
pub mod heating_system;
pub mod house;
pub mod scenarios;
pub mod solar;
pub mod tariff;
pub mod units;
