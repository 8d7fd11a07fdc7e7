use crate::core::units::grams_to_tonnes;
use crate::errors::UnknownFuelError;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

// The closed registry of fuels a household can buy.

const KWH_PER_LITRE_OF_OIL: f64 = 10.35;

// Emission factors in gCO2/kWh (approximate)
const ELECTRICITY_G_CO2_PER_KWH: f64 = 180.;
const GAS_G_CO2_PER_KWH: f64 = 300.;
const OIL_G_CO2_PER_KWH: f64 = 400.;

#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    Hash,
    IntoStaticStr,
    Ord,
    PartialEq,
    PartialOrd,
    Serialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum Fuel {
    Electricity,
    Gas,
    Oil,
}

impl Fuel {
    /// Name of the unit the fuel is bought in.
    pub fn units(&self) -> &'static str {
        match self {
            Fuel::Electricity | Fuel::Gas => "kWh",
            Fuel::Oil => "litres",
        }
    }

    /// Number of kWh delivered by one unit of the fuel.
    pub fn kwh_per_unit(&self) -> f64 {
        match self {
            Fuel::Electricity | Fuel::Gas => 1.,
            Fuel::Oil => KWH_PER_LITRE_OF_OIL,
        }
    }

    /// Emission factor in tCO2 per kWh.
    pub fn tco2_per_kwh(&self) -> f64 {
        grams_to_tonnes(match self {
            Fuel::Electricity => ELECTRICITY_G_CO2_PER_KWH,
            Fuel::Gas => GAS_G_CO2_PER_KWH,
            Fuel::Oil => OIL_G_CO2_PER_KWH,
        })
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// Look up a fuel in the registry by its name.
pub fn fuel_by_name(name: &str) -> Result<Fuel, UnknownFuelError> {
    name.parse().map_err(|_| UnknownFuelError::new(name))
}
