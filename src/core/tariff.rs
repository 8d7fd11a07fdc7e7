use crate::core::consumption::Consumption;
use crate::core::fuel::Fuel;
use crate::core::units::{pence_to_pounds, DAYS_PER_YEAR};
use crate::errors::FuelMismatchError;
use serde::Serialize;

// Standard tariff prices, in pence per unit of fuel and pence per day
const STANDARD_ELECTRICITY_IMPORT: f64 = 34.0;
const STANDARD_ELECTRICITY_EXPORT: f64 = 15.0;
const STANDARD_ELECTRICITY_STANDING_CHARGE: f64 = 46.0;
const STANDARD_GAS_IMPORT: f64 = 10.3;
const STANDARD_GAS_STANDING_CHARGE: f64 = 28.0;
const STANDARD_OIL_IMPORT: f64 = 95.0;

/// The prices a household pays for one fuel.
///
/// All prices are in pence: per unit of the fuel for imports and exports, and per day for the
/// standing charge.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tariff {
    fuel: Fuel,
    p_per_unit_import: f64,
    p_per_unit_export: f64,
    p_per_day: f64,
}

impl Tariff {
    pub fn new(fuel: Fuel, p_per_unit_import: f64, p_per_unit_export: f64, p_per_day: f64) -> Self {
        Self {
            fuel,
            p_per_unit_import,
            p_per_unit_export,
            p_per_day,
        }
    }

    pub fn standard(fuel: Fuel) -> Self {
        match fuel {
            Fuel::Electricity => Self::new(
                fuel,
                STANDARD_ELECTRICITY_IMPORT,
                STANDARD_ELECTRICITY_EXPORT,
                STANDARD_ELECTRICITY_STANDING_CHARGE,
            ),
            Fuel::Gas => Self::new(fuel, STANDARD_GAS_IMPORT, 0., STANDARD_GAS_STANDING_CHARGE),
            Fuel::Oil => Self::new(fuel, STANDARD_OIL_IMPORT, 0., 0.),
        }
    }

    pub fn fuel(&self) -> Fuel {
        self.fuel
    }

    pub fn p_per_unit_import(&self) -> f64 {
        self.p_per_unit_import
    }

    pub fn p_per_unit_export(&self) -> f64 {
        self.p_per_unit_export
    }

    pub fn p_per_day(&self) -> f64 {
        self.p_per_day
    }

    pub fn with_p_per_unit_import(&self, p_per_unit_import: f64) -> Self {
        Self {
            p_per_unit_import,
            ..self.clone()
        }
    }

    pub fn with_p_per_unit_export(&self, p_per_unit_export: f64) -> Self {
        Self {
            p_per_unit_export,
            ..self.clone()
        }
    }

    pub fn with_p_per_day(&self, p_per_day: f64) -> Self {
        Self {
            p_per_day,
            ..self.clone()
        }
    }

    /// Annual standing charge in pounds.
    pub fn annual_standing_charge(&self) -> f64 {
        pence_to_pounds(DAYS_PER_YEAR as f64 * self.p_per_day)
    }

    /// Annual cost in pounds of the given consumption on this tariff.
    ///
    /// Timesteps with positive consumption are charged at the import price, and timesteps with
    /// negative consumption (net export after generation) are credited at the export price.
    pub fn annual_cost(&self, consumption: &Consumption) -> Result<f64, FuelMismatchError> {
        if consumption.fuel() != self.fuel {
            return Err(FuelMismatchError::new(self.fuel, consumption.fuel()));
        }

        Ok(self.annual_standing_charge()
            + pence_to_pounds(
                consumption.annual_import_sum() * self.p_per_unit_import
                    - consumption.annual_export_sum() * self.p_per_unit_export,
            ))
    }
}
