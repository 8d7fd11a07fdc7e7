use crate::core::consumption::Consumption;
use crate::core::fuel::Fuel;
use crate::core::solar::Generation;
use crate::errors::{check_same_index, CalculationError, FuelMismatchError};
use itertools::multiunzip;

/// A household's supply of one fuel: what it buys, and for electricity what it generates itself.
///
/// Generation is offset against consumption one timestep at a time. Whatever the household cannot
/// use in a timestep is exported, and whatever generation cannot cover is imported.
#[derive(Clone, Debug, PartialEq)]
pub struct EnergySupply {
    consumption: Consumption,
    energy_import: Vec<f64>,
    energy_export: Vec<f64>,
    energy_generated_consumed: Vec<f64>,
}

impl EnergySupply {
    pub fn new(consumption: Consumption) -> Self {
        Self {
            energy_import: consumption.profile().to_vec(),
            energy_export: vec![0.; consumption.timesteps()],
            energy_generated_consumed: vec![0.; consumption.timesteps()],
            consumption,
        }
    }

    /// Arguments:
    /// * `consumption` - electricity the household would buy with no generation
    /// * `generation` - electricity generated on site, on the same time index
    pub fn with_generation(
        consumption: Consumption,
        generation: &Generation,
    ) -> Result<Self, CalculationError> {
        let fuel = consumption.fuel();
        if fuel != Fuel::Electricity {
            return Err(FuelMismatchError::new(Fuel::Electricity, fuel).into());
        }
        check_same_index(consumption.timesteps(), generation.timesteps())?;

        let (energy_import, energy_export, energy_generated_consumed): (Vec<_>, Vec<_>, Vec<_>) =
            multiunzip(
                consumption
                    .profile()
                    .iter()
                    .zip(generation.profile_kwh())
                    .map(|(demand, supply)| {
                        calc_energy_import_export(*demand, *supply)
                    }),
            );

        Ok(Self {
            consumption,
            energy_import,
            energy_export,
            energy_generated_consumed,
        })
    }

    pub fn fuel(&self) -> Fuel {
        self.consumption.fuel()
    }

    /// Consumption before any generation is offset against it.
    pub fn gross_consumption(&self) -> &Consumption {
        &self.consumption
    }

    pub fn get_energy_import(&self) -> &[f64] {
        &self.energy_import
    }

    /// Energy sent back to the grid in each timestep, as a positive number.
    pub fn get_energy_export(&self) -> &[f64] {
        &self.energy_export
    }

    pub fn get_energy_generated_consumed(&self) -> &[f64] {
        &self.energy_generated_consumed
    }

    /// Net flow across the meter in each timestep: positive when importing, negative when
    /// exporting.
    pub fn net_consumption(&self) -> Consumption {
        Consumption::new(
            self.energy_import
                .iter()
                .zip(self.energy_export.iter())
                .map(|(import, export)| import - export)
                .collect(),
            self.fuel(),
        )
    }

    pub fn annual_import_kwh(&self) -> f64 {
        self.energy_import.iter().sum::<f64>() * self.fuel().kwh_per_unit()
    }

    pub fn annual_export_kwh(&self) -> f64 {
        self.energy_export.iter().sum::<f64>() * self.fuel().kwh_per_unit()
    }

    pub fn annual_generated_consumed_kwh(&self) -> f64 {
        self.energy_generated_consumed.iter().sum::<f64>() * self.fuel().kwh_per_unit()
    }
}

/// Split one timestep's demand and on-site supply into (import, export, generated and consumed).
fn calc_energy_import_export(demand: f64, supply: f64) -> (f64, f64, f64) {
    let supply_consumed = supply.min(demand).max(0.);

    (
        demand - supply_consumed,
        supply - supply_consumed,
        supply_consumed,
    )
}
