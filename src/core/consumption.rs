use crate::core::fuel::Fuel;
use crate::errors::{check_same_index, CalculationError, FuelMismatchError};

/// Fuel actually bought for each timestep, in the fuel's own units (kWh, litres etc.).
///
/// Negative values only appear once on-site generation has been netted off, and represent
/// energy exported in that timestep.
#[derive(Clone, Debug, PartialEq)]
pub struct Consumption {
    profile: Vec<f64>,
    fuel: Fuel,
}

impl Consumption {
    pub fn new(profile: Vec<f64>, fuel: Fuel) -> Self {
        Self { profile, fuel }
    }

    pub fn fuel(&self) -> Fuel {
        self.fuel
    }

    pub fn profile(&self) -> &[f64] {
        &self.profile
    }

    pub fn timesteps(&self) -> usize {
        self.profile.len()
    }

    /// Net annual total in fuel units.
    pub fn annual_sum(&self) -> f64 {
        self.profile.iter().sum()
    }

    pub fn annual_sum_kwh(&self) -> f64 {
        self.annual_sum() * self.fuel.kwh_per_unit()
    }

    /// Annual total of the timesteps where fuel was bought, in fuel units.
    pub fn annual_import_sum(&self) -> f64 {
        self.profile.iter().filter(|c| **c > 0.).sum()
    }

    pub fn annual_import_sum_kwh(&self) -> f64 {
        self.annual_import_sum() * self.fuel.kwh_per_unit()
    }

    /// Annual total of the timesteps where energy was sent back, as a positive number of units.
    pub fn annual_export_sum(&self) -> f64 {
        -self.profile.iter().filter(|c| **c < 0.).sum::<f64>()
    }

    /// Pointwise sum of two consumptions of the same fuel on the same time index.
    pub fn add(&self, other: &Consumption) -> Result<Consumption, CalculationError> {
        if self.fuel != other.fuel {
            return Err(FuelMismatchError::new(self.fuel, other.fuel).into());
        }
        check_same_index(self.timesteps(), other.timesteps())?;

        Ok(Self::new(
            self.profile
                .iter()
                .zip(other.profile.iter())
                .map(|(a, b)| a + b)
                .collect(),
            self.fuel,
        ))
    }
}
