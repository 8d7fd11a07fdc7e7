use crate::core::fuel::Fuel;
use thiserror::Error;

/// Umbrella error for the calculation core.
///
/// Every variant signals a broken invariant in whatever assembled the inputs rather than bad
/// end-user input, so callers are expected to propagate these rather than recover from them.
#[derive(Debug, Error)]
pub enum CalculationError {
    #[error(transparent)]
    UnknownFuel(#[from] UnknownFuelError),
    #[error(transparent)]
    InvalidEfficiency(#[from] InvalidEfficiencyError),
    #[error(transparent)]
    FuelMismatch(#[from] FuelMismatchError),
    #[error(transparent)]
    TimeIndexMismatch(#[from] TimeIndexMismatchError),
    #[error("No tariff was set for {0}, which the household consumes")]
    MissingTariff(Fuel),
}

#[derive(Clone, Debug, Error, PartialEq)]
#[error("Unknown fuel '{name}', expected one of electricity, gas or oil")]
pub struct UnknownFuelError {
    name: String,
}

impl UnknownFuelError {
    pub(crate) fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq)]
#[error("An efficiency of {efficiency} was given, but efficiencies must be greater than zero")]
pub struct InvalidEfficiencyError {
    efficiency: f64,
}

impl InvalidEfficiencyError {
    pub(crate) fn new(efficiency: f64) -> Self {
        Self { efficiency }
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("Expected a value for {expected}, but it was for {found}")]
pub struct FuelMismatchError {
    pub expected: Fuel,
    pub found: Fuel,
}

impl FuelMismatchError {
    pub(crate) fn new(expected: Fuel, found: Fuel) -> Self {
        Self { expected, found }
    }
}

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("Time series cannot be combined as they have {left} and {right} timesteps")]
pub struct TimeIndexMismatchError {
    left: usize,
    right: usize,
}

impl TimeIndexMismatchError {
    pub(crate) fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }
}

pub(crate) fn check_same_index(left: usize, right: usize) -> Result<(), TimeIndexMismatchError> {
    if left != right {
        return Err(TimeIndexMismatchError::new(left, right));
    }

    Ok(())
}
