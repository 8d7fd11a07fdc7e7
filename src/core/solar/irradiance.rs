use crate::core::solar::Orientation;
use crate::core::units::HOURS_PER_DAY;
use crate::simulation_time::SimulationTimeIteration;
use anyhow::bail;
use interp::{interp, InterpMode};
use serde::Deserialize;
use std::io::Read;

// This module provides the lookup of how much a solar installation yields at a given orientation
// and time of year.

const MONTHS_PER_YEAR: usize = 12;
const LAST_MONTH: u32 = 11;

// Typical south-facing yield on a 30 degree pitch in southern England, in kWh per kWp per hour,
// for an average day of each month. Sums to roughly 1000 kWh per kWp over a year.
#[rustfmt::skip]
const TYPICAL_DAY_KWH_PER_KWP: [[f64; 24]; MONTHS_PER_YEAR] = [
    [0., 0., 0., 0., 0., 0., 0., 0., 0.032, 0.104, 0.155, 0.181, 0.181, 0.155, 0.104, 0.032, 0., 0., 0., 0., 0., 0., 0., 0.],
    [0., 0., 0., 0., 0., 0., 0., 0.021, 0.104, 0.183, 0.240, 0.270, 0.270, 0.240, 0.183, 0.104, 0.021, 0., 0., 0., 0., 0., 0., 0.],
    [0., 0., 0., 0., 0., 0., 0.015, 0.097, 0.196, 0.283, 0.347, 0.380, 0.380, 0.347, 0.283, 0.196, 0.097, 0.015, 0., 0., 0., 0., 0., 0.],
    [0., 0., 0., 0., 0., 0.007, 0.070, 0.176, 0.286, 0.380, 0.449, 0.486, 0.486, 0.449, 0.380, 0.286, 0.176, 0.070, 0.007, 0., 0., 0., 0., 0.],
    [0., 0., 0., 0., 0.004, 0.029, 0.114, 0.225, 0.335, 0.430, 0.498, 0.535, 0.535, 0.498, 0.430, 0.335, 0.225, 0.114, 0.029, 0.004, 0., 0., 0., 0.],
    [0., 0., 0., 0., 0.010, 0.040, 0.130, 0.240, 0.348, 0.440, 0.507, 0.542, 0.542, 0.507, 0.440, 0.348, 0.240, 0.130, 0.040, 0.010, 0., 0., 0., 0.],
    [0., 0., 0., 0., 0.007, 0.034, 0.118, 0.224, 0.329, 0.419, 0.484, 0.518, 0.518, 0.484, 0.419, 0.329, 0.224, 0.118, 0.034, 0.007, 0., 0., 0., 0.],
    [0., 0., 0., 0., 0., 0.014, 0.087, 0.194, 0.302, 0.395, 0.464, 0.499, 0.499, 0.464, 0.395, 0.302, 0.194, 0.087, 0.014, 0., 0., 0., 0., 0.],
    [0., 0., 0., 0., 0., 0., 0.033, 0.128, 0.231, 0.322, 0.388, 0.422, 0.422, 0.388, 0.322, 0.231, 0.128, 0.033, 0., 0., 0., 0., 0., 0.],
    [0., 0., 0., 0., 0., 0., 0.001, 0.043, 0.136, 0.218, 0.277, 0.308, 0.308, 0.277, 0.218, 0.136, 0.043, 0.001, 0., 0., 0., 0., 0., 0.],
    [0., 0., 0., 0., 0., 0., 0., 0.001, 0.048, 0.122, 0.174, 0.201, 0.201, 0.174, 0.122, 0.048, 0.001, 0., 0., 0., 0., 0., 0., 0.],
    [0., 0., 0., 0., 0., 0., 0., 0., 0.014, 0.079, 0.128, 0.153, 0.153, 0.128, 0.079, 0.014, 0., 0., 0., 0., 0., 0., 0., 0.],
];

// Annual yield relative to a south-facing array, by azimuth clockwise from south
const ORIENTATION_AZIMUTHS: [f64; 9] = [-180., -135., -90., -45., 0., 45., 90., 135., 180.];
const ORIENTATION_FACTORS: [f64; 9] = [0.60, 0.68, 0.83, 0.95, 1.0, 0.95, 0.83, 0.68, 0.60];

/// Source of the solar yield for an orientation in a given timestep.
pub trait IrradianceLookup {
    /// Energy generated in kWh per kWp of installed capacity over the timestep, before system
    /// losses.
    fn irradiance_factor(&self, orientation: &Orientation, simtime: &SimulationTimeIteration)
        -> f64;
}

/// An irradiance lookup built from a typical day for each month, adjusted for orientation.
#[derive(Clone, Debug, PartialEq)]
pub struct TypicalDayIrradiance {
    kwh_per_kwp_per_hour: [[f64; 24]; MONTHS_PER_YEAR],
    orientation_azimuths: Vec<f64>,
    orientation_factors: Vec<f64>,
}

#[derive(Clone, Debug, Deserialize)]
struct TypicalDayRow {
    month: usize,
    hour: usize,
    kwh_per_kwp: f64,
}

impl TypicalDayIrradiance {
    /// Load the south-facing typical day yields from CSV with the columns `month` (1-12), `hour`
    /// (0-23) and `kwh_per_kwp`. Hours not listed have no yield.
    pub fn from_csv(data: impl Read) -> anyhow::Result<Self> {
        let mut kwh_per_kwp_per_hour = [[0.; 24]; MONTHS_PER_YEAR];

        for row in csv::Reader::from_reader(data).deserialize::<TypicalDayRow>() {
            let row = row?;
            if !(1..=MONTHS_PER_YEAR).contains(&row.month) {
                bail!("Month {} in irradiance data is outside 1 to 12", row.month);
            }
            if row.hour >= HOURS_PER_DAY as usize {
                bail!("Hour {} in irradiance data is outside 0 to 23", row.hour);
            }
            if row.kwh_per_kwp < 0. {
                bail!(
                    "Irradiance data for month {} hour {} is negative",
                    row.month,
                    row.hour
                );
            }
            kwh_per_kwp_per_hour[row.month - 1][row.hour] = row.kwh_per_kwp;
        }

        Ok(Self {
            kwh_per_kwp_per_hour,
            ..Default::default()
        })
    }

    fn orientation_factor(&self, orientation: &Orientation) -> f64 {
        interp(
            &self.orientation_azimuths,
            &self.orientation_factors,
            orientation.azimuth_degrees(),
            &InterpMode::default(),
        )
    }
}

impl Default for TypicalDayIrradiance {
    fn default() -> Self {
        Self {
            kwh_per_kwp_per_hour: TYPICAL_DAY_KWH_PER_KWP,
            orientation_azimuths: ORIENTATION_AZIMUTHS.to_vec(),
            orientation_factors: ORIENTATION_FACTORS.to_vec(),
        }
    }
}

impl IrradianceLookup for TypicalDayIrradiance {
    fn irradiance_factor(
        &self,
        orientation: &Orientation,
        simtime: &SimulationTimeIteration,
    ) -> f64 {
        // timesteps past the end of the year repeat December
        let month = simtime.current_month().unwrap_or(LAST_MONTH) as usize;
        let hour = simtime.hour_of_day() as usize;

        self.kwh_per_kwp_per_hour[month][hour]
            * simtime.timestep
            * self.orientation_factor(orientation)
    }
}
