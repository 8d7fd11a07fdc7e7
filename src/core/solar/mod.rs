pub mod irradiance;

use crate::core::solar::irradiance::IrradianceLookup;
use crate::core::units::normalise_azimuth;
use crate::simulation_time::SimulationTime;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

// Fixed panel footprint and rating
const PANEL_HEIGHT_M: f64 = 1.67;
const PANEL_WIDTH_M: f64 = 1.0;
const KWP_PER_PANEL: f64 = 0.30;
const MAX_PANELS: u32 = 40;

// Share of the sloped roof that panels can actually cover
const USABLE_ROOF_FRACTION: f64 = 0.8;
const ROOF_PITCH_DEGREES: f64 = 30.;
const SYSTEM_LOSS_FRACTION: f64 = 0.14;

/// Direction a roof faces, as an azimuth in degrees clockwise from south in the range (-180, 180].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Orientation {
    azimuth_degrees: f64,
}

impl Orientation {
    pub fn new(azimuth_degrees: f64) -> Self {
        Self {
            azimuth_degrees: normalise_azimuth(azimuth_degrees),
        }
    }

    pub fn azimuth_degrees(&self) -> f64 {
        self.azimuth_degrees
    }
}

#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    Deserialize,
    Display,
    EnumIter,
    EnumString,
    Eq,
    PartialEq,
    Serialize,
)]
pub enum CompassDirection {
    #[default]
    South,
    SouthWest,
    West,
    NorthWest,
    North,
    NorthEast,
    East,
    SouthEast,
}

impl CompassDirection {
    pub fn azimuth_degrees(&self) -> f64 {
        match self {
            CompassDirection::South => 0.,
            CompassDirection::SouthWest => 45.,
            CompassDirection::West => 90.,
            CompassDirection::NorthWest => 135.,
            CompassDirection::North => 180.,
            CompassDirection::SouthEast => -45.,
            CompassDirection::East => -90.,
            CompassDirection::NorthEast => -135.,
        }
    }
}

impl From<CompassDirection> for Orientation {
    fn from(direction: CompassDirection) -> Self {
        Orientation::new(direction.azimuth_degrees())
    }
}

/// Electricity generated on site, in kWh for each timestep.
#[derive(Clone, Debug, PartialEq)]
pub struct Generation {
    profile_kwh: Vec<f64>,
}

impl Generation {
    pub fn new(profile_kwh: Vec<f64>) -> Self {
        Self { profile_kwh }
    }

    pub fn profile_kwh(&self) -> &[f64] {
        &self.profile_kwh
    }

    pub fn timesteps(&self) -> usize {
        self.profile_kwh.len()
    }

    pub fn annual_sum(&self) -> f64 {
        self.profile_kwh.iter().sum()
    }
}

/// A rooftop solar installation.
#[derive(Clone, Debug, PartialEq)]
pub struct Solar {
    orientation: Orientation,
    roof_plan_area_m2: f64,
    number_of_panels: u32,
    kwp_per_panel: f64,
}

impl Solar {
    /// Arguments:
    /// * `orientation` - the direction the roof faces
    /// * `roof_plan_area_m2` - area of the roof seen from above, as drawn on a map
    ///
    /// The roof is filled with as many panels as fit.
    pub fn new(orientation: Orientation, roof_plan_area_m2: f64) -> Self {
        let mut solar = Self {
            orientation,
            roof_plan_area_m2: roof_plan_area_m2.max(0.),
            number_of_panels: 0,
            kwp_per_panel: KWP_PER_PANEL,
        };
        solar.number_of_panels = solar.max_panels();

        solar
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn roof_plan_area_m2(&self) -> f64 {
        self.roof_plan_area_m2
    }

    /// Sloped area of the roof, from its plan area and the assumed pitch.
    pub fn roof_area_m2(&self) -> f64 {
        self.roof_plan_area_m2 / ROOF_PITCH_DEGREES.to_radians().cos()
    }

    pub fn usable_roof_area_m2(&self) -> f64 {
        self.roof_area_m2() * USABLE_ROOF_FRACTION
    }

    /// The most panels that fit on the usable part of the roof, up to a domestic limit of 40.
    pub fn max_panels(&self) -> u32 {
        let fit = (self.usable_roof_area_m2() / (PANEL_HEIGHT_M * PANEL_WIDTH_M)).floor() as u32;
        fit.min(MAX_PANELS)
    }

    pub fn number_of_panels(&self) -> u32 {
        self.number_of_panels
    }

    pub fn kwp_per_panel(&self) -> f64 {
        self.kwp_per_panel
    }

    /// Ask for a number of panels, capped at what fits on the roof.
    pub fn with_number_of_panels(&self, number_of_panels: u32) -> Self {
        Self {
            number_of_panels: number_of_panels.min(self.max_panels()),
            ..self.clone()
        }
    }

    pub fn with_kwp_per_panel(&self, kwp_per_panel: f64) -> Self {
        Self {
            kwp_per_panel,
            ..self.clone()
        }
    }

    pub fn peak_power_kw(&self) -> f64 {
        self.number_of_panels as f64 * self.kwp_per_panel
    }

    /// Electricity generated in each timestep, after system losses.
    pub fn generation(
        &self,
        simulation_time: SimulationTime,
        irradiance: &impl IrradianceLookup,
    ) -> Generation {
        let peak_power = self.peak_power_kw();

        Generation::new(
            simulation_time
                .iter()
                .map(|t| {
                    peak_power
                        * irradiance.irradiance_factor(&self.orientation, &t)
                        * (1. - SYSTEM_LOSS_FRACTION)
                })
                .collect(),
        )
    }
}
