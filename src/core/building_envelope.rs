use crate::core::demand::Demand;
use crate::simulation_time::{SimulationTime, HALF_HOUR};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use tracing::debug;

// Default demand intensities, in kWh per m2 of floor area per half-hour
const BASE_DEMAND_KWH_PER_M2: f64 = 0.001;
const WATER_HEATING_DEMAND_KWH_PER_M2: f64 = 0.004;
const SPACE_HEATING_DEMAND_KWH_PER_M2: f64 = 0.005;

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
pub enum HouseType {
    #[default]
    Terrace,
    #[serde(rename = "Semi-detached")]
    #[strum(serialize = "Semi-detached")]
    SemiDetached,
    Detached,
    Flat,
}

/// The building fabric of a household and the energy it needs over a year.
///
/// Holds three demands on the shared time index: base (lighting and appliances, always met with
/// electricity), space heating and water heating.
#[derive(Clone, Debug, PartialEq)]
pub struct BuildingEnvelope {
    house_type: HouseType,
    floor_area_m2: f64,
    simulation_time: SimulationTime,
    base_demand: Demand,
    space_heating_demand: Demand,
    water_heating_demand: Demand,
}

impl BuildingEnvelope {
    /// Create an envelope with default demand profiles proportional to floor area.
    pub fn new(house_type: HouseType, floor_area_m2: f64, simulation_time: SimulationTime) -> Self {
        let timesteps = simulation_time.total_steps();
        let per_step = |kwh_per_m2_per_half_hour: f64| {
            Demand::flat(
                kwh_per_m2_per_half_hour * floor_area_m2 * simulation_time.step() / HALF_HOUR,
                timesteps,
            )
        };

        let envelope = Self {
            house_type,
            floor_area_m2,
            simulation_time,
            base_demand: per_step(BASE_DEMAND_KWH_PER_M2),
            space_heating_demand: per_step(SPACE_HEATING_DEMAND_KWH_PER_M2),
            water_heating_demand: per_step(WATER_HEATING_DEMAND_KWH_PER_M2),
        };
        debug!(
            "{house_type} of {floor_area_m2} m2: space heating {}, water heating {}",
            envelope.space_heating_demand.describe(),
            envelope.water_heating_demand.describe()
        );

        envelope
    }

    pub fn house_type(&self) -> HouseType {
        self.house_type
    }

    pub fn floor_area_m2(&self) -> f64 {
        self.floor_area_m2
    }

    pub fn simulation_time(&self) -> SimulationTime {
        self.simulation_time
    }

    pub fn base_demand(&self) -> &Demand {
        &self.base_demand
    }

    pub fn space_heating_demand(&self) -> &Demand {
        &self.space_heating_demand
    }

    pub fn water_heating_demand(&self) -> &Demand {
        &self.water_heating_demand
    }

    pub fn with_base_demand_annual(&self, annual_kwh: f64) -> Self {
        Self {
            base_demand: self.base_demand.rescale_to(annual_kwh),
            ..self.clone()
        }
    }

    pub fn with_space_heating_demand_annual(&self, annual_kwh: f64) -> Self {
        Self {
            space_heating_demand: self.space_heating_demand.rescale_to(annual_kwh),
            ..self.clone()
        }
    }

    pub fn with_water_heating_demand_annual(&self, annual_kwh: f64) -> Self {
        Self {
            water_heating_demand: self.water_heating_demand.rescale_to(annual_kwh),
            ..self.clone()
        }
    }
}
