use crate::core::consumption::Consumption;
use crate::core::demand::Demand;
use crate::core::fuel::Fuel;
use crate::errors::{CalculationError, InvalidEfficiencyError};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

// This module converts energy demand into fuel consumption for the heating systems a household
// can choose between.

/// The heating systems offered, each with default seasonal efficiencies and a fuel.
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
    PartialEq,
    Serialize,
)]
pub enum HeatingSystemKind {
    #[serde(rename = "Gas boiler")]
    #[strum(serialize = "Gas boiler")]
    GasBoiler,
    #[serde(rename = "Oil boiler")]
    #[strum(serialize = "Oil boiler")]
    OilBoiler,
    #[serde(rename = "Direct electric")]
    #[strum(serialize = "Direct electric")]
    DirectElectric,
    #[serde(rename = "Heat pump")]
    #[strum(serialize = "Heat pump")]
    HeatPump,
}

impl HeatingSystemKind {
    /// Default (space heating, water heating) efficiencies.
    pub fn default_efficiencies(&self) -> (f64, f64) {
        match self {
            HeatingSystemKind::GasBoiler => (0.85, 0.8),
            HeatingSystemKind::OilBoiler => (0.8, 0.75),
            HeatingSystemKind::DirectElectric => (1.0, 1.0),
            HeatingSystemKind::HeatPump => (3.5, 3.0),
        }
    }

    pub fn fuel(&self) -> Fuel {
        match self {
            HeatingSystemKind::GasBoiler => Fuel::Gas,
            HeatingSystemKind::OilBoiler => Fuel::Oil,
            HeatingSystemKind::DirectElectric | HeatingSystemKind::HeatPump => Fuel::Electricity,
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct HeatingSystem {
    kind: HeatingSystemKind,
    space_heating_efficiency: f64,
    water_heating_efficiency: f64,
}

impl HeatingSystem {
    /// Arguments:
    /// * `kind` - which heating system this is, determining its fuel
    /// * `space_heating_efficiency` - delivered heat per unit of energy bought for space heating
    ///                                (above 1 for heat pumps)
    /// * `water_heating_efficiency` - as above, for heating hot water
    pub fn new(
        kind: HeatingSystemKind,
        space_heating_efficiency: f64,
        water_heating_efficiency: f64,
    ) -> Result<Self, InvalidEfficiencyError> {
        Ok(Self {
            kind,
            space_heating_efficiency: validate_efficiency(space_heating_efficiency)?,
            water_heating_efficiency: validate_efficiency(water_heating_efficiency)?,
        })
    }

    /// The heating system with its default efficiencies.
    pub fn from_kind(kind: HeatingSystemKind) -> Self {
        let (space_heating_efficiency, water_heating_efficiency) = kind.default_efficiencies();
        Self {
            kind,
            space_heating_efficiency,
            water_heating_efficiency,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.into()
    }

    pub fn kind(&self) -> HeatingSystemKind {
        self.kind
    }

    pub fn fuel(&self) -> Fuel {
        self.kind.fuel()
    }

    pub fn space_heating_efficiency(&self) -> f64 {
        self.space_heating_efficiency
    }

    pub fn water_heating_efficiency(&self) -> f64 {
        self.water_heating_efficiency
    }

    pub fn with_space_heating_efficiency(
        &self,
        efficiency: f64,
    ) -> Result<Self, InvalidEfficiencyError> {
        Self::new(self.kind, efficiency, self.water_heating_efficiency)
    }

    pub fn with_water_heating_efficiency(
        &self,
        efficiency: f64,
    ) -> Result<Self, InvalidEfficiencyError> {
        Self::new(self.kind, self.space_heating_efficiency, efficiency)
    }

    pub fn space_heating_consumption(
        &self,
        space_heating_demand: &Demand,
    ) -> Result<Consumption, InvalidEfficiencyError> {
        self.consumption_for(space_heating_demand, self.space_heating_efficiency)
    }

    pub fn water_heating_consumption(
        &self,
        water_heating_demand: &Demand,
    ) -> Result<Consumption, InvalidEfficiencyError> {
        self.consumption_for(water_heating_demand, self.water_heating_efficiency)
    }

    /// Combined space and water heating consumption in this system's fuel.
    pub fn heating_consumption(
        &self,
        space_heating_demand: &Demand,
        water_heating_demand: &Demand,
    ) -> Result<Consumption, CalculationError> {
        self.space_heating_consumption(space_heating_demand)?
            .add(&self.water_heating_consumption(water_heating_demand)?)
    }

    /// Convert a demand into the fuel needed to meet it at the given efficiency.
    ///
    /// Each timestep is divided by the efficiency to get the kWh bought, then by the fuel's kWh
    /// per unit to get fuel units.
    pub fn consumption_for(
        &self,
        demand: &Demand,
        efficiency: f64,
    ) -> Result<Consumption, InvalidEfficiencyError> {
        let efficiency = validate_efficiency(efficiency)?;
        let kwh_per_unit = self.fuel().kwh_per_unit();

        Ok(Consumption::new(
            demand
                .profile_kwh()
                .iter()
                .map(|d| d / efficiency / kwh_per_unit)
                .collect(),
            self.fuel(),
        ))
    }
}

fn validate_efficiency(efficiency: f64) -> Result<f64, InvalidEfficiencyError> {
    // also rejects NaN
    if !(efficiency > 0.) {
        return Err(InvalidEfficiencyError::new(efficiency));
    }

    Ok(efficiency)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;
    use strum::IntoEnumIterator;

    #[fixture]
    fn demand() -> Demand {
        Demand::new(vec![0.4, 0.8, 1.2, 0., 2.])
    }

    #[rstest]
    fn should_divide_demand_by_efficiency(demand: Demand) {
        let gas_boiler = HeatingSystem::from_kind(HeatingSystemKind::GasBoiler);
        let consumption = gas_boiler.consumption_for(&demand, 0.8).unwrap();

        assert_eq!(consumption.fuel(), Fuel::Gas);
        for (c, d) in consumption.profile().iter().zip(demand.profile_kwh()) {
            assert_relative_eq!(*c, d / 0.8);
        }
    }

    #[rstest]
    fn should_convert_to_fuel_units(demand: Demand) {
        let oil_boiler = HeatingSystem::from_kind(HeatingSystemKind::OilBoiler);

        for efficiency in [0.1, 0.75, 1., 3.5, 8.] {
            let consumption = oil_boiler.consumption_for(&demand, efficiency).unwrap();
            assert_relative_eq!(
                consumption.annual_sum(),
                demand.annual_sum() / efficiency / 10.35,
                max_relative = 1e-12
            );
        }
    }

    #[rstest]
    #[case(0.)]
    #[case(-1.)]
    #[case(f64::NAN)]
    fn should_reject_non_positive_efficiency(demand: Demand, #[case] efficiency: f64) {
        let heat_pump = HeatingSystem::from_kind(HeatingSystemKind::HeatPump);
        assert!(heat_pump.consumption_for(&demand, efficiency).is_err());
        assert!(
            HeatingSystem::new(HeatingSystemKind::HeatPump, efficiency, 3.).is_err()
        );
        assert!(heat_pump.with_water_heating_efficiency(efficiency).is_err());
    }

    #[rstest]
    fn should_use_independent_efficiencies(demand: Demand) {
        let heat_pump = HeatingSystem::from_kind(HeatingSystemKind::HeatPump);
        let water_demand = Demand::flat(0.3, 5);

        let space = heat_pump.space_heating_consumption(&demand).unwrap();
        let water = heat_pump.water_heating_consumption(&water_demand).unwrap();
        let total = heat_pump
            .heating_consumption(&demand, &water_demand)
            .unwrap();

        assert_relative_eq!(space.annual_sum(), demand.annual_sum() / 3.5);
        assert_relative_eq!(water.annual_sum(), 1.5 / 3.);
        assert_relative_eq!(total.annual_sum(), space.annual_sum() + water.annual_sum());
        assert_eq!(total.fuel(), Fuel::Electricity);
    }

    #[rstest]
    fn should_have_defaults_for_every_kind() {
        for kind in HeatingSystemKind::iter() {
            let system = HeatingSystem::from_kind(kind);
            assert_eq!(
                (
                    system.space_heating_efficiency(),
                    system.water_heating_efficiency()
                ),
                kind.default_efficiencies()
            );
            assert_eq!(system.fuel(), kind.fuel());
        }
        assert_eq!(
            HeatingSystem::from_kind(HeatingSystemKind::GasBoiler).name(),
            "Gas boiler"
        );
    }

    #[rstest]
    fn should_parse_kind_from_display_name() {
        assert_eq!(
            "Heat pump".parse::<HeatingSystemKind>().unwrap(),
            HeatingSystemKind::HeatPump
        );
    }

    #[rstest]
    fn should_override_single_efficiency() {
        let boiler = HeatingSystem::from_kind(HeatingSystemKind::GasBoiler)
            .with_space_heating_efficiency(0.9)
            .unwrap();
        assert_eq!(boiler.space_heating_efficiency(), 0.9);
        assert_eq!(boiler.water_heating_efficiency(), 0.8);
    }
}
