use crate::core::fuel::Fuel;
use crate::core::heating_system::HeatingSystem;
use crate::core::house::{FuelBreakdown, House};
use crate::core::solar::irradiance::IrradianceLookup;
use crate::core::solar::Solar;
use crate::errors::CalculationError;
use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};
use tracing::{debug, info};

/// The situations a household is compared across, in the order they are reported.
#[derive(Clone, Copy, Debug, Display, EnumIter, Eq, Hash, PartialEq, Serialize)]
pub enum Scenario {
    #[serde(rename = "Current")]
    #[strum(serialize = "Current")]
    Current,
    #[serde(rename = "With solar")]
    #[strum(serialize = "With solar")]
    Solar,
    #[serde(rename = "With a heat pump")]
    #[strum(serialize = "With a heat pump")]
    HeatPump,
    #[serde(rename = "With solar and a heat pump")]
    #[strum(serialize = "With solar and a heat pump")]
    SolarAndHeatPump,
}

/// The three upgraded variants of a baseline house. Each is an independent value.
#[derive(Clone, Debug, PartialEq)]
pub struct UpgradedHouses {
    pub solar_house: House,
    pub hp_house: House,
    pub both_house: House,
}

impl UpgradedHouses {
    pub fn house_for<'a>(&'a self, baseline: &'a House, scenario: Scenario) -> &'a House {
        match scenario {
            Scenario::Current => baseline,
            Scenario::Solar => &self.solar_house,
            Scenario::HeatPump => &self.hp_house,
            Scenario::SolarAndHeatPump => &self.both_house,
        }
    }
}

/// One row of the comparison table.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ScenarioResults {
    pub scenario: Scenario,
    pub annual_bill: f64,
    pub annual_consumption_kwh: f64,
    pub annual_tco2: f64,
    /// Reduction in annual bill against the current situation, in pounds
    pub bill_saving: f64,
    pub tco2_saving: f64,
    #[serde(skip)]
    pub fuels: Vec<FuelResults>,
}

/// A scenario's figures for one fuel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct FuelResults {
    pub scenario: Scenario,
    pub fuel: Fuel,
    pub consumption_units: f64,
    pub units: &'static str,
    pub consumption_kwh: f64,
    pub export_kwh: f64,
    pub bill: f64,
    pub tco2: f64,
}

impl FuelResults {
    fn from_breakdown(scenario: Scenario, breakdown: FuelBreakdown) -> Self {
        Self {
            scenario,
            fuel: breakdown.fuel,
            consumption_units: breakdown.consumption_units,
            units: breakdown.fuel.units(),
            consumption_kwh: breakdown.consumption_kwh,
            export_kwh: breakdown.export_kwh,
            bill: breakdown.bill,
            tco2: breakdown.tco2,
        }
    }
}

/// Produce the upgraded variants of a baseline house.
///
/// Arguments:
/// * `baseline` - the house as it is now; it is only read
/// * `upgrade_heating` - the heating system to switch to, normally a heat pump
/// * `upgrade_solar` - the solar installation to add
/// * `irradiance` - yield lookup used to work out the solar generation
pub fn upgrade_buildings(
    baseline: &House,
    upgrade_heating: &HeatingSystem,
    upgrade_solar: &Solar,
    irradiance: &impl IrradianceLookup,
) -> UpgradedHouses {
    debug!(
        "Upgrading {} house to {} and {} solar panels",
        baseline.heating_system().name(),
        upgrade_heating.name(),
        upgrade_solar.number_of_panels()
    );

    let solar_house = baseline.with_solar(upgrade_solar, irradiance);
    let hp_house = baseline.with_heating_system(upgrade_heating.clone());
    let both_house = hp_house.with_solar(upgrade_solar, irradiance);

    UpgradedHouses {
        solar_house,
        hp_house,
        both_house,
    }
}

/// Build the comparison table, one row per scenario in a fixed order starting with the current
/// situation.
pub fn compare_scenarios(
    baseline: &House,
    upgrades: &UpgradedHouses,
) -> Result<Vec<ScenarioResults>, CalculationError> {
    let mut rows: Vec<ScenarioResults> = Vec::with_capacity(4);

    for scenario in Scenario::iter() {
        let breakdown = upgrades.house_for(baseline, scenario).breakdown_per_fuel()?;

        let annual_bill = breakdown.iter().map(|b| b.bill).sum::<f64>();
        let annual_consumption_kwh = breakdown.iter().map(|b| b.consumption_kwh).sum::<f64>();
        let annual_tco2 = breakdown.iter().map(|b| b.tco2).sum::<f64>();
        let (bill_saving, tco2_saving) = match rows.first() {
            Some(current) => (
                current.annual_bill - annual_bill,
                current.annual_tco2 - annual_tco2,
            ),
            None => (0., 0.),
        };

        info!(
            "{scenario}: £{annual_bill:.2} a year, {annual_consumption_kwh:.0} kWh, {annual_tco2:.2} tCO2"
        );

        rows.push(ScenarioResults {
            scenario,
            annual_bill,
            annual_consumption_kwh,
            annual_tco2,
            bill_saving,
            tco2_saving,
            fuels: breakdown
                .into_iter()
                .map(|b| FuelResults::from_breakdown(scenario, b))
                .collect(),
        });
    }

    Ok(rows)
}

/// Upgrade a baseline house and compare every scenario in one go.
pub fn compare_upgrades(
    baseline: &House,
    upgrade_heating: &HeatingSystem,
    upgrade_solar: &Solar,
    irradiance: &impl IrradianceLookup,
) -> Result<Vec<ScenarioResults>, CalculationError> {
    let upgrades = upgrade_buildings(baseline, upgrade_heating, upgrade_solar, irradiance);
    compare_scenarios(baseline, &upgrades)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::building_envelope::{BuildingEnvelope, HouseType};
    use crate::core::heating_system::HeatingSystemKind;
    use crate::core::solar::irradiance::TypicalDayIrradiance;
    use crate::core::solar::CompassDirection;
    use crate::core::tariff::Tariff;
    use crate::simulation_time::SimulationTime;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    #[fixture]
    fn baseline() -> House {
        House::new(
            BuildingEnvelope::new(HouseType::Detached, 120., SimulationTime::base_year()),
            HeatingSystem::from_kind(HeatingSystemKind::OilBoiler),
        )
    }

    #[fixture]
    fn heat_pump() -> HeatingSystem {
        HeatingSystem::from_kind(HeatingSystemKind::HeatPump)
    }

    #[fixture]
    fn solar() -> Solar {
        Solar::new(CompassDirection::SouthWest.into(), 30.)
    }

    #[fixture]
    fn irradiance() -> TypicalDayIrradiance {
        TypicalDayIrradiance::default()
    }

    #[rstest]
    fn should_apply_one_substitution_per_variant(
        baseline: House,
        heat_pump: HeatingSystem,
        solar: Solar,
        irradiance: TypicalDayIrradiance,
    ) {
        let upgrades = upgrade_buildings(&baseline, &heat_pump, &solar, &irradiance);

        assert_eq!(
            upgrades.solar_house.heating_system(),
            baseline.heating_system()
        );
        assert!(upgrades.solar_house.generation().is_some());

        assert_eq!(upgrades.hp_house.heating_system(), &heat_pump);
        assert_eq!(upgrades.hp_house.fuels(), vec![Fuel::Electricity]);
        assert!(upgrades.hp_house.generation().is_none());

        assert_eq!(upgrades.both_house.heating_system(), &heat_pump);
        assert_eq!(
            upgrades.both_house.generation(),
            upgrades.solar_house.generation()
        );
        assert_eq!(upgrades.both_house.envelope(), baseline.envelope());
    }

    #[rstest]
    fn should_leave_baseline_untouched(
        baseline: House,
        heat_pump: HeatingSystem,
        solar: Solar,
        irradiance: TypicalDayIrradiance,
    ) {
        let cheap_electricity = Tariff::standard(Fuel::Electricity).with_p_per_unit_import(28.);
        let baseline = baseline.with_tariff(cheap_electricity).unwrap();
        let snapshot = baseline.clone();

        let upgrades = upgrade_buildings(&baseline, &heat_pump, &solar, &irradiance);

        assert_eq!(baseline, snapshot);
        assert_eq!(
            upgrades.hp_house.tariff(Fuel::Electricity),
            baseline.tariff(Fuel::Electricity)
        );
    }

    #[rstest]
    fn should_report_scenarios_in_fixed_order(
        baseline: House,
        heat_pump: HeatingSystem,
        solar: Solar,
        irradiance: TypicalDayIrradiance,
    ) {
        let rows = compare_upgrades(&baseline, &heat_pump, &solar, &irradiance).unwrap();

        assert_eq!(
            rows.iter().map(|r| r.scenario.to_string()).collect::<Vec<_>>(),
            [
                "Current",
                "With solar",
                "With a heat pump",
                "With solar and a heat pump"
            ]
        );
        assert_eq!(rows[0].bill_saving, 0.);
        assert_eq!(rows[0].tco2_saving, 0.);
        for row in &rows {
            assert_relative_eq!(row.bill_saving, rows[0].annual_bill - row.annual_bill);
            assert_relative_eq!(
                row.annual_bill,
                row.fuels.iter().map(|f| f.bill).sum::<f64>()
            );
        }
        assert_eq!(rows[0].fuels.len(), 2);
        assert_eq!(rows[0].fuels[1].units, "litres");
        assert_eq!(rows[3].fuels.len(), 1);
    }

    #[rstest]
    fn should_save_with_each_upgrade_from_oil(
        baseline: House,
        heat_pump: HeatingSystem,
        solar: Solar,
        irradiance: TypicalDayIrradiance,
    ) {
        let rows = compare_upgrades(&baseline, &heat_pump, &solar, &irradiance).unwrap();

        for row in &rows[1..] {
            assert!(row.tco2_saving > 0., "{} should cut emissions", row.scenario);
            assert!(row.annual_tco2 >= 0.);
        }
        assert!(rows[3].annual_tco2 < rows[2].annual_tco2);
        assert!(rows[1].fuels[0].export_kwh > 0.);
    }

    #[rstest]
    fn should_produce_identical_rows_when_repeated(
        baseline: House,
        heat_pump: HeatingSystem,
        solar: Solar,
    ) {
        let irradiance = TypicalDayIrradiance::default();
        assert_eq!(
            compare_upgrades(&baseline, &heat_pump, &solar, &irradiance).unwrap(),
            compare_upgrades(&baseline, &heat_pump, &solar, &irradiance).unwrap()
        );
    }
}
