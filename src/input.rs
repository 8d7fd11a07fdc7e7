use crate::core::building_envelope::{BuildingEnvelope, HouseType};
use crate::core::fuel::Fuel;
use crate::core::heating_system::{HeatingSystem, HeatingSystemKind};
use crate::core::house::House;
use crate::core::solar::{CompassDirection, Solar};
use crate::core::tariff::Tariff;
use crate::errors::CalculationError;
use crate::simulation_time::SimulationTime;
use anyhow::anyhow;
use serde::Deserialize;
use serde_valid::Validate;
use std::fmt::Debug;
use std::io::{BufReader, Read};
use strum::IntoEnumIterator;
use tracing::{debug, warn};

/// Parse an input document from JSON and check every value is within its allowed range.
pub fn ingest_for_processing(json: impl Read) -> anyhow::Result<Input> {
    let input: Input = serde_json::from_reader(BufReader::new(json))?;
    input
        .validate()
        .map_err(|errors| anyhow!("Input values were out of range: {errors}"))?;

    Ok(input)
}

/// A value that is either computed by default or supplied by the user in place of the default.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Overridable<T> {
    Default(T),
    UserOverride(T),
}

impl<T> Overridable<T> {
    pub fn new(default: T, user_value: Option<T>) -> Self {
        match user_value {
            Some(value) => Overridable::UserOverride(value),
            None => Overridable::Default(default),
        }
    }

    pub fn is_overridden(&self) -> bool {
        matches!(self, Overridable::UserOverride(_))
    }

    pub fn value(&self) -> &T {
        match self {
            Overridable::Default(value) | Overridable::UserOverride(value) => value,
        }
    }

    pub fn into_value(self) -> T {
        match self {
            Overridable::Default(value) | Overridable::UserOverride(value) => value,
        }
    }
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct Input {
    #[validate]
    pub house: HouseInput,
    #[serde(default)]
    #[validate]
    pub heat_pump: HeatPumpInput,
    #[serde(default)]
    #[validate]
    pub solar: SolarInput,
}

#[derive(Debug, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct HouseInput {
    #[serde(default)]
    pub house_type: HouseType,
    #[validate(minimum = 0.)]
    #[validate(maximum = 500.)]
    pub floor_area_m2: f64,
    pub heating_system: HeatingSystemKind,
    #[serde(default)]
    #[validate(minimum = 0.)]
    #[validate(maximum = 100000.)]
    pub annual_space_heating_demand_kwh: Option<f64>,
    #[serde(default)]
    #[validate(minimum = 0.)]
    #[validate(maximum = 100000.)]
    pub annual_water_heating_demand_kwh: Option<f64>,
    #[serde(default)]
    #[validate(minimum = 0.)]
    #[validate(maximum = 100000.)]
    pub annual_base_demand_kwh: Option<f64>,
    #[serde(default)]
    #[validate(minimum = 0.1)]
    #[validate(maximum = 8.)]
    pub space_heating_efficiency: Option<f64>,
    #[serde(default)]
    #[validate(minimum = 0.1)]
    #[validate(maximum = 8.)]
    pub water_heating_efficiency: Option<f64>,
    #[serde(default)]
    #[validate]
    pub tariffs: TariffsInput,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct TariffsInput {
    #[serde(default)]
    #[validate]
    pub electricity: ElectricityTariffInput,
    #[serde(default)]
    #[validate]
    pub gas: GasTariffInput,
    #[serde(default)]
    #[validate]
    pub oil: OilTariffInput,
}

/// Prices in pence per kWh, and pence per day for the standing charge.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct ElectricityTariffInput {
    #[validate(minimum = 0.)]
    #[validate(maximum = 100.)]
    pub p_per_unit_import: Option<f64>,
    #[validate(minimum = 0.)]
    #[validate(maximum = 100.)]
    pub p_per_unit_export: Option<f64>,
    #[validate(minimum = 0.)]
    #[validate(maximum = 100.)]
    pub p_per_day: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct GasTariffInput {
    #[validate(minimum = 0.)]
    #[validate(maximum = 100.)]
    pub p_per_unit_import: Option<f64>,
    #[validate(minimum = 0.)]
    #[validate(maximum = 100.)]
    pub p_per_day: Option<f64>,
}

/// Oil is priced per litre.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct OilTariffInput {
    #[validate(minimum = 0.)]
    #[validate(maximum = 200.)]
    pub p_per_unit_import: Option<f64>,
}

/// Overrides for the heat pump offered as an upgrade.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct HeatPumpInput {
    #[validate(minimum = 0.1)]
    #[validate(maximum = 8.)]
    pub space_heating_efficiency: Option<f64>,
    #[validate(minimum = 0.1)]
    #[validate(maximum = 8.)]
    pub water_heating_efficiency: Option<f64>,
}

#[derive(Debug, Default, Deserialize, Validate)]
#[serde(deny_unknown_fields)]
pub struct SolarInput {
    #[serde(default)]
    pub orientation: CompassDirection,
    #[serde(default)]
    #[validate(minimum = 0.)]
    pub roof_plan_area_m2: f64,
    #[validate(maximum = 40)]
    pub number_of_panels: Option<u32>,
    #[validate(minimum = 0.)]
    #[validate(maximum = 0.8)]
    pub kwp_per_panel: Option<f64>,
}

impl TariffsInput {
    fn has_overrides_for(&self, fuel: Fuel) -> bool {
        match fuel {
            Fuel::Electricity => {
                let ElectricityTariffInput {
                    p_per_unit_import,
                    p_per_unit_export,
                    p_per_day,
                } = &self.electricity;
                p_per_unit_import.is_some() || p_per_unit_export.is_some() || p_per_day.is_some()
            }
            Fuel::Gas => self.gas.p_per_unit_import.is_some() || self.gas.p_per_day.is_some(),
            Fuel::Oil => self.oil.p_per_unit_import.is_some(),
        }
    }

    /// Apply any overrides for a fuel on top of its standard tariff.
    fn resolve(&self, fuel: Fuel) -> Tariff {
        let standard = Tariff::standard(fuel);
        let (import, export, per_day) = match fuel {
            Fuel::Electricity => (
                self.electricity.p_per_unit_import,
                self.electricity.p_per_unit_export,
                self.electricity.p_per_day,
            ),
            Fuel::Gas => (self.gas.p_per_unit_import, None, self.gas.p_per_day),
            Fuel::Oil => (self.oil.p_per_unit_import, None, None),
        };

        let import = Overridable::new(standard.p_per_unit_import(), import);
        let export = Overridable::new(standard.p_per_unit_export(), export);
        let per_day = Overridable::new(standard.p_per_day(), per_day);
        log_override(&format!("{fuel} import price"), &import);
        log_override(&format!("{fuel} export price"), &export);
        log_override(&format!("{fuel} standing charge"), &per_day);

        Tariff::new(
            fuel,
            import.into_value(),
            export.into_value(),
            per_day.into_value(),
        )
    }
}

/// Everything needed to compare a household's upgrades, resolved from an input document.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedInput {
    pub house: House,
    pub heat_pump: HeatingSystem,
    pub solar: Solar,
}

impl Input {
    /// Combine the defaults with the user's overrides.
    pub fn resolve(
        &self,
        simulation_time: SimulationTime,
    ) -> Result<ResolvedInput, CalculationError> {
        Ok(ResolvedInput {
            house: self.house.resolve(simulation_time)?,
            heat_pump: self.heat_pump.resolve()?,
            solar: self.solar.resolve(),
        })
    }
}

impl HouseInput {
    fn resolve(&self, simulation_time: SimulationTime) -> Result<House, CalculationError> {
        let default_envelope =
            BuildingEnvelope::new(self.house_type, self.floor_area_m2, simulation_time);

        let space_heating = Overridable::new(
            default_envelope.space_heating_demand().annual_sum(),
            self.annual_space_heating_demand_kwh,
        );
        let water_heating = Overridable::new(
            default_envelope.water_heating_demand().annual_sum(),
            self.annual_water_heating_demand_kwh,
        );
        let base = Overridable::new(
            default_envelope.base_demand().annual_sum(),
            self.annual_base_demand_kwh,
        );
        log_override("annual space heating demand", &space_heating);
        log_override("annual water heating demand", &water_heating);
        log_override("annual base demand", &base);

        let mut envelope = default_envelope;
        if space_heating.is_overridden() {
            envelope = envelope.with_space_heating_demand_annual(*space_heating.value());
        }
        if water_heating.is_overridden() {
            envelope = envelope.with_water_heating_demand_annual(*water_heating.value());
        }
        if base.is_overridden() {
            envelope = envelope.with_base_demand_annual(*base.value());
        }

        let heating_system = resolve_heating_system(
            self.heating_system,
            self.space_heating_efficiency,
            self.water_heating_efficiency,
        )?;

        let house = House::new(envelope, heating_system);
        let mut tariffs = Vec::with_capacity(2);
        for fuel in Fuel::iter() {
            if house.tariff(fuel).is_some() {
                tariffs.push(self.tariffs.resolve(fuel));
            } else if self.tariffs.has_overrides_for(fuel) {
                warn!(
                    "Ignoring {fuel} tariff as a {} does not use {fuel}",
                    house.heating_system().name()
                );
            }
        }

        Ok(house.with_tariffs(tariffs)?)
    }
}

impl HeatPumpInput {
    fn resolve(&self) -> Result<HeatingSystem, CalculationError> {
        resolve_heating_system(
            HeatingSystemKind::HeatPump,
            self.space_heating_efficiency,
            self.water_heating_efficiency,
        )
    }
}

impl SolarInput {
    fn resolve(&self) -> Solar {
        let solar = Solar::new(self.orientation.into(), self.roof_plan_area_m2);
        let number_of_panels = Overridable::new(solar.number_of_panels(), self.number_of_panels);
        let kwp_per_panel = Overridable::new(solar.kwp_per_panel(), self.kwp_per_panel);
        log_override("number of panels", &number_of_panels);
        log_override("kWp per panel", &kwp_per_panel);

        let solar = solar
            .with_number_of_panels(number_of_panels.into_value())
            .with_kwp_per_panel(kwp_per_panel.into_value());
        if let Some(requested) = self.number_of_panels {
            if requested > solar.number_of_panels() {
                warn!(
                    "{requested} panels were requested but only {} fit on the roof",
                    solar.number_of_panels()
                );
            }
        }

        solar
    }
}

fn resolve_heating_system(
    kind: HeatingSystemKind,
    space_heating_efficiency: Option<f64>,
    water_heating_efficiency: Option<f64>,
) -> Result<HeatingSystem, CalculationError> {
    let (default_space, default_water) = kind.default_efficiencies();
    let space = Overridable::new(default_space, space_heating_efficiency);
    let water = Overridable::new(default_water, water_heating_efficiency);
    log_override(&format!("{kind} space heating efficiency"), &space);
    log_override(&format!("{kind} water heating efficiency"), &water);

    Ok(HeatingSystem::new(
        kind,
        space.into_value(),
        water.into_value(),
    )?)
}

fn log_override<T: Debug>(name: &str, value: &Overridable<T>) {
    if let Overridable::UserOverride(value) = value {
        debug!("Using {name} of {value:?} given by the user");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;
    use rstest::*;

    fn parse(json: &str) -> anyhow::Result<Input> {
        ingest_for_processing(json.as_bytes())
    }

    #[fixture]
    fn simulation_time() -> SimulationTime {
        SimulationTime::base_year()
    }

    #[rstest]
    fn should_resolve_minimal_input_to_defaults(simulation_time: SimulationTime) {
        let input =
            parse(r#"{"house": {"floor_area_m2": 80, "heating_system": "Gas boiler"}}"#).unwrap();
        let resolved = input.resolve(simulation_time).unwrap();

        assert_eq!(resolved.house.envelope().house_type(), HouseType::Terrace);
        assert_eq!(
            resolved.house.heating_system(),
            &HeatingSystem::from_kind(HeatingSystemKind::GasBoiler)
        );
        assert_eq!(
            resolved.house.tariff(Fuel::Gas),
            Some(&Tariff::standard(Fuel::Gas))
        );
        assert_eq!(
            resolved.heat_pump,
            HeatingSystem::from_kind(HeatingSystemKind::HeatPump)
        );
        assert_eq!(resolved.solar.number_of_panels(), 0);
    }

    #[rstest]
    fn should_apply_user_overrides(simulation_time: SimulationTime) {
        let input = parse(
            r#"{
                "house": {
                    "house_type": "Semi-detached",
                    "floor_area_m2": 95,
                    "heating_system": "Gas boiler",
                    "annual_space_heating_demand_kwh": 9000,
                    "space_heating_efficiency": 0.9,
                    "tariffs": {
                        "electricity": {"p_per_unit_import": 24.5},
                        "gas": {"p_per_day": 31.4}
                    }
                },
                "heat_pump": {"water_heating_efficiency": 2.6},
                "solar": {"orientation": "SouthEast", "roof_plan_area_m2": 25, "number_of_panels": 6, "kwp_per_panel": 0.4}
            }"#,
        )
        .unwrap();
        let resolved = input.resolve(simulation_time).unwrap();
        let house = &resolved.house;

        assert_relative_eq!(
            house.envelope().space_heating_demand().annual_sum(),
            9000.,
            max_relative = 1e-9
        );
        assert_eq!(house.heating_system().space_heating_efficiency(), 0.9);
        assert_eq!(house.heating_system().water_heating_efficiency(), 0.8);
        let electricity = house.tariff(Fuel::Electricity).unwrap();
        assert_eq!(electricity.p_per_unit_import(), 24.5);
        assert_eq!(electricity.p_per_day(), 46.);
        assert_eq!(house.tariff(Fuel::Gas).unwrap().p_per_day(), 31.4);

        assert_eq!(resolved.heat_pump.space_heating_efficiency(), 3.5);
        assert_eq!(resolved.heat_pump.water_heating_efficiency(), 2.6);

        assert_eq!(resolved.solar.orientation().azimuth_degrees(), -45.);
        assert_eq!(resolved.solar.number_of_panels(), 6);
        assert_eq!(resolved.solar.kwp_per_panel(), 0.4);
    }

    #[rstest]
    fn should_ignore_tariff_for_unused_fuel(simulation_time: SimulationTime) {
        let input = parse(
            r#"{"house": {"floor_area_m2": 60, "heating_system": "Heat pump",
                "tariffs": {"gas": {"p_per_unit_import": 8.0}}}}"#,
        )
        .unwrap();
        let house = input.resolve(simulation_time).unwrap().house;

        assert_eq!(house.fuels(), vec![Fuel::Electricity]);
    }

    #[rstest]
    fn should_cap_requested_panels_at_roof_capacity(simulation_time: SimulationTime) {
        let input = parse(
            r#"{"house": {"floor_area_m2": 60, "heating_system": "Oil boiler"},
                "solar": {"roof_plan_area_m2": 10, "number_of_panels": 40}}"#,
        )
        .unwrap();
        let solar = input.resolve(simulation_time).unwrap().solar;

        assert_eq!(solar.number_of_panels(), solar.max_panels());
        assert!(solar.number_of_panels() < 40);
    }

    #[rstest]
    fn should_keep_default_panels_within_range_on_a_large_roof(simulation_time: SimulationTime) {
        let input = parse(
            r#"{"house": {"floor_area_m2": 60, "heating_system": "Gas boiler"},
                "solar": {"roof_plan_area_m2": 500}}"#,
        )
        .unwrap();
        let solar = input.resolve(simulation_time).unwrap().solar;

        assert_eq!(solar.number_of_panels(), 40);
    }

    #[rstest]
    #[case(r#"{"house": {"floor_area_m2": 501, "heating_system": "Gas boiler"}}"#)]
    #[case(r#"{"house": {"floor_area_m2": 80, "heating_system": "Gas boiler", "space_heating_efficiency": 0.05}}"#)]
    #[case(r#"{"house": {"floor_area_m2": 80, "heating_system": "Oil boiler", "tariffs": {"oil": {"p_per_unit_import": 201}}}}"#)]
    #[case(r#"{"house": {"floor_area_m2": 80, "heating_system": "Gas boiler", "tariffs": {"gas": {"p_per_unit_import": 101}}}}"#)]
    #[case(r#"{"house": {"floor_area_m2": 80, "heating_system": "Gas boiler"}, "solar": {"number_of_panels": 41}}"#)]
    #[case(r#"{"house": {"floor_area_m2": 80, "heating_system": "Gas boiler"}, "heat_pump": {"space_heating_efficiency": 9}}"#)]
    fn should_reject_out_of_range_values(#[case] json: &str) {
        assert!(parse(json).is_err());
    }

    #[rstest]
    #[case(r#"{"house": {"floor_area_m2": 80, "heating_system": "Coal fire"}}"#)]
    #[case(r#"{"house": {"floor_area_m2": 80, "heating_system": "Gas boiler", "colour": "red"}}"#)]
    #[case(r#"{"house": {"heating_system": "Gas boiler"}}"#)]
    fn should_reject_malformed_input(#[case] json: &str) {
        assert!(parse(json).is_err());
    }

    #[rstest]
    fn should_distinguish_defaults_from_overrides() {
        let default = Overridable::new(3.5, None);
        let overridden = Overridable::new(3.5, Some(2.8));

        assert!(!default.is_overridden());
        assert!(overridden.is_overridden());
        assert_eq!(*default.value(), 3.5);
        assert_eq!(overridden.into_value(), 2.8);
    }
}
