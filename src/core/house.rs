use crate::core::building_envelope::BuildingEnvelope;
use crate::core::consumption::Consumption;
use crate::core::energy_supply::energy_supply::EnergySupply;
use crate::core::fuel::Fuel;
use crate::core::heating_system::HeatingSystem;
use crate::core::solar::irradiance::IrradianceLookup;
use crate::core::solar::{Generation, Solar};
use crate::core::tariff::Tariff;
use crate::errors::{check_same_index, CalculationError, FuelMismatchError, TimeIndexMismatchError};
use indexmap::IndexMap;
use tracing::debug;

/// Annual figures for one fuel a household buys.
#[derive(Clone, Debug, PartialEq)]
pub struct FuelBreakdown {
    pub fuel: Fuel,
    /// Imported, in the fuel's own units
    pub consumption_units: f64,
    pub consumption_kwh: f64,
    pub export_kwh: f64,
    /// Pounds, including standing charges and export credit
    pub bill: f64,
    pub tco2: f64,
}

/// A household: its building, how it is heated, the tariffs it pays and any electricity it
/// generates.
///
/// A house is never changed in place. Each `with_*` method returns a new house, and everything
/// derived from it (consumption, bills, emissions) is worked out afresh on every call.
#[derive(Clone, Debug, PartialEq)]
pub struct House {
    envelope: BuildingEnvelope,
    heating_system: HeatingSystem,
    tariffs: IndexMap<Fuel, Tariff>,
    generation: Option<Generation>,
}

impl House {
    /// Create a house on standard tariffs for the fuels it uses, with no generation.
    pub fn new(envelope: BuildingEnvelope, heating_system: HeatingSystem) -> Self {
        let tariffs = fuels_used(heating_system.fuel())
            .map(|fuel| (fuel, Tariff::standard(fuel)))
            .collect();

        Self {
            envelope,
            heating_system,
            tariffs,
            generation: None,
        }
    }

    pub fn envelope(&self) -> &BuildingEnvelope {
        &self.envelope
    }

    pub fn heating_system(&self) -> &HeatingSystem {
        &self.heating_system
    }

    /// Tariffs keyed by fuel, always exactly the fuels the house consumes with electricity first.
    pub fn tariffs(&self) -> &IndexMap<Fuel, Tariff> {
        &self.tariffs
    }

    pub fn tariff(&self, fuel: Fuel) -> Option<&Tariff> {
        self.tariffs.get(&fuel)
    }

    pub fn generation(&self) -> Option<&Generation> {
        self.generation.as_ref()
    }

    pub fn fuels(&self) -> Vec<Fuel> {
        self.tariffs.keys().copied().collect()
    }

    pub fn has_multiple_fuels(&self) -> bool {
        self.tariffs.len() > 1
    }

    /// Replace the heating system.
    ///
    /// If the new system burns a different fuel, the tariff for the old fuel is dropped and the
    /// new fuel starts on its standard tariff. Tariffs for fuels still in use are kept as they are.
    pub fn with_heating_system(&self, heating_system: HeatingSystem) -> Self {
        let tariffs: IndexMap<Fuel, Tariff> = fuels_used(heating_system.fuel())
            .map(|fuel| {
                let tariff = self.tariffs.get(&fuel).cloned().unwrap_or_else(|| {
                    debug!("Putting {fuel} on its standard tariff");
                    Tariff::standard(fuel)
                });
                (fuel, tariff)
            })
            .collect();

        if self.heating_system.fuel() != heating_system.fuel() {
            debug!(
                "Heating changed from {} to {}, tariffs now cover {:?}",
                self.heating_system.name(),
                heating_system.name(),
                tariffs.keys().collect::<Vec<_>>()
            );
        }

        Self {
            heating_system,
            tariffs,
            ..self.clone()
        }
    }

    /// Replace the tariff for a fuel the house already uses.
    pub fn with_tariff(&self, tariff: Tariff) -> Result<Self, FuelMismatchError> {
        if !self.tariffs.contains_key(&tariff.fuel()) {
            return Err(FuelMismatchError::new(
                self.heating_system.fuel(),
                tariff.fuel(),
            ));
        }

        let mut tariffs = self.tariffs.clone();
        tariffs.insert(tariff.fuel(), tariff);

        Ok(Self {
            tariffs,
            ..self.clone()
        })
    }

    pub fn with_tariffs(
        &self,
        tariffs: impl IntoIterator<Item = Tariff>,
    ) -> Result<Self, FuelMismatchError> {
        tariffs
            .into_iter()
            .try_fold(self.clone(), |house, tariff| house.with_tariff(tariff))
    }

    pub fn with_envelope(&self, envelope: BuildingEnvelope) -> Self {
        Self {
            envelope,
            ..self.clone()
        }
    }

    /// Add on-site generation, which must be on the same time index as the house's demand.
    pub fn with_generation(&self, generation: Generation) -> Result<Self, TimeIndexMismatchError> {
        check_same_index(
            self.envelope.base_demand().timesteps(),
            generation.timesteps(),
        )?;

        Ok(Self {
            generation: Some(generation),
            ..self.clone()
        })
    }

    /// Add the generation of a solar installation over the house's time index.
    pub fn with_solar(&self, solar: &Solar, irradiance: &impl IrradianceLookup) -> Self {
        let generation = solar.generation(self.envelope.simulation_time(), irradiance);
        debug!(
            "{} panels ({:.2} kWp) generate {:.0} kWh a year",
            solar.number_of_panels(),
            solar.peak_power_kw(),
            generation.annual_sum()
        );

        Self {
            generation: Some(generation),
            ..self.clone()
        }
    }

    /// Fuel the house would buy for each fuel, before any generation is offset.
    ///
    /// Base demand is always met with electricity. Electric heating is merged into the same
    /// electricity consumption, otherwise the heating fuel gets its own entry.
    pub fn consumption_per_fuel(&self) -> Result<IndexMap<Fuel, Consumption>, CalculationError> {
        let base = Consumption::new(
            self.envelope.base_demand().profile_kwh().to_vec(),
            Fuel::Electricity,
        );
        let heating = self.heating_system.heating_consumption(
            self.envelope.space_heating_demand(),
            self.envelope.water_heating_demand(),
        )?;

        Ok(match heating.fuel() {
            Fuel::Electricity => IndexMap::from([(Fuel::Electricity, base.add(&heating)?)]),
            other => IndexMap::from([(Fuel::Electricity, base), (other, heating)]),
        })
    }

    pub fn energy_supplies(&self) -> Result<IndexMap<Fuel, EnergySupply>, CalculationError> {
        self.consumption_per_fuel()?
            .into_iter()
            .map(|(fuel, consumption)| -> Result<_, CalculationError> {
                let supply = match (&self.generation, fuel) {
                    (Some(generation), Fuel::Electricity) => {
                        EnergySupply::with_generation(consumption, generation)?
                    }
                    _ => EnergySupply::new(consumption),
                };
                Ok((fuel, supply))
            })
            .collect()
    }

    pub fn breakdown_per_fuel(&self) -> Result<Vec<FuelBreakdown>, CalculationError> {
        self.energy_supplies()?
            .into_iter()
            .map(|(fuel, supply)| -> Result<_, CalculationError> {
                let tariff = self
                    .tariffs
                    .get(&fuel)
                    .ok_or(CalculationError::MissingTariff(fuel))?;
                let consumption_kwh = supply.annual_import_kwh();

                Ok(FuelBreakdown {
                    fuel,
                    consumption_units: consumption_kwh / fuel.kwh_per_unit(),
                    consumption_kwh,
                    export_kwh: supply.annual_export_kwh(),
                    bill: tariff.annual_cost(&supply.net_consumption())?,
                    tco2: consumption_kwh * fuel.tco2_per_kwh(),
                })
            })
            .collect()
    }

    pub fn bills_per_fuel(&self) -> Result<IndexMap<Fuel, f64>, CalculationError> {
        Ok(self
            .breakdown_per_fuel()?
            .into_iter()
            .map(|breakdown| (breakdown.fuel, breakdown.bill))
            .collect())
    }

    /// Total annual bill in pounds across all fuels.
    pub fn total_annual_bill(&self) -> Result<f64, CalculationError> {
        Ok(self.breakdown_per_fuel()?.iter().map(|b| b.bill).sum())
    }

    /// Total energy bought from suppliers over the year, in kWh.
    pub fn total_annual_consumption_kwh(&self) -> Result<f64, CalculationError> {
        Ok(self
            .breakdown_per_fuel()?
            .iter()
            .map(|b| b.consumption_kwh)
            .sum())
    }

    /// Emissions from the energy bought over the year, in tonnes of CO2. Exported electricity is
    /// not credited.
    pub fn total_annual_tco2(&self) -> Result<f64, CalculationError> {
        Ok(self.breakdown_per_fuel()?.iter().map(|b| b.tco2).sum())
    }
}

fn fuels_used(heating_fuel: Fuel) -> impl Iterator<Item = Fuel> {
    std::iter::once(Fuel::Electricity)
        .chain(Some(heating_fuel).filter(|fuel| *fuel != Fuel::Electricity))
}
