pub mod core;
pub mod errors;
pub mod input;
pub mod output;
pub mod simulation_time;

pub use crate::core::scenarios::{FuelResults, Scenario, ScenarioResults};
use crate::core::scenarios::compare_upgrades;
use crate::core::solar::irradiance::TypicalDayIrradiance;
use crate::input::ingest_for_processing;
use crate::output::Output;
use crate::simulation_time::SimulationTime;
use anyhow::Context;
use csv::WriterBuilder;
use serde::Serialize;
use tracing::info;

pub const COMPARISON_LOCATION_KEY: &str = "comparison";
pub const BY_FUEL_LOCATION_KEY: &str = "by_fuel";

/// Compare a household's upgrade scenarios and write the results.
///
/// Arguments:
/// * `input` - JSON input document
/// * `output` - where the `comparison` and `by_fuel` CSV documents are written
/// * `irradiance` - solar yield data to use in place of the built-in typical year
pub fn run_project(
    input: impl std::io::Read,
    output: impl Output,
    irradiance: Option<TypicalDayIrradiance>,
) -> anyhow::Result<Vec<ScenarioResults>> {
    let input = ingest_for_processing(input)?;
    let resolved = input
        .resolve(SimulationTime::base_year())
        .context("Could not build the household from the input")?;

    let irradiance = irradiance.unwrap_or_default();
    let rows = compare_upgrades(
        &resolved.house,
        &resolved.heat_pump,
        &resolved.solar,
        &irradiance,
    )?;

    write_csv(&output, COMPARISON_LOCATION_KEY, rows.iter())?;
    write_csv(
        &output,
        BY_FUEL_LOCATION_KEY,
        rows.iter().flat_map(|row| row.fuels.iter()),
    )?;

    Ok(rows)
}

fn write_csv<'a, T: Serialize + 'a>(
    output: &impl Output,
    location_key: &str,
    rows: impl Iterator<Item = &'a T>,
) -> anyhow::Result<()> {
    info!("writing out to {location_key}");
    let writer = output.writer_for_location_key(location_key)?;
    let mut writer = WriterBuilder::new().from_writer(writer);

    for row in rows {
        writer
            .serialize(row)
            .with_context(|| format!("Could not write a row to {location_key}"))?;
    }
    writer.flush()?;

    Ok(())
}
