extern crate upgrade_savings;

use clap::Parser;
use std::ffi::OsStr;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::FmtSubscriber;
use upgrade_savings::core::solar::irradiance::TypicalDayIrradiance;
use upgrade_savings::output::FileOutput;
use upgrade_savings::run_project;

#[derive(Parser, Default, Debug)]
#[clap(author, version, about, long_about = None)]
struct UpgradeSavingsArgs {
    input_file: String,
    #[arg(
        long,
        short,
        help = "Directory to write results to (defaults to the input file's directory)"
    )]
    output_dir: Option<PathBuf>,
    #[arg(
        long,
        short,
        help = "Path to solar irradiance data in .csv format with month, hour and kwh_per_kwp columns"
    )]
    irradiance_file: Option<PathBuf>,
    #[arg(long, short, default_value_t = false, help = "Log debug output")]
    verbose: bool,
}

fn main() -> anyhow::Result<()> {
    let args = UpgradeSavingsArgs::parse();

    let subscriber = FmtSubscriber::builder()
        .with_max_level(if args.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::INFO
        })
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let input_path = Path::new(args.input_file.as_str());
    let input_file_stem = input_path
        .file_stem()
        .and_then(OsStr::to_str)
        .unwrap_or("input");
    let output_dir = match args.output_dir {
        Some(dir) => dir,
        None => input_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default(),
    };
    std::fs::create_dir_all(&output_dir)?;
    let file_output = FileOutput::new(
        output_dir,
        format!("{input_file_stem}__results_{{}}.csv"),
    );

    let irradiance = match args.irradiance_file {
        Some(file) => {
            let data = BufReader::new(File::open(file)?);
            Some(TypicalDayIrradiance::from_csv(data)?)
        }
        None => None,
    };

    let rows = run_project(
        BufReader::new(File::open(input_path)?),
        &file_output,
        irradiance,
    )?;

    for row in rows {
        info!(
            "{}: bill saving £{:.2}, emissions saving {:.2} tCO2",
            row.scenario, row.bill_saving, row.tco2_saving
        );
    }

    Ok(())
}
