// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! `faultreact` command line
//!
//! ```text
//! faultreact init -o model.toml
//! faultreact export --config model.toml -o fault.inp
//! faultreact calculations calculations.toml -o checked.toml
//! ```

use anyhow::{Context, Result};
use clap::Parser;
use faultreact_data::{DataAccess, DataParameters};
use faultreact_export::{
    export_calculations, read_calculations_file, write_calculations_file, ExportSettings,
    FaultReactivationModelExporter,
};
use faultreact_geometry::FaultReactivationModel;
use faultreact_model::ModelConfig;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "faultreact", version, about = "Fault reactivation model export")]
struct Cli {
    /// Increase log output (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Write a configuration with every default value
    Init {
        /// Configuration file to create
        #[arg(short, long, default_value = "model.toml")]
        output: PathBuf,
    },
    /// Build the model from a configuration and write the INP deck
    Export {
        /// Model configuration (TOML)
        #[arg(short, long)]
        config: PathBuf,
        /// Deck file to write
        #[arg(short, long, default_value = "fault_reactivation.inp")]
        output: PathBuf,
        /// Skip the fault settings JSON
        #[arg(long)]
        no_settings: bool,
    },
    /// Validate a calculation file and write it back in canonical form
    Calculations {
        /// Calculation file (TOML)
        input: PathBuf,
        /// Output file, standard output when omitted
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{:#}", err);
            eprintln!("Error: {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Init { output } => write_default_config(&output),
        Command::Export {
            config,
            output,
            no_settings,
        } => export_model(&config, &output, !no_settings),
        Command::Calculations { input, output } => check_calculations(&input, output.as_deref()),
    }
}

fn write_default_config(output: &Path) -> Result<()> {
    let text = ModelConfig::default()
        .to_toml_string()
        .context("Failed to serialize default configuration")?;
    fs::write(output, text).with_context(|| format!("Failed to write {}", output.display()))?;
    info!("Wrote default configuration to {}", output.display());
    Ok(())
}

fn export_model(config_path: &Path, output: &Path, write_settings: bool) -> Result<()> {
    let config = ModelConfig::load(config_path)
        .with_context(|| format!("Failed to read {}", config_path.display()))?;
    config
        .validate()
        .with_context(|| format!("Invalid configuration {}", config_path.display()))?;

    let model = FaultReactivationModel::from_config(&config).context("Failed to build model")?;
    for part in model.all_grid_parts() {
        let grid = model.grid(part);
        debug!(
            "{}: {} nodes, {} elements",
            part,
            grid.node_count(),
            grid.element_count()
        );
    }

    let mut settings = ExportSettings::from_config(&config);
    settings.write_settings &= write_settings;

    // No simulation cases here: pore pressure and stress come from gradients
    let mut data = DataAccess::gradient_only(&DataParameters::from(&config.data));
    FaultReactivationModelExporter::new(settings)
        .export_to_file(output, &model, &mut data)
        .with_context(|| format!("Failed to export {}", output.display()))?;

    info!("Exported {}", output.display());
    Ok(())
}

fn check_calculations(input: &Path, output: Option<&Path>) -> Result<()> {
    let calculations = read_calculations_file(input)
        .with_context(|| format!("Failed to import {}", input.display()))?;
    info!("{} calculations in {}", calculations.len(), input.display());

    match output {
        Some(path) => {
            write_calculations_file(path, &calculations)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Wrote {}", path.display());
        }
        None => print!("{}", export_calculations(&calculations)?),
    }
    Ok(())
}
