//! Command handlers

use std::path::Path;

use calc_core::calculations::footing::{
    calculate_phase1_to_6_with, calculate_phase8, CalculatorInputs, FootingCalculation, FootingVolumeInputs,
};
use calc_core::calculations::CalculationItem;
use calc_core::config::EngineConfig;
use calc_core::errors::{CalcError, CalcResult};
use calc_core::file_io::{load_project, load_project_with_lock_check, save_project, FileLock};
use calc_core::project::{GlobalSettings, Project};
use calc_core::report::QuantityReport;

use crate::cli::{Cli, Commands, OutputFormat, ProjectAction, SizeArgs};
use crate::output;

pub fn execute(cli: Cli) -> CalcResult<()> {
    let config = match &cli.config {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::load_or_default()?,
    };

    match cli.command {
        Commands::Size(size) => run_size(&config, cli.format, &size),
        Commands::Volume { size, count, heights } => run_volume(&config, cli.format, &size, count, heights),
        Commands::Run { input } => run_file(&config, cli.format, &input),
        Commands::Tables => output::print_tables(cli.format, &config.tables()?),
        Commands::Project { action } => run_project(&config, cli.format, action),
    }
}

fn base_inputs(config: &EngineConfig, size: &SizeArgs) -> CalcResult<CalculatorInputs> {
    let inputs = CalculatorInputs {
        blinding_length_m: size.blinding_length,
        blinding_width_m: size.blinding_width,
        blinding_height_m: size.blinding_height,
        floors: size.floors,
        slab_area_m2: size.slab_area,
        soil_type: size.soil.clone(),
        building_type: size.building.clone(),
        footing_height_m: size.footing_height,
        footing_shape: size.shape.unwrap_or(config.default_shape),
    };
    inputs.validate()?;
    Ok(inputs)
}

fn run_size(config: &EngineConfig, format: OutputFormat, size: &SizeArgs) -> CalcResult<()> {
    let inputs = base_inputs(config, size)?;
    let tables = config.tables()?;
    let results = calculate_phase1_to_6_with(&inputs, &tables);
    output::print_results(format, &inputs, &results)
}

fn run_volume(
    config: &EngineConfig,
    format: OutputFormat,
    size: &SizeArgs,
    count: Option<u32>,
    heights: Vec<f64>,
) -> CalcResult<()> {
    let inputs = base_inputs(config, size)?;
    let volume = volume_inputs(&inputs, count, heights)?;

    let tables = config.tables()?;
    let results = calculate_phase1_to_6_with(&inputs, &tables);
    let volumes = calculate_phase8(&inputs, &results, &volume)?;
    output::print_volumes(format, &volume, &volumes)
}

/// Footing volume inputs from `--count`, `--footing-height` and `--heights`.
fn volume_inputs(inputs: &CalculatorInputs, count: Option<u32>, heights: Vec<f64>) -> CalcResult<FootingVolumeInputs> {
    let volume = if heights.is_empty() {
        if !(inputs.footing_height_m > 0.0) {
            return Err(CalcError::invalid_input(
                "footing_height_m",
                inputs.footing_height_m.to_string(),
                "Footing height must be positive: pass --footing-height, or --heights for footings of different heights",
            ));
        }
        FootingVolumeInputs::similar(inputs, count.unwrap_or(1))
    } else {
        let mut volume = FootingVolumeInputs::different(inputs, heights);
        if let Some(count) = count {
            volume.number_of_footings = count;
        }
        volume
    };
    volume.validate()?;
    Ok(volume)
}

fn read_calculation(path: &Path) -> CalcResult<FootingCalculation> {
    let contents = std::fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let calc: FootingCalculation = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid calculation in {}: {}", path.display(), e)))?;

    calc.validate()?;
    Ok(calc)
}

fn run_file(config: &EngineConfig, format: OutputFormat, input: &Path) -> CalcResult<()> {
    let calc = read_calculation(input)?;
    let outcome = calc.run(&config.tables()?)?;
    let report = QuantityReport::build(&outcome, &config.pricing)?;
    output::print_outcome(format, &outcome, &report)
}

fn run_project(config: &EngineConfig, format: OutputFormat, action: ProjectAction) -> CalcResult<()> {
    match action {
        ProjectAction::New {
            path,
            engineer,
            job,
            client,
        } => {
            if path.exists() {
                return Err(CalcError::file_error("create", path.display().to_string(), "file already exists"));
            }
            let mut project = Project::new(engineer, job, client);
            project.settings = GlobalSettings::from_config(config)?;
            if project.settings.tables.is_some() {
                tracing::debug!(path = %path.display(), "custom tables stored in project");
            }
            save_project(&project, &path)?;
            println!("Created {}", path.display());
            Ok(())
        }
        ProjectAction::Add { path, input, user } => {
            let calc = read_calculation(&input)?;
            let _lock = FileLock::acquire(&path, user)?;

            let mut project = load_project(&path)?;
            // Fail before saving if the calculation cannot run against this project's tables
            calc.run(project.tables())?;

            let label = calc.label.clone();
            let id = project.add_item(CalculationItem::Footing(calc));
            save_project(&project, &path)?;
            println!("Added {} ({}) to {}", label, id, path.display());
            Ok(())
        }
        ProjectAction::Show { path } => {
            let (project, lock) = load_project_with_lock_check(&path)?;
            if let Some(lock) = lock {
                tracing::warn!(user = %lock.user_id, machine = %lock.machine, "project is open elsewhere");
            }

            let mut reports = Vec::new();
            for (_, outcome) in project.run_all()? {
                let report = QuantityReport::build(&outcome, &project.settings.pricing)?;
                reports.push((outcome, report));
            }
            output::print_project(format, &project, &reports)
        }
    }
}
