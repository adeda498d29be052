//! Command implementations

mod districts;
mod proximity;
mod summary;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::{Context, Result};
use geosalud_analysis::{
    count_by_district, filter_hospitals, DataPaths, DatasetCache, FilteredHospitals,
};
use geosalud_core::config::{CliConfigOverrides, LayeredConfig};
use geosalud_core::models::{DistrictWithCount, PopulationCenter};
use std::path::Path;

/// Configuration file looked up in the working directory when no --config
/// flag is given.
const DEFAULT_CONFIG_FILE: &str = "geosalud.toml";

/// Execute a CLI command
pub fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);
    let config = load_config(&cli)?;

    match cli.command {
        Commands::Summary => summary::execute(&config, &output),
        Commands::Districts(args) => districts::execute(args, &config, &output),
        Commands::Proximity(args) => proximity::execute(args, &config, &output),
    }
}

fn load_config(cli: &Cli) -> Result<LayeredConfig> {
    let mut config = LayeredConfig::with_defaults();

    if let Some(path) = &cli.config {
        config = config
            .load_from_file(path)
            .with_context(|| format!("failed to load configuration from {}", path.display()))?;
    } else if Path::new(DEFAULT_CONFIG_FILE).exists() {
        config = config
            .load_from_file(DEFAULT_CONFIG_FILE)
            .with_context(|| format!("failed to load {}", DEFAULT_CONFIG_FILE))?;
    }

    config = config.load_from_env();
    config.update_from_cli(CliConfigOverrides {
        hospitals: cli.hospitals.clone(),
        districts: cli.districts.clone(),
        centers: cli.centers.clone(),
        buffer_km: None,
        department: None,
    });

    Ok(config)
}

/// Everything a command needs from one pipeline run.
pub(crate) struct PipelineRun {
    pub filtered: FilteredHospitals,
    pub districts: Vec<DistrictWithCount>,
    pub centers: Vec<PopulationCenter>,
}

/// Load, filter, and aggregate. The commands only read the result.
pub(crate) fn run_pipeline(config: &LayeredConfig, output: &OutputWriter) -> Result<PipelineRun> {
    let paths = DataPaths::new(
        config.hospitals.value.clone(),
        config.districts.value.clone(),
        config.centers.value.clone(),
    );

    let mut cache = DatasetCache::new();
    let data = cache.load(&paths).context("failed to load input datasets")?;

    let filtered = filter_hospitals(&data.hospitals);
    output.info(format!(
        "{} operational public hospitals kept, {} rows excluded",
        filtered.hospitals.len(),
        filtered.dropped.total()
    ));

    let districts = count_by_district(&filtered.points, &data.districts);
    let centers = data.centers.clone();

    Ok(PipelineRun {
        filtered,
        districts,
        centers,
    })
}
