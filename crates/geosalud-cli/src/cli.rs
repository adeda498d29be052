use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// GeoSalud - Geographic accessibility of public hospitals in Peru
#[derive(Parser, Debug)]
#[command(name = "geosalud")]
#[command(about = "Geographic accessibility analysis of public hospitals in Peru", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output results in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Hospital registry CSV (overrides configuration)
    #[arg(long, global = true)]
    pub hospitals: Option<PathBuf>,

    /// District polygons shapefile (overrides configuration)
    #[arg(long, global = true)]
    pub districts: Option<PathBuf>,

    /// Population centers shapefile (overrides configuration)
    #[arg(long, global = true)]
    pub centers: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Summary statistics over the filtered hospital set
    Summary,

    /// Per-district hospital counts
    Districts(DistrictsArgs),

    /// Buffer-proximity analysis for one department
    Proximity(ProximityArgs),
}

#[derive(Parser, Debug)]
pub struct DistrictsArgs {
    /// Show only the N districts with the most hospitals
    #[arg(long, default_value_t = 20, conflicts_with = "all")]
    pub top: usize,

    /// List every district, including those without hospitals
    #[arg(long)]
    pub all: bool,
}

#[derive(Parser, Debug)]
pub struct ProximityArgs {
    /// Department name, case-insensitive (defaults to the configured one)
    pub department: Option<String>,

    /// Buffer radius in kilometers (defaults to the configured radius)
    #[arg(long)]
    pub buffer_km: Option<f64>,
}
