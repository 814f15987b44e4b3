use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "aqi-station-map")]
#[command(about = "Live air-quality stations, filtered by viewport and pollutant")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(short, long, global = true, help = "TOML file with service endpoints")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        global = true,
        default_value = "all",
        help = "Pollutant code to show (e.g. 'PM2.5'), or 'all'"
    )]
    pub pollutant: String,

    #[arg(
        short,
        long,
        global = true,
        help = "Fixed viewport as 'south,west,north,east' [default: follow the map]"
    )]
    pub bounds: Option<String>,

    #[arg(long, global = true, help = "Print full popup text for every marker")]
    pub popups: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Load every station and show those in view
    Stations,

    /// Search a city and show its stations
    Search {
        #[arg(help = "City or place name")]
        city: String,
    },

    /// Mark a position and load the city it falls in
    Locate {
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,

        #[arg(long, allow_hyphen_values = true)]
        lon: f64,
    },

    /// List states, cities and pollutants reported by the backend
    Summary,

    /// Print the AQI colour legend
    Legend,
}
