use aqi_station_map::cli::{run, Cli};
use aqi_station_map::error::Result;
use clap::Parser;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
