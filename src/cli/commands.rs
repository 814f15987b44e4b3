use std::fs::File;
use std::path::Path;
use std::sync::{Arc, Mutex};
use tracing::Level;

use crate::cli::args::{Cli, Commands};
use crate::config::ServiceConfig;
use crate::error::Result;
use crate::models::{AqiCategory, Coordinate, PollutantSelector, Viewport};
use crate::processors::{MapSession, SearchOutcome, StationIndex};
use crate::utils::progress::ProgressReporter;
use crate::writers::{FixedPosition, TerminalView};

/// Commands that need a live map session
#[derive(Debug, Clone, PartialEq)]
enum SessionCommand {
    Stations,
    Search { city: String },
    Locate { lat: f64, lon: f64 },
    Summary,
}

/// `None` for commands that run without a session
fn session_command(command: &Commands) -> Option<SessionCommand> {
    match command {
        Commands::Stations => Some(SessionCommand::Stations),
        Commands::Search { city } => Some(SessionCommand::Search { city: city.clone() }),
        Commands::Locate { lat, lon } => Some(SessionCommand::Locate {
            lat: *lat,
            lon: *lon,
        }),
        Commands::Summary => Some(SessionCommand::Summary),
        Commands::Legend => None,
    }
}

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;

    match session_command(&cli.command) {
        Some(command) => run_session(&cli, command).await,
        None => {
            print_legend();
            Ok(())
        }
    }
}

async fn run_session(cli: &Cli, command: SessionCommand) -> Result<()> {
    let config = ServiceConfig::load(cli.config.as_deref())?;

    let view = Arc::new(match cli.bounds.as_deref() {
        Some(bounds) => TerminalView::with_fixed_bounds(bounds.parse::<Viewport>()?),
        None => TerminalView::new(Viewport::world()),
    });

    let session = MapSession::from_config(&config, view.clone())?;
    session.select_pollutant(PollutantSelector::parse(&cli.pollutant));

    let progress = ProgressReporter::new_spinner("Fetching all stations...", cli.verbose);
    let loaded = session.start().await;
    progress.finish_and_clear();
    println!("Loaded {} stations", loaded);

    match command {
        SessionCommand::Stations => {}

        SessionCommand::Search { city } => {
            let progress =
                ProgressReporter::new_spinner(&format!("Searching {}...", city), cli.verbose);
            let outcome = session.search_city(&city).await;
            progress.finish_and_clear();
            print_outcome(&outcome);
        }

        SessionCommand::Locate { lat, lon } => {
            let position = Coordinate::new(lat, lon)?;
            let progress = ProgressReporter::new_spinner("Locating...", cli.verbose);
            let outcome = session.detect_location(&FixedPosition(position)).await;
            progress.finish_and_clear();

            match outcome {
                Some(outcome) => print_outcome(&outcome),
                None => println!("No city found at {}", position),
            }
        }

        SessionCommand::Summary => {
            let index = StationIndex::from_records(&session.store().get_all());
            println!("\n{}", index.summary());
            if let Some(loaded_at) = session.store().all_loaded_at() {
                println!("Fetched at {}", loaded_at.format("%Y-%m-%d %H:%M:%S UTC"));
            }
            return Ok(());
        }
    }

    println!("Pollutant: {}", session.pollutant());
    println!("\n{}", view.frame(cli.popups));

    Ok(())
}

fn init_logging(verbose: bool, log_file: Option<&Path>) -> Result<()> {
    let level = if verbose { Level::DEBUG } else { Level::INFO };

    match log_file {
        Some(path) => {
            let file = File::create(path)?;
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
        }
        None => {
            let _ = tracing_subscriber::fmt()
                .with_max_level(level)
                .with_writer(std::io::stderr)
                .try_init();
        }
    }

    Ok(())
}

fn print_outcome(outcome: &SearchOutcome) {
    match outcome {
        SearchOutcome::EmptyQuery => {}
        SearchOutcome::Found { city, stations } => {
            println!("Found {} stations for {}", stations, city);
        }
        SearchOutcome::NoData { city } => {
            println!("No stations loaded for {}", city);
        }
        SearchOutcome::Superseded { city } => {
            println!("Search for {} was superseded", city);
        }
    }
}

fn print_legend() {
    println!("AQI Levels");
    for entry in AqiCategory::legend() {
        let range = entry.range_text();
        if range.is_empty() {
            println!("  [{:<6}] {}", entry.color, entry.label);
        } else {
            println!("  [{:<6}] {} ({})", entry.color, entry.label, range);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_legend_runs_without_session() {
        assert_eq!(session_command(&Commands::Legend), None);
    }

    #[test]
    fn test_session_commands_carry_arguments() {
        assert_eq!(
            session_command(&Commands::Search {
                city: "pune".to_string()
            }),
            Some(SessionCommand::Search {
                city: "pune".to_string()
            })
        );
        assert_eq!(
            session_command(&Commands::Locate {
                lat: 18.52,
                lon: 73.85
            }),
            Some(SessionCommand::Locate {
                lat: 18.52,
                lon: 73.85
            })
        );
        assert_eq!(
            session_command(&Commands::Summary),
            Some(SessionCommand::Summary)
        );
    }
}
