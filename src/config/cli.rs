use crate::domain::events::SortType;
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Clone, Parser)]
#[command(name = "trip-board")]
#[command(about = "Render a trip itinerary board from a TOML file")]
pub struct CliConfig {
    #[arg(long, short, default_value = "trip.toml")]
    pub config: PathBuf,

    #[arg(long, help = "Sort order to apply after the first render (day, time, price)")]
    pub sort: Option<SortType>,

    #[arg(long, help = "Print the sorted points as JSON instead of the board outline")]
    pub json: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}
