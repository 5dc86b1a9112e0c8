use anyhow::Context;
use clap::Parser;
use std::rc::Rc;
use trip_board::utils::logger::{self, LogFormat};
use trip_board::utils::validation::Validate;
use trip_board::{CliConfig, PointsStore, TripBoard, TripConfig};

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();

    logger::init_logger(LogFormat::from_json_flag(cli.json), cli.verbose);
    tracing::debug!("CLI config: {:?}", cli);

    let config = TripConfig::from_file(&cli.config)
        .with_context(|| format!("failed to load {}", cli.config.display()))?;
    config.validate().context("invalid trip configuration")?;

    let title = config.title().to_string();
    let sort = cli.sort.unwrap_or_else(|| config.initial_sort());
    let store = Rc::new(config.into_store()?);
    tracing::info!(title = %title, points = store.len(), "Loaded trip");

    let mut board = TripBoard::new(Rc::clone(&store));
    board.init()?;
    board.change_sort(sort)?;

    if cli.json {
        let points = board.trip().points();
        println!("{}", serde_json::to_string_pretty(&points)?);
    } else {
        println!("{title} ({} points, sorted by {sort})", store.points().len());
        print!("{}", board.outline());
    }

    Ok(())
}
