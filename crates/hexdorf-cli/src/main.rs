//! Hexdorf command-line entry point.

use anyhow::Context;
use clap::Parser;
use hexdorf_core::{Bot, DeckDefinition, Game, GameRng};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod report;

use cli::Cli;
use report::Report;

fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = if err.use_stderr() { 1 } else { 0 };
            err.print()?;
            std::process::exit(code);
        }
    };

    run(cli)
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let definition = DeckDefinition::from_path(&cli.tiles)
        .with_context(|| format!("failed to load tiles from {}", cli.tiles.display()))?;
    println!("Game loaded! There are {} tiles.", definition.tile_count());

    let rng = cli.seed.map(GameRng::seeded).unwrap_or_default();
    let mut game = Game::from_definition(definition, !cli.no_shuffle, rng);

    if !cli.play && !cli.json {
        return Ok(());
    }

    let summary = if cli.play {
        info!(seed = ?cli.seed, "Playing deck out");
        let mut bot = cli.seed.map(Bot::with_seed).unwrap_or_default();
        Some(bot.play_out(&mut game).context("play-out failed")?)
    } else {
        None
    };

    let report = Report::new(&game, summary);
    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", report);
    }
    Ok(())
}
