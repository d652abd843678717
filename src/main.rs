use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use wrapsnake::app::App;
use wrapsnake::game::GameConfig;

#[derive(Parser)]
#[command(name = "wrapsnake")]
#[command(version, about = "Snake on a wrap-around playfield")]
struct Cli {
    /// Playfield width in pixels
    #[arg(long, default_value = "700")]
    width: i32,

    /// Playfield height in pixels
    #[arg(long, default_value = "700")]
    height: i32,

    /// Size of one grid cell in pixels
    #[arg(long, default_value = "30")]
    cell_size: i32,

    /// Milliseconds between ticks
    #[arg(long, default_value = "70")]
    tick_ms: u64,

    /// Snake length at the start of every game
    #[arg(long, default_value = "3")]
    initial_length: usize,

    /// Seed for food placement
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    let config = GameConfig {
        width: cli.width,
        height: cli.height,
        cell_size: cli.cell_size,
        tick: Duration::from_millis(cli.tick_ms),
        initial_length: cli.initial_length,
        seed: cli.seed,
    };

    let mut app = App::new(&config)?;
    app.run()
}
