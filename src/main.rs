use anyhow::Result;
use clap::{Parser, ValueEnum};
use neon_serpent::game::GameConfig;
use neon_serpent::modes::HumanMode;

#[derive(Parser)]
#[command(name = "neon_serpent")]
#[command(version, about = "Neon arcade snake with dash, particles and chiptune audio")]
struct Cli {
    /// Rule variant
    #[arg(long, default_value = "dash")]
    variant: Variant,

    /// Playfield width in pixels (must be a multiple of the 40px grid)
    #[arg(long, default_value = "800")]
    width: i32,

    /// Playfield height in pixels (must be a multiple of the 40px grid)
    #[arg(long, default_value = "600")]
    height: i32,

    /// Initial volume in [0, 1]
    #[arg(long, default_value = "0.5")]
    volume: f32,

    /// Start muted
    #[arg(long)]
    muted: bool,
}

#[derive(Clone, ValueEnum)]
enum Variant {
    /// Two-deep turn queue, snake moves from the first frame
    Classic,
    /// Three-deep turn queue plus the stamina-gated dash
    Dash,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match cli.variant {
        Variant::Classic => GameConfig::classic(),
        Variant::Dash => GameConfig::dash(),
    }
    .with_playfield(cli.width, cli.height);

    let mut mode = HumanMode::new(config, cli.volume, cli.muted)?;
    mode.run().await
}
