mod app;
mod term;

use std::fs::File;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info, LevelFilter};
use simplelog::WriteLogger;

use ringsnake::SimConfig;
use app::{Next, SnakeApp};

#[derive(Parser, Debug)]
#[command(name = "ringsnake", about = "Terminal snake on a power-of-two grid")]
struct Cli {
    /// YAML file with simulation settings; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Play on an open grid; leaving it still ends the game
    #[arg(long)]
    no_walls: bool,

    /// Initial snake length
    #[arg(long)]
    length: Option<usize>,

    /// Milliseconds between simulation steps
    #[arg(long, default_value_t = 200)]
    tick_ms: u64,

    /// Seed for food placement, for reproducible games
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long, default_value = "ringsnake.log")]
    log_file: PathBuf,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

impl Cli {
    fn sim_config(&self) -> Result<SimConfig> {
        let mut config = match &self.config {
            Some(path) => SimConfig::load(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => SimConfig::default(),
        };

        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if self.no_walls {
            config.walls = false;
        }
        if let Some(length) = self.length {
            config.initial_length = length;
        }

        config.validate().context("invalid game settings")?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout belongs to the raw-mode terminal, so logs go to a file
    let log_file = File::create(&cli.log_file)
        .with_context(|| format!("creating log file {}", cli.log_file.display()))?;
    WriteLogger::init(cli.log_level, simplelog::Config::default(), log_file)
        .context("initializing logger")?;

    let config = cli.sim_config()?;
    info!("starting with {:?}, tick {} ms", config, cli.tick_ms);

    let mut app = SnakeApp::new(config, cli.seed, Duration::from_millis(cli.tick_ms))?;
    app.initialize()?;

    let result = run(&mut app);
    let restored = app.restore();
    finish(result, restored)
}

/// Logs both outcomes; the game's own error wins over a failed restore.
fn finish(result: Result<()>, restored: Result<()>) -> Result<()> {
    if let Err(err) = &result {
        error!("{:#}", err);
    }
    if let Err(err) = &restored {
        error!("restoring terminal: {:#}", err);
    }

    match (result, restored) {
        (Err(err), _) => Err(err),
        (Ok(()), Err(err)) => Err(err.context("restoring the terminal")),
        (Ok(()), Ok(())) => Ok(()),
    }
}

fn run(app: &mut SnakeApp) -> Result<()> {
    if let Next::Quit = app.show_intro()? {
        return Ok(());
    }

    // Each round takes care of reporting CTRL+C back to us
    while let Next::Replay = app.play()? {}
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_finish_keeps_game_error_when_restore_also_fails() {
        let err = finish(Err(anyhow!("tick fault")), Err(anyhow!("tty gone"))).unwrap_err();
        assert_eq!(err.to_string(), "tick fault");
    }

    #[test]
    fn test_finish_reports_failed_restore_after_clean_run() {
        let err = finish(Ok(()), Err(anyhow!("tty gone"))).unwrap_err();
        assert_eq!(err.to_string(), "restoring the terminal");
        assert_eq!(err.root_cause().to_string(), "tty gone");
    }

    #[test]
    fn test_finish_passes_through_success() {
        assert!(finish(Ok(()), Ok(())).is_ok());
    }

    #[test]
    fn test_cli_flags_override_defaults() {
        let cli = Cli::parse_from(["ringsnake", "--width", "16", "--height", "16", "--no-walls"]);
        let config = cli.sim_config().unwrap();
        assert_eq!((config.width, config.height), (16, 16));
        assert!(!config.walls);
        assert_eq!(cli.tick_ms, 200);
    }
}
