#![warn(non_snake_case)]
//! # rust_astar Main Entry Point
//!
//! Opens the A* visualizer window by default. `--headless` generates and
//! solves one maze on the terminal instead, and `--survey N` measures N
//! seeded mazes in parallel.
//!
//! ## License
//! Licensed under the MIT License.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::{error, info};

use rust_astar::export::save_png;
use rust_astar::maze::survey;
use rust_astar::session::SessionEvent;
use rust_astar::{AppConfig, AppError, Session};

#[derive(Parser, Debug)]
#[command(name = "rust_astar", version, about = "A* pathfinding and maze generation workbench")]
struct Cli {
    /// JSON config file; missing fields take their defaults.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Seed for maze generation, overriding the config.
    #[arg(long)]
    seed: Option<u64>,
    /// Generate and solve one maze on the terminal instead of opening a window.
    #[arg(long)]
    headless: bool,
    /// Also write the solved maze to a PNG file.
    #[arg(long, value_name = "PATH", requires = "headless")]
    png: Option<PathBuf>,
    /// Generate N seeded mazes in parallel and print statistics.
    #[arg(long, value_name = "N", conflicts_with = "headless")]
    survey: Option<u64>,
}

/// What the binary was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Window,
    Headless { png: Option<PathBuf> },
    Survey { count: u64 },
}

impl Cli {
    fn mode(&self) -> Mode {
        if let Some(count) = self.survey {
            Mode::Survey { count }
        } else if self.headless || !cfg!(feature = "gui") {
            Mode::Headless { png: self.png.clone() }
        } else {
            Mode::Window
        }
    }
}

/// Generates a maze, solves it and prints both to stdout.
fn run_headless(config: AppConfig, png: Option<PathBuf>) -> Result<(), AppError> {
    let cell_size = config.cell_size;
    let mut session = Session::new(config)?;

    session.start_maze()?;
    if let SessionEvent::MazeFinished { start, end } = session.run_to_completion() {
        info!("Maze start {} end {}", start, end);
    }

    session.start_search();
    let path = match session.run_to_completion() {
        SessionEvent::PathFound(path) => path,
        _ => Vec::new(),
    };

    print!("{}", session.grid().to_ascii(&path));
    println!("{}", session.status_message);

    if let Some(file) = png {
        save_png(session.grid(), &path, cell_size, file)?;
    }
    Ok(())
}

fn run_survey(config: &AppConfig, count: u64) -> Result<(), AppError> {
    let grid = config.build_grid()?;
    let first = config.seed.unwrap_or(0);
    let report = survey(grid.rows(), grid.cols(), first..first + count)?;

    println!(
        "{} mazes of {}x{} in {:.3}s",
        report.samples.len(),
        report.rows,
        report.cols,
        report.elapsed_secs
    );
    println!("all connected:        {}", report.all_connected());
    println!("mean path length:     {:.1}", report.mean_path_len());
    println!("mean expansion ratio: {:.3}", report.mean_expansion_ratio());
    if let Some(longest) = report.longest() {
        println!("longest path:         {} (seed {})", longest.path_len, longest.seed);
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), AppError> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }

    match cli.mode() {
        #[cfg(feature = "gui")]
        Mode::Window => rust_astar::ui::run_main_window(config),
        #[cfg(not(feature = "gui"))]
        Mode::Window => run_headless(config, None),
        Mode::Headless { png } => run_headless(config, png),
        Mode::Survey { count } => run_survey(&config, count),
    }
}

fn main() -> ExitCode {
    // Initialize logging.
    env_logger::init();
    info!("rust_astar starting...");

    let cli = Cli::parse();
    match run(cli) {
        Ok(()) => {
            info!("rust_astar exiting.");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!("{}", err);
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("rust_astar").chain(args.iter().copied()))
    }

    #[test]
    fn test_parse_headless_with_png() {
        let cli = parse(&["--seed", "9", "--headless", "--png", "out.png"]).unwrap();
        assert_eq!(cli.seed, Some(9));
        assert_eq!(
            cli.mode(),
            Mode::Headless {
                png: Some(PathBuf::from("out.png"))
            }
        );
    }

    #[test]
    fn test_parse_survey() {
        let cli = parse(&["--survey", "12", "--config", "cfg.json"]).unwrap();
        assert_eq!(cli.mode(), Mode::Survey { count: 12 });
        assert_eq!(cli.config, Some(PathBuf::from("cfg.json")));
    }

    #[test]
    fn test_parse_defaults() {
        let cli = parse(&[]).unwrap();
        assert!(cli.config.is_none());
        assert!(cli.seed.is_none());
        if cfg!(feature = "gui") {
            assert_eq!(cli.mode(), Mode::Window);
        } else {
            assert_eq!(cli.mode(), Mode::Headless { png: None });
        }
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse(&["--seed"]).is_err());
        assert!(parse(&["--seed", "x"]).is_err());
        assert!(parse(&["--bogus"]).is_err());
        // A PNG is only written by a headless run.
        assert!(parse(&["--png", "out.png"]).is_err());
        assert!(parse(&["--survey", "3", "--headless"]).is_err());
    }

    #[test]
    fn test_headless_run() {
        let config = AppConfig {
            canvas_width: 220,
            canvas_height: 220,
            seed: Some(3),
            ..AppConfig::default()
        };
        run_headless(config, None).unwrap();
    }
}
