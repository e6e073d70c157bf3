//! Command line front end for the toroidal Life simulator

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Instant;
use toroidal_life::{
    config::{CliOverrides, Settings},
    engine::{Scheduler, SimulationEngine, StepOutcome, StopReason},
    preset::{standard_presets, PresetSelector},
    utils::{ColorOutput, GridFormatter, StatusReporter},
    LifeError,
};

#[derive(Parser)]
#[command(name = "toroidal_life")]
#[command(about = "Conway's Game of Life on a toroidal grid")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args, Debug, Default)]
struct BoardArgs {
    /// Configuration file path
    #[arg(short, long, default_value = "config/life.yaml")]
    config: PathBuf,

    /// Preset to place, by name or menu index (random board when omitted)
    #[arg(short, long)]
    preset: Option<String>,

    /// Grid width (overrides config)
    #[arg(long)]
    width: Option<usize>,

    /// Grid height (overrides config)
    #[arg(long)]
    height: Option<usize>,

    /// Birth neighbor counts, e.g. 3 (overrides config)
    #[arg(short, long)]
    born: Option<String>,

    /// Survival neighbor counts, e.g. 23 (overrides config)
    #[arg(short, long)]
    survive: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the simulation on a timer until it stops
    Run {
        #[command(flatten)]
        board: BoardArgs,

        /// Milliseconds between generations (overrides config)
        #[arg(short, long)]
        interval: Option<u64>,

        /// Stop after this many generations (overrides config)
        #[arg(short, long)]
        generations: Option<u64>,

        /// Only print the final board
        #[arg(short, long)]
        quiet: bool,
    },

    /// Advance a board a fixed number of generations by hand
    Step {
        #[command(flatten)]
        board: BoardArgs,

        /// Number of generations to advance
        #[arg(short = 'n', long, default_value_t = 1)]
        count: u64,
    },

    /// List the built-in presets
    Presets {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Create a default configuration file
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            board,
            interval,
            generations,
            quiet,
        } => run_command(board, interval, generations, quiet),
        Commands::Step { board, count } => step_command(board, count).map(|_| ()),
        Commands::Presets { json } => presets_command(json),
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(board: &BoardArgs, overrides: CliOverrides) -> Result<Settings> {
    let mut settings = if board.config.exists() {
        Settings::from_file(&board.config)
            .with_context(|| format!("Failed to load config from {}", board.config.display()))?
    } else {
        eprintln!(
            "{}",
            ColorOutput::warning(&format!(
                "Config file {} not found, using defaults",
                board.config.display()
            ))
        );
        Settings::default()
    };

    let overrides = CliOverrides {
        width: board.width,
        height: board.height,
        born: board.born.clone(),
        survive: board.survive.clone(),
        ..overrides
    };
    settings.merge_with_cli(&overrides);
    settings.validate().context("Configuration validation failed")?;

    Ok(settings)
}

/// Build the engine and put the starting pattern on it
fn prepare_board(settings: &Settings, preset: Option<&str>) -> Result<SimulationEngine> {
    let mut engine = SimulationEngine::from_settings(settings);

    match preset {
        Some(input) => {
            let selector = PresetSelector::parse(input);
            if let Err(err) = engine.select_preset(selector.clone()) {
                eprintln!(
                    "{}",
                    ColorOutput::error(&format!("❌ Could not place preset {}", selector))
                );
                if matches!(err, LifeError::UnknownPreset(_)) {
                    eprint!(
                        "Available presets:\n{}",
                        GridFormatter::format_preset_list(&standard_presets())
                    );
                }
                return Err(err).with_context(|| format!("Failed to place preset {}", selector));
            }
        }
        None => engine.randomize(settings.simulation.random_density),
    }

    Ok(engine)
}

fn run_command(
    board: BoardArgs,
    interval: Option<u64>,
    generations: Option<u64>,
    quiet: bool,
) -> Result<()> {
    let settings = load_settings(
        &board,
        CliOverrides {
            tick_interval_ms: interval,
            max_generations: generations,
            ..Default::default()
        },
    )?;

    let mut engine = prepare_board(&settings, board.preset.as_deref())?;
    engine.subscribe(Box::new(StatusReporter::default()));
    let formatter = GridFormatter::from_config(&settings.display);

    println!(
        "{}",
        ColorOutput::info(&format!(
            "Running {}x{} board with rules {}",
            settings.grid.width,
            settings.grid.height,
            engine.rules()
        ))
    );

    let start_time = Instant::now();
    engine.start();
    let summary = Scheduler::new()
        .with_max_generations(settings.simulation.max_generations)
        .run(&mut engine, |engine, outcome| {
            if quiet || outcome == StepOutcome::Ignored {
                return;
            }
            print!("\x1b[2J\x1b[H");
            print!("{}", formatter.format_grid(engine.grid()));
            println!("{}", GridFormatter::format_status(engine));
        });

    if quiet {
        print!("{}", formatter.format_grid(engine.grid()));
        println!("{}", GridFormatter::format_status(&engine));
    }

    let message = format!(
        "{} generation(s) in {:.3}s",
        summary.generations_advanced,
        start_time.elapsed().as_secs_f64()
    );
    match summary.reason {
        StopReason::FixedPoint => println!(
            "{}",
            ColorOutput::success(&format!("✅ Reached a fixed point after {}", message))
        ),
        StopReason::GenerationLimit => {
            println!("{}", ColorOutput::info(&format!("Generation limit hit: {}", message)))
        }
        StopReason::Stopped => println!("{}", ColorOutput::info(&format!("Stopped: {}", message))),
    }

    Ok(())
}

fn step_command(board: BoardArgs, count: u64) -> Result<SimulationEngine> {
    let settings = load_settings(&board, CliOverrides::default())?;
    let mut engine = prepare_board(&settings, board.preset.as_deref())?;
    let formatter = GridFormatter::from_config(&settings.display);

    for _ in 0..count {
        if engine.advance_one_generation() == StepOutcome::FixedPoint {
            println!(
                "{}",
                ColorOutput::success(&format!(
                    "Fixed point reached at generation {}",
                    engine.generation()
                ))
            );
            break;
        }
    }

    print!("{}", formatter.format_grid(engine.grid()));
    println!("{}", GridFormatter::format_status(&engine));

    Ok(engine)
}

#[derive(Serialize)]
struct PresetSummary {
    index: usize,
    name: String,
    cells: usize,
    width: i32,
    height: i32,
    pattern: String,
}

fn presets_command(json: bool) -> Result<()> {
    let presets = standard_presets();

    if !json {
        print!("{}", GridFormatter::format_preset_list(&presets));
        return Ok(());
    }

    let summaries = presets
        .iter()
        .enumerate()
        .map(|(index, preset)| -> Result<PresetSummary> {
            let (width, height) = preset.extent();
            Ok(PresetSummary {
                index,
                name: preset.name().to_string(),
                cells: preset.len(),
                width,
                height,
                pattern: preset.encode()?,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    println!("{}", serde_json::to_string_pretty(&summaries)?);
    Ok(())
}

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Writing default configuration..."));

    let config_path = default_config_path(&directory);
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit {}", config_path.display());
    println!("2. Run: cargo run -- run --preset Glider");

    Ok(())
}

fn default_config_path(directory: &Path) -> PathBuf {
    directory.join("config").join("life.yaml")
}
