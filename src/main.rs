//! Main CLI application for the puzzle SAT solvers

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use puzzle_sat::{
    config::{CliOverrides, OutputFormat, Settings},
    harness::{solve_batch, solve_with_deepening, BatchOptions},
    sat::Outcome,
    sokoban::{load_level, replay, save_level, solve_sokoban_with_statistics, Level},
    sudoku::{load_puzzles, parse_puzzle_line, save_puzzles, solve_sudoku_with_statistics},
    utils::{ColorOutput, SolutionFormatter},
};
use std::path::PathBuf;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "puzzle_sat")]
#[command(about = "Sudoku and Sokoban SAT solver")]
#[command(version = "0.1.0")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve every puzzle in a Sudoku puzzle file
    Sudoku {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Puzzle file, one 81-character puzzle per line (overrides config)
        #[arg(short, long)]
        puzzles: Option<PathBuf>,

        /// Solve at most this many puzzles (overrides config)
        #[arg(short, long)]
        max_puzzles: Option<usize>,

        /// Count solutions to flag puzzles without a unique answer
        #[arg(long)]
        check_uniqueness: bool,

        /// Worker threads (overrides config)
        #[arg(short, long)]
        threads: Option<usize>,

        /// Output format (overrides config)
        #[arg(short, long, value_parser = parse_format)]
        format: Option<OutputFormat>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print every solved grid
        #[arg(long)]
        show_grids: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Find a plan for a Sokoban level
    Sokoban {
        /// Configuration file path
        #[arg(short, long, default_value = "config/default.yaml")]
        config: PathBuf,

        /// Level file (overrides config)
        #[arg(short, long)]
        level: Option<PathBuf>,

        /// Horizon, or the first horizon when deepening (overrides config)
        #[arg(short = 'T', long)]
        horizon: Option<usize>,

        /// Deepen the horizon one step at a time up to this bound (overrides config)
        #[arg(short, long)]
        max_horizon: Option<usize>,

        /// Output format (overrides config)
        #[arg(short, long, value_parser = parse_format)]
        format: Option<OutputFormat>,

        /// Output directory (overrides config)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Show the board after every move
        #[arg(long)]
        show_states: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Create example configuration and input files
    Setup {
        /// Directory to create files in
        #[arg(short, long, default_value = ".")]
        directory: PathBuf,

        /// Force overwrite existing files
        #[arg(short, long)]
        force: bool,
    },
}

fn parse_format(value: &str) -> Result<OutputFormat, String> {
    match value {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(format!("unknown format '{}', expected text or json", other)),
    }
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Sudoku {
            config,
            puzzles,
            max_puzzles,
            check_uniqueness,
            threads,
            format,
            output,
            show_grids,
            verbose,
        } => {
            let overrides = CliOverrides {
                puzzle_file: puzzles,
                max_puzzles,
                check_uniqueness,
                threads,
                format,
                output_dir: output,
                ..Default::default()
            };
            sudoku_command(config, overrides, show_grids, verbose)
        }
        Commands::Sokoban {
            config,
            level,
            horizon,
            max_horizon,
            format,
            output,
            show_states,
            verbose,
        } => {
            let overrides = CliOverrides {
                level_file: level,
                horizon,
                max_horizon,
                format,
                output_dir: output,
                ..Default::default()
            };
            sokoban_command(config, overrides, show_states, verbose)
        }
        Commands::Setup { directory, force } => setup_command(directory, force),
    }
}

fn load_settings(config_path: &PathBuf, overrides: &CliOverrides) -> Result<Settings> {
    let mut settings = if config_path.exists() {
        Settings::from_file(config_path)
            .with_context(|| format!("Failed to load config from {}", config_path.display()))?
    } else {
        println!(
            "{}",
            ColorOutput::warning(&format!("Config file {} not found, using defaults", config_path.display()))
        );
        Settings::default()
    };

    settings.merge_with_cli(overrides);
    Ok(settings)
}

fn sudoku_command(config_path: PathBuf, overrides: CliOverrides, show_grids: bool, verbose: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🔢 Starting Sudoku Solver"));

    let settings = load_settings(&config_path, &overrides)?;
    if verbose {
        println!("Configuration:");
        println!("  Puzzle file: {}", settings.sudoku.puzzle_file.display());
        println!("  Max puzzles: {}", settings.sudoku.max_puzzles);
        println!("  Check uniqueness: {}", settings.sudoku.check_uniqueness);
        println!("  Threads: {}", settings.solver.threads);
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }
    settings.validate_sudoku().context("Configuration validation failed")?;

    let mut puzzles = load_puzzles(&settings.sudoku.puzzle_file)?;
    if settings.sudoku.max_puzzles > 0 {
        puzzles.truncate(settings.sudoku.max_puzzles);
    }

    println!(
        "{}",
        ColorOutput::info(&format!("🧮 Encoding and solving {} puzzle(s)...", puzzles.len()))
    );
    let start_time = Instant::now();
    let options = BatchOptions {
        threads: settings.solver.threads,
        check_uniqueness: settings.sudoku.check_uniqueness,
        verify_solutions: settings.solver.verify_solutions,
    };
    let report = solve_batch(&puzzles, &options).context("Failed to solve puzzle batch")?;
    let total_time = start_time.elapsed();

    let summary = format!(
        "Solved {}/{} puzzle(s) in {:.3}s",
        report.solved(),
        report.entries.len(),
        total_time.as_secs_f64()
    );
    if report.solved() == report.entries.len() {
        println!("{}", ColorOutput::success(&format!("✅ {}", summary)));
    } else {
        println!("{}", ColorOutput::warning(&format!("⚠️  {}", summary)));
    }
    if report.ambiguous() > 0 {
        println!(
            "{}",
            ColorOutput::warning(&format!("{} puzzle(s) have more than one solution", report.ambiguous()))
        );
    }
    for entry in report.entries.iter().filter(|entry| entry.error.is_some()) {
        println!(
            "{}",
            ColorOutput::error(&format!(
                "Puzzle {}: {}",
                entry.index + 1,
                entry.error.as_deref().unwrap_or_default()
            ))
        );
    }

    println!("\n{}", SolutionFormatter::format_batch_summary(&report));

    if show_grids {
        for entry in &report.entries {
            println!("\n{}", ColorOutput::info(&format!("Puzzle {}:", entry.index + 1)));
            println!("{}", SolutionFormatter::format_sudoku(&entry.puzzle, entry.solution.as_ref()));
        }
    }

    println!("\n{}", ColorOutput::info("💾 Saving solutions..."));
    SolutionFormatter::save_batch(&report, &settings.output.output_directory, &settings.output.format)
        .context("Failed to save solutions")?;
    println!(
        "{}",
        ColorOutput::success(&format!("Solutions saved to {}", settings.output.output_directory.display()))
    );

    if verbose {
        if let Some(first) = puzzles.first() {
            let (_, statistics) = solve_sudoku_with_statistics(first, settings.solver.verify_solutions)?;
            println!("\n{}", SolutionFormatter::format_statistics(&statistics));
        }
    }

    Ok(())
}

fn sokoban_command(config_path: PathBuf, overrides: CliOverrides, show_states: bool, verbose: bool) -> Result<()> {
    println!("{}", ColorOutput::info("📦 Starting Sokoban Planner"));

    let settings = load_settings(&config_path, &overrides)?;
    if verbose {
        println!("Configuration:");
        println!("  Level file: {}", settings.sokoban.level_file.display());
        println!("  Horizon: {}", settings.sokoban.horizon);
        match settings.sokoban.max_horizon {
            Some(max) => println!("  Max horizon: {} (deepening)", max),
            None => println!("  Max horizon: fixed"),
        }
        println!("  Output dir: {}", settings.output.output_directory.display());
        println!();
    }
    settings.validate_sokoban().context("Configuration validation failed")?;

    let level = load_level(&settings.sokoban.level_file)?;
    println!("Level ({} boxes, {} goals):", level.boxes().len(), level.goals().len());
    println!("{}", level);

    println!("{}", ColorOutput::info("🧮 Generating SAT constraints and solving..."));
    let start_time = Instant::now();
    let (outcome, statistics, horizon) = match settings.sokoban.max_horizon {
        Some(max_horizon) => {
            let result = solve_with_deepening(
                &level,
                settings.sokoban.horizon,
                max_horizon,
                settings.solver.verify_solutions,
            )?;
            if verbose {
                for (horizon, time) in &result.attempts {
                    println!("  T={:<4} {:.3}s", horizon, time.as_secs_f64());
                }
            }
            (result.outcome, result.statistics, result.horizon)
        }
        None => {
            let horizon = settings.sokoban.horizon;
            let verify = settings.solver.verify_solutions;
            let (outcome, statistics) = solve_sokoban_with_statistics(&level, horizon, verify)
                .with_context(|| format!("Failed to solve level at horizon {}", horizon))?;
            (outcome, statistics, horizon)
        }
    };
    let total_time = start_time.elapsed();

    let plan = match outcome {
        Outcome::Solved(plan) => plan,
        Outcome::Unsatisfiable => {
            println!(
                "{}",
                ColorOutput::warning(&format!("❌ No plan within {} moves", horizon))
            );
            return Ok(());
        }
    };

    println!(
        "{}",
        ColorOutput::success(&format!(
            "✅ Found a {}-move plan in {:.3}s",
            plan.moves.len(),
            total_time.as_secs_f64()
        ))
    );

    // Board states for display; legality was already checked when verifying
    let replayed = replay(&level, &plan.moves);
    if settings.solver.verify_solutions {
        println!(
            "{}",
            ColorOutput::success(&format!("Replay verified: {} steps", replayed.steps_replayed))
        );
    }

    println!("\n{}", SolutionFormatter::format_plan(&level, &plan, &replayed.states, show_states));

    println!("\n{}", ColorOutput::info("💾 Saving plan..."));
    SolutionFormatter::save_plan(
        &level,
        &plan,
        &replayed.states,
        &settings.output.output_directory,
        &settings.output.format,
    )
    .context("Failed to save plan")?;
    println!(
        "{}",
        ColorOutput::success(&format!("Plan saved to {}", settings.output.output_directory.display()))
    );

    if verbose {
        println!("\n{}", SolutionFormatter::format_statistics(&statistics));
    }

    Ok(())
}

const EXAMPLE_PUZZLES: [&str; 3] = [
    "530070000600195000098000060800060003400803001700020006060000280000419005000080079",
    "000000010400000000020000000000050407008000300001090000300400200050100000000806000",
    "003020600900305001001806400008102900700000008006708200002609500800203009005010300",
];

const EXAMPLE_LEVELS: [(&str, &str); 2] = [
    ("corridor.txt", "P.B...G\n"),
    ("corner.txt", "#####\n#P..#\n#.B.#\n#..G#\n#####\n"),
];

fn setup_command(directory: PathBuf, force: bool) -> Result<()> {
    println!("{}", ColorOutput::info("🛠️  Setting up project structure..."));

    let config_dir = directory.join("config");
    let sudoku_dir = directory.join("input/sudoku");
    let sokoban_dir = directory.join("input/sokoban");
    let output_dir = directory.join("output");

    for dir in [&config_dir, &sudoku_dir, &sokoban_dir, &output_dir] {
        std::fs::create_dir_all(dir).with_context(|| format!("Failed to create directory {}", dir.display()))?;
    }

    let config_path = config_dir.join("default.yaml");
    if !config_path.exists() || force {
        Settings::default()
            .to_file(&config_path)
            .context("Failed to create default configuration")?;
        println!("Created: {}", config_path.display());
    } else {
        println!("Skipped: {} (already exists)", config_path.display());
    }

    let puzzles = EXAMPLE_PUZZLES
        .into_iter()
        .map(parse_puzzle_line)
        .collect::<Result<Vec<_>>>()?;
    save_puzzles(&puzzles, sudoku_dir.join("puzzles.txt")).context("Failed to create example puzzles")?;
    println!("Created example puzzles in: {}", sudoku_dir.display());

    for (name, text) in EXAMPLE_LEVELS {
        let level = Level::parse(text).with_context(|| format!("Invalid example level {}", name))?;
        save_level(&level, sokoban_dir.join(name))?;
    }
    println!("Created example levels in: {}", sokoban_dir.display());

    let examples_dir = config_dir.join("examples");
    std::fs::create_dir_all(&examples_dir)?;

    let mut deepening = Settings::default();
    deepening.sokoban.level_file = PathBuf::from("input/sokoban/corner.txt");
    deepening.sokoban.horizon = 1;
    deepening.sokoban.max_horizon = Some(20);
    deepening.to_file(&examples_dir.join("deepening.yaml"))?;

    let mut uniqueness = Settings::default();
    uniqueness.sudoku.check_uniqueness = true;
    uniqueness.output.format = OutputFormat::Json;
    uniqueness.to_file(&examples_dir.join("uniqueness.yaml"))?;

    println!("Created example configurations in: {}", examples_dir.display());

    println!("\n{}", ColorOutput::success("✅ Setup complete!"));
    println!("\nNext steps:");
    println!("1. Edit configuration files in {}", config_dir.display());
    println!("2. Run: cargo run -- sudoku --config config/default.yaml");
    println!("3. Run: cargo run -- sokoban --config config/examples/deepening.yaml");

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::try_parse_from([
            "puzzle_sat",
            "sokoban",
            "--level",
            "level.txt",
            "-T",
            "5",
            "--max-horizon",
            "9",
        ]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["puzzle_sat", "sudoku", "--format", "json", "--check-uniqueness"]);
        assert!(cli.is_ok());

        let cli = Cli::try_parse_from(["puzzle_sat", "sudoku", "--format", "xml"]);
        assert!(cli.is_err());
    }

    #[test]
    fn test_setup_command() {
        let temp_dir = tempdir().unwrap();
        let result = setup_command(temp_dir.path().to_path_buf(), false);

        assert!(result.is_ok());
        assert!(temp_dir.path().join("config/default.yaml").exists());
        assert!(temp_dir.path().join("config/examples/deepening.yaml").exists());
        assert_eq!(load_puzzles(temp_dir.path().join("input/sudoku/puzzles.txt")).unwrap().len(), 3);
        assert!(load_level(temp_dir.path().join("input/sokoban/corner.txt")).is_ok());
    }
}
