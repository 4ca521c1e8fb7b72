//! Configuration settings for the puzzle solvers

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    pub sudoku: SudokuConfig,
    pub sokoban: SokobanConfig,
    pub solver: SolverConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SudokuConfig {
    pub puzzle_file: PathBuf,
    /// Solve at most this many puzzles from the file, 0 for all
    pub max_puzzles: usize,
    pub check_uniqueness: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SokobanConfig {
    pub level_file: PathBuf,
    /// Fixed horizon, or the first horizon tried when deepening
    pub horizon: usize,
    /// Deepen up to this horizon; `None` solves at `horizon` only
    pub max_horizon: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Worker threads for batches, 0 for one per core
    pub threads: usize,
    /// Check solved grids and replay plans before reporting them
    pub verify_solutions: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Text,
    Json,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sudoku: SudokuConfig {
                puzzle_file: PathBuf::from("input/sudoku/puzzles.txt"),
                max_puzzles: 0,
                check_uniqueness: false,
            },
            sokoban: SokobanConfig {
                level_file: PathBuf::from("input/sokoban/corridor.txt"),
                horizon: 5,
                max_horizon: None,
            },
            solver: SolverConfig {
                threads: 0,
                verify_solutions: true,
            },
            output: OutputConfig {
                format: OutputFormat::Text,
                output_directory: PathBuf::from("output"),
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the Sudoku section
    pub fn validate_sudoku(&self) -> Result<()> {
        if !self.sudoku.puzzle_file.exists() {
            anyhow::bail!("Puzzle file does not exist: {}", self.sudoku.puzzle_file.display());
        }
        Ok(())
    }

    /// Validate the Sokoban section
    pub fn validate_sokoban(&self) -> Result<()> {
        if let Some(max_horizon) = self.sokoban.max_horizon {
            if max_horizon < self.sokoban.horizon {
                anyhow::bail!(
                    "Maximum horizon {} is below the starting horizon {}",
                    max_horizon,
                    self.sokoban.horizon
                );
            }
        }

        if !self.sokoban.level_file.exists() {
            anyhow::bail!("Level file does not exist: {}", self.sokoban.level_file.display());
        }

        Ok(())
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(ref puzzle_file) = cli_overrides.puzzle_file {
            self.sudoku.puzzle_file = puzzle_file.clone();
        }
        if let Some(max_puzzles) = cli_overrides.max_puzzles {
            self.sudoku.max_puzzles = max_puzzles;
        }
        if cli_overrides.check_uniqueness {
            self.sudoku.check_uniqueness = true;
        }
        if let Some(ref level_file) = cli_overrides.level_file {
            self.sokoban.level_file = level_file.clone();
        }
        if let Some(horizon) = cli_overrides.horizon {
            self.sokoban.horizon = horizon;
        }
        if let Some(max_horizon) = cli_overrides.max_horizon {
            self.sokoban.max_horizon = Some(max_horizon);
        }
        if let Some(threads) = cli_overrides.threads {
            self.solver.threads = threads;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub puzzle_file: Option<PathBuf>,
    pub max_puzzles: Option<usize>,
    pub check_uniqueness: bool,
    pub level_file: Option<PathBuf>,
    pub horizon: Option<usize>,
    pub max_horizon: Option<usize>,
    pub threads: Option<usize>,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_yaml_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/default.yaml");

        let mut settings = Settings::default();
        settings.sokoban.max_horizon = Some(20);
        settings.output.format = OutputFormat::Json;
        settings.to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.contains("format: json"));

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded.sokoban.max_horizon, Some(20));
        assert_eq!(loaded.output.format, OutputFormat::Json);
        assert_eq!(loaded.sudoku.puzzle_file, settings.sudoku.puzzle_file);
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        settings.merge_with_cli(&CliOverrides {
            horizon: Some(9),
            max_horizon: Some(15),
            check_uniqueness: true,
            threads: Some(4),
            output_dir: Some(PathBuf::from("elsewhere")),
            ..Default::default()
        });

        assert_eq!(settings.sokoban.horizon, 9);
        assert_eq!(settings.sokoban.max_horizon, Some(15));
        assert!(settings.sudoku.check_uniqueness);
        assert_eq!(settings.solver.threads, 4);
        assert_eq!(settings.output.output_directory, PathBuf::from("elsewhere"));
        assert_eq!(settings.sudoku.max_puzzles, 0);
    }

    #[test]
    fn test_validation() {
        let temp_dir = tempdir().unwrap();
        let level = temp_dir.path().join("level.txt");
        std::fs::write(&level, "P.G\n").unwrap();

        let mut settings = Settings::default();
        settings.sudoku.puzzle_file = temp_dir.path().join("missing.txt");
        assert!(settings.validate_sudoku().is_err());

        settings.sokoban.level_file = level;
        assert!(settings.validate_sokoban().is_ok());

        settings.sokoban.horizon = 10;
        settings.sokoban.max_horizon = Some(3);
        assert!(settings.validate_sokoban().is_err());
    }

    #[test]
    fn test_unparseable_config() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("bad.yaml");
        std::fs::write(&path, "sudoku: [not, a, map]\n").unwrap();
        assert!(Settings::from_file(&path).is_err());
    }
}
