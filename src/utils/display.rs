//! Display and output formatting utilities

use crate::config::OutputFormat;
use crate::harness::BatchReport;
use crate::sat::EncodingStatistics;
use crate::sokoban::{save_moves, Level, Plan, Position, ReplayState};
use crate::sudoku::SudokuGrid;
use anyhow::{Context, Result};
use std::path::Path;

/// Format solutions for display
pub struct SolutionFormatter;

impl SolutionFormatter {
    /// Format a puzzle next to its solution
    pub fn format_sudoku(puzzle: &SudokuGrid, solution: Option<&SudokuGrid>) -> String {
        let mut output = String::new();

        output.push_str("Puzzle:\n");
        output.push_str(&puzzle.to_string());
        output.push('\n');
        match solution {
            Some(grid) => {
                output.push_str("Solution:\n");
                output.push_str(&grid.to_string());
            }
            None => output.push_str("No solution (unsatisfiable)\n"),
        }

        output
    }

    /// Format a batch as a summary table
    pub fn format_batch_summary(report: &BatchReport) -> String {
        let mut output = String::new();

        output.push_str("Batch Summary:\n");
        output.push_str("#     | Givens | Result  | Unique | Time(ms)\n");
        output.push_str("------|--------|---------|--------|---------\n");

        for entry in &report.entries {
            let result = if entry.error.is_some() {
                "error"
            } else if entry.is_solved() {
                "solved"
            } else {
                "unsat"
            };
            let unique = match entry.solution_count {
                Some(1) => "yes",
                Some(_) => "no",
                None => "-",
            };

            output.push_str(&format!(
                "{:5} | {:6} | {:7} | {:6} | {}\n",
                entry.index + 1,
                entry.puzzle.given_count(),
                result,
                unique,
                entry.solve_time_ms
            ));
        }

        output.push_str(&format!(
            "\nSolved: {}  Unsatisfiable: {}  Errors: {}  Total: {:.3}s\n",
            report.solved(),
            report.unsatisfiable(),
            report.failed(),
            report.total_time_ms as f64 / 1000.0
        ));

        output
    }

    /// Format a plan, optionally with the board after every move
    pub fn format_plan(level: &Level, plan: &Plan, states: &[ReplayState], show_states: bool) -> String {
        let mut output = String::new();

        output.push_str(&format!("Moves ({}): {}\n", plan.moves.len(), plan.move_string()));
        output.push_str(&format!("Horizon: {} ({} idle steps)\n", plan.horizon(), plan.idle_steps()));
        output.push('\n');

        if show_states {
            for (i, state) in states.iter().enumerate() {
                match i.checked_sub(1).and_then(|m| plan.moves.get(m)) {
                    Some(mv) => output.push_str(&format!("After move {} ({}):\n", i, mv)),
                    None => output.push_str("Initial State:\n"),
                }
                output.push_str(&Self::format_board(level, state));
                output.push('\n');
            }
        } else if let (Some(first), Some(last)) = (states.first(), states.last()) {
            output.push_str("Initial State:\n");
            output.push_str(&Self::format_board(level, first));
            output.push('\n');
            output.push_str("Final State:\n");
            output.push_str(&Self::format_board(level, last));
        }

        output
    }

    /// Render a board without its padding border.
    ///
    /// `*` is a box on a goal, `+` the player on a goal.
    pub fn format_board(level: &Level, state: &ReplayState) -> String {
        let mut output = String::new();
        for row in 1..level.rows() - 1 {
            for col in 1..level.cols() - 1 {
                let position = Position::new(row, col);
                let goal = level.is_goal(position);
                let symbol = if state.player == position {
                    if goal { '+' } else { 'P' }
                } else if state.boxes.contains(&position) {
                    if goal { '*' } else { 'B' }
                } else if goal {
                    'G'
                } else if level.is_open(position) {
                    '.'
                } else {
                    '#'
                };
                output.push(symbol);
            }
            output.push('\n');
        }
        output
    }

    /// Save a batch report to `output_dir`
    pub fn save_batch<P: AsRef<Path>>(report: &BatchReport, output_dir: P, format: &OutputFormat) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                let mut lines = String::new();
                for entry in &report.entries {
                    match &entry.solution {
                        Some(grid) => lines.push_str(&grid.to_line()),
                        None => lines.push_str(&"-".repeat(81)),
                    }
                    lines.push('\n');
                }
                std::fs::write(output_dir.join("solutions.txt"), lines)?;
                std::fs::write(output_dir.join("summary.txt"), Self::format_batch_summary(report))?;
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(report).context("Failed to serialize batch report")?;
                std::fs::write(output_dir.join("solutions.json"), json)?;
            }
        }

        Ok(())
    }

    /// Save a plan to `output_dir`
    pub fn save_plan<P: AsRef<Path>>(
        level: &Level,
        plan: &Plan,
        states: &[ReplayState],
        output_dir: P,
        format: &OutputFormat,
    ) -> Result<()> {
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        match format {
            OutputFormat::Text => {
                save_moves(plan, output_dir.join("moves.txt"))?;
                std::fs::write(
                    output_dir.join("plan.txt"),
                    Self::format_plan(level, plan, states, true),
                )?;
            }
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(plan).context("Failed to serialize plan")?;
                std::fs::write(output_dir.join("plan.json"), json)?;
            }
        }

        Ok(())
    }

    /// Section breakdown of an encoding, one line per clause group
    pub fn format_statistics(statistics: &EncodingStatistics) -> String {
        ColorOutput::colored(&statistics.to_string(), Color::Cyan)
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    /// Check if terminal supports color
    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err() && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    /// Format success message
    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    /// Format error message
    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    /// Format warning message
    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    /// Format info message
    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
    Cyan,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
            Color::Cyan => 36,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harness::BatchEntry;
    use crate::sokoban::{parse_moves, replay};
    use tempfile::tempdir;

    fn corridor_plan() -> (Level, Plan, Vec<ReplayState>) {
        let level = Level::parse("P.BG").unwrap();
        let moves = parse_moves("RR").unwrap();
        let result = replay(&level, &moves);
        let plan = Plan {
            moves,
            player_path: result.states.iter().map(|s| s.player).collect(),
            box_paths: vec![result.states.iter().map(|s| s.boxes[0]).collect()],
        };
        (level, plan, result.states)
    }

    fn small_report() -> BatchReport {
        BatchReport {
            entries: vec![BatchEntry {
                index: 0,
                puzzle: SudokuGrid::empty(),
                solution: None,
                solution_count: None,
                error: None,
                solve_time_ms: 3,
            }],
            total_time_ms: 3,
        }
    }

    #[test]
    fn test_board_formatting() {
        let (level, _, states) = corridor_plan();
        assert_eq!(SolutionFormatter::format_board(&level, &states[0]), "P.BG\n");
        assert_eq!(SolutionFormatter::format_board(&level, &states[2]), "..P*\n");
    }

    #[test]
    fn test_plan_formatting() {
        let (level, plan, states) = corridor_plan();
        let text = SolutionFormatter::format_plan(&level, &plan, &states, true);
        assert!(text.contains("Moves (2): RR"));
        assert!(text.contains("After move 2 (R):"));

        let short = SolutionFormatter::format_plan(&level, &plan, &states, false);
        assert!(short.contains("Final State:"));
        assert!(!short.contains("After move"));
    }

    #[test]
    fn test_batch_summary() {
        let text = SolutionFormatter::format_batch_summary(&small_report());
        assert!(text.contains("unsat"));
        assert!(text.contains("Unsatisfiable: 1"));
    }

    #[test]
    fn test_save_outputs() {
        let temp_dir = tempdir().unwrap();
        let report = small_report();

        SolutionFormatter::save_batch(&report, temp_dir.path(), &OutputFormat::Text).unwrap();
        let lines = std::fs::read_to_string(temp_dir.path().join("solutions.txt")).unwrap();
        assert_eq!(lines.trim(), "-".repeat(81));

        SolutionFormatter::save_batch(&report, temp_dir.path(), &OutputFormat::Json).unwrap();
        assert!(temp_dir.path().join("solutions.json").exists());

        let (level, plan, states) = corridor_plan();
        let plan_dir = temp_dir.path().join("plan");
        SolutionFormatter::save_plan(&level, &plan, &states, &plan_dir, &OutputFormat::Json).unwrap();
        let json = std::fs::read_to_string(plan_dir.join("plan.json")).unwrap();
        assert!(json.contains("\"Right\""));
    }

    #[test]
    fn test_color_output() {
        let colored = ColorOutput::colored("test", Color::Red);
        // Should either be colored or plain text
        assert!(colored.contains("test"));

        let success = ColorOutput::success("OK");
        assert!(success.contains("OK"));
    }
}
