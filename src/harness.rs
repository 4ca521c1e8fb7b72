//! Batch and retry policies around the single-instance solvers
//!
//! Puzzles in a batch are independent: each one builds its own formula and
//! solver inside a rayon worker, nothing is shared between them.

use crate::sat::{EncodingStatistics, Outcome};
use crate::sokoban::{solve_sokoban_with_statistics, Level, SokobanOutcome};
use crate::sudoku::{count_solutions, solve_sudoku_with_statistics, SudokuGrid};
use anyhow::{Context, Result};
use rayon::prelude::*;
use serde::Serialize;
use std::time::{Duration, Instant};

/// Options for a Sudoku batch
#[derive(Debug, Clone)]
pub struct BatchOptions {
    /// Worker threads, 0 for rayon's default
    pub threads: usize,
    /// Also count solutions (up to 2) to flag ill-posed puzzles
    pub check_uniqueness: bool,
    /// Check every decoded grid against its puzzle
    pub verify_solutions: bool,
}

impl Default for BatchOptions {
    fn default() -> Self {
        Self {
            threads: 0,
            check_uniqueness: false,
            verify_solutions: true,
        }
    }
}

/// Result for one puzzle of a batch
#[derive(Debug, Clone, Serialize)]
pub struct BatchEntry {
    pub index: usize,
    pub puzzle: SudokuGrid,
    pub solution: Option<SudokuGrid>,
    /// `Some(1)` for a unique solution, `Some(2)` for "two or more"
    pub solution_count: Option<usize>,
    pub error: Option<String>,
    pub solve_time_ms: u64,
}

impl BatchEntry {
    pub fn is_solved(&self) -> bool {
        self.solution.is_some()
    }

    pub fn is_unsatisfiable(&self) -> bool {
        self.solution.is_none() && self.error.is_none()
    }
}

/// All entries of a batch, in input order
#[derive(Debug, Clone, Serialize)]
pub struct BatchReport {
    pub entries: Vec<BatchEntry>,
    pub total_time_ms: u64,
}

impl BatchReport {
    pub fn solved(&self) -> usize {
        self.entries.iter().filter(|e| e.is_solved()).count()
    }

    pub fn unsatisfiable(&self) -> usize {
        self.entries.iter().filter(|e| e.is_unsatisfiable()).count()
    }

    pub fn failed(&self) -> usize {
        self.entries.iter().filter(|e| e.error.is_some()).count()
    }

    /// Puzzles known to have more than one solution
    pub fn ambiguous(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.solution_count.is_some_and(|n| n > 1))
            .count()
    }
}

/// Solve every puzzle in parallel.
///
/// A puzzle whose solve fails is recorded with its error; the rest of the
/// batch still runs.
pub fn solve_batch(puzzles: &[SudokuGrid], options: &BatchOptions) -> Result<BatchReport> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()
        .context("Failed to build solver thread pool")?;

    let start = Instant::now();
    let entries: Vec<BatchEntry> = pool.install(|| {
        puzzles
            .par_iter()
            .enumerate()
            .map(|(index, puzzle)| solve_entry(index, puzzle, options))
            .collect()
    });
    let total_time = start.elapsed();

    let report = BatchReport {
        entries,
        total_time_ms: total_time.as_millis() as u64,
    };
    log::info!(
        "batch of {}: {} solved, {} unsatisfiable, {} failed in {:.3}s",
        puzzles.len(),
        report.solved(),
        report.unsatisfiable(),
        report.failed(),
        total_time.as_secs_f64()
    );
    Ok(report)
}

fn solve_entry(index: usize, puzzle: &SudokuGrid, options: &BatchOptions) -> BatchEntry {
    let start = Instant::now();
    let mut entry = BatchEntry {
        index,
        puzzle: puzzle.clone(),
        solution: None,
        solution_count: None,
        error: None,
        solve_time_ms: 0,
    };

    match solve_sudoku_with_statistics(puzzle, options.verify_solutions) {
        Ok((outcome, _)) => entry.solution = outcome.into_solution(),
        Err(err) => {
            log::warn!("puzzle {} failed: {}", index + 1, err);
            entry.error = Some(err.to_string());
        }
    }

    if options.check_uniqueness && entry.is_solved() {
        match count_solutions(puzzle, 2) {
            Ok(count) => entry.solution_count = Some(count),
            Err(err) => entry.error = Some(err.to_string()),
        }
    }

    entry.solve_time_ms = start.elapsed().as_millis() as u64;
    entry
}

/// Outcome of an iterative-deepening search
#[derive(Debug, Clone)]
pub struct DeepeningResult {
    pub outcome: SokobanOutcome,
    /// Horizon of the last attempt: the shortest plan length when solved
    pub horizon: usize,
    /// `(horizon, solve time)` per attempt
    pub attempts: Vec<(usize, Duration)>,
    /// Statistics of the last attempt
    pub statistics: EncodingStatistics,
}

/// Try horizons `start..=max` in order and stop at the first plan.
///
/// The first satisfiable horizon is the shortest plan length, so the
/// returned plan never contains idle steps. `verify` replays the plan.
pub fn solve_with_deepening(level: &Level, start: usize, max: usize, verify: bool) -> Result<DeepeningResult> {
    if start > max {
        anyhow::bail!("Start horizon {} exceeds maximum horizon {}", start, max);
    }

    let mut attempts = Vec::with_capacity(max - start + 1);
    let mut horizon = start;
    loop {
        let (outcome, statistics) = solve_sokoban_with_statistics(level, horizon, verify)
            .with_context(|| format!("Failed to solve level at horizon {}", horizon))?;
        attempts.push((horizon, statistics.solve_time));

        if matches!(outcome, Outcome::Solved(_)) || horizon == max {
            log::info!(
                "deepening stopped at horizon {} after {} attempts ({})",
                horizon,
                attempts.len(),
                if outcome.is_solved() { "solved" } else { "no plan" }
            );
            return Ok(DeepeningResult {
                outcome,
                horizon,
                attempts,
                statistics,
            });
        }

        log::debug!("no plan within {} moves", horizon);
        horizon += 1;
    }
}
