//! Puzzle file I/O
//!
//! One puzzle per line: 81 characters read row by row, digits `1-9` for
//! givens and `0` (or any other non-digit such as `.`) for blanks.

use super::grid::{SudokuGrid, SIZE};
use anyhow::{Context, Result};
use std::path::Path;

/// Parse one 81-character puzzle line
pub fn parse_puzzle_line(line: &str) -> Result<SudokuGrid> {
    let line = line.trim();
    let cells: Vec<char> = line.chars().collect();
    if cells.len() != SIZE * SIZE {
        anyhow::bail!("Puzzle line has {} characters, expected {}", cells.len(), SIZE * SIZE);
    }

    let rows = cells
        .chunks(SIZE)
        .map(|row| {
            row.iter()
                .map(|ch| ch.to_digit(10).map(|d| d as u8).unwrap_or(0))
                .collect()
        })
        .collect();

    Ok(SudokuGrid::from_rows(rows)?)
}

/// Parse every puzzle in `content`, skipping lines that are not 81 characters long
pub fn parse_puzzles(content: &str) -> Result<Vec<SudokuGrid>> {
    content
        .lines()
        .map(str::trim)
        .enumerate()
        .filter(|(_, line)| line.chars().count() == SIZE * SIZE)
        .map(|(idx, line)| {
            parse_puzzle_line(line).with_context(|| format!("Invalid puzzle on line {}", idx + 1))
        })
        .collect()
}

/// Load puzzles from a file
pub fn load_puzzles<P: AsRef<Path>>(path: P) -> Result<Vec<SudokuGrid>> {
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read puzzle file: {}", path.as_ref().display()))?;

    let puzzles = parse_puzzles(&content)
        .with_context(|| format!("Failed to parse puzzle file: {}", path.as_ref().display()))?;

    if puzzles.is_empty() {
        anyhow::bail!("No 81-character puzzle lines in {}", path.as_ref().display());
    }
    Ok(puzzles)
}

/// Write grids one per line in the same format
pub fn save_puzzles<P: AsRef<Path>>(grids: &[SudokuGrid], path: P) -> Result<()> {
    if let Some(parent) = path.as_ref().parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let mut content = String::with_capacity(grids.len() * (SIZE * SIZE + 1));
    for grid in grids {
        content.push_str(&grid.to_line());
        content.push('\n');
    }

    std::fs::write(&path, content)
        .with_context(|| format!("Failed to write puzzles to file: {}", path.as_ref().display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    const CLASSIC: &str = "530070000600195000098000060800060003400803001700020006060000280000419005000080079";

    #[test]
    fn test_parse_puzzle_line() {
        let grid = parse_puzzle_line(CLASSIC).unwrap();
        assert_eq!(grid.get(0, 0), 5);
        assert_eq!(grid.get(0, 2), 0);
        assert_eq!(grid.get(8, 8), 9);
        assert_eq!(grid.given_count(), 30);
    }

    #[test]
    fn test_dots_are_blanks() {
        let dotted = CLASSIC.replace('0', ".");
        assert_eq!(parse_puzzle_line(&dotted).unwrap(), parse_puzzle_line(CLASSIC).unwrap());
    }

    #[test]
    fn test_wrong_length_rejected() {
        assert!(parse_puzzle_line(&CLASSIC[..78]).is_err());
    }

    #[test]
    fn test_parse_puzzles_skips_other_lines() {
        let content = format!("# header\n{}\n\n12345\n{}\n", CLASSIC, "0".repeat(81));
        let puzzles = parse_puzzles(&content).unwrap();
        assert_eq!(puzzles.len(), 2);
        assert_eq!(puzzles[1], SudokuGrid::empty());
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("nested/puzzles.txt");

        let grids = vec![parse_puzzle_line(CLASSIC).unwrap(), SudokuGrid::empty()];
        save_puzzles(&grids, &path).unwrap();

        assert_eq!(load_puzzles(&path).unwrap(), grids);
    }

    #[test]
    fn test_empty_file_rejected() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("empty.txt");
        std::fs::write(&path, "not a puzzle\n").unwrap();

        assert!(load_puzzles(&path).is_err());
        assert!(load_puzzles(temp_dir.path().join("missing.txt")).is_err());
    }
}
