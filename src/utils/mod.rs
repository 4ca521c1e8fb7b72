//! Output helpers for the CLI

pub mod display;

pub use display::{Color, ColorOutput, SolutionFormatter};
