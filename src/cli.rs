//! Command-line configuration for the terminal front-end.

use std::{path::PathBuf, time::Duration};

use clap::Parser;

/// Default number of logical maze rows.
pub const DEFAULT_ROWS: u16 = 17;
/// Default number of logical maze columns.
pub const DEFAULT_COLS: u16 = 25;
/// Largest accepted number of logical rows or columns.
///
/// The lattice has `2 * n + 1` rows and columns; this keeps it far inside the terminal cell count
/// range used for rendering and its wall matrix small.
pub const MAX_DIMENSION: u16 = 1024;
/// Default delay between two carving steps, in milliseconds.
pub const DEFAULT_GENERATION_MS: u64 = 10;
/// Default delay between two agent moves, in milliseconds.
pub const DEFAULT_TRAVERSAL_MS: u64 = 100;

/// Command-line arguments for the maze animator.
#[derive(Clone, Debug, Parser, PartialEq, Eq)]
#[command(name = "mazetick")]
#[command(
    version,
    about = "Carve a random maze in the terminal and watch an agent walk its shortest route"
)]
pub struct Arguments {
    /// Number of logical maze rows
    #[arg(short, long, default_value_t = DEFAULT_ROWS, value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_DIMENSION)))]
    pub rows: u16,

    /// Number of logical maze columns
    #[arg(short, long, default_value_t = DEFAULT_COLS, value_parser = clap::value_parser!(u16).range(1..=i64::from(MAX_DIMENSION)))]
    pub cols: u16,

    /// Random seed for reproducible carving; drawn from the OS when omitted
    #[arg(short, long)]
    pub seed: Option<u64>,

    /// Milliseconds between two carving steps
    #[arg(short, long, default_value_t = DEFAULT_GENERATION_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub generation_ms: u64,

    /// Milliseconds between two agent moves
    #[arg(short, long, default_value_t = DEFAULT_TRAVERSAL_MS, value_parser = clap::value_parser!(u64).range(1..))]
    pub traversal_ms: u64,

    /// Write log records to this file (filtered by `RUST_LOG`, default `info`)
    #[arg(short, long, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

impl Arguments {
    /// Maze size as `(rows, cols)` in logical cells.
    pub fn dimensions(&self) -> (usize, usize) {
        (usize::from(self.rows), usize::from(self.cols))
    }

    /// Delay between two generation ticks.
    pub const fn generation_period(&self) -> Duration {
        Duration::from_millis(self.generation_ms)
    }

    /// Delay between two traversal ticks.
    pub const fn traversal_period(&self) -> Duration {
        Duration::from_millis(self.traversal_ms)
    }
}
