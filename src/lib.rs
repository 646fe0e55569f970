//! Terminal maze animator.
//!
//! A rectangular maze is carved one step at a time by a randomized depth-first backtracker, the
//! shortest route between the top-left and bottom-right cells is computed once carving finishes,
//! and an agent then walks that route one cell per tick. The engine ([`engine`]) is driven by two
//! independent tick streams ([`schedule`]) and knows nothing about the terminal; the front-end in
//! [`App`] renders it with Ratatui.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]

mod app;
mod events;
mod ui;

pub mod backtracker;
pub mod cli;
pub mod engine;
pub mod lattice;
pub mod logging;
pub mod pathfinding;
pub mod schedule;
pub mod types;

pub use app::App;
