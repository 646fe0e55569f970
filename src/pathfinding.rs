//! Shortest-path search module.
//!
//! This module contains the Dijkstra search used to route the agent through a finished maze. The
//! lattice is treated as a 4-connected graph with unit edge costs over its passage coordinates.

use std::{cmp::Reverse, collections::BinaryHeap};

use crate::lattice::{GridCoordinate, GridModel};

/// Ordered sequence of coordinates from a start to an end, both inclusive.
pub type Path = Vec<GridCoordinate>;

/// Cost of moving between two adjacent passage coordinates.
const STEP_COST: usize = 1;

/// Finds a shortest passage-only path between two lattice coordinates.
///
/// This function runs Dijkstra's algorithm with a binary min-heap keyed on tentative distance. The
/// distance and predecessor tables are flat vectors local to the call, so the lattice is only ever
/// read. Stale heap entries are skipped when popped.
///
/// Returns [`None`] when the end is unreachable, including when either endpoint is a wall or lies
/// outside the lattice. This is an ordinary outcome, not a failure.
pub fn find_path(grid: &GridModel, start: GridCoordinate, end: GridCoordinate) -> Option<Path> {
    if !grid.is_passage(start) || !grid.is_passage(end) {
        return None;
    }

    let width = grid.width();
    let index = |coord: GridCoordinate| coord.row * width + coord.col;
    let len = grid.height() * width;

    let mut distance = vec![usize::MAX; len];
    let mut predecessor: Vec<Option<GridCoordinate>> = vec![None; len];
    let mut frontier = BinaryHeap::new();

    *distance.get_mut(index(start))? = 0;
    frontier.push(Reverse((0, start)));

    while let Some(Reverse((cost, coord))) = frontier.pop() {
        if coord == end {
            return reconstruct(&predecessor, width, start, end);
        }
        if cost > *distance.get(index(coord))? {
            continue;
        }

        for neighbour in grid.open_neighbours(coord) {
            let candidate = cost + STEP_COST;
            let slot = distance.get_mut(index(neighbour))?;
            if candidate < *slot {
                *slot = candidate;
                *predecessor.get_mut(index(neighbour))? = Some(coord);
                frontier.push(Reverse((candidate, neighbour)));
            }
        }
    }

    None
}

/// Walks predecessor links back from the end and returns the path in start-to-end order.
fn reconstruct(
    predecessor: &[Option<GridCoordinate>],
    width: usize,
    start: GridCoordinate,
    end: GridCoordinate,
) -> Option<Path> {
    let mut path = vec![end];
    let mut coord = end;

    while coord != start {
        // A well-formed chain visits each coordinate at most once.
        if path.len() > predecessor.len() {
            return None;
        }
        coord = (*predecessor.get(coord.row * width + coord.col)?)?;
        path.push(coord);
    }
    path.reverse();

    Some(path)
}
