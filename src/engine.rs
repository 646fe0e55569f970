//! Tick-driven animation engine.
//!
//! This module contains the state machine that carves the maze one generation tick at a time,
//! computes the route from the top-left to the bottom-right cell once carving finishes, and then
//! walks an agent cursor along that route one traversal tick at a time. Every tick handler runs to
//! completion synchronously, so a renderer reading the accessors between ticks always sees a
//! consistent snapshot.

use log::{debug, info};
use rand::Rng;

use crate::{
    backtracker::{MazeGenerator, StepStatus},
    lattice::{GridCoordinate, GridModel, LogicalCell, MazeError},
    pathfinding::{self, Path},
    schedule::TickSource,
    types::{AnimationState, GenerationStatus, RestartResult, TraversalStatus},
};

/// Animation state machine over one maze instance.
///
/// The maze itself is carved exactly once; restart requests only recompute the route between the
/// fixed endpoints and send the agent off again.
#[derive(Debug)]
pub struct AnimationController<R> {
    /// Carver owning the lattice and its visitation state.
    generator: MazeGenerator<R>,
    /// Current phase.
    state: AnimationState,
    /// Route computed after carving or on the last restart, if one exists.
    path: Option<Path>,
    /// Number of path coordinates the agent has covered.
    cursor: usize,
    /// Logical cell the route starts from.
    start: LogicalCell,
    /// Logical cell the route leads to.
    end: LogicalCell,
}

impl<R: Rng> AnimationController<R> {
    /// Creates an engine for a `rows`x`cols` maze, in the generating phase.
    ///
    /// # Errors
    ///
    /// This function returns [`MazeError::InvalidDimensions`] if either dimension is zero or too
    /// large to address.
    pub fn new(rows: usize, cols: usize, rng: R) -> Result<Self, MazeError> {
        let generator = MazeGenerator::new(rows, cols, rng)?;
        debug!("starting to carve a {rows}x{cols} maze");

        Ok(Self {
            generator,
            state: AnimationState::Generating,
            path: None,
            cursor: 0,
            start: LogicalCell::new(0, 0),
            end: LogicalCell::new(rows - 1, cols - 1),
        })
    }

    /// Handles one generation tick.
    ///
    /// While generating, this performs exactly one carving step. When the step reports the maze
    /// finished, the route is computed and the engine moves to [`AnimationState::PathReady`], or to
    /// [`AnimationState::Idle`] when no route exists. Outside the generating phase this is a no-op
    /// that reports [`GenerationStatus::Completed`].
    pub fn on_generation_tick(&mut self) -> GenerationStatus {
        if self.state != AnimationState::Generating {
            return GenerationStatus::Completed;
        }

        match self.generator.step() {
            StepStatus::Working => GenerationStatus::Continuing,
            StepStatus::Done => {
                let next = if self.compute_path() {
                    AnimationState::PathReady
                } else {
                    AnimationState::Idle
                };
                self.transition(next);
                GenerationStatus::Completed
            }
        }
    }

    /// Drives generation to completion, returning the number of ticks it took.
    pub fn run_generation(&mut self) -> usize {
        let mut ticks = 0;
        while self.state == AnimationState::Generating {
            let _ = self.on_generation_tick();
            ticks += 1;
        }

        ticks
    }

    /// Consumes every tick currently due on both sources, generation first.
    ///
    /// Generation ticks left over once carving completes, and traversal ticks left over once the
    /// agent finishes, are dropped.
    pub fn pump<G: TickSource, T: TickSource>(&mut self, generation: &mut G, traversal: &mut T) {
        for _ in 0..generation.due() {
            if self.on_generation_tick() == GenerationStatus::Completed {
                break;
            }
        }
        for _ in 0..traversal.due() {
            if self.on_traversal_tick() == TraversalStatus::FinishedHidden {
                break;
            }
        }
    }

    /// Handles one traversal tick.
    ///
    /// While a route is being walked (or is ready to be), this advances the cursor by one
    /// coordinate. The tick after the cursor reaches the end of the route hides the agent and moves
    /// the engine to [`AnimationState::Idle`]. In any other phase this is a no-op that reports
    /// [`TraversalStatus::FinishedHidden`].
    pub fn on_traversal_tick(&mut self) -> TraversalStatus {
        if !matches!(
            self.state,
            AnimationState::PathReady | AnimationState::Traversing
        ) {
            return TraversalStatus::FinishedHidden;
        }

        if self.cursor < self.path_len() {
            self.transition(AnimationState::Traversing);
            self.cursor += 1;
            TraversalStatus::Advancing
        } else {
            self.transition(AnimationState::Idle);
            TraversalStatus::FinishedHidden
        }
    }

    /// Recomputes the route and restarts the agent from the beginning.
    ///
    /// The maze is not regenerated. Requests made while generating are ignored and report
    /// [`RestartResult::NoPathAvailable`] without changing state; a request that finds no route
    /// leaves the engine idle.
    pub fn request_path_restart(&mut self) -> RestartResult {
        if self.state == AnimationState::Generating {
            debug!("ignoring path restart while the maze is being carved");
            return RestartResult::NoPathAvailable;
        }

        if self.compute_path() {
            self.transition(AnimationState::Traversing);
            RestartResult::Started
        } else {
            self.transition(AnimationState::Idle);
            RestartResult::NoPathAvailable
        }
    }

    /// Runs the path search between the fixed endpoints and resets the cursor.
    fn compute_path(&mut self) -> bool {
        self.path = pathfinding::find_path(
            self.generator.grid(),
            self.start.to_grid(),
            self.end.to_grid(),
        );
        self.cursor = 0;

        match &self.path {
            Some(path) => {
                info!(
                    "route from {:?} to {:?} spans {} coordinates",
                    self.start,
                    self.end,
                    path.len()
                );
                true
            }
            None => {
                info!("no route from {:?} to {:?}", self.start, self.end);
                false
            }
        }
    }

    /// Moves to a new phase, logging actual changes.
    fn transition(&mut self, next: AnimationState) {
        if self.state != next {
            debug!("animation state {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    /// Length of the current route, zero if there is none.
    fn path_len(&self) -> usize {
        self.path.as_ref().map_or(0, Vec::len)
    }

    /// Current phase.
    pub const fn state(&self) -> AnimationState {
        self.state
    }

    /// Lattice in its current state of carving.
    pub const fn grid(&self) -> &GridModel {
        self.generator.grid()
    }

    /// Carver state, for renderers that want visitation details.
    pub const fn generator(&self) -> &MazeGenerator<R> {
        &self.generator
    }

    /// Logical maze size as `(rows, cols)`.
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.generator.grid().rows(), self.generator.grid().cols())
    }

    /// Cell being carved, only while generating.
    pub fn current_cell(&self) -> Option<LogicalCell> {
        (self.state == AnimationState::Generating).then(|| self.generator.current())
    }

    /// Current route, if one has been computed and found.
    pub fn path(&self) -> Option<&[GridCoordinate]> {
        self.path.as_deref()
    }

    /// Number of route coordinates the agent has covered.
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Portion of the route the agent has covered so far.
    pub fn trail(&self) -> &[GridCoordinate] {
        self.path
            .as_deref()
            .and_then(|path| path.get(..self.cursor))
            .unwrap_or_default()
    }

    /// Coordinate the agent stands on, if it is visible.
    pub fn agent(&self) -> Option<GridCoordinate> {
        if self.state != AnimationState::Traversing {
            return None;
        }

        self.cursor
            .checked_sub(1)
            .and_then(|idx| self.path.as_ref()?.get(idx))
            .copied()
    }

    /// Logical cell the route starts from.
    pub const fn start(&self) -> LogicalCell {
        self.start
    }

    /// Logical cell the route leads to.
    pub const fn end(&self) -> LogicalCell {
        self.end
    }
}
