//! Type definitions and enums for the animation engine's state and tick outcomes.

/// Enumeration of the animation engine's phases.
///
/// This enumeration holds information about what the engine is currently doing. It determines which
/// tick stream is acted upon and what the renderer should draw.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AnimationState {
    /// Maze carving in progress.
    ///
    /// This variant represents the initial phase, where each generation tick carves or backtracks
    /// one cell.
    Generating,
    /// Maze finished and a path found, agent not yet moving.
    ///
    /// This variant represents the observable point between the last carving step and the first
    /// traversal tick.
    PathReady,
    /// Agent walking the computed path.
    ///
    /// This variant represents the phase where each traversal tick advances the agent cursor by one
    /// coordinate.
    Traversing,
    /// Nothing left to animate.
    ///
    /// This variant represents the resting phase reached after the agent finishes its walk or when
    /// no path exists. Only a restart request leaves it.
    Idle,
}

impl AnimationState {
    /// Returns a short human-readable label for the state.
    ///
    /// This function provides the text shown in the status line of the in-game screen.
    pub const fn repr(self) -> &'static str {
        match self {
            Self::Generating => "carving",
            Self::PathReady => "path ready",
            Self::Traversing => "walking",
            Self::Idle => "idle",
        }
    }
}

/// Outcome of a generation tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GenerationStatus {
    /// Carving work remains.
    Continuing,
    /// Carving is finished, either on this tick or earlier.
    Completed,
}

/// Outcome of a traversal tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraversalStatus {
    /// The agent moved one coordinate along the path.
    Advancing,
    /// The agent is hidden, either because it just finished or because there is nothing to walk.
    FinishedHidden,
}

/// Outcome of a path restart request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RestartResult {
    /// A path was found and the agent starts over from the beginning.
    Started,
    /// The request was ignored during generation, or no path exists between the endpoints.
    NoPathAvailable,
}
