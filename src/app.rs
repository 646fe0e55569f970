//! Core application state and logic for the maze animator.

use std::time::Duration;

use color_eyre::eyre::Result;
use log::info;
use rand::{rngs::StdRng, SeedableRng as _};
use ratatui::DefaultTerminal;

use crate::{
    cli::Arguments,
    engine::AnimationController,
    events,
    schedule::IntervalTicks,
    ui,
};

/// Longest time the event loop blocks waiting for input before pumping ticks again.
const MAX_FRAME_WAIT: Duration = Duration::from_millis(100);

/// Application state container for the maze animator.
///
/// This structure holds the state of the application, which is to say the structure from which
/// Ratatui will render the maze and Crossterm events will write to.
pub struct App {
    /// Application exit flag.
    ///
    /// This field indicates whether the application should exit. It is set to `true` when the user
    /// wants to quit but it starts off `false`.
    pub(crate) exit: bool,
    /// Maze animation engine.
    ///
    /// This field owns the maze being carved, the computed route and the agent cursor. Rendering
    /// only reads from it; ticks and key presses are the only writers.
    pub(crate) controller: AnimationController<StdRng>,
    /// Fast trigger stream for carving steps.
    pub(crate) generation_ticks: IntervalTicks,
    /// Slower trigger stream for agent moves.
    pub(crate) traversal_ticks: IntervalTicks,
}

impl App {
    /// Creates a new application from the command-line configuration.
    ///
    /// The random source is seeded from the configured seed when present and from the operating
    /// system otherwise.
    ///
    /// # Errors
    ///
    /// This function may return errors if the requested maze size is invalid.
    pub fn new(arguments: &Arguments) -> Result<Self> {
        let (rows, cols) = arguments.dimensions();
        let rng = arguments
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        info!(
            "carving a {rows}x{cols} maze every {:?}, walking every {:?}",
            arguments.generation_period(),
            arguments.traversal_period()
        );

        Ok(Self {
            exit: false,
            controller: AnimationController::new(rows, cols, rng)?,
            generation_ticks: IntervalTicks::new(arguments.generation_period()),
            traversal_ticks: IntervalTicks::new(arguments.traversal_period()),
        })
    }

    /// Runs the main loop of the application.
    ///
    /// This function draws a frame, then handles user input and pending ticks. The loop continues
    /// until the exit condition is `true`, after which the function returns to the call site.
    ///
    /// # Errors
    ///
    /// - [`std::io::Error`]
    pub fn run(&mut self, terminal: &mut DefaultTerminal) -> Result<()> {
        while !self.exit {
            let _ = terminal.try_draw(|frame| {
                ui::draw(self, frame)
                    .map_err(|err| std::io::Error::new(std::io::ErrorKind::Other, err))
            })?;
            events::handle_events(self)?;
        }

        Ok(())
    }

    /// Suspends both tick streams, or resumes them if they are already suspended.
    ///
    /// Ticks are atomic, so pausing between two of them never leaves the engine half-updated.
    pub(crate) fn toggle_pause(&mut self) {
        if self.is_paused() {
            self.generation_ticks.resume();
            self.traversal_ticks.resume();
            info!("animation resumed");
        } else {
            self.generation_ticks.pause();
            self.traversal_ticks.pause();
            info!("animation paused");
        }
    }

    /// Tells whether the tick streams are suspended.
    pub(crate) const fn is_paused(&self) -> bool {
        self.generation_ticks.is_paused()
    }

    /// Applies every tick due on both streams to the engine.
    pub(crate) fn pump_ticks(&mut self) {
        self.controller
            .pump(&mut self.generation_ticks, &mut self.traversal_ticks);
    }

    /// How long the event loop may wait for input without falling behind the faster tick stream.
    pub(crate) fn frame_wait(&self) -> Duration {
        self.generation_ticks
            .period()
            .min(self.traversal_ticks.period())
            .min(MAX_FRAME_WAIT)
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;

    use super::*;
    use crate::{schedule::TickSource as _, types::AnimationState};

    /// Creates a small seeded application for testing.
    fn create_test_app() -> App {
        let arguments =
            Arguments::parse_from(["mazetick", "--rows", "3", "--cols", "4", "--seed", "7"]);
        App::new(&arguments).expect("valid test arguments")
    }

    #[test]
    fn test_new_starts_generating() {
        let app = create_test_app();

        assert!(!app.exit);
        assert!(!app.is_paused());
        assert_eq!(app.controller.state(), AnimationState::Generating);
        assert_eq!(app.controller.dimensions(), (3, 4));
    }

    #[test]
    fn test_seeded_apps_carve_the_same_maze() {
        let mut first = create_test_app();
        let mut second = create_test_app();

        let _ = first.controller.run_generation();
        let _ = second.controller.run_generation();

        assert_eq!(first.controller.grid(), second.controller.grid());
    }

    #[test]
    fn test_toggle_pause_suspends_both_streams() {
        let mut app = create_test_app();

        app.toggle_pause();
        assert!(app.is_paused());
        assert!(app.traversal_ticks.is_paused());
        assert_eq!(app.generation_ticks.due(), 0);

        app.toggle_pause();
        assert!(!app.is_paused());
        assert!(!app.traversal_ticks.is_paused());
    }

    #[test]
    fn test_paused_pump_leaves_engine_untouched() {
        let mut app = create_test_app();
        app.toggle_pause();

        app.pump_ticks();

        assert_eq!(app.controller.generator().pushes(), 1);
        assert_eq!(app.controller.generator().pops(), 0);
    }

    #[test]
    fn test_frame_wait_follows_fastest_stream() {
        let app = create_test_app();

        assert_eq!(app.frame_wait(), Duration::from_millis(10));
    }
}
