//! Event handling functions for user input and tick delivery.

use color_eyre::eyre::Result;
use log::debug;
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEventKind};

use crate::{
    types::{AnimationState, RestartResult},
    App,
};

/// Handles input events and pending ticks, updating the application state accordingly.
///
/// This function polls for keyboard events and dispatches them to the appropriate handler
/// functions based on the key pressed. The poll timeout is bounded by the faster tick period so
/// carving keeps its pace while the user is idle. Due ticks are applied afterwards.
///
/// # Errors
///
/// This function may return errors from polling or reading terminal events.
pub(crate) fn handle_events(app: &mut App) -> Result<()> {
    if event::poll(app.frame_wait())? {
        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(app, key.code);
            }
        }
    }

    app.pump_ticks();

    Ok(())
}

/// Dispatches a single key press.
pub(crate) fn handle_key(app: &mut App, code: KeyCode) {
    match code {
        KeyCode::Char('q') => app.exit = true,
        KeyCode::Char(' ') => handle_space_events(app),
        KeyCode::Char('p') => app.toggle_pause(),
        _ => {}
    }
}

/// Handles space key press events for restarting the agent.
///
/// The route is recomputed over the same maze and the agent starts again from the top-left cell.
/// The key is ignored unless the animation is idle, so it can neither interrupt carving nor a walk
/// in progress.
pub(crate) fn handle_space_events(app: &mut App) {
    if app.controller.state() != AnimationState::Idle {
        debug!(
            "ignoring restart key in state {:?}",
            app.controller.state()
        );
        return;
    }

    if app.controller.request_path_restart() == RestartResult::NoPathAvailable {
        debug!("restart key found no route");
    }
}
