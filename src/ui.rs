//! User interface rendering functions for the maze screen.

use color_eyre::eyre::{OptionExt as _, Result};
use ratatui::{
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Color, Style},
    symbols::Marker,
    text::Line,
    widgets::{
        canvas::{Canvas, Points},
        Block, BorderType, Borders, Clear,
    },
    Frame,
};

use crate::{
    lattice::{GridCoordinate, LogicalCell},
    types::AnimationState,
    App,
};

/// Key bindings shown above the status line.
const KEY_HINTS: &str = "(space) restart / (p) pause / (q) quit";

/// Updates the application UI based on the persistent state.
///
/// This function renders the maze screen from the state stored in the [`App`] structure.
///
/// # Errors
///
/// This function may return errors from drawing operations or data conversion failures.
pub(crate) fn draw(app: &App, frame: &mut Frame) -> Result<()> {
    in_game(app, frame)
}

/// Clears the terminal screen by rendering a [`Clear`] widget.
///
/// This function renders a clear widget over the entire area of the frame to prepare for
/// rendering new content without artifacts from previous buffers rendered on the same frame.
pub(crate) fn clear(frame: &mut Frame) {
    let clear = Clear;
    frame.render_widget(clear, frame.area());
}

/// Transforms lattice coordinates to screen coordinates for canvas rendering.
///
/// This function converts lattice coordinates (row, col) to canvas coordinates (x, y) centered on
/// the origin: x = col - (width - 1) / 2 and y = (height - 1) / 2 - row, so the first row ends up
/// at the top of the canvas.
///
/// # Errors
///
/// This function may return errors if a dimension or coordinate does not fit in a terminal cell
/// count.
pub(crate) fn to_screen_coords(
    coords: &[GridCoordinate],
    height: usize,
    width: usize,
) -> Result<Vec<(f64, f64)>> {
    let rows_n = f64::from(u16::try_from(height)?);
    let cols_n = f64::from(u16::try_from(width)?);

    coords
        .iter()
        .map(|coord| {
            let screen_y = (rows_n - 1.) / 2. - f64::from(u16::try_from(coord.row)?);
            let screen_x = f64::from(u16::try_from(coord.col)?) - (cols_n - 1.) / 2.;

            Ok((screen_x, screen_y))
        })
        .collect()
}

/// Builds the status line describing what the engine is doing.
pub(crate) fn status_line(app: &App) -> String {
    let controller = &app.controller;
    let mut status = match controller.state() {
        AnimationState::Generating => {
            let generator = controller.generator();
            let (rows, cols) = controller.dimensions();
            format!(
                "{} {}/{} cells",
                AnimationState::Generating.repr(),
                generator.visited_count(),
                rows * cols
            )
        }
        AnimationState::Traversing => format!(
            "{} {}/{}",
            AnimationState::Traversing.repr(),
            controller.cursor(),
            controller.path().map_or(0, <[GridCoordinate]>::len)
        ),
        AnimationState::Idle if controller.path().is_none() => {
            format!("{}, no route", AnimationState::Idle.repr())
        }
        state => state.repr().to_owned(),
    };
    if app.is_paused() {
        status.push_str(" [paused]");
    }

    status
}

/// Renders the maze screen with the carving cursor, the route trail and the agent.
///
/// This function displays the lattice as it is being carved, highlighting the cell currently being
/// extended, then the portion of the route already walked and the agent's position. The start and
/// end cells are always marked and drawn last, so they stay visible under the agent. Everything is drawn on a single [`Canvas`] with one layer per kind
/// of element, so later layers stay visible on top of the walls.
///
/// # Errors
///
/// This function may return errors from coordinate conversion or layout retrieval.
pub(crate) fn in_game(app: &App, frame: &mut Frame) -> Result<()> {
    clear(frame);

    let controller = &app.controller;
    let grid = controller.grid();
    let (maze_rows, maze_columns) = (grid.height(), grid.width());

    // Create overall layout: maze area + tooltip at bottom
    let overall_layout = Layout::vertical([
        Constraint::Min(1),    // Maze and padding area
        Constraint::Length(3), // Tooltip block
    ])
    .split(frame.area());

    let maze_content_area = *overall_layout
        .first()
        .ok_or_eyre("failed to get maze content area from layout")?;
    let tooltip_full_area = *overall_layout
        .last()
        .ok_or_eyre("failed to get tooltip area from layout")?;

    // Center the tooltip horizontally like the maze
    let tooltip_width = u16::try_from(maze_columns.max(KEY_HINTS.len() + 2))?;
    let tooltip_area = Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(tooltip_width),
        Constraint::Min(1),
    ])
    .split(tooltip_full_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get centered tooltip area from horizontal layout")?;

    let space = maze_area(maze_content_area, maze_rows, maze_columns)?;

    // Pre-compute screen coordinates to handle errors before closures
    let walls: Vec<GridCoordinate> = grid.walls().collect();
    let wall_coords = to_screen_coords(&walls, maze_rows, maze_columns)?;
    let trail_coords = to_screen_coords(controller.trail(), maze_rows, maze_columns)?;
    let cursor_coords = marker_coords(
        controller.current_cell().map(LogicalCell::to_grid),
        maze_rows,
        maze_columns,
    )?;
    let agent_coords = marker_coords(controller.agent(), maze_rows, maze_columns)?;
    let start_coords = marker_coords(Some(controller.start().to_grid()), maze_rows, maze_columns)?;
    let end_coords = marker_coords(Some(controller.end().to_grid()), maze_rows, maze_columns)?;

    let maze = Canvas::default()
        .x_bounds([
            (-rounded_div::i32(space.width.into(), 2)).into(),
            (rounded_div::i32(space.width.into(), 2)).into(),
        ])
        .y_bounds([
            (-rounded_div::i32(space.height.into(), 2)).into(),
            (rounded_div::i32(space.height.into(), 2)).into(),
        ])
        .marker(Marker::Block)
        .paint(|ctx| {
            ctx.draw(&Points {
                coords: &wall_coords,
                color: Color::Gray,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &trail_coords,
                color: Color::Yellow,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &cursor_coords,
                color: Color::Cyan,
            });
            ctx.draw(&Points {
                coords: &agent_coords,
                color: Color::Magenta,
            });
            ctx.layer();
            ctx.draw(&Points {
                coords: &start_coords,
                color: Color::Green,
            });
            ctx.draw(&Points {
                coords: &end_coords,
                color: Color::Red,
            });
        });

    frame.render_widget(maze, space);

    render_tooltip(app, frame, tooltip_area);

    Ok(())
}

/// Renders the key hints and the status line at the bottom of the screen.
fn render_tooltip(app: &App, frame: &mut Frame, area: Rect) {
    let tooltip_block = Block::bordered()
        .title(KEY_HINTS)
        .title_alignment(Alignment::Center)
        .style(Style::default().fg(Color::Green))
        .border_type(BorderType::Plain)
        .borders(Borders::TOP);
    let status_area = tooltip_block.inner(area);

    frame.render_widget(tooltip_block, area);
    frame.render_widget(
        Line::styled(status_line(app), Style::default().fg(Color::Green)).centered(),
        status_area,
    );
}

/// Converts an optional single marker position, yielding no points when it is absent.
fn marker_coords(
    coord: Option<GridCoordinate>,
    height: usize,
    width: usize,
) -> Result<Vec<(f64, f64)>> {
    coord.map_or_else(
        || Ok(Vec::new()),
        |coord| to_screen_coords(&[coord], height, width),
    )
}

/// Centers a `rows`x`columns` block of terminal cells inside `area`.
///
/// # Errors
///
/// This function may return errors if the maze does not fit in a terminal cell count.
fn maze_area(area: Rect, rows: usize, columns: usize) -> Result<Rect> {
    let main_layout = Layout::vertical([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(rows)?),
        Constraint::Min(1),
    ])
    .split(area);

    let maze_area = main_layout
        .get(1)
        .ok_or_eyre("failed to get maze area from layout")?;

    Layout::horizontal([
        Constraint::Min(1),
        Constraint::Length(u16::try_from(columns)?),
        Constraint::Min(1),
    ])
    .split(*maze_area)
    .get(1)
    .copied()
    .ok_or_eyre("failed to get maze space from horizontal layout")
}
