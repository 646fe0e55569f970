//! This crate contains the source code for the binary for the maze animator mazetick.

#![expect(
    clippy::cargo_common_metadata,
    reason = "Temporary allow during development."
)]
#![expect(
    unused_crate_dependencies,
    reason = "The dependencies are used in the library crate."
)]

use clap::Parser as _;
use color_eyre::{eyre::Result, install};
use mazetick::{cli::Arguments, logging, App};

fn main() -> Result<()> {
    install()?;

    let arguments = Arguments::parse();
    logging::init(arguments.log_file.as_deref())?;
    let mut app = App::new(&arguments)?;

    let mut terminal = ratatui::init();
    let result = app.run(&mut terminal);
    ratatui::restore();

    result
}
