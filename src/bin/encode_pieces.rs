//! Prints a data URI entry for every SVG in the current directory, ready to
//! paste into the game's piece image map.

#[macro_use]
extern crate log;

use std::io::{self, Write};

use anyhow::Result;

fn main() -> Result<()> {
    slingtune::init_logging();

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let written = slingtune::assets::encode_dir(".", &mut out)?;
    out.flush()?;

    info!("encoded {} pieces", written);
    Ok(())
}
