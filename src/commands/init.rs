//! The `init` command: write a template inputs file.

use crate::input::INPUTS_TEMPLATE;
use crate::io;
use anyhow::Result;
use std::path::Path;

pub fn init_inputs(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    io::write_file(path, INPUTS_TEMPLATE)?;
    println!("Created {} template inputs file", path.display());
    Ok(())
}
