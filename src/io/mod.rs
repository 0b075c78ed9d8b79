pub mod output;

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub use output::{create_writer, EstimateReport, OutputFormat, OutputWriter};

pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write {}", path.display()))
}
