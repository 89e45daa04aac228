use crate::entities::Instance;
use crate::util::AssemblyConfig;
use anyhow::{Context, Result};
use log::info;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

mod reader;

#[doc(inline)]
pub use reader::NumericReader;
#[doc(inline)]
pub use reader::TextReader;

/// Reads an instance in the bracketed text format (see [`TextReader`]).
pub fn read_instance(path: &Path) -> Result<Instance> {
    let file = File::open(path)
        .with_context(|| format!("could not open instance file: {}", path.display()))?;
    let reader = TextReader::new(BufReader::new(file))?;
    let instance = Instance::read(reader)
        .with_context(|| format!("could not parse instance file: {}", path.display()))?;
    info!("[IO] instance read from {}", path.display());
    Ok(instance)
}

/// Reads an instance from its JSON representation.
pub fn read_json_instance(path: &Path) -> Result<Instance> {
    let file = File::open(path)
        .with_context(|| format!("could not open instance file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("could not parse instance file: {}", path.display()))
}

/// Reads an [`AssemblyConfig`] from a JSON file.
pub fn read_config(path: &Path) -> Result<AssemblyConfig> {
    let file = File::open(path)
        .with_context(|| format!("could not open config file: {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file)).context("incorrect config file format")
}
