//! TOML configuration for the showcase generator.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;
use crate::showcase::CatalogueEntry;
use crate::Result;

/// On-disk configuration for one showcase run.
///
/// All sections are optional: with no `[grid]` table the stock pitch is
/// used, and with no `[[components]]` entries every cell in the source
/// library is showcased in library order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShowcaseConfig {
    /// Name of the generated library and its top cell.
    pub name: String,
    pub grid: GridConfig,
    pub components: Vec<CatalogueEntry>,
}

impl Default for ShowcaseConfig {
    fn default() -> Self {
        Self {
            name: "PIC_COMPONENT_SHOWCASE".to_string(),
            grid: GridConfig::default(),
            components: Vec::new(),
        }
    }
}

pub fn parse_showcase_config(path: impl AsRef<Path>) -> Result<ShowcaseConfig> {
    let contents = fs::read_to_string(path)?;
    let data = toml::from_str(&contents)?;
    Ok(data)
}
