//! Showcase assembly: arranges component cells from a source GDS library
//! into a single labeled top cell.
//!
//! Component geometry stays external. The source library supplies the cells;
//! this module only copies the referenced structs and lays out one struct
//! reference plus caption per catalogue entry using [`GridPlacer`].

use std::collections::{HashMap, HashSet};

use gds21::{GdsElement, GdsLibrary, GdsStruct};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::grid::{GridConfig, GridPlacer, PlacedItem};

#[derive(Debug, Error)]
pub enum ShowcaseError {
    #[error("cell not found in source library: {0}")]
    UnknownCell(String),
    #[error("showcase name collides with source cell: {0}")]
    TopCellCollision(String),
}

/// One showcased component.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogueEntry {
    /// Name of the component cell in the source library.
    pub cell: String,
    /// Caption text placed below the component. Defaults to the cell name.
    #[serde(default)]
    pub caption: Option<String>,
    /// Start a fresh grid row before placing this entry. Used for cells too
    /// wide to share a row, e.g. spiral delay lines.
    #[serde(default)]
    pub own_row: bool,
}

impl CatalogueEntry {
    pub fn new(cell: impl Into<String>) -> Self {
        Self {
            cell: cell.into(),
            caption: None,
            own_row: false,
        }
    }

    pub fn caption(&self) -> &str {
        self.caption.as_deref().unwrap_or(&self.cell)
    }
}

/// Full description of one showcase: output name, grid parameters, and the
/// ordered component catalogue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShowcaseParams {
    pub name: String,
    pub grid: GridConfig,
    pub entries: Vec<CatalogueEntry>,
}

impl ShowcaseParams {
    /// Default catalogue: every cell in the source library, in library
    /// order, captioned with its own name.
    pub fn for_library(source: &GdsLibrary) -> Self {
        Self {
            name: "PIC_COMPONENT_SHOWCASE".to_string(),
            grid: GridConfig::default(),
            entries: source
                .structs
                .iter()
                .map(|s| CatalogueEntry::new(s.name.clone()))
                .collect(),
        }
    }
}

/// Assembles a showcase library from `source` according to `params`.
///
/// The returned library contains the catalogued cells (plus any cells they
/// reference, transitively) and a new top struct named `params.name` holding
/// one placed reference and caption per entry. The source is not modified.
pub fn build_showcase(
    source: &GdsLibrary,
    params: &ShowcaseParams,
) -> Result<GdsLibrary, ShowcaseError> {
    let by_name: HashMap<&str, &GdsStruct> = source
        .structs
        .iter()
        .map(|s| (s.name.as_str(), s))
        .collect();

    // Collect the catalogued cells and everything they reference.
    let mut needed: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = Vec::new();
    for entry in &params.entries {
        if !by_name.contains_key(entry.cell.as_str()) {
            return Err(ShowcaseError::UnknownCell(entry.cell.clone()));
        }
        stack.push(entry.cell.as_str());
    }
    while let Some(name) = stack.pop() {
        if !needed.insert(name) {
            continue;
        }
        let strukt = by_name
            .get(name)
            .ok_or_else(|| ShowcaseError::UnknownCell(name.to_string()))?;
        for elem in &strukt.elems {
            match elem {
                GdsElement::GdsStructRef(r) => stack.push(r.name.as_str()),
                GdsElement::GdsArrayRef(a) => stack.push(a.name.as_str()),
                _ => (),
            }
        }
    }
    if needed.contains(params.name.as_str()) {
        return Err(ShowcaseError::TopCellCollision(params.name.clone()));
    }

    let mut lib = GdsLibrary::new(params.name.as_str());
    lib.units = source.units.clone();
    // Source order is preserved so referenced cells are defined before use.
    lib.structs = source
        .structs
        .iter()
        .filter(|s| needed.contains(s.name.as_str()))
        .cloned()
        .collect();

    let mut top = GdsStruct::new(params.name.as_str());
    let placed = place_entries(&mut top, params);
    log::info!(
        "arranged {} components over {} rows",
        placed.len(),
        placed.last().map(|p| p.row + 1).unwrap_or(0)
    );
    lib.structs.push(top);
    Ok(lib)
}

fn place_entries(top: &mut GdsStruct, params: &ShowcaseParams) -> Vec<PlacedItem> {
    let mut placer = GridPlacer::new(top, &params.grid);
    params
        .entries
        .iter()
        .map(|entry| {
            if entry.own_row {
                placer.force_new_row();
            }
            placer.place(entry.cell.as_str(), entry.caption())
        })
        .collect()
}
