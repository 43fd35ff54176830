//! Catalog snapshot file handling.
//!
//! The CLI stands in for the hosted database: a snapshot is a JSON array of
//! `CatalogItem` records, read fresh before every operation.

use anyhow::{Context, Result};
use costa_core::CatalogItem;
use std::fs;
use std::path::Path;

pub fn load_catalog(path: &Path) -> Result<Vec<CatalogItem>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading catalog snapshot {}", path.display()))?;
    let items: Vec<CatalogItem> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing catalog snapshot {}", path.display()))?;
    Ok(items)
}

pub fn save_catalog(path: &Path, items: &[CatalogItem]) -> Result<()> {
    let raw = serde_json::to_string_pretty(items)?;
    fs::write(path, raw)
        .with_context(|| format!("writing catalog snapshot {}", path.display()))?;
    Ok(())
}
