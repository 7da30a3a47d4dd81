// Copyright (c) 2025, Jason Jenkins
// SPDX-License-Identifier: BSD-3-Clause

//! Signature layout serialization and deserialization.
//!
//! This module handles exporting and importing the placed-signature layout
//! in YAML and JSON formats, so a placement can be reused across revisions
//! of the same document.

use crate::models::signature::SignaturesOnPage;
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A saved placement layout: the source file it was made for plus the
/// per-page signature boxes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementLayout {
    pub source_file: String,
    pub pages: Vec<SignaturesOnPage>,
}

/// Export a placement layout to YAML format.
pub fn export_yaml(layout: &PlacementLayout, path: &Path) -> Result<()> {
    let yaml = serde_yaml::to_string(layout)?;
    std::fs::write(path, yaml)?;
    Ok(())
}

/// Export a placement layout to JSON format.
pub fn export_json(layout: &PlacementLayout, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(layout)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Import a placement layout from YAML format.
pub fn import_yaml(path: &Path) -> Result<PlacementLayout> {
    let yaml = std::fs::read_to_string(path)?;
    let layout = serde_yaml::from_str(&yaml)?;
    Ok(layout)
}

/// Import a placement layout from JSON format.
pub fn import_json(path: &Path) -> Result<PlacementLayout> {
    let json = std::fs::read_to_string(path)?;
    let layout = serde_json::from_str(&json)?;
    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::signature::SignatureLayout;

    fn sample_layout() -> PlacementLayout {
        let mut layout = SignatureLayout::new();
        layout.place_at(1, 88, 40);
        layout.place_at(3, 10, 700);
        PlacementLayout {
            source_file: "contract.pdf".to_string(),
            pages: layout.pages,
        }
    }

    #[test]
    fn test_json_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.json");
        let layout = sample_layout();
        export_json(&layout, &path).unwrap();
        let loaded = import_json(&path).unwrap();
        assert_eq!(loaded.source_file, layout.source_file);
        assert_eq!(loaded.pages, layout.pages);
    }

    #[test]
    fn test_yaml_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("layout.yaml");
        let layout = sample_layout();
        export_yaml(&layout, &path).unwrap();
        let loaded = import_yaml(&path).unwrap();
        assert_eq!(loaded.pages, layout.pages);
    }
}
