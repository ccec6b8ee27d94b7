//! Named datasets and the file-info summary shown after each load.

use serde::{Deserialize, Serialize};

const UNKNOWN_AXIS: &str = "unknown";

/// Labels for the three coordinate axes of a dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AxisLabels {
    pub x: String,
    pub y: String,
    pub z: String,
}

impl AxisLabels {
    pub fn new(x: &str, y: &str, z: &str) -> Self {
        Self {
            x: x.to_string(),
            y: y.to_string(),
            z: z.to_string(),
        }
    }
}

impl Default for AxisLabels {
    fn default() -> Self {
        Self::new(UNKNOWN_AXIS, UNKNOWN_AXIS, UNKNOWN_AXIS)
    }
}

/// One selectable dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetEntry {
    /// Identifier used by the host buttons, e.g. `"small"`.
    pub name: String,
    /// File name below the catalogue's base directory.
    pub file: String,
    #[serde(default)]
    pub axes: AxisLabels,
}

impl DatasetEntry {
    pub fn new(name: &str, file: &str) -> Self {
        Self {
            name: name.to_string(),
            file: file.to_string(),
            axes: AxisLabels::default(),
        }
    }

    pub fn with_axes(mut self, axes: AxisLabels) -> Self {
        self.axes = axes;
        self
    }
}

/// Maps dataset names to resource paths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DatasetCatalog {
    pub base_path: String,
    pub entries: Vec<DatasetEntry>,
}

impl Default for DatasetCatalog {
    fn default() -> Self {
        Self {
            base_path: "data".to_string(),
            entries: vec![
                DatasetEntry::new("small", "small.json"),
                DatasetEntry::new("medium", "medium.json"),
                DatasetEntry::new("large", "large.json"),
                DatasetEntry::new("mega", "mega.json"),
                DatasetEntry::new("mini", "mini.json"),
                DatasetEntry::new("family", "family.json"),
                DatasetEntry::new("julioIglesias", "julioIglesias.json"),
                DatasetEntry::new("architektur", "architektur.json").with_axes(AxisLabels::new(
                    "Loading progression",
                    "Component kind",
                    "Depth",
                )),
            ],
        }
    }
}

impl DatasetCatalog {
    pub fn get(&self, name: &str) -> Option<&DatasetEntry> {
        self.entries.iter().find(|entry| entry.name == name)
    }

    /// Resource path for `name`, e.g. `data/small.json`.
    pub fn path_of(&self, name: &str) -> Option<String> {
        self.get(name).map(|entry| self.join(&entry.file))
    }

    pub fn names(&self) -> Vec<String> {
        self.entries.iter().map(|entry| entry.name.clone()).collect()
    }

    fn join(&self, file: &str) -> String {
        let base = self.base_path.trim_end_matches('/');
        if base.is_empty() {
            file.to_string()
        } else {
            format!("{base}/{file}")
        }
    }
}

/// Summary of the installed dataset for the host's info panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileInfo {
    pub filename: String,
    pub node_count: u32,
    pub edge_count: u32,
    pub axes: AxisLabels,
}

impl FileInfo {
    pub fn new(filename: &str, node_count: usize, edge_count: usize, axes: AxisLabels) -> Self {
        Self {
            filename: filename.to_string(),
            node_count: node_count as u32,
            edge_count: edge_count as u32,
            axes,
        }
    }
}
