//! Viewer configuration.
//!
//! Every field has a default, so the host may pass `{}` or any subset, e.g.
//! `{ datasets: { basePath: "networks" }, node: { color: 0x3366ff } }`.

use serde::{Deserialize, Serialize};

use crate::data::DatasetCatalog;
use crate::graph::{EdgeStyle, NodeStyle};
use crate::interaction::{CameraConfig, HighlightConfig};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SceneConfig {
    pub datasets: DatasetCatalog,
    pub node: NodeStyle,
    pub edge: EdgeStyle,
    pub camera: CameraConfig,
    pub highlight: HighlightConfig,
    /// Line segments per connector curve.
    pub curve_segments: u32,
    /// Seed for the per-edge style and color picks.
    pub palette_seed: u64,
    /// Scene background, 0xRRGGBB.
    pub background: u32,
    /// Dataset loaded on startup, if any.
    pub initial_dataset: Option<String>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            datasets: DatasetCatalog::default(),
            node: NodeStyle::default(),
            edge: EdgeStyle::default(),
            camera: CameraConfig::default(),
            highlight: HighlightConfig::default(),
            curve_segments: 32,
            palette_seed: 0x5eed,
            background: 0xf5f5dc,
            initial_dataset: Some("small".to_string()),
        }
    }
}
