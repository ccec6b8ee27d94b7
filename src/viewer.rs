//! Viewer - the pieces the host drives each frame, wired together.
//!
//! Holds the scene, the orbit camera, the highlight manager and the current
//! view mode. Everything here is plain Rust; `NetworkViewWasm` wraps it for
//! JavaScript and adds the async fetch between `begin_load` and
//! `complete_load`.

use crate::config::SceneConfig;
use crate::data::{AxisLabels, FileInfo, NetworkDocument, parse_document, recover};
use crate::graph::{LoadTicket, NetworkScene, NodeId, RenderHandle};
use crate::interaction::{HighlightManager, OrbitCamera, ViewMode};

pub struct Viewer {
    config: SceneConfig,
    scene: NetworkScene,
    camera: OrbitCamera,
    highlight: HighlightManager,
    mode: ViewMode,
}

impl Viewer {
    pub fn new(config: SceneConfig, aspect: f32) -> Self {
        let mut scene = NetworkScene::new(&config);
        let camera = OrbitCamera::new(config.camera, aspect);
        let mut highlight = HighlightManager::new(config.highlight);
        highlight.reset(&mut scene);
        Self {
            config,
            scene,
            camera,
            highlight,
            mode: ViewMode::default(),
        }
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn scene(&self) -> &NetworkScene {
        &self.scene
    }

    pub fn camera(&self) -> &OrbitCamera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut OrbitCamera {
        &mut self.camera
    }

    // =========================================================================
    // Dataset Switching
    // =========================================================================

    /// Start switching to the named dataset.
    ///
    /// Releases the current network and returns the ticket and resource path
    /// to fetch, or `None` for an unknown name (nothing changes then).
    pub fn begin_load(&mut self, name: &str) -> Option<(LoadTicket, String)> {
        let Some(path) = self.config.datasets.path_of(name) else {
            tracing::warn!(dataset = name, "unknown dataset");
            return None;
        };
        tracing::info!(dataset = name, path = %path, "loading network");
        let ticket = self.scene.begin_load(name);
        Some((ticket, path))
    }

    /// Install a fetched document. `None` when the ticket went stale.
    pub fn complete_load(&mut self, ticket: &LoadTicket, doc: &NetworkDocument) -> Option<FileInfo> {
        if !self.scene.complete_load(ticket, doc) {
            return None;
        }
        self.highlight.reset(&mut self.scene);
        self.file_info()
    }

    /// Parse `json` and install it as `name`, bypassing the fetch.
    ///
    /// Malformed JSON installs an empty network, as a failed fetch would.
    pub fn load_json(&mut self, name: &str, json: &str) -> FileInfo {
        let doc = recover(parse_document(json));
        self.scene.load_document(name, &doc);
        self.highlight.reset(&mut self.scene);
        self.file_info().unwrap_or_else(|| FileInfo::new(name, 0, 0, AxisLabels::default()))
    }

    /// Summary of the installed dataset, if one is loaded.
    pub fn file_info(&self) -> Option<FileInfo> {
        let name = match self.scene.state() {
            crate::graph::DatasetState::Loaded(name) => name,
            _ => return None,
        };
        let (filename, axes) = match self.config.datasets.get(name) {
            Some(entry) => (entry.file.clone(), entry.axes.clone()),
            None => (name.clone(), AxisLabels::default()),
        };
        Some(FileInfo::new(
            &filename,
            self.scene.nodes().len(),
            self.scene.edges().len(),
            axes,
        ))
    }

    pub fn drain_released(&mut self) -> Vec<RenderHandle> {
        self.scene.drain_released()
    }

    // =========================================================================
    // Pointer Interaction
    // =========================================================================

    /// Node under the pointer at normalized device coordinates.
    pub fn pick(&self, ndc_x: f32, ndc_y: f32) -> Option<NodeId> {
        let ray = self.camera.ray_from_ndc(ndc_x, ndc_y)?;
        self.scene.spatial().pick(&ray).map(|(id, _)| id)
    }

    /// Update the hover from a pointer position. Returns true if it changed.
    pub fn pointer_move(&mut self, ndc_x: f32, ndc_y: f32) -> bool {
        let target = self.pick(ndc_x, ndc_y);
        self.highlight.hover(&mut self.scene, target)
    }

    pub fn pointer_leave(&mut self) -> bool {
        self.highlight.hover(&mut self.scene, None)
    }

    /// Toggle selection at a pointer position; returns the new selection.
    pub fn click(&mut self, ndc_x: f32, ndc_y: f32) -> Option<NodeId> {
        let target = self.pick(ndc_x, ndc_y);
        self.highlight.click(&mut self.scene, target)
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.highlight.hovered()
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.highlight.selected()
    }

    // =========================================================================
    // View Mode
    // =========================================================================

    pub fn view_mode(&self) -> ViewMode {
        self.mode
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.mode = self.mode.toggled();
        tracing::debug!(mode = self.mode.as_str(), "view mode changed");
        self.mode
    }

    // =========================================================================
    // Render Buffers
    // =========================================================================

    pub fn glow_intensities(&self) -> Vec<f32> {
        self.highlight.glow_intensities(&self.scene)
    }

    pub fn node_emphasis(&self) -> Vec<f32> {
        self.highlight.node_emphasis(&self.scene, self.mode)
    }

    pub fn edge_emphasis(&self) -> Vec<f32> {
        self.highlight.edge_emphasis(&self.scene, self.mode)
    }
}
