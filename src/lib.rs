//! Netgraph3D - WASM Module
//!
//! This module owns the data side of the Netgraph3D network viewer: loading
//! datasets, building node and edge view models, connector curves, camera
//! rays, picking and highlight state. It is compiled to WebAssembly and
//! exposes a JavaScript-friendly API via wasm-bindgen; the page's 3D library
//! turns the buffers it hands out into meshes and lines.
//!
//! # Architecture
//!
//! - `data`: Network document format, fetch loader and dataset catalogue
//! - `graph`: View models and the scene that owns them (petgraph StableGraph)
//! - `geometry`: Connector curves, bounds and rays (glam)
//! - `spatial`: R-tree index over node boxes for ray picking (rstar)
//! - `interaction`: Orbit camera, highlight manager and view modes

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::prelude::*;

pub mod config;
pub mod data;
pub mod geometry;
pub mod graph;
pub mod interaction;
pub mod spatial;
mod viewer;

pub use config::SceneConfig;
pub use viewer::Viewer;

use graph::{LineStyle, NodeId, RenderHandle};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
    #[cfg(target_arch = "wasm32")]
    tracing_wasm::set_as_global_default();
}

/// Main entry point for the viewer.
///
/// This struct wraps the internal Viewer and provides the public API
/// exposed to JavaScript. The viewer sits behind `Rc<RefCell<_>>` so a dataset
/// fetch can finish after the call that started it has returned.
#[wasm_bindgen]
pub struct NetworkViewWasm {
    inner: Rc<RefCell<Viewer>>,
}

#[wasm_bindgen]
impl NetworkViewWasm {
    /// Create a viewer from an optional config object.
    ///
    /// # Arguments
    ///
    /// * `config` - Partial `SceneConfig` as a JS object, or `undefined`
    /// * `aspect` - Initial canvas width / height
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue, aspect: f32) -> Result<NetworkViewWasm, JsValue> {
        let config: SceneConfig = if config.is_undefined() || config.is_null() {
            SceneConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config)?
        };
        Ok(Self {
            inner: Rc::new(RefCell::new(Viewer::new(config, aspect))),
        })
    }

    // =========================================================================
    // Datasets
    // =========================================================================

    /// Names of the selectable datasets, one per host button.
    #[wasm_bindgen(js_name = datasetNames)]
    pub fn dataset_names(&self) -> Vec<String> {
        self.inner.borrow().config().datasets.names()
    }

    /// Dataset to load on startup, if configured.
    #[wasm_bindgen(js_name = initialDataset)]
    pub fn initial_dataset(&self) -> Option<String> {
        self.inner.borrow().config().initial_dataset.clone()
    }

    /// Release the current network and fetch the named dataset.
    ///
    /// Resolves to the new `FileInfo`, or `undefined` if the name is unknown
    /// or a later `loadDataset` call superseded this one. Fetch and parse
    /// failures resolve to an empty network rather than rejecting.
    #[cfg(target_arch = "wasm32")]
    #[wasm_bindgen(js_name = loadDataset)]
    pub fn load_dataset(&self, name: String) -> js_sys::Promise {
        let inner = Rc::clone(&self.inner);
        wasm_bindgen_futures::future_to_promise(async move {
            let started = inner.borrow_mut().begin_load(&name);
            let Some((ticket, path)) = started else {
                return Ok(JsValue::UNDEFINED);
            };

            let doc = data::load_document(&path).await;

            let info = inner.borrow_mut().complete_load(&ticket, &doc);
            match info {
                Some(info) => serde_wasm_bindgen::to_value(&info).map_err(JsValue::from),
                None => Ok(JsValue::UNDEFINED),
            }
        })
    }

    /// Install a document given as JSON text under `name`.
    #[wasm_bindgen(js_name = loadDocumentJson)]
    pub fn load_document_json(&self, name: &str, json: &str) -> Result<JsValue, JsValue> {
        let info = self.inner.borrow_mut().load_json(name, json);
        Ok(serde_wasm_bindgen::to_value(&info)?)
    }

    /// `FileInfo` of the installed dataset, or `undefined`.
    #[wasm_bindgen(js_name = fileInfo)]
    pub fn file_info(&self) -> Result<JsValue, JsValue> {
        match self.inner.borrow().file_info() {
            Some(info) => Ok(serde_wasm_bindgen::to_value(&info)?),
            None => Ok(JsValue::UNDEFINED),
        }
    }

    /// `"empty"`, `"loading"` or `"loaded"`.
    pub fn state(&self) -> String {
        self.inner.borrow().scene().state().label().to_string()
    }

    /// Handles the host must dispose, as `[generation0, slot0, ...]`.
    ///
    /// Call after every load before creating new meshes.
    #[wasm_bindgen(js_name = drainReleasedHandles)]
    pub fn drain_released_handles(&self) -> Vec<u32> {
        flatten_handles(self.inner.borrow_mut().drain_released())
    }

    // =========================================================================
    // Nodes
    // =========================================================================

    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.inner.borrow().scene().node_count()
    }

    /// Node positions as `[x0, y0, z0, x1, ...]`.
    #[wasm_bindgen(js_name = nodePositions)]
    pub fn node_positions(&self) -> Vec<f32> {
        self.inner.borrow().scene().node_positions()
    }

    /// Node handles as `[generation0, slot0, ...]`, in node order.
    #[wasm_bindgen(js_name = nodeHandles)]
    pub fn node_handles(&self) -> Vec<u32> {
        let viewer = self.inner.borrow();
        flatten_handles(viewer.scene().nodes().iter().map(|n| n.handle))
    }

    /// The shared node style (`shape`, `size`, `color`).
    #[wasm_bindgen(js_name = nodeStyle)]
    pub fn node_style(&self) -> Result<JsValue, JsValue> {
        Ok(serde_wasm_bindgen::to_value(&self.inner.borrow().config().node)?)
    }

    /// Bounding box `[min_x, min_y, min_z, max_x, max_y, max_z]`, or None if empty.
    #[wasm_bindgen(js_name = getBounds)]
    pub fn get_bounds(&self) -> Option<Vec<f32>> {
        self.inner
            .borrow()
            .scene()
            .bounds()
            .map(|b| b.to_array().to_vec())
    }

    /// Ids of nodes connected to `node_id`.
    #[wasm_bindgen(js_name = getNeighbors)]
    pub fn get_neighbors(&self, node_id: u32) -> Vec<u32> {
        self.inner
            .borrow()
            .scene()
            .neighbors(NodeId(node_id))
            .into_iter()
            .map(NodeId::raw)
            .collect()
    }

    /// Node degrees as `[out_deg_0, in_deg_0, out_deg_1, in_deg_1, ...]`.
    #[wasm_bindgen(js_name = getNodeDegrees)]
    pub fn get_node_degrees(&self) -> Vec<u32> {
        let viewer = self.inner.borrow();
        let scene = viewer.scene();
        scene
            .nodes()
            .iter()
            .flat_map(|n| {
                let (out_degree, in_degree) = scene.degree(n.id);
                [out_degree, in_degree]
            })
            .collect()
    }

    /// Nearest node to a scene point within `max_distance`.
    #[wasm_bindgen(js_name = findNearestNode)]
    pub fn find_nearest_node(&self, x: f32, y: f32, z: f32, max_distance: f32) -> Option<u32> {
        self.inner
            .borrow()
            .scene()
            .spatial()
            .nearest_within(glam::Vec3::new(x, y, z), max_distance)
            .map(NodeId::raw)
    }

    // =========================================================================
    // Edges
    // =========================================================================

    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.inner.borrow().scene().edge_count()
    }

    /// Sampled curve points of all edges as `[x0, y0, z0, ...]`.
    #[wasm_bindgen(js_name = edgeVertices)]
    pub fn edge_vertices(&self) -> Vec<f32> {
        self.inner.borrow().scene().curves().vertices.clone()
    }

    /// Edge `i` owns points `offsets[i]..offsets[i + 1]` of `edgeVertices`.
    #[wasm_bindgen(js_name = edgeVertexOffsets)]
    pub fn edge_vertex_offsets(&self) -> Vec<u32> {
        self.inner.borrow().scene().curves().offsets.clone()
    }

    /// Cumulative arc length at each curve point, for dashed materials.
    #[wasm_bindgen(js_name = edgeLineDistances)]
    pub fn edge_line_distances(&self) -> Vec<f32> {
        self.inner.borrow().scene().curves().distances.clone()
    }

    /// Line style codes per edge: 0 solid, 1 dashed, 2 dotted.
    #[wasm_bindgen(js_name = edgeLineStyles)]
    pub fn edge_line_styles(&self) -> Vec<u8> {
        let viewer = self.inner.borrow();
        viewer.scene().edges().iter().map(|e| e.line_style.code()).collect()
    }

    /// 0xRRGGBB per edge.
    #[wasm_bindgen(js_name = edgeColors)]
    pub fn edge_colors(&self) -> Vec<u32> {
        let viewer = self.inner.borrow();
        viewer.scene().edges().iter().map(|e| e.color).collect()
    }

    /// Line width shared by all edges.
    #[wasm_bindgen(js_name = edgeWidth)]
    pub fn edge_width(&self) -> f32 {
        self.inner.borrow().config().edge.width
    }

    /// Edge handles as `[generation0, slot0, ...]`, in edge order.
    #[wasm_bindgen(js_name = edgeHandles)]
    pub fn edge_handles(&self) -> Vec<u32> {
        let viewer = self.inner.borrow();
        flatten_handles(viewer.scene().edges().iter().map(|e| e.handle))
    }

    /// `[dash, gap]` for a line style code, or None for solid lines.
    #[wasm_bindgen(js_name = dashPattern)]
    pub fn dash_pattern(code: u8) -> Option<Vec<f32>> {
        let style = match code {
            1 => LineStyle::Dashed,
            2 => LineStyle::Dotted,
            _ => LineStyle::Solid,
        };
        style.dash_pattern().map(|(dash, gap)| vec![dash, gap])
    }

    // =========================================================================
    // Camera
    // =========================================================================

    /// Queue an orbit rotation in radians.
    pub fn orbit(&self, delta_azimuth: f32, delta_polar: f32) {
        self.inner.borrow_mut().camera_mut().orbit(delta_azimuth, delta_polar);
    }

    /// Queue a zoom; factors above 1 move away from the target.
    pub fn zoom(&self, factor: f32) {
        self.inner.borrow_mut().camera_mut().zoom(factor);
    }

    pub fn resize(&self, width: f32, height: f32) {
        self.inner.borrow_mut().camera_mut().resize(width, height);
    }

    /// Advance camera damping by one frame. Returns true while moving.
    pub fn update(&self) -> bool {
        self.inner.borrow_mut().camera_mut().update()
    }

    /// Column-major view matrix.
    #[wasm_bindgen(js_name = viewMatrix)]
    pub fn view_matrix(&self) -> Vec<f32> {
        self.inner.borrow().camera().view_matrix().to_cols_array().to_vec()
    }

    /// Column-major projection matrix (WebGL clip space).
    #[wasm_bindgen(js_name = projectionMatrix)]
    pub fn projection_matrix(&self) -> Vec<f32> {
        self.inner
            .borrow()
            .camera()
            .projection_matrix()
            .to_cols_array()
            .to_vec()
    }

    #[wasm_bindgen(js_name = cameraPosition)]
    pub fn camera_position(&self) -> Vec<f32> {
        self.inner.borrow().camera().position().to_array().to_vec()
    }

    // =========================================================================
    // Pointer Interaction
    // =========================================================================

    /// Update hover from normalized device coordinates. Returns true if the
    /// hovered node changed.
    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, ndc_x: f32, ndc_y: f32) -> bool {
        self.inner.borrow_mut().pointer_move(ndc_x, ndc_y)
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self) -> bool {
        self.inner.borrow_mut().pointer_leave()
    }

    /// Toggle selection under the pointer. Returns the selected node id.
    pub fn click(&self, ndc_x: f32, ndc_y: f32) -> Option<u32> {
        self.inner.borrow_mut().click(ndc_x, ndc_y).map(NodeId::raw)
    }

    #[wasm_bindgen(js_name = hoveredNode)]
    pub fn hovered_node(&self) -> Option<u32> {
        self.inner.borrow().hovered().map(NodeId::raw)
    }

    #[wasm_bindgen(js_name = selectedNode)]
    pub fn selected_node(&self) -> Option<u32> {
        self.inner.borrow().selected().map(NodeId::raw)
    }

    /// Glow intensity per node (0 when not highlighted).
    #[wasm_bindgen(js_name = glowIntensities)]
    pub fn glow_intensities(&self) -> Vec<f32> {
        self.inner.borrow().glow_intensities()
    }

    /// Opacity multiplier per node for the current view mode.
    #[wasm_bindgen(js_name = nodeEmphasis)]
    pub fn node_emphasis(&self) -> Vec<f32> {
        self.inner.borrow().node_emphasis()
    }

    /// Opacity multiplier per edge for the current view mode.
    #[wasm_bindgen(js_name = edgeEmphasis)]
    pub fn edge_emphasis(&self) -> Vec<f32> {
        self.inner.borrow().edge_emphasis()
    }

    // =========================================================================
    // View Mode
    // =========================================================================

    /// Switch between `"overview"` and `"focus"`; returns the new mode.
    #[wasm_bindgen(js_name = toggleViewMode)]
    pub fn toggle_view_mode(&self) -> String {
        self.inner.borrow_mut().toggle_view_mode().as_str().to_string()
    }

    #[wasm_bindgen(js_name = viewMode)]
    pub fn view_mode(&self) -> String {
        self.inner.borrow().view_mode().as_str().to_string()
    }

    /// Scene background color, 0xRRGGBB.
    pub fn background(&self) -> u32 {
        self.inner.borrow().config().background
    }
}

fn flatten_handles<I>(handles: I) -> Vec<u32>
where
    I: IntoIterator<Item = RenderHandle>,
{
    handles
        .into_iter()
        .flat_map(|h| [h.generation, h.slot])
        .collect()
}

#[cfg(test)]
mod integration_tests {
    use super::*;
    use crate::data::{parse_document, recover};

    const SMALL: &str = r#"{
        "nodes": [
            {"x": 0, "y": 0, "z": 0},
            {"x": 4, "y": 0, "z": 0},
            {"x": 0, "y": 2, "z": 4}
        ],
        "edges": [
            {"start": 0, "end": 1, "offset": 0.5},
            {"start": 1, "end": 2, "offset": 1.5}
        ]
    }"#;

    const MEDIUM: &str = r#"{
        "nodes": [
            {"x": -5, "y": 1, "z": 0},
            {"x": 5, "y": 1, "z": 0},
            {"x": 0, "y": 1, "z": 5},
            {"x": 0, "y": 1, "z": -5}
        ],
        "edges": [
            {"start": 0, "end": 1, "offset": 0},
            {"start": 2, "end": 3, "offset": 0},
            {"start": 0, "end": 3, "offset": 2}
        ]
    }"#;

    /// Simulates what `loadDataset` does around its fetch, with the fetch
    /// replaced by parsing in-memory JSON.
    fn load(viewer: &mut Viewer, name: &str, body: Result<&str, ()>) {
        let (ticket, _path) = viewer.begin_load(name).unwrap();
        let doc = match body {
            Ok(text) => recover(parse_document(text)),
            Err(()) => recover(Err(data::LoadError::Transport {
                path: format!("data/{name}.json"),
                reason: "TypeError: Failed to fetch".to_string(),
            })),
        };
        viewer.complete_load(&ticket, &doc);
    }

    #[test]
    fn test_full_pipeline_small() {
        let mut viewer = Viewer::new(SceneConfig::default(), 1.0);
        load(&mut viewer, "small", Ok(SMALL));

        let scene = viewer.scene();
        assert_eq!(scene.node_count(), 3);
        assert_eq!(scene.edge_count(), 2);

        // Every curve starts and ends on its nodes.
        let curves = scene.curves();
        for (i, edge) in scene.edges().iter().enumerate() {
            let points = curves.edge_vertices(i).unwrap();
            let last = points.len() - 3;
            assert_eq!(&points[..3], &edge.start_position.to_array());
            for (got, want) in points[last..].iter().zip(edge.end_position.to_array()) {
                assert!((got - want).abs() < 1e-5);
            }
        }
        assert_eq!(curves.offsets.len(), 3);
        assert_eq!(curves.vertices.len(), 2 * 33 * 3);
    }

    #[test]
    fn test_switch_datasets_replaces_everything() {
        let mut viewer = Viewer::new(SceneConfig::default(), 1.0);
        load(&mut viewer, "small", Ok(SMALL));
        let small_handles = flatten_handles(
            viewer
                .scene()
                .nodes()
                .iter()
                .map(|n| n.handle)
                .chain(viewer.scene().edges().iter().map(|e| e.handle)),
        );

        load(&mut viewer, "medium", Ok(MEDIUM));

        assert_eq!(viewer.scene().node_count(), 4);
        assert_eq!(viewer.scene().edge_count(), 3);
        assert_eq!(viewer.scene().spatial().len(), 4);
        assert_eq!(viewer.file_info().unwrap().filename, "medium.json");
        assert_eq!(flatten_handles(viewer.drain_released()), small_handles);

        let positions = viewer.scene().node_positions();
        assert_eq!(positions.len(), 12);
        assert!(positions.chunks(3).all(|p| p[1] == 1.0));
    }

    #[test]
    fn test_fetch_failure_shows_nothing() {
        let mut viewer = Viewer::new(SceneConfig::default(), 1.0);
        load(&mut viewer, "small", Ok(SMALL));
        load(&mut viewer, "large", Err(()));

        let info = viewer.file_info().unwrap();
        assert_eq!(info.node_count, 0);
        assert_eq!(info.edge_count, 0);
        assert!(viewer.scene().curves().vertices.is_empty());
        assert_eq!(viewer.pick(0.0, 0.0), None);
    }

    #[test]
    fn test_highlight_follows_topology_across_loads() {
        let mut viewer = Viewer::new(SceneConfig::default(), 1.0);
        load(&mut viewer, "small", Ok(SMALL));
        assert_eq!(viewer.click(0.0, 0.0), Some(NodeId(0)));
        assert_eq!(viewer.glow_intensities(), vec![0.8, 0.4, 0.0]);

        load(&mut viewer, "medium", Ok(MEDIUM));
        assert_eq!(viewer.selected(), None);
        assert_eq!(viewer.glow_intensities(), vec![0.0; 4]);
    }

    #[test]
    fn test_same_seed_same_palette() {
        let mut a = Viewer::new(SceneConfig::default(), 1.0);
        let mut b = Viewer::new(SceneConfig::default(), 1.0);
        load(&mut a, "medium", Ok(MEDIUM));
        load(&mut b, "medium", Ok(MEDIUM));

        let styles = |v: &Viewer| -> Vec<(u8, u32)> {
            v.scene()
                .edges()
                .iter()
                .map(|e| (e.line_style.code(), e.color))
                .collect()
        };
        assert_eq!(styles(&a), styles(&b));
    }

    #[test]
    fn test_flatten_handles() {
        let handles = [
            RenderHandle { generation: 2, slot: 0 },
            RenderHandle { generation: 2, slot: 1 },
        ];
        assert_eq!(flatten_handles(handles), vec![2, 0, 2, 1]);
        assert!(flatten_handles(Vec::new()).is_empty());
    }

    #[test]
    fn test_dash_patterns() {
        assert_eq!(NetworkViewWasm::dash_pattern(0), None);
        assert_eq!(NetworkViewWasm::dash_pattern(1), Some(vec![0.5, 0.3]));
        assert_eq!(NetworkViewWasm::dash_pattern(2), Some(vec![0.1, 0.2]));
    }
}
