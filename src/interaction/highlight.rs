//! Hover and selection highlighting.
//!
//! The manager remembers which node is hovered and which is selected, and
//! mirrors that into the scene's node and edge flags: the selection's
//! neighbours and incident edges are marked highlighted. Glow and emphasis
//! buffers for the host are derived from those flags.

use serde::{Deserialize, Serialize};

use super::mode::ViewMode;
use crate::graph::{NetworkScene, NodeId};

/// Glow strengths and the dimming used by focus mode.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HighlightConfig {
    pub hover_glow: f32,
    pub selected_glow: f32,
    pub neighbor_glow: f32,
    /// Emphasis of everything outside the selection in focus mode.
    pub dimmed_emphasis: f32,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            hover_glow: 1.0,
            selected_glow: 0.8,
            neighbor_glow: 0.4,
            dimmed_emphasis: 0.15,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HighlightManager {
    config: HighlightConfig,
    hovered: Option<NodeId>,
    selected: Option<NodeId>,
    /// Scene generation the ids above belong to.
    generation: u32,
}

impl HighlightManager {
    pub fn new(config: HighlightConfig) -> Self {
        Self {
            config,
            hovered: None,
            selected: None,
            generation: 0,
        }
    }

    pub fn hovered(&self) -> Option<NodeId> {
        self.hovered
    }

    pub fn selected(&self) -> Option<NodeId> {
        self.selected
    }

    /// Move the hover to `target`. Returns true if it changed.
    pub fn hover(&mut self, scene: &mut NetworkScene, target: Option<NodeId>) -> bool {
        self.sync(scene);
        if self.hovered == target {
            return false;
        }
        self.hovered = target;
        self.apply(scene);
        true
    }

    /// Click on `target`: selects it, or deselects it if it already was.
    /// Clicking empty space clears the selection.
    pub fn click(&mut self, scene: &mut NetworkScene, target: Option<NodeId>) -> Option<NodeId> {
        self.sync(scene);
        self.selected = match target {
            Some(id) if self.selected == Some(id) => None,
            other => other,
        };
        tracing::debug!(selected = ?self.selected, "selection changed");
        self.apply(scene);
        self.selected
    }

    pub fn reset(&mut self, scene: &mut NetworkScene) {
        self.hovered = None;
        self.selected = None;
        self.generation = scene.generation();
        scene.clear_states();
    }

    /// Per-node glow intensity in node order.
    pub fn glow_intensities(&self, scene: &NetworkScene) -> Vec<f32> {
        scene
            .node_states()
            .iter()
            .map(|state| {
                if state.is_hovered() {
                    self.config.hover_glow
                } else if state.is_selected() {
                    self.config.selected_glow
                } else if state.is_highlighted() {
                    self.config.neighbor_glow
                } else {
                    0.0
                }
            })
            .collect()
    }

    /// Per-node emphasis (opacity multiplier) in node order.
    pub fn node_emphasis(&self, scene: &NetworkScene, mode: ViewMode) -> Vec<f32> {
        let dim = self.dimmed(scene, mode);
        scene
            .node_states()
            .iter()
            .map(|state| {
                if dim && !(state.is_selected() || state.is_highlighted() || state.is_hovered()) {
                    self.config.dimmed_emphasis
                } else {
                    1.0
                }
            })
            .collect()
    }

    /// Per-edge emphasis in edge order.
    pub fn edge_emphasis(&self, scene: &NetworkScene, mode: ViewMode) -> Vec<f32> {
        let dim = self.dimmed(scene, mode);
        scene
            .edge_states()
            .iter()
            .map(|state| {
                if dim && !state.is_highlighted() {
                    self.config.dimmed_emphasis
                } else {
                    1.0
                }
            })
            .collect()
    }

    fn dimmed(&self, scene: &NetworkScene, mode: ViewMode) -> bool {
        mode == ViewMode::Focus && self.generation == scene.generation() && self.selected.is_some()
    }

    /// Forget ids that belong to a replaced dataset.
    fn sync(&mut self, scene: &NetworkScene) {
        if self.generation != scene.generation() {
            self.hovered = None;
            self.selected = None;
            self.generation = scene.generation();
        }
    }

    fn apply(&self, scene: &mut NetworkScene) {
        scene.clear_states();

        if let Some(id) = self.selected {
            if let Some(state) = scene.node_state_mut(id) {
                state.set_selected(true);
            }
            for neighbor in scene.neighbors(id) {
                if let Some(state) = scene.node_state_mut(neighbor) {
                    state.set_highlighted(true);
                }
            }
            for edge in scene.incident_edges(id) {
                if let Some(state) = scene.edge_state_mut(edge) {
                    state.set_highlighted(true);
                }
            }
        }

        if let Some(id) = self.hovered {
            if let Some(state) = scene.node_state_mut(id) {
                state.set_hovered(true);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SceneConfig;
    use crate::data::{EdgeRecord, NetworkDocument, NodeRecord};

    /// 0 - 1 - 2   3
    fn scene() -> NetworkScene {
        let mut scene = NetworkScene::new(&SceneConfig::default());
        scene.load_document(
            "small",
            &NetworkDocument {
                nodes: (0..4).map(|i| NodeRecord::new(i as f32 * 4.0, 0.0, 0.0)).collect(),
                edges: vec![EdgeRecord::new(0, 1, 0.0), EdgeRecord::new(1, 2, 0.0)],
            },
        );
        scene
    }

    fn manager(scene: &mut NetworkScene) -> HighlightManager {
        let mut manager = HighlightManager::new(HighlightConfig::default());
        manager.reset(scene);
        manager
    }

    #[test]
    fn test_hover_sets_glow() {
        let mut scene = scene();
        let mut highlight = manager(&mut scene);

        assert!(highlight.hover(&mut scene, Some(NodeId(3))));
        assert!(!highlight.hover(&mut scene, Some(NodeId(3))));
        assert_eq!(highlight.glow_intensities(&scene), vec![0.0, 0.0, 0.0, 1.0]);

        assert!(highlight.hover(&mut scene, None));
        assert_eq!(highlight.glow_intensities(&scene), vec![0.0; 4]);
    }

    #[test]
    fn test_click_highlights_neighbors() {
        let mut scene = scene();
        let mut highlight = manager(&mut scene);

        assert_eq!(highlight.click(&mut scene, Some(NodeId(1))), Some(NodeId(1)));
        assert_eq!(highlight.glow_intensities(&scene), vec![0.4, 0.8, 0.4, 0.0]);
        assert!(scene.edge_states().iter().all(|s| s.is_highlighted()));
    }

    #[test]
    fn test_click_toggles_and_empty_clears() {
        let mut scene = scene();
        let mut highlight = manager(&mut scene);

        highlight.click(&mut scene, Some(NodeId(0)));
        assert_eq!(highlight.click(&mut scene, Some(NodeId(0))), None);

        highlight.click(&mut scene, Some(NodeId(2)));
        assert_eq!(highlight.click(&mut scene, None), None);
        assert!(scene.node_states().iter().all(|s| !s.is_selected() && !s.is_highlighted()));
    }

    #[test]
    fn test_hover_survives_selection_change() {
        let mut scene = scene();
        let mut highlight = manager(&mut scene);

        highlight.hover(&mut scene, Some(NodeId(3)));
        highlight.click(&mut scene, Some(NodeId(0)));
        assert!(scene.node_states()[3].is_hovered());
        assert!(scene.node_states()[1].is_highlighted());
        assert!(!scene.edge_states()[1].is_highlighted());
    }

    #[test]
    fn test_focus_mode_dims_unrelated() {
        let mut scene = scene();
        let mut highlight = manager(&mut scene);

        // No selection: focus mode has nothing to focus on.
        assert_eq!(highlight.node_emphasis(&scene, ViewMode::Focus), vec![1.0; 4]);

        highlight.click(&mut scene, Some(NodeId(0)));
        assert_eq!(highlight.node_emphasis(&scene, ViewMode::Overview), vec![1.0; 4]);
        assert_eq!(
            highlight.node_emphasis(&scene, ViewMode::Focus),
            vec![1.0, 1.0, 0.15, 0.15]
        );
        assert_eq!(highlight.edge_emphasis(&scene, ViewMode::Focus), vec![1.0, 0.15]);
    }

    #[test]
    fn test_dataset_switch_forgets_selection() {
        let mut scene = scene();
        let mut highlight = manager(&mut scene);
        highlight.click(&mut scene, Some(NodeId(1)));

        scene.load_document(
            "mini",
            &NetworkDocument {
                nodes: vec![NodeRecord::default(), NodeRecord::new(2.0, 0.0, 0.0)],
                edges: vec![EdgeRecord::new(0, 1, 0.0)],
            },
        );
        assert_eq!(highlight.node_emphasis(&scene, ViewMode::Focus), vec![1.0, 1.0]);

        highlight.hover(&mut scene, None);
        assert_eq!(highlight.selected(), None);
        assert_eq!(highlight.glow_intensities(&scene), vec![0.0, 0.0]);
    }
}
