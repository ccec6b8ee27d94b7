use serde::{Deserialize, Serialize};

/// How the scene presents the current selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ViewMode {
    /// Everything drawn at full strength.
    #[default]
    Overview,
    /// Only the selection and its neighbourhood at full strength.
    Focus,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Overview => ViewMode::Focus,
            ViewMode::Focus => ViewMode::Overview,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ViewMode::Overview => "overview",
            ViewMode::Focus => "focus",
        }
    }
}
