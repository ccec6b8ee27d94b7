//! Dataset input: the JSON document format, the fetch-based loader and the
//! catalogue of named datasets the host exposes as buttons.

mod datasets;
mod document;
mod loader;

pub use datasets::{AxisLabels, DatasetCatalog, DatasetEntry, FileInfo};
pub use document::{EdgeRecord, NetworkDocument, NodeRecord};
#[cfg(target_arch = "wasm32")]
pub use loader::load_document;
pub use loader::{LoadError, parse_document, recover};
