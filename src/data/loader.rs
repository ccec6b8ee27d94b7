//! Fetch-based document loader.
//!
//! Failures never reach the caller: every error is logged and collapses to an
//! empty document, so the viewer just shows nothing.

use thiserror::Error;

use super::document::NetworkDocument;

/// Why a dataset could not be loaded.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("could not build request for {path}: {reason}")]
    Request { path: String, reason: String },

    #[error("fetch of {path} failed: {reason}")]
    Transport { path: String, reason: String },

    #[error("{path} answered HTTP {status}")]
    Status { path: String, status: u16 },

    #[error("could not read body of {path}: {reason}")]
    Body { path: String, reason: String },

    #[error("malformed network document: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("non-finite value in {field}[{index}]")]
    NonFinite { field: &'static str, index: usize },
}

/// Parse a document from JSON text.
///
/// Numbers that overflow f32 reject the whole document.
pub fn parse_document(text: &str) -> Result<NetworkDocument, LoadError> {
    let doc: NetworkDocument = serde_json::from_str(text)?;
    if let Some((field, index)) = doc.first_non_finite() {
        return Err(LoadError::NonFinite { field, index });
    }
    Ok(doc)
}

/// Collapse a load result into a document, logging any failure.
pub fn recover(result: Result<NetworkDocument, LoadError>) -> NetworkDocument {
    match result {
        Ok(doc) => doc,
        Err(err) => {
            tracing::error!(error = %err, "failed to load network data");
            NetworkDocument::empty()
        }
    }
}

/// Fetch `path` relative to the page and parse it.
///
/// Resolves to an empty document on any failure.
#[cfg(target_arch = "wasm32")]
pub async fn load_document(path: &str) -> NetworkDocument {
    recover(fetch_document(path).await)
}

#[cfg(target_arch = "wasm32")]
async fn fetch_document(path: &str) -> Result<NetworkDocument, LoadError> {
    use wasm_bindgen::JsCast;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, RequestMode, Response};

    let opts = RequestInit::new();
    opts.set_method("GET");
    opts.set_mode(RequestMode::SameOrigin);

    let request = Request::new_with_str_and_init(path, &opts).map_err(|e| LoadError::Request {
        path: path.to_string(),
        reason: format!("{e:?}"),
    })?;

    let window = web_sys::window().ok_or_else(|| LoadError::Transport {
        path: path.to_string(),
        reason: "no window".to_string(),
    })?;

    let resp_value = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| LoadError::Transport {
            path: path.to_string(),
            reason: format!("{e:?}"),
        })?;

    let resp: Response = resp_value.dyn_into().map_err(|_| LoadError::Transport {
        path: path.to_string(),
        reason: "response is not a Response".to_string(),
    })?;

    if !resp.ok() {
        return Err(LoadError::Status {
            path: path.to_string(),
            status: resp.status(),
        });
    }

    let body_err = |e: wasm_bindgen::JsValue| LoadError::Body {
        path: path.to_string(),
        reason: format!("{e:?}"),
    };
    let text = JsFuture::from(resp.text().map_err(body_err)?)
        .await
        .map_err(body_err)?
        .as_string()
        .ok_or_else(|| LoadError::Body {
            path: path.to_string(),
            reason: "body is not text".to_string(),
        })?;

    parse_document(&text)
}
