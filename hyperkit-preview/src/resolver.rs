//! Resolve a request path inside a stored project.
//!
//! Unmatched paths fall back to the project's `index.html` so client-side
//! routed apps can deep-link into any sub-path.

use crate::store::ProjectStore;

pub const INDEX_HTML: &str = "index.html";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ResolveError {
    #[error("Project not found")]
    ProjectNotFound,
    #[error("File not found")]
    FileNotFound,
}

/// A file ready to be written to the response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    pub content: String,
    pub content_type: &'static str,
    /// True when the content came from the `index.html` fallback.
    pub fallback: bool,
}

/// Look up `path` in project `project_id`.
pub fn resolve(
    store: &dyn ProjectStore,
    project_id: &str,
    path: &str,
) -> Result<ResolvedFile, ResolveError> {
    let project = store.get(project_id).ok_or(ResolveError::ProjectNotFound)?;

    if let Some(file) = project.file(path) {
        return Ok(ResolvedFile {
            content: file.content.clone(),
            content_type: content_type(path),
            fallback: false,
        });
    }

    if path != INDEX_HTML
        && let Some(index) = project.file(INDEX_HTML)
    {
        return Ok(ResolvedFile {
            content: index.content.clone(),
            content_type: "text/html",
            fallback: true,
        });
    }

    Err(ResolveError::FileNotFound)
}

/// Media type from the extension of the last path segment.
pub fn content_type(path: &str) -> &'static str {
    let name = path.rsplit('/').next().unwrap_or(path);
    let ext = match name.rsplit_once('.') {
        Some((_, ext)) => ext.to_ascii_lowercase(),
        None => return "text/plain",
    };
    match ext.as_str() {
        "html" => "text/html",
        "js" => "application/javascript",
        "css" => "text/css",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        _ => "text/plain",
    }
}
