//! Local content serving via the `docview://` custom protocol.
//!
//! Two roots are served, both without a local HTTP server:
//! - `docview://localhost/viewer/...` resolves into the renderer bundle
//!   directory.
//! - `docview://localhost/get-file/<percent-encoded absolute path>` serves a
//!   document, but only one previously registered with
//!   [`ContentProvider::allow_document`].

use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

pub const SCHEME: &str = "docview";
pub const ORIGIN: &str = "docview://localhost";

const VIEWER_PREFIX: &str = "viewer/";
const FILE_PREFIX: &str = "get-file/";

pub struct ContentProvider {
    viewer_dir: PathBuf,
    /// Canonical paths of documents the renderer may fetch.
    documents: HashSet<PathBuf>,
}

impl ContentProvider {
    /// Serve the renderer bundle from `viewer_dir`.
    pub fn new(viewer_dir: impl Into<PathBuf>) -> Self {
        Self {
            viewer_dir: viewer_dir.into(),
            documents: HashSet::new(),
        }
    }

    /// Allow `path` to be served under `get-file/`. Returns the canonical
    /// path that was registered.
    pub fn allow_document(&mut self, path: &Path) -> std::io::Result<PathBuf> {
        let canonical = std::fs::canonicalize(path)?;
        debug!(path = %canonical.display(), "document registered for serving");
        self.documents.insert(canonical.clone());
        Ok(canonical)
    }

    pub fn is_document_allowed(&self, path: &Path) -> bool {
        std::fs::canonicalize(path)
            .map(|p| self.documents.contains(&p))
            .unwrap_or(false)
    }

    /// Resolve a request path (relative to the origin) to MIME type and bytes.
    pub fn resolve(&self, path: &str) -> Option<(Cow<'static, str>, Vec<u8>)> {
        let clean = strip_query(path).trim_start_matches('/');

        if let Some(encoded) = clean.strip_prefix(FILE_PREFIX) {
            return self.resolve_document(encoded);
        }
        if let Some(asset) = clean.strip_prefix(VIEWER_PREFIX) {
            return self.resolve_viewer_asset(asset);
        }
        debug!(path, "request outside served roots");
        None
    }

    fn resolve_document(&self, encoded: &str) -> Option<(Cow<'static, str>, Vec<u8>)> {
        let decoded = urlencoding::decode(encoded).ok()?;
        let canonical = std::fs::canonicalize(decoded.as_ref()).ok()?;
        if !self.documents.contains(&canonical) {
            debug!(path = %canonical.display(), "document not registered, refusing");
            return None;
        }
        let data = std::fs::read(&canonical).ok()?;
        Some((Cow::Borrowed(mime_from_extension(&canonical)), data))
    }

    fn resolve_viewer_asset(&self, asset: &str) -> Option<(Cow<'static, str>, Vec<u8>)> {
        let asset = urlencoding::decode(asset).ok()?;
        let file_path = self.viewer_dir.join(asset.as_ref());

        // Canonicalize both sides so `..` and symlinks cannot escape the bundle
        let canonical_base = std::fs::canonicalize(&self.viewer_dir).ok()?;
        let canonical_file = std::fs::canonicalize(&file_path).ok()?;
        if !canonical_file.starts_with(&canonical_base) {
            return None;
        }

        let data = std::fs::read(&canonical_file).ok()?;
        Some((Cow::Borrowed(mime_from_extension(&file_path)), data))
    }

    pub fn viewer_dir(&self) -> &Path {
        &self.viewer_dir
    }
}

/// The renderer URL that opens `document`.
///
/// The document URL rides in the `file` query parameter, so it is encoded
/// twice: once as a path segment, once as a parameter value.
pub fn viewer_url_for(document: &Path) -> String {
    format!(
        "{ORIGIN}/{VIEWER_PREFIX}index.html?file={}",
        urlencoding::encode(&document_path_for(document))
    )
}

/// Origin-relative path the renderer fetches `document` from.
pub fn document_path_for(document: &Path) -> String {
    format!(
        "/{FILE_PREFIX}{}",
        urlencoding::encode(&document.to_string_lossy())
    )
}

fn strip_query(path: &str) -> &str {
    let end = path.find(|c| c == '?' || c == '#').unwrap_or(path.len());
    &path[..end]
}

/// Guess MIME type from file extension.
fn mime_from_extension(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some("html") | Some("htm") => "text/html",
        Some("css") => "text/css",
        Some("js") | Some("mjs") => "application/javascript",
        Some("json") => "application/json",
        Some("pdf") => "application/pdf",
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("gif") => "image/gif",
        Some("svg") => "image/svg+xml",
        Some("wasm") => "application/wasm",
        Some("ico") => "image/x-icon",
        Some("woff") => "font/woff",
        Some("woff2") => "font/woff2",
        Some("ttf") => "font/ttf",
        Some("otf") => "font/otf",
        Some("bcmap") => "application/octet-stream",
        Some("properties") | Some("ftl") => "text/plain",
        Some("txt") => "text/plain",
        _ => "application/octet-stream",
    }
}
