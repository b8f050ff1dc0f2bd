//! Windowless run of the load protocol.
//!
//! Resolves the document through the content provider, drives a panel
//! against a [`ScriptRecorder`], and prints every script that would reach
//! the renderer.

use std::path::Path;

use docview_common::DocviewError;
use docview_config::ViewerConfig;
use docview_webview::content::{document_path_for, viewer_url_for};
use docview_webview::{ContentProvider, PageLoadState, QueryRegistry, ScriptRecorder};

use crate::panel::DocumentPanel;
use crate::theme::resolve_theme;

pub fn run(config: &ViewerConfig, document: &Path, viewer_dir: &Path) -> Result<(), DocviewError> {
    let scripts = load(config, document, viewer_dir)?;

    println!("{}", viewer_url_for(document));
    for script in scripts {
        println!("{script}");
    }
    Ok(())
}

/// Run one full document load and return the recorded scripts.
fn load(config: &ViewerConfig, document: &Path, viewer_dir: &Path) -> Result<Vec<String>, DocviewError> {
    let mut content = ContentProvider::new(viewer_dir);
    content.allow_document(document)?;

    if content.resolve("/viewer/index.html").is_none() {
        return Err(DocviewError::Document(format!(
            "renderer bundle missing: {}",
            viewer_dir.join("index.html").display()
        )));
    }
    let document_path = document_path_for(document);
    if content.resolve(&document_path).is_none() {
        return Err(DocviewError::Document(format!(
            "document not servable: {}",
            document.display()
        )));
    }

    let mut panel = DocumentPanel::new(
        ScriptRecorder::new(),
        document.to_path_buf(),
        QueryRegistry::new(),
        resolve_theme(config),
    );
    panel.reload_document()?;

    let url = viewer_url_for(document);
    panel.on_page_load(PageLoadState::Started, &url);
    if !panel.on_page_load(PageLoadState::Finished, &url) {
        return Err(DocviewError::Document(format!("load of {url} was not recognized")));
    }

    let recorder = panel.into_host();
    Ok(recorder.take())
}
