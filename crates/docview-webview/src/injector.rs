//! Reload protocol: which page loads count, and when glue goes back in.
//!
//! Every navigation wipes the renderer's JS state, subscription glue
//! included. The hosting panel re-injects on each completed load of the
//! URL it last asked for, then re-pushes whatever state the renderer lost.

use tracing::debug;

/// WebView2 serves custom protocols as `http://<scheme>.<host>`.
const REWRITTEN_PREFIX: &str = "http://docview.localhost/";
const CANONICAL_PREFIX: &str = "docview://localhost/";

/// Tracks the most recent load target so completions of superseded loads
/// are ignored.
#[derive(Debug, Default)]
pub struct ReloadGuard {
    target: Option<String>,
    loading: bool,
}

impl ReloadGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a (re)load request for `url`.
    pub fn set_target(&mut self, url: impl Into<String>) {
        let url = url.into();
        debug!(url = %url, "load target set");
        self.target = Some(url);
        self.loading = true;
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    /// Whether a load was started and has not finished yet.
    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn on_load_started(&mut self) {
        self.loading = true;
    }

    /// A page finished loading. Returns `true` when it is the current target
    /// and the caller should re-inject subscriptions.
    pub fn on_load_finished(&mut self, url: &str) -> bool {
        let Some(target) = self.target.as_deref() else {
            debug!(url, "load finished with no target, ignoring");
            return false;
        };
        if canonical(target) != canonical(url) {
            debug!(url, target, "load finished for superseded URL, ignoring");
            return false;
        }
        self.loading = false;
        true
    }
}

fn canonical(url: &str) -> String {
    match url.strip_prefix(REWRITTEN_PREFIX) {
        Some(rest) => format!("{CANONICAL_PREFIX}{rest}"),
        None => url.to_string(),
    }
}
