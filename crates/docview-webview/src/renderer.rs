//! The script-execution seam between the bus and a renderer instance.

use std::cell::RefCell;

use crate::error::BusError;
use crate::ipc;

/// A JS context the bus can run scripts in.
pub trait RendererContext {
    /// Whether a document is loaded and scripts will reach it.
    fn is_ready(&self) -> bool;

    /// Run `script` without waiting for a result.
    fn execute_script(&self, script: &str) -> Result<(), BusError>;
}

/// A renderer that records scripts instead of running them.
///
/// Backs headless runs, where there is no window to host a WebView.
#[derive(Debug, Default)]
pub struct ScriptRecorder {
    ready: bool,
    scripts: RefCell<Vec<String>>,
}

impl ScriptRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// A recorder that already has a document loaded.
    pub fn ready() -> Self {
        Self {
            ready: true,
            ..Self::default()
        }
    }

    pub fn set_ready(&mut self, ready: bool) {
        self.ready = ready;
    }

    /// Everything executed so far.
    pub fn scripts(&self) -> Vec<String> {
        self.scripts.borrow().clone()
    }

    /// Drain the recorded scripts.
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.scripts.borrow_mut())
    }

    /// Renderer function calls made so far, as `(name, argument)`.
    pub fn function_calls(&self) -> Vec<(String, Option<String>)> {
        self.scripts
            .borrow()
            .iter()
            .filter_map(|s| ipc::parse_function_call(s))
            .map(|(name, arg)| (name.to_string(), arg))
            .collect()
    }
}

impl RendererContext for ScriptRecorder {
    fn is_ready(&self) -> bool {
        self.ready
    }

    fn execute_script(&self, script: &str) -> Result<(), BusError> {
        if !self.ready {
            return Err(BusError::TransportUnavailable);
        }
        self.scripts.borrow_mut().push(script.to_string());
        Ok(())
    }
}
