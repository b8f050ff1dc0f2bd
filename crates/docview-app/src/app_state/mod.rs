//! Top-level application state.
//!
//! Implements `winit::application::ApplicationHandler` to drive the main
//! event loop. Owns the window, the document WebView and its panel, and the
//! settings and document watchers.

mod core;
mod event_handler;
mod init;
mod keys;
mod polling;
mod shutdown;
mod types;
mod watchers;

pub use core::DocviewApp;
