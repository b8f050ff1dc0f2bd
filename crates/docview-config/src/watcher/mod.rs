//! File watching for live settings reload and document auto-reload.
//!
//! Uses the `notify` crate with a 500ms debounce.

mod file_watcher;


pub use file_watcher::FileWatcher;
