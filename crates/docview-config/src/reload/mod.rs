//! Live settings reload.
//!
//! Combines [`FileWatcher`](crate::watcher::FileWatcher) with the loader so
//! settings changes on disk reach the app as new [`ViewerConfig`](crate::ViewerConfig)
//! values.

mod manager;


pub use manager::ReloadManager;
