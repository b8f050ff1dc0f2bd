//! Embedded document renderer bridge.
//!
//! Hosts a web-based document renderer inside a `wry` WebView and keeps host
//! and renderer in sync over a typed message bus:
//! - **Triggers** (host -> renderer): named renderer functions, optionally
//!   called with a JSON payload string.
//! - **Subscribable events** (renderer -> host): one query endpoint per event,
//!   invoked by injected glue with a JSON payload string and dispatched to at
//!   most one host handler.
//!
//! Also provides the `docview://` custom protocol that serves the renderer
//! bundle and the open document.

pub mod codec;
pub mod content;
pub mod error;
pub mod events;
pub mod injector;
pub mod ipc;
pub mod manager;
pub mod messages;
pub mod mpi;
pub mod receiver;
pub mod registry;
pub mod renderer;
pub mod sender;

pub use codec::Payload;
pub use content::ContentProvider;
pub use error::{BusError, DecodingError};
pub use events::{PageLoadState, WebViewEvent};
pub use injector::ReloadGuard;
pub use ipc::QueryFrame;
pub use manager::{WebViewConfig, WebViewHandle, WebViewManager};
pub use mpi::MessagePassingInterface;
pub use receiver::{Delivery, MessageEventReceiver, QueryRegistry};
pub use registry::{SubscribableEvent, TriggerableEvent};
pub use renderer::{RendererContext, ScriptRecorder};
pub use sender::MessageEventSender;
