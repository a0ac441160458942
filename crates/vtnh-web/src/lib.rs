//! Browser bindings for view-transition name coordination
//!
//! Wraps [`vtnh_core::Coordinator`] for use from JavaScript:
//!
//! - [`document`]: `web_sys` implementation of the document surface
//! - [`storage`]: `sessionStorage` as the pairing store backend
//! - [`request`]: reading transition requests from plain JS objects
//! - [`handler`]: the exported `ViewTransitionHandler`
//! - [`logging`]: `tracing` output to the devtools console

pub mod document;
pub mod handler;
pub mod logging;
pub mod request;
pub mod storage;

pub use document::WebDocument;
pub use handler::ViewTransitionHandler;
pub use logging::init_logging;
pub use storage::SessionStore;
