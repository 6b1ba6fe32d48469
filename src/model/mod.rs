//! Host-side model: the document, its selection, change requests and viewport
//!
//! This is the reference host the decoration core runs against. The core
//! only sees it through the traits in [`crate::host`].

pub mod document;
pub mod selection;
pub mod transaction;
pub mod viewport;

pub use document::{Document, EditOperation};
pub use selection::{Position, SelectionRange};
pub use transaction::{ChangeSpec, EditError, Transaction};
pub use viewport::Viewport;
