pub mod actions;
pub mod common;
pub mod error;
pub mod launcher;
pub mod logging;
pub mod plugin;
pub mod plugins;
pub mod settings;
pub mod store;

pub use error::{ErrorKind, StoreError};
pub use store::{Snippet, SnippetStore};
