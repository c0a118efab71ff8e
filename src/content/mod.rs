//! Content document model, validation, storage and loading.

pub mod defaults;
pub mod document;
pub mod loader;
pub mod schema;
pub mod store;

pub use document::{ArgumentSpec, ArgumentType, ContentDocument, PromptDefinition, Role};
pub use store::ContentStore;
