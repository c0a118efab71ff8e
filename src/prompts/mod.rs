//! Prompt compilation, template rendering and registration.

pub mod compiler;
pub mod registry;
pub mod template;

pub use compiler::{compile, CallArguments, CompiledPrompt, RenderedPrompt};
pub use registry::{register_all, PromptCatalog, PromptSink};
