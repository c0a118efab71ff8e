//! Binds every prompt of a content store to a unique external name.
//!
//! Registration is total: names are checked for collisions and every
//! definition is compiled before the first binding reaches the sink.

use std::collections::{HashMap, HashSet};

use tracing::{debug, info};

use super::compiler::{self, CallArguments, CompiledPrompt, RenderedPrompt};
use crate::content::document::ArgumentSpec;
use crate::content::store::ContentStore;
use crate::{AppError, Result};

/// Receiver of compiled prompt bindings (the host runtime side).
pub trait PromptSink {
    /// Accept one binding.
    ///
    /// # Errors
    ///
    /// Implementations may refuse a binding; registration then aborts.
    fn bind(
        &mut self,
        external_name: &str,
        description: &str,
        arguments: &[ArgumentSpec],
        callable: CompiledPrompt,
    ) -> Result<()>;
}

/// Compile every prompt of `store` and hand it to `sink` in document order.
///
/// Returns the number of prompts registered.
///
/// # Errors
///
/// Returns `AppError::DuplicatePrompt` when two prompts share an external
/// name; nothing is bound in that case. Errors from the sink are
/// propagated unchanged.
pub fn register_all<S: PromptSink + ?Sized>(store: &ContentStore, sink: &mut S) -> Result<usize> {
    let mut seen = HashSet::new();
    let mut compiled = Vec::with_capacity(store.prompt_count());

    for entry in store.prompt_definitions() {
        let prompt = compiler::compile(entry.category, entry.prompt_name, entry.definition);
        if !seen.insert(prompt.external_name().to_owned()) {
            return Err(AppError::DuplicatePrompt(prompt.external_name().to_owned()));
        }
        if entry.definition.name != entry.prompt_name {
            debug!(
                key = entry.prompt_name,
                name = %entry.definition.name,
                "prompt name differs from its key; registering under the key"
            );
        }
        for placeholder in prompt.undeclared_placeholders() {
            debug!(
                prompt = prompt.external_name(),
                placeholder, "template placeholder has no declared argument"
            );
        }
        compiled.push(prompt);
    }

    let count = compiled.len();
    for prompt in compiled {
        let name = prompt.external_name().to_owned();
        let description = prompt.description().to_owned();
        let arguments = prompt.arguments().to_vec();
        sink.bind(&name, &description, &arguments, prompt)?;
        info!(prompt = %name, "registered prompt");
    }

    Ok(count)
}

/// In-process sink that keeps compiled prompts addressable by name.
#[derive(Debug, Clone, Default)]
pub struct PromptCatalog {
    prompts: Vec<CompiledPrompt>,
    index: HashMap<String, usize>,
}

impl PromptCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a catalog holding every prompt of `store`.
    ///
    /// # Errors
    ///
    /// See [`register_all`].
    pub fn from_store(store: &ContentStore) -> Result<Self> {
        let mut catalog = Self::new();
        register_all(store, &mut catalog)?;
        Ok(catalog)
    }

    /// Look up a prompt by external name.
    #[must_use]
    pub fn get(&self, external_name: &str) -> Option<&CompiledPrompt> {
        self.index
            .get(external_name)
            .and_then(|&position| self.prompts.get(position))
    }

    /// Registered prompts in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &CompiledPrompt> {
        self.prompts.iter()
    }

    /// External names in registration order.
    #[must_use]
    pub fn names(&self) -> Vec<&str> {
        self.prompts.iter().map(CompiledPrompt::external_name).collect()
    }

    /// Number of registered prompts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    /// Whether no prompt is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    /// Invoke the prompt registered under `external_name`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` for an unknown name and
    /// `AppError::Prompt` for call-time failures.
    pub fn call(&self, external_name: &str, arguments: &CallArguments) -> Result<Vec<RenderedPrompt>> {
        let prompt = self
            .get(external_name)
            .ok_or_else(|| AppError::NotFound(format!("prompt '{external_name}'")))?;
        Ok(prompt.call(arguments)?)
    }
}

impl<'a> IntoIterator for &'a PromptCatalog {
    type Item = &'a CompiledPrompt;
    type IntoIter = std::slice::Iter<'a, CompiledPrompt>;

    fn into_iter(self) -> Self::IntoIter {
        self.prompts.iter()
    }
}

impl PromptSink for PromptCatalog {
    fn bind(
        &mut self,
        external_name: &str,
        _description: &str,
        _arguments: &[ArgumentSpec],
        callable: CompiledPrompt,
    ) -> Result<()> {
        if self.index.contains_key(external_name) {
            return Err(AppError::DuplicatePrompt(external_name.to_owned()));
        }
        self.index.insert(external_name.to_owned(), self.prompts.len());
        self.prompts.push(callable);
        Ok(())
    }
}
