//! Read-only accessors over a validated [`ContentDocument`].

use super::document::{ContentDocument, PromptDefinition, StringSection};
use super::schema::GREETINGS_CATEGORY;

/// Tip category used when the caller does not name one.
pub const DEFAULT_TIP_CATEGORY: &str = "mcp";

/// One prompt as enumerated by [`ContentStore::prompt_definitions`].
#[derive(Debug, Clone, Copy)]
pub struct PromptEntry<'a> {
    /// Category key the prompt is declared under.
    pub category: &'a str,
    /// Map key of the prompt inside its category.
    pub prompt_name: &'a str,
    /// The declarative definition.
    pub definition: &'a PromptDefinition,
}

/// In-memory content store.
///
/// Never mutated after construction, so it can be shared freely between
/// concurrent readers behind an `Arc`.
#[derive(Debug, Clone)]
pub struct ContentStore {
    document: ContentDocument,
    default_tip_category: String,
}

impl ContentStore {
    /// Wrap a validated document using [`DEFAULT_TIP_CATEGORY`].
    #[must_use]
    pub fn new(document: ContentDocument) -> Self {
        Self::with_default_tip_category(document, DEFAULT_TIP_CATEGORY)
    }

    /// Wrap a validated document with an explicit default tip category.
    #[must_use]
    pub fn with_default_tip_category(
        document: ContentDocument,
        default_tip_category: impl Into<String>,
    ) -> Self {
        Self {
            document,
            default_tip_category: default_tip_category.into(),
        }
    }

    /// The underlying document.
    #[must_use]
    pub fn document(&self) -> &ContentDocument {
        &self.document
    }

    /// Category returned by [`Self::tips`] when none is requested.
    #[must_use]
    pub fn default_tip_category(&self) -> &str {
        &self.default_tip_category
    }

    /// Tips for `category`, or for the default category when `None`.
    ///
    /// Matching is exact first, then ASCII case-insensitive. Unknown
    /// categories yield an empty slice.
    #[must_use]
    pub fn tips(&self, category: Option<&str>) -> &[String] {
        let category = category.unwrap_or(&self.default_tip_category);
        lookup(&self.document.tips, category)
            .map(|(_, tips)| tips.as_slice())
            .unwrap_or_default()
    }

    /// Canonical (declared) name of a tip category, if present.
    #[must_use]
    pub fn resolve_tip_category(&self, category: &str) -> Option<&str> {
        lookup(&self.document.tips, category).map(|(name, _)| name.as_str())
    }

    /// Tip category names in declaration order.
    #[must_use]
    pub fn tip_categories(&self) -> Vec<&str> {
        self.document.tips.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Message templates for `category`; empty when absent.
    #[must_use]
    pub fn message_templates(&self, category: &str) -> &[String] {
        lookup(&self.document.messages, category)
            .map(|(_, templates)| templates.as_slice())
            .unwrap_or_default()
    }

    /// Greeting templates (`messages.greetings`).
    #[must_use]
    pub fn greetings(&self) -> &[String] {
        self.message_templates(GREETINGS_CATEGORY)
    }

    /// Prompt category names in declaration order.
    #[must_use]
    pub fn prompt_categories(&self) -> Vec<&str> {
        self.document
            .prompts
            .iter()
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Every prompt, flattened in declaration order (category order, then
    /// prompt order within the category).
    pub fn prompt_definitions(&self) -> impl Iterator<Item = PromptEntry<'_>> {
        self.document.prompts.iter().flat_map(|(category, prompts)| {
            prompts.iter().map(move |(prompt_name, definition)| PromptEntry {
                category,
                prompt_name,
                definition,
            })
        })
    }

    /// Number of prompts in the document.
    #[must_use]
    pub fn prompt_count(&self) -> usize {
        self.document
            .prompts
            .iter()
            .map(|(_, prompts)| prompts.len())
            .sum()
    }
}

fn lookup<'a>(section: &'a StringSection, category: &str) -> Option<&'a (String, Vec<String>)> {
    section
        .iter()
        .find(|(name, _)| name == category)
        .or_else(|| {
            section
                .iter()
                .find(|(name, _)| name.eq_ignore_ascii_case(category))
        })
}
