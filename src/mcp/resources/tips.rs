//! `tips://` MCP resources.
//!
//! `tips://mcp` renders the default tip category; the
//! `tips://category/{category}` template renders any category together
//! with the names of the others.

use rmcp::model::{
    Annotated, ListResourceTemplatesResult, ListResourcesResult, RawResource, RawResourceTemplate,
    ReadResourceRequestParam, ReadResourceResult, ResourceContents,
};

use crate::content::ContentStore;
use crate::{AppError, Result};

/// URI of the default-category resource.
pub const DEFAULT_TIPS_URI: &str = "tips://mcp";

/// Prefix of per-category resource URIs.
pub const CATEGORY_URI_PREFIX: &str = "tips://category/";

/// URI template advertised for per-category resources.
pub const CATEGORY_URI_TEMPLATE: &str = "tips://category/{category}";

const MIME_TYPE: &str = "text/plain";

/// Parsed `tips://` URI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TipsUri<'a> {
    /// `tips://mcp`.
    Default,
    /// `tips://category/<name>`.
    Category(&'a str),
}

/// Parse a `tips://` URI; `None` for anything else.
///
/// ```
/// use content_mcp::mcp::resources::tips::{parse_uri, TipsUri};
///
/// assert_eq!(parse_uri("tips://category/python"), Some(TipsUri::Category("python")));
/// assert_eq!(parse_uri("tips://mcp"), Some(TipsUri::Default));
/// assert_eq!(parse_uri("file:///etc/hosts"), None);
/// ```
#[must_use]
pub fn parse_uri(uri: &str) -> Option<TipsUri<'_>> {
    if uri == DEFAULT_TIPS_URI {
        return Some(TipsUri::Default);
    }
    uri.strip_prefix(CATEGORY_URI_PREFIX)
        .filter(|category| !category.is_empty() && !category.contains('/'))
        .map(TipsUri::Category)
}

fn numbered(header: &str, tips: &[String]) -> String {
    let mut text = format!("{header}\n\n");
    for (position, tip) in tips.iter().enumerate() {
        text.push_str(&format!("{}. {tip}\n", position + 1));
    }
    text
}

/// Render the default category: `"<CATEGORY> Tips:\n\n1. …\n"`.
#[must_use]
pub fn format_default_tips(store: &ContentStore) -> String {
    let category = store.default_tip_category();
    numbered(
        &format!("{} Tips:", category.to_uppercase()),
        store.tips(None),
    )
}

/// Render one category followed by the list of the other categories.
///
/// Unknown categories render a not-found notice listing every category.
#[must_use]
pub fn format_category_tips(store: &ContentStore, category: &str) -> String {
    let Some(canonical) = store.resolve_tip_category(category) else {
        return format!(
            "Category '{category}' not found.\n\nAvailable categories: {}",
            store.tip_categories().join(", ")
        );
    };

    let mut text = numbered(
        &format!("{} Learning Tips:", category.to_uppercase()),
        store.tips(Some(canonical)),
    );
    let others: Vec<&str> = store
        .tip_categories()
        .into_iter()
        .filter(|name| *name != canonical)
        .collect();
    text.push_str(&format!("\nOther available categories: {}", others.join(", ")));
    text
}

/// Concrete resources: `tips://mcp` plus one URI per tip category.
#[must_use]
pub fn list_resources(store: &ContentStore) -> ListResourcesResult {
    let mut default = RawResource::new(DEFAULT_TIPS_URI, "MCP Tips");
    default.description = Some("Learning tips for the default category".into());
    default.mime_type = Some(MIME_TYPE.into());

    let mut resources = vec![Annotated::new(default, None)];
    for category in store.tip_categories() {
        let mut resource = RawResource::new(
            format!("{CATEGORY_URI_PREFIX}{category}"),
            format!("{category} tips"),
        );
        resource.description = Some(format!("Learning tips for the '{category}' category"));
        resource.mime_type = Some(MIME_TYPE.into());
        resources.push(Annotated::new(resource, None));
    }

    ListResourcesResult::with_all_items(resources)
}

/// The single `tips://category/{category}` template.
#[must_use]
pub fn resource_templates() -> ListResourceTemplatesResult {
    let template = Annotated::new(
        RawResourceTemplate {
            uri_template: CATEGORY_URI_TEMPLATE.into(),
            name: "Tips by category".into(),
            title: None,
            description: Some("Learning tips for a specific category".into()),
            mime_type: Some(MIME_TYPE.into()),
            icons: None,
        },
        None,
    );

    ListResourceTemplatesResult::with_all_items(vec![template])
}

/// Handle `resources/read` for `tips://` URIs.
///
/// # Errors
///
/// Returns `AppError::NotFound` for URIs outside the `tips://` scheme.
pub fn read_resource(
    request: &ReadResourceRequestParam,
    store: &ContentStore,
) -> Result<ReadResourceResult> {
    let text = match parse_uri(&request.uri) {
        Some(TipsUri::Default) => format_default_tips(store),
        Some(TipsUri::Category(category)) => format_category_tips(store, category),
        None => return Err(AppError::NotFound(format!("resource '{}'", request.uri))),
    };

    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(text, request.uri.clone())],
    })
}
