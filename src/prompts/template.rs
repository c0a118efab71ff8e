//! `{placeholder}` templates.
//!
//! A placeholder is `{identifier}`. `{{` and `}}` render as literal braces;
//! any other brace is copied through unchanged.

use crate::content::schema::is_identifier;
use crate::errors::PromptError;

/// A lexical piece of a template.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text copied to the output.
    Text(&'a str),
    /// Placeholder name without braces.
    Placeholder(&'a str),
}

/// Split `template` into literal text and placeholders.
#[must_use]
pub fn segments(template: &str) -> Vec<Segment<'_>> {
    let mut out = Vec::new();
    let mut rest = template;

    while let Some(pos) = rest.find(['{', '}']) {
        let (head, tail) = rest.split_at(pos);
        if !head.is_empty() {
            out.push(Segment::Text(head));
        }

        if tail.starts_with("{{") || tail.starts_with("}}") {
            out.push(Segment::Text(&tail[..1]));
            rest = &tail[2..];
            continue;
        }

        if tail.starts_with('{') {
            if let Some(end) = tail[1..].find('}') {
                let name = &tail[1..=end];
                if is_identifier(name) {
                    out.push(Segment::Placeholder(name));
                    rest = &tail[end + 2..];
                    continue;
                }
            }
        }

        out.push(Segment::Text(&tail[..1]));
        rest = &tail[1..];
    }

    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    out
}

/// Distinct placeholder names in order of first appearance.
#[must_use]
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names: Vec<&str> = Vec::new();
    for segment in segments(template) {
        if let Segment::Placeholder(name) = segment {
            if !names.contains(&name) {
                names.push(name);
            }
        }
    }
    names
}

/// Substitute every placeholder with the value returned by `lookup`.
///
/// # Errors
///
/// Returns [`PromptError::TemplateRender`] for the first placeholder
/// `lookup` cannot resolve. No partial output is produced.
pub fn render<F>(template: &str, lookup: F) -> Result<String, PromptError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut out = String::with_capacity(template.len());
    for segment in segments(template) {
        match segment {
            Segment::Text(text) => out.push_str(text),
            Segment::Placeholder(name) => {
                let value = lookup(name).ok_or_else(|| PromptError::TemplateRender {
                    placeholder: name.to_owned(),
                })?;
                out.push_str(&value);
            }
        }
    }
    Ok(out)
}
