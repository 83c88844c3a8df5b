//! Content rendering — [`ContentRenderer`] and the placeholder dialect.
//!
//! # Modes
//!
//! | Mode       | Output                                                        |
//! |------------|---------------------------------------------------------------|
//! | `Template` | input parsed by tera and expanded against the render context  |
//! | `Verbatim` | input bytes, unchanged                                        |
//!
//! # Placeholder dialect
//!
//! Templates may reference fields either as `{{ Name }}` (tera) or as
//! `{{ .Name }}`. The leading dot of the first token inside a `{{ ... }}`
//! block is stripped before tera parses the text, so both spellings resolve to
//! the same context variable. Unknown variables are always an error.
//!
//! Only `{{ ... }}` is live. Tera's `{% ... %}` and `{# ... #}` delimiters are
//! literal text, since source files use them for other things.

use std::borrow::Cow;

use tera::Tera;

use scaffold_core::{RenderContext, RenderMode};

use crate::context::to_tera_context;
use crate::error::RenderError;

// ---------------------------------------------------------------------------
// Dialect
// ---------------------------------------------------------------------------

/// Rewrite template text into the tera source that renders it.
///
/// `{{ .Field ... }}` becomes `{{ Field ... }}`, keeping whitespace control
/// (`{{-`) and surrounding spacing. `{{ ... }}` is the only live delimiter:
/// every `{%` and `{#` outside an action is emitted as a string literal so
/// shell (`${#arr[@]}`) and format (`{%d}`) text passes through unchanged.
/// Text with none of these delimiters is returned borrowed.
pub fn normalize_placeholders(input: &str) -> Cow<'_, str> {
    if !["{{", "{%", "{#"].iter().any(|d| input.contains(d)) {
        return Cow::Borrowed(input);
    }

    let mut out = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(brace) = rest.find('{') {
        out.push_str(&rest[..brace]);
        let tail = &rest[brace..];

        if let Some(action) = tail.strip_prefix("{{") {
            let Some(close) = action.find("}}") else {
                // Unterminated; tera reports the syntax error.
                out.push_str(tail);
                return Cow::Owned(out);
            };
            out.push_str("{{");
            out.push_str(&strip_field_dot(&action[..close]));
            out.push_str("}}");
            rest = &action[close + 2..];
        } else if tail.starts_with("{%") {
            out.push_str(r#"{{ "{%" }}"#);
            rest = &tail[2..];
        } else if tail.starts_with("{#") {
            out.push_str(r#"{{ "{#" }}"#);
            rest = &tail[2..];
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    Cow::Owned(out)
}

/// Drop the leading dot of the first token of an action body.
fn strip_field_dot(body: &str) -> String {
    let trim = usize::from(body.starts_with('-'));
    let after_trim = &body[trim..];
    let lead = trim + (after_trim.len() - after_trim.trim_start().len());

    let (head, token) = body.split_at(lead);
    match token.strip_prefix('.') {
        Some(field) if field.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_') => {
            format!("{head}{field}")
        }
        _ => body.to_owned(),
    }
}

// ---------------------------------------------------------------------------
// ContentRenderer
// ---------------------------------------------------------------------------

/// Turns template file bytes into destination bytes for one render context.
///
/// The tera context is built once in [`ContentRenderer::new`] and reused for
/// every file of a run. Rendering is a pure transform; callers own all I/O.
pub struct ContentRenderer {
    context: tera::Context,
}

impl ContentRenderer {
    /// Construct a renderer bound to `ctx`.
    pub fn new(ctx: &RenderContext) -> Result<Self, RenderError> {
        Ok(ContentRenderer {
            context: to_tera_context(ctx)?,
        })
    }

    /// Render `input` in the given `mode`.
    pub fn render(&self, input: &[u8], mode: RenderMode) -> Result<Vec<u8>, RenderError> {
        match mode {
            RenderMode::Verbatim => Ok(input.to_vec()),
            RenderMode::Template => {
                let text = std::str::from_utf8(input)?;
                let source = normalize_placeholders(text);
                let rendered = Tera::one_off(&source, &self.context, false)?;
                Ok(rendered.into_bytes())
            }
        }
    }
}

/// One-shot convenience: `render(fileBytes, context)` in `mode`.
pub fn render(input: &[u8], mode: RenderMode, ctx: &RenderContext) -> Result<Vec<u8>, RenderError> {
    ContentRenderer::new(ctx)?.render(input, mode)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
