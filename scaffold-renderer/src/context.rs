//! Conversion of a [`RenderContext`] into the tera rendering payload.

use scaffold_core::RenderContext;

use crate::error::RenderError;

/// Convert to a [`tera::Context`] for rendering.
///
/// Every variable becomes a top-level string, so `{{ Name }}` (or the dotted
/// `{{ .Name }}`) resolves directly.
pub fn to_tera_context(ctx: &RenderContext) -> Result<tera::Context, RenderError> {
    let value = serde_json::to_value(ctx)?;
    Ok(tera::Context::from_value(value)?)
}
