//! Error types for scaffold-renderer.

use thiserror::Error;

/// All errors that can arise while turning template bytes into output bytes.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The template references a variable the render context does not define.
    #[error("undefined template variable '{name}'")]
    UndefinedVariable { name: String },

    /// Template-mode input must be UTF-8; binary files belong in verbatim mode.
    #[error("template is not valid UTF-8 (declare the file verbatim): {0}")]
    NotUtf8(#[from] std::str::Utf8Error),

    /// Any other tera failure (syntax error, bad filter, ...).
    #[error("template engine error: {message}")]
    Template {
        message: String,
        #[source]
        source: tera::Error,
    },

    /// JSON serialization error (building tera context).
    #[error("context serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<tera::Error> for RenderError {
    /// Classify a tera error, lifting missing-variable failures out of the
    /// error chain into [`RenderError::UndefinedVariable`].
    fn from(source: tera::Error) -> Self {
        let mut messages = Vec::new();
        let mut current: Option<&(dyn std::error::Error + 'static)> = Some(&source);
        while let Some(err) = current {
            let text = err.to_string();
            if let Some(name) = undefined_variable_name(&text) {
                return RenderError::UndefinedVariable { name };
            }
            messages.push(text);
            current = err.source();
        }
        RenderError::Template {
            message: messages.join(": "),
            source,
        }
    }
}

/// Extract `X` from tera's "Variable `X` not found in context ..." message.
fn undefined_variable_name(message: &str) -> Option<String> {
    if !message.contains("not found in context") {
        return None;
    }
    let start = message.find("Variable `")? + "Variable `".len();
    let len = message[start..].find('`')?;
    Some(message[start..start + len].to_string())
}
