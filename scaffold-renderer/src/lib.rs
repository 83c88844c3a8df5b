//! # scaffold-renderer
//!
//! Tera-based content renderer: turns a template file's bytes plus a
//! [`RenderContext`](scaffold_core::RenderContext) into destination bytes.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use scaffold_core::{RenderContext, RenderMode};
//! use scaffold_renderer::ContentRenderer;
//!
//! fn render_main(ctx: &RenderContext) {
//!     if let Ok(renderer) = ContentRenderer::new(ctx) {
//!         if let Ok(out) = renderer.render(b"package main // {{ .Name }}", RenderMode::Template) {
//!             println!("{}", String::from_utf8_lossy(&out));
//!         }
//!     }
//! }
//! ```

pub mod context;
pub mod engine;
pub mod error;

pub use engine::{normalize_placeholders, render, ContentRenderer};
pub use error::RenderError;
