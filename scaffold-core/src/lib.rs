//! Scaffold core library — domain types, template tree, render policy, errors.
//!
//! - [`types`] — newtypes, render context, materialization target
//! - [`tree`] — [`TemplateTree`] and on-disk scanning
//! - [`policy`] — [`RenderPolicy`] load / defaults
//! - [`error`] — [`CoreError`]

pub mod error;
pub mod policy;
pub mod tree;
pub mod types;

pub use error::CoreError;
pub use policy::RenderPolicy;
pub use tree::{TemplateEntry, TemplateTree};
pub use types::{MaterializationTarget, ProjectName, RenderContext, RenderMode};
