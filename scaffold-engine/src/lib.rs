//! # scaffold-engine
//!
//! Template materialization: pre-flight validation, path mapping, tree
//! materialization, and the staged (atomic) variant.
//!
//! Call [`pipeline::run`] to validate, scan and materialize in one step, or
//! use [`validate`] and [`materialize`] directly with an in-memory
//! [`TemplateTree`](scaffold_core::TemplateTree).

pub mod error;
pub mod materialize;
pub mod path_map;
pub mod pipeline;
pub mod staging;
pub mod validate;

pub use error::EngineError;
pub use materialize::{
    materialize, EntryResult, MaterializationReport, MaterializeOptions, ROOT_PATH,
};
pub use path_map::PathMapper;
pub use pipeline::{run, ScaffoldRequest, Staging};
pub use staging::{materialize_staged, staging_path};
pub use validate::validate;
