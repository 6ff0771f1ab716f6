//! Application layer: export and rendering
//!
//! This layer turns built trees into text, JSON and DOT, and owns file output.

pub mod error;
pub mod error_ext;
pub mod export;
pub mod graphviz;
mod ordering;
pub mod render;

pub use error::{ApplicationError, ApplicationResult};
pub use error_ext::IoResultExt;
pub use export::DictOptions;
pub use graphviz::{GraphType, GraphvizOptions};
pub use render::{LineStyle, ShowOptions};
