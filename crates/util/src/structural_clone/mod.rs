//! Structural cloning of value graphs.
//!
//! Dates, regular expressions, arrays, sets, maps and records each get a
//! dedicated copy routine. Objects of an unknown class are copied descriptor
//! by descriptor onto a new instance of the same class. Functions are shared.

mod clone;
mod options;
mod registry;

pub use clone::{clone, clone_with, StructuralCloner};
pub use options::{CloneOptions, CloneStrategy};
pub use registry::VisitedRegistry;
