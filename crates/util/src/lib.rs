//! structural-util - structural clone and deep equality for value graphs
//!
//! This crate copies and compares the shared, identity-carrying values of
//! `structural-value`. Cloning preserves cycles and shared references;
//! equality compares by content with a configurable key-exclusion list.
//!
//! # Example
//!
//! ```
//! use structural_value::Value;
//! use structural_util::{clone, equal};
//!
//! let shared = Value::record([("v", 1)]);
//! let root = Value::record([("a", shared.clone()), ("b", shared)]);
//!
//! let copy = clone(&root).unwrap();
//! let copy_obj = copy.as_object().unwrap();
//!
//! assert!(Value::same(&copy_obj.get("a"), &copy_obj.get("b")));
//! assert!(!Value::same(&copy, &root));
//! assert!(equal(&copy, &root));
//! ```

pub mod error;
pub mod fuzzer;
pub mod structural_clone;
pub mod structural_equal;

// Re-exports for convenience
pub use error::CloneError;
pub use fuzzer::{Fuzzer, GraphOptions};
pub use structural_clone::{clone, clone_with, CloneOptions, CloneStrategy, StructuralCloner};
pub use structural_equal::{equal, equal_excluding, equal_with, EqualOptions};
