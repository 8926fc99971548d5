//! structural-value - shared, identity-carrying dynamic values.
//!
//! This crate provides the value graph that `structural-util` clones and
//! compares: primitives plus reference-counted dates, regular expressions,
//! arrays, insertion-ordered maps and sets, objects with property descriptors,
//! and opaque functions.
//!
//! # Example
//!
//! ```
//! use structural_value::{Value, ObjectRef};
//!
//! let node = ObjectRef::record();
//! node.set("name", "root");
//! node.set("self", node.clone());
//!
//! let value = Value::from(node.clone());
//! assert!(Value::same(&node.get("self"), &value));
//! ```

pub mod collections;
pub mod date;
pub mod error;
pub mod function;
pub mod identity;
pub mod json;
pub mod key;
pub mod object;
pub mod regexp;
pub mod value;

pub use collections::{ArrayRef, MapRef, SetRef};
pub use date::DateRef;
pub use error::ValueError;
pub use function::FunctionRef;
pub use identity::Identity;
pub use key::Key;
pub use object::{Class, ObjectRef, PropertyDescriptor, PropertyKind};
pub use regexp::RegExpRef;
pub use value::{Tag, Value};
