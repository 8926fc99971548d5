//! Deep equality over value graphs.

mod deep_equal;

pub use deep_equal::{equal, equal_excluding, equal_with, EqualOptions};
