//! Date objects.

use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

use crate::identity::Identity;

/// Shared handle to a mutable date object.
///
/// The date stores milliseconds since the Unix epoch. `NaN` marks an invalid
/// date, mirroring how scripting hosts represent `new Date("garbage")`.
#[derive(Clone)]
pub struct DateRef(Rc<Cell<f64>>);

impl DateRef {
    pub fn new(timestamp_ms: f64) -> Self {
        DateRef(Rc::new(Cell::new(timestamp_ms)))
    }

    pub fn invalid() -> Self {
        Self::new(f64::NAN)
    }

    pub fn time(&self) -> f64 {
        self.0.get()
    }

    pub fn set_time(&self, timestamp_ms: f64) {
        self.0.set(timestamp_ms);
    }

    pub fn is_valid(&self) -> bool {
        !self.time().is_nan()
    }

    /// A new, independent date with the same timestamp.
    pub fn duplicate(&self) -> Self {
        Self::new(self.time())
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &DateRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for DateRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Date")
            .field("id", &self.identity())
            .field("time", &self.time())
            .finish()
    }
}
