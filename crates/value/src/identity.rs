use std::fmt;
use std::rc::Rc;

/// Runtime identity of a composite value.
///
/// Derived from the address of the shared allocation, so two handles have the
/// same identity exactly when they point at the same value. An `Identity` does
/// not keep the value alive; it is only meaningful while the value is.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Identity(usize);

impl Identity {
    pub(crate) fn of<T: ?Sized>(rc: &Rc<T>) -> Self {
        Identity(Rc::as_ptr(rc) as *const () as usize)
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:x}", self.0)
    }
}
