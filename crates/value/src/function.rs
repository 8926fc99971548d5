//! Opaque callables.

use std::fmt;
use std::rc::Rc;

use crate::identity::Identity;
use crate::value::Value;

type Callable = dyn Fn(&Value, &[Value]) -> Value;

struct FunctionData {
    name: String,
    call: Box<Callable>,
}

/// Shared handle to a host function.
///
/// Functions are opaque: they are never copied, and two function values are
/// the same function only when they share an identity.
#[derive(Clone)]
pub struct FunctionRef(Rc<FunctionData>);

impl FunctionRef {
    pub fn new<F>(name: impl Into<String>, call: F) -> Self
    where
        F: Fn(&Value, &[Value]) -> Value + 'static,
    {
        FunctionRef(Rc::new(FunctionData {
            name: name.into(),
            call: Box::new(call),
        }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    /// Invokes the function with `this` bound to `this`.
    pub fn call(&self, this: &Value, args: &[Value]) -> Value {
        (self.0.call)(this, args)
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &FunctionRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for FunctionRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("id", &self.identity())
            .field("name", &self.0.name)
            .finish()
    }
}
