use std::hash::{Hash, Hasher};

use crate::value::Value;

/// A map key or set member.
///
/// Hashes and compares with SameValueZero semantics: primitives by value
/// (`NaN` equals `NaN`, `-0` equals `+0`), composites by identity.
#[derive(Clone, Debug)]
pub struct Key(Value);

impl Key {
    pub fn new(value: impl Into<Value>) -> Self {
        Key(value.into())
    }

    pub fn value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }
}

impl From<Value> for Key {
    fn from(value: Value) -> Self {
        Key(value)
    }
}

fn canonical_bits(n: f64) -> u64 {
    if n.is_nan() {
        f64::NAN.to_bits()
    } else if n == 0.0 {
        0
    } else {
        n.to_bits()
    }
}

impl PartialEq for Key {
    fn eq(&self, other: &Self) -> bool {
        match (&self.0, &other.0) {
            (Value::Number(a), Value::Number(b)) => canonical_bits(*a) == canonical_bits(*b),
            (a, b) => Value::same(a, b),
        }
    }
}

impl Eq for Key {}

impl Hash for Key {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.tag().hash(state);
        match &self.0 {
            Value::Undefined | Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::Number(n) => canonical_bits(*n).hash(state),
            Value::String(s) => s.hash(state),
            other => other.identity().hash(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collections::ArrayRef;
    use std::collections::HashSet;

    #[test]
    fn test_nan_is_one_key() {
        let mut set = HashSet::new();
        set.insert(Key::new(f64::NAN));
        set.insert(Key::new(f64::NAN));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_signed_zeros_collapse() {
        assert_eq!(Key::new(0.0), Key::new(-0.0));
    }

    #[test]
    fn test_strings_by_content() {
        assert_eq!(Key::new("a"), Key::new(String::from("a")));
        assert_ne!(Key::new("a"), Key::new("b"));
    }

    #[test]
    fn test_number_and_string_differ() {
        assert_ne!(Key::new(1.0), Key::new("1"));
    }

    #[test]
    fn test_composites_by_identity() {
        let a = ArrayRef::new();
        let b = ArrayRef::new();
        assert_eq!(Key::new(a.clone()), Key::new(a));
        assert_ne!(Key::new(ArrayRef::new()), Key::new(b));
    }
}
