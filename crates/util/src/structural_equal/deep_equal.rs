use std::collections::HashSet;

use structural_value::{ArrayRef, Identity, MapRef, ObjectRef, SetRef, Value};
use tracing::trace;

/// Options for deep equality.
#[derive(Debug, Clone)]
pub struct EqualOptions {
    /// Record keys that always match, whatever they hold. Default is `["key"]`.
    pub excluded_keys: Vec<String>,
}

impl Default for EqualOptions {
    fn default() -> Self {
        Self {
            excluded_keys: vec!["key".to_string()],
        }
    }
}

impl EqualOptions {
    pub fn excluding<I, S>(keys: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            excluded_keys: keys.into_iter().map(Into::into).collect(),
        }
    }

    fn is_excluded(&self, key: &str) -> bool {
        self.excluded_keys.iter().any(|k| k == key)
    }
}

/// Performs a deep equality check, ignoring the `"key"` property of records.
///
/// Values of different tags are never equal. Arrays compare position by
/// position. Records compare their enumerable own properties. Sets and maps
/// compare entry by entry in insertion order, so two sets holding the same
/// members in a different order are not equal. Functions compare by identity,
/// dates by timestamp and regexes by their `/pattern/flags` form.
///
/// # Examples
///
/// ```
/// use structural_value::Value;
/// use structural_util::structural_equal::equal;
///
/// let a = Value::record([("key", Value::from(1)), ("val", Value::array([1, 2]))]);
/// let b = Value::record([("key", Value::from(99)), ("val", Value::array([1, 2]))]);
/// let c = Value::record([("key", Value::from(1)), ("val", Value::array([1, 3]))]);
///
/// assert!(equal(&a, &b));
/// assert!(!equal(&a, &c));
/// ```
pub fn equal(a: &Value, b: &Value) -> bool {
    equal_with(a, b, &EqualOptions::default())
}

/// Deep equality ignoring record keys listed in `excluded`.
pub fn equal_excluding<S: AsRef<str>>(a: &Value, b: &Value, excluded: &[S]) -> bool {
    let options = EqualOptions::excluding(excluded.iter().map(|k| k.as_ref().to_string()));
    equal_with(a, b, &options)
}

/// Deep equality with explicit options.
///
/// A composite that is mutably borrowed while being compared makes the
/// comparison fail.
pub fn equal_with(a: &Value, b: &Value, options: &EqualOptions) -> bool {
    Comparator {
        options,
        visited: HashSet::new(),
        held: Vec::new(),
    }
    .equal(a, b)
}

struct Comparator<'a> {
    options: &'a EqualOptions,
    /// Pairs of composites already entered. Every check is a conjunction, so
    /// a pair seen before has either matched or already decided the result.
    visited: HashSet<(Identity, Identity)>,
    /// The values behind `visited`, kept alive for the whole comparison so a
    /// recorded address always names the same composite.
    held: Vec<(Value, Value)>,
}

impl Comparator<'_> {
    fn equal(&mut self, a: &Value, b: &Value) -> bool {
        if a.tag() != b.tag() {
            return false;
        }
        match (a, b) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            (Value::Date(x), Value::Date(y)) => x.time() == y.time(),
            (Value::RegExp(x), Value::RegExp(y)) => x.to_string() == y.to_string(),
            (Value::Function(x), Value::Function(y)) => x.ptr_eq(y),
            _ => self.equal_composite(a, b),
        }
    }

    fn equal_composite(&mut self, a: &Value, b: &Value) -> bool {
        let pair = match (a.identity(), b.identity()) {
            (Some(x), Some(y)) => (x, y),
            _ => return false,
        };
        if !self.visited.insert(pair) {
            trace!(?pair, "pair already compared");
            return true;
        }
        self.held.push((a.clone(), b.clone()));
        match (a, b) {
            (Value::Array(x), Value::Array(y)) => self.equal_arrays(x, y),
            (Value::Set(x), Value::Set(y)) => self.equal_sets(x, y),
            (Value::Map(x), Value::Map(y)) => self.equal_maps(x, y),
            (Value::Object(x), Value::Object(y)) => {
                x.class() == y.class() && self.equal_objects(x, y)
            }
            _ => false,
        }
    }

    fn equal_arrays(&mut self, a: &ArrayRef, b: &ArrayRef) -> bool {
        let (Ok(xs), Ok(ys)) = (a.snapshot(), b.snapshot()) else {
            return false;
        };
        xs.len() == ys.len() && xs.iter().zip(&ys).all(|(x, y)| self.equal(x, y))
    }

    fn equal_sets(&mut self, a: &SetRef, b: &SetRef) -> bool {
        let (Ok(xs), Ok(ys)) = (a.members(), b.members()) else {
            return false;
        };
        // A set entry is (member, member), so one comparison covers both halves.
        xs.len() == ys.len() && xs.iter().zip(&ys).all(|(x, y)| self.equal(x, y))
    }

    fn equal_maps(&mut self, a: &MapRef, b: &MapRef) -> bool {
        let (Ok(xs), Ok(ys)) = (a.entries(), b.entries()) else {
            return false;
        };
        xs.len() == ys.len()
            && xs.iter().zip(&ys).all(|((xk, xv), (yk, yv))| {
                self.equal(xk.value(), yk.value()) && self.equal(xv, yv)
            })
    }

    fn equal_objects(&mut self, a: &ObjectRef, b: &ObjectRef) -> bool {
        let (Some(keys_a), Some(keys_b)) = (enumerable_keys(a), enumerable_keys(b)) else {
            return false;
        };
        if keys_a.len() != keys_b.len() {
            return false;
        }
        for key in &keys_a {
            if self.options.is_excluded(key) {
                continue;
            }
            let (Ok(x), Ok(y)) = (a.try_get(key), b.try_get(key)) else {
                return false;
            };
            if !self.equal(&x, &y) {
                return false;
            }
        }
        true
    }
}

fn enumerable_keys(object: &ObjectRef) -> Option<Vec<String>> {
    let descriptors = object.descriptors().ok()?;
    Some(
        descriptors
            .into_iter()
            .filter(|(_, d)| d.enumerable)
            .map(|(k, _)| k)
            .collect(),
    )
}
