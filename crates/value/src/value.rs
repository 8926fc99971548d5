use std::fmt;
use std::rc::Rc;

use crate::collections::{ArrayRef, MapRef, SetRef};
use crate::date::DateRef;
use crate::error::ValueError;
use crate::function::FunctionRef;
use crate::identity::Identity;
use crate::object::{Class, ObjectRef};
use crate::regexp::RegExpRef;

/// Semantic category of a value.
///
/// Every value maps to exactly one tag. Objects carrying a [`Class`] are
/// `Opaque`: their concrete type is not known to this crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    Undefined,
    Null,
    Boolean,
    Number,
    String,
    Date,
    RegExp,
    Array,
    Map,
    Set,
    Record,
    Function,
    Opaque,
}

impl Tag {
    pub fn as_str(self) -> &'static str {
        match self {
            Tag::Undefined => "undefined",
            Tag::Null => "null",
            Tag::Boolean => "boolean",
            Tag::Number => "number",
            Tag::String => "string",
            Tag::Date => "date",
            Tag::RegExp => "regexp",
            Tag::Array => "array",
            Tag::Map => "map",
            Tag::Set => "set",
            Tag::Record => "record",
            Tag::Function => "function",
            Tag::Opaque => "opaque",
        }
    }

    pub fn is_primitive(self) -> bool {
        matches!(
            self,
            Tag::Undefined | Tag::Null | Tag::Boolean | Tag::Number | Tag::String
        )
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A dynamically-typed value.
///
/// Primitives are held inline. Everything else is a shared handle: cloning a
/// `Value` copies the handle, not the thing it points at, so the result has
/// the same [`Identity`].
#[derive(Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    String(Rc<str>),
    Date(DateRef),
    RegExp(RegExpRef),
    Array(ArrayRef),
    Map(MapRef),
    Set(SetRef),
    Object(ObjectRef),
    Function(FunctionRef),
}

impl Value {
    pub fn tag(&self) -> Tag {
        match self {
            Value::Undefined => Tag::Undefined,
            Value::Null => Tag::Null,
            Value::Bool(_) => Tag::Boolean,
            Value::Number(_) => Tag::Number,
            Value::String(_) => Tag::String,
            Value::Date(_) => Tag::Date,
            Value::RegExp(_) => Tag::RegExp,
            Value::Array(_) => Tag::Array,
            Value::Map(_) => Tag::Map,
            Value::Set(_) => Tag::Set,
            Value::Object(o) if o.is_record() => Tag::Record,
            Value::Object(_) => Tag::Opaque,
            Value::Function(_) => Tag::Function,
        }
    }

    /// Identity of a composite value; `None` for primitives.
    pub fn identity(&self) -> Option<Identity> {
        match self {
            Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_) => None,
            Value::Date(d) => Some(d.identity()),
            Value::RegExp(r) => Some(r.identity()),
            Value::Array(a) => Some(a.identity()),
            Value::Map(m) => Some(m.identity()),
            Value::Set(s) => Some(s.identity()),
            Value::Object(o) => Some(o.identity()),
            Value::Function(f) => Some(f.identity()),
        }
    }

    /// Strict identity: primitives by value (`NaN` is never the same as
    /// itself, `-0` is the same as `+0`), composites by identity.
    pub fn same(a: &Value, b: &Value) -> bool {
        match (a, b) {
            (Value::Undefined, Value::Undefined) | (Value::Null, Value::Null) => true,
            (Value::Bool(x), Value::Bool(y)) => x == y,
            (Value::Number(x), Value::Number(y)) => x == y,
            (Value::String(x), Value::String(y)) => x == y,
            _ => match (a.identity(), b.identity()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            },
        }
    }

    pub fn is_primitive(&self) -> bool {
        self.tag().is_primitive()
    }

    /// Anything with an identity, functions included.
    pub fn is_object(&self) -> bool {
        !self.is_primitive()
    }

    pub fn is_function(&self) -> bool {
        matches!(self, Value::Function(_))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(&**s),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateRef> {
        match self {
            Value::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_regexp(&self) -> Option<&RegExpRef> {
        match self {
            Value::RegExp(r) => Some(r),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&ArrayRef> {
        match self {
            Value::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&MapRef> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn as_set(&self) -> Option<&SetRef> {
        match self {
            Value::Set(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectRef> {
        match self {
            Value::Object(o) => Some(o),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunctionRef> {
        match self {
            Value::Function(f) => Some(f),
            _ => None,
        }
    }

    pub fn date(timestamp_ms: f64) -> Value {
        Value::Date(DateRef::new(timestamp_ms))
    }

    pub fn regexp(pattern: &str, flags: &str) -> Result<Value, ValueError> {
        Ok(Value::RegExp(RegExpRef::new(pattern, flags)?))
    }

    pub fn array<I, V>(items: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        Value::Array(ArrayRef::from_vec(items.into_iter().map(Into::into).collect()))
    }

    pub fn set<I, V>(members: I) -> Value
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        let set = SetRef::new();
        for member in members {
            set.insert(member);
        }
        Value::Set(set)
    }

    pub fn map<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<Value>,
        V: Into<Value>,
    {
        let map = MapRef::new();
        for (key, value) in entries {
            map.insert(key, value);
        }
        Value::Map(map)
    }

    /// A plain record with default data properties.
    pub fn record<I, K, V>(entries: I) -> Value
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<Value>,
    {
        let object = ObjectRef::record();
        for (key, value) in entries {
            object.set(key.as_ref(), value);
        }
        Value::Object(object)
    }

    /// An empty object of class `class`.
    pub fn instance(class: &Class) -> Value {
        Value::Object(ObjectRef::with_class(class.clone()))
    }
}

impl fmt::Debug for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Undefined => f.write_str("undefined"),
            Value::Null => f.write_str("null"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Number(n) => write!(f, "{n}"),
            Value::String(s) => write!(f, "{s:?}"),
            Value::Date(d) => fmt::Debug::fmt(d, f),
            Value::RegExp(r) => fmt::Debug::fmt(r, f),
            Value::Array(a) => fmt::Debug::fmt(a, f),
            Value::Map(m) => fmt::Debug::fmt(m, f),
            Value::Set(s) => fmt::Debug::fmt(s, f),
            Value::Object(o) => fmt::Debug::fmt(o, f),
            Value::Function(func) => fmt::Debug::fmt(func, f),
        }
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Number(n.into())
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.into())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s.into())
    }
}

impl From<DateRef> for Value {
    fn from(d: DateRef) -> Self {
        Value::Date(d)
    }
}

impl From<RegExpRef> for Value {
    fn from(r: RegExpRef) -> Self {
        Value::RegExp(r)
    }
}

impl From<ArrayRef> for Value {
    fn from(a: ArrayRef) -> Self {
        Value::Array(a)
    }
}

impl From<MapRef> for Value {
    fn from(m: MapRef) -> Self {
        Value::Map(m)
    }
}

impl From<SetRef> for Value {
    fn from(s: SetRef) -> Self {
        Value::Set(s)
    }
}

impl From<ObjectRef> for Value {
    fn from(o: ObjectRef) -> Self {
        Value::Object(o)
    }
}

impl From<FunctionRef> for Value {
    fn from(f: FunctionRef) -> Self {
        Value::Function(f)
    }
}
