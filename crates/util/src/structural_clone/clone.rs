use structural_value::{
    ArrayRef, MapRef, ObjectRef, PropertyDescriptor, PropertyKind, SetRef, Tag, Value,
};
use tracing::{debug, trace};

use super::options::{CloneOptions, CloneStrategy};
use super::registry::VisitedRegistry;
use crate::error::CloneError;

/// Creates a structural clone of `value` with default options.
///
/// Composite values are copied recursively. Functions are shared with the
/// original, primitives are returned as they are. A value reachable along
/// several paths is copied once, so cycles and shared references keep their
/// shape in the copy.
///
/// # Examples
///
/// ```
/// use structural_value::{ObjectRef, Value};
/// use structural_util::structural_clone::clone;
///
/// let node = ObjectRef::record();
/// node.set("self", node.clone());
///
/// let copy = clone(&Value::from(node.clone())).unwrap();
/// let copy_obj = copy.as_object().unwrap();
///
/// assert!(!copy_obj.ptr_eq(&node));
/// assert!(Value::same(&copy_obj.get("self"), &copy));
/// ```
pub fn clone(value: &Value) -> Result<Value, CloneError> {
    clone_with(value, &CloneOptions::default())
}

/// Creates a structural clone of `value` using `options`.
pub fn clone_with(value: &Value, options: &CloneOptions) -> Result<Value, CloneError> {
    StructuralCloner::new(options.clone()).clone_value(value)
}

/// Reusable cloner.
///
/// The visited registry lives for a single [`StructuralCloner::clone_value`]
/// call and is emptied before the call returns, whether it succeeded or not.
#[derive(Debug, Default)]
pub struct StructuralCloner {
    options: CloneOptions,
    registry: VisitedRegistry,
}

impl StructuralCloner {
    pub fn new(options: CloneOptions) -> Self {
        Self {
            options,
            registry: VisitedRegistry::new(),
        }
    }

    pub fn clone_value(&mut self, value: &Value) -> Result<Value, CloneError> {
        debug!(tag = %value.tag(), strategy = ?self.options.strategy, "structural clone started");
        let result = self.visit(value);
        debug!(
            copied = self.registry.len(),
            ok = result.is_ok(),
            "structural clone finished"
        );
        self.registry.clear();
        result
    }

    fn visit(&mut self, value: &Value) -> Result<Value, CloneError> {
        // Dates and regexes are rebuilt on every visit, before the registry
        // is consulted.
        match value {
            Value::Date(date) => return Ok(Value::Date(date.duplicate())),
            Value::RegExp(regexp) => return Ok(Value::RegExp(regexp.duplicate())),
            _ => {}
        }

        if let Some(copy) = self.registry.get(value) {
            trace!(tag = %value.tag(), "registry hit");
            return Ok(copy);
        }

        match value {
            Value::Array(array) => self.clone_array(value, array),
            Value::Set(set) => self.clone_set(value, set),
            Value::Map(map) => self.clone_map(value, map),
            Value::Object(object)
                if object.is_record() && self.options.strategy == CloneStrategy::TypeDispatch =>
            {
                self.clone_record(value, object)
            }
            Value::Object(object) => self.clone_descriptors(value, object),
            Value::Function(_)
            | Value::Undefined
            | Value::Null
            | Value::Bool(_)
            | Value::Number(_)
            | Value::String(_)
            | Value::Date(_)
            | Value::RegExp(_) => Ok(value.clone()),
        }
    }

    fn clone_array(&mut self, original: &Value, array: &ArrayRef) -> Result<Value, CloneError> {
        let items = array.snapshot().map_err(CloneError::enumerate(Tag::Array))?;
        let copy = ArrayRef::with_capacity(items.len());
        self.registry.register(original, Value::Array(copy.clone()));
        for item in &items {
            let item = self.visit(item)?;
            copy.push(item);
        }
        Ok(Value::Array(copy))
    }

    fn clone_set(&mut self, original: &Value, set: &SetRef) -> Result<Value, CloneError> {
        let members = set.members().map_err(CloneError::enumerate(Tag::Set))?;
        let copy = SetRef::new();
        self.registry.register(original, Value::Set(copy.clone()));
        for member in &members {
            let member = self.visit(member)?;
            copy.insert(member);
        }
        Ok(Value::Set(copy))
    }

    fn clone_map(&mut self, original: &Value, map: &MapRef) -> Result<Value, CloneError> {
        let entries = map.entries().map_err(CloneError::enumerate(Tag::Map))?;
        let copy = MapRef::new();
        self.registry.register(original, Value::Map(copy.clone()));
        for (key, value) in &entries {
            let value = self.visit(value)?;
            copy.insert(key.value().clone(), value);
        }
        Ok(Value::Map(copy))
    }

    fn clone_record(&mut self, original: &Value, object: &ObjectRef) -> Result<Value, CloneError> {
        let keys = object
            .try_own_keys()
            .map_err(CloneError::enumerate(Tag::Record))?;
        let copy = ObjectRef::record();
        self.registry.register(original, Value::Object(copy.clone()));
        for key in keys {
            let current = object
                .try_get(&key)
                .map_err(CloneError::enumerate(Tag::Record))?;
            let value = self.visit(&current)?;
            copy.define(key, PropertyDescriptor::data(value));
        }
        Ok(Value::Object(copy))
    }

    /// Copies every own descriptor onto a new object sharing the original's
    /// class. Only composite, non-function data values are recursed into.
    fn clone_descriptors(
        &mut self,
        original: &Value,
        object: &ObjectRef,
    ) -> Result<Value, CloneError> {
        let descriptors = object
            .descriptors()
            .map_err(CloneError::enumerate(original.tag()))?;
        let copy = match object.class() {
            Some(class) => ObjectRef::with_class(class.clone()),
            None => ObjectRef::record(),
        };
        trace!(class = ?object.class().map(|c| c.name()), keys = descriptors.len(), "descriptor clone");
        self.registry.register(original, Value::Object(copy.clone()));
        for (key, mut descriptor) in descriptors {
            if let PropertyKind::Data { value, .. } = &mut descriptor.kind {
                if value.is_object() && !value.is_function() {
                    *value = self.visit(value)?;
                }
            }
            copy.define(key, descriptor);
        }
        Ok(Value::Object(copy))
    }
}
