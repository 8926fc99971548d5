//! Objects with own properties and an optional class.
//!
//! An object without a class is a plain record. An object with a class stands
//! in for an instance of some concrete type the caller knows nothing about:
//! the class is shared by reference and acts as the instance's prototype.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use indexmap::IndexMap;

use crate::error::ValueError;
use crate::function::FunctionRef;
use crate::identity::Identity;
use crate::value::Value;

struct ClassData {
    name: String,
}

/// Shared prototype of opaque objects. Compared by identity.
#[derive(Clone)]
pub struct Class(Rc<ClassData>);

impl Class {
    pub fn new(name: impl Into<String>) -> Self {
        Class(Rc::new(ClassData { name: name.into() }))
    }

    pub fn name(&self) -> &str {
        &self.0.name
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &Class) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl PartialEq for Class {
    fn eq(&self, other: &Self) -> bool {
        self.ptr_eq(other)
    }
}

impl Eq for Class {}

impl fmt::Debug for Class {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Class({} {:?})", self.0.name, self.identity())
    }
}

#[derive(Clone, Debug)]
pub enum PropertyKind {
    Data {
        value: Value,
        writable: bool,
    },
    Accessor {
        get: Option<FunctionRef>,
        set: Option<FunctionRef>,
    },
}

/// Full description of an own property.
#[derive(Clone, Debug)]
pub struct PropertyDescriptor {
    pub kind: PropertyKind,
    pub enumerable: bool,
    pub configurable: bool,
}

impl PropertyDescriptor {
    /// Writable, enumerable, configurable data property.
    pub fn data(value: impl Into<Value>) -> Self {
        Self {
            kind: PropertyKind::Data {
                value: value.into(),
                writable: true,
            },
            enumerable: true,
            configurable: true,
        }
    }

    /// Enumerable, configurable accessor property.
    pub fn accessor(get: Option<FunctionRef>, set: Option<FunctionRef>) -> Self {
        Self {
            kind: PropertyKind::Accessor { get, set },
            enumerable: true,
            configurable: true,
        }
    }

    /// No effect on accessor properties.
    pub fn writable(mut self, flag: bool) -> Self {
        if let PropertyKind::Data { writable, .. } = &mut self.kind {
            *writable = flag;
        }
        self
    }

    pub fn enumerable(mut self, flag: bool) -> Self {
        self.enumerable = flag;
        self
    }

    pub fn configurable(mut self, flag: bool) -> Self {
        self.configurable = flag;
        self
    }

    pub fn is_writable(&self) -> bool {
        matches!(self.kind, PropertyKind::Data { writable: true, .. })
    }

    pub fn is_accessor(&self) -> bool {
        matches!(self.kind, PropertyKind::Accessor { .. })
    }

    /// Stored value of a data property.
    pub fn value(&self) -> Option<&Value> {
        match &self.kind {
            PropertyKind::Data { value, .. } => Some(value),
            PropertyKind::Accessor { .. } => None,
        }
    }
}

struct ObjectData {
    class: Option<Class>,
    properties: RefCell<IndexMap<String, PropertyDescriptor>>,
}

/// Shared handle to an object.
#[derive(Clone)]
pub struct ObjectRef(Rc<ObjectData>);

impl Default for ObjectRef {
    fn default() -> Self {
        Self::record()
    }
}

impl ObjectRef {
    /// A new plain record.
    pub fn record() -> Self {
        Self::new(None)
    }

    pub fn with_class(class: Class) -> Self {
        Self::new(Some(class))
    }

    fn new(class: Option<Class>) -> Self {
        ObjectRef(Rc::new(ObjectData {
            class,
            properties: RefCell::new(IndexMap::new()),
        }))
    }

    pub fn class(&self) -> Option<&Class> {
        self.0.class.as_ref()
    }

    pub fn is_record(&self) -> bool {
        self.0.class.is_none()
    }

    /// Defines or replaces an own property, keeping its position if present.
    pub fn define(&self, key: impl Into<String>, descriptor: PropertyDescriptor) {
        self.0.properties.borrow_mut().insert(key.into(), descriptor);
    }

    pub fn descriptor(&self, key: &str) -> Option<PropertyDescriptor> {
        self.0.properties.borrow().get(key).cloned()
    }

    /// Assigns `value` to `key`.
    ///
    /// Missing keys become default data properties. Returns `false` when the
    /// property is read-only or an accessor without a setter.
    pub fn set(&self, key: &str, value: impl Into<Value>) -> bool {
        let value = value.into();
        let setter = {
            let mut properties = self.0.properties.borrow_mut();
            match properties.get_mut(key) {
                None => {
                    properties.insert(key.to_string(), PropertyDescriptor::data(value));
                    return true;
                }
                Some(PropertyDescriptor {
                    kind: PropertyKind::Data { value: slot, writable },
                    ..
                }) => {
                    if !*writable {
                        return false;
                    }
                    *slot = value;
                    return true;
                }
                Some(PropertyDescriptor {
                    kind: PropertyKind::Accessor { set, .. },
                    ..
                }) => set.clone(),
            }
        };
        match setter {
            Some(setter) => {
                setter.call(&Value::Object(self.clone()), &[value]);
                true
            }
            None => false,
        }
    }

    /// Reads `key`, invoking its getter for accessor properties.
    pub fn get(&self, key: &str) -> Value {
        let descriptor = self.0.properties.borrow().get(key).cloned();
        self.read(descriptor)
    }

    /// Like [`ObjectRef::get`] but fails instead of panicking when the
    /// property table is mutably borrowed.
    pub fn try_get(&self, key: &str) -> Result<Value, ValueError> {
        let descriptor = self.0.properties.try_borrow()?.get(key).cloned();
        Ok(self.read(descriptor))
    }

    fn read(&self, descriptor: Option<PropertyDescriptor>) -> Value {
        match descriptor.map(|d| d.kind) {
            None => Value::Undefined,
            Some(PropertyKind::Data { value, .. }) => value,
            Some(PropertyKind::Accessor { get: Some(getter), .. }) => {
                getter.call(&Value::Object(self.clone()), &[])
            }
            Some(PropertyKind::Accessor { get: None, .. }) => Value::Undefined,
        }
    }

    pub fn delete(&self, key: &str) -> bool {
        let mut properties = self.0.properties.borrow_mut();
        match properties.get(key) {
            Some(d) if !d.configurable => false,
            Some(_) => {
                properties.shift_remove(key);
                true
            }
            None => true,
        }
    }

    pub fn has_own(&self, key: &str) -> bool {
        self.0.properties.borrow().contains_key(key)
    }

    /// All own keys in definition order, enumerable or not.
    pub fn own_keys(&self) -> Vec<String> {
        self.0.properties.borrow().keys().cloned().collect()
    }

    pub fn try_own_keys(&self) -> Result<Vec<String>, ValueError> {
        Ok(self.0.properties.try_borrow()?.keys().cloned().collect())
    }

    pub fn enumerable_keys(&self) -> Vec<String> {
        self.0
            .properties
            .borrow()
            .iter()
            .filter(|(_, d)| d.enumerable)
            .map(|(k, _)| k.clone())
            .collect()
    }

    /// Copy of every own property descriptor in definition order.
    pub fn descriptors(&self) -> Result<Vec<(String, PropertyDescriptor)>, ValueError> {
        Ok(self
            .0
            .properties
            .try_borrow()?
            .iter()
            .map(|(k, d)| (k.clone(), d.clone()))
            .collect())
    }

    pub fn len(&self) -> usize {
        self.0.properties.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &ObjectRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for ObjectRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = f.debug_struct("Object");
        s.field("id", &self.identity());
        if let Some(class) = &self.0.class {
            s.field("class", &class.name());
        }
        match self.0.properties.try_borrow() {
            Ok(properties) => s.field("keys", &properties.keys().collect::<Vec<_>>()),
            Err(_) => s.field("keys", &"<borrowed>"),
        };
        s.finish()
    }
}
