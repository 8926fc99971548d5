//! Arrays, maps and sets.
//!
//! Each handle is a cheap, reference-counted pointer to interior-mutable
//! storage. `snapshot`/`entries`/`members` copy the current contents out (the
//! elements themselves are shared, not deep-copied) and fail instead of
//! panicking when the storage is mutably borrowed.

use std::cell::{Ref, RefCell, RefMut};
use std::fmt;
use std::rc::Rc;

use indexmap::{IndexMap, IndexSet};

use crate::error::ValueError;
use crate::identity::Identity;
use crate::key::Key;
use crate::value::Value;

/// Shared handle to an ordered list.
#[derive(Clone, Default)]
pub struct ArrayRef(Rc<RefCell<Vec<Value>>>);

impl ArrayRef {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        ArrayRef(Rc::new(RefCell::new(Vec::with_capacity(capacity))))
    }

    pub fn from_vec(items: Vec<Value>) -> Self {
        ArrayRef(Rc::new(RefCell::new(items)))
    }

    pub fn push(&self, value: impl Into<Value>) {
        self.0.borrow_mut().push(value.into());
    }

    /// Element at `index`, or `Undefined` past the end.
    pub fn get(&self, index: usize) -> Value {
        self.0.borrow().get(index).cloned().unwrap_or_default()
    }

    /// Writes `value` at `index`, padding holes with `Undefined`.
    pub fn set(&self, index: usize, value: impl Into<Value>) {
        let mut items = self.0.borrow_mut();
        if index >= items.len() {
            items.resize(index + 1, Value::Undefined);
        }
        items[index] = value.into();
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn borrow(&self) -> Ref<'_, Vec<Value>> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, Vec<Value>> {
        self.0.borrow_mut()
    }

    pub fn snapshot(&self) -> Result<Vec<Value>, ValueError> {
        Ok(self.0.try_borrow()?.clone())
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &ArrayRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared handle to an insertion-ordered map.
#[derive(Clone, Default)]
pub struct MapRef(Rc<RefCell<IndexMap<Key, Value>>>);

impl MapRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or overwrites. Overwriting keeps the key's original position.
    pub fn insert(&self, key: impl Into<Value>, value: impl Into<Value>) {
        self.0
            .borrow_mut()
            .insert(Key::new(key), value.into());
    }

    pub fn get(&self, key: &Value) -> Option<Value> {
        self.0.borrow().get(&Key::new(key.clone())).cloned()
    }

    pub fn contains_key(&self, key: &Value) -> bool {
        self.0.borrow().contains_key(&Key::new(key.clone()))
    }

    /// Removes `key`, preserving the order of the remaining entries.
    pub fn remove(&self, key: &Value) -> Option<Value> {
        self.0.borrow_mut().shift_remove(&Key::new(key.clone()))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn entries(&self) -> Result<Vec<(Key, Value)>, ValueError> {
        Ok(self
            .0
            .try_borrow()?
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &MapRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

/// Shared handle to an insertion-ordered set.
#[derive(Clone, Default)]
pub struct SetRef(Rc<RefCell<IndexSet<Key>>>);

impl SetRef {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `value`; returns `false` when an equal member is already present.
    pub fn insert(&self, value: impl Into<Value>) -> bool {
        self.0.borrow_mut().insert(Key::new(value))
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.0.borrow().contains(&Key::new(value.clone()))
    }

    pub fn remove(&self, value: &Value) -> bool {
        self.0.borrow_mut().shift_remove(&Key::new(value.clone()))
    }

    pub fn len(&self) -> usize {
        self.0.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn members(&self) -> Result<Vec<Value>, ValueError> {
        Ok(self
            .0
            .try_borrow()?
            .iter()
            .map(|k| k.value().clone())
            .collect())
    }

    pub fn identity(&self) -> Identity {
        Identity::of(&self.0)
    }

    pub fn ptr_eq(&self, other: &SetRef) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

fn debug_len(f: &mut fmt::Formatter<'_>, name: &str, id: Identity, len: Option<usize>) -> fmt::Result {
    let mut s = f.debug_struct(name);
    s.field("id", &id);
    match len {
        Some(len) => s.field("len", &len),
        None => s.field("len", &"<borrowed>"),
    };
    s.finish()
}

impl fmt::Debug for ArrayRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_len(f, "Array", self.identity(), self.0.try_borrow().ok().map(|v| v.len()))
    }
}

impl fmt::Debug for MapRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_len(f, "Map", self.identity(), self.0.try_borrow().ok().map(|v| v.len()))
    }
}

impl fmt::Debug for SetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        debug_len(f, "Set", self.identity(), self.0.try_borrow().ok().map(|v| v.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_array_set_pads_with_undefined() {
        let arr = ArrayRef::new();
        arr.set(2, 7.0);
        assert_eq!(arr.len(), 3);
        assert!(arr.get(0).is_undefined());
        assert_eq!(arr.get(2).as_number(), Some(7.0));
        assert!(arr.get(10).is_undefined());
    }

    #[test]
    fn test_array_snapshot_fails_while_mutably_borrowed() {
        let arr = ArrayRef::from_vec(vec![Value::from(1.0)]);
        let inner = arr.clone();
        let _guard = inner.0.borrow_mut();
        assert!(matches!(arr.snapshot(), Err(ValueError::Borrow(_))));
    }

    #[test]
    fn test_map_keeps_insertion_order_on_overwrite() {
        let map = MapRef::new();
        map.insert("b", 1.0);
        map.insert("a", 2.0);
        map.insert("b", 3.0);
        let keys: Vec<_> = map
            .entries()
            .unwrap()
            .into_iter()
            .map(|(k, _)| k.into_value().as_str().map(str::to_string))
            .collect();
        assert_eq!(keys, vec![Some("b".to_string()), Some("a".to_string())]);
        assert_eq!(map.get(&Value::from("b")).and_then(|v| v.as_number()), Some(3.0));
    }

    #[test]
    fn test_map_remove_preserves_order() {
        let map = MapRef::new();
        map.insert(1.0, "one");
        map.insert(2.0, "two");
        map.insert(3.0, "three");
        assert!(map.remove(&Value::from(2.0)).is_some());
        let keys: Vec<_> = map
            .entries()
            .unwrap()
            .into_iter()
            .filter_map(|(k, _)| k.value().as_number())
            .collect();
        assert_eq!(keys, vec![1.0, 3.0]);
    }

    #[test]
    fn test_set_deduplicates() {
        let set = SetRef::new();
        assert!(set.insert(1.0));
        assert!(!set.insert(1.0));
        assert!(set.insert("1"));
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Value::from(1.0)));
    }

    #[test]
    fn test_set_members_in_insertion_order() {
        let set = SetRef::new();
        for n in [3.0, 1.0, 2.0] {
            set.insert(n);
        }
        let members: Vec<_> = set
            .members()
            .unwrap()
            .iter()
            .filter_map(Value::as_number)
            .collect();
        assert_eq!(members, vec![3.0, 1.0, 2.0]);
    }
}
