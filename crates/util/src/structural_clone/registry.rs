use std::collections::HashMap;

use structural_value::{Identity, Value};

/// Originals already visited during one clone traversal, keyed by identity.
///
/// Each entry holds the original next to its clone. An original that only
/// the traversal owns (a getter result, say) therefore stays allocated until
/// [`VisitedRegistry::clear`], and its address cannot be handed to a later
/// value while the entry exists.
#[derive(Debug, Default)]
pub struct VisitedRegistry {
    clones: HashMap<Identity, (Value, Value)>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clone previously registered for `original`. Always `None` for primitives.
    pub fn get(&self, original: &Value) -> Option<Value> {
        original
            .identity()
            .and_then(|id| self.clones.get(&id))
            .map(|(_, copy)| copy.clone())
    }

    pub fn register(&mut self, original: &Value, clone: Value) {
        if let Some(id) = original.identity() {
            self.clones.insert(id, (original.clone(), clone));
        }
    }

    pub fn len(&self) -> usize {
        self.clones.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clones.is_empty()
    }

    pub fn clear(&mut self) {
        self.clones.clear();
    }
}
