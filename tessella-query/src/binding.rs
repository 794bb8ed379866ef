//! The per-query variable-to-value tuple.
//!
//! A `Binding` is one row of the result relation in progress: a dense slot
//! per variable, each holding an `ObjectId` (`NULL` when unbound). Exactly
//! one binding is threaded through the iterator tree per active
//! enumeration; iterators mutate it in place as they enumerate.

use tessella_core::ObjectId;

use crate::var_registry::VarId;

/// Indexed mapping from variable id to `ObjectId`, all-NULL at creation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Binding {
    slots: Vec<ObjectId>,
}

impl Binding {
    /// Create a binding with `var_size` slots, all NULL.
    pub fn new(var_size: usize) -> Self {
        Self { slots: vec![ObjectId::NULL; var_size] }
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Read a variable's value.
    ///
    /// # Panics
    ///
    /// Panics if the id is outside the binding (indicates a planner bug).
    #[inline]
    pub fn get(&self, var: VarId) -> ObjectId {
        self.slots[var.index()]
    }

    /// Write a variable's value.
    ///
    /// # Panics
    ///
    /// Panics if the id is outside the binding (indicates a planner bug).
    #[inline]
    pub fn set(&mut self, var: VarId, value: ObjectId) {
        self.slots[var.index()] = value;
    }

    /// Set a variable back to NULL.
    #[inline]
    pub fn set_null(&mut self, var: VarId) {
        self.slots[var.index()] = ObjectId::NULL;
    }

    /// Set every slot to NULL.
    pub fn clear(&mut self) {
        self.slots.fill(ObjectId::NULL);
    }
}
