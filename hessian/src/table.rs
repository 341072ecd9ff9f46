//! Registry of the maps and lists already written in an encoding session.

use crate::Value;
use std::collections::HashMap;


/// Outcome of [`ObjectTable::track`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Tracked {
    /// The object was already written, at this position of the table.
    Existing(usize),
    /// The object is new and was appended at this position of the table.
    New(usize),
}

/// Ordered registry of the maps and lists written in the current session.
///
/// Objects are identified by their storage, not by their contents: two maps with equal entries
/// are distinct objects, while two clones of the same [`Map`] handle are the same object. An
/// object is appended when its write starts, before any of its children, so that children
/// referring back to it (including the object itself) resolve to its position.
///
/// The table holds a handle to every object it tracks. This keeps their storage alive for the
/// whole session, so an identity can never be reused by a different object.
///
/// [`Map`]: crate::Map
#[derive(Debug, Default)]
pub struct ObjectTable {
    objects: Vec<Value>,
    positions: HashMap<usize, usize>,
}

impl ObjectTable {
    /// Creates an empty [`ObjectTable`].
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the position of the object, if it has been written.
    ///
    /// Annotated values are looked up by their payload. Values other than maps and lists are
    /// never tracked.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use hessian::{Encoder, Map, Value};
    ///
    /// let map = Value::from(Map::new());
    /// let mut encoder = Encoder::new();
    /// encoder.write(&map).expect("should encode the map");
    /// assert_eq!(encoder.table().position(&map), Some(0));
    /// assert_eq!(encoder.table().position(&Value::from(Map::new())), None);
    /// ```
    pub fn position(&self, value: &Value) -> Option<usize> {
        identity(value).and_then(|id| self.positions.get(&id).copied())
    }

    /// Looks up the object, appending it if it has not been written before.
    ///
    /// Returns `None` for values that are not tracked.
    pub(crate) fn track(&mut self, value: &Value) -> Option<Tracked> {
        let id = identity(value)?;
        if let Some(&position) = self.positions.get(&id) {
            return Some(Tracked::Existing(position));
        }
        let position = self.objects.len();
        self.objects.push(value.clone());
        _ = self.positions.insert(id, position);
        Some(Tracked::New(position))
    }

    /// Returns the number of tracked objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Returns `true` if no object has been tracked.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Forgets every tracked object.
    pub fn clear(&mut self) {
        self.objects.clear();
        self.positions.clear();
    }
}

/// Returns the storage identity of a map or list.
fn identity(value: &Value) -> Option<usize> {
    match value {
        Value::Map(map) => Some(map.id()),
        Value::List(list) => Some(list.id()),
        Value::Typed(typed) => identity(typed.payload()),
        _ => None,
    }
}
