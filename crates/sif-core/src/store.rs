use std::collections::HashMap;
use std::fmt;

/// Handle to a value held by a [`CurveStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StoreKey(u64);

impl fmt::Display for StoreKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Keyed scratch storage for intermediate curves. Keys are unique for the
/// lifetime of the store and never reused.
#[derive(Debug)]
pub struct CurveStore<T> {
    next: u64,
    values: HashMap<StoreKey, T>,
}

impl<T> Default for CurveStore<T> {
    fn default() -> Self {
        Self {
            next: 0,
            values: HashMap::new(),
        }
    }
}

impl<T> CurveStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put(&mut self, value: T) -> StoreKey {
        let key = StoreKey(self.next);
        self.next += 1;
        self.values.insert(key, value);
        key
    }

    pub fn get(&self, key: &StoreKey) -> Option<&T> {
        self.values.get(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
