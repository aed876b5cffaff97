//! This module implements the scoped map.

/// Scoped map that supports inserting and removing lots of key-val pairs
/// at once. Each scope keeps its keys in insertion order.
#[derive(Debug, Clone)]
pub struct ScopedMap<K, V> {
    stack: Vec<Vec<(K, V)>>,
}

impl<K: PartialEq + Clone, V: Clone> Default for ScopedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq + Clone, V: Clone> ScopedMap<K, V> {
    pub fn new() -> Self {
        ScopedMap { stack: Vec::new() }
    }

    pub fn push(&mut self) {
        self.stack.push(Vec::new());
    }

    pub fn pop(&mut self) {
        if !self.is_empty() {
            self.stack.pop();
        }
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// Inserts into the innermost scope. Inserting without an open scope
    /// does nothing.
    pub fn insert(&mut self, key: &K, val: &V) {
        let scope = match self.stack.last_mut() {
            Some(scope) => scope,
            None => return,
        };
        for pair in scope.iter_mut() {
            if pair.0 == *key {
                pair.1 = val.clone();
                return;
            }
        }
        scope.push((key.clone(), val.clone()));
    }

    /// Merges all of the scopes, from the outermost to the innermost, so that
    /// inner values win. Keys keep the position of their first insertion.
    pub fn flatten(&self) -> Vec<(K, V)> {
        let mut list: Vec<(K, V)> = Vec::new();

        for scope in self.stack.iter() {
            for pair in scope.iter() {
                if let Some(prev) = list.iter_mut().find(|p| p.0 == pair.0) {
                    prev.1 = pair.1.clone();
                } else {
                    list.push(pair.clone());
                }
            }
        }

        list
    }

    pub fn get(&self, key: &K) -> Option<V> {
        // For each scope, in reverse:
        for scope in self.stack.iter().rev() {
            for pair in scope {
                if pair.0 == *key {
                    return Option::Some(pair.1.clone());
                }
            }
        }
        Option::None
    }

    pub fn has(&self, key: &K) -> bool {
        matches!(self.get(key), Option::Some(_))
    }
}

#[test]
fn test_scoped_map() {
    let mut map: ScopedMap<usize, usize> = ScopedMap::new();

    assert!(map.is_empty());
    map.push();
    assert_eq!(map.len(), 1);

    map.insert(&1, &1);
    map.insert(&2, &2);
    map.insert(&3, &3);

    assert_eq!(map.get(&1).unwrap(), 1);
    assert_eq!(map.get(&3).unwrap(), 3);
    assert!(map.has(&2));

    map.push();
    map.insert(&1, &4);
    map.insert(&2, &5);

    assert_eq!(map.get(&1).unwrap(), 4);
    assert_eq!(map.get(&2).unwrap(), 5);
    assert_eq!(map.get(&3).unwrap(), 3);

    map.pop();
    assert_eq!(map.get(&1).unwrap(), 1);
    assert_eq!(map.get(&2).unwrap(), 2);
    map.pop();
    assert!(!map.has(&1));
    assert!(!map.has(&3));

    // No open scope.
    map.insert(&1, &1);
    assert!(!map.has(&1));
}

#[test]
fn test_scoped_map_flatten_order() {
    let mut map: ScopedMap<&str, usize> = ScopedMap::new();
    map.push();
    map.insert(&"b", &1);
    map.insert(&"a", &1);
    map.push();
    map.insert(&"c", &3);
    map.insert(&"b", &2);
    map.push();

    let flat = map.flatten();
    assert_eq!(flat, vec![("b", 2), ("a", 1), ("c", 3)]);
}
