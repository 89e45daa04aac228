use indexmap::IndexMap;
use std::hash::Hash;

/// Sparse associative container mapping an ordered pair of keys `(K1, K2)` to a single value.
///
/// Iteration order is deterministic: first-level keys appear in the order they were first inserted,
/// and the values of a first-level key appear in the order their pair was first inserted.
/// Overwriting the value of an existing pair keeps its original position.
#[derive(Debug, Clone)]
pub struct KeyedMatrix<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    rows: IndexMap<K1, IndexMap<K2, V>>,
    len: usize,
}

impl<K1, K2, V> KeyedMatrix<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    pub fn new() -> Self {
        Self {
            rows: IndexMap::new(),
            len: 0,
        }
    }

    /// Inserts `value` for the pair `(k1, k2)`, returning the value it replaced (if any).
    pub fn put(&mut self, k1: K1, k2: K2, value: V) -> Option<V> {
        let prev = self.rows.entry(k1).or_default().insert(k2, value);
        if prev.is_none() {
            self.len += 1;
        }
        prev
    }

    pub fn get(&self, k1: &K1, k2: &K2) -> Option<&V> {
        self.rows.get(k1)?.get(k2)
    }

    pub fn get_mut(&mut self, k1: &K1, k2: &K2) -> Option<&mut V> {
        self.rows.get_mut(k1)?.get_mut(k2)
    }

    pub fn contains(&self, k1: &K1, k2: &K2) -> bool {
        self.get(k1, k2).is_some()
    }

    /// Distinct first-level keys with at least one entry, in order of first insertion.
    pub fn keys(&self) -> impl Iterator<Item = &K1> {
        self.rows.keys()
    }

    /// All values whose first-level key equals `k1`, in insertion order.
    /// Empty if `k1` has no entries.
    pub fn values_for(&self, k1: &K1) -> impl Iterator<Item = &V> {
        self.rows.get(k1).into_iter().flat_map(|row| row.values())
    }

    /// All `(k1, k2, value)` triples, grouped by first-level key.
    pub fn iter(&self) -> impl Iterator<Item = (&K1, &K2, &V)> {
        self.rows
            .iter()
            .flat_map(|(k1, row)| row.iter().map(move |(k2, v)| (k1, k2, v)))
    }

    /// Total number of pairs stored
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl<K1, K2, V> Default for KeyedMatrix<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K1, K2, V> Extend<(K1, K2, V)> for KeyedMatrix<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    fn extend<T: IntoIterator<Item = (K1, K2, V)>>(&mut self, iter: T) {
        for (k1, k2, v) in iter {
            self.put(k1, k2, v);
        }
    }
}

impl<K1, K2, V> FromIterator<(K1, K2, V)> for KeyedMatrix<K1, K2, V>
where
    K1: Hash + Eq,
    K2: Hash + Eq,
{
    fn from_iter<T: IntoIterator<Item = (K1, K2, V)>>(iter: T) -> Self {
        let mut matrix = Self::new();
        matrix.extend(iter);
        matrix
    }
}

#[cfg(test)]
mod tests {
    use super::KeyedMatrix;

    #[test]
    fn put_overwrites_existing_pair() {
        let mut m = KeyedMatrix::new();
        assert_eq!(m.put(1, 2, "a"), None);
        assert_eq!(m.put(1, 2, "b"), Some("a"));
        assert_eq!(m.get(&1, &2), Some(&"b"));
        assert_eq!(m.len(), 1);
    }

    #[test]
    fn values_for_keeps_insertion_order() {
        let mut m = KeyedMatrix::new();
        m.put(1, 2, "v1");
        m.put(7, 1, "other");
        m.put(1, 3, "v2");
        assert_eq!(m.values_for(&1).collect::<Vec<_>>(), vec![&"v1", &"v2"]);

        // an overwrite does not move the pair to the back
        m.put(1, 2, "v3");
        assert_eq!(m.values_for(&1).collect::<Vec<_>>(), vec![&"v3", &"v2"]);
    }

    #[test]
    fn missing_pair_is_absent() {
        let m: KeyedMatrix<i32, i32, &str> = KeyedMatrix::new();
        assert_eq!(m.get(&9, &9), None);
        assert!(m.is_empty());
        assert_eq!(m.values_for(&9).count(), 0);
    }

    #[test]
    fn keys_in_order_of_first_encounter() {
        let m: KeyedMatrix<usize, usize, ()> =
            [(3, 0, ()), (1, 0, ()), (3, 1, ()), (2, 5, ()), (1, 4, ())]
                .into_iter()
                .collect();
        assert_eq!(m.keys().copied().collect::<Vec<_>>(), vec![3, 1, 2]);
        assert_eq!(m.len(), 5);
        assert_eq!(
            m.iter().map(|(a, b, _)| (*a, *b)).collect::<Vec<_>>(),
            vec![(3, 0), (3, 1), (1, 0), (1, 4), (2, 5)]
        );
    }
}
