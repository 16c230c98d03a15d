use std::hash::Hash;

use util::IndexMap;

/// Insertion ordered container that hands out unique ids to its members.
///
/// Ids are never reused, not even after the member is removed or the
/// registry is cleared.
#[derive(Clone, Debug)]
pub struct Registry<K, V> {
    next_id: u32,
    members: IndexMap<K, V>,
}

impl<K, V> Default for Registry<K, V> {
    fn default() -> Self {
        Registry {
            next_id: 0,
            members: Default::default(),
        }
    }
}

impl<K: Copy + Eq + Hash + From<u32>, V> Registry<K, V> {
    pub fn insert(&mut self, value: V) -> K {
        let id = K::from(self.next_id);
        self.next_id += 1;
        self.members.insert(id, value);
        id
    }

    pub fn get(&self, id: K) -> Option<&V> {
        self.members.get(&id)
    }

    pub fn get_mut(&mut self, id: K) -> Option<&mut V> {
        self.members.get_mut(&id)
    }

    pub fn contains(&self, id: K) -> bool {
        self.members.contains_key(&id)
    }

    /// Remove a member, keeping the order of the rest intact.
    pub fn remove(&mut self, id: K) -> Option<V> {
        self.members.shift_remove(&id)
    }

    /// Remove all members matching the predicate.
    pub fn remove_where(&mut self, mut pred: impl FnMut(&V) -> bool) {
        self.members.retain(|_, v| !pred(v));
    }

    pub fn clear(&mut self) {
        self.members.clear();
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &V)> + '_ {
        self.members.iter().map(|(&k, v)| (k, v))
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut V)> + '_ {
        self.members.iter_mut().map(|(&k, v)| (k, v))
    }

    pub fn values(&self) -> impl Iterator<Item = &V> + '_ {
        self.members.values()
    }

    /// Snapshot of the ids of members matching the predicate.
    ///
    /// Use this to walk the registry while mutating it.
    pub fn ids_where(&self, mut pred: impl FnMut(&V) -> bool) -> Vec<K> {
        self.iter()
            .filter_map(|(k, v)| pred(v).then_some(k))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
    struct Id(u32);

    impl From<u32> for Id {
        fn from(n: u32) -> Self {
            Id(n)
        }
    }

    #[test]
    fn ids_are_monotonic() {
        let mut reg: Registry<Id, &str> = Default::default();
        let a = reg.insert("a");
        let b = reg.insert("b");
        assert_eq!((a, b), (Id(0), Id(1)));

        reg.remove(b);
        reg.clear();
        assert_eq!(reg.insert("c"), Id(2));
    }

    #[test]
    fn insertion_order() {
        let mut reg: Registry<Id, char> = Default::default();
        for c in "abcde".chars() {
            reg.insert(c);
        }
        reg.remove(Id(1));
        reg.insert('f');
        let order: String = reg.values().collect();
        assert_eq!(order, "acdef");

        assert_eq!(reg.ids_where(|&c| c > 'c'), vec![Id(3), Id(4), Id(5)]);
        reg.remove_where(|&c| c == 'a' || c == 'f');
        let order: String = reg.values().collect();
        assert_eq!(order, "cde");
    }
}
