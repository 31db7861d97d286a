//! SkipMap stores key-value pairs, with the keys being unique and always
//! sorted according to a [`Comparator`].

use core::{cmp, cmp::Ordering, fmt, iter};

use crate::{
    comparator::Comparator,
    level_generator::{Geometric, GeometricError, LevelGenerator},
    skipnode::{HEAD, NodeArena, NodeId, SkipNode},
};

pub use crate::skipnode::Iter;

/// The number of levels used by [`SkipMap::default`].
pub const DEFAULT_MAX_LEVEL: usize = 16;

// ////////////////////////////////////////////////////////////////////////////
// Pair
// ////////////////////////////////////////////////////////////////////////////

/// An owned key-value pair copied out of a [`SkipMap`].
///
/// Modifying a pair never affects the map it came from.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Pair<K, V> {
    /// The key.
    pub key: K,
    /// The value.
    pub value: V,
}

impl<K, V> Pair<K, V> {
    /// Create a new pair.
    #[inline]
    pub const fn new(key: K, value: V) -> Self {
        Pair { key, value }
    }
}

impl<K, V> From<(K, V)> for Pair<K, V> {
    #[inline]
    fn from((key, value): (K, V)) -> Self {
        Pair { key, value }
    }
}

impl<K, V> From<Pair<K, V>> for (K, V) {
    #[inline]
    fn from(pair: Pair<K, V>) -> Self {
        (pair.key, pair.value)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// SkipMap
// ////////////////////////////////////////////////////////////////////////////

/// The skipmap provides a way of storing element pairs such that the keys are
/// always sorted whilst at the same time providing efficient way to access,
/// insert and remove nodes.
///
/// Keys are ordered exclusively by the comparator `C` supplied at
/// construction, and each key appears at most once: putting an existing key
/// replaces its value in place.
///
/// Note that mutable references to keys are not available at all as this could
/// result in a node being left out of the proper ordering.
pub struct SkipMap<K, V, C, G = Geometric> {
    // Node storage; the head lives at `HEAD` and its height is the map's level.
    nodes: NodeArena<K, V>,
    len: usize,
    comparator: C,
    level_generator: G,
}

// ///////////////////////////////////////////////
// Inherent methods
// ///////////////////////////////////////////////

impl<K, V, C> SkipMap<K, V, C>
where
    C: Comparator<K>,
{
    /// Create a new skipmap whose nodes may reach at most `max_level` levels,
    /// with node heights drawn by a fair coin.
    ///
    /// # Errors
    ///
    /// Returns [`GeometricError::ZeroMax`] if `max_level` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{SkipMap, StringCmp};
    ///
    /// let skipmap: SkipMap<String, u32, _> = SkipMap::new(16, StringCmp)?;
    /// assert!(skipmap.is_empty());
    /// assert!(SkipMap::<String, u32, _>::new(0, StringCmp).is_err());
    /// # Ok::<(), skipmap_arena::GeometricError>(())
    /// ```
    #[inline]
    pub fn new(max_level: usize, comparator: C) -> Result<Self, GeometricError> {
        let lg = Geometric::new(max_level, 0.5)?;
        Ok(Self::with_level_generator(comparator, lg))
    }
}

impl<K, V, C, G> SkipMap<K, V, C, G>
where
    C: Comparator<K>,
    G: LevelGenerator,
{
    /// Create a new skipmap drawing node heights from `level_generator`.
    ///
    /// The maximum level of the map is the generator's
    /// [`total`][LevelGenerator::total].
    ///
    /// # Panics
    ///
    /// Panics if the generator reports zero levels.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{Geometric, IntCmp, SkipMap};
    ///
    /// let lg = Geometric::with_seed(8, 0.25, 0x1234_abcd)?;
    /// let mut skipmap: SkipMap<i64, &str, _, _> = SkipMap::with_level_generator(IntCmp, lg);
    /// skipmap.put(1, "one");
    /// assert_eq!(skipmap.max_level(), 8);
    /// # Ok::<(), skipmap_arena::GeometricError>(())
    /// ```
    #[inline]
    pub fn with_level_generator(comparator: C, level_generator: G) -> Self {
        assert!(
            level_generator.total() >= 1,
            "A skipmap needs at least one level."
        );
        #[cfg(feature = "tracing")]
        tracing::debug!(max_level = level_generator.total(), "created skipmap");
        SkipMap {
            nodes: NodeArena::new(SkipNode::head(comparator.sentinel())),
            len: 0,
            comparator,
            level_generator,
        }
    }

    /// Insert the key-value pair into the skipmap.
    ///
    /// If the key is already present its value is replaced in place and the
    /// old value returned; the map's length is unchanged. Otherwise a new node
    /// is spliced in and `None` is returned. Putting never fails.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{IntCmp, SkipMap};
    ///
    /// let mut skipmap: SkipMap<i64, &str, _> = SkipMap::new(16, IntCmp).unwrap();
    ///
    /// assert_eq!(skipmap.put(1, "Hello"), None);
    /// assert_eq!(skipmap.put(2, "World"), None);
    /// assert_eq!(skipmap.put(2, "Rust"), Some("World"));
    /// assert_eq!(skipmap.len(), 2);
    /// ```
    pub fn put(&mut self, key: K, value: V) -> Option<V> {
        if let Some(id) = self.find_key(&key) {
            return self.nodes[id].value.replace(value);
        }

        let height = cmp::min(
            self.level_generator.level().saturating_add(1),
            self.max_level(),
        );
        self.grow(height);

        let update = self.predecessors(&key);
        let id = self.nodes.alloc(SkipNode::new(key, value, height));
        for (level, &prev) in update.iter().enumerate().take(height) {
            let next = self.nodes.relink(prev, level, Some(id));
            self.nodes.relink(id, level, next);
        }
        self.len += 1;
        None
    }

    /// Provides a reference to the value stored under `key`, or `None` if the
    /// key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{IntCmp, SkipMap};
    ///
    /// let mut skipmap: SkipMap<i64, i64, _> = SkipMap::new(16, IntCmp).unwrap();
    /// assert!(skipmap.get(&0).is_none());
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert_eq!(skipmap.get(&0), Some(&0));
    /// assert!(skipmap.get(&10).is_none());
    /// ```
    #[inline]
    pub fn get(&self, key: &K) -> Option<&V> {
        self.find_key(key)
            .and_then(|id| self.nodes[id].value.as_ref())
    }

    /// Provides a mutable reference to the value stored under `key`, or `None`
    /// if the key is absent.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{IntCmp, SkipMap};
    ///
    /// let mut skipmap: SkipMap<i64, i64, _> = SkipMap::new(16, IntCmp).unwrap();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    ///
    /// if let Some(x) = skipmap.get_mut(&0) {
    ///     *x = 100;
    /// }
    /// assert_eq!(skipmap.get(&0), Some(&100));
    /// ```
    #[inline]
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = self.find_key(key)?;
        self.nodes[id].value.as_mut()
    }

    /// Returns `true` if the key is present in the skipmap.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{IntCmp, SkipMap};
    ///
    /// let mut skipmap: SkipMap<i64, i64, _> = SkipMap::new(16, IntCmp).unwrap();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert!(skipmap.has(&4));
    /// assert!(!skipmap.has(&15));
    /// ```
    #[inline]
    pub fn has(&self, key: &K) -> bool {
        self.find_key(key).is_some()
    }

    /// Removes `key` from the skipmap, returning its value if it was present.
    ///
    /// Removing the tallest node(s) lowers the map's level to that of the
    /// tallest remaining node, but never below one.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{IntCmp, SkipMap};
    ///
    /// let mut skipmap: SkipMap<i64, i64, _> = SkipMap::new(16, IntCmp).unwrap();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert_eq!(skipmap.remove(&4), Some(4));
    /// assert!(skipmap.remove(&4).is_none());
    /// ```
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let target = self.find_key(key)?;
        let update = self.predecessors(key);
        let height = self.nodes[target].height();
        for (level, &prev) in update.iter().enumerate().take(height) {
            if self.nodes[prev].next_at(level) == Some(target) {
                let next = self.nodes[target].next_at(level);
                self.nodes.relink(prev, level, next);
            }
        }
        let node = self.nodes.release(target);
        self.shrink();
        self.len -= 1;
        node.into_inner().map(|(_key, value)| value)
    }

    /// Returns a reference to the comparator ordering this skipmap.
    #[inline]
    pub const fn comparator(&self) -> &C {
        &self.comparator
    }

    /// The maximum number of levels any node may reach.
    #[inline]
    pub fn max_level(&self) -> usize {
        self.level_generator.total()
    }
}

impl<K, V, C, G> SkipMap<K, V, C, G> {
    /// Returns the number of elements in the skipmap.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{IntCmp, SkipMap};
    ///
    /// let mut skipmap: SkipMap<i64, i64, _> = SkipMap::new(16, IntCmp).unwrap();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// assert_eq!(skipmap.len(), 10);
    /// ```
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the skipmap contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The current level of the skipmap: the height of its tallest node, or
    /// one when empty.
    #[inline]
    pub fn level(&self) -> usize {
        self.nodes.head().height()
    }

    /// Clears the skipmap, removing all values.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{IntCmp, SkipMap};
    ///
    /// let mut skipmap: SkipMap<i64, i64, _> = SkipMap::new(16, IntCmp).unwrap();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// skipmap.clear();
    /// assert!(skipmap.is_empty());
    /// assert_eq!(skipmap.level(), 1);
    /// ```
    #[inline]
    pub fn clear(&mut self) {
        self.len = 0;
        self.nodes.reset(1);
    }

    /// Returns a copy of the smallest entry, or `None` if the skipmap is
    /// empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{IntCmp, Pair, SkipMap};
    ///
    /// let mut skipmap: SkipMap<i64, &str, _> = SkipMap::new(16, IntCmp).unwrap();
    /// assert!(skipmap.first().is_none());
    ///
    /// skipmap.put(2, "World");
    /// skipmap.put(1, "Hello");
    /// assert_eq!(skipmap.first(), Some(Pair::new(1, "Hello")));
    /// ```
    #[inline]
    pub fn first(&self) -> Option<Pair<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        let id = self.nodes.head().next_at(0)?;
        self.nodes[id]
            .item()
            .map(|(key, value)| Pair::new(key.clone(), value.clone()))
    }

    /// Returns a copy of every entry, in ascending key order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{IntCmp, Pair, SkipMap};
    ///
    /// let mut skipmap: SkipMap<i64, char, _> = SkipMap::new(16, IntCmp).unwrap();
    /// skipmap.put(3, 'c');
    /// skipmap.put(1, 'a');
    /// skipmap.put(2, 'b');
    /// assert_eq!(
    ///     skipmap.list(),
    ///     vec![Pair::new(1, 'a'), Pair::new(2, 'b'), Pair::new(3, 'c')]
    /// );
    /// ```
    pub fn list(&self) -> Vec<Pair<K, V>>
    where
        K: Clone,
        V: Clone,
    {
        self.iter()
            .map(|(key, value)| Pair::new(key.clone(), value.clone()))
            .collect()
    }

    /// Creates an iterator over the entries of the skipmap, in ascending key
    /// order.
    ///
    /// # Examples
    ///
    /// ```
    /// use skipmap_arena::{IntCmp, SkipMap};
    ///
    /// let mut skipmap: SkipMap<i64, i64, _> = SkipMap::new(16, IntCmp).unwrap();
    /// skipmap.extend((0..10).map(|x| (x, x)));
    /// for (k, v) in skipmap.iter() {
    ///     println!("Key: {}, Value: {}", k, v);
    /// }
    /// ```
    #[inline]
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            arena: &self.nodes,
            next: self.nodes.head().next_at(0),
            size: self.len,
        }
    }
}

// ///////////////////////////////////////////////
// Internal methods
// ///////////////////////////////////////////////

impl<K, V, C, G> SkipMap<K, V, C, G>
where
    C: Comparator<K>,
{
    /// Find the last node whose key is less than or equal to `key`.
    ///
    /// This is the head if every stored key is greater than `key`.
    fn find_last_le(&self, key: &K) -> NodeId {
        let mut cursor = HEAD;
        for level in (0..self.level()).rev() {
            while let Some(next) = self.nodes[cursor].next_at(level) {
                if self.comparator.compare(&self.nodes[next].key, key) == Ordering::Greater {
                    break;
                }
                cursor = next;
            }
        }
        cursor
    }

    /// Find the node holding exactly `key`.
    fn find_key(&self, key: &K) -> Option<NodeId> {
        let last_le = self.find_last_le(key);
        (last_le != HEAD
            && self.comparator.compare(&self.nodes[last_le].key, key) == Ordering::Equal)
            .then_some(last_le)
    }

    /// For every level of the map, the last node whose key is strictly less
    /// than `key`. Entry `i` of the result belongs to level `i`.
    fn predecessors(&self, key: &K) -> Vec<NodeId> {
        let mut update = vec![HEAD; self.level()];
        let mut cursor = HEAD;
        for level in (0..self.level()).rev() {
            while let Some(next) = self.nodes[cursor].next_at(level) {
                if self.comparator.compare(&self.nodes[next].key, key) != Ordering::Less {
                    break;
                }
                cursor = next;
            }
            update[level] = cursor;
        }
        update
    }
}

impl<K, V, C, G> SkipMap<K, V, C, G> {
    /// Raise the map's level to `height` if it is currently lower.
    fn grow(&mut self, height: usize) {
        let head = self.nodes.head_mut();
        if head.height() < height {
            #[cfg(feature = "tracing")]
            tracing::trace!(from = head.height(), to = height, "skipmap level grew");
            head.forward.resize(height, None);
        }
    }

    /// Trim empty levels off the top of the head, keeping at least one.
    fn shrink(&mut self) {
        let head = self.nodes.head_mut();
        #[cfg(feature = "tracing")]
        let before = head.height();
        while head.height() > 1 && head.forward.last() == Some(&None) {
            head.forward.pop();
        }
        #[cfg(feature = "tracing")]
        if head.height() != before {
            tracing::trace!(from = before, to = head.height(), "skipmap level shrank");
        }
    }
}

#[cfg(test)]
impl<K, V, C, G> SkipMap<K, V, C, G>
where
    C: Comparator<K>,
    G: LevelGenerator,
{
    /// Checks the integrity of the skipmap.
    fn check(&self) {
        let level = self.level();
        assert!(level >= 1);
        assert!(level <= self.max_level());
        assert!(self.nodes.head().value.is_none());
        if level > 1 {
            assert!(
                self.nodes.head().next_at(level - 1).is_some(),
                "Top level {} is empty.",
                level - 1
            );
        }

        let mut per_level = Vec::with_capacity(level);
        for l in 0..level {
            let mut ids = std::collections::HashSet::new();
            let mut cursor = self.nodes.head().next_at(l);
            while let Some(id) = cursor {
                let node = &self.nodes[id];
                assert!(node.height() > l, "Node {id} linked above its height.");
                if let Some(next) = node.next_at(l) {
                    assert_eq!(
                        self.comparator.compare(&node.key, &self.nodes[next].key),
                        Ordering::Less,
                        "Level {l} is not strictly increasing."
                    );
                }
                assert!(ids.insert(id), "Level {l} loops back on node {id}.");
                cursor = node.next_at(l);
            }
            per_level.push(ids);
        }

        assert_eq!(per_level[0].len(), self.len);
        assert_eq!(self.nodes.live(), self.len + 1);
        for &id in &per_level[0] {
            let height = self.nodes[id].height();
            assert!(height <= level);
            for ids in per_level.iter().take(height) {
                assert!(ids.contains(&id), "Node {id} missing from a lower level.");
            }
        }
    }
}

// ///////////////////////////////////////////////
// Trait implementation
// ///////////////////////////////////////////////

impl<K, V, C> Default for SkipMap<K, V, C>
where
    C: Comparator<K> + Default,
{
    #[inline]
    fn default() -> Self {
        Self::with_level_generator(C::default(), Geometric::fair(DEFAULT_MAX_LEVEL))
    }
}

impl<K, V, C, G> Extend<(K, V)> for SkipMap<K, V, C, G>
where
    C: Comparator<K>,
    G: LevelGenerator,
{
    #[inline]
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iterable: I) {
        for (key, value) in iterable {
            self.put(key, value);
        }
    }
}

impl<K, V, C> iter::FromIterator<(K, V)> for SkipMap<K, V, C>
where
    C: Comparator<K> + Default,
{
    #[inline]
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut skipmap = Self::default();
        skipmap.extend(iter);
        skipmap
    }
}

impl<'a, K, V, C, G> IntoIterator for &'a SkipMap<K, V, C, G> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<K, V, C, G> fmt::Debug for SkipMap<K, V, C, G>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K, V, C, G> fmt::Display for SkipMap<K, V, C, G>
where
    K: fmt::Display,
    V: fmt::Display,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, (key, value)) in self.iter().enumerate() {
            if i != 0 {
                f.write_str(" -> ")?;
            }
            write!(f, "{{{key}: {value}}}")?;
        }
        Ok(())
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Tests
// ////////////////////////////////////////////////////////////////////////////
