//! Nodes and the arena that owns them.
//!
//! Rather than linking nodes through raw pointers, every node lives in a
//! [`NodeArena`] and links to its successors by [`NodeId`]. The head node is
//! always at [`HEAD`] and is never freed; slots released by removals are
//! recycled by later insertions.

use core::{fmt, mem, ops};

/// Index of a node within its [`NodeArena`].
pub type NodeId = usize;

/// The head node's id. It is allocated with the arena and never released.
pub const HEAD: NodeId = 0;

// ////////////////////////////////////////////////////////////////////////////
// SkipNode
// ////////////////////////////////////////////////////////////////////////////

/// A single entry of the skipmap.
///
/// A node of height `h` has `h` forward links; `forward[i]` is the next node
/// at level `i`, or `None` if this node is the last one at that level.
#[derive(Clone, Debug)]
pub struct SkipNode<K, V> {
    pub key: K,
    // value should never be None, with the sole exception being the head node.
    pub value: Option<V>,
    pub forward: Vec<Option<NodeId>>,
}

impl<K, V> SkipNode<K, V> {
    /// Create a head node carrying the sentinel `key` and a single level.
    pub fn head(key: K) -> Self {
        SkipNode {
            key,
            value: None,
            forward: vec![None],
        }
    }

    /// Create a new node of the given `height`, with all links unset.
    pub fn new(key: K, value: V, height: usize) -> Self {
        SkipNode {
            key,
            value: Some(value),
            forward: vec![None; height],
        }
    }

    /// How many levels this node participates in.
    #[inline]
    pub fn height(&self) -> usize {
        self.forward.len()
    }

    /// The next node at `level`.
    #[inline]
    pub fn next_at(&self, level: usize) -> Option<NodeId> {
        self.forward.get(level).copied().flatten()
    }

    /// The key and value of a non-head node.
    #[inline]
    pub fn item(&self) -> Option<(&K, &V)> {
        self.value.as_ref().map(|value| (&self.key, value))
    }

    /// Consumes the node returning the key and value it contains.
    pub fn into_inner(self) -> Option<(K, V)> {
        let key = self.key;
        self.value.map(|value| (key, value))
    }
}

// ////////////////////////////////////////////////////////////////////////////
// NodeArena
// ////////////////////////////////////////////////////////////////////////////

/// Exclusive owner of every node of one skipmap.
///
/// Freed slots are kept as `None` and remembered in a free list so that ids
/// handed out later may reuse them.
pub struct NodeArena<K, V> {
    slots: Vec<Option<SkipNode<K, V>>>,
    free: Vec<NodeId>,
}

impl<K, V> NodeArena<K, V> {
    /// Create an arena holding only the head node.
    pub fn new(head: SkipNode<K, V>) -> Self {
        NodeArena {
            slots: vec![Some(head)],
            free: Vec::new(),
        }
    }

    /// Store `node` and return its id.
    pub fn alloc(&mut self, node: SkipNode<K, V>) -> NodeId {
        if let Some(id) = self.free.pop() {
            self.slots[id] = Some(node);
            id
        } else {
            self.slots.push(Some(node));
            self.slots.len() - 1
        }
    }

    /// Release the node at `id`, returning it.
    ///
    /// # Panics
    ///
    /// Panics if `id` is the head or is not a live node.
    pub fn release(&mut self, id: NodeId) -> SkipNode<K, V> {
        assert_ne!(id, HEAD, "The head node is never released!");
        let node = self.slots[id]
            .take()
            .unwrap_or_else(|| panic!("Node {id} released twice."));
        self.free.push(id);
        node
    }

    /// Drop every node except the head, whose links are reset to `height`
    /// empty levels.
    pub fn reset(&mut self, height: usize) {
        self.slots.truncate(1);
        self.free.clear();
        self.head_mut().forward = vec![None; height];
    }

    #[inline]
    pub fn head(&self) -> &SkipNode<K, V> {
        &self[HEAD]
    }

    #[inline]
    pub fn head_mut(&mut self) -> &mut SkipNode<K, V> {
        &mut self[HEAD]
    }

    /// Number of live nodes, head included.
    #[cfg(test)]
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Swap the forward link of `id` at `level` for `next`, returning the old
    /// link.
    #[inline]
    pub fn relink(&mut self, id: NodeId, level: usize, next: Option<NodeId>) -> Option<NodeId> {
        mem::replace(&mut self[id].forward[level], next)
    }
}

impl<K, V> ops::Index<NodeId> for NodeArena<K, V> {
    type Output = SkipNode<K, V>;

    #[inline]
    fn index(&self, id: NodeId) -> &SkipNode<K, V> {
        match self.slots[id] {
            Some(ref node) => node,
            None => panic!("Dangling link to released node {id}."),
        }
    }
}

impl<K, V> ops::IndexMut<NodeId> for NodeArena<K, V> {
    #[inline]
    fn index_mut(&mut self, id: NodeId) -> &mut SkipNode<K, V> {
        match self.slots[id] {
            Some(ref mut node) => node,
            None => panic!("Dangling link to released node {id}."),
        }
    }
}

impl<K, V> fmt::Debug for NodeArena<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeArena")
            .field("slots", &self.slots)
            .field("free", &self.free)
            .finish()
    }
}

// /////////////////////////////////
// Iterators
// /////////////////////////////////

/// Walks level 0 of an arena, yielding each non-head node in link order.
pub struct Iter<'a, K, V> {
    pub(crate) arena: &'a NodeArena<K, V>,
    pub(crate) next: Option<NodeId>,
    pub(crate) size: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = &self.arena[self.next?];
        self.next = node.next_at(0);
        self.size = self.size.saturating_sub(1);
        node.item()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.size, Some(self.size))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<K, V> core::iter::FusedIterator for Iter<'_, K, V> {}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::{HEAD, Iter, NodeArena, SkipNode};

    fn chain(n: usize) -> NodeArena<usize, usize> {
        let mut arena = NodeArena::new(SkipNode::head(0));
        let mut prev = HEAD;
        for i in 1..=n {
            let id = arena.alloc(SkipNode::new(i, i * 10, 1));
            arena.relink(prev, 0, Some(id));
            prev = id;
        }
        arena
    }

    #[test]
    fn head() {
        let arena: NodeArena<&str, ()> = NodeArena::new(SkipNode::head(""));
        assert_eq!(arena.head().height(), 1);
        assert_eq!(arena.head().item(), None);
        assert_eq!(arena.head().next_at(0), None);
        assert_eq!(arena.live(), 1);
    }

    #[test]
    fn node() {
        let node = SkipNode::new("k", 3, 4);
        assert_eq!(node.height(), 4);
        assert_eq!(node.item(), Some((&"k", &3)));
        assert_eq!(node.next_at(3), None);
        assert_eq!(node.next_at(4), None);
        assert_eq!(node.into_inner(), Some(("k", 3)));
    }

    #[test]
    fn alloc_reuses_released_slots() {
        let mut arena = chain(3);
        assert_eq!(arena.live(), 4);
        let released = arena.release(2);
        assert_eq!(released.into_inner(), Some((2, 20)));
        assert_eq!(arena.live(), 3);
        let id = arena.alloc(SkipNode::new(9, 90, 1));
        assert_eq!(id, 2);
        assert_eq!(arena.live(), 4);
    }

    #[test]
    #[should_panic(expected = "The head node is never released!")]
    fn release_head() {
        let mut arena = chain(1);
        let _ = arena.release(HEAD);
    }

    #[test]
    #[should_panic(expected = "released twice")]
    fn release_twice() {
        let mut arena = chain(2);
        let _ = arena.release(1);
        let _ = arena.release(1);
    }

    #[test]
    fn reset() {
        let mut arena = chain(5);
        arena.reset(3);
        assert_eq!(arena.live(), 1);
        assert_eq!(arena.head().height(), 3);
        assert_eq!(arena.alloc(SkipNode::new(1, 1, 1)), 1);
    }

    #[test]
    fn iter() {
        let arena = chain(50);
        let iter = Iter {
            arena: &arena,
            next: arena.head().next_at(0),
            size: 50,
        };
        assert_eq!(iter.len(), 50);
        let items: Vec<_> = iter.map(|(&k, &v)| (k, v)).collect();
        let expected: Vec<_> = (1..=50).map(|i| (i, i * 10)).collect();
        assert_eq!(items, expected);
    }
}
