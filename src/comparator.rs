//! Key ordering for the [`SkipMap`][crate::SkipMap].
//!
//! The skipmap never compares keys directly. Every ordering decision is
//! delegated to a [`Comparator`], which also supplies the sentinel key stored
//! in the head node. This is the single place where domain-specific key
//! semantics (case-insensitive strings, multi-field tuples, ...) are injected.
//!
//! The comparator **must** be well-behaved. Given some ordering function
//! `f(a, b)`, it must satisfy the following properties:
//!
//! - Be well defined: `f(a, b)` should always return the same value.
//! - Be anti-symmetric: `f(a, b) == Greater` iff `f(b, a) == Less`, and
//!   `f(a, b) == Equal == f(b, a)`.
//! - Be transitive: if `f(a, b) == Greater` and `f(b, c) == Greater` then
//!   `f(a, c) == Greater`.
//!
//! Failure to satisfy these properties will leave the map unsorted and lookups
//! will silently miss keys.

use core::{cmp::Ordering, fmt, marker::PhantomData};

// ////////////////////////////////////////////////////////////////////////////
// Comparator
// ////////////////////////////////////////////////////////////////////////////

/// A total order over keys of type `K`.
///
/// Comparators carry no mutable state, so a single instance may be shared by
/// any number of maps (see the blanket implementation for `&C`).
pub trait Comparator<K> {
    /// Compare two keys.
    #[must_use]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering;

    /// The sentinel key held by the head node.
    ///
    /// Conventionally the smallest "empty" value of the type (the empty
    /// string, zero). The map identifies its head by position and never
    /// compares a key against the sentinel, so a sentinel that is not the
    /// minimum (zero among negative integers) is harmless.
    #[must_use]
    fn sentinel(&self) -> K;
}

impl<K, C> Comparator<K> for &C
where
    C: Comparator<K> + ?Sized,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        (**self).compare(lhs, rhs)
    }

    #[inline]
    fn sentinel(&self) -> K {
        (**self).sentinel()
    }
}

// ///////////////////////////////////////////////
// Provided comparators
// ///////////////////////////////////////////////

/// Ordering over signed integers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IntCmp;

impl Comparator<i64> for IntCmp {
    #[inline]
    fn compare(&self, lhs: &i64, rhs: &i64) -> Ordering {
        lhs.cmp(rhs)
    }

    #[inline]
    fn sentinel(&self) -> i64 {
        0
    }
}

/// Lexicographic ordering over strings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct StringCmp;

impl Comparator<String> for StringCmp {
    #[inline]
    fn compare(&self, lhs: &String, rhs: &String) -> Ordering {
        lhs.as_str().cmp(rhs.as_str())
    }

    #[inline]
    fn sentinel(&self) -> String {
        String::new()
    }
}

/// The natural [`Ord`] ordering of `K`, with `K::default()` as sentinel.
pub struct Natural<K>(PhantomData<fn(&K, &K) -> Ordering>);

impl<K> Natural<K> {
    /// Create a new natural comparator.
    #[must_use]
    #[inline]
    pub const fn new() -> Self {
        Natural(PhantomData)
    }
}

impl<K> Default for Natural<K> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<K> Clone for Natural<K> {
    #[inline]
    fn clone(&self) -> Self {
        *self
    }
}

impl<K> Copy for Natural<K> {}

impl<K> fmt::Debug for Natural<K> {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Natural")
    }
}

impl<K> Comparator<K> for Natural<K>
where
    K: Ord + Default,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        lhs.cmp(rhs)
    }

    #[inline]
    fn sentinel(&self) -> K {
        K::default()
    }
}

/// A comparator built from a closure and an explicit sentinel key.
///
/// # Examples
///
/// ```
/// use skipmap_arena::{CompareBy, SkipMap};
///
/// let nocase = CompareBy::new(String::new(), |a: &String, b: &String| {
///     a.to_lowercase().cmp(&b.to_lowercase())
/// });
/// let mut map = SkipMap::new(8, nocase).unwrap();
/// map.put("Hello".to_owned(), 1);
/// assert_eq!(map.get(&"HELLO".to_owned()), Some(&1));
/// ```
#[derive(Clone)]
pub struct CompareBy<K, F> {
    sentinel: K,
    compare: F,
}

impl<K, F> CompareBy<K, F>
where
    F: Fn(&K, &K) -> Ordering,
{
    /// Wrap `compare`, using `sentinel` as the head node's key.
    #[must_use]
    #[inline]
    pub const fn new(sentinel: K, compare: F) -> Self {
        CompareBy { sentinel, compare }
    }
}

impl<K, F> fmt::Debug for CompareBy<K, F>
where
    K: fmt::Debug,
{
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompareBy")
            .field("sentinel", &self.sentinel)
            .finish_non_exhaustive()
    }
}

impl<K, F> Comparator<K> for CompareBy<K, F>
where
    K: Clone,
    F: Fn(&K, &K) -> Ordering,
{
    #[inline]
    fn compare(&self, lhs: &K, rhs: &K) -> Ordering {
        (self.compare)(lhs, rhs)
    }

    #[inline]
    fn sentinel(&self) -> K {
        self.sentinel.clone()
    }
}

#[cfg(test)]
mod tests {
    use core::cmp::Ordering;

    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::{CompareBy, Comparator, IntCmp, Natural, StringCmp};

    #[rstest]
    #[case(1, 2, Ordering::Less)]
    #[case(2, 2, Ordering::Equal)]
    #[case(3, 2, Ordering::Greater)]
    #[case(-5, 0, Ordering::Less)]
    #[case(i64::MIN, i64::MAX, Ordering::Less)]
    fn int_cmp(#[case] lhs: i64, #[case] rhs: i64, #[case] expected: Ordering) {
        assert_eq!(IntCmp.compare(&lhs, &rhs), expected);
    }

    #[rstest]
    #[case("a", "b", Ordering::Less)]
    #[case("b", "b", Ordering::Equal)]
    #[case("ba", "b", Ordering::Greater)]
    #[case("", "a", Ordering::Less)]
    #[case("B", "a", Ordering::Less)]
    fn string_cmp(#[case] lhs: &str, #[case] rhs: &str, #[case] expected: Ordering) {
        assert_eq!(
            StringCmp.compare(&lhs.to_owned(), &rhs.to_owned()),
            expected
        );
    }

    #[test]
    fn sentinels() {
        assert_eq!(IntCmp.sentinel(), 0);
        assert_eq!(StringCmp.sentinel(), "");
        assert_eq!(Natural::<u32>::new().sentinel(), 0);
        assert_eq!(Natural::<String>::new().sentinel(), "");
    }

    #[test]
    fn string_sentinel_is_minimal() {
        let sentinel = StringCmp.sentinel();
        for key in ["", "a", "\0", "zzz"] {
            assert_ne!(
                StringCmp.compare(&sentinel, &key.to_owned()),
                Ordering::Greater
            );
        }
    }

    #[test]
    fn compare_by() {
        let reverse = CompareBy::new(u8::MAX, |a: &u8, b: &u8| b.cmp(a));
        assert_eq!(reverse.compare(&1, &2), Ordering::Greater);
        assert_eq!(reverse.compare(&2, &2), Ordering::Equal);
        assert_eq!(reverse.sentinel(), u8::MAX);
    }

    fn order_of<C: Comparator<String>>(cmp: C, lhs: &str, rhs: &str) -> Ordering {
        cmp.compare(&lhs.to_owned(), &rhs.to_owned())
    }

    #[test]
    fn shared_reference() {
        let cmp = StringCmp;
        assert_eq!(order_of(&cmp, "x", "y"), Ordering::Less);
        assert_eq!(order_of(&&cmp, "y", "x"), Ordering::Greater);
    }
}
