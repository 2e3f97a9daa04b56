//! Orderings that an `AvlTree` can be built over.

use std::cmp::Ordering;
use std::fmt;
use std::marker::PhantomData;

/// A total order over the values of a tree.
///
/// `compare` returns `None` when two values cannot be ordered. A value that does not compare
/// equal to itself is rejected by the tree as invalid input, which is how values such as
/// `f64::NAN` are kept out.
pub trait Comparator<T> {
    /// Orders `a` relative to `b`, or returns `None` if the two cannot be ordered.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_collections::comparator::{Comparator, Natural};
    /// use std::cmp::Ordering;
    ///
    /// assert_eq!(Natural.compare(&1, &2), Some(Ordering::Less));
    /// ```
    fn compare(&self, a: &T, b: &T) -> Option<Ordering>;

    /// Returns `true` if `value` can take part in the order.
    fn is_comparable(&self, value: &T) -> bool {
        self.compare(value, value) == Some(Ordering::Equal)
    }
}

/// The natural order of an `Ord` type.
#[derive(Clone, Copy, Debug, Default)]
pub struct Natural;

impl<T> Comparator<T> for Natural
where
    T: Ord,
{
    fn compare(&self, a: &T, b: &T) -> Option<Ordering> {
        Some(a.cmp(b))
    }
}

/// The partial order of a `PartialOrd` type. Values that are unordered with themselves are
/// rejected.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::AvlTree;
/// use avl_collections::comparator::Partial;
///
/// let mut tree = AvlTree::with_comparator(Partial);
/// assert!(tree.add(1.5).is_ok());
/// assert!(tree.add(std::f64::NAN).is_err());
/// assert_eq!(tree.len(), 1);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Partial;

impl<T> Comparator<T> for Partial
where
    T: PartialOrd,
{
    fn compare(&self, a: &T, b: &T) -> Option<Ordering> {
        a.partial_cmp(b)
    }
}

/// A total order given by a closure.
///
/// Construct one with `from_fn`.
pub struct FnComparator<T, F> {
    compare: F,
    _marker: PhantomData<fn(&T, &T)>,
}

/// Wraps a closure returning `Ordering` as a `Comparator`.
///
/// # Examples
///
/// ```
/// use avl_collections::avl_tree::AvlTree;
/// use avl_collections::comparator;
///
/// let mut tree = AvlTree::with_comparator(comparator::from_fn(|a: &u32, b: &u32| b.cmp(a)));
/// tree.add(1).unwrap().add(3).unwrap().add(2).unwrap();
/// assert_eq!(tree.iter().collect::<Vec<_>>(), vec![&3, &2, &1]);
/// ```
pub fn from_fn<T, F>(compare: F) -> FnComparator<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    FnComparator {
        compare,
        _marker: PhantomData,
    }
}

impl<T, F> Comparator<T> for FnComparator<T, F>
where
    F: Fn(&T, &T) -> Ordering,
{
    fn compare(&self, a: &T, b: &T) -> Option<Ordering> {
        Some((self.compare)(a, b))
    }
}

impl<T, F> fmt::Debug for FnComparator<T, F> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("FnComparator")
    }
}

#[cfg(test)]
mod tests {
    use super::{from_fn, Comparator, Natural, Partial};
    use std::cmp::Ordering;

    #[test]
    fn test_natural() {
        assert_eq!(Natural.compare(&1, &2), Some(Ordering::Less));
        assert!(Natural.is_comparable(&"a"));
    }

    #[test]
    fn test_partial_rejects_nan() {
        assert_eq!(Partial.compare(&1.0, &1.0), Some(Ordering::Equal));
        assert!(!Partial.is_comparable(&std::f64::NAN));
        assert_eq!(Partial.compare(&1.0, &std::f64::NAN), None);
    }

    #[test]
    fn test_from_fn() {
        let by_len = from_fn(|a: &&str, b: &&str| a.len().cmp(&b.len()));
        assert_eq!(by_len.compare(&"abc", &"z"), Some(Ordering::Greater));
        assert!(by_len.is_comparable(&""));
    }
}
