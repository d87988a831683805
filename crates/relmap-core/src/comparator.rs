//! # Comparators
//!
//! Ordering for a logical type, chosen once when the descriptor is built.
//! Types with no meaningful order get [`Comparator::unordered`], which reports
//! every pair as equal. That order exists only so collections of values can
//! be sorted stably; correctness never depends on it.

use std::cmp::Ordering;

/// An ordering over `T`, fixed at construction.
pub struct Comparator<T> {
    compare: fn(&T, &T) -> Ordering,
    ordered: bool,
}

impl<T> Comparator<T> {
    /// An ordering given by `compare`.
    pub fn by(compare: fn(&T, &T) -> Ordering) -> Self {
        Self {
            compare,
            ordered: true,
        }
    }

    /// The degenerate ordering: every pair compares equal.
    pub fn unordered() -> Self {
        Self {
            compare: always_equal::<T>,
            ordered: false,
        }
    }

    /// Compare two values.
    pub fn compare(&self, a: &T, b: &T) -> Ordering {
        (self.compare)(a, b)
    }

    /// Whether this comparator reflects a real order.
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }
}

impl<T: Ord> Comparator<T> {
    /// The type's natural total order.
    pub fn natural() -> Self {
        Self::by(T::cmp)
    }
}

// Manual impls: a derive would require `T: Clone`.
impl<T> Clone for Comparator<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Comparator<T> {}

impl<T> std::fmt::Debug for Comparator<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Comparator")
            .field("ordered", &self.ordered)
            .finish()
    }
}

fn always_equal<T>(_: &T, _: &T) -> Ordering {
    Ordering::Equal
}
