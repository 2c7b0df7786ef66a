//! Branching factor and height selection.
//!
//! A tree built for `count` elements uses the smallest order (branching
//! factor) whose `order`-level tree can hold every element. Each node holds
//! up to `order - 1` elements and up to `order` children, so a tree with
//! `height` levels holds `order^height - 1` elements. Both choices are pure
//! functions of `count`: two arrays of equal length always share one layout,
//! which is what makes lock-step traversal of two arrays possible.
//!
//! # Examples
//!
//! ```rust
//! use persistent_array::persistent::order::{Layout, choose_order, min_height};
//!
//! assert_eq!(choose_order(6), 3);
//! assert_eq!(min_height(3, 6), 2);
//! assert_eq!(Layout::for_count(6), Layout { order: 3, height: 2 });
//! ```

/// The smallest branching factor a tree may use.
pub const MIN_ORDER: usize = 2;

/// Returns `order^(height + 1) - 1`, the number of elements held by a
/// complete tree whose deepest node lies `height` edges below the root.
///
/// Returns `None` when the result does not fit in `usize`.
///
/// # Examples
///
/// ```rust
/// use persistent_array::persistent::order::max_elements;
///
/// assert_eq!(max_elements(2, 0), Some(1));
/// assert_eq!(max_elements(3, 2), Some(26));
/// assert_eq!(max_elements(2, 200), None);
/// ```
#[must_use]
pub fn max_elements(order: usize, height: u32) -> Option<usize> {
    // (order^height - 1) * order + (order - 1) == order^(height + 1) - 1,
    // which stays exact even when order^(height + 1) alone would overflow.
    let power = order.checked_pow(height)?;
    power
        .checked_sub(1)?
        .checked_mul(order)?
        .checked_add(order.checked_sub(1)?)
}

/// Returns `ceil(log_order(count + 1))`: the number of levels a tree of the
/// given order needs to hold `count` elements.
///
/// Computed exactly as the smallest `height` with `order^height > count`.
/// Orders below [`MIN_ORDER`] are treated as [`MIN_ORDER`].
///
/// # Examples
///
/// ```rust
/// use persistent_array::persistent::order::min_height;
///
/// assert_eq!(min_height(2, 0), 0);
/// assert_eq!(min_height(2, 1), 1);
/// assert_eq!(min_height(2, 3), 2);
/// assert_eq!(min_height(2, 4), 3);
/// ```
#[must_use]
pub fn min_height(order: usize, count: usize) -> u32 {
    let order = order.max(MIN_ORDER);
    let mut height = 0;
    let mut capacity: usize = 1;

    while capacity <= count {
        height += 1;
        match capacity.checked_mul(order) {
            Some(next) => capacity = next,
            // order^height exceeds usize::MAX, hence every count.
            None => return height,
        }
    }

    height
}

/// Returns the smallest order `>= 2` whose tree of at most `order` levels
/// can hold `count` elements, i.e. the smallest order with
/// `count < order^order`.
///
/// The result is non-decreasing in `count`.
///
/// # Examples
///
/// ```rust
/// use persistent_array::persistent::order::choose_order;
///
/// assert_eq!(choose_order(0), 2);
/// assert_eq!(choose_order(3), 2);
/// assert_eq!(choose_order(4), 3);
/// assert_eq!(choose_order(27), 4);
/// ```
#[must_use]
pub fn choose_order(count: usize) -> usize {
    let mut order = MIN_ORDER;
    while !fits(order, count) {
        order += 1;
    }
    order
}

fn fits(order: usize, count: usize) -> bool {
    u32::try_from(order).is_ok_and(|levels| min_height(order, count) <= levels)
}

/// The order and height chosen for a tree of a given length.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Layout {
    /// Branching factor: each node holds up to `order - 1` elements and
    /// `order` children.
    pub order: usize,
    /// Number of levels in the tree.
    pub height: u32,
}

impl Layout {
    /// Chooses the layout for `count` elements.
    #[must_use]
    pub fn for_count(count: usize) -> Self {
        let order = choose_order(count);
        Self {
            order,
            height: min_height(order, count),
        }
    }

    /// Returns the number of elements a tree with this layout can hold,
    /// or `None` if that number does not fit in `usize`.
    #[must_use]
    pub fn capacity(&self) -> Option<usize> {
        self.order
            .checked_pow(self.height)
            .map(|power| power - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(2, 0, Some(1))]
    #[case(2, 1, Some(3))]
    #[case(2, 2, Some(7))]
    #[case(3, 1, Some(8))]
    #[case(10, 2, Some(999))]
    #[case(2, 64, None)]
    fn test_max_elements(#[case] order: usize, #[case] height: u32, #[case] expected: Option<usize>) {
        assert_eq!(max_elements(order, height), expected);
    }

    #[cfg(target_pointer_width = "64")]
    #[rstest]
    fn test_max_elements_exact_at_word_boundary() {
        assert_eq!(max_elements(2, 63), Some(usize::MAX));
    }

    #[rstest]
    #[case(2, 0, 0)]
    #[case(2, 1, 1)]
    #[case(2, 2, 2)]
    #[case(2, 3, 2)]
    #[case(2, 4, 3)]
    #[case(3, 8, 2)]
    #[case(3, 9, 3)]
    #[case(10, 999, 3)]
    #[case(10, 1000, 4)]
    fn test_min_height(#[case] order: usize, #[case] count: usize, #[case] expected: u32) {
        assert_eq!(min_height(order, count), expected);
    }

    #[rstest]
    fn test_min_height_is_ceil_log() {
        for order in 2..6_usize {
            for count in 0..500_usize {
                let height = min_height(order, count);
                let power = order.pow(height);
                assert!(power > count);
                if height > 0 {
                    assert!(order.pow(height - 1) <= count);
                }
            }
        }
    }

    #[rstest]
    fn test_min_height_saturates_without_overflow() {
        assert_eq!(min_height(2, usize::MAX), usize::BITS);
    }

    #[rstest]
    fn test_min_height_levels_fit_max_elements() {
        for order in 2..6_usize {
            for count in 1..500_usize {
                let height = min_height(order, count);
                assert!(max_elements(order, height - 1).is_some_and(|capacity| capacity >= count));
            }
        }
    }

    #[rstest]
    #[case(2)]
    #[case(3)]
    #[case(4)]
    #[case(5)]
    #[case(6)]
    fn test_choose_order_at_powers(#[case] order: usize) {
        let power = order.pow(u32::try_from(order).unwrap());

        assert_eq!(choose_order(power - 1), order);
        assert_eq!(choose_order(power), order + 1);
        assert_eq!(choose_order(power + 1), order + 1);
    }

    #[rstest]
    fn test_choose_order_guarantee() {
        for count in 0..5000_usize {
            let order = choose_order(count);
            let levels = u32::try_from(order).unwrap();
            assert!(count < order.pow(levels));
            assert!(min_height(order, count) <= levels);
            if order > MIN_ORDER {
                let smaller = order - 1;
                assert!(count >= smaller.pow(levels - 1));
            }
        }
    }

    #[rstest]
    fn test_choose_order_is_monotone() {
        let mut previous = choose_order(0);
        for count in 1..5000_usize {
            let order = choose_order(count);
            assert!(order >= previous);
            previous = order;
        }
    }

    #[rstest]
    fn test_choose_order_terminates_for_largest_count() {
        let order = choose_order(usize::MAX);
        assert!(min_height(order, usize::MAX) <= u32::try_from(order).unwrap());
    }

    #[rstest]
    fn test_layout_for_count() {
        assert_eq!(Layout::for_count(0), Layout { order: 2, height: 0 });
        assert_eq!(Layout::for_count(10), Layout { order: 3, height: 3 });
        assert_eq!(Layout::for_count(100), Layout { order: 4, height: 4 });
    }

    #[rstest]
    fn test_layout_capacity_covers_count() {
        for count in 0..2000_usize {
            let layout = Layout::for_count(count);
            assert!(layout.capacity().is_some_and(|capacity| capacity >= count));
        }
    }
}
