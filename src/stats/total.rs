//! Saturating arithmetic for statistics totals.
//!
//! Counters and durations come from untrusted traces; adding them clamps at
//! the type's maximum instead of overflowing.

use std::time::Duration;

/// A value that can be added up without overflowing
pub trait SaturatingTotal: Copy + Default {
    fn total_with(self, other: Self) -> Self;
}

impl SaturatingTotal for u64 {
    fn total_with(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

impl SaturatingTotal for Duration {
    fn total_with(self, other: Self) -> Self {
        self.saturating_add(other)
    }
}

/// Add `other` into `total`, clamping at the maximum
pub fn add_to<T: SaturatingTotal>(total: &mut T, other: T) {
    *total = total.total_with(other);
}

/// Sum of `values`, clamped at the maximum
pub fn saturating_sum<'a, T, I>(values: I) -> T
where
    T: SaturatingTotal + 'a,
    I: IntoIterator<Item = &'a T>,
{
    values
        .into_iter()
        .fold(T::default(), |acc, value| acc.total_with(*value))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sum_clamps_counters() {
        assert_eq!(saturating_sum(&[u64::MAX, 1, 5]), u64::MAX);
        assert_eq!(saturating_sum(&[2u64, 3]), 5);
    }

    #[test]
    fn test_sum_clamps_durations() {
        let huge = Duration::from_secs(u64::MAX);
        assert_eq!(saturating_sum(&[huge, huge]), Duration::MAX);
        assert_eq!(saturating_sum::<Duration, _>(&[]), Duration::ZERO);
    }

    #[test]
    fn test_add_to() {
        let mut total = u64::MAX - 1;
        add_to(&mut total, 10);
        assert_eq!(total, u64::MAX);
    }
}
