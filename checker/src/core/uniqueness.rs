//! Duplicate detection over a validated sequence.

use crate::error::CheckError;

/// Find the first pair of equal elements in `(value, index)` order.
///
/// Elements are paired with their original index and sorted by value, then by
/// index; the first adjacent equal pair is reported as `(i, j)` with `i < j`.
/// This is the smallest duplicated value and its two earliest occurrences.
pub fn first_duplicate<T: Ord>(values: &[T]) -> Option<(usize, usize)> {
    let mut indexed: Vec<(&T, usize)> = values.iter().zip(0..).collect();
    indexed.sort();
    indexed
        .windows(2)
        .find(|pair| pair[0].0 == pair[1].0)
        .map(|pair| (pair[0].1, pair[1].1))
}

/// Fail with a format error naming the first colliding pair of indices.
pub fn check_unique<T: Ord>(values: &[T], label: &str) -> Result<(), CheckError> {
    match first_duplicate(values) {
        None => Ok(()),
        Some((first, second)) => Err(CheckError::Format {
            location: label.to_string(),
            message: format!(
                "duplicate values: {label}[{first}] and {label}[{second}] are equal"
            ),
        }),
    }
}
