//! Two-row dynamic-programming kernel shared by every driver.
//!
//! Only the `previous` and `current` rows of the cost matrix are kept. After a
//! cell is computed its left neighbour is copied back into `previous`, so by
//! the end of a row both rows hold the same values and the next row can start
//! without swapping or reallocating.

/// Distance for inputs that never need a DP row.
///
/// Identical sequences cost nothing, and an empty side costs the length of
/// the other one.
pub(crate) fn trivial_distance(a: &str, b: &str) -> Option<usize> {
    if a == b {
        return Some(0);
    }
    if a.is_empty() {
        return Some(b.chars().count());
    }
    if b.is_empty() {
        return Some(a.chars().count());
    }
    None
}

/// The two DP rows of one computation.
#[derive(Debug, Clone)]
pub(crate) struct Rows {
    previous: Vec<usize>,
    current: Vec<usize>,
}

impl Rows {
    /// Allocate rows for a second sequence of length `n`.
    ///
    /// `previous` starts as `[0, 1, .., n]`: the cost of building each prefix
    /// of the second sequence from nothing.
    pub(crate) fn new(n: usize) -> Self {
        Self {
            previous: (0..=n).collect(),
            current: vec![0; n + 1],
        }
    }

    /// Start row `i` (0-based index into the first sequence).
    #[inline]
    pub(crate) fn begin_row(&mut self, i: usize) {
        self.current[0] = i + 1;
    }

    /// Compute `current[j + 1]` and recycle `current[j]` into `previous`.
    #[inline]
    pub(crate) fn cell(&mut self, j: usize, substitution: usize) {
        let value = self.previous[j]
            .saturating_add(substitution) // substitution
            .min(self.current[j] + 1) // insertion
            .min(self.previous[j + 1] + 1); // deletion

        self.current[j + 1] = value;
        self.previous[j] = self.current[j];
    }

    /// Copy the last cell so both rows agree before the next row starts.
    #[inline]
    pub(crate) fn finish_row(&mut self) {
        let n = self.current.len() - 1;
        self.previous[n] = self.current[n];
    }

    /// Distance accumulated so far in the last column.
    #[inline]
    pub(crate) fn result(&self) -> usize {
        self.current[self.current.len() - 1]
    }
}

/// Run the full recurrence over an `m` x `n` matrix.
///
/// `substitution(i, j)` is asked for the cost of replacing `a[i]` with `b[j]`,
/// always in that argument order. The first error aborts the computation.
/// Both `m` and `n` must be non-zero; callers handle empty inputs through
/// [`trivial_distance`].
pub(crate) fn compute<E>(
    m: usize,
    n: usize,
    mut substitution: impl FnMut(usize, usize) -> Result<usize, E>,
) -> Result<usize, E> {
    debug_assert!(m > 0 && n > 0, "empty inputs take the trivial path");

    let mut rows = Rows::new(n);
    for i in 0..m {
        rows.begin_row(i);
        for j in 0..n {
            let cost = substitution(i, j)?;
            rows.cell(j, cost);
        }
        rows.finish_row();
    }

    Ok(rows.result())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn exact(a: &str, b: &str) -> usize {
        if let Some(d) = trivial_distance(a, b) {
            return d;
        }
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let result: Result<usize, Infallible> =
            compute(a.len(), b.len(), |i, j| Ok(usize::from(a[i] != b[j])));
        result.unwrap()
    }

    #[test]
    fn test_trivial_paths() {
        assert_eq!(trivial_distance("same", "same"), Some(0));
        assert_eq!(trivial_distance("", "héllo"), Some(5));
        assert_eq!(trivial_distance("héllo", ""), Some(5));
        assert_eq!(trivial_distance("a", "b"), None);
    }

    #[test]
    fn test_kitten_sitting() {
        assert_eq!(exact("kitten", "sitting"), 3);
    }

    #[test]
    fn test_book_back() {
        assert_eq!(exact("book", "back"), 2);
    }

    #[test]
    fn test_rows_agree_after_each_row() {
        let a: Vec<char> = "flaw".chars().collect();
        let b: Vec<char> = "lawn".chars().collect();
        let mut rows = Rows::new(b.len());

        for (i, x) in a.iter().enumerate() {
            rows.begin_row(i);
            for (j, y) in b.iter().enumerate() {
                rows.cell(j, usize::from(x != y));
            }
            rows.finish_row();
            assert_eq!(rows.previous, rows.current);
        }
        assert_eq!(rows.result(), 2);
    }

    #[test]
    fn test_error_aborts_computation() {
        let mut calls = 0;
        let result: Result<usize, &str> = compute(3, 3, |i, j| {
            calls += 1;
            if (i, j) == (1, 0) { Err("boom") } else { Ok(1) }
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(calls, 4);
    }

    #[test]
    fn test_huge_cost_saturates() {
        let result: Result<usize, Infallible> = compute(1, 1, |_, _| Ok(usize::MAX));
        assert_eq!(result.unwrap(), 2);
    }
}
