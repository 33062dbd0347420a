//! Synchronous driver: runs the kernel to completion on the calling thread.

use crate::error::Result;
use crate::kernel::{self, trivial_distance};
use crate::policy::{CostPolicy, DistanceOptions};
use std::convert::Infallible;

/// Calculate the Levenshtein distance between two strings.
///
/// # Arguments
/// * `a` - First string
/// * `b` - Second string
/// * `options` - Collation and substitution cost settings
///
/// # Returns
/// The edit distance, or the error of a failing substitution cost function.
///
/// # Example
/// ```
/// use fastlev_distance::{distance, DistanceOptions};
///
/// let options = DistanceOptions::new().with_collator(true);
/// assert_eq!(distance("mikailovitch", "Mikhaïlovitch", &options).unwrap(), 1);
/// ```
pub fn distance(a: &str, b: &str, options: &DistanceOptions) -> Result<usize> {
    distance_with_policy(a, b, &CostPolicy::from_options(options))
}

/// Calculate the distance under an explicit [`CostPolicy`].
pub fn distance_with_policy(a: &str, b: &str, policy: &CostPolicy) -> Result<usize> {
    if let Some(d) = trivial_distance(a, b) {
        return Ok(d);
    }
    if policy.is_exact() {
        return Ok(distance_exact(a, b));
    }

    let operands = policy.prepare(a, b);
    kernel::compute(operands.a.len(), operands.b.len(), |i, j| {
        operands.substitution_cost(i, j)
    })
}

/// Calculate the distance with exact equality and unit costs.
///
/// Number of single-character edits needed to transform `a` into `b`.
pub fn distance_exact(a: &str, b: &str) -> usize {
    if let Some(d) = trivial_distance(a, b) {
        return d;
    }

    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let result: std::result::Result<usize, Infallible> =
        kernel::compute(a.len(), b.len(), |i, j| Ok(usize::from(a[i] != b[j])));

    match result {
        Ok(d) => d,
        Err(never) => match never {},
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CostTable, DistanceError, SubstitutionCost};
    use proptest::prelude::*;

    const HELLO: &str = "hello";

    #[test]
    fn test_prefix_ladder() {
        for i in 0..=HELLO.len() {
            assert_eq!(distance_exact(&HELLO[..i], HELLO), HELLO.len() - i);
            assert_eq!(distance_exact(HELLO, &HELLO[..i]), HELLO.len() - i);
        }
    }

    #[test]
    fn test_known_pairs() {
        assert_eq!(distance_exact("Hello", "hello"), 1);
        assert_eq!(distance_exact("book", "back"), 2);
        assert_eq!(distance_exact("kitten", "sitting"), 3);
    }

    #[test]
    fn test_non_latin() {
        assert_eq!(
            distance_exact("因為我是中國人所以我會說中文", "因為我是英國人所以我會說英文"),
            2
        );
    }

    #[test]
    fn test_sentences() {
        let a = "Morbi interdum ultricies neque varius condimentum. Donec volutpat turpis interdum metus ultricies vulputate. Duis ultricies rhoncus sapien, sit amet fermentum risus imperdiet vitae. Ut et lectus";
        let b = "Duis erat dolor, cursus in tincidunt a, lobortis in odio. Cras magna sem, pharetra et iaculis quis, faucibus quis tellus. Suspendisse dapibus sapien in justo cursus";
        assert_eq!(distance_exact(a, b), 143);
    }

    #[test]
    fn test_collator_reduces_diacritic_differences() {
        let plain = DistanceOptions::new();
        let collated = DistanceOptions::new().with_collator(true);
        assert_eq!(distance("mikailovitch", "Mikhaïlovitch", &plain).unwrap(), 3);
        assert_eq!(distance("mikailovitch", "Mikhaïlovitch", &collated).unwrap(), 1);
    }

    #[test]
    fn test_collator_keeps_hangul_syllables_apart() {
        let collated = DistanceOptions::new().with_collator(true);
        assert_eq!(distance("한국", "할굴", &collated).unwrap(), 2);
        assert_eq!(distance("한국", "한국어", &collated).unwrap(), 1);
    }

    #[test]
    fn test_zero_cost_pairs_collapse_distance() {
        let cost = SubstitutionCost::new(|a, b| match (a, b) {
            ('b', '8') | ('8', 'b') => 0,
            _ => 1,
        });
        let options = DistanceOptions::new().with_substitution_cost(cost);
        assert_eq!(distance("appp8", "apppb", &options).unwrap(), 0);
        assert_eq!(distance("b8b8", "8b8b", &options).unwrap(), 0);
        assert_eq!(distance("appp8", "appq8", &options).unwrap(), 1);
    }

    #[test]
    fn test_cost_table_options() {
        let table = CostTable::default().with_rule('0', 'o', 0).symmetric(true);
        let options = DistanceOptions::new().with_substitution_cost(table);
        assert_eq!(distance("f00", "foo", &options).unwrap(), 0);
    }

    #[test]
    fn test_higher_substitution_cost_prefers_indels() {
        let options = DistanceOptions::new().with_substitution_cost(SubstitutionCost::new(|_, _| 5));
        // Replacing costs 5, deleting then inserting costs 2.
        assert_eq!(distance("a", "b", &options).unwrap(), 2);
    }

    #[test]
    fn test_cost_error_propagates_unwrapped() {
        let cost = SubstitutionCost::fallible(|a, _| {
            if a == 'x' { Err(format!("no cost for {a}").into()) } else { Ok(1) }
        });
        let options = DistanceOptions::new().with_substitution_cost(cost);
        let err = distance("abx", "abc", &options).unwrap_err();
        assert!(matches!(err, DistanceError::CostFunction(_)));
        assert_eq!(err.to_string(), "no cost for x");
    }

    #[test]
    fn test_failing_cost_not_reached_for_trivial_inputs() {
        let cost = SubstitutionCost::fallible(|_, _| Err("never".into()));
        let options = DistanceOptions::new().with_substitution_cost(cost);
        assert_eq!(distance("same", "same", &options).unwrap(), 0);
        assert_eq!(distance("", "abc", &options).unwrap(), 3);
    }

    proptest! {
        #[test]
        fn prop_identity(a in "\\PC{0,24}") {
            prop_assert_eq!(distance_exact(&a, &a), 0);
        }

        #[test]
        fn prop_empty_side(a in "\\PC{0,24}") {
            let len = a.chars().count();
            prop_assert_eq!(distance_exact("", &a), len);
            prop_assert_eq!(distance_exact(&a, ""), len);
        }

        #[test]
        fn prop_symmetric_and_bounded(a in "[a-e]{0,16}", b in "[a-e]{0,16}") {
            let d = distance_exact(&a, &b);
            let (m, n) = (a.chars().count(), b.chars().count());
            prop_assert_eq!(d, distance_exact(&b, &a));
            prop_assert!(d >= m.abs_diff(n));
            prop_assert!(d <= m.max(n));
        }

        #[test]
        fn prop_triangle_inequality(
            a in "[a-d]{0,12}",
            b in "[a-d]{0,12}",
            c in "[a-d]{0,12}",
        ) {
            prop_assert!(distance_exact(&a, &b) <= distance_exact(&a, &c) + distance_exact(&c, &b));
        }

        #[test]
        fn prop_collator_never_increases_distance(a in "[aAáeé]{0,12}", b in "[aAáeé]{0,12}") {
            let collated = distance(&a, &b, &DistanceOptions::new().with_collator(true)).unwrap();
            prop_assert!(collated <= distance_exact(&a, &b));
        }
    }
}
