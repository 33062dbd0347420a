//! Cost and equality policies.
//!
//! A [`CostPolicy`] decides what replacing one character with another costs.
//! Identical characters, and characters the collator folds together, always
//! cost 0. Everything else costs 1 unless a [`SubstitutionCost`] says
//! otherwise.

use crate::collation::{Collator, Strength};
use crate::error::{BoxError, DistanceError, Result};
use std::fmt;
use std::sync::Arc;

type CostFn = dyn Fn(char, char) -> std::result::Result<usize, BoxError> + Send + Sync;

/// Caller-supplied substitution cost, queried as `cost(char_from_a, char_from_b)`.
///
/// The function is never assumed to be symmetric.
#[derive(Clone)]
pub struct SubstitutionCost(Arc<CostFn>);

impl SubstitutionCost {
    /// Wrap an infallible cost function.
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(char, char) -> usize + Send + Sync + 'static,
    {
        Self(Arc::new(move |a, b| Ok(f(a, b))))
    }

    /// Wrap a cost function that may fail.
    pub fn fallible<F>(f: F) -> Self
    where
        F: Fn(char, char) -> std::result::Result<usize, BoxError> + Send + Sync + 'static,
    {
        Self(Arc::new(f))
    }

    /// Cost of replacing `a` with `b`.
    pub fn cost(&self, a: char, b: char) -> std::result::Result<usize, BoxError> {
        (self.0)(a, b)
    }
}

impl fmt::Debug for SubstitutionCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SubstitutionCost(..)")
    }
}

/// Options recognised by every entry point.
#[derive(Debug, Clone, Default)]
pub struct DistanceOptions {
    /// Compare characters through a collator instead of by code point
    pub use_collator: bool,
    /// Strength used when `use_collator` is set
    pub collation_strength: Strength,
    /// Custom cost for characters that are not equal
    pub substitution_cost: Option<SubstitutionCost>,
}

impl DistanceOptions {
    /// Default options: exact equality, mismatches cost 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable or disable collation-based equality.
    pub fn with_collator(mut self, enabled: bool) -> Self {
        self.use_collator = enabled;
        self
    }

    /// Set the collation strength.
    pub fn with_strength(mut self, strength: Strength) -> Self {
        self.collation_strength = strength;
        self
    }

    /// Use a custom substitution cost.
    pub fn with_substitution_cost(mut self, cost: impl Into<SubstitutionCost>) -> Self {
        self.substitution_cost = Some(cost.into());
        self
    }
}

/// How characters are compared before any cost is looked up.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Equality {
    /// Identical code points only
    #[default]
    Exact,
    /// Collation keys
    Collation(Collator),
}

/// Strategy object passed to each computation.
#[derive(Debug, Clone, Default)]
pub struct CostPolicy {
    equality: Equality,
    substitution: Option<SubstitutionCost>,
}

impl CostPolicy {
    /// Exact equality, unit mismatch cost.
    pub fn exact() -> Self {
        Self::default()
    }

    /// Collation-based equality, unit mismatch cost.
    pub fn collation(collator: Collator) -> Self {
        Self {
            equality: Equality::Collation(collator),
            substitution: None,
        }
    }

    /// Add a custom substitution cost.
    pub fn with_substitution_cost(mut self, cost: SubstitutionCost) -> Self {
        self.substitution = Some(cost);
        self
    }

    /// Build the policy described by `options`.
    pub fn from_options(options: &DistanceOptions) -> Self {
        let equality = if options.use_collator {
            Equality::Collation(Collator::new(options.collation_strength))
        } else {
            Equality::Exact
        };
        Self {
            equality,
            substitution: options.substitution_cost.clone(),
        }
    }

    /// The equality strategy.
    pub fn equality(&self) -> Equality {
        self.equality
    }

    /// Returns true for the default policy, which can never fail.
    pub fn is_exact(&self) -> bool {
        self.equality == Equality::Exact && self.substitution.is_none()
    }

    /// Returns true if the policy treats `a` and `b` as equal.
    pub fn equal(&self, a: char, b: char) -> bool {
        match self.equality {
            Equality::Exact => a == b,
            Equality::Collation(collator) => collator.equals(a, b),
        }
    }

    /// Cost of replacing `a` with `b` under this policy.
    pub fn substitution_cost(&self, a: char, b: char) -> Result<usize> {
        if self.equal(a, b) {
            return Ok(0);
        }
        self.mismatch_cost(a, b)
    }

    fn mismatch_cost(&self, a: char, b: char) -> Result<usize> {
        match &self.substitution {
            Some(cost) => cost.cost(a, b).map_err(DistanceError::CostFunction),
            None => Ok(1),
        }
    }

    /// Collect both inputs and precompute collation keys.
    pub(crate) fn prepare(&self, a: &str, b: &str) -> Operands {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        let keys = match self.equality {
            Equality::Exact => None,
            Equality::Collation(collator) => Some((collator.keys(&a), collator.keys(&b))),
        };
        Operands {
            a,
            b,
            keys,
            policy: self.clone(),
        }
    }
}

/// Both sequences of one computation, ready for per-cell cost lookups.
#[derive(Debug)]
pub(crate) struct Operands {
    pub(crate) a: Vec<char>,
    pub(crate) b: Vec<char>,
    keys: Option<(Vec<char>, Vec<char>)>,
    policy: CostPolicy,
}

impl Operands {
    /// Cost of replacing `a[i]` with `b[j]`.
    #[inline]
    pub(crate) fn substitution_cost(&self, i: usize, j: usize) -> Result<usize> {
        let (x, y) = (self.a[i], self.b[j]);
        if x == y {
            return Ok(0);
        }
        if let Some((keys_a, keys_b)) = &self.keys {
            if keys_a[i] == keys_b[j] {
                return Ok(0);
            }
        }
        self.policy.mismatch_cost(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_exact_policy() {
        let policy = CostPolicy::exact();
        assert!(policy.is_exact());
        assert_eq!(policy.substitution_cost('a', 'a').unwrap(), 0);
        assert_eq!(policy.substitution_cost('a', 'A').unwrap(), 1);
    }

    #[test]
    fn test_options_build_collation_policy() {
        let options = DistanceOptions::new().with_collator(true);
        let policy = CostPolicy::from_options(&options);
        assert_eq!(policy.equality(), Equality::Collation(Collator::base_letters()));
        assert_eq!(policy.substitution_cost('ï', 'I').unwrap(), 0);
    }

    #[test]
    fn test_custom_cost_not_called_for_equal_chars() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cost = SubstitutionCost::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
            5
        });
        let policy = CostPolicy::collation(Collator::base_letters()).with_substitution_cost(cost);

        assert_eq!(policy.substitution_cost('e', 'é').unwrap(), 0);
        assert_eq!(policy.substitution_cost('e', 'x').unwrap(), 5);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_cost_argument_order() {
        let cost = SubstitutionCost::new(|a, b| if (a, b) == ('a', 'b') { 0 } else { 3 });
        let policy = CostPolicy::exact().with_substitution_cost(cost);
        assert_eq!(policy.substitution_cost('a', 'b').unwrap(), 0);
        assert_eq!(policy.substitution_cost('b', 'a').unwrap(), 3);
    }

    #[test]
    fn test_failing_cost_function() {
        let cost = SubstitutionCost::fallible(|_, _| Err("unsupported pair".into()));
        let policy = CostPolicy::exact().with_substitution_cost(cost);
        let err = policy.substitution_cost('x', 'y').unwrap_err();
        assert!(matches!(err, DistanceError::CostFunction(_)));
        assert_eq!(err.to_string(), "unsupported pair");
    }

    #[test]
    fn test_operands_use_precomputed_keys() {
        let policy = CostPolicy::collation(Collator::base_letters());
        let operands = policy.prepare("Café", "cafe");
        assert_eq!(operands.a.len(), 4);
        assert_eq!(operands.substitution_cost(0, 0).unwrap(), 0);
        assert_eq!(operands.substitution_cost(3, 3).unwrap(), 0);
        assert_eq!(operands.substitution_cost(0, 1).unwrap(), 1);
    }
}
