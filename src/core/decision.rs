//! Decisions: pure predicates over a category's state data.
//!
//! A decision answers one yes/no question about an entity ("can I see the
//! player?", "is the target in range?"). Transitions use decisions to pick
//! their next state. Decisions must not mutate the data they inspect; the
//! engine re-evaluates them every cycle and relies on them being
//! deterministic.

use super::category::{Category, StateData};
use std::fmt;
use std::sync::Arc;

/// A reusable decision rule.
///
/// Implement this for named rule types when a closure is not enough, for
/// example when a rule carries its own tuning parameters.
///
/// # Example
///
/// ```rust
/// use stategraph::core::{Decide, Decision};
/// use stategraph::category;
///
/// pub struct Wolf {
///     pub distance_to_prey: f32,
/// }
///
/// category! {
///     pub Hunter => Wolf
/// }
///
/// struct WithinRange(f32);
///
/// impl Decide<Hunter> for WithinRange {
///     fn decide(&self, data: &Wolf) -> bool {
///         data.distance_to_prey <= self.0
///     }
/// }
///
/// let in_range = Decision::from_rule(WithinRange(5.0));
/// assert!(in_range.evaluate(&Wolf { distance_to_prey: 3.0 }));
/// assert!(!in_range.evaluate(&Wolf { distance_to_prey: 8.0 }));
/// ```
pub trait Decide<C: Category>: Send + Sync {
    /// Evaluate the rule against the entity's data.
    fn decide(&self, data: &StateData<C>) -> bool;
}

/// Pure predicate that selects between the two branches of a transition.
///
/// Decisions are cheap to clone; clones share the same underlying rule, so
/// one decision can back transitions in many states.
///
/// # Example
///
/// ```rust
/// use stategraph::core::Decision;
/// use stategraph::category;
///
/// pub struct Sentry {
///     pub sees_player: bool,
/// }
///
/// category! {
///     pub Watcher => Sentry
/// }
///
/// let sees_player = Decision::<Watcher>::new(|s| s.sees_player);
///
/// assert!(sees_player.evaluate(&Sentry { sees_player: true }));
/// assert!(!sees_player.evaluate(&Sentry { sees_player: false }));
/// ```
pub struct Decision<C: Category> {
    rule: Arc<dyn Fn(&StateData<C>) -> bool + Send + Sync>,
}

impl<C: Category> Decision<C> {
    /// Create a decision from a pure predicate.
    ///
    /// The predicate must be deterministic and thread-safe (Send + Sync).
    pub fn new<F>(predicate: F) -> Self
    where
        F: Fn(&StateData<C>) -> bool + Send + Sync + 'static,
    {
        Decision {
            rule: Arc::new(predicate),
        }
    }

    /// Create a decision from a [`Decide`] rule object.
    pub fn from_rule<R>(rule: R) -> Self
    where
        R: Decide<C> + 'static,
    {
        Self::new(move |data| rule.decide(data))
    }

    /// Decision with a fixed outcome, independent of the data.
    pub fn always(outcome: bool) -> Self {
        Self::new(move |_| outcome)
    }

    /// Evaluate the decision against the entity's data.
    pub fn evaluate(&self, data: &StateData<C>) -> bool {
        (self.rule)(data)
    }

    /// Decision that holds when this one does not.
    pub fn not(&self) -> Self {
        let inner = self.clone();
        Self::new(move |data| !inner.evaluate(data))
    }

    /// Decision that holds when both hold. Short-circuits on `self`.
    pub fn and(&self, other: &Decision<C>) -> Self {
        let (left, right) = (self.clone(), other.clone());
        Self::new(move |data| left.evaluate(data) && right.evaluate(data))
    }

    /// Decision that holds when either holds. Short-circuits on `self`.
    pub fn or(&self, other: &Decision<C>) -> Self {
        let (left, right) = (self.clone(), other.clone());
        Self::new(move |data| left.evaluate(data) || right.evaluate(data))
    }
}

impl<C: Category> Clone for Decision<C> {
    fn clone(&self) -> Self {
        Self {
            rule: Arc::clone(&self.rule),
        }
    }
}

impl<C: Category> fmt::Debug for Decision<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decision")
            .field("category", &C::NAME)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scout {
        sees_player: bool,
        health: u32,
    }

    enum Recon {}

    impl Category for Recon {
        type Data = Scout;
        const NAME: &'static str = "Recon";
    }

    fn scout(sees_player: bool, health: u32) -> Scout {
        Scout {
            sees_player,
            health,
        }
    }

    #[test]
    fn decision_reflects_data() {
        let sees = Decision::<Recon>::new(|s| s.sees_player);

        assert!(sees.evaluate(&scout(true, 10)));
        assert!(!sees.evaluate(&scout(false, 10)));
    }

    #[test]
    fn decision_is_deterministic() {
        let data = scout(true, 3);
        let wounded = Decision::<Recon>::new(|s| s.health < 5);

        assert_eq!(wounded.evaluate(&data), wounded.evaluate(&data));
    }

    #[test]
    fn rule_objects_become_decisions() {
        struct HealthBelow(u32);

        impl Decide<Recon> for HealthBelow {
            fn decide(&self, data: &Scout) -> bool {
                data.health < self.0
            }
        }

        let wounded = Decision::from_rule(HealthBelow(5));
        assert!(wounded.evaluate(&scout(false, 4)));
        assert!(!wounded.evaluate(&scout(false, 5)));
    }

    #[test]
    fn combinators_compose() {
        let sees = Decision::<Recon>::new(|s| s.sees_player);
        let wounded = Decision::<Recon>::new(|s| s.health < 5);

        let flee = sees.and(&wounded);
        let alert = sees.or(&wounded);
        let calm = sees.not();

        assert!(flee.evaluate(&scout(true, 1)));
        assert!(!flee.evaluate(&scout(true, 9)));
        assert!(alert.evaluate(&scout(false, 1)));
        assert!(!alert.evaluate(&scout(false, 9)));
        assert!(calm.evaluate(&scout(false, 9)));
    }

    #[test]
    fn always_ignores_data() {
        assert!(Decision::<Recon>::always(true).evaluate(&scout(false, 0)));
        assert!(!Decision::<Recon>::always(false).evaluate(&scout(true, 0)));
    }

    #[test]
    fn clones_share_the_rule() {
        let sees = Decision::<Recon>::new(|s| s.sees_player);
        let copy = sees.clone();

        assert!(Arc::ptr_eq(&sees.rule, &copy.rule));
    }
}
