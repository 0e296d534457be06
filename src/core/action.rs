//! Actions: operations a state performs on every cycle it is active.

use super::category::{Category, StateData};
use std::fmt;
use std::sync::Arc;

/// A reusable action rule.
///
/// The counterpart of [`Decide`](super::Decide) for side-effecting work.
pub trait Perform<C: Category>: Send + Sync {
    /// Run the action against the entity's data.
    fn perform(&self, data: &mut StateData<C>);
}

/// Operation run against an entity's data while a state is active.
///
/// An action has no knowledge of which state runs it or what other states
/// exist; a state only lists the actions that are valid for it, so there is
/// no per-cycle conditional skipping.
///
/// # Example
///
/// ```rust
/// use stategraph::core::Action;
/// use stategraph::category;
///
/// pub struct Turret {
///     pub ammo: u32,
/// }
///
/// category! {
///     pub Defense => Turret
/// }
///
/// let fire = Action::<Defense>::new(|t| t.ammo = t.ammo.saturating_sub(1));
///
/// let mut turret = Turret { ammo: 2 };
/// fire.perform(&mut turret);
/// fire.perform(&mut turret);
/// fire.perform(&mut turret);
/// assert_eq!(turret.ammo, 0);
/// ```
pub struct Action<C: Category> {
    run: Arc<dyn Fn(&mut StateData<C>) + Send + Sync>,
}

impl<C: Category> Action<C> {
    /// Create an action from a closure.
    pub fn new<F>(run: F) -> Self
    where
        F: Fn(&mut StateData<C>) + Send + Sync + 'static,
    {
        Action { run: Arc::new(run) }
    }

    /// Create an action from a [`Perform`] rule object.
    pub fn from_rule<R>(rule: R) -> Self
    where
        R: Perform<C> + 'static,
    {
        Self::new(move |data| rule.perform(data))
    }

    /// Run the action.
    pub fn perform(&self, data: &mut StateData<C>) {
        (self.run)(data)
    }
}

impl<C: Category> Clone for Action<C> {
    fn clone(&self) -> Self {
        Self {
            run: Arc::clone(&self.run),
        }
    }
}

impl<C: Category> fmt::Debug for Action<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Action")
            .field("category", &C::NAME)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Drone {
        battery: u32,
        log: Vec<&'static str>,
    }

    enum Swarm {}

    impl Category for Swarm {
        type Data = Drone;
        const NAME: &'static str = "Swarm";
    }

    #[test]
    fn action_mutates_data() {
        let charge = Action::<Swarm>::new(|d| d.battery += 10);
        let mut drone = Drone::default();

        charge.perform(&mut drone);
        charge.perform(&mut drone);

        assert_eq!(drone.battery, 20);
    }

    #[test]
    fn rule_objects_become_actions() {
        struct Note(&'static str);

        impl Perform<Swarm> for Note {
            fn perform(&self, data: &mut Drone) {
                data.log.push(self.0);
            }
        }

        let note = Action::from_rule(Note("hover"));
        let mut drone = Drone::default();
        note.perform(&mut drone);

        assert_eq!(drone.log, vec!["hover"]);
    }

    #[test]
    fn debug_names_the_category() {
        let idle = Action::<Swarm>::new(|_| {});
        assert!(format!("{idle:?}").contains("Swarm"));
    }
}
