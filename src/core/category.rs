//! Category markers that scope every other component.
//!
//! A category names a kind of entity (an enemy, a player, an NPC) and binds
//! the one data type its states operate on. Decisions, actions, states,
//! graphs and controllers are all generic over a category, so mixing pieces
//! built for different categories is a type error rather than a runtime
//! failure.

/// Compile-time tag for an entity kind.
///
/// Implementors are normally uninhabited enums generated by the
/// [`category!`](crate::category) macro. The associated `Data` type is the
/// per-entity payload that actions mutate and decisions inspect.
///
/// # Example
///
/// ```rust
/// use stategraph::core::{Category, StateData};
///
/// pub struct EnemyData {
///     pub health: u32,
/// }
///
/// pub enum Enemy {}
///
/// impl Category for Enemy {
///     type Data = EnemyData;
///     const NAME: &'static str = "Enemy";
/// }
///
/// let data: StateData<Enemy> = EnemyData { health: 10 };
/// assert_eq!(data.health, 10);
/// assert_eq!(Enemy::NAME, "Enemy");
/// ```
pub trait Category: 'static {
    /// The payload owned by each controller of this category.
    type Data: 'static;

    /// Stable name used when a category has to be identified at runtime,
    /// such as in serialized graph definitions and checkpoints.
    const NAME: &'static str;
}

/// The state data bound to a category.
pub type StateData<C> = <C as Category>::Data;

#[cfg(test)]
mod tests {
    use super::*;
    use std::any::TypeId;

    struct NpcData;
    struct GuardData;

    enum Npc {}
    enum Guard {}

    impl Category for Npc {
        type Data = NpcData;
        const NAME: &'static str = "Npc";
    }

    impl Category for Guard {
        type Data = GuardData;
        const NAME: &'static str = "Guard";
    }

    #[test]
    fn state_data_alias_resolves_to_bound_type() {
        assert_eq!(TypeId::of::<StateData<Npc>>(), TypeId::of::<NpcData>());
        assert_eq!(TypeId::of::<StateData<Guard>>(), TypeId::of::<GuardData>());
    }

    #[test]
    fn categories_have_distinct_names() {
        assert_ne!(Npc::NAME, Guard::NAME);
    }
}
