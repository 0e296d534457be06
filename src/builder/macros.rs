//! Macros for declaring categories.

/// Declare category markers and bind each to its state data type.
///
/// Each entry expands to an uninhabited enum and a
/// [`Category`](crate::core::Category) implementation whose `NAME` is the
/// marker's identifier.
///
/// # Example
///
/// ```
/// use stategraph::category;
/// use stategraph::core::{Category, StateData};
///
/// pub struct EnemyData {
///     pub health: u32,
/// }
///
/// pub struct PlayerData {
///     pub score: u64,
/// }
///
/// category! {
///     /// Hostile creatures.
///     pub Enemy => EnemyData;
///     pub Player => PlayerData;
/// }
///
/// let enemy: StateData<Enemy> = EnemyData { health: 3 };
/// assert_eq!(Enemy::NAME, "Enemy");
/// assert_eq!(Player::NAME, "Player");
/// # let _ = enemy.health;
/// ```
///
/// Pieces of different categories do not mix:
///
/// ```compile_fail,E0308
/// use stategraph::category;
/// use stategraph::core::Action;
/// use stategraph::builder::{GraphBuilder, StateBuilder};
///
/// pub struct EnemyData;
/// pub struct PlayerData;
///
/// category! {
///     pub Enemy => EnemyData;
///     pub Player => PlayerData;
/// }
///
/// let attack = Action::<Enemy>::new(|_| {});
///
/// let mut builder = GraphBuilder::<Player>::new();
/// let idle = builder.declare("Idle");
/// builder.define(idle, StateBuilder::new().action(attack));
/// ```
#[macro_export]
macro_rules! category {
    (
        $(
            $(#[$meta:meta])*
            $vis:vis $name:ident => $data:ty
        );+ $(;)?
    ) => {
        $(
            $(#[$meta])*
            #[derive(Debug)]
            $vis enum $name {}

            impl $crate::core::Category for $name {
                type Data = $data;
                const NAME: &'static str = stringify!($name);
            }
        )+
    };
}
