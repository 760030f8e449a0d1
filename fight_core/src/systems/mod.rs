pub mod ai;
pub mod animation;
pub mod collision;
pub mod controls;
pub mod movement;
pub mod specials;
pub mod timers;

pub use ai::*;
pub use animation::*;
pub use collision::*;
pub use controls::*;
pub use movement::*;
pub use specials::*;
pub use timers::*;
