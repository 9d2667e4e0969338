pub mod creature;
pub mod food;

pub use creature::Creature;
pub use food::Food;
