pub mod generate;
pub mod moves;

pub use generate::{generate, generate_with};
pub use moves::{Axis, ClockPin, Face, Modifier, MoveToken, Scramble, Tip, WideFace};
