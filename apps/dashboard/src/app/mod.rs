// App module for energy-dash
// Holds widget state and turns key/mouse input into controller events

pub mod input;
pub mod state;

pub use input::{handle_key, handle_mouse};
pub use state::{App, Focus};
