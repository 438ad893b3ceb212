//! Text input for the TUI

pub mod composer;

pub use composer::{Composer, InputAction};
