pub mod text;
pub mod title;

pub use title::{RenameTarget, TitleAction, TitleEditor};
