//! Modal popups

pub mod common;
pub mod model_select;
pub mod theme_select;

pub use model_select::ModelSelectPopup;
pub use theme_select::ThemeSelectPopup;
