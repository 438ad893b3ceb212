//! Leaf Notes core: markdown parsing, chat store, themes and simulated replies

pub mod chat;
pub mod config;
pub mod markdown;
pub mod reply;
pub mod theme;

pub use config::Config;
pub use theme::ThemeId;
