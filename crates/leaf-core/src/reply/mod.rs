//! Simulated assistant replies

mod dispatcher;
mod generator;

pub use dispatcher::{ReplyDispatcher, ReplyEvent, ReplyHandle};
pub use generator::{fill_template, is_known_model, ReplyGenerator, ReplyTiming, DEFAULT_MODEL, MODELS};
