//! Tag engine

pub mod engine;
pub mod event;

pub use event::TagEvent;
