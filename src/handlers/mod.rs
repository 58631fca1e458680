//! Handler implementations

pub mod flare;
pub mod json;
pub mod render;

pub use flare::{FlareHandler, FlareHandlerBuilder};
pub use json::JsonHandler;

// Re-export the trait for convenience
pub use crate::core::Handler;
