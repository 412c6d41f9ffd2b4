//! Platform abstraction layer
//!
//! Event types the host window/event loop delivers to the game. Raw event
//! capture stays with the host; the core only sees these.

pub mod input;

pub use input::{AbilityKey, InputEvent, MouseButton};
