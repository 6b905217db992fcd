//! Window and frame loop.
//!
//! Owns the winit event loop and the single window, and wires them to the
//! GPU layer and the application.

mod runtime;

pub use runtime::{Runtime, RuntimeConfig};
