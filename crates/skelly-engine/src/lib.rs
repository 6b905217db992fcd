//! Skelly engine.
//!
//! A small 2D renderer built around procedural ribbon geometry: Bezier
//! sampling, mitered variable-width ribbons and the tentacle animator that
//! drives them, plus textured sprites, an orthographic camera and the wgpu
//! and winit plumbing to put them on screen.

pub mod coords;
pub mod geometry;
pub mod scene;

pub mod core;
pub mod device;
pub mod input;
pub mod logging;
pub mod render;
pub mod time;
pub mod window;
