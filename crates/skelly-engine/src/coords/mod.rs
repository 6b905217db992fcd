//! Coordinate and geometry value types shared by the geometry core, scene
//! entities and renderers.
//!
//! World space:
//! - units are world pixels
//! - origin and axis orientation are decided by the active `Camera`
//!   (the default orthographic camera centres the origin, +Y up)

mod color;
mod rect;
mod vec2;
mod viewport;

pub use color::ColorRgba;
pub use rect::Rect;
pub use vec2::Vec2;
pub use viewport::Viewport;
