//! Procedural line geometry.
//!
//! - `curve`: uniform-step Bezier sampling into point sequences
//! - `ribbon`: point sequence + per-point width/color into a triangulated strip
//! - `pivot`: anchor presets for quad-shaped entities
//!
//! Everything here is pure CPU code with no GPU or window dependency, so it
//! can be called every frame and tested in isolation.

pub mod curve;
pub mod pivot;
pub mod ribbon;

pub use curve::{cubic_bezier, quadratic_bezier, sample_cubic, sample_quadratic};
pub use pivot::PivotType;
pub use ribbon::{build_ribbon, MeshSizes, RibbonError, RibbonMesh, MITER_LIMIT};
