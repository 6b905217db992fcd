//! Scene entities.
//!
//! - `Camera`: view/projection state
//! - `LineEntity`: ribbon geometry + style + GPU lifecycle
//! - `Sprite`: textured quad
//! - `Drawable`: closed set of renderable entities
//! - `Tentacle`: animator driving a `LineEntity` with oscillating Bezier controls

mod camera;
mod drawable;
mod line;
mod sprite;
mod tentacle;
mod transform;

pub use camera::{Camera, Projection};
pub use drawable::Drawable;
pub use line::{LineEntity, LineError, LineState, PointValues, UploadPlan, LINE_SHADER_NAME};
pub use sprite::{Sprite, SpriteState, SPRITE_INDICES, SPRITE_SHADER_NAME, SPRITE_VERTEX_COUNT};
pub use tentacle::{Sway, SwayTarget, Tentacle, TentacleConfig, TentacleState, INITIAL_TIME_BIAS};
pub use transform::Transform2D;
