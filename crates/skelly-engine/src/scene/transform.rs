use glam::{Mat4, Quat, Vec3};

use crate::coords::Vec2;

/// Position / rotation / scale of a scene entity in world units.
///
/// The model matrix is `translate · rotate_z · scale`, so scale and rotation
/// act around the entity's local origin (its pivot).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Transform2D {
    pub position: Vec2,
    /// Counter-clockwise rotation in radians.
    pub angle: f32,
    pub scale: Vec2,
}

impl Default for Transform2D {
    fn default() -> Self {
        Self {
            position: Vec2::zero(),
            angle: 0.0,
            scale: Vec2::new(1.0, 1.0),
        }
    }
}

impl Transform2D {
    #[inline]
    pub fn at(position: Vec2) -> Self {
        Self { position, ..Self::default() }
    }

    pub fn model_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::new(self.scale.x, self.scale.y, 1.0),
            Quat::from_rotation_z(self.angle),
            Vec3::new(self.position.x, self.position.y, 0.0),
        )
    }
}
