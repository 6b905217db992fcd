//! View/projection state.
//!
//! Matrices are cached and only recomputed by `update_view_matrix` /
//! `update_projection_matrix`; writing a public field alone leaves them stale.

use glam::{Mat4, Vec3};

use crate::coords::Viewport;

/// Projection parameters.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum Projection {
    Orthographic {
        left: f32,
        right: f32,
        top: f32,
        bottom: f32,
    },
    /// Not used by the 2D pipeline; kept so a scene can opt into depth later.
    Perspective {
        fov_y: f32,
        aspect: f32,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub z_near: f32,
    pub z_far: f32,
    pub projection: Projection,

    view: Mat4,
    proj: Mat4,
}

impl Camera {
    /// Orthographic camera. `borders` is `[left, right, top, bottom]`.
    pub fn ortho(eye: Vec3, target: Vec3, up: Vec3, borders: [f32; 4], z_near: f32, z_far: f32) -> Self {
        let [left, right, top, bottom] = borders;
        Self::with_projection(
            eye,
            target,
            up,
            Projection::Orthographic { left, right, top, bottom },
            z_near,
            z_far,
        )
    }

    /// Perspective camera; `fov_y` in radians.
    pub fn perspective(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        fov_y: f32,
        aspect: f32,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        Self::with_projection(eye, target, up, Projection::Perspective { fov_y, aspect }, z_near, z_far)
    }

    /// Orthographic camera with the world origin at the viewport centre,
    /// +Y up and one world unit per logical pixel.
    pub fn ortho_centered(viewport: Viewport) -> Self {
        Self::ortho(
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::ZERO,
            Vec3::Y,
            centered_borders(viewport),
            0.1,
            100.0,
        )
    }

    fn with_projection(
        eye: Vec3,
        target: Vec3,
        up: Vec3,
        projection: Projection,
        z_near: f32,
        z_far: f32,
    ) -> Self {
        let mut cam = Self {
            eye,
            target,
            up,
            z_near,
            z_far,
            projection,
            view: Mat4::IDENTITY,
            proj: Mat4::IDENTITY,
        };
        cam.update_view_matrix();
        cam.update_projection_matrix();
        cam
    }

    /// Re-centres an orthographic camera on a new viewport and refreshes the
    /// projection. No-op for perspective cameras.
    pub fn fit_viewport(&mut self, viewport: Viewport) {
        if !viewport.is_valid() {
            return;
        }
        if let Projection::Orthographic { .. } = self.projection {
            let [left, right, top, bottom] = centered_borders(viewport);
            self.projection = Projection::Orthographic { left, right, top, bottom };
            self.update_projection_matrix();
        }
    }

    pub fn update_view_matrix(&mut self) {
        self.view = Mat4::look_at_rh(self.eye, self.target, self.up);
    }

    pub fn update_projection_matrix(&mut self) {
        self.proj = match self.projection {
            Projection::Orthographic { left, right, top, bottom } => {
                Mat4::orthographic_rh(left, right, bottom, top, self.z_near, self.z_far)
            }
            Projection::Perspective { fov_y, aspect } => {
                Mat4::perspective_rh(fov_y, aspect, self.z_near, self.z_far)
            }
        };
    }

    #[inline]
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    #[inline]
    pub fn projection_matrix(&self) -> Mat4 {
        self.proj
    }

    #[inline]
    pub fn view_projection(&self) -> Mat4 {
        self.proj * self.view
    }
}

fn centered_borders(viewport: Viewport) -> [f32; 4] {
    let hw = viewport.width * 0.5;
    let hh = viewport.height * 0.5;
    [-hw, hw, hh, -hh]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn to_ndc(cam: &Camera, x: f32, y: f32) -> Vec3 {
        cam.view_projection().project_point3(Vec3::new(x, y, 0.0))
    }

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn centered_ortho_maps_corners_to_ndc() {
        let cam = Camera::ortho_centered(Viewport::new(800.0, 600.0));
        let top_right = to_ndc(&cam, 400.0, 300.0);
        let bottom_left = to_ndc(&cam, -400.0, -300.0);
        assert!((top_right.x - 1.0).abs() < 1e-5 && (top_right.y - 1.0).abs() < 1e-5);
        assert!((bottom_left.x + 1.0).abs() < 1e-5 && (bottom_left.y + 1.0).abs() < 1e-5);
        // z = 0 sits inside the [0, 1] depth range.
        assert!(top_right.z > 0.0 && top_right.z < 1.0);
    }

    #[test]
    fn matrices_are_stale_until_updated() {
        let mut cam = Camera::ortho_centered(Viewport::new(200.0, 200.0));
        let before = cam.view_projection();

        cam.eye = Vec3::new(50.0, 0.0, 1.0);
        cam.target = Vec3::new(50.0, 0.0, 0.0);
        assert_eq!(cam.view_projection(), before);

        cam.update_view_matrix();
        let centre = to_ndc(&cam, 50.0, 0.0);
        assert!(centre.x.abs() < 1e-5 && centre.y.abs() < 1e-5);
    }

    #[test]
    fn fit_viewport_recomputes_projection() {
        let mut cam = Camera::ortho_centered(Viewport::new(100.0, 100.0));
        cam.fit_viewport(Viewport::new(400.0, 100.0));
        assert!((to_ndc(&cam, 200.0, 0.0).x - 1.0).abs() < 1e-5);

        // Invalid viewports are ignored.
        cam.fit_viewport(Viewport::new(0.0, 0.0));
        assert!((to_ndc(&cam, 200.0, 0.0).x - 1.0).abs() < 1e-5);
    }

    #[test]
    fn perspective_stub_builds_finite_matrices() {
        let cam = Camera::perspective(
            Vec3::new(0.0, 0.0, 5.0),
            Vec3::ZERO,
            Vec3::Y,
            60f32.to_radians(),
            16.0 / 9.0,
            0.1,
            100.0,
        );
        assert!(cam.view_projection().is_finite());
        assert!(close(to_ndc(&cam, 0.0, 0.0) * Vec3::new(1.0, 1.0, 0.0), Vec3::ZERO));
    }
}
