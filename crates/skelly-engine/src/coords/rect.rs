use super::Vec2;

/// Axis-aligned rectangle.
///
/// Sprites use it in texel space as a clip rect (the sub-image to sample);
/// an empty rect means "the whole texture".
#[derive(Debug, Copy, Clone, Default, PartialEq)]
pub struct Rect {
    pub origin: Vec2,
    pub size: Vec2,
}

impl Rect {
    #[inline]
    pub const fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            origin: Vec2::new(x, y),
            size: Vec2::new(w, h),
        }
    }

    #[inline]
    pub fn max(self) -> Vec2 {
        self.origin + self.size
    }

    /// A rect narrower or shorter than `f32::EPSILON` carries no area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.size.x < f32::EPSILON || self.size.y < f32::EPSILON
    }

    /// Normalizes the rectangle so width/height are non-negative.
    #[inline]
    pub fn normalized(self) -> Self {
        let (mut x, mut w) = (self.origin.x, self.size.x);
        let (mut y, mut h) = (self.origin.y, self.size.y);
        if w < 0.0 {
            x += w;
            w = -w;
        }
        if h < 0.0 {
            y += h;
            h = -h;
        }
        Rect::new(x, y, w, h)
    }

    /// Converts a texel-space clip rect into normalized `(u0, v0, u1, v1)`
    /// texture coordinates for a texture of `tex_size` texels.
    ///
    /// Empty rects and zero-sized textures map to the full `[0, 1]` range.
    pub fn uv_bounds(self, tex_size: Vec2) -> [f32; 4] {
        let r = self.normalized();
        if r.is_empty() || tex_size.x <= 0.0 || tex_size.y <= 0.0 {
            return [0.0, 0.0, 1.0, 1.0];
        }
        let max = r.max();
        [
            (r.origin.x / tex_size.x).clamp(0.0, 1.0),
            (r.origin.y / tex_size.y).clamp(0.0, 1.0),
            (max.x / tex_size.x).clamp(0.0, 1.0),
            (max.y / tex_size.y).clamp(0.0, 1.0),
        ]
    }
}
