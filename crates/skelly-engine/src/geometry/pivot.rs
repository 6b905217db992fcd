use crate::coords::Vec2;

/// Anchor preset for quad-shaped entities.
///
/// The pivot is the local origin that rotation and scale are applied around.
/// Quads span `(0, 0)..(w, h)` in local space with +Y up, so `Top*` presets
/// sit at `y = h`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub enum PivotType {
    TopLeft,
    Top,
    TopRight,
    CentreLeft,
    #[default]
    Centre,
    CentreRight,
    BotLeft,
    Bottom,
    BotRight,
    /// Caller-supplied pivot; see `Sprite::set_custom_pivot`.
    Custom,
}

impl PivotType {
    /// Pivot as a fraction of the quad size. `None` for `Custom`.
    pub fn fraction(self) -> Option<Vec2> {
        let f = match self {
            PivotType::TopLeft => Vec2::new(0.0, 1.0),
            PivotType::Top => Vec2::new(0.5, 1.0),
            PivotType::TopRight => Vec2::new(1.0, 1.0),
            PivotType::CentreLeft => Vec2::new(0.0, 0.5),
            PivotType::Centre => Vec2::new(0.5, 0.5),
            PivotType::CentreRight => Vec2::new(1.0, 0.5),
            PivotType::BotLeft => Vec2::new(0.0, 0.0),
            PivotType::Bottom => Vec2::new(0.5, 0.0),
            PivotType::BotRight => Vec2::new(1.0, 0.0),
            PivotType::Custom => return None,
        };
        Some(f)
    }

    /// Pivot in local units for a quad of `size`. `None` for `Custom`.
    pub fn offset(self, size: Vec2) -> Option<Vec2> {
        self.fraction().map(|f| Vec2::new(f.x * size.x, f.y * size.y))
    }
}
