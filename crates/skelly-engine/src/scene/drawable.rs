use super::{LineEntity, LineState, Sprite, SpriteState};

/// Closed set of things the renderer knows how to draw.
pub enum Drawable {
    Sprite(Sprite),
    Line(LineEntity),
}

impl Drawable {
    pub fn name(&self) -> &str {
        match self {
            Drawable::Sprite(s) => &s.name,
            Drawable::Line(l) => &l.name,
        }
    }

    pub fn is_disposed(&self) -> bool {
        match self {
            Drawable::Sprite(s) => s.state() == SpriteState::Disposed,
            Drawable::Line(l) => l.state() == LineState::Disposed,
        }
    }

    pub fn dispose(&mut self) {
        match self {
            Drawable::Sprite(s) => s.dispose(),
            Drawable::Line(l) => l.dispose(),
        }
    }
}

impl From<Sprite> for Drawable {
    fn from(s: Sprite) -> Self {
        Drawable::Sprite(s)
    }
}

impl From<LineEntity> for Drawable {
    fn from(l: LineEntity) -> Self {
        Drawable::Line(l)
    }
}
