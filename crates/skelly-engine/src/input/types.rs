/// Keys the engine tracks by name. Anything else arrives as `Unknown`.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Key {
    Escape,
    Enter,
    Space,
    Tab,

    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,

    /// Letter keys by physical position, `'A'..='Z'`.
    Letter(char),
    /// Top-row digits, `0..=9`.
    Digit(u8),

    Unknown,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum KeyState {
    Pressed,
    Released,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Key { key: Key, state: KeyState, repeat: bool },
    Focused(bool),
}
