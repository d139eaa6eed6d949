use serde::{Deserialize, Serialize};

/// Button and modifier state as reported by the host each tick.
///
/// Bit layout follows the X11/Clutter modifier mask so hosts can pass the
/// raw value straight through.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ModifierMask(pub u32);

impl ModifierMask {
    pub const NONE: ModifierMask = ModifierMask(0);
    pub const SHIFT: ModifierMask = ModifierMask(1 << 0);
    pub const LOCK: ModifierMask = ModifierMask(1 << 1);
    pub const CONTROL: ModifierMask = ModifierMask(1 << 2);
    /// Usually Alt.
    pub const MOD1: ModifierMask = ModifierMask(1 << 3);
    /// Usually Super on X11-style keymaps.
    pub const MOD4: ModifierMask = ModifierMask(1 << 6);
    pub const BUTTON1: ModifierMask = ModifierMask(1 << 8);
    pub const BUTTON2: ModifierMask = ModifierMask(1 << 9);
    pub const BUTTON3: ModifierMask = ModifierMask(1 << 10);
    pub const SUPER: ModifierMask = ModifierMask(1 << 26);

    /// True if any bit of `other` is set in `self`.
    pub fn intersects(self, other: ModifierMask) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn left_pressed(self) -> bool {
        self.intersects(Self::BUTTON1)
    }

    pub fn right_pressed(self) -> bool {
        self.intersects(Self::BUTTON3)
    }

    /// The button that drives click animations, left taking precedence.
    pub fn pressed_button(self) -> PointerButton {
        if self.left_pressed() {
            PointerButton::Left
        } else if self.right_pressed() {
            PointerButton::Right
        } else {
            PointerButton::None
        }
    }
}

impl std::ops::BitOr for ModifierMask {
    type Output = ModifierMask;

    fn bitor(self, rhs: ModifierMask) -> ModifierMask {
        ModifierMask(self.0 | rhs.0)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerButton {
    #[default]
    None,
    Left,
    Right,
}

/// One pointer reading, produced once per frame tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointerSample {
    pub x: f64,
    pub y: f64,
    pub mask: ModifierMask,
}

impl PointerSample {
    pub fn new(x: f64, y: f64, mask: ModifierMask) -> Self {
        Self { x, y, mask }
    }
}

/// Keys that can be bound to magnifier or spotlight activation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActivationKey {
    #[default]
    #[serde(rename = "Shift_L")]
    ShiftL,
    #[serde(rename = "Shift_R")]
    ShiftR,
    #[serde(rename = "Control_L")]
    ControlL,
    #[serde(rename = "Control_R")]
    ControlR,
    #[serde(rename = "Alt_L")]
    AltL,
    #[serde(rename = "Alt_R")]
    AltR,
    #[serde(rename = "Super_L")]
    SuperL,
    #[serde(rename = "Super_R")]
    SuperR,
}

impl ActivationKey {
    /// Parse a keysym name such as `"Control_L"`. Unknown names fall back to
    /// `Shift_L`.
    pub fn parse(name: &str) -> Self {
        match name {
            "Shift_L" => ActivationKey::ShiftL,
            "Shift_R" => ActivationKey::ShiftR,
            "Control_L" => ActivationKey::ControlL,
            "Control_R" => ActivationKey::ControlR,
            "Alt_L" => ActivationKey::AltL,
            "Alt_R" => ActivationKey::AltR,
            "Super_L" => ActivationKey::SuperL,
            "Super_R" => ActivationKey::SuperR,
            _ => ActivationKey::default(),
        }
    }

    /// Modifier bits that are set while this key is held.
    pub fn modifier_mask(self) -> ModifierMask {
        match self {
            ActivationKey::ShiftL | ActivationKey::ShiftR => ModifierMask::SHIFT,
            ActivationKey::ControlL | ActivationKey::ControlR => ModifierMask::CONTROL,
            ActivationKey::AltL | ActivationKey::AltR => ModifierMask::MOD1,
            ActivationKey::SuperL | ActivationKey::SuperR => {
                ModifierMask::SUPER | ModifierMask::MOD4
            }
        }
    }
}

impl std::fmt::Display for ActivationKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivationKey::ShiftL => write!(f, "Shift_L"),
            ActivationKey::ShiftR => write!(f, "Shift_R"),
            ActivationKey::ControlL => write!(f, "Control_L"),
            ActivationKey::ControlR => write!(f, "Control_R"),
            ActivationKey::AltL => write!(f, "Alt_L"),
            ActivationKey::AltR => write!(f, "Alt_R"),
            ActivationKey::SuperL => write!(f, "Super_L"),
            ActivationKey::SuperR => write!(f, "Super_R"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEventKind {
    Press,
    Release,
}

/// A key event delivered by the host's captured-event handler.
///
/// `key` is `None` for keys that cannot act as an activation key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyEvent {
    pub kind: KeyEventKind,
    pub key: Option<ActivationKey>,
}

impl KeyEvent {
    pub fn press(key: ActivationKey) -> Self {
        Self {
            kind: KeyEventKind::Press,
            key: Some(key),
        }
    }

    pub fn release(key: ActivationKey) -> Self {
        Self {
            kind: KeyEventKind::Release,
            key: Some(key),
        }
    }
}

/// What the host should do with a key event after the engine saw it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDisposition {
    Consumed,
    PassThrough,
}
