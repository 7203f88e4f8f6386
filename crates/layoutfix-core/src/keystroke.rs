// Layoutfix Keystroke Types
// Virtual-key codes and the (key, shift) pairs that identify physical keystrokes

use std::fmt;

/// A Windows-style virtual-key code identifying a physical key,
/// independent of what character the active layout prints on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualKey(u16);

impl VirtualKey {
    pub const fn new(code: u16) -> Self {
        Self(code)
    }

    pub const fn code(self) -> u16 {
        self.0
    }
}

impl From<u16> for VirtualKey {
    fn from(code: u16) -> Self {
        Self(code)
    }
}

impl fmt::Display for VirtualKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", vk_name(self.0))
    }
}

pub const VK_SPACE: VirtualKey = VirtualKey::new(0x20);

// OEM punctuation keys, named after their US-layout glyphs
pub const VK_OEM_1: VirtualKey = VirtualKey::new(0xBA); // ;:
pub const VK_OEM_PLUS: VirtualKey = VirtualKey::new(0xBB); // =+
pub const VK_OEM_COMMA: VirtualKey = VirtualKey::new(0xBC); // ,<
pub const VK_OEM_MINUS: VirtualKey = VirtualKey::new(0xBD); // -_
pub const VK_OEM_PERIOD: VirtualKey = VirtualKey::new(0xBE); // .>
pub const VK_OEM_2: VirtualKey = VirtualKey::new(0xBF); // /?
pub const VK_OEM_3: VirtualKey = VirtualKey::new(0xC0); // `~
pub const VK_OEM_4: VirtualKey = VirtualKey::new(0xDB); // [{
pub const VK_OEM_5: VirtualKey = VirtualKey::new(0xDC); // \|
pub const VK_OEM_6: VirtualKey = VirtualKey::new(0xDD); // ]}
pub const VK_OEM_7: VirtualKey = VirtualKey::new(0xDE); // '"

const OEM_KEYS: [VirtualKey; 11] = [
    VK_OEM_1,
    VK_OEM_PLUS,
    VK_OEM_COMMA,
    VK_OEM_MINUS,
    VK_OEM_PERIOD,
    VK_OEM_2,
    VK_OEM_3,
    VK_OEM_4,
    VK_OEM_5,
    VK_OEM_6,
    VK_OEM_7,
];

/// The fixed universe of physical keys considered for table-building:
/// the 26 Latin letter keys, the 10 digit keys, space, and the OEM
/// punctuation keys. Constant across all layouts, enumerated in a fixed
/// order (letters, digits, space, OEM).
pub fn candidate_keys() -> Vec<VirtualKey> {
    let mut keys = Vec::with_capacity(26 + 10 + 1 + OEM_KEYS.len());
    for code in 0x41..=0x5A {
        keys.push(VirtualKey::new(code)); // A-Z
    }
    for code in 0x30..=0x39 {
        keys.push(VirtualKey::new(code)); // 0-9
    }
    keys.push(VK_SPACE);
    keys.extend_from_slice(&OEM_KEYS);
    keys
}

/// Display name for a virtual-key code
pub fn vk_name(code: u16) -> &'static str {
    match code {
        0x20 => "SPACE",
        0x30 => "KEY_0",
        0x31 => "KEY_1",
        0x32 => "KEY_2",
        0x33 => "KEY_3",
        0x34 => "KEY_4",
        0x35 => "KEY_5",
        0x36 => "KEY_6",
        0x37 => "KEY_7",
        0x38 => "KEY_8",
        0x39 => "KEY_9",
        0x41 => "A",
        0x42 => "B",
        0x43 => "C",
        0x44 => "D",
        0x45 => "E",
        0x46 => "F",
        0x47 => "G",
        0x48 => "H",
        0x49 => "I",
        0x4A => "J",
        0x4B => "K",
        0x4C => "L",
        0x4D => "M",
        0x4E => "N",
        0x4F => "O",
        0x50 => "P",
        0x51 => "Q",
        0x52 => "R",
        0x53 => "S",
        0x54 => "T",
        0x55 => "U",
        0x56 => "V",
        0x57 => "W",
        0x58 => "X",
        0x59 => "Y",
        0x5A => "Z",
        0xBA => "OEM_SEMICOLON",
        0xBB => "OEM_PLUS",
        0xBC => "OEM_COMMA",
        0xBD => "OEM_MINUS",
        0xBE => "OEM_PERIOD",
        0xBF => "OEM_SLASH",
        0xC0 => "OEM_GRAVE",
        0xDB => "OEM_LEFT_BRACKET",
        0xDC => "OEM_BACKSLASH",
        0xDD => "OEM_RIGHT_BRACKET",
        0xDE => "OEM_APOSTROPHE",
        _ => "UNKNOWN",
    }
}

/// A physical key pressed with or without the shift modifier.
///
/// Two keystrokes are equal iff both fields match; there is no identity
/// beyond the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyStroke {
    pub vk: VirtualKey,
    pub shift: bool,
}

impl KeyStroke {
    pub const fn new(vk: VirtualKey, shift: bool) -> Self {
        Self { vk, shift }
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.shift {
            write!(f, "Shift+{}", self.vk)
        } else {
            write!(f, "{}", self.vk)
        }
    }
}
