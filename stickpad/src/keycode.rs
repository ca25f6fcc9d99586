//! HID keyboard usage codes used by the pad layouts.

/// Key codes from the HID keyboard/keypad usage page (0x07).
///
/// Only the usages reachable from a 12-key layout are listed; the discriminant is the HID usage id.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidKeyCode {
    /// Reserved, no-key.
    No = 0x00,
    /// `a` and `A`
    A = 0x04,
    /// `b` and `B`
    B = 0x05,
    /// `c` and `C`
    C = 0x06,
    /// `d` and `D`
    D = 0x07,
    /// `e` and `E`
    E = 0x08,
    /// `f` and `F`
    F = 0x09,
    /// `s` and `S`
    S = 0x16,
    /// `v` and `V`
    V = 0x19,
    /// `x` and `X`
    X = 0x1B,
    /// `y` and `Y`
    Y = 0x1C,
    /// `z` and `Z`
    Z = 0x1D,
    /// `Enter`
    Enter = 0x28,
    /// `Esc`
    Escape = 0x29,
    /// `Backspace`
    Backspace = 0x2A,
    /// `Tab`
    Tab = 0x2B,
    /// `Space`
    Space = 0x2C,
    /// `Home`
    Home = 0x4A,
    /// `PageUp`
    PageUp = 0x4B,
    /// `Delete`
    Delete = 0x4C,
    /// `End`
    End = 0x4D,
    /// `PageDown`
    PageDown = 0x4E,
    /// `Right`
    Right = 0x4F,
    /// `Left`
    Left = 0x50,
    /// `Down`
    Down = 0x51,
    /// `Up`
    Up = 0x52,
    /// `Application`, the context menu key
    Application = 0x65,
    /// `LeftControl`
    LCtrl = 0xE0,
    /// `LeftShift`
    LShift = 0xE1,
    /// `LeftAlt`
    LAlt = 0xE2,
    /// `LeftGUI`
    LGui = 0xE3,
    /// `RightControl`
    RCtrl = 0xE4,
    /// `RightShift`
    RShift = 0xE5,
    /// `RightAlt`
    RAlt = 0xE6,
    /// `RightGUI`
    RGui = 0xE7,
}

impl HidKeyCode {
    /// Returns `true` if the keycode is a modifier key.
    pub fn is_modifier(self) -> bool {
        HidKeyCode::LCtrl <= self && self <= HidKeyCode::RGui
    }

    /// Bit of the modifier byte in a boot keyboard report, `None` for normal keys.
    pub fn modifier_bit(self) -> Option<u8> {
        if self.is_modifier() {
            Some(1 << (self as u8 - HidKeyCode::LCtrl as u8))
        } else {
            None
        }
    }
}

impl From<HidKeyCode> for u8 {
    fn from(key: HidKeyCode) -> u8 {
        key as u8
    }
}
