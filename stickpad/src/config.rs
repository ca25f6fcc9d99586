//! Configurations for the pad.
//!
//! All tunables of the input-fusion loop live here. The two presets, [`PadConfig::rich`] and
//! [`PadConfig::minimal`], reproduce the two known builds of the device from one core.
use embassy_time::Duration;

use crate::KEY_COUNT;
use crate::keycode::HidKeyCode;

/// Default keymap, indexed by scan position (`column * 3 + row`).
#[rustfmt::skip]
pub const DEFAULT_KEYMAP: [HidKeyCode; KEY_COUNT] = [
    HidKeyCode::LShift, HidKeyCode::Left,        HidKeyCode::LCtrl,
    HidKeyCode::Up,     HidKeyCode::Application, HidKeyCode::Down,
    HidKeyCode::Tab,    HidKeyCode::Right,       HidKeyCode::LAlt,
    HidKeyCode::C,      HidKeyCode::V,           HidKeyCode::Enter,
];

/// Alternate keymap, differs from [`DEFAULT_KEYMAP`] at scan positions 6 and 11.
#[rustfmt::skip]
pub const ALTERNATE_KEYMAP: [HidKeyCode; KEY_COUNT] = [
    HidKeyCode::LShift, HidKeyCode::Left,        HidKeyCode::LCtrl,
    HidKeyCode::Up,     HidKeyCode::Application, HidKeyCode::Down,
    HidKeyCode::Escape, HidKeyCode::Right,       HidKeyCode::LAlt,
    HidKeyCode::C,      HidKeyCode::V,           HidKeyCode::Space,
];

/// The config struct for the pad.
#[derive(Clone, Debug)]
pub struct PadConfig<'a> {
    /// HID keycode of each matrix key, indexed by scan position
    pub keymap: [HidKeyCode; KEY_COUNT],
    pub stick: StickConfig,
    pub light: LightConfig,
    /// Scrolling text on the display, `None` disables the display entirely
    pub marquee: Option<MarqueeConfig<'a>>,
    pub timing: TimingConfig,
    pub usb: PadUsbConfig<'a>,
}

impl Default for PadConfig<'_> {
    fn default() -> Self {
        Self::rich()
    }
}

impl PadConfig<'_> {
    /// Colored reactive lighting with decay on release, and the marquee enabled.
    pub fn rich() -> Self {
        Self {
            keymap: DEFAULT_KEYMAP,
            stick: StickConfig::default(),
            light: LightConfig::default(),
            marquee: Some(MarqueeConfig::default()),
            timing: TimingConfig::default(),
            usb: PadUsbConfig::default(),
        }
    }

    /// On/off lighting cleared on release, no display.
    pub fn minimal() -> Self {
        Self {
            keymap: ALTERNATE_KEYMAP,
            stick: StickConfig::default(),
            light: LightConfig {
                release: ReleaseBehavior::Clear,
                style: PixelStyle::OnOff,
                ..LightConfig::default()
            },
            marquee: None,
            timing: TimingConfig::default(),
            usb: PadUsbConfig::default(),
        }
    }
}

/// Analog stick mapping
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickConfig {
    /// Deadzone, deflections must be strictly greater than this to move the pointer.
    /// Samples are 16-bit left-justified.
    pub threshold: u16,
    /// Step per tick while the sensitivity button is released
    pub sensitivity: i8,
    /// Step per tick while the sensitivity button is held
    pub boosted_sensitivity: i8,
    pub invert_x: bool,
    pub invert_y: bool,
}

impl Default for StickConfig {
    fn default() -> Self {
        Self {
            threshold: 0x1000,
            sensitivity: 1,
            boosted_sensitivity: 2,
            invert_x: false,
            // The stick is mounted with Y pointing away from the host's screen-down axis
            invert_y: true,
        }
    }
}

/// What happens to a key's light when it is released
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReleaseBehavior {
    /// Keep fading out at the normal decay rate
    Decay,
    /// Switch the pixel off on the release tick
    Clear,
}

/// How a key's intensity is turned into a pixel word
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PixelStyle {
    /// Hue accumulator color, brightness from intensity, alpha byte `0xFF`
    Hsv,
    /// `0xFFFFFFFF` while lit, `0x00000000` otherwise
    OnOff,
}

/// Per-key reactive lighting
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LightConfig {
    /// Intensity removed from an idle key every tick
    pub decay_step: u8,
    /// Hue advance, in degrees, on every key press
    pub hue_step: u16,
    pub release: ReleaseBehavior,
    pub style: PixelStyle,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            decay_step: 5,
            hue_step: 30,
            release: ReleaseBehavior::Decay,
            style: PixelStyle::Hsv,
        }
    }
}

/// Scrolling text shown on the display while the stick is deflected
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MarqueeConfig<'a> {
    /// Initial text, ASCII only
    pub text: &'a str,
    /// Number of updating ticks between two rotations
    pub refresh_ticks: u8,
    /// Text baseline position on the display
    pub position: (i32, i32),
}

impl Default for MarqueeConfig<'_> {
    fn default() -> Self {
        Self {
            text: "ABCEF",
            refresh_ticks: 20,
            position: (5, 45),
        }
    }
}

/// Loop cadence
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Settle time after driving a matrix column, before the rows are sampled
    pub settle: Duration,
    /// Idle time closing each tick
    pub tick_tail: Duration,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            settle: Duration::from_millis(1),
            tick_tail: Duration::from_millis(5),
        }
    }
}

/// Configurations for usb
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PadUsbConfig<'a> {
    /// Vender id
    pub vid: u16,
    /// Product id
    pub pid: u16,
    /// Manufacturer
    pub manufacturer: &'a str,
    /// Product name
    pub product_name: &'a str,
    /// Serial number
    pub serial_number: &'a str,
}

impl Default for PadUsbConfig<'_> {
    fn default() -> Self {
        Self {
            vid: 0x4c4b,
            pid: 0x4643,
            manufacturer: "stickpad",
            product_name: "stickpad",
            serial_number: "000001",
        }
    }
}
