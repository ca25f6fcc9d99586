//! Traits and types for HID message reporting.
use embassy_sync::channel::Channel;
use embassy_usb::driver::EndpointError;

use crate::keycode::HidKeyCode;
use crate::usb::descriptor::{KeyboardReport, MouseReport};
use crate::{REPORT_CHANNEL_SIZE, RawMutex};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Report {
    /// Normal keyboard hid report
    KeyboardReport(KeyboardReport),
    /// Mouse hid report
    MouseReport(MouseReport),
}

#[derive(PartialEq, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum HidError {
    UsbEndpointError(EndpointError),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    /// Bit in the button byte of the mouse report
    pub fn bit(self) -> u8 {
        match self {
            MouseButton::Left => 1 << 0,
            MouseButton::Right => 1 << 1,
            MouseButton::Middle => 1 << 2,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum WheelDirection {
    Up,
    Down,
}

impl WheelDirection {
    /// One wheel detent in report units, positive scrolls up
    pub fn delta(self) -> i8 {
        match self {
            WheelDirection::Up => 1,
            WheelDirection::Down => -1,
        }
    }
}

/// Host-facing side of the pad: everything the main loop emits goes through this trait.
pub trait HidSink {
    /// Key pressed. Pressing a key that is already down has no effect.
    async fn key_down(&mut self, key: HidKeyCode);

    /// Key released. Releasing a key that is not down has no effect.
    async fn key_up(&mut self, key: HidKeyCode);

    /// Relative pointer motion
    async fn mouse_move(&mut self, dx: i8, dy: i8);

    async fn mouse_press(&mut self, button: MouseButton);

    async fn mouse_release(&mut self, button: MouseButton);

    /// A single wheel detent
    async fn wheel(&mut self, direction: WheelDirection);
}

/// [`HidSink`] that keeps the current keyboard and mouse state and pushes a full report
/// into a channel on every change.
pub struct ReportWriter<'a> {
    keyboard: KeyboardReport,
    buttons: u8,
    channel: &'a Channel<RawMutex, Report, REPORT_CHANNEL_SIZE>,
}

impl<'a> ReportWriter<'a> {
    pub fn new(channel: &'a Channel<RawMutex, Report, REPORT_CHANNEL_SIZE>) -> Self {
        Self {
            keyboard: KeyboardReport::default(),
            buttons: 0,
            channel,
        }
    }

    pub fn keyboard_report(&self) -> &KeyboardReport {
        &self.keyboard
    }

    pub fn mouse_buttons(&self) -> u8 {
        self.buttons
    }

    async fn send_keyboard(&mut self) {
        self.channel.send(Report::KeyboardReport(self.keyboard)).await;
    }

    async fn send_mouse(&mut self, x: i8, y: i8, wheel: i8) {
        let report = MouseReport {
            buttons: self.buttons,
            x,
            y,
            wheel,
        };
        self.channel.send(Report::MouseReport(report)).await;
    }
}

impl HidSink for ReportWriter<'_> {
    async fn key_down(&mut self, key: HidKeyCode) {
        if let Some(bit) = key.modifier_bit() {
            if self.keyboard.modifier & bit != 0 {
                return;
            }
            self.keyboard.modifier |= bit;
        } else {
            let code = u8::from(key);
            if code == 0 || self.keyboard.keycodes.contains(&code) {
                return;
            }
            match self.keyboard.keycodes.iter_mut().find(|slot| **slot == 0) {
                Some(slot) => *slot = code,
                None => {
                    warn!("Keyboard report is full, dropping key {:?}", key);
                    return;
                }
            }
        }
        self.send_keyboard().await;
    }

    async fn key_up(&mut self, key: HidKeyCode) {
        if let Some(bit) = key.modifier_bit() {
            if self.keyboard.modifier & bit == 0 {
                return;
            }
            self.keyboard.modifier &= !bit;
        } else {
            let code = u8::from(key);
            match self.keyboard.keycodes.iter_mut().find(|slot| **slot == code && code != 0) {
                Some(slot) => *slot = 0,
                None => return,
            }
        }
        self.send_keyboard().await;
    }

    async fn mouse_move(&mut self, dx: i8, dy: i8) {
        self.send_mouse(dx, dy, 0).await;
    }

    async fn mouse_press(&mut self, button: MouseButton) {
        self.buttons |= button.bit();
        self.send_mouse(0, 0, 0).await;
    }

    async fn mouse_release(&mut self, button: MouseButton) {
        self.buttons &= !button.bit();
        self.send_mouse(0, 0, 0).await;
    }

    async fn wheel(&mut self, direction: WheelDirection) {
        self.send_mouse(0, 0, direction.delta()).await;
    }
}
