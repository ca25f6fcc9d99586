//! Scrolling text on the pad display
//!
//! The marquee text is rotated left by one character each time the [`MarqueeGate`] countdown expires, which only
//! happens while the stick is held deflected.
#[cfg(feature = "display")]
pub mod graphics;
#[cfg(feature = "ssd1306")]
pub mod oled;

use core::convert::Infallible;

use heapless::Vec;

/// Maximum marquee length, in characters
pub const MARQUEE_CAPACITY: usize = 16;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MarqueeError {
    Empty,
    TooLong,
    NonAscii,
    /// A refresh interval of zero ticks would never rotate
    ZeroRefresh,
}

/// Fixed-length ASCII text that rotates in place.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Marquee {
    text: Vec<u8, MARQUEE_CAPACITY>,
}

impl Marquee {
    pub fn new(text: &str) -> Result<Self, MarqueeError> {
        if text.is_empty() {
            return Err(MarqueeError::Empty);
        }
        if !text.is_ascii() {
            return Err(MarqueeError::NonAscii);
        }
        let text = Vec::from_slice(text.as_bytes()).map_err(|_| MarqueeError::TooLong)?;
        Ok(Self { text })
    }

    /// Move the first character to the end
    pub fn rotate(&mut self) {
        self.text.rotate_left(1);
    }

    pub fn as_str(&self) -> &str {
        // Only ASCII is accepted in `new`
        core::str::from_utf8(&self.text).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }
}

/// Activity countdown deciding when the marquee advances.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MarqueeGate {
    countdown: u8,
    refresh_ticks: u8,
}

impl MarqueeGate {
    pub fn new(refresh_ticks: u8) -> Self {
        Self {
            countdown: 0,
            refresh_ticks,
        }
    }

    pub fn countdown(&self) -> u8 {
        self.countdown
    }

    /// Advance the gate by one tick.
    ///
    /// `activity` is whether the stick is deflected, `updated` whether anything at all happened this tick.
    /// Returns `true` when the countdown expired and the marquee should rotate.
    pub fn update(&mut self, activity: bool, updated: bool) -> bool {
        if !activity {
            self.countdown = 0;
        } else if self.countdown == 0 {
            self.countdown = self.refresh_ticks;
        }

        if updated && self.countdown > 0 {
            self.countdown -= 1;
            return self.countdown == 0;
        }
        false
    }
}

/// The trait for a text display.
pub trait DisplaySink {
    type Error: core::fmt::Debug;

    /// Blank the frame buffer
    async fn clear(&mut self) -> Result<(), Self::Error>;

    /// Draw `text` with its baseline starting at `position`
    async fn draw_text(&mut self, text: &str, position: (i32, i32)) -> Result<(), Self::Error>;

    /// Push the frame buffer to the panel
    async fn flush(&mut self) -> Result<(), Self::Error>;
}

/// Display sink for boards without a display.
pub struct NoDisplay;

impl DisplaySink for NoDisplay {
    type Error = Infallible;

    async fn clear(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn draw_text(&mut self, _text: &str, _position: (i32, i32)) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Redraw the whole marquee: clear, draw, flush.
pub async fn redraw<D: DisplaySink>(display: &mut D, marquee: &Marquee, position: (i32, i32)) -> Result<(), D::Error> {
    display.clear().await?;
    display.draw_text(marquee.as_str(), position).await?;
    display.flush().await
}
