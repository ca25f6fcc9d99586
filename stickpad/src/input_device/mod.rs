//! Input devices of the pad besides the key matrix.
//!
//! Each device turns a raw hardware reading into a discrete result per tick: a motion vector for the
//! analog stick, a wheel direction for the encoder, an edge for the auxiliary buttons.
pub mod button;
pub mod joystick;
pub mod rotary_encoder;

/// Analog stick axis
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Axis {
    X,
    Y,
}

/// The trait for analog readings.
///
/// Samples are 16-bit and left-justified, so a 12-bit converter should shift its result left by 4.
/// Reads are treated as infallible, an implementation that fails should return its last good sample.
pub trait AnalogReader {
    /// Sample one axis
    async fn read(&mut self, axis: Axis) -> u16;
}
