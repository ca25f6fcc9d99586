//! Auxiliary buttons outside the key matrix
//!
//! Both buttons are wired active-low with pull-ups: a falling level is a press.
use embedded_hal::digital::InputPin;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonEdge {
    Pressed,
    Released,
}

/// A single active-low button polled once per tick.
pub struct AuxButton<P: InputPin> {
    pin: P,
    previous_high: bool,
}

impl<P: InputPin> AuxButton<P> {
    /// Create the button, the current level becomes the reference level.
    pub fn new(mut pin: P) -> Self {
        let previous_high = pin.is_high().unwrap_or(true);
        Self { pin, previous_high }
    }

    /// Current level, `true` when high (released). A failed read is treated as released.
    pub fn level(&mut self) -> bool {
        self.pin.is_high().unwrap_or(true)
    }

    /// Read the pin and report a level change since the previous poll.
    pub fn poll(&mut self) -> Option<ButtonEdge> {
        let high = self.level();
        let edge = edge_between(self.previous_high, high);
        self.previous_high = high;
        edge
    }
}

/// Edge between two sampled levels of an active-low line, `true` meaning high.
fn edge_between(previous_high: bool, current_high: bool) -> Option<ButtonEdge> {
    match (previous_high, current_high) {
        (true, false) => Some(ButtonEdge::Pressed),
        (false, true) => Some(ButtonEdge::Released),
        _ => None,
    }
}
