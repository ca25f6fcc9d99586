//! Rotary encoder used as a scroll wheel
//!
//! The encoder is split in two halves. [`QuadratureDecoder`] runs from pin-change events, decodes the
//! quadrature signal and moves a shared [`QuadratureCounter`]. [`EncoderMapper`] runs once per tick in the
//! main loop and turns the counter movement into at most one wheel event.
//!
//! The decoding table is adapted from: <https://github.com/leshow/rotary-encoder-hal/blob/master/src/lib.rs>
use embedded_hal::digital::InputPin;
use portable_atomic::{AtomicI32, Ordering};

use crate::hid::WheelDirection;

/// Quadrature transitions per detent of a typical mechanical encoder.
pub const DEFAULT_RESOLUTION: u8 = 4;

/// The trait for a position counter updated outside the main loop.
pub trait EncoderCounter {
    /// Atomic snapshot of the current position
    fn position(&self) -> i32;
}

/// Detent position shared between the decoder and the main loop.
pub struct QuadratureCounter {
    position: AtomicI32,
}

impl Default for QuadratureCounter {
    fn default() -> Self {
        Self::new()
    }
}

impl QuadratureCounter {
    pub const fn new() -> Self {
        Self {
            position: AtomicI32::new(0),
        }
    }

    fn step(&self, delta: i32) {
        self.position.fetch_add(delta, Ordering::AcqRel);
    }
}

impl EncoderCounter for QuadratureCounter {
    fn position(&self) -> i32 {
        self.position.load(Ordering::Acquire)
    }
}

impl<C: EncoderCounter> EncoderCounter for &C {
    fn position(&self) -> i32 {
        (**self).position()
    }
}

/// Decodes the two encoder pins into detent steps on a [`QuadratureCounter`].
pub struct QuadratureDecoder<'a, A: InputPin, B: InputPin> {
    pin_a: A,
    pin_b: B,
    /// Previous pin levels in the two low bits
    state: u8,
    /// Pulse contribution of each `(previous, current)` transition
    lut: [i8; 16],
    pulses: i8,
    resolution: u8,
    counter: &'a QuadratureCounter,
}

impl<'a, A: InputPin, B: InputPin> QuadratureDecoder<'a, A, B> {
    /// `reverse` swaps the rotation direction.
    pub fn new(pin_a: A, pin_b: B, resolution: u8, reverse: bool, counter: &'a QuadratureCounter) -> Self {
        let mut lut = [0, -1, 1, 0, 1, 0, 0, -1, -1, 0, 0, 1, 0, 1, -1, 0];
        if reverse {
            lut = lut.map(|x| -x);
        }
        let mut decoder = Self {
            pin_a,
            pin_b,
            state: 0,
            lut,
            pulses: 0,
            resolution: resolution.max(1),
            counter,
        };
        decoder.state = decoder.read_levels();
        decoder
    }

    fn read_levels(&mut self) -> u8 {
        let mut s = 0;
        if self.pin_a.is_low().unwrap_or_default() {
            s |= 0b01;
        }
        if self.pin_b.is_low().unwrap_or_default() {
            s |= 0b10;
        }
        s
    }

    /// Sample the pins, call this on every edge of either pin.
    ///
    /// Returns the detent step applied to the counter, `0` if the transition did not complete a detent.
    pub fn update(&mut self) -> i8 {
        let current = self.read_levels();
        let s = self.state | (current << 2);
        self.state = current;
        if current == s & 0b11 {
            return 0;
        }

        self.pulses += self.lut[s as usize & 0xF];
        let resolution = self.resolution as i8;
        let step = if self.pulses >= resolution {
            1
        } else if self.pulses <= -resolution {
            -1
        } else {
            0
        };
        if step != 0 {
            self.pulses %= resolution;
            self.counter.step(step as i32);
        }
        step
    }

    /// Both pins, for waiting on edges between updates
    pub fn pins_mut(&mut self) -> (&mut A, &mut B) {
        (&mut self.pin_a, &mut self.pin_b)
    }
}

/// Turns counter movement into wheel events.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct EncoderMapper {
    last_position: i32,
}

impl EncoderMapper {
    pub fn new(initial_position: i32) -> Self {
        Self {
            last_position: initial_position,
        }
    }

    /// One event per tick at most, whatever the size of the movement.
    pub fn update(&mut self, position: i32) -> Option<WheelDirection> {
        let direction = if position > self.last_position {
            Some(WheelDirection::Down)
        } else if position < self.last_position {
            Some(WheelDirection::Up)
        } else {
            None
        };
        self.last_position = position;
        direction
    }

    pub fn last_position(&self) -> i32 {
        self.last_position
    }
}
