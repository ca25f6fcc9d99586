use super::{AnalogReader, Axis};
use crate::config::StickConfig;

/// Relative pointer motion produced by one tick of the stick
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Motion {
    pub dx: i8,
    pub dy: i8,
}

impl Motion {
    /// Whether the stick is deflected past the deadzone on any axis
    pub fn is_active(&self) -> bool {
        self.dx != 0 || self.dy != 0
    }
}

/// Maps stick samples to unit steps around the origin captured at start-up.
#[derive(Copy, Clone, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StickMapper {
    origin: [u16; 2],
    threshold: u16,
    invert: [bool; 2],
}

impl StickMapper {
    pub fn new(origin: [u16; 2], config: &StickConfig) -> Self {
        Self {
            origin,
            threshold: config.threshold,
            invert: [config.invert_x, config.invert_y],
        }
    }

    pub fn origin(&self) -> [u16; 2] {
        self.origin
    }

    /// Convert a sample into a motion of `±sensitivity` per deflected axis.
    pub fn map(&self, sample: [u16; 2], sensitivity: i8) -> Motion {
        let dx = self.step(0, sample[0], sensitivity);
        let dy = self.step(1, sample[1], sensitivity);
        Motion { dx, dy }
    }

    fn step(&self, idx: usize, sample: u16, sensitivity: i8) -> i8 {
        let delta = sample as i32 - self.origin[idx] as i32;
        let step = if delta > self.threshold as i32 {
            sensitivity
        } else if delta < -(self.threshold as i32) {
            -sensitivity
        } else {
            0
        };
        if self.invert[idx] { -step } else { step }
    }
}

/// Two-axis analog stick used as a relative mouse.
pub struct Joystick<A: AnalogReader> {
    adc: A,
    origin: [u16; 2],
}

impl<A: AnalogReader> Joystick<A> {
    /// Create the joystick, the resting position at this moment becomes the origin.
    pub async fn calibrate(mut adc: A) -> Self {
        let origin = [adc.read(Axis::X).await, adc.read(Axis::Y).await];
        info!("Joystick origin: ({}, {})", origin[0], origin[1]);
        Self { adc, origin }
    }

    /// Read both axes once.
    pub async fn sample(&mut self) -> [u16; 2] {
        [self.adc.read(Axis::X).await, self.adc.read(Axis::Y).await]
    }

    /// Resting position captured by [`Joystick::calibrate`]
    pub fn origin(&self) -> [u16; 2] {
        self.origin
    }
}
