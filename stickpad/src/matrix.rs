use embassy_time::Duration;
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::KEY_COUNT;

/// Number of row (input) pins.
pub const ROW: usize = 3;
/// Number of column (output) pins.
pub const COL: usize = 4;

/// Raw pressed state of every key, indexed by scan position `col * ROW + row`.
pub type KeySnapshot = [bool; KEY_COUNT];

/// Matrix is the physical pcb layout of the key matrix.
///
/// Columns are strobed one-hot, rows are read while a column is driven high. Rows are expected to be
/// pulled down, so a high row means the key at (column, row) is pressed.
pub struct Matrix<In: InputPin, Out: OutputPin> {
    /// Row pins
    input_pins: [In; ROW],
    /// Column pins
    output_pins: [Out; COL],
    /// Time between driving a column and sampling the rows
    settle: Duration,
}

impl<In: InputPin, Out: OutputPin> Matrix<In, Out> {
    /// Create a matrix from input and output pins.
    pub fn new(input_pins: [In; ROW], output_pins: [Out; COL], settle: Duration) -> Self {
        Matrix {
            input_pins,
            output_pins,
            settle,
        }
    }

    /// Scan all keys once.
    ///
    /// Blocks the caller for `COL` settle delays. No debouncing is done, every call reflects exactly one
    /// sample per key.
    pub async fn scan<D: DelayNs>(&mut self, delay: &mut D) -> KeySnapshot {
        let mut snapshot = [false; KEY_COUNT];
        let settle_us = self.settle.as_micros() as u32;

        for out_idx in 0..COL {
            // One-hot: every other column is low while this one is high
            for (idx, out_pin) in self.output_pins.iter_mut().enumerate() {
                if idx == out_idx {
                    out_pin.set_high().ok();
                } else {
                    out_pin.set_low().ok();
                }
            }
            delay.delay_us(settle_us).await;

            for (in_idx, in_pin) in self.input_pins.iter_mut().enumerate() {
                snapshot[out_idx * ROW + in_idx] = in_pin.is_high().ok().unwrap_or_default();
            }
        }

        // Pull the last column back to low
        if let Some(out_pin) = self.output_pins.last_mut() {
            out_pin.set_low().ok();
        }

        snapshot
    }
}
