#![doc = include_str!("../../README.md")]
//! ## Feature flags
#![doc = document_features::document_features!()]
#![cfg_attr(not(test), no_std)]
#![allow(async_fn_in_trait)]

// This mod MUST go first, so that the others see its macros.
pub(crate) mod fmt;

pub mod channel;
pub mod config;
pub mod display;
pub mod edge;
pub mod hid;
pub mod input_device;
pub mod keyboard;
pub mod keycode;
pub mod light;
pub mod matrix;
pub mod pad;
pub mod state;
pub mod usb;

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;

pub use config::PadConfig;
pub use pad::{InputSampler, Pad, PadError, PadInputs};
pub use state::{PadState, TickInputs, TickOutcome};

/// Number of matrix keys, 4 columns of 3 rows
pub const KEY_COUNT: usize = matrix::ROW * matrix::COL;

/// Mutex used by the report channel
pub type RawMutex = CriticalSectionRawMutex;

/// Capacity of the report channel between the main loop and the usb writer
pub const REPORT_CHANNEL_SIZE: usize = 16;
