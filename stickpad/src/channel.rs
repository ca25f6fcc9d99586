//! Exposed channels which can be used to share data across tasks

use embassy_sync::channel::Channel;
pub use embassy_sync::{blocking_mutex, channel};

use crate::hid::Report;
use crate::{REPORT_CHANNEL_SIZE, RawMutex};

/// Channel for hid reports from the main loop to the usb writer
pub static REPORT_CHANNEL: Channel<RawMutex, Report, REPORT_CHANNEL_SIZE> = Channel::new();
