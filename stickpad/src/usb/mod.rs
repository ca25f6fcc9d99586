//! USB HID transport: one keyboard and one mouse interface fed from [`REPORT_CHANNEL`].
pub mod descriptor;

use embassy_futures::select::select;
use embassy_usb::class::hid::{HidWriter, ReportId, RequestHandler};
use embassy_usb::control::OutResponse;
use embassy_usb::driver::Driver;
use embassy_usb::{Builder, Handler};
use portable_atomic::{AtomicBool, Ordering};
use static_cell::StaticCell;

use crate::channel::REPORT_CHANNEL;
use crate::config::PadUsbConfig;
use crate::hid::{HidError, Report};
use crate::usb::descriptor::{KeyboardReport, MouseReport};

/// Set while the host has the device configured
pub static USB_CONFIGURED: AtomicBool = AtomicBool::new(false);

/// Size of a serialized [`KeyboardReport`]
const KEYBOARD_REPORT_LEN: usize = 8;
/// Size of a serialized [`MouseReport`]
const MOUSE_REPORT_LEN: usize = 4;

pub(crate) fn new_usb_builder<'d, D: Driver<'d>>(driver: D, usb_config: PadUsbConfig<'d>) -> Builder<'d, D> {
    // Create embassy-usb Config
    let mut config = embassy_usb::Config::new(usb_config.vid, usb_config.pid);
    config.manufacturer = Some(usb_config.manufacturer);
    config.product = Some(usb_config.product_name);
    config.serial_number = Some(usb_config.serial_number);
    config.max_power = 100;
    config.max_packet_size_0 = 64;

    // Required for windows compatibility.
    config.device_class = 0xEF;
    config.device_sub_class = 0x02;
    config.device_protocol = 0x01;
    config.composite_with_iads = true;

    static CONFIG_DESC: StaticCell<[u8; 128]> = StaticCell::new();
    static BOS_DESC: StaticCell<[u8; 16]> = StaticCell::new();
    static MSOS_DESC: StaticCell<[u8; 16]> = StaticCell::new();
    static CONTROL_BUF: StaticCell<[u8; 128]> = StaticCell::new();

    let mut builder = Builder::new(
        driver,
        config,
        &mut CONFIG_DESC.init([0; 128])[..],
        &mut BOS_DESC.init([0; 16])[..],
        &mut MSOS_DESC.init([0; 16])[..],
        &mut CONTROL_BUF.init([0; 128])[..],
    );

    static DEVICE_HANDLER: StaticCell<UsbDeviceHandler> = StaticCell::new();
    builder.handler(DEVICE_HANDLER.init(UsbDeviceHandler {}));

    builder
}

macro_rules! add_usb_writer {
    ($usb_builder:expr, $descriptor:ty, $n:expr) => {{
        // The hid class state must be static, one per report type
        use usbd_hid::descriptor::SerializedDescriptor;
        paste::paste! {
            static [<$descriptor:snake:upper _STATE>]: ::static_cell::StaticCell<::embassy_usb::class::hid::State> = ::static_cell::StaticCell::new();
            static [<$descriptor:snake:upper _HANDLER>]: ::static_cell::StaticCell<$crate::usb::UsbRequestHandler> = ::static_cell::StaticCell::new();
        }

        let state = paste::paste! { [<$descriptor:snake:upper _STATE>].init(::embassy_usb::class::hid::State::new()) };
        let request_handler = paste::paste! { [<$descriptor:snake:upper _HANDLER>].init($crate::usb::UsbRequestHandler {}) };

        let hid_config = ::embassy_usb::class::hid::Config {
            report_descriptor: <$descriptor>::desc(),
            request_handler: Some(request_handler),
            hid_subclass: ::embassy_usb::class::hid::HidSubclass::No,
            hid_boot_protocol: ::embassy_usb::class::hid::HidBootProtocol::None,
            poll_ms: 1,
            max_packet_size: 64,
        };

        let w: ::embassy_usb::class::hid::HidWriter<_, $n> = ::embassy_usb::class::hid::HidWriter::new($usb_builder, state, hid_config);
        w
    }};
}

/// Writes reports from the channel to the matching endpoint.
struct UsbReportWriter<'a, 'd, D: Driver<'d>> {
    keyboard_writer: &'a mut HidWriter<'d, D, KEYBOARD_REPORT_LEN>,
    mouse_writer: &'a mut HidWriter<'d, D, MOUSE_REPORT_LEN>,
}

impl<'a, 'd, D: Driver<'d>> UsbReportWriter<'a, 'd, D> {
    async fn write_report(&mut self, report: Report) -> Result<usize, HidError> {
        match report {
            Report::KeyboardReport(keyboard_report) => {
                self.keyboard_writer
                    .write_serialize(&keyboard_report)
                    .await
                    .map_err(HidError::UsbEndpointError)?;
                Ok(KEYBOARD_REPORT_LEN)
            }
            Report::MouseReport(mouse_report) => {
                self.mouse_writer
                    .write_serialize(&mouse_report)
                    .await
                    .map_err(HidError::UsbEndpointError)?;
                Ok(MOUSE_REPORT_LEN)
            }
        }
    }

    async fn run(&mut self) {
        loop {
            let report = REPORT_CHANNEL.receive().await;
            // Reports produced before the host configures the device are dropped
            if !USB_CONFIGURED.load(Ordering::Acquire) {
                continue;
            }
            if let Err(e) = self.write_report(report).await {
                warn!("Failed to send report: {:?}", e);
            }
        }
    }
}

/// Build the USB device and run it together with the report writer, forever.
pub async fn run_usb_device<D: Driver<'static>>(driver: D, usb_config: PadUsbConfig<'static>) {
    let mut builder = new_usb_builder(driver, usb_config);
    let mut keyboard_writer = add_usb_writer!(&mut builder, KeyboardReport, KEYBOARD_REPORT_LEN);
    let mut mouse_writer = add_usb_writer!(&mut builder, MouseReport, MOUSE_REPORT_LEN);
    let mut device = builder.build();

    let mut writer = UsbReportWriter {
        keyboard_writer: &mut keyboard_writer,
        mouse_writer: &mut mouse_writer,
    };
    info!("Starting USB device");
    select(device.run(), writer.run()).await;
}

pub(crate) struct UsbRequestHandler {}

impl RequestHandler for UsbRequestHandler {
    fn set_report(&mut self, id: ReportId, data: &[u8]) -> OutResponse {
        debug!("Set report for {:?}: {:?}", id, data);
        OutResponse::Accepted
    }
}

pub(crate) struct UsbDeviceHandler {}

impl Handler for UsbDeviceHandler {
    fn enabled(&mut self, enabled: bool) {
        if enabled {
            info!("Device enabled");
        } else {
            info!("Device disabled");
            USB_CONFIGURED.store(false, Ordering::Release);
        }
    }

    fn reset(&mut self) {
        info!("Bus reset");
        USB_CONFIGURED.store(false, Ordering::Release);
    }

    fn addressed(&mut self, addr: u8) {
        info!("USB address set to: {}", addr);
    }

    fn configured(&mut self, configured: bool) {
        USB_CONFIGURED.store(configured, Ordering::Release);
        if configured {
            info!("Device configured");
        } else {
            info!("Device is no longer configured");
        }
    }

    fn suspended(&mut self, suspended: bool) {
        if suspended {
            info!("Device suspended");
        } else {
            info!("Device resumed");
        }
    }
}
