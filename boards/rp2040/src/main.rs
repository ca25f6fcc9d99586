#![no_main]
#![no_std]

use core::convert::Infallible;

use defmt::*;
use defmt_rtt as _;
use embassy_executor::Spawner;
use embassy_futures::join::join3;
use embassy_futures::select::select;
use embassy_rp::adc::{self, Adc, Channel as AdcChannel};
use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::{I2C0, PIO0, USB};
use embassy_rp::pio::{self, Pio};
use embassy_rp::pio_programs::ws2812::{PioWs2812, PioWs2812Program};
use embassy_rp::{bind_interrupts, usb};
use embassy_time::Delay;
use panic_probe as _;
use smart_leds::RGB8;
use ssd1306::prelude::*;
use ssd1306::{I2CDisplayInterface, Ssd1306Async};
use stickpad::channel::REPORT_CHANNEL;
use stickpad::hid::ReportWriter;
use stickpad::input_device::button::AuxButton;
use stickpad::input_device::joystick::Joystick;
use stickpad::input_device::rotary_encoder::{DEFAULT_RESOLUTION, QuadratureCounter, QuadratureDecoder};
use stickpad::input_device::{AnalogReader, Axis};
use stickpad::light::{Frame, FrameSink};
use stickpad::matrix::Matrix;
use stickpad::usb::run_usb_device;
use stickpad::{KEY_COUNT, Pad, PadConfig, PadInputs};

bind_interrupts!(struct Irqs {
    USBCTRL_IRQ => usb::InterruptHandler<USB>;
    I2C0_IRQ => i2c::InterruptHandler<I2C0>;
    ADC_IRQ_FIFO => adc::InterruptHandler;
    PIO0_IRQ_0 => pio::InterruptHandler<PIO0>;
});

static ENCODER_COUNTER: QuadratureCounter = QuadratureCounter::new();

/// Stick on the two ADC inputs, 12-bit samples are left-justified to 16 bits
struct AdcStick {
    adc: Adc<'static, adc::Async>,
    x: AdcChannel<'static>,
    y: AdcChannel<'static>,
    last: [u16; 2],
}

impl AnalogReader for AdcStick {
    async fn read(&mut self, axis: Axis) -> u16 {
        let (channel, idx) = match axis {
            Axis::X => (&mut self.x, 0),
            Axis::Y => (&mut self.y, 1),
        };
        match self.adc.read(channel).await {
            Ok(raw) => self.last[idx] = raw << 4,
            Err(e) => warn!("ADC read failed: {:?}", Debug2Format(&e)),
        }
        self.last[idx]
    }
}

/// WS2812 strip driven by PIO0
struct PioLeds {
    ws2812: PioWs2812<'static, PIO0, 0, KEY_COUNT>,
}

impl FrameSink for PioLeds {
    type Error = Infallible;

    async fn write_frame(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        // Frame words are packed as G R B A
        let colors = frame.map(|w| RGB8::new((w >> 16) as u8, (w >> 24) as u8, (w >> 8) as u8));
        self.ws2812.write(&colors).await;
        Ok(())
    }
}

#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("stickpad start!");
    let p = embassy_rp::init(Default::default());
    let config = PadConfig::rich();

    // Usb
    let driver = usb::Driver::new(p.USB, Irqs);

    // Display, mounted upside down
    let i2c = I2c::new_async(p.I2C0, p.PIN_13, p.PIN_12, Irqs, i2c::Config::default());
    let interface = I2CDisplayInterface::new(i2c);
    let mut display =
        Ssd1306Async::new(interface, DisplaySize128x64, DisplayRotation::Rotate180).into_buffered_graphics_mode();
    if let Err(e) = display.init().await {
        error!("Display init failed: {:?}", Debug2Format(&e));
    }

    // Leds
    let Pio { mut common, sm0, .. } = Pio::new(p.PIO0, Irqs);
    let program = PioWs2812Program::new(&mut common);
    let leds = PioLeds {
        ws2812: PioWs2812::new(&mut common, sm0, p.DMA_CH0, p.PIN_1, &program),
    };

    // Stick, calibrated at rest
    let stick = AdcStick {
        adc: Adc::new(p.ADC, Irqs, adc::Config::default()),
        x: AdcChannel::new_pin(p.PIN_29, Pull::None),
        y: AdcChannel::new_pin(p.PIN_28, Pull::None),
        last: [0x8000; 2],
    };
    let joystick = Joystick::calibrate(stick).await;

    // Buttons
    let sensitivity_button = AuxButton::new(Input::new(p.PIN_0, Pull::Up));
    let click_button = AuxButton::new(Input::new(p.PIN_2, Pull::Up));

    // Encoder
    let mut decoder = QuadratureDecoder::new(
        Input::new(p.PIN_3, Pull::Up),
        Input::new(p.PIN_4, Pull::Up),
        DEFAULT_RESOLUTION,
        false,
        &ENCODER_COUNTER,
    );

    // Matrix
    let output_pins = [
        Output::new(p.PIN_5, Level::Low),
        Output::new(p.PIN_6, Level::Low),
        Output::new(p.PIN_7, Level::Low),
        Output::new(p.PIN_8, Level::Low),
    ];
    let input_pins = [
        Input::new(p.PIN_9, Pull::Down),
        Input::new(p.PIN_10, Pull::Down),
        Input::new(p.PIN_11, Pull::Down),
    ];
    let matrix = Matrix::new(input_pins, output_pins, config.timing.settle);

    let inputs = PadInputs::new(matrix, joystick, sensitivity_button, click_button, &ENCODER_COUNTER, Delay);
    let usb_config = config.usb;
    let mut pad = match Pad::new(config, inputs, ReportWriter::new(&REPORT_CHANNEL), leds, display) {
        Ok(pad) => pad,
        Err(e) => {
            error!("Invalid pad config: {:?}", e);
            return;
        }
    };

    let encoder = async {
        loop {
            let (a, b) = decoder.pins_mut();
            select(a.wait_for_any_edge(), b.wait_for_any_edge()).await;
            decoder.update();
        }
    };

    info!("Running pad");
    join3(run_usb_device(driver, usb_config), encoder, pad.run()).await;
}
