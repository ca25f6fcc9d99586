//! The main loop of the pad
use embassy_time::{Duration, Timer};
use embedded_hal::digital::{InputPin, OutputPin};
use embedded_hal_async::delay::DelayNs;

use crate::config::PadConfig;
use crate::display::{DisplaySink, MarqueeError, redraw};
use crate::hid::HidSink;
use crate::input_device::AnalogReader;
use crate::input_device::button::AuxButton;
use crate::input_device::joystick::Joystick;
use crate::input_device::rotary_encoder::EncoderCounter;
use crate::light::FrameSink;
use crate::matrix::Matrix;
use crate::state::{PadState, TickInputs, TickOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum PadError {
    Marquee(MarqueeError),
}

impl From<MarqueeError> for PadError {
    fn from(e: MarqueeError) -> Self {
        PadError::Marquee(e)
    }
}

/// The trait for sampling all pad inputs once per tick.
pub trait InputSampler {
    /// Resting stick position
    fn stick_origin(&self) -> [u16; 2];

    /// Encoder counter at the time of the call
    fn encoder_position(&self) -> i32;

    /// Sample every input once
    async fn sample(&mut self) -> TickInputs;
}

/// Hardware inputs of the pad.
pub struct PadInputs<In, Out, A, S, C, E, D>
where
    In: InputPin,
    Out: OutputPin,
    A: AnalogReader,
    S: InputPin,
    C: InputPin,
    E: EncoderCounter,
    D: DelayNs,
{
    matrix: Matrix<In, Out>,
    joystick: Joystick<A>,
    sensitivity_button: AuxButton<S>,
    click_button: AuxButton<C>,
    encoder: E,
    delay: D,
}

impl<In, Out, A, S, C, E, D> PadInputs<In, Out, A, S, C, E, D>
where
    In: InputPin,
    Out: OutputPin,
    A: AnalogReader,
    S: InputPin,
    C: InputPin,
    E: EncoderCounter,
    D: DelayNs,
{
    pub fn new(
        matrix: Matrix<In, Out>,
        joystick: Joystick<A>,
        sensitivity_button: AuxButton<S>,
        click_button: AuxButton<C>,
        encoder: E,
        delay: D,
    ) -> Self {
        Self {
            matrix,
            joystick,
            sensitivity_button,
            click_button,
            encoder,
            delay,
        }
    }
}

impl<In, Out, A, S, C, E, D> InputSampler for PadInputs<In, Out, A, S, C, E, D>
where
    In: InputPin,
    Out: OutputPin,
    A: AnalogReader,
    S: InputPin,
    C: InputPin,
    E: EncoderCounter,
    D: DelayNs,
{
    fn stick_origin(&self) -> [u16; 2] {
        self.joystick.origin()
    }

    fn encoder_position(&self) -> i32 {
        self.encoder.position()
    }

    async fn sample(&mut self) -> TickInputs {
        let stick = self.joystick.sample().await;
        let sensitivity = self.sensitivity_button.poll();
        let click = self.click_button.poll();
        let encoder_position = self.encoder.position();
        let keys = self.matrix.scan(&mut self.delay).await;
        TickInputs {
            keys,
            stick,
            sensitivity,
            click,
            encoder_position,
        }
    }
}

/// The pad: samples inputs, drives the host, the LEDs and the display.
pub struct Pad<'a, S: InputSampler, H: HidSink, L: FrameSink, D: DisplaySink> {
    sampler: S,
    hid: H,
    leds: L,
    display: D,
    state: PadState,
    marquee_position: Option<(i32, i32)>,
    tick_tail: Duration,
    config: PadConfig<'a>,
}

impl<'a, S: InputSampler, H: HidSink, L: FrameSink, D: DisplaySink> Pad<'a, S, H, L, D> {
    pub fn new(config: PadConfig<'a>, sampler: S, hid: H, leds: L, display: D) -> Result<Self, PadError> {
        let state = PadState::new(&config, sampler.stick_origin(), sampler.encoder_position())?;
        Ok(Self {
            sampler,
            hid,
            leds,
            display,
            state,
            marquee_position: config.marquee.as_ref().map(|m| m.position),
            tick_tail: config.timing.tick_tail,
            config,
        })
    }

    pub fn state(&self) -> &PadState {
        &self.state
    }

    pub fn config(&self) -> &PadConfig<'a> {
        &self.config
    }

    pub fn hid(&self) -> &H {
        &self.hid
    }

    pub fn leds(&self) -> &L {
        &self.leds
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    /// Run one tick without the trailing delay
    pub async fn tick(&mut self) -> TickOutcome {
        let inputs = self.sampler.sample().await;
        let outcome = self.state.process(&inputs, &mut self.hid).await;

        // Dropped frames are not retried, the next tick writes a fresh one
        if self.leds.write_frame(self.state.frame()).await.is_err() {
            trace!("LED frame write failed");
        }

        if outcome.marquee_rotated {
            self.redraw_marquee().await;
        }
        outcome
    }

    async fn redraw_marquee(&mut self) {
        if let (Some(marquee), Some(position)) = (self.state.marquee(), self.marquee_position) {
            if redraw(&mut self.display, marquee, position).await.is_err() {
                error!("Display refresh failed");
            }
        }
    }

    /// Run the loop forever. The display stays blank until the first rotation.
    pub async fn run(&mut self) -> ! {
        info!("Pad started");
        loop {
            self.tick().await;
            Timer::after(self.tick_tail).await;
        }
    }
}
