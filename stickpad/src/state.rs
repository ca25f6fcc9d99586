//! Per-tick state of the pad
use crate::KEY_COUNT;
use crate::config::PadConfig;
use crate::display::{Marquee, MarqueeError, MarqueeGate};
use crate::edge::EdgeDetector;
use crate::hid::{HidSink, MouseButton};
use crate::input_device::button::ButtonEdge;
use crate::input_device::joystick::{Motion, StickMapper};
use crate::input_device::rotary_encoder::EncoderMapper;
use crate::keyboard::KeyRouter;
use crate::light::{Frame, LedAnimator};
use crate::matrix::KeySnapshot;

/// Everything sampled from the hardware in one tick
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickInputs {
    /// Matrix snapshot, `true` is pressed
    pub keys: KeySnapshot,
    /// Raw stick sample, X then Y
    pub stick: [u16; 2],
    /// Edge of the sensitivity button
    pub sensitivity: Option<ButtonEdge>,
    /// Edge of the click button
    pub click: Option<ButtonEdge>,
    /// Encoder counter snapshot
    pub encoder_position: i32,
}

impl TickInputs {
    /// Nothing pressed, stick at `origin`, encoder at `encoder_position`
    pub fn idle(origin: [u16; 2], encoder_position: i32) -> Self {
        Self {
            keys: [false; KEY_COUNT],
            stick: origin,
            sensitivity: None,
            click: None,
            encoder_position,
        }
    }
}

/// What happened during one tick
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TickOutcome {
    /// Stick motion sent this tick
    pub motion: Motion,
    /// The stick is deflected
    pub activity: bool,
    /// Any subsystem produced an event
    pub updated: bool,
    /// The marquee rotated and the display needs a redraw
    pub marquee_rotated: bool,
}

/// All mutable state of the pad, owned by the main loop.
pub struct PadState {
    edges: EdgeDetector,
    router: KeyRouter,
    light: LedAnimator,
    stick: StickMapper,
    sensitivity: i8,
    normal_sensitivity: i8,
    boosted_sensitivity: i8,
    encoder: EncoderMapper,
    marquee: Option<(Marquee, MarqueeGate)>,
}

impl PadState {
    /// `origin` is the resting stick position, `encoder_position` the counter value at start-up.
    pub fn new(config: &PadConfig, origin: [u16; 2], encoder_position: i32) -> Result<Self, MarqueeError> {
        let marquee = match &config.marquee {
            Some(m) if m.refresh_ticks == 0 => return Err(MarqueeError::ZeroRefresh),
            Some(m) => Some((Marquee::new(m.text)?, MarqueeGate::new(m.refresh_ticks))),
            None => None,
        };
        Ok(Self {
            edges: EdgeDetector::new(),
            router: KeyRouter::new(config.keymap, config.light.hue_step),
            light: LedAnimator::new(config.light),
            stick: StickMapper::new(origin, &config.stick),
            sensitivity: config.stick.sensitivity,
            normal_sensitivity: config.stick.sensitivity,
            boosted_sensitivity: config.stick.boosted_sensitivity,
            encoder: EncoderMapper::new(encoder_position),
            marquee,
        })
    }

    /// Run one tick of the input fusion and feedback loop.
    ///
    /// The stick is mapped with the sensitivity in effect before this tick's button edges are applied.
    pub async fn process<H: HidSink>(&mut self, inputs: &TickInputs, hid: &mut H) -> TickOutcome {
        let mut outcome = TickOutcome::default();

        // Stick
        let motion = self.stick.map(inputs.stick, self.sensitivity);
        if motion.is_active() {
            hid.mouse_move(motion.dx, motion.dy).await;
            outcome.activity = true;
            outcome.updated = true;
        }
        outcome.motion = motion;

        // Sensitivity toggle
        if let Some(edge) = inputs.sensitivity {
            self.sensitivity = match edge {
                ButtonEdge::Pressed => self.boosted_sensitivity,
                ButtonEdge::Released => self.normal_sensitivity,
            };
            debug!("Stick sensitivity: {}", self.sensitivity);
            outcome.updated = true;
        }

        // Click latch
        if let Some(edge) = inputs.click {
            match edge {
                ButtonEdge::Pressed => hid.mouse_press(MouseButton::Left).await,
                ButtonEdge::Released => hid.mouse_release(MouseButton::Left).await,
            }
            outcome.updated = true;
        }

        // Scroll wheel
        if let Some(direction) = self.encoder.update(inputs.encoder_position) {
            hid.wheel(direction).await;
            outcome.updated = true;
        }

        // Keys
        let edges = self.edges.detect(&inputs.keys);
        if self.router.route(&edges, hid, &mut self.light).await {
            outcome.updated = true;
        }
        self.light.render(&edges, self.router.hue());

        // Marquee
        if let Some((marquee, gate)) = self.marquee.as_mut() {
            if gate.update(outcome.activity, outcome.updated) {
                marquee.rotate();
                outcome.marquee_rotated = true;
            }
        }

        outcome
    }

    /// Frame rendered by the last tick
    pub fn frame(&self) -> &Frame {
        self.light.frame()
    }

    pub fn marquee(&self) -> Option<&Marquee> {
        self.marquee.as_ref().map(|(m, _)| m)
    }

    pub fn hue(&self) -> u16 {
        self.router.hue()
    }

    pub fn sensitivity(&self) -> i8 {
        self.sensitivity
    }

    pub fn intensity(&self, idx: usize) -> u8 {
        self.light.intensity(idx)
    }
}
