use std::collections::VecDeque;

use stickpad::display::DisplaySink;
use stickpad::hid::{HidSink, MouseButton, WheelDirection};
use stickpad::keycode::HidKeyCode;
use stickpad::light::{Frame, FrameSink};
use stickpad::{InputSampler, TickInputs};

// Init logger for tests
#[ctor::ctor]
pub fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const ORIGIN: [u16; 2] = [0x8000, 0x8000];

/// Sample far enough from [`ORIGIN`] to move right
pub const STICK_RIGHT: [u16; 2] = [0xC000, 0x8000];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HidEvent {
    KeyDown(HidKeyCode),
    KeyUp(HidKeyCode),
    Move(i8, i8),
    Press(MouseButton),
    Release(MouseButton),
    Wheel(WheelDirection),
}

#[derive(Default)]
pub struct RecordingHid {
    pub events: Vec<HidEvent>,
}

impl HidSink for RecordingHid {
    async fn key_down(&mut self, key: HidKeyCode) {
        self.events.push(HidEvent::KeyDown(key));
    }

    async fn key_up(&mut self, key: HidKeyCode) {
        self.events.push(HidEvent::KeyUp(key));
    }

    async fn mouse_move(&mut self, dx: i8, dy: i8) {
        self.events.push(HidEvent::Move(dx, dy));
    }

    async fn mouse_press(&mut self, button: MouseButton) {
        self.events.push(HidEvent::Press(button));
    }

    async fn mouse_release(&mut self, button: MouseButton) {
        self.events.push(HidEvent::Release(button));
    }

    async fn wheel(&mut self, direction: WheelDirection) {
        self.events.push(HidEvent::Wheel(direction));
    }
}

#[derive(Debug)]
pub struct WriteFailed;

/// Keeps every frame written, optionally failing every write after recording it
#[derive(Default)]
pub struct RecordingLeds {
    pub frames: Vec<Frame>,
    pub fail: bool,
}

impl FrameSink for RecordingLeds {
    type Error = WriteFailed;

    async fn write_frame(&mut self, frame: &Frame) -> Result<(), Self::Error> {
        self.frames.push(*frame);
        if self.fail { Err(WriteFailed) } else { Ok(()) }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DisplayOp {
    Clear,
    Text(String, (i32, i32)),
    Flush,
}

/// Keeps every display operation, optionally failing each one after recording it
#[derive(Default)]
pub struct RecordingDisplay {
    pub ops: Vec<DisplayOp>,
    pub fail: bool,
}

impl RecordingDisplay {
    /// Texts drawn so far, in order
    pub fn texts(&self) -> Vec<&str> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                DisplayOp::Text(text, _) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn record(&mut self, op: DisplayOp) -> Result<(), WriteFailed> {
        self.ops.push(op);
        if self.fail { Err(WriteFailed) } else { Ok(()) }
    }
}

impl DisplaySink for RecordingDisplay {
    type Error = WriteFailed;

    async fn clear(&mut self) -> Result<(), Self::Error> {
        self.record(DisplayOp::Clear)
    }

    async fn draw_text(&mut self, text: &str, position: (i32, i32)) -> Result<(), Self::Error> {
        self.record(DisplayOp::Text(text.to_string(), position))
    }

    async fn flush(&mut self) -> Result<(), Self::Error> {
        self.record(DisplayOp::Flush)
    }
}

/// Replays scripted ticks, then keeps repeating the last levels without button edges
pub struct ScriptedSampler {
    script: VecDeque<TickInputs>,
    idle: TickInputs,
}

impl ScriptedSampler {
    /// Everything at rest, encoder at `encoder_position`
    pub fn new(encoder_position: i32) -> Self {
        Self {
            script: VecDeque::new(),
            idle: TickInputs::idle(ORIGIN, encoder_position),
        }
    }

    pub fn push(&mut self, inputs: TickInputs) -> &mut Self {
        self.script.push_back(inputs);
        self
    }

    /// Idle inputs with a modification applied
    pub fn idle_with(&self, f: impl FnOnce(&mut TickInputs)) -> TickInputs {
        let mut inputs = self.idle;
        f(&mut inputs);
        inputs
    }
}

impl InputSampler for ScriptedSampler {
    fn stick_origin(&self) -> [u16; 2] {
        ORIGIN
    }

    fn encoder_position(&self) -> i32 {
        self.idle.encoder_position
    }

    async fn sample(&mut self) -> TickInputs {
        match self.script.pop_front() {
            Some(inputs) => {
                self.idle = TickInputs {
                    sensitivity: None,
                    click: None,
                    ..inputs
                };
                inputs
            }
            None => self.idle,
        }
    }
}
