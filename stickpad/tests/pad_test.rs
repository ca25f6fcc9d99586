pub mod common;

use embassy_futures::block_on;
use stickpad::config::PadConfig;
use stickpad::display::NoDisplay;
use stickpad::hid::{MouseButton, WheelDirection};
use stickpad::input_device::button::ButtonEdge;
use stickpad::keycode::HidKeyCode;
use stickpad::light::{PIXEL_OFF, PIXEL_ON, hsv_to_rgb};
use stickpad::{KEY_COUNT, Pad, TickOutcome};

use crate::common::{
    DisplayOp, HidEvent, ORIGIN, RecordingDisplay, RecordingHid, RecordingLeds, STICK_RIGHT, ScriptedSampler,
};

type TestPad = Pad<'static, ScriptedSampler, RecordingHid, RecordingLeds, RecordingDisplay>;

fn pad(config: PadConfig<'static>, sampler: ScriptedSampler) -> TestPad {
    Pad::new(
        config,
        sampler,
        RecordingHid::default(),
        RecordingLeds::default(),
        RecordingDisplay::default(),
    )
    .unwrap()
}

fn run_ticks(pad: &mut TestPad, n: usize) -> Vec<TickOutcome> {
    block_on(async {
        let mut outcomes = Vec::with_capacity(n);
        for _ in 0..n {
            outcomes.push(pad.tick().await);
        }
        outcomes
    })
}

fn red(pixel: u32) -> u32 {
    (pixel >> 16) & 0xFF
}

#[test]
fn test_press_release_and_decay() {
    let mut sampler = ScriptedSampler::new(0);
    let press = sampler.idle_with(|i| i.keys[0] = true);
    let release = sampler.idle_with(|_| {});
    sampler.push(press).push(release);
    let mut pad = pad(PadConfig::default(), sampler);

    run_ticks(&mut pad, 22);

    assert_eq!(
        pad.hid().events,
        [HidEvent::KeyDown(HidKeyCode::LShift), HidEvent::KeyUp(HidKeyCode::LShift)]
    );

    let frames = &pad.leds().frames;
    assert_eq!(frames.len(), 22);
    // The press advanced the hue by one step before the frame was rendered
    let full = hsv_to_rgb(30, 1.0, 1.0).pack_grb();
    assert_eq!(frames[0][0], full);
    assert!(frames[0][1..].iter().all(|p| *p == PIXEL_OFF));
    // The release tick holds the intensity
    assert_eq!(frames[1][0], full);

    for pair in frames[1..].windows(2) {
        assert!(red(pair[1][0]) <= red(pair[0][0]));
    }
    assert_ne!(frames[20][0], PIXEL_OFF);
    assert_eq!(frames[21], [PIXEL_OFF; KEY_COUNT]);
    assert_eq!(pad.state().intensity(0), 0);
}

#[test]
fn test_encoder_direction_only() {
    let mut sampler = ScriptedSampler::new(0);
    for position in [3, 3, 1] {
        let inputs = sampler.idle_with(|i| i.encoder_position = position);
        sampler.push(inputs);
    }
    let mut pad = pad(PadConfig::default(), sampler);

    let outcomes = run_ticks(&mut pad, 4);

    assert_eq!(
        pad.hid().events,
        [HidEvent::Wheel(WheelDirection::Down), HidEvent::Wheel(WheelDirection::Up)]
    );
    let updated: Vec<bool> = outcomes.iter().map(|o| o.updated).collect();
    assert_eq!(updated, [true, false, true, false]);
}

#[test]
fn test_sensitivity_toggle() {
    let mut sampler = ScriptedSampler::new(0);
    let edges = [Some(ButtonEdge::Pressed), None, Some(ButtonEdge::Released), None];
    for edge in edges {
        let inputs = sampler.idle_with(|i| {
            i.stick = STICK_RIGHT;
            i.sensitivity = edge;
        });
        sampler.push(inputs);
    }
    let mut pad = pad(PadConfig::default(), sampler);

    run_ticks(&mut pad, 4);

    assert_eq!(
        pad.hid().events,
        [
            HidEvent::Move(1, 0),
            HidEvent::Move(2, 0),
            HidEvent::Move(2, 0),
            HidEvent::Move(1, 0),
        ]
    );
}

#[test]
fn test_click_latch() {
    let mut sampler = ScriptedSampler::new(0);
    let press = sampler.idle_with(|i| i.click = Some(ButtonEdge::Pressed));
    let hold = sampler.idle_with(|_| {});
    let release = sampler.idle_with(|i| i.click = Some(ButtonEdge::Released));
    sampler.push(press).push(hold).push(hold).push(release);
    let mut pad = pad(PadConfig::default(), sampler);

    run_ticks(&mut pad, 6);

    assert_eq!(
        pad.hid().events,
        [
            HidEvent::Press(MouseButton::Left),
            HidEvent::Release(MouseButton::Left)
        ]
    );
}

#[test]
fn test_marquee_follows_stick_activity() {
    let mut sampler = ScriptedSampler::new(0);
    let right = sampler.idle_with(|i| i.stick = STICK_RIGHT);
    let rest = sampler.idle_with(|i| i.stick = ORIGIN);
    for _ in 0..25 {
        sampler.push(right);
    }
    for _ in 0..30 {
        sampler.push(rest);
    }
    for _ in 0..20 {
        sampler.push(right);
    }
    let mut pad = pad(PadConfig::default(), sampler);

    let outcomes = run_ticks(&mut pad, 75);

    let rotated: Vec<usize> = outcomes
        .iter()
        .enumerate()
        .filter(|(_, o)| o.marquee_rotated)
        .map(|(idx, _)| idx + 1)
        .collect();
    assert_eq!(rotated, [20, 75]);

    let display = pad.display();
    assert_eq!(display.texts(), ["BCEFA", "CEFAB"]);
    assert_eq!(
        display.ops[..3],
        [DisplayOp::Clear, DisplayOp::Text("BCEFA".to_string(), (5, 45)), DisplayOp::Flush]
    );
}

#[test]
fn test_key_activity_alone_does_not_scroll() {
    let mut sampler = ScriptedSampler::new(0);
    for tick in 0..60 {
        let inputs = sampler.idle_with(|i| i.keys[tick % KEY_COUNT] = tick % 2 == 0);
        sampler.push(inputs);
    }
    let mut pad = pad(PadConfig::default(), sampler);

    run_ticks(&mut pad, 60);
    assert!(pad.display().ops.is_empty());
}

#[test]
fn test_minimal_preset() {
    let mut sampler = ScriptedSampler::new(0);
    let press = sampler.idle_with(|i| {
        i.keys[6] = true;
        i.stick = STICK_RIGHT;
    });
    let release = sampler.idle_with(|i| i.stick = STICK_RIGHT);
    sampler.push(press).push(release);
    let mut pad = pad(PadConfig::minimal(), sampler);

    run_ticks(&mut pad, 40);

    let keys: Vec<HidEvent> = pad
        .hid()
        .events
        .iter()
        .copied()
        .filter(|e| matches!(e, HidEvent::KeyDown(_) | HidEvent::KeyUp(_)))
        .collect();
    assert_eq!(keys, [HidEvent::KeyDown(HidKeyCode::Escape), HidEvent::KeyUp(HidKeyCode::Escape)]);

    let frames = &pad.leds().frames;
    assert_eq!(frames[0][6], PIXEL_ON);
    assert_eq!(frames[1], [PIXEL_OFF; KEY_COUNT]);
    // No marquee configured
    assert!(pad.config().marquee.is_none());
    assert!(pad.display().ops.is_empty());
}

#[test]
fn test_led_write_failure_is_ignored() {
    let mut sampler = ScriptedSampler::new(0);
    let press = sampler.idle_with(|i| i.keys[2] = true);
    sampler.push(press);
    let mut leds = RecordingLeds::default();
    leds.fail = true;
    let mut pad = Pad::new(PadConfig::default(), sampler, RecordingHid::default(), leds, NoDisplay).unwrap();

    block_on(async {
        for _ in 0..3 {
            pad.tick().await;
        }
    });

    assert_eq!(pad.leds().frames.len(), 3);
    assert_eq!(pad.hid().events, [HidEvent::KeyDown(HidKeyCode::LCtrl)]);
}

#[test]
fn test_display_failure_keeps_loop_running() {
    let mut sampler = ScriptedSampler::new(0);
    let right = sampler.idle_with(|i| i.stick = STICK_RIGHT);
    let press = sampler.idle_with(|i| {
        i.stick = STICK_RIGHT;
        i.keys[0] = true;
    });
    for _ in 0..20 {
        sampler.push(right);
    }
    sampler.push(press);
    let mut display = RecordingDisplay::default();
    display.fail = true;
    let mut pad = Pad::new(
        PadConfig::default(),
        sampler,
        RecordingHid::default(),
        RecordingLeds::default(),
        display,
    )
    .unwrap();

    let outcomes = run_ticks(&mut pad, 24);

    assert!(outcomes[19].marquee_rotated);
    assert!(!pad.display().ops.is_empty());
    assert_eq!(pad.state().marquee().map(|m| m.as_str()), Some("BCEFA"));
    assert_eq!(pad.leds().frames.len(), 24);
    assert_ne!(pad.leds().frames[20][0], PIXEL_OFF);

    let after: Vec<HidEvent> = pad
        .hid()
        .events
        .iter()
        .copied()
        .skip_while(|e| *e != HidEvent::KeyDown(HidKeyCode::LShift))
        .collect();
    assert_eq!(after[0], HidEvent::KeyDown(HidKeyCode::LShift));
    assert!(after[1..].iter().any(|e| matches!(e, HidEvent::Move(..))));
}
