use crate::KEY_COUNT;
use crate::edge::{Edge, KeyEdges};
use crate::hid::HidSink;
use crate::keycode::HidKeyCode;
use crate::light::LedAnimator;

/// Routes matrix edges to the host and to the LED animation.
///
/// Also owns the hue accumulator: every press moves the shared hue forward by `hue_step` degrees.
#[derive(Clone, Debug)]
pub struct KeyRouter {
    keymap: [HidKeyCode; KEY_COUNT],
    hue: u16,
    hue_step: u16,
}

impl KeyRouter {
    pub fn new(keymap: [HidKeyCode; KEY_COUNT], hue_step: u16) -> Self {
        Self {
            keymap,
            hue: 0,
            hue_step: hue_step % 360,
        }
    }

    /// Current hue in degrees, always below 360
    pub fn hue(&self) -> u16 {
        self.hue
    }

    /// Handle one tick of edges. Returns `true` if any key changed.
    pub async fn route<H: HidSink>(&mut self, edges: &KeyEdges, hid: &mut H, light: &mut LedAnimator) -> bool {
        let mut changed = false;
        for (idx, edge) in edges.iter().enumerate() {
            let Some(edge) = edge else {
                continue;
            };
            changed = true;
            let key = self.keymap[idx];
            match edge {
                Edge::Rising => {
                    debug!("Key {} pressed: {:?}", idx, key);
                    hid.key_down(key).await;
                    light.trigger(idx);
                    self.hue = (self.hue + self.hue_step) % 360;
                }
                Edge::Falling => {
                    debug!("Key {} released: {:?}", idx, key);
                    hid.key_up(key).await;
                    light.release(idx);
                }
            }
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use embassy_futures::block_on;

    use super::*;
    use crate::config::{DEFAULT_KEYMAP, LightConfig};
    use crate::hid::{MouseButton, WheelDirection};

    #[derive(Default)]
    struct KeyLog {
        events: Vec<(bool, HidKeyCode)>,
    }

    impl HidSink for KeyLog {
        async fn key_down(&mut self, key: HidKeyCode) {
            self.events.push((true, key));
        }
        async fn key_up(&mut self, key: HidKeyCode) {
            self.events.push((false, key));
        }
        async fn mouse_move(&mut self, _dx: i8, _dy: i8) {}
        async fn mouse_press(&mut self, _button: MouseButton) {}
        async fn mouse_release(&mut self, _button: MouseButton) {}
        async fn wheel(&mut self, _direction: WheelDirection) {}
    }

    #[test]
    fn press_triggers_light_and_hue() {
        let mut router = KeyRouter::new(DEFAULT_KEYMAP, 30);
        let mut light = LedAnimator::new(LightConfig::default());
        let mut hid = KeyLog::default();
        let mut edges = [None; KEY_COUNT];
        edges[0] = Some(Edge::Rising);
        edges[11] = Some(Edge::Rising);

        assert!(block_on(router.route(&edges, &mut hid, &mut light)));
        assert_eq!(hid.events, [(true, DEFAULT_KEYMAP[0]), (true, DEFAULT_KEYMAP[11])]);
        assert_eq!(light.intensity(0), 100);
        assert_eq!(light.intensity(11), 100);
        assert_eq!(router.hue(), 60);
    }

    #[test]
    fn release_does_not_move_hue() {
        let mut router = KeyRouter::new(DEFAULT_KEYMAP, 30);
        let mut light = LedAnimator::new(LightConfig::default());
        let mut hid = KeyLog::default();
        let mut edges = [None; KEY_COUNT];
        edges[4] = Some(Edge::Falling);

        assert!(block_on(router.route(&edges, &mut hid, &mut light)));
        assert_eq!(hid.events, [(false, HidKeyCode::Application)]);
        assert_eq!(router.hue(), 0);
        assert!(!block_on(router.route(&[None; KEY_COUNT], &mut hid, &mut light)));
    }

    #[test]
    fn hue_wraps() {
        let mut router = KeyRouter::new(DEFAULT_KEYMAP, 30);
        let mut light = LedAnimator::new(LightConfig::default());
        let mut hid = KeyLog::default();
        let mut press = [None; KEY_COUNT];
        press[1] = Some(Edge::Rising);
        let mut release = [None; KEY_COUNT];
        release[1] = Some(Edge::Falling);
        for _ in 0..13 {
            block_on(router.route(&press, &mut hid, &mut light));
            block_on(router.route(&release, &mut hid, &mut light));
        }
        assert_eq!(router.hue(), 30);
    }
}
