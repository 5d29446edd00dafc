/// Gamepad adapter using gilrs.
///
/// Button mapping is loaded from config.toml via `load_button_config()`.
/// Default mapping:
///   D-pad / Left Stick    →  Move (one step per fresh press)
///   A / X                 →  Mine
///   Start                 →  Restart
///   A / Start             →  Dialog: yes / OK
///   B                     →  Dialog: no
///   Select                →  Quit

#[cfg(feature = "gamepad")]
use gilrs::{Axis, Button, EventType, Gilrs};

use crate::config::GamepadConfig;
use crate::domain::entity::Command;
use super::input::Intent;

#[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
const STICK_DEADZONE: f32 = 0.5;

/// Logical button identifiers (one per physical button).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Btn {
    A,       // South
    B,       // East
    X,       // West
    Y,       // North
    L1,      // LeftTrigger
    R1,      // RightTrigger
    L2,      // LeftTrigger2
    R2,      // RightTrigger2
    Start,
    Select,
}

impl Btn {
    fn from_name(s: &str) -> Option<Btn> {
        match s.to_uppercase().as_str() {
            "A" | "SOUTH"  => Some(Btn::A),
            "B" | "EAST"   => Some(Btn::B),
            "X" | "WEST"   => Some(Btn::X),
            "Y" | "NORTH"  => Some(Btn::Y),
            "L1" | "LB" | "LEFTTRIGGER"  => Some(Btn::L1),
            "R1" | "RB" | "RIGHTTRIGGER" => Some(Btn::R1),
            "L2" | "LT" | "LEFTTRIGGER2"  => Some(Btn::L2),
            "R2" | "RT" | "RIGHTTRIGGER2" => Some(Btn::R2),
            "START" => Some(Btn::Start),
            "SELECT" | "BACK" => Some(Btn::Select),
            _ => None,
        }
    }

    #[cfg(feature = "gamepad")]
    fn from_gilrs(btn: Button) -> Option<Btn> {
        match btn {
            Button::South     => Some(Btn::A),
            Button::East      => Some(Btn::B),
            Button::West      => Some(Btn::X),
            Button::North     => Some(Btn::Y),
            Button::LeftTrigger  => Some(Btn::L1),
            Button::RightTrigger => Some(Btn::R1),
            Button::LeftTrigger2  => Some(Btn::L2),
            Button::RightTrigger2 => Some(Btn::R2),
            Button::Start     => Some(Btn::Start),
            Button::Select    => Some(Btn::Select),
            _ => None,
        }
    }
}

/// Per-button state: held (continuous) and just_pressed (edge).
#[derive(Clone, Copy, Debug, Default)]
struct BtnState {
    held: bool,
    just_pressed: bool,
}

impl BtnState {
    /// Update `held` and raise `just_pressed` on a rising edge.
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    fn set_held(&mut self, held: bool) {
        if held && !self.held {
            self.just_pressed = true;
        }
        self.held = held;
    }
}

/// Action-to-button mapping (loaded from config).
struct ActionMap {
    mine: Vec<Btn>,
    restart: Vec<Btn>,
    confirm: Vec<Btn>,
    cancel: Vec<Btn>,
    quit: Vec<Btn>,
}

impl Default for ActionMap {
    fn default() -> Self {
        ActionMap {
            mine:    vec![Btn::A, Btn::X],
            restart: vec![Btn::Start],
            confirm: vec![Btn::Y, Btn::Start],
            cancel:  vec![Btn::B],
            quit:    vec![Btn::Select],
        }
    }
}

/// Four directional inputs in Up, Down, Left, Right order.
#[derive(Clone, Copy, Debug, Default)]
struct Cross {
    up: BtnState,
    down: BtnState,
    left: BtnState,
    right: BtnState,
}

impl Cross {
    fn clear_just_pressed(&mut self) {
        self.up.just_pressed = false;
        self.down.just_pressed = false;
        self.left.just_pressed = false;
        self.right.just_pressed = false;
    }

    fn pressed_command(&self) -> Option<Command> {
        if self.up.just_pressed {
            Some(Command::MoveUp)
        } else if self.down.just_pressed {
            Some(Command::MoveDown)
        } else if self.left.just_pressed {
            Some(Command::MoveLeft)
        } else if self.right.just_pressed {
            Some(Command::MoveRight)
        } else {
            None
        }
    }
}

pub struct GamepadState {
    #[cfg(feature = "gamepad")]
    gilrs: Option<Gilrs>,

    // All tracked buttons (indexed by Btn)
    buttons: [BtnState; 10],

    dpad: Cross,
    stick: Cross,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_x: f32,
    #[cfg_attr(not(feature = "gamepad"), allow(dead_code))]
    stick_y: f32,

    action_map: ActionMap,
}

fn btn_index(btn: Btn) -> usize {
    btn as usize
}

impl GamepadState {
    pub fn new() -> Self {
        #[cfg(feature = "gamepad")]
        let gilrs_opt = match Gilrs::new() {
            Ok(g) => {
                if let Some((_, pad)) = g.gamepads().next() {
                    log::info!("gamepad found: {}", pad.name());
                }
                Some(g)
            }
            Err(e) => {
                log::warn!("gamepad support unavailable: {e}");
                None
            }
        };

        GamepadState {
            #[cfg(feature = "gamepad")]
            gilrs: gilrs_opt,
            buttons: [BtnState::default(); 10],
            dpad: Cross::default(),
            stick: Cross::default(),
            stick_x: 0.0,
            stick_y: 0.0,
            action_map: ActionMap::default(),
        }
    }

    /// Load button mapping from config. Empty or unknown lists keep defaults.
    pub fn load_button_config(&mut self, cfg: &GamepadConfig) {
        fn parse_into(names: &[String], slot: &mut Vec<Btn>) {
            let parsed: Vec<Btn> = names.iter().filter_map(|s| Btn::from_name(s)).collect();
            if !parsed.is_empty() {
                *slot = parsed;
            }
        }
        let map = &mut self.action_map;
        parse_into(&cfg.mine, &mut map.mine);
        parse_into(&cfg.restart, &mut map.restart);
        parse_into(&cfg.confirm, &mut map.confirm);
        parse_into(&cfg.cancel, &mut map.cancel);
        parse_into(&cfg.quit, &mut map.quit);
    }

    pub fn update(&mut self) {
        self.clear_just_pressed();

        #[cfg(feature = "gamepad")]
        self.poll_gilrs();
    }

    #[cfg(feature = "gamepad")]
    fn poll_gilrs(&mut self) {
        let gilrs = match &mut self.gilrs {
            Some(g) => g,
            None => return,
        };

        let events: Vec<_> = std::iter::from_fn(|| gilrs.next_event()).collect();

        for event in events {
            match event.event {
                EventType::ButtonPressed(btn, _) => self.set_button(btn, true),
                EventType::ButtonReleased(btn, _) => self.set_button(btn, false),
                EventType::AxisChanged(axis, value, _) => self.update_axis(axis, value),
                EventType::Connected => log::info!("gamepad connected"),
                EventType::Disconnected => {
                    self.release_all();
                    log::info!("gamepad disconnected");
                }
                _ => {}
            }
        }

        // Derive stick digital states
        self.stick.left.set_held(self.stick_x < -STICK_DEADZONE);
        self.stick.right.set_held(self.stick_x > STICK_DEADZONE);
        self.stick.up.set_held(self.stick_y > STICK_DEADZONE);
        self.stick.down.set_held(self.stick_y < -STICK_DEADZONE);
    }

    #[cfg(feature = "gamepad")]
    fn set_button(&mut self, gilrs_btn: Button, held: bool) {
        // D-pad handled separately (not in Btn enum)
        match gilrs_btn {
            Button::DPadUp    => return self.dpad.up.set_held(held),
            Button::DPadDown  => return self.dpad.down.set_held(held),
            Button::DPadLeft  => return self.dpad.left.set_held(held),
            Button::DPadRight => return self.dpad.right.set_held(held),
            _ => {}
        }

        if let Some(btn) = Btn::from_gilrs(gilrs_btn) {
            self.buttons[btn_index(btn)].set_held(held);
        }
    }

    #[cfg(feature = "gamepad")]
    fn update_axis(&mut self, axis: Axis, value: f32) {
        match axis {
            Axis::LeftStickX => self.stick_x = value,
            Axis::LeftStickY => self.stick_y = value,
            _ => {}
        }
    }

    // ── Action queries (config-driven) ──

    fn any_just_pressed(&self, btns: &[Btn]) -> bool {
        btns.iter().any(|&b| self.buttons[btn_index(b)].just_pressed)
    }

    /// Intent from this frame's fresh presses. Quit wins, then moves,
    /// then mine, then restart.
    pub fn intent(&self) -> Option<Intent> {
        if self.any_just_pressed(&self.action_map.quit) {
            return Some(Intent::Quit);
        }
        let cmd = self.dpad.pressed_command()
            .or_else(|| self.stick.pressed_command())
            .or_else(|| self.any_just_pressed(&self.action_map.mine).then_some(Command::Mine))
            .or_else(|| self.any_just_pressed(&self.action_map.restart).then_some(Command::Restart));
        cmd.map(Intent::Command)
    }

    /// Dialog answer from this frame's presses.
    pub fn answer(&self) -> Option<bool> {
        if self.any_just_pressed(&self.action_map.confirm) {
            Some(true)
        } else if self.any_just_pressed(&self.action_map.cancel) {
            Some(false)
        } else {
            None
        }
    }

    // ── Internal ──

    fn clear_just_pressed(&mut self) {
        for b in &mut self.buttons { b.just_pressed = false; }
        self.dpad.clear_just_pressed();
        self.stick.clear_just_pressed();
    }

    /// Forget every held button. Buttons still down must be released
    /// and pressed again to count.
    pub fn release_all(&mut self) {
        for b in &mut self.buttons { *b = BtnState::default(); }
        self.dpad = Cross::default();
        self.stick = Cross::default();
        self.stick_x = 0.0;
        self.stick_y = 0.0;
    }
}
