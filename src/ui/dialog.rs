/// Terminal implementation of the engine's notification boundary.
///
/// Draws a modal box over the current frame and blocks until the player
/// answers from the keyboard or the gamepad. Nothing else is read while
/// a dialog is open.

use std::time::Duration;

use crate::sim::notify::Notifier;
use super::gamepad::GamepadState;
use super::input;
use super::renderer::Renderer;

pub struct TerminalDialog<'a> {
    renderer: &'a mut Renderer,
    gamepad: &'a mut GamepadState,
    poll: Duration,
}

impl<'a> TerminalDialog<'a> {
    pub fn new(renderer: &'a mut Renderer, gamepad: &'a mut GamepadState, poll: Duration) -> Self {
        TerminalDialog { renderer, gamepad, poll }
    }

    /// Show the box and wait for any answer.
    /// A broken terminal counts as "no" so the game never hangs.
    fn ask(&mut self, message: &str, hint: &str) -> bool {
        if let Err(e) = input::discard_pending() {
            log::warn!("dialog input failed: {e}");
            return false;
        }
        self.gamepad.release_all();
        if let Err(e) = self.renderer.show_dialog(message, hint) {
            log::warn!("dialog draw failed: {e}");
        }
        loop {
            match input::read_key(self.poll) {
                Ok(Some(key)) => {
                    if let Some(answer) = input::answer_key(&key) {
                        return answer;
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    log::warn!("dialog input failed: {e}");
                    return false;
                }
            }
            self.gamepad.update();
            if let Some(answer) = self.gamepad.answer() {
                return answer;
            }
        }
    }
}

impl Notifier for TerminalDialog<'_> {
    fn notify(&mut self, message: &str) {
        self.ask(message, "[Enter] OK");
    }

    fn confirm(&mut self, message: &str) -> bool {
        let yes = self.ask(message, "[Y] Yes     [N] No");
        log::debug!("confirm {message:?} -> {yes}");
        yes
    }
}
