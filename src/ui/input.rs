/// Keyboard adapter: raw terminal key events → discrete commands.
///
///   Arrows / WASD   →  MoveUp / MoveDown / MoveLeft / MoveRight
///   Space           →  Mine
///   R               →  Restart
///   Esc / Q / Ctrl+C → quit the program (never reaches the engine)
///
/// Only fresh presses count. At most one command is taken per frame;
/// anything else pressed in the same frame is dropped, not queued.

use std::io;
use std::time::Duration;

use crossterm::event::{self, poll, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::domain::entity::Command;

/// What the player asked for this frame.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Intent {
    Command(Command),
    Quit,
}

pub struct InputState {
    /// Raw key events collected during the last drain.
    pub raw_events: Vec<KeyEvent>,
}

impl InputState {
    pub fn new() -> Self {
        InputState { raw_events: Vec::with_capacity(8) }
    }

    /// Wait up to `timeout` for input, then drain everything pending.
    /// Quit wins over commands; otherwise the first command is kept.
    pub fn poll_intent(&mut self, timeout: Duration) -> io::Result<Option<Intent>> {
        self.raw_events.clear();

        if !poll(timeout)? {
            return Ok(None);
        }
        loop {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Release {
                    self.raw_events.push(key);
                }
            }
            if !poll(Duration::ZERO)? {
                break;
            }
        }

        let intents: Vec<Intent> = self.raw_events.iter().filter_map(map_key).collect();
        if intents.contains(&Intent::Quit) {
            return Ok(Some(Intent::Quit));
        }
        Ok(intents.first().copied())
    }
}

/// Key → intent mapping.
pub fn map_key(key: &KeyEvent) -> Option<Intent> {
    if is_ctrl_c(key) {
        return Some(Intent::Quit);
    }
    let cmd = match key.code {
        KeyCode::Up | KeyCode::Char('w') | KeyCode::Char('W') => Command::MoveUp,
        KeyCode::Down | KeyCode::Char('s') | KeyCode::Char('S') => Command::MoveDown,
        KeyCode::Left | KeyCode::Char('a') | KeyCode::Char('A') => Command::MoveLeft,
        KeyCode::Right | KeyCode::Char('d') | KeyCode::Char('D') => Command::MoveRight,
        KeyCode::Char(' ') => Command::Mine,
        KeyCode::Char('r') | KeyCode::Char('R') => Command::Restart,
        KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('Q') => return Some(Intent::Quit),
        _ => return None,
    };
    Some(Intent::Command(cmd))
}

/// Dialog answer for a key: `Some(true)` yes / OK, `Some(false)` no.
/// Space is the mine key and never answers, so mashing it cannot
/// accept a prompt.
pub fn answer_key(key: &KeyEvent) -> Option<bool> {
    if is_ctrl_c(key) {
        return Some(false);
    }
    match key.code {
        KeyCode::Enter | KeyCode::Char('y') | KeyCode::Char('Y') => Some(true),
        KeyCode::Esc | KeyCode::Char('n') | KeyCode::Char('N') => Some(false),
        _ => None,
    }
}

/// Block up to `timeout` for one key press.
pub fn read_key(timeout: Duration) -> io::Result<Option<KeyEvent>> {
    if !poll(timeout)? {
        return Ok(None);
    }
    match event::read()? {
        Event::Key(key) if key.kind != KeyEventKind::Release => Ok(Some(key)),
        _ => Ok(None),
    }
}

/// Throw away every pending terminal event (key repeats, presses made
/// before a dialog appeared).
pub fn discard_pending() -> io::Result<()> {
    while poll(Duration::ZERO)? {
        event::read()?;
    }
    Ok(())
}

fn is_ctrl_c(key: &KeyEvent) -> bool {
    key.modifiers.contains(KeyModifiers::CONTROL)
        && (key.code == KeyCode::Char('c') || key.code == KeyCode::Char('C'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    #[test]
    fn arrows_and_wasd_move() {
        assert_eq!(map_key(&key(KeyCode::Up)), Some(Intent::Command(Command::MoveUp)));
        assert_eq!(map_key(&key(KeyCode::Char('a'))), Some(Intent::Command(Command::MoveLeft)));
        assert_eq!(map_key(&key(KeyCode::Char('S'))), Some(Intent::Command(Command::MoveDown)));
        assert_eq!(map_key(&key(KeyCode::Right)), Some(Intent::Command(Command::MoveRight)));
    }

    #[test]
    fn space_mines_and_r_restarts() {
        assert_eq!(map_key(&key(KeyCode::Char(' '))), Some(Intent::Command(Command::Mine)));
        assert_eq!(map_key(&key(KeyCode::Char('r'))), Some(Intent::Command(Command::Restart)));
    }

    #[test]
    fn quit_keys() {
        assert_eq!(map_key(&key(KeyCode::Esc)), Some(Intent::Quit));
        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert_eq!(map_key(&ctrl_c), Some(Intent::Quit));
    }

    #[test]
    fn unknown_keys_are_ignored() {
        assert_eq!(map_key(&key(KeyCode::Char('z'))), None);
        assert_eq!(map_key(&key(KeyCode::F(1))), None);
        assert_eq!(map_key(&key(KeyCode::Char('c'))), None);
    }

    #[test]
    fn dialog_answers() {
        assert_eq!(answer_key(&key(KeyCode::Enter)), Some(true));
        assert_eq!(answer_key(&key(KeyCode::Char('y'))), Some(true));
        assert_eq!(answer_key(&key(KeyCode::Char('n'))), Some(false));
        assert_eq!(answer_key(&key(KeyCode::Esc)), Some(false));
        assert_eq!(answer_key(&key(KeyCode::Char('w'))), None);
    }

    #[test]
    fn mine_key_never_answers_a_dialog() {
        let space = key(KeyCode::Char(' '));
        assert_eq!(map_key(&space), Some(Intent::Command(Command::Mine)));
        assert_eq!(answer_key(&space), None);
    }
}
