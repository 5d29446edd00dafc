/// Blocking notification boundary.
///
/// The engine calls out through this trait when it needs the player's
/// attention. Both calls block until the implementation returns; no other
/// command is resolved in the meantime.

pub trait Notifier {
    /// Show a message and wait for acknowledgement.
    fn notify(&mut self, message: &str);

    /// Ask a yes/no question.
    fn confirm(&mut self, message: &str) -> bool;
}

/// Records every call and answers `confirm` from a fixed script.
/// Runs out of scripted answers → `false`.
#[cfg(test)]
#[derive(Default, Debug)]
pub struct ScriptedNotifier {
    pub answers: std::collections::VecDeque<bool>,
    pub notified: Vec<String>,
    pub asked: Vec<String>,
}

#[cfg(test)]
impl ScriptedNotifier {
    pub fn answering(answers: &[bool]) -> Self {
        ScriptedNotifier {
            answers: answers.iter().copied().collect(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
impl Notifier for ScriptedNotifier {
    fn notify(&mut self, message: &str) {
        self.notified.push(message.to_string());
    }

    fn confirm(&mut self, message: &str) -> bool {
        self.asked.push(message.to_string());
        self.answers.pop_front().unwrap_or(false)
    }
}
