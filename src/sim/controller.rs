/// The game controller: sole owner of `GameState` and the random source.
///
/// Processing order for one command:
///   1. Stage gate (Won accepts only Restart; Restart needs Won)
///   2. Movement → hazard hand-off on lava
///   3. Mining → progression check when inventory grew
///
/// A command is fully resolved, including any blocking notifier call,
/// before `apply` returns.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::domain::entity::{Command, Direction};
use super::event::GameEvent;
use super::movement::{self, MoveOutcome};
use super::notify::Notifier;
use super::progression::{self, Stage, Transition};
use super::world::{GameState, Phase, Snapshot};
use super::{hazard, mining, worldgen};

pub struct Controller<R = StdRng> {
    state: GameState,
    rng: R,
}

impl Controller<StdRng> {
    /// Seeded when `seed` is given, otherwise from OS entropy.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(s) => {
                log::info!("world seed: {s}");
                StdRng::seed_from_u64(s)
            }
            None => StdRng::from_os_rng(),
        };
        Controller::new(rng)
    }
}

impl<R: Rng> Controller<R> {
    /// Start a new game in phase 1.
    pub fn new(mut rng: R) -> Self {
        let grid = worldgen::generate(Phase::Phase1, &mut rng);
        Controller { state: GameState::new(Phase::Phase1, grid), rng }
    }

    /// Resume from an existing state.
    #[allow(dead_code)]
    pub fn with_state(state: GameState, rng: R) -> Self {
        Controller { state, rng }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        self.state.snapshot()
    }

    pub fn stage(&self) -> Stage {
        progression::stage(&self.state)
    }

    /// Resolve one command.
    pub fn apply<N: Notifier + ?Sized>(&mut self, command: Command, notifier: &mut N) -> Vec<GameEvent> {
        let mut events = Vec::new();
        log::debug!("command {:?} in {:?}", command, self.stage());

        if self.stage() == Stage::Won {
            if command == Command::Restart && progression::restart(&mut self.state, &mut self.rng) {
                events.push(GameEvent::Restarted);
            } else {
                events.push(GameEvent::Ignored);
            }
            return events;
        }

        match command {
            Command::Restart => events.push(GameEvent::Ignored),
            Command::Mine => self.resolve_mine(notifier, &mut events),
            other => {
                if let Some(dir) = other.direction() {
                    self.resolve_move(dir, notifier, &mut events);
                }
            }
        }

        events
    }

    fn resolve_move<N: Notifier + ?Sized>(
        &mut self,
        dir: Direction,
        notifier: &mut N,
        events: &mut Vec<GameEvent>,
    ) {
        match movement::move_player(&mut self.state, dir) {
            MoveOutcome::Moved { x, y } => events.push(GameEvent::Moved { x, y }),
            MoveOutcome::Blocked => events.push(GameEvent::Blocked),
            MoveOutcome::Hazard { x, y } => {
                events.push(GameEvent::LavaEntered { x, y });
                hazard::on_lava_entry(&mut self.state, (x, y), &mut self.rng, notifier);
            }
        }
    }

    fn resolve_mine<N: Notifier + ?Sized>(&mut self, notifier: &mut N, events: &mut Vec<GameEvent>) {
        let report = mining::mine(&mut self.state);
        if report.is_empty() {
            events.push(GameEvent::NothingToMine);
            return;
        }
        for m in &report.cleared {
            log::trace!("mined {} at ({}, {})", m.kind.name(), m.x, m.y);
            events.push(GameEvent::BlockMined { x: m.x, y: m.y, kind: m.kind });
        }
        for resource in report.collected() {
            events.push(GameEvent::ResourceCollected { resource });
        }

        if !report.gained_resources() {
            return;
        }
        match progression::check(&mut self.state, &mut self.rng, notifier) {
            Some(Transition::Advanced) => events.push(GameEvent::PhaseAdvanced),
            Some(Transition::Declined) => events.push(GameEvent::AdvanceDeclined),
            Some(Transition::Won) => events.push(GameEvent::Won),
            None => {}
        }
    }
}
