/// Progression state machine.
///
/// ```text
///   Phase1Playing ──(wood≥5 ∧ stone≥3, confirm yes)──▶ Phase2Playing
///        ▲   └──(confirm no)──▶ stays, nothing changes
///        │
///        │                       Phase2Playing ──(diamond≥3)──▶ Won
///        │                                                       │
///        └──────────────────────(Restart)────────────────────────┘
/// ```
///
/// `check` runs after every inventory gain. `restart` is only honored in `Won`.

use rand::Rng;

use crate::domain::entity::Inventory;
use super::notify::Notifier;
use super::world::{GameState, GameStatus, Phase};
use super::worldgen;

pub const PHASE1_WOOD: u32 = 5;
pub const PHASE1_STONE: u32 = 3;
pub const PHASE2_DIAMOND: u32 = 3;

pub const ADVANCE_PROMPT: &str = "Phase 1 complete! Advance to Phase 2?";

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stage {
    Phase1Playing,
    Phase2Playing,
    Won,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Transition {
    Advanced,
    Declined,
    Won,
}

pub fn stage(state: &GameState) -> Stage {
    match (state.status, state.phase) {
        (GameStatus::Won, _) => Stage::Won,
        (GameStatus::Playing, Phase::Phase1) => Stage::Phase1Playing,
        (GameStatus::Playing, Phase::Phase2) => Stage::Phase2Playing,
    }
}

pub fn phase1_complete(inv: &Inventory) -> bool {
    inv.wood >= PHASE1_WOOD && inv.stone >= PHASE1_STONE
}

pub fn phase2_complete(inv: &Inventory) -> bool {
    inv.diamond >= PHASE2_DIAMOND
}

/// Fire any transition the current inventory has earned.
pub fn check<R, N>(state: &mut GameState, rng: &mut R, notifier: &mut N) -> Option<Transition>
where
    R: Rng + ?Sized,
    N: Notifier + ?Sized,
{
    match stage(state) {
        Stage::Phase1Playing if phase1_complete(&state.inventory) => {
            if notifier.confirm(ADVANCE_PROMPT) {
                advance(state, rng);
                Some(Transition::Advanced)
            } else {
                log::info!("phase 2 declined; staying in phase 1");
                Some(Transition::Declined)
            }
        }
        Stage::Phase2Playing if phase2_complete(&state.inventory) => {
            state.status = GameStatus::Won;
            log::info!("game won with inventory {:?}", state.inventory);
            Some(Transition::Won)
        }
        _ => None,
    }
}

/// Phase1 → Phase2: inventory zeroed, new grid, player at phase 2 spawn.
fn advance<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) {
    state.phase = Phase::Phase2;
    state.inventory = Inventory::default();
    let grid = worldgen::generate(Phase::Phase2, rng);
    state.respawn(grid);
    log::info!("advanced to phase 2");
}

/// Won → Phase1Playing with a fresh grid. Returns false outside `Won`.
pub fn restart<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R) -> bool {
    if stage(state) != Stage::Won {
        return false;
    }
    *state = GameState::new(Phase::Phase1, worldgen::generate(Phase::Phase1, rng));
    log::info!("game restarted");
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::Grid;
    use crate::domain::tile::BlockType;
    use crate::sim::notify::ScriptedNotifier;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn state(phase: Phase, inv: Inventory) -> GameState {
        let mut s = GameState::new(phase, Grid::from_rows(&[]));
        s.inventory = inv;
        s
    }

    #[test]
    fn thresholds() {
        assert!(!phase1_complete(&Inventory::new(4, 3, 0)));
        assert!(!phase1_complete(&Inventory::new(5, 2, 0)));
        assert!(phase1_complete(&Inventory::new(5, 3, 0)));
        assert!(phase1_complete(&Inventory::new(9, 9, 0)));
        assert!(!phase2_complete(&Inventory::new(9, 9, 2)));
        assert!(phase2_complete(&Inventory::new(0, 0, 3)));
    }

    #[test]
    fn below_threshold_does_not_ask() {
        let mut s = state(Phase::Phase1, Inventory::new(4, 3, 0));
        let mut n = ScriptedNotifier::answering(&[true]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(check(&mut s, &mut rng, &mut n), None);
        assert!(n.asked.is_empty());
    }

    #[test]
    fn accepted_confirmation_advances() {
        let mut s = state(Phase::Phase1, Inventory::new(5, 3, 0));
        let mut n = ScriptedNotifier::answering(&[true]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(check(&mut s, &mut rng, &mut n), Some(Transition::Advanced));
        assert_eq!(n.asked, vec![ADVANCE_PROMPT.to_string()]);
        assert_eq!(stage(&s), Stage::Phase2Playing);
        assert!(s.inventory.is_empty());
        assert_eq!(s.player.pos(), (5, 1));
        assert_eq!(s.grid.kind_at(0, 7), Some(BlockType::Dirt));
    }

    #[test]
    fn declined_confirmation_changes_nothing() {
        let mut s = state(Phase::Phase1, Inventory::new(6, 3, 0));
        let before = s.grid.clone();
        let mut n = ScriptedNotifier::answering(&[false]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(check(&mut s, &mut rng, &mut n), Some(Transition::Declined));
        assert_eq!(stage(&s), Stage::Phase1Playing);
        assert_eq!(s.inventory, Inventory::new(6, 3, 0));
        assert_eq!(s.grid, before);

        // threshold still met: the next check asks again
        let mut n = ScriptedNotifier::answering(&[true]);
        assert_eq!(check(&mut s, &mut rng, &mut n), Some(Transition::Advanced));
    }

    #[test]
    fn three_diamonds_win_without_asking() {
        let mut s = state(Phase::Phase2, Inventory::new(0, 0, 3));
        let mut n = ScriptedNotifier::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(check(&mut s, &mut rng, &mut n), Some(Transition::Won));
        assert!(n.asked.is_empty());
        assert_eq!(stage(&s), Stage::Won);
        // terminal: further checks do nothing
        assert_eq!(check(&mut s, &mut rng, &mut n), None);
    }

    #[test]
    fn phase2_ignores_phase1_threshold() {
        let mut s = state(Phase::Phase2, Inventory::new(10, 10, 0));
        let mut n = ScriptedNotifier::answering(&[true]);
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(check(&mut s, &mut rng, &mut n), None);
        assert!(n.asked.is_empty());
    }

    #[test]
    fn restart_only_from_won() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut s = state(Phase::Phase2, Inventory::new(1, 1, 1));
        assert!(!restart(&mut s, &mut rng));
        assert_eq!(s.phase, Phase::Phase2);

        s.status = GameStatus::Won;
        assert!(restart(&mut s, &mut rng));
        assert_eq!(stage(&s), Stage::Phase1Playing);
        assert!(s.inventory.is_empty());
        assert_eq!(s.player.pos(), (5, 2));
        assert_eq!(s.grid.kind_at(3, 9), Some(BlockType::Stone));
    }
}
