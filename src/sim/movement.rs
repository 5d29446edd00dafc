/// Movement & collision resolution.
///
/// ┌────────────────────────────┬──────────────────────────┐
/// │ Target cell (after clamp)   │ Outcome                  │
/// ├────────────────────────────┼──────────────────────────┤
/// │ same as current (edge)      │ Blocked (no-op)          │
/// │ Lava                        │ Hazard (player stays)    │
/// │ solid (anything else)       │ Blocked                  │
/// │ Empty                       │ Moved                    │
/// └────────────────────────────┴──────────────────────────┘

use crate::domain::entity::Direction;
use crate::domain::grid::GRID_SIZE;
use crate::domain::tile::BlockType;
use super::world::GameState;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum MoveOutcome {
    Moved { x: usize, y: usize },
    Blocked,
    /// Target is lava; the caller hands off to the hazard handler.
    Hazard { x: usize, y: usize },
}

/// Candidate cell one step in `dir`, clamped to the grid.
pub fn target(x: usize, y: usize, dir: Direction) -> (usize, usize) {
    let (dx, dy) = dir.offset();
    let max = GRID_SIZE as i32 - 1;
    let tx = (x as i32 + dx).clamp(0, max) as usize;
    let ty = (y as i32 + dy).clamp(0, max) as usize;
    (tx, ty)
}

/// Decide what a move in `dir` would do, without changing anything.
pub fn resolve_move(state: &GameState, dir: Direction) -> MoveOutcome {
    let (px, py) = state.player.pos();
    let (tx, ty) = target(px, py, dir);
    if (tx, ty) == (px, py) {
        return MoveOutcome::Blocked;
    }

    match state.grid.kind_at(tx, ty) {
        Some(kind) if kind.is_hazard() => MoveOutcome::Hazard { x: tx, y: ty },
        Some(BlockType::Empty) => MoveOutcome::Moved { x: tx, y: ty },
        _ => MoveOutcome::Blocked,
    }
}

/// Resolve a move and apply it if the target is open.
/// A `Hazard` outcome leaves the player where it was.
pub fn move_player(state: &mut GameState, dir: Direction) -> MoveOutcome {
    let outcome = resolve_move(state, dir);
    if let MoveOutcome::Moved { x, y } = outcome {
        state.player.x = x;
        state.player.y = y;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::Player;
    use crate::domain::grid::Grid;
    use crate::sim::world::Phase;

    fn state_at(rows: &[&str], x: usize, y: usize) -> GameState {
        let mut s = GameState::new(Phase::Phase1, Grid::from_rows(rows));
        s.player = Player::new(x, y);
        s
    }

    #[test]
    fn moves_into_empty() {
        let mut s = state_at(&["...", "..."], 1, 0);
        assert_eq!(move_player(&mut s, Direction::Down), MoveOutcome::Moved { x: 1, y: 1 });
        assert_eq!(s.player.pos(), (1, 1));
        assert_eq!(move_player(&mut s, Direction::Left), MoveOutcome::Moved { x: 0, y: 1 });
    }

    #[test]
    fn every_solid_kind_blocks() {
        for ch in ["g", "d", "s", "w", "*"] {
            let row = format!(".{ch}");
            let mut s = state_at(&[row.as_str()], 0, 0);
            assert_eq!(move_player(&mut s, Direction::Right), MoveOutcome::Blocked, "{ch}");
            assert_eq!(s.player.pos(), (0, 0));
        }
    }

    #[test]
    fn edges_clamp_to_no_op() {
        let mut s = state_at(&[], 0, 0);
        assert_eq!(move_player(&mut s, Direction::Up), MoveOutcome::Blocked);
        assert_eq!(move_player(&mut s, Direction::Left), MoveOutcome::Blocked);
        assert_eq!(s.player.pos(), (0, 0));

        let mut s = state_at(&[], 11, 11);
        assert_eq!(move_player(&mut s, Direction::Down), MoveOutcome::Blocked);
        assert_eq!(move_player(&mut s, Direction::Right), MoveOutcome::Blocked);
        assert_eq!(s.player.pos(), (11, 11));
    }

    #[test]
    fn lava_reports_hazard_without_moving() {
        let mut s = state_at(&["..", ".~"], 1, 0);
        assert_eq!(move_player(&mut s, Direction::Down), MoveOutcome::Hazard { x: 1, y: 1 });
        assert_eq!(s.player.pos(), (1, 0));
    }

    #[test]
    fn target_clamps_both_axes() {
        assert_eq!(target(0, 5, Direction::Left), (0, 5));
        assert_eq!(target(11, 5, Direction::Right), (11, 5));
        assert_eq!(target(5, 0, Direction::Up), (5, 0));
        assert_eq!(target(5, 11, Direction::Down), (5, 11));
        assert_eq!(target(5, 5, Direction::Up), (5, 4));
    }
}
