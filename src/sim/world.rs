/// GameState: the complete, explicit state of a running game.
///
/// The controller owns exactly one of these. Every component receives it
/// by reference and mutates it in place; nothing else holds game state.
///
///   - `grid`       current phase's blocks, regenerated on phase change / hazard
///   - `player`     always inside the grid, always on an Empty cell
///   - `inventory`  reset only on phase advance and restart
///   - `phase`      drives generation rules, spawn and win condition
///   - `status`     `Won` is terminal until `Restart`

use crate::domain::entity::{Inventory, Player};
use crate::domain::grid::Grid;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Phase1,
    Phase2,
}

impl Phase {
    /// Fixed spawn used at phase start and after a hazard reset.
    pub fn spawn(self) -> (usize, usize) {
        match self {
            Phase::Phase1 => (5, 2),
            Phase::Phase2 => (5, 1),
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Phase::Phase1 => 1,
            Phase::Phase2 => 2,
        }
    }

    pub fn goal_text(self) -> &'static str {
        match self {
            Phase::Phase1 => "Collect 5 wood and 3 stone",
            Phase::Phase2 => "Collect 3 diamonds",
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameStatus {
    Playing,
    Won,
}

#[derive(Clone, Debug)]
pub struct GameState {
    pub grid: Grid,
    pub player: Player,
    pub inventory: Inventory,
    pub phase: Phase,
    pub status: GameStatus,
}

impl GameState {
    /// A fresh game in `phase` on the given grid, player at spawn.
    pub fn new(phase: Phase, grid: Grid) -> Self {
        let (x, y) = phase.spawn();
        GameState {
            grid,
            player: Player::new(x, y),
            inventory: Inventory::default(),
            phase,
            status: GameStatus::Playing,
        }
    }

    /// Install a freshly generated grid and move the player to spawn.
    /// Inventory, phase and status are left as they are.
    pub fn respawn(&mut self, grid: Grid) {
        let (x, y) = self.phase.spawn();
        self.grid = grid;
        self.player = Player::new(x, y);
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            grid: &self.grid,
            player: self.player,
            inventory: self.inventory,
            phase: self.phase,
            status: self.status,
        }
    }
}

/// Read-only view handed to the renderer after each command.
#[derive(Clone, Copy, Debug)]
pub struct Snapshot<'a> {
    pub grid: &'a Grid,
    pub player: Player,
    pub inventory: Inventory,
    pub phase: Phase,
    pub status: GameStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::tile::BlockType;

    #[test]
    fn spawns_are_fixed_per_phase() {
        assert_eq!(Phase::Phase1.spawn(), (5, 2));
        assert_eq!(Phase::Phase2.spawn(), (5, 1));
    }

    #[test]
    fn respawn_keeps_inventory() {
        let mut state = GameState::new(Phase::Phase2, Grid::from_rows(&[]));
        state.player = Player::new(0, 0);
        state.inventory = Inventory::new(1, 2, 3);
        state.respawn(Grid::from_fn(|_, _| BlockType::Stone));
        assert_eq!(state.player.pos(), (5, 1));
        assert_eq!(state.inventory, Inventory::new(1, 2, 3));
        assert_eq!(state.grid.count(BlockType::Stone), 144);
    }
}
