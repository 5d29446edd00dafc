/// Mining engine: clears every minable orthogonal neighbor of the player.
///
/// Wood / Stone / Diamond add one to the matching counter.
/// Grass / Dirt vanish without reward.
/// Empty / Lava neighbors are skipped. The player's own cell is never touched.

use crate::domain::grid::Grid;
use crate::domain::tile::{BlockType, Resource};
use super::world::GameState;

/// Neighbor order: down, up, right, left.
const NEIGHBORS: [(i32, i32); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// One block removed by a mine action.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Mined {
    pub x: usize,
    pub y: usize,
    pub kind: BlockType,
}

impl Mined {
    pub fn resource(&self) -> Option<Resource> {
        self.kind.resource()
    }
}

/// Everything a single mine action changed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MineReport {
    pub cleared: Vec<Mined>,
}

impl MineReport {
    pub fn is_empty(&self) -> bool {
        self.cleared.is_empty()
    }

    pub fn collected(&self) -> impl Iterator<Item = Resource> + '_ {
        self.cleared.iter().filter_map(Mined::resource)
    }

    /// Did the inventory change?
    pub fn gained_resources(&self) -> bool {
        self.collected().next().is_some()
    }
}

/// Mine around the player. Tiles and inventory change together.
pub fn mine(state: &mut GameState) -> MineReport {
    let (px, py) = state.player.pos();
    let mut report = MineReport::default();

    for (dx, dy) in NEIGHBORS {
        let nx = px as i32 + dx;
        let ny = py as i32 + dy;
        if !Grid::in_bounds(nx, ny) {
            continue;
        }
        let (nx, ny) = (nx as usize, ny as usize);
        let kind = match state.grid.kind_at(nx, ny) {
            Some(kind) if kind.is_minable() => kind,
            _ => continue,
        };

        state.grid.set_kind(nx, ny, BlockType::Empty);
        if let Some(resource) = kind.resource() {
            state.inventory.add(resource);
        }
        report.cleared.push(Mined { x: nx, y: ny, kind });
    }

    if !report.is_empty() {
        log::trace!("mined {} block(s) around ({px}, {py})", report.cleared.len());
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entity::{Inventory, Player};
    use crate::sim::world::Phase;

    fn state_at(rows: &[&str], x: usize, y: usize) -> GameState {
        let mut s = GameState::new(Phase::Phase1, Grid::from_rows(rows));
        s.player = Player::new(x, y);
        s
    }

    #[test]
    fn resources_are_counted_and_cleared() {
        let mut s = state_at(&[
            ".w.",
            "s.*",
            ".w.",
        ], 1, 1);
        let report = mine(&mut s);
        assert_eq!(report.cleared.len(), 4);
        assert_eq!(s.inventory, Inventory::new(2, 1, 1));
        for (x, y) in [(1, 0), (0, 1), (2, 1), (1, 2)] {
            assert_eq!(s.grid.kind_at(x, y), Some(BlockType::Empty));
        }
    }

    #[test]
    fn grass_and_dirt_vanish_without_reward() {
        let mut s = state_at(&[
            ".g.",
            "...",
            ".d.",
        ], 1, 1);
        let report = mine(&mut s);
        assert_eq!(report.cleared.len(), 2);
        assert!(!report.gained_resources());
        assert!(s.inventory.is_empty());
        assert_eq!(s.grid.kind_at(1, 0), Some(BlockType::Empty));
        assert_eq!(s.grid.kind_at(1, 2), Some(BlockType::Empty));
    }

    #[test]
    fn empty_and_lava_are_skipped() {
        let mut s = state_at(&[
            ".~.",
            "~.~",
            "...",
        ], 1, 1);
        let before = s.grid.clone();
        let report = mine(&mut s);
        assert!(report.is_empty());
        assert_eq!(s.grid, before);
        assert!(s.inventory.is_empty());
    }

    #[test]
    fn own_cell_and_diagonals_untouched() {
        let mut s = state_at(&[
            "w.w",
            "...",
            "w.w",
        ], 1, 1);
        s.grid.set_kind(1, 1, BlockType::Stone);
        mine(&mut s);
        assert_eq!(s.grid.kind_at(1, 1), Some(BlockType::Stone));
        assert_eq!(s.grid.count(BlockType::Wood), 4);
        assert!(s.inventory.is_empty());
    }

    #[test]
    fn corner_ignores_out_of_bounds() {
        let mut s = state_at(&[
            ".s",
            "s.",
        ], 0, 0);
        let report = mine(&mut s);
        assert_eq!(report.cleared.len(), 2);
        assert_eq!(s.inventory.stone, 2);
    }

    #[test]
    fn report_lists_collected_resources() {
        let mut s = state_at(&[
            ".*.",
            "g.w",
        ], 1, 1);
        s.grid.set_kind(1, 2, BlockType::Dirt);
        let report = mine(&mut s);
        let collected: Vec<_> = report.collected().collect();
        assert_eq!(collected, vec![Resource::Diamond, Resource::Wood]);
        assert!(report.gained_resources());
    }
}
