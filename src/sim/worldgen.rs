/// World generator: row-banded tiers, one random draw per cell at most.
///
/// ## Phase 1
///   y 0..=4   Empty (sky)
///   y 5..=6   Wood 30% / Grass
///   y 7..=8   Dirt
///   y 9..     Stone
///
/// ## Phase 2
///   y 0..=3   Empty (sky)
///   y 4..=5   Wood 40% / Grass
///   y 6..=7   Dirt
///   y 8..=9   Lava 10% / Stone
///   y 10..    Diamond 20% / Stone
///
/// No reachability guarantee: a generated grid may be unsolvable.

use rand::Rng;

use crate::domain::grid::Grid;
use crate::domain::tile::BlockType;
use super::world::Phase;

/// Block-selection rule shared by one row band.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Tier {
    Fixed(BlockType),
    Chance { p: f64, hit: BlockType, miss: BlockType },
}

impl Tier {
    fn pick<R: Rng + ?Sized>(self, rng: &mut R) -> BlockType {
        match self {
            Tier::Fixed(kind) => kind,
            Tier::Chance { p, hit, miss } => {
                if rng.random_bool(p) { hit } else { miss }
            }
        }
    }
}

/// Tier rule for row `y` in `phase`.
pub fn tier(phase: Phase, y: usize) -> Tier {
    match phase {
        Phase::Phase1 => match y {
            0..=4 => Tier::Fixed(BlockType::Empty),
            5..=6 => Tier::Chance { p: 0.3, hit: BlockType::Wood, miss: BlockType::Grass },
            7..=8 => Tier::Fixed(BlockType::Dirt),
            _ => Tier::Fixed(BlockType::Stone),
        },
        Phase::Phase2 => match y {
            0..=3 => Tier::Fixed(BlockType::Empty),
            4..=5 => Tier::Chance { p: 0.4, hit: BlockType::Wood, miss: BlockType::Grass },
            6..=7 => Tier::Fixed(BlockType::Dirt),
            8..=9 => Tier::Chance { p: 0.1, hit: BlockType::Lava, miss: BlockType::Stone },
            _ => Tier::Chance { p: 0.2, hit: BlockType::Diamond, miss: BlockType::Stone },
        },
    }
}

/// Generate a full grid for `phase`, drawing from `rng`.
pub fn generate<R: Rng + ?Sized>(phase: Phase, rng: &mut R) -> Grid {
    let grid = Grid::from_fn(|_x, y| tier(phase, y).pick(rng));
    log::debug!(
        "generated phase {} grid: wood={} lava={} diamond={}",
        phase.number(),
        grid.count(BlockType::Wood),
        grid.count(BlockType::Lava),
        grid.count(BlockType::Diamond),
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::grid::GRID_SIZE;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn row_kinds(grid: &Grid, y: usize) -> Vec<BlockType> {
        (0..GRID_SIZE).filter_map(|x| grid.kind_at(x, y)).collect()
    }

    fn all_in(grid: &Grid, rows: std::ops::RangeInclusive<usize>, allowed: &[BlockType]) -> bool {
        rows.flat_map(|y| row_kinds(grid, y)).all(|k| allowed.contains(&k))
    }

    #[test]
    fn phase1_bands() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..20 {
            let g = generate(Phase::Phase1, &mut rng);
            assert!(all_in(&g, 0..=4, &[BlockType::Empty]));
            assert!(all_in(&g, 5..=6, &[BlockType::Wood, BlockType::Grass]));
            assert!(all_in(&g, 7..=8, &[BlockType::Dirt]));
            assert!(all_in(&g, 9..=11, &[BlockType::Stone]));
        }
    }

    #[test]
    fn phase2_bands() {
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..20 {
            let g = generate(Phase::Phase2, &mut rng);
            assert!(all_in(&g, 0..=3, &[BlockType::Empty]));
            assert!(all_in(&g, 4..=5, &[BlockType::Wood, BlockType::Grass]));
            assert!(all_in(&g, 6..=7, &[BlockType::Dirt]));
            assert!(all_in(&g, 8..=9, &[BlockType::Lava, BlockType::Stone]));
            assert!(all_in(&g, 10..=11, &[BlockType::Diamond, BlockType::Stone]));
        }
    }

    #[test]
    fn spawn_cells_are_open_sky() {
        let mut rng = StdRng::seed_from_u64(3);
        for phase in [Phase::Phase1, Phase::Phase2] {
            let g = generate(phase, &mut rng);
            let (x, y) = phase.spawn();
            assert_eq!(g.kind_at(x, y), Some(BlockType::Empty));
        }
    }

    #[test]
    fn same_seed_same_grid() {
        let a = generate(Phase::Phase2, &mut StdRng::seed_from_u64(99));
        let b = generate(Phase::Phase2, &mut StdRng::seed_from_u64(99));
        assert_eq!(a, b);
    }

    #[test]
    fn coordinates_match_indices() {
        let g = generate(Phase::Phase1, &mut StdRng::seed_from_u64(1));
        for (y, row) in g.rows().enumerate() {
            for (x, b) in row.iter().enumerate() {
                assert_eq!((b.x, b.y), (x, y));
            }
        }
    }

    #[test]
    fn wood_and_lava_rates_are_roughly_right() {
        let mut rng = StdRng::seed_from_u64(2024);
        let (mut wood, mut lava) = (0usize, 0usize);
        let runs = 200;
        for _ in 0..runs {
            wood += generate(Phase::Phase1, &mut rng).count(BlockType::Wood);
            lava += generate(Phase::Phase2, &mut rng).count(BlockType::Lava);
        }
        // 2 chance rows per band, 12 cells each
        let cells = (runs * 2 * GRID_SIZE) as f64;
        let wood_rate = wood as f64 / cells;
        let lava_rate = lava as f64 / cells;
        assert!((0.25..0.35).contains(&wood_rate), "wood rate {wood_rate}");
        assert!((0.07..0.13).contains(&lava_rate), "lava rate {lava_rate}");
    }

    #[test]
    fn tier_table() {
        assert_eq!(tier(Phase::Phase1, 4), Tier::Fixed(BlockType::Empty));
        assert_eq!(tier(Phase::Phase1, 9), Tier::Fixed(BlockType::Stone));
        assert_eq!(tier(Phase::Phase2, 3), Tier::Fixed(BlockType::Empty));
        assert_eq!(
            tier(Phase::Phase2, 11),
            Tier::Chance { p: 0.2, hit: BlockType::Diamond, miss: BlockType::Stone },
        );
    }
}
